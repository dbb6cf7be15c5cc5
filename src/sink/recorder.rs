//! In-memory action log with a stream digest.
//!
//! The digest is SHA-256 over the SSZ encoding of every action in order, so
//! two runs over the same input produce the same hex string.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::sink::ActionSink;
use crate::types::{Action, ActionKind};

/// Recorder sink.
#[derive(Clone, Default)]
pub struct ActionLog {
    actions: Vec<Action>,
    hasher: Sha256,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actions: Vec::with_capacity(capacity),
            hasher: Sha256::new(),
        }
    }

    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }

    /// Number of recorded actions of one kind
    pub fn count(&self, kind: ActionKind) -> usize {
        let raw = kind.to_u8();
        self.actions.iter().filter(|a| a.kind_raw == raw).count()
    }

    /// SHA-256 of the stream so far
    pub fn digest(&self) -> [u8; 32] {
        let result = self.hasher.clone().finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }
}

impl fmt::Debug for ActionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionLog")
            .field("len", &self.actions.len())
            .field("digest", &self.digest_hex())
            .finish()
    }
}

impl ActionSink for ActionLog {
    fn on_action(&mut self, action: Action) {
        // Every field is fixed-width, so the little-endian layout is exactly
        // the SSZ encoding of the container.
        self.hasher.update([action.kind_raw]);
        self.hasher.update(action.order_id.to_le_bytes());
        self.hasher.update(action.from_order_id.to_le_bytes());
        self.hasher.update(action.amount.to_le_bytes());
        self.hasher.update(action.price.to_le_bytes());
        self.actions.push(action);
    }
}
