//! Console rendering of the action stream.
//!
//! One line per action:
//!
//! ```text
//! SELL - Order: 1, Amount: 50, Price: 50
//! PARTIAL_FILLED - Order: 4, Filled 25@45, From: 2
//! CANCEL - Order: 1
//! DONE
//! ```

use std::io::Write;
use std::sync::mpsc::Receiver;

use tracing::error;

use crate::error::ActionError;
use crate::sink::ActionSink;
use crate::types::{Action, ActionKind};

/// Render one action as a console line (without the newline)
///
/// # Errors
///
/// [`ActionError::UnknownKind`] if the action's kind does not decode.
pub fn render(action: &Action) -> Result<String, ActionError> {
    let kind = action.kind()?;
    let line = match kind {
        ActionKind::Buy | ActionKind::Sell => format!(
            "{} - Order: {}, Amount: {}, Price: {}",
            kind, action.order_id, action.amount, action.price
        ),
        ActionKind::Cancel | ActionKind::Cancelled => {
            format!("{} - Order: {}", kind, action.order_id)
        }
        ActionKind::PartialFilled | ActionKind::Filled => format!(
            "{} - Order: {}, Filled {}@{}, From: {}",
            kind, action.order_id, action.amount, action.price, action.from_order_id
        ),
        ActionKind::Done => kind.to_string(),
    };
    Ok(line)
}

/// Drain `rx` to `out` until the `DONE` action.
///
/// Returns the number of actions written, `DONE` included. If the sender
/// hangs up first, returns what was written so far.
///
/// # Errors
///
/// An action of unknown kind stops the consumer with
/// [`ActionError::UnknownKind`]; callers should treat it as fatal.
pub fn consume_until_done<W: Write>(rx: Receiver<Action>, mut out: W) -> Result<usize, ActionError> {
    let mut count = 0;
    for action in rx {
        let line = render(&action)?;
        writeln!(out, "{}", line)?;
        count += 1;
        if action.is_done() {
            break;
        }
    }
    out.flush()?;
    Ok(count)
}

/// Sink that writes each action straight to a writer.
#[derive(Debug)]
pub struct ConsolePrinter<W: Write> {
    out: W,
}

impl ConsolePrinter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsolePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ActionSink for ConsolePrinter<W> {
    /// # Panics
    ///
    /// Panics on an action of unknown kind.
    fn on_action(&mut self, action: Action) {
        let line = match render(&action) {
            Ok(line) => line,
            Err(e) => panic!("{}", e),
        };
        if let Err(e) = writeln!(self.out, "{}", line) {
            error!(error = %e, "failed to write action");
        }
    }
}
