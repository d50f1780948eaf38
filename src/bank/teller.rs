//! The `Teller` owns the bank and applies commands one at a time, in arrival order.
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::bank::{Bank, Command, LedgerError};

/// Serialises all access to a [`Bank`]. Any number of producers may hold a
/// sender; each command runs to completion before the next is received.
pub struct Teller {
    bank: Bank,
    /// A channel receiver for incoming commands.
    receiver: mpsc::Receiver<Command>,
}

impl Teller {
    /// Creates a teller over an empty bank.
    pub fn new(receiver: mpsc::Receiver<Command>) -> Self {
        Teller {
            bank: Bank::new(),
            receiver,
        }
    }

    /// Hands the bank back once the teller is done.
    pub fn into_bank(self) -> Bank {
        self.bank
    }

    /// Applies a single command to the bank.
    fn process_command(&mut self, command: Command) -> Result<(), LedgerError> {
        debug!(op = ?command.op(), "processing command");
        command.execute(&mut self.bank)
    }

    /// Processes commands until every sender has been dropped.
    pub async fn run(&mut self) {
        while let Some(command) = self.receiver.recv().await {
            let op = command.op();
            if let Err(e) = self.process_command(command) {
                warn!(?op, error = %e, "command rejected");
            }
        }
    }
}
