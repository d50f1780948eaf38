//! Banking module for handling customers, accounts, and the ledger that owns them.
mod account;
mod command;
mod customer;
mod error;
mod ledger;
mod teller;
mod types;

pub use account::*;
pub use command::*;
pub use customer::*;
pub use error::*;
pub use ledger::*;
pub use teller::*;
pub use types::*;
