pub mod accounts;
pub mod artifacts;
pub mod ledger;
pub mod registry;

pub use accounts::{Accounts, ClientSession};
pub use artifacts::ArtifactStore;
pub use ledger::{JoinTicket, Ledger, Position};
pub use registry::Registry;
