//! Background workers.
//!
//! - `poller`: repeats `warp-cli` queries and reports changes
//! - `mutator`: runs one-shot settings changes off the UI thread

pub mod mutator;
pub mod poller;

pub use mutator::spawn_mutation;
pub use poller::{PollConfig, PollTarget, PollUpdate, PollerHandle};
