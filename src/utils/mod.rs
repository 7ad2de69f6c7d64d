pub mod batch_poller;
pub mod subscriber;

pub use batch_poller::{wait_for_batch, PollConfig};
pub use subscriber::subscriber_hash;
