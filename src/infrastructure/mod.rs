//! Infrastructure layer: latency simulation, request cancellation and
//! filesystem locations.

pub mod abort;
pub mod latency;
pub mod paths;

pub use abort::{abort_pair, AbortHandle, AbortSignal};
pub use latency::{Latency, Operation};
pub use paths::{default_data_dir, expand_tilde};
