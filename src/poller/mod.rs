//! Polling: loop, state, checkpoint policies and the clock it reads.

pub mod clock;
pub mod poll_loop;
pub mod shutdown;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use poll_loop::{CycleOutcome, DEFAULT_POLL_INTERVAL, PollLoop, PollLoopConfig};
pub use shutdown::shutdown_on;
pub use state::{ErrorCheckpoint, LoopState, SuccessCheckpoint};
