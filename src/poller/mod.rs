//! Interval polling of async producers with cooperative cancellation.

pub mod keyed;
pub mod live;
pub mod state;
pub mod task;

pub use keyed::KeyedPollers;
pub use live::{LivePoller, Producer};
pub use state::{PollError, PollMsg, Snapshot, update};
pub use task::ScheduledTask;
