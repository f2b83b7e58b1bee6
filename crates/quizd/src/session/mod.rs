//! Test-attempt sessions.
//!
//! A session binds an opaque test id to the scored question set that was
//! handed out for it, so answers can be graded without ever sending the
//! answer key to the client.

mod ids;
mod store;
mod sweeper;

pub use ids::{TEST_ID_PREFIX, TEST_ID_RANDOM_LEN, generate_test_id};
pub use store::SessionStore;
pub use sweeper::{DEFAULT_SWEEP_INTERVAL, spawn_sweeper};
