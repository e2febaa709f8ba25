//! Core traits for platform-agnostic timing.
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Hardware clocks live with the platform timers
//!   (`platform::hal::EmbassyTimer` behind the `embassy` feature)

pub mod time;

pub use time::{MockTime, TimeSource};
