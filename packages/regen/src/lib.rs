//! # Style Trend Regeneration
//!
//! Simulated "regenerate image" action for image wrappers on the page.
//!
//! Each wrapper (button + overlay + image) is a small state machine:
//!
//! ```text
//!            click                       fallback timer
//!   Idle ───────────▶ Loading ─┬─────────────────────────▶ Idle
//!                              │  image load (after swap)
//!                              └─────────────────────────▶ Idle
//! ```
//!
//! Time is virtual: the host reports "now" in milliseconds and the
//! simulator runs every timer that has come due. The `async` feature adds a
//! tokio driver that sleeps between deadlines.

mod clock;
mod errors;
mod options;
mod simulator;
mod timers;

#[cfg(feature = "async")]
pub mod runtime;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::RegenError;
pub use options::RegenOptions;
pub use simulator::{cache_busted, RegenGroup, RegenState, RegenerationSimulator};
pub use timers::{TimerId, TimerQueue};
