//! Platform abstraction layer
//!
//! Seams the game loop consumes but does not implement:
//! - Input events and pressed-key snapshots
//! - Frame pacing

pub mod input;
pub mod time;

pub use input::{InputEvent, InputSource, Key, KeySet, ScriptedInput};
pub use time::{FrameClock, NoWait, SleepClock};
