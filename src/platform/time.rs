//! Frame pacing

use std::time::{Duration, Instant};

/// Holds the loop to a fixed timestep
pub trait FrameClock {
    /// Block until `dt` seconds have passed since the previous frame
    fn wait(&mut self, dt: f32);
}

/// Wall-clock pacing with `thread::sleep`
#[derive(Debug, Default)]
pub struct SleepClock {
    last: Option<Instant>,
}

impl SleepClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for SleepClock {
    fn wait(&mut self, dt: f32) {
        let frame = Duration::from_secs_f32(dt);
        let now = Instant::now();
        if let Some(last) = self.last {
            let elapsed = now.duration_since(last);
            if elapsed < frame {
                std::thread::sleep(frame - elapsed);
            } else {
                log::trace!("Frame overran budget by {:?}", elapsed - frame);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// No pacing; headless runs and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWait;

impl FrameClock for NoWait {
    fn wait(&mut self, _dt: f32) {}
}
