//! Frame-rate estimate fed by the frame driver.
//!
//! The engine itself runs on sim ticks; this only reports how often the
//! driver is actually calling it, for the HUD.

use rampart_core::constants::FPS_WINDOW_MS;

#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    window_start_ms: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsMeter {
    /// Record a frame at a monotonic timestamp (milliseconds).
    /// The estimate refreshes once per `FPS_WINDOW_MS`.
    pub fn observe(&mut self, timestamp_ms: f64) {
        let Some(start) = self.window_start_ms else {
            self.window_start_ms = Some(timestamp_ms);
            return;
        };

        self.frames += 1;
        let elapsed = timestamp_ms - start;
        if elapsed >= FPS_WINDOW_MS {
            self.fps = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
            self.window_start_ms = Some(timestamp_ms);
            self.frames = 0;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
