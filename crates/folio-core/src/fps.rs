use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Frame rate meter over one-second windows
#[derive(Debug, Clone)]
pub struct FpsMeter {
    window_start: Instant,
    frames: u32,
    fps: Option<u32>,
}

impl FpsMeter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: None,
        }
    }

    /// Count a frame; returns the new rate when a window closes
    pub fn frame(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < WINDOW {
            return None;
        }
        let fps = (f64::from(self.frames) / elapsed.as_secs_f64()).round() as u32;
        self.frames = 0;
        self.window_start = now;
        self.fps = Some(fps);
        if fps < 30 {
            tracing::debug!("Frame rate dropped to {} fps", fps);
        }
        self.fps
    }

    /// Rate measured over the last complete window
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_once_per_window() {
        let start = Instant::now();
        let mut meter = FpsMeter::new(start);
        let mut reports = Vec::new();
        for i in 1..=120u64 {
            if let Some(fps) = meter.frame(start + Duration::from_micros(i * 16_667)) {
                reports.push(fps);
            }
        }
        assert_eq!(reports, vec![60, 60]);
        assert_eq!(meter.fps(), Some(60));
    }

    #[test]
    fn test_no_rate_before_first_window() {
        let start = Instant::now();
        let mut meter = FpsMeter::new(start);
        assert_eq!(meter.frame(start + Duration::from_millis(500)), None);
        assert_eq!(meter.fps(), None);
    }
}
