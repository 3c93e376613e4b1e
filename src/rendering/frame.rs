use instant::Instant;

/// Weight of the newest frame interval in the smoothed rate
const SMOOTHING: f64 = 0.1;

/// Measures frame cadence for the debug overlay.
///
/// Frames carry no delta time into the scene; the clock only reports.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    frame_count: u64,
    /// Exponentially smoothed seconds per frame
    average_interval: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start of a frame
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last_frame {
            let interval = now.duration_since(last).as_secs_f64();
            self.average_interval = Some(match self.average_interval {
                Some(avg) => avg + (interval - avg) * SMOOTHING,
                None => interval,
            });
        }
        self.last_frame = Some(now);
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Smoothed frames per second, once two frames have been seen
    pub fn fps(&self) -> Option<f64> {
        self.average_interval
            .filter(|interval| *interval > 0.0)
            .map(|interval| 1.0 / interval)
    }
}
