use crate::error::ArcadeError;

/// Most ticks a single [`Ticker::advance`] call reports after a long stall.
pub const MAX_CATCH_UP_TICKS: u32 = 240;

/// Fixed-interval scheduler fed with elapsed host time.
///
/// Stopping only prevents future ticks; time accumulated while stopped is
/// discarded so resuming never fires a burst of catch-up ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ticker {
    interval: f64,
    accumulator: f64,
    running: bool,
}

impl Ticker {
    pub fn new(interval_seconds: f64) -> Result<Self, ArcadeError> {
        if !interval_seconds.is_finite() || interval_seconds <= 0.0 {
            return Err(ArcadeError::InvalidInterval {
                seconds: interval_seconds,
            });
        }

        Ok(Self {
            interval: interval_seconds,
            accumulator: 0.0,
            running: true,
        })
    }

    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    /// Feeds `dt` seconds and returns how many ticks are now due, at most
    /// [`MAX_CATCH_UP_TICKS`].
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.accumulator += dt;
        let due = (self.accumulator / self.interval).floor();
        if due < 1.0 {
            return 0;
        }
        if due > f64::from(MAX_CATCH_UP_TICKS) {
            // Backlog past the cap is dropped, only the phase is kept.
            self.accumulator %= self.interval;
            return MAX_CATCH_UP_TICKS;
        }

        self.accumulator = (self.accumulator - due * self.interval).max(0.0);
        due as u32
    }
}
