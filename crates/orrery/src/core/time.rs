/// Default cap on a single frame's elapsed time, in seconds.
pub const DEFAULT_MAX_FRAME_DT: f64 = 0.1;

/// Turns host frame timing into a safe per-frame delta.
///
/// Hosts either pass their own delta through [`FrameClock::clamp`] or hand over
/// monotonic timestamps with [`FrameClock::tick_at`] and let the clock track
/// the difference. Either way the delta is capped so a resume after a
/// suspended tab doesn't jump the simulation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_dt: f64,
    last: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        let max_dt = if max_dt.is_finite() && max_dt > 0.0 {
            max_dt
        } else {
            DEFAULT_MAX_FRAME_DT
        };
        Self { max_dt, last: None }
    }

    /// Clamp a delta into `[0, max_dt]`. Non-finite deltas become 0.
    pub fn clamp(&self, dt: f64) -> f64 {
        if !dt.is_finite() {
            return 0.0;
        }
        dt.clamp(0.0, self.max_dt)
    }

    /// Delta since the previous timestamp, clamped. The first call returns 0.
    pub fn tick_at(&mut self, now_seconds: f64) -> f64 {
        if !now_seconds.is_finite() {
            return 0.0;
        }
        let dt = self.last.map_or(0.0, |last| now_seconds - last);
        self.last = Some(now_seconds);
        self.clamp(dt)
    }

    /// Forget the last timestamp, e.g. when the host loop restarts.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick_at(12.0), 0.0);
        assert!((clock.tick_at(12.016) - 0.016).abs() < 1e-12);
    }

    #[test]
    fn caps_long_frames() {
        let mut clock = FrameClock::new(0.1);
        clock.tick_at(0.0);
        // Tab was suspended for a minute.
        assert_eq!(clock.tick_at(60.0), 0.1);
    }

    #[test]
    fn backwards_and_nan_deltas_are_zero() {
        let clock = FrameClock::default();
        assert_eq!(clock.clamp(-1.0), 0.0);
        assert_eq!(clock.clamp(f64::NAN), 0.0);
        assert_eq!(clock.clamp(f64::INFINITY), 0.0);
    }

    #[test]
    fn reset_forgets_last_timestamp() {
        let mut clock = FrameClock::default();
        clock.tick_at(1.0);
        clock.reset();
        assert_eq!(clock.tick_at(5.0), 0.0);
    }

    #[test]
    fn invalid_cap_falls_back_to_default() {
        assert_eq!(FrameClock::new(-2.0).max_dt(), DEFAULT_MAX_FRAME_DT);
    }
}
