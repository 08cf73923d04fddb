/// Lowest speed multiplier the UI can select.
pub const MIN_SPEED: f64 = 0.1;
/// Highest speed multiplier the UI can select.
pub const MAX_SPEED: f64 = 50.0;

/// Simulation parameters the UI controls and the frame reads.
///
/// Owned by the session and passed explicitly to the stepper and the render
/// pass. Both setters are idempotent and take effect on the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationState {
    speed_multiplier: f64,
    orbit_lines_visible: bool,
    speed_range: (f64, f64),
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            orbit_lines_visible: true,
            speed_range: (MIN_SPEED, MAX_SPEED),
        }
    }
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom clamp range. An inverted or non-finite range is ignored.
    pub fn with_speed_range(mut self, min: f64, max: f64) -> Self {
        if min.is_finite() && max.is_finite() && min <= max {
            self.speed_range = (min, max);
            self.speed_multiplier = self.speed_multiplier.clamp(min, max);
        } else {
            log::warn!("ignoring invalid speed range {min}..{max}");
        }
        self
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn speed_range(&self) -> (f64, f64) {
        self.speed_range
    }

    /// Set the speed multiplier, clamped silently into the allowed range.
    /// Non-finite values are dropped.
    pub fn set_speed_multiplier(&mut self, value: f64) {
        if !value.is_finite() {
            log::warn!("ignoring non-finite speed multiplier {value}");
            return;
        }
        let (min, max) = self.speed_range;
        let clamped = value.clamp(min, max);
        if clamped != value {
            log::debug!("speed multiplier {value} clamped to {clamped}");
        }
        self.speed_multiplier = clamped;
    }

    pub fn orbit_lines_visible(&self) -> bool {
        self.orbit_lines_visible
    }

    pub fn set_orbit_lines_visible(&mut self, visible: bool) {
        self.orbit_lines_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let state = PresentationState::default();
        assert_eq!(state.speed_multiplier(), 1.0);
        assert!(state.orbit_lines_visible());
    }

    #[test]
    fn speed_is_clamped_silently() {
        let mut state = PresentationState::default();
        state.set_speed_multiplier(0.01);
        assert_eq!(state.speed_multiplier(), MIN_SPEED);
        state.set_speed_multiplier(500.0);
        assert_eq!(state.speed_multiplier(), MAX_SPEED);
        state.set_speed_multiplier(12.5);
        assert_eq!(state.speed_multiplier(), 12.5);
    }

    #[test]
    fn non_finite_speed_is_ignored() {
        let mut state = PresentationState::default();
        state.set_speed_multiplier(3.0);
        state.set_speed_multiplier(f64::NAN);
        assert_eq!(state.speed_multiplier(), 3.0);
    }

    #[test]
    fn setters_are_idempotent() {
        let mut state = PresentationState::default();
        state.set_orbit_lines_visible(false);
        let once = state.clone();
        state.set_orbit_lines_visible(false);
        assert_eq!(state, once);
        state.set_speed_multiplier(7.0);
        let once = state.clone();
        state.set_speed_multiplier(7.0);
        assert_eq!(state, once);
    }

    #[test]
    fn custom_range_reclamps_current_speed() {
        let state = PresentationState::default().with_speed_range(2.0, 4.0);
        assert_eq!(state.speed_multiplier(), 2.0);
        let state = PresentationState::default().with_speed_range(4.0, 2.0);
        assert_eq!(state.speed_range(), (MIN_SPEED, MAX_SPEED));
    }
}
