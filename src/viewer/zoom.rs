use crate::config::ZoomConfig;

/// Zoom in integer percent so repeated steps never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(u16);

impl ZoomLevel {
    pub fn from_percent(percent: u16) -> Self {
        Self(percent.max(1))
    }

    pub fn percent(self) -> u16 {
        self.0
    }

    pub fn scale(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomPolicy {
    min: ZoomLevel,
    max: ZoomLevel,
    step: u16,
    compact_default: ZoomLevel,
    wide_default: ZoomLevel,
    compact_breakpoint_px: u32,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self::from_config(&ZoomConfig::default())
    }
}

impl ZoomPolicy {
    pub fn from_config(config: &ZoomConfig) -> Self {
        Self {
            min: ZoomLevel::from_percent(config.min_percent),
            max: ZoomLevel::from_percent(config.max_percent.max(config.min_percent)),
            step: config.step_percent.max(1),
            compact_default: ZoomLevel::from_percent(config.compact_default_percent),
            wide_default: ZoomLevel::from_percent(config.wide_default_percent),
            compact_breakpoint_px: config.compact_breakpoint_px,
        }
    }

    /// `None` when already at or above the maximum.
    pub fn zoom_in(&self, current: ZoomLevel) -> Option<ZoomLevel> {
        if current >= self.max {
            return None;
        }
        let next = current.0.saturating_add(self.step).min(self.max.0);
        Some(ZoomLevel(next))
    }

    /// `None` when already at or below the minimum.
    pub fn zoom_out(&self, current: ZoomLevel) -> Option<ZoomLevel> {
        if current <= self.min {
            return None;
        }
        let next = current.0.saturating_sub(self.step).max(self.min.0);
        Some(ZoomLevel(next))
    }

    pub fn default_for_width(&self, width_px: u32) -> ZoomLevel {
        if width_px < self.compact_breakpoint_px {
            self.compact_default
        } else {
            self.wide_default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoomLevel, ZoomPolicy};
    use crate::config::ZoomConfig;

    #[test]
    fn zoom_steps_by_ten_percent_within_bounds() {
        let policy = ZoomPolicy::default();
        let start = ZoomLevel::from_percent(150);

        let zoomed = policy.zoom_in(start).expect("150% can grow");
        assert_eq!(zoomed.percent(), 160);
        assert!((zoomed.scale() - 1.6).abs() < f32::EPSILON);

        let shrunk = policy.zoom_out(start).expect("150% can shrink");
        assert_eq!(shrunk.percent(), 140);
    }

    #[test]
    fn zoom_refuses_past_the_limits() {
        let policy = ZoomPolicy::default();
        assert_eq!(policy.zoom_in(ZoomLevel::from_percent(200)), None);
        assert_eq!(policy.zoom_out(ZoomLevel::from_percent(50)), None);

        let mut level = ZoomLevel::from_percent(120);
        let mut steps = 0;
        while let Some(next) = policy.zoom_in(level) {
            level = next;
            steps += 1;
        }
        assert_eq!(level.percent(), 200);
        assert_eq!(steps, 8);
    }

    #[test]
    fn off_grid_levels_clamp_to_the_limit() {
        let policy = ZoomPolicy::from_config(&ZoomConfig {
            step_percent: 30,
            ..ZoomConfig::default()
        });
        assert_eq!(
            policy.zoom_in(ZoomLevel::from_percent(190)),
            Some(ZoomLevel::from_percent(200))
        );
        assert_eq!(
            policy.zoom_out(ZoomLevel::from_percent(60)),
            Some(ZoomLevel::from_percent(50))
        );
    }

    #[test]
    fn default_zoom_depends_on_width_breakpoint() {
        let policy = ZoomPolicy::default();
        assert_eq!(policy.default_for_width(640).percent(), 120);
        assert_eq!(policy.default_for_width(767).percent(), 120);
        assert_eq!(policy.default_for_width(768).percent(), 150);
        assert_eq!(policy.default_for_width(1920).percent(), 150);
    }
}
