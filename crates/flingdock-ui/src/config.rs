//! Listener configuration and its validation.

use std::fmt;

use flingdock_animation::SpringSpec;
use flingdock_foundation::ViewConfiguration;

/// Press-to-release time above which a tap becomes a long click.
pub const DEFAULT_TAP_TIMEOUT_MS: i64 = 1_000;

/// Distance from a resting spot within which a release still counts as a
/// click.
pub const DEFAULT_CLICK_TOLERANCE: f32 = 8.0;

pub const DEFAULT_LOST_VELOCITY_PERCENT: u32 = 90;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    LostVelocityPercent(u32),
    InvalidStiffness { spring: &'static str, stiffness: f32 },
    InvalidDampingRatio { spring: &'static str, damping_ratio: f32 },
    NegativeTouchSlop(f32),
    NegativeClickTolerance(f32),
    InvalidFlingVelocity { min: f32, max: f32 },
    ZeroDuration,
    InvalidRealScale(f32),
    NegativeScaleDelta { name: &'static str, delta: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LostVelocityPercent(percent) => {
                write!(f, "lost velocity percent {percent} exceeds 100")
            }
            ConfigError::InvalidStiffness { spring, stiffness } => {
                write!(f, "{spring} spring stiffness {stiffness} must be positive and finite")
            }
            ConfigError::InvalidDampingRatio {
                spring,
                damping_ratio,
            } => write!(
                f,
                "{spring} spring damping ratio {damping_ratio} must be non-negative and finite"
            ),
            ConfigError::NegativeTouchSlop(slop) => write!(f, "touch slop {slop} is negative"),
            ConfigError::NegativeClickTolerance(tolerance) => {
                write!(f, "click tolerance {tolerance} is negative")
            }
            ConfigError::InvalidFlingVelocity { min, max } => {
                write!(f, "fling velocity range {min}..{max} is invalid")
            }
            ConfigError::ZeroDuration => write!(f, "tween duration must be non-zero"),
            ConfigError::InvalidRealScale(scale) => {
                write!(f, "real scale {scale} must be positive and finite")
            }
            ConfigError::NegativeScaleDelta { name, delta } => {
                write!(f, "{name} scale delta {delta} is negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn check_spring(spring: &'static str, spec: &SpringSpec) -> Result<(), ConfigError> {
    if !(spec.stiffness.is_finite() && spec.stiffness > 0.0) {
        return Err(ConfigError::InvalidStiffness {
            spring,
            stiffness: spec.stiffness,
        });
    }
    if !(spec.damping_ratio.is_finite() && spec.damping_ratio >= 0.0) {
        return Err(ConfigError::InvalidDampingRatio {
            spring,
            damping_ratio: spec.damping_ratio,
        });
    }
    Ok(())
}

fn check_view_configuration(configuration: &ViewConfiguration) -> Result<(), ConfigError> {
    // NaN fails every comparison, so test for the valid range.
    if !(configuration.touch_slop >= 0.0) {
        return Err(ConfigError::NegativeTouchSlop(configuration.touch_slop));
    }
    let min = configuration.min_fling_velocity;
    let max = configuration.max_fling_velocity;
    if !(min >= 0.0 && max >= min) {
        return Err(ConfigError::InvalidFlingVelocity { min, max });
    }
    Ok(())
}

/// Settings for the drag-and-dock listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Spring used while the pointer is down.
    pub follow_spring: SpringSpec,
    /// Springs used after release, per axis.
    pub settle_spring_x: SpringSpec,
    pub settle_spring_y: SpringSpec,
    /// Share of the release velocity thrown away before predicting where
    /// the element is heading. 90 keeps a tenth.
    pub lost_velocity_percent: u32,
    pub tap_timeout_ms: i64,
    pub click_tolerance: f32,
    /// When false, the element's origin is clamped into the move area while
    /// dragging.
    pub can_move_outside_area: bool,
    /// Treat every un-dragged release as a click, wherever the element is.
    pub moving_can_click: bool,
    pub view_configuration: ViewConfiguration,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            follow_spring: SpringSpec::follow(),
            settle_spring_x: SpringSpec::settle(),
            settle_spring_y: SpringSpec::settle(),
            lost_velocity_percent: DEFAULT_LOST_VELOCITY_PERCENT,
            tap_timeout_ms: DEFAULT_TAP_TIMEOUT_MS,
            click_tolerance: DEFAULT_CLICK_TOLERANCE,
            can_move_outside_area: true,
            moving_can_click: false,
            view_configuration: ViewConfiguration::default(),
        }
    }
}

impl DragConfig {
    pub fn with_follow_spring(mut self, spec: SpringSpec) -> Self {
        self.follow_spring = spec;
        self
    }

    /// Sets the same settle spring on both axes.
    pub fn with_settle_spring(mut self, spec: SpringSpec) -> Self {
        self.settle_spring_x = spec;
        self.settle_spring_y = spec;
        self
    }

    pub fn with_settle_springs(mut self, x: SpringSpec, y: SpringSpec) -> Self {
        self.settle_spring_x = x;
        self.settle_spring_y = y;
        self
    }

    pub fn with_lost_velocity_percent(mut self, percent: u32) -> Self {
        self.lost_velocity_percent = percent;
        self
    }

    pub fn with_tap_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.tap_timeout_ms = timeout_ms;
        self
    }

    pub fn with_click_tolerance(mut self, tolerance: f32) -> Self {
        self.click_tolerance = tolerance;
        self
    }

    pub fn with_can_move_outside_area(mut self, can_move_outside_area: bool) -> Self {
        self.can_move_outside_area = can_move_outside_area;
        self
    }

    pub fn with_moving_can_click(mut self, moving_can_click: bool) -> Self {
        self.moving_can_click = moving_can_click;
        self
    }

    pub fn with_view_configuration(mut self, configuration: ViewConfiguration) -> Self {
        self.view_configuration = configuration;
        self
    }

    /// Fraction of the release velocity used for the prediction.
    pub fn retained_velocity_fraction(&self) -> f32 {
        (100 - self.lost_velocity_percent.min(100)) as f32 / 100.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lost_velocity_percent > 100 {
            return Err(ConfigError::LostVelocityPercent(self.lost_velocity_percent));
        }
        check_spring("follow", &self.follow_spring)?;
        check_spring("settle x", &self.settle_spring_x)?;
        check_spring("settle y", &self.settle_spring_y)?;
        if !(self.click_tolerance >= 0.0) {
            return Err(ConfigError::NegativeClickTolerance(self.click_tolerance));
        }
        check_view_configuration(&self.view_configuration)
    }
}

/// Direction of the press pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScaleType {
    Grow,
    #[default]
    Shrink,
}

impl ScaleType {
    pub fn sign(self) -> f32 {
        match self {
            ScaleType::Grow => 1.0,
            ScaleType::Shrink => -1.0,
        }
    }
}

/// Settings for [`ScalePulseHandler`](crate::ScalePulseHandler).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePulseConfig {
    pub scale_type: ScaleType,
    /// Scale at rest.
    pub real_scale: f32,
    /// Scale change while pressed.
    pub press_delta: f32,
    /// Extra kick added to the release tween after a click.
    pub release_delta: f32,
    pub duration_ms: u64,
    pub tap_timeout_ms: i64,
    /// How far outside the element the pointer may wander before the press
    /// is released.
    pub release_offset_x: f32,
    pub release_offset_y: f32,
    pub view_configuration: ViewConfiguration,
}

impl Default for ScalePulseConfig {
    fn default() -> Self {
        Self {
            scale_type: ScaleType::Shrink,
            real_scale: 1.0,
            press_delta: 0.25,
            release_delta: 0.2,
            duration_ms: 250,
            tap_timeout_ms: DEFAULT_TAP_TIMEOUT_MS,
            release_offset_x: 0.0,
            release_offset_y: 0.0,
            view_configuration: ViewConfiguration::default(),
        }
    }
}

impl ScalePulseConfig {
    pub fn with_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = scale_type;
        self
    }

    pub fn with_real_scale(mut self, scale: f32) -> Self {
        self.real_scale = scale;
        self
    }

    pub fn with_press_delta(mut self, delta: f32) -> Self {
        self.press_delta = delta;
        self
    }

    pub fn with_release_delta(mut self, delta: f32) -> Self {
        self.release_delta = delta;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_tap_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.tap_timeout_ms = timeout_ms;
        self
    }

    pub fn with_release_offset(mut self, x: f32, y: f32) -> Self {
        self.release_offset_x = x;
        self.release_offset_y = y;
        self
    }

    pub fn with_view_configuration(mut self, configuration: ViewConfiguration) -> Self {
        self.view_configuration = configuration;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.real_scale.is_finite() && self.real_scale > 0.0) {
            return Err(ConfigError::InvalidRealScale(self.real_scale));
        }
        if !(self.press_delta >= 0.0) {
            return Err(ConfigError::NegativeScaleDelta {
                name: "press",
                delta: self.press_delta,
            });
        }
        if !(self.release_delta >= 0.0) {
            return Err(ConfigError::NegativeScaleDelta {
                name: "release",
                delta: self.release_delta,
            });
        }
        if self.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        check_view_configuration(&self.view_configuration)
    }
}
