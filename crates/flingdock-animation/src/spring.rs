//! Damped spring physics for a single axis.
//!
//! The step uses the analytic solution of the damped harmonic oscillator
//! rather than numeric integration, so a long frame gap never destabilises
//! the simulation: the spring lands where it would have been after `dt`
//! regardless of how many frames were skipped.

pub const STIFFNESS_HIGH: f32 = 10_000.0;
pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
pub const STIFFNESS_LOW: f32 = 200.0;
pub const STIFFNESS_VERY_LOW: f32 = 50.0;

pub const DAMPING_RATIO_HIGH_BOUNCY: f32 = 0.2;
pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

/// Smallest change of a pixel-valued property worth rendering.
pub const MIN_VISIBLE_CHANGE_PIXELS: f32 = 1.0;

const THRESHOLD_MULTIPLIER: f32 = 0.75;
/// Velocity threshold is the value threshold scaled to one 16ms frame.
const VELOCITY_THRESHOLD_MULTIPLIER: f32 = 1000.0 / 16.0;

/// Spring stiffness and damping ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Stiffness constant. Higher values settle faster.
    pub stiffness: f32,
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
}

impl SpringSpec {
    pub const fn new(stiffness: f32, damping_ratio: f32) -> Self {
        Self {
            stiffness,
            damping_ratio,
        }
    }

    /// Stiff and bounce-free, for tracking a finger.
    pub const fn follow() -> Self {
        Self::new(STIFFNESS_HIGH, DAMPING_RATIO_NO_BOUNCY)
    }

    /// Soft and slightly bouncy, for settling after release.
    pub const fn settle() -> Self {
        Self::new(150.0, 0.6)
    }

    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness as f64).sqrt()
    }

    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.stiffness > 0.0
            && self.damping_ratio.is_finite()
            && self.damping_ratio >= 0.0
    }

    /// Advances `(value, velocity)` by `delta_ms` toward `final_value`.
    fn advance(&self, value: f32, velocity: f32, final_value: f32, delta_ms: f64) -> (f32, f32) {
        let ratio = self.damping_ratio as f64;
        let natural = self.natural_frequency();
        let dt = delta_ms / 1000.0;
        let last_displacement = (value - final_value) as f64;
        let last_velocity = velocity as f64;

        let (displacement, current_velocity) = if ratio > 1.0 {
            let root = (ratio * ratio - 1.0).sqrt();
            let gamma_plus = -ratio * natural + natural * root;
            let gamma_minus = -ratio * natural - natural * root;
            let coeff_b =
                (gamma_minus * last_displacement - last_velocity) / (gamma_minus - gamma_plus);
            let coeff_a = last_displacement - coeff_b;
            let decay_minus = (gamma_minus * dt).exp();
            let decay_plus = (gamma_plus * dt).exp();
            (
                coeff_a * decay_minus + coeff_b * decay_plus,
                coeff_a * gamma_minus * decay_minus + coeff_b * gamma_plus * decay_plus,
            )
        } else if ratio == 1.0 {
            let coeff_a = last_displacement;
            let coeff_b = last_velocity + natural * last_displacement;
            let decay = (-natural * dt).exp();
            (
                (coeff_a + coeff_b * dt) * decay,
                (coeff_a + coeff_b * dt) * decay * -natural + coeff_b * decay,
            )
        } else {
            let damped = natural * (1.0 - ratio * ratio).sqrt();
            let cos_coeff = last_displacement;
            let sin_coeff = (ratio * natural * last_displacement + last_velocity) / damped;
            let decay = (-ratio * natural * dt).exp();
            let (sin, cos) = (damped * dt).sin_cos();
            let displacement = decay * (cos_coeff * cos + sin_coeff * sin);
            (
                displacement,
                displacement * -natural * ratio
                    + decay * (-damped * cos_coeff * sin + damped * sin_coeff * cos),
            )
        };

        (
            (displacement + final_value as f64) as f32,
            current_velocity as f32,
        )
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(STIFFNESS_MEDIUM, DAMPING_RATIO_MEDIUM_BOUNCY)
    }
}

/// Value produced by one [`AxisSpring::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringFrame {
    pub value: f32,
    /// The spring reached equilibrium on this frame and stopped.
    pub finished: bool,
}

/// One axis of a spring animation.
///
/// The owner feeds it frame timestamps; it never touches the animated
/// property itself. The first frame after a start only records the
/// timestamp and re-emits the start value.
#[derive(Debug, Clone)]
pub struct AxisSpring {
    value: f32,
    final_value: f32,
    velocity: f32,
    spec: SpringSpec,
    min_value: f32,
    max_value: f32,
    running: bool,
    last_frame_nanos: Option<u64>,
    value_threshold: f32,
}

impl AxisSpring {
    pub fn new(spec: SpringSpec) -> Self {
        Self {
            value: 0.0,
            final_value: 0.0,
            velocity: 0.0,
            spec,
            min_value: f32::MIN,
            max_value: f32::MAX,
            running: false,
            last_frame_nanos: None,
            value_threshold: MIN_VISIBLE_CHANGE_PIXELS * THRESHOLD_MULTIPLIER,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn final_value(&self) -> f32 {
        self.final_value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn spec(&self) -> SpringSpec {
        self.spec
    }

    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Swaps stiffness and damping. Position and velocity carry over, so a
    /// running spring changes character without a jump.
    pub fn set_spec(&mut self, spec: SpringSpec) {
        self.spec = spec;
    }

    /// Bounds applied to every emitted value and to the final position.
    pub fn set_bounds(&mut self, min_value: f32, max_value: f32) {
        self.min_value = min_value;
        self.max_value = max_value.max(min_value);
    }

    /// Retargets the spring. A stopped spring starts from `current_value`
    /// with zero velocity; a running one keeps its momentum.
    pub fn animate_to_final_position(&mut self, final_value: f32, current_value: f32) {
        self.final_value = final_value.clamp(self.min_value, self.max_value);
        if !self.running {
            self.value = current_value;
            self.velocity = 0.0;
            self.last_frame_nanos = None;
            self.running = true;
        }
    }

    /// Stops the spring where it is. Returns whether it was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.last_frame_nanos = None;
        was_running
    }

    /// Stops the spring and parks it at `value`.
    pub fn reset(&mut self, value: f32) {
        self.cancel();
        self.value = value;
        self.final_value = value;
        self.velocity = 0.0;
    }

    /// Advances to `frame_time_nanos`. Returns `None` when stopped.
    pub fn step(&mut self, frame_time_nanos: u64) -> Option<SpringFrame> {
        if !self.running {
            return None;
        }

        let Some(last) = self.last_frame_nanos.replace(frame_time_nanos) else {
            return Some(SpringFrame {
                value: self.value,
                finished: false,
            });
        };

        let delta_ms = frame_time_nanos.saturating_sub(last) as f64 / 1_000_000.0;
        let (value, velocity) =
            self.spec
                .advance(self.value, self.velocity, self.final_value, delta_ms);
        self.value = value;
        self.velocity = velocity;

        let finished = self.is_at_equilibrium();
        if finished {
            self.value = self.final_value;
            self.velocity = 0.0;
        }
        self.value = self.value.clamp(self.min_value, self.max_value);
        if finished {
            self.running = false;
            self.last_frame_nanos = None;
        }

        Some(SpringFrame {
            value: self.value,
            finished,
        })
    }

    fn is_at_equilibrium(&self) -> bool {
        self.velocity.abs() < self.value_threshold * VELOCITY_THRESHOLD_MULTIPLIER
            && (self.value - self.final_value).abs() < self.value_threshold
    }
}

#[cfg(test)]
#[path = "tests/spring_tests.rs"]
mod tests;
