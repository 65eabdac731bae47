//! Release-velocity estimation.
//!
//! Each axis runs the impulse strategy: the samples inside the horizon are
//! treated as impulses imparted on a unit mass, and the velocity is the one
//! matching the accumulated kinetic energy. It reacts to the last few
//! samples much more than a least-squares fit does, which is what a fling
//! should feel like.

use flingdock_ui_graphics::Point;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between two samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    value: f32,
}

/// Velocity along one axis, from absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, value: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, value });
    }

    /// Velocity in units per second. Zero with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let mut values = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut cursor = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[cursor] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (sample.time_ms - previous.time_ms).abs() as f32;
            previous = sample;

            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }

            values[count] = sample.value;
            times[count] = -age;
            cursor = if cursor == 0 {
                HISTORY_SIZE - 1
            } else {
                cursor - 1
            };

            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&values, &times, count) * 1000.0
    }

    /// Like [`calculate_velocity`](Self::calculate_velocity), clamped to
    /// `[-max_velocity, max_velocity]`. A non-positive or non-finite limit
    /// yields zero.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }

        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }

        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

fn impulse_velocity(values: &[f32; HISTORY_SIZE], times: &[f32; HISTORY_SIZE], count: usize) -> f32 {
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let v_curr = (values[i] - values[i - 1]) / (current_time - next_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Release velocity in units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scales both components by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Zeroes every component whose magnitude is below `min`.
    pub fn with_min_magnitude(self, min: f32) -> Self {
        let gate = |v: f32| if v.abs() < min { 0.0 } else { v };
        Self::new(gate(self.x), gate(self.y))
    }

    pub fn as_offset(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Two independent [`VelocityTracker1D`]s fed from the same pointer.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
    samples: usize,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, x: f32, y: f32, time_ms: i64) {
        self.x.add_data_point(time_ms, x);
        self.y.add_data_point(time_ms, y);
        self.samples += 1;
    }

    /// Number of samples added since the last reset.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn compute_velocity(&self, max_velocity: f32) -> Velocity {
        Velocity::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.samples = 0;
    }
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
