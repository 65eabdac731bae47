/// Easing curves applied to a linear fraction in `[0, 1]`.
///
/// The bezier variants mirror the Material curves. The overshoot family
/// follows the classic Android interpolators; their output leaves `[0, 1]`
/// on purpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Ease in using cubic curve.
    EaseIn,
    /// Ease out using cubic curve.
    EaseOut,
    /// Ease in and out using cubic curve.
    EaseInOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// Linear out, slow in (material design).
    LinearOutSlowInEasing,
    /// Fast out, linear in (material design).
    FastOutLinearEasing,
    /// Cosine ramp: slow start and end, fastest through the middle.
    AccelerateDecelerate,
    /// Runs past the end value and settles back.
    Overshoot { tension: f32 },
    /// Backs up first, then overshoots the end value and settles back.
    AnticipateOvershoot { tension: f32 },
}

impl Easing {
    pub const DEFAULT_OVERSHOOT_TENSION: f32 = 2.0;
    /// Anticipate-overshoot scales its base tension of 2 by 1.5.
    pub const DEFAULT_ANTICIPATE_OVERSHOOT_TENSION: f32 = 3.0;

    pub fn overshoot() -> Self {
        Easing::Overshoot {
            tension: Self::DEFAULT_OVERSHOOT_TENSION,
        }
    }

    pub fn anticipate_overshoot() -> Self {
        Easing::AnticipateOvershoot {
            tension: Self::DEFAULT_ANTICIPATE_OVERSHOOT_TENSION,
        }
    }

    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearEasing => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
            Easing::AccelerateDecelerate => {
                ((fraction + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
            }
            Easing::Overshoot { tension } => {
                let t = fraction - 1.0;
                t * t * ((tension + 1.0) * t + tension) + 1.0
            }
            Easing::AnticipateOvershoot { tension } => {
                if fraction < 0.5 {
                    0.5 * anticipate(fraction * 2.0, *tension)
                } else {
                    0.5 * (overshoot(fraction * 2.0 - 2.0, *tension) + 2.0)
                }
            }
        }
    }
}

fn anticipate(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t - tension)
}

fn overshoot(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t + tension)
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric t matching the x fraction.
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        // Fall back to a binary subdivision if Newton-Raphson did not converge.
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        let curves = [
            Easing::LinearEasing,
            Easing::EaseInOut,
            Easing::FastOutSlowInEasing,
            Easing::AccelerateDecelerate,
            Easing::overshoot(),
            Easing::anticipate_overshoot(),
        ];
        for curve in curves {
            assert!(curve.transform(0.0).abs() < EPS, "{curve:?} at 0");
            assert!((curve.transform(1.0) - 1.0).abs() < EPS, "{curve:?} at 1");
        }
    }

    #[test]
    fn accelerate_decelerate_is_symmetric() {
        let curve = Easing::AccelerateDecelerate;
        assert!((curve.transform(0.5) - 0.5).abs() < EPS);
        assert!((curve.transform(0.25) + curve.transform(0.75) - 1.0).abs() < EPS);
    }

    #[test]
    fn overshoot_passes_the_end_value() {
        let curve = Easing::overshoot();
        let peak = (1..100)
            .map(|i| curve.transform(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "peak {peak}");
    }

    #[test]
    fn anticipate_overshoot_dips_below_start_then_overshoots() {
        let curve = Easing::anticipate_overshoot();
        let samples: Vec<f32> = (1..100).map(|i| curve.transform(i as f32 / 100.0)).collect();
        assert!(samples.iter().any(|value| *value < 0.0));
        assert!(samples.iter().any(|value| *value > 1.0));
    }
}
