//! Quadratic curve evaluation and approximate constant-speed stepping.
//!
//! Curves are parameterized by `t` over `[0, 1]`, from `p0` (edge source) to
//! `p1` (edge target), bent towards `ctrl`.

use crate::Vec3;

/// Floor applied to the curve speed before dividing by it.
pub const SPEED_EPSILON: f32 = 1e-4;

/// Position on the curve at parameter `t`. `t` is not clamped.
///
/// `t == 0` and `t == 1` return the endpoints bit-for-bit.
pub fn point(p0: Vec3, p1: Vec3, ctrl: Vec3, t: f32) -> Vec3 {
    if t == 0.0 {
        return p0;
    }
    if t == 1.0 {
        return p1;
    }
    let u = 1.0 - t;
    p0 * (u * u) + ctrl * (2.0 * u * t) + p1 * (t * t)
}

/// Derivative of the curve with respect to `t`.
pub fn tangent(p0: Vec3, p1: Vec3, ctrl: Vec3, t: f32) -> Vec3 {
    let v1 = 2.0 * p0 - 4.0 * ctrl + 2.0 * p1;
    let v2 = -2.0 * p0 + 2.0 * ctrl;
    v1 * t + v2
}

/// Parameter increment that moves the curve point by roughly `arc_length`.
///
/// First-order estimate from the local tangent: the error grows with the step
/// size and with curvature. Suitable for animation, not for path metrics.
pub fn uniform_step(p0: Vec3, p1: Vec3, ctrl: Vec3, t: f32, arc_length: f32) -> f32 {
    uniform_step_with_epsilon(p0, p1, ctrl, t, arc_length, SPEED_EPSILON)
}

pub fn uniform_step_with_epsilon(
    p0: Vec3,
    p1: Vec3,
    ctrl: Vec3,
    t: f32,
    arc_length: f32,
    epsilon: f32,
) -> f32 {
    let speed = tangent(p0, p1, ctrl, t).length();
    arc_length / speed.max(epsilon.max(f32::MIN_POSITIVE))
}

/// Polyline length estimate using `segments` equal-parameter chords.
pub fn arc_length(p0: Vec3, p1: Vec3, ctrl: Vec3, segments: u32) -> f32 {
    let n = segments.max(1);
    let mut length = 0.0;
    let mut prev = p0;
    for i in 1..=n {
        let next = point(p0, p1, ctrl, i as f32 / n as f32);
        length += prev.distance(next);
        prev = next;
    }
    length
}

/// Points spaced roughly `spacing` apart along the curve.
///
/// Always starts with `p0` and ends with `p1`. A non-positive spacing yields
/// just the two endpoints.
pub fn uniform_samples(p0: Vec3, p1: Vec3, ctrl: Vec3, spacing: f32) -> Vec<Vec3> {
    let mut out = vec![p0];
    if spacing <= 0.0 || !spacing.is_finite() {
        out.push(p1);
        return out;
    }

    let mut t = 0.0;
    loop {
        t += uniform_step(p0, p1, ctrl, t, spacing);
        if t >= 1.0 {
            out.push(p1);
            return out;
        }
        out.push(point(p0, p1, ctrl, t));
    }
}
