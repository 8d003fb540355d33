// Interpolation primitives for motion playback

use crate::arm::ArmState;

/// Linear interpolation between `a` and `b`. The caller guarantees `t` has
/// been clamped to [0, 1].
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Quadratic ease-in-out on [0, 1]: 2t² below the midpoint, mirrored above.
/// Produces the slow-start/slow-stop profile used for point-to-point moves;
/// sequence playback stays linear.
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2. * t * t
    } else {
        let u = -2. * t + 2.;
        1. - u * u / 2.
    }
}

pub fn clamp01(t: f64) -> f64 {
    t.clamp(0., 1.)
}

/// Interpolate each axis independently; there is no joint coupling, so every
/// axis moves linearly regardless of the others.
pub fn blend(a: &ArmState, b: &ArmState, t: f64) -> ArmState {
    ArmState {
        rotate: lerp(a.rotate, b.rotate, t),
        extend: lerp(a.extend, b.extend, t),
        elevate: lerp(a.elevate, b.elevate, t),
        pinch: lerp(a.pinch, b.pinch, t),
    }
}
