// State model for the four arm axes

use serde::{Deserialize, Serialize};

/// One of the four independently controlled degrees of freedom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Rotate,
    Extend,
    Elevate,
    Pinch,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Rotate, Axis::Extend, Axis::Elevate, Axis::Pinch];

    /// Closed range the axis value is clamped to.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Axis::Rotate => (-180., 180.),
            Axis::Extend => (0., 100.),
            Axis::Elevate => (-90., 90.),
            Axis::Pinch => (0., 100.),
        }
    }

    /// Increment applied by a single button press or key stroke.
    pub fn step(&self) -> f64 {
        match self {
            Axis::Rotate | Axis::Elevate => 10.,
            Axis::Extend | Axis::Pinch => 5.,
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

/// Full pose of the arm. The single source of truth consumed by rendering
/// and backend sync; every mutator clamps, so each field is always within
/// its axis range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmState {
    /// Base rotation in degrees, -180 to 180
    pub rotate: f64,
    /// Arm extension in percent, 0 to 100
    pub extend: f64,
    /// Arm elevation in degrees, -90 to 90
    pub elevate: f64,
    /// Gripper pinch in percent, 0 to 100
    pub pinch: f64,
}

impl Default for ArmState {
    fn default() -> Self {
        Self {
            rotate: 0.,
            extend: 0.,
            elevate: 0.,
            pinch: 0.,
        }
    }
}

impl ArmState {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Rotate => self.rotate,
            Axis::Extend => self.extend,
            Axis::Elevate => self.elevate,
            Axis::Pinch => self.pinch,
        }
    }

    /// Set an axis to an absolute value. Out-of-range input is silently
    /// clamped, never rejected.
    pub fn set(&mut self, axis: Axis, value: f64) {
        let clamped = axis.clamp(value);
        match axis {
            Axis::Rotate => self.rotate = clamped,
            Axis::Extend => self.extend = clamped,
            Axis::Elevate => self.elevate = clamped,
            Axis::Pinch => self.pinch = clamped,
        }
    }

    /// Nudge an axis by its fixed step. `direction` is -1 or +1.
    pub fn adjust(&mut self, axis: Axis, direction: i32) {
        let value = self.get(axis) + f64::from(direction) * axis.step();
        self.set(axis, value);
    }

    /// Return every axis to the home position.
    pub fn reset(&mut self) {
        *self = ArmState::default();
    }
}
