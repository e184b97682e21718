//! Twist value type.

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use cgmath::{Quaternion, Rad, Rotation3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cube::max_layer_count;
use super::face::{Face, Sign};

/// Rotation direction about a face's axis, following the mathematical
/// convention: counterclockwise is positive when looking down the axis from
/// its positive end.
///
/// Keyboard input maps lowercase face keys to [`TwistDirection::Ccw`]; the
/// drag adapter converts a visual direction to an axis direction by negating
/// on negative faces.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TwistDirection {
    /// Counterclockwise (positive angle).
    #[default]
    Ccw,
    /// Clockwise (negative angle).
    Cw,
}

impl TwistDirection {
    /// Returns the reverse direction.
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Self::Ccw => Self::Cw,
            Self::Cw => Self::Ccw,
        }
    }
    /// Returns the sign of the rotation angle.
    pub fn sign(self) -> Sign {
        match self {
            Self::Ccw => Sign::Pos,
            Self::Cw => Sign::Neg,
        }
    }
}

impl fmt::Display for TwistDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwistDirection::Ccw => Ok(()),
            TwistDirection::Cw => write!(f, "'"),
        }
    }
}

impl std::ops::Mul<Sign> for TwistDirection {
    type Output = Self;

    fn mul(self, rhs: Sign) -> Self {
        match rhs {
            Sign::Pos => self,
            Sign::Neg => self.rev(),
        }
    }
}

/// A quarter turn of a slab of layers measured inward from one face.
///
/// Twists are immutable values; [`Twist::rev()`] produces the inverse.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    /// Face the rotating slab is measured from.
    pub face: Face,
    /// Rotation direction about the face's axis.
    pub direction: TwistDirection,
    /// Number of layers rotating together, starting at the face.
    pub layers: u8,
}

impl Twist {
    /// Constructs a single-layer twist.
    pub fn new(face: Face, direction: TwistDirection) -> Self {
        Self {
            face,
            direction,
            layers: 1,
        }
    }

    /// Returns the twist that exactly undoes this one.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            face: self.face,
            direction: self.direction.rev(),
            layers: self.layers,
        }
    }

    /// Returns the signed rotation angle about the face's axis.
    pub fn angle(self) -> Rad<f32> {
        Rad(self.direction.sign().float() * FRAC_PI_2)
    }

    /// Returns the full rotation this twist applies to its slab.
    pub fn rotation(self) -> Quaternion<f32> {
        Quaternion::from_axis_angle(self.face.axis().unit_vec3(), self.angle())
    }

    /// Generates a uniformly random twist legal for an `order` sized cube.
    pub fn from_rng(order: u8) -> Self {
        let mut rng = rand::thread_rng();
        let face = match rng.gen_range(0..6) {
            0 => Face::Right,
            1 => Face::Left,
            2 => Face::Up,
            3 => Face::Down,
            4 => Face::Front,
            _ => Face::Back,
        };
        let direction = if rng.gen::<bool>() {
            TwistDirection::Ccw
        } else {
            TwistDirection::Cw
        };
        Self {
            face,
            direction,
            layers: rng.gen_range(1..=max_layer_count(order)),
        }
    }
}

impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layers > 1 {
            write!(f, "{}", self.layers)?;
        }
        write!(f, "{}{}", self.face, self.direction)
    }
}
