//! Face, axis, and sign types for the cube.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use super::twist::TwistDirection;

/// One of the six outer faces of the cube.
///
/// The discriminant order matches the material slot order used by box
/// geometry (see [`Face::material_slot()`]), but all slot arithmetic goes
/// through the explicit mapping table rather than `as` casts.
#[derive(Serialize, Deserialize, EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    /// Right face (X+).
    #[default]
    Right,
    /// Left face (X-).
    Left,
    /// Top face (Y+).
    Up,
    /// Bottom face (Y-).
    Down,
    /// Front face (Z+).
    Front,
    /// Back face (Z-).
    Back,
}

impl Face {
    /// Returns the axis perpendicular to this face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            Right | Left => Axis::X,
            Up | Down => Axis::Y,
            Front | Back => Axis::Z,
        }
    }
    /// Returns which end of the axis this face sits on.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            Right | Up | Front => Sign::Pos,
            Left | Down | Back => Sign::Neg,
        }
    }
    /// Returns the face on the opposite end of the same axis.
    #[must_use]
    pub fn opposite(self) -> Self {
        use Face::*;

        match self {
            Right => Left,
            Left => Right,
            Up => Down,
            Down => Up,
            Front => Back,
            Back => Front,
        }
    }

    /// Returns the slot this face occupies in a six-element sticker or
    /// material array.
    ///
    /// Box geometry orders its face groups right, left, top, bottom, front,
    /// back; this table is the single place that convention lives.
    pub fn material_slot(self) -> usize {
        use Face::*;

        match self {
            Right => 0,
            Left => 1,
            Up => 2,
            Down => 3,
            Front => 4,
            Back => 5,
        }
    }

    /// Returns the outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.axis().unit_vec3() * self.sign().float()
    }

    /// Returns where this face direction ends up after a quarter turn about
    /// `axis`. Faces on the rotation axis itself are unchanged.
    #[must_use]
    pub fn rotated(self, axis: Axis, direction: TwistDirection) -> Self {
        if self.axis() == axis {
            return self;
        }
        let cycle = axis.face_cycle();
        let i = cycle
            .iter()
            .position(|&f| f == self)
            .unwrap_or_else(|| unreachable!("face {self:?} missing from cycle of {axis:?}"));
        let step = match direction {
            TwistDirection::Ccw => 1,
            TwistDirection::Cw => 3,
        };
        cycle[(i + step) % 4]
    }

    /// Returns the one-letter symbol for this face ("R", "L", "U", "D", "F",
    /// or "B").
    pub fn symbol(self) -> &'static str {
        use Face::*;

        match self {
            Right => "R",
            Left => "L",
            Up => "U",
            Down => "D",
            Front => "F",
            Back => "B",
        }
    }
    /// Returns the full name of this face.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            Right => "Right",
            Left => "Left",
            Up => "Up",
            Down => "Down",
            Front => "Front",
            Back => "Back",
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 3-dimensional axis.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X,
    /// Y axis (up).
    Y,
    /// Z axis (towards the camera).
    Z,
}

impl Axis {
    /// Returns the coordinate index of this axis.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// Returns the four faces perpendicular to this axis, in the order they
    /// cycle under a counterclockwise quarter turn about the axis.
    pub fn face_cycle(self) -> [Face; 4] {
        use Face::*;

        match self {
            Axis::X => [Up, Front, Down, Back],
            Axis::Y => [Front, Right, Back, Left],
            Axis::Z => [Right, Up, Left, Down],
        }
    }
}

/// Which end of an axis a face sits on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative end.
    Neg,
    /// Positive end.
    Pos,
}

impl Sign {
    /// Returns -1.0 or 1.0.
    pub const fn float(self) -> f32 {
        match self {
            Sign::Neg => -1.0,
            Sign::Pos => 1.0,
        }
    }
    /// Returns -1 or 1.
    pub const fn int(self) -> i8 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
}

impl std::ops::Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_material_slots_are_a_bijection() {
        let mut seen = [false; 6];
        for face in Face::iter() {
            let slot = face.material_slot();
            assert!(!seen[slot], "slot {slot} mapped twice");
            seen[slot] = true;
        }
    }

    #[test]
    fn test_opposite_is_an_involution() {
        for face in Face::iter() {
            assert_eq!(face, face.opposite().opposite());
            assert_eq!(face.axis(), face.opposite().axis());
            assert_ne!(face.sign(), face.opposite().sign());
        }
    }

    #[test]
    fn test_quarter_turn_cycles_have_period_four() {
        for axis in Axis::iter() {
            for face in Face::iter() {
                let mut f = face;
                for _ in 0..4 {
                    f = f.rotated(axis, TwistDirection::Ccw);
                }
                assert_eq!(face, f);

                let there = face.rotated(axis, TwistDirection::Ccw);
                let back = there.rotated(axis, TwistDirection::Cw);
                assert_eq!(face, back);
            }
        }
    }

    #[test]
    fn test_rotation_fixes_the_axis_faces() {
        for axis in Axis::iter() {
            for face in Face::iter().filter(|f| f.axis() == axis) {
                assert_eq!(face, face.rotated(axis, TwistDirection::Ccw));
                assert_eq!(face, face.rotated(axis, TwistDirection::Cw));
            }
        }
    }

    #[test]
    fn test_ccw_cycle_matches_rotation_matrices() {
        // +90 degrees about Z sends X+ to Y+.
        assert_eq!(
            Face::Up,
            Face::Right.rotated(Axis::Z, TwistDirection::Ccw)
        );
        // +90 degrees about X sends Y+ to Z+.
        assert_eq!(
            Face::Front,
            Face::Up.rotated(Axis::X, TwistDirection::Ccw)
        );
        // +90 degrees about Y sends Z+ to X+.
        assert_eq!(
            Face::Right,
            Face::Front.rotated(Axis::Y, TwistDirection::Ccw)
        );
    }
}
