//! Cube state store: the NxNxN grid of cubies.
//!
//! The store is the sole source of truth for piece placement. Between twists
//! every cubie sits exactly on the lattice `index * (size + gap) - offset`;
//! the move engine rotates positions through floating point and the store
//! rounds them back onto the lattice when the twist settles.

use std::ops::RangeInclusive;

use cgmath::{Point3, Rotation};
use itertools::iproduct;
use strum::IntoEnumIterator;

use super::face::{Axis, Face, Sign};
use super::twist::Twist;
use super::CubeError;
use crate::preferences::CubePreferences;

/// Range of supported cube orders.
pub const ORDER_RANGE: RangeInclusive<u8> = 2..=9;

/// Tolerance for deciding whether a coordinate lies on a face boundary.
pub const EPSILON: f32 = 0.001;

/// Maximum legal layer count for a twist on an `order` sized cube.
///
/// Rotating more than half the cube would turn a face twist into a whole-cube
/// rotation of the remainder, so slabs are capped at `order / 2`.
pub fn max_layer_count(order: u8) -> u8 {
    std::cmp::max(1, order / 2)
}

/// Identifies one cubie in a [`Cube`]. Stable across twists; invalidated by
/// rebuild.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(pub u16);

/// One small block of the puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    /// Grid indices along X, Y, Z, each in `0..order`.
    grid: [u8; 3],
    /// Continuous position of the cubie center.
    position: Point3<f32>,
    /// Sticker color identities, indexed by the material slot of the face
    /// direction each sticker currently points toward. The color identity of
    /// a sticker is the face it belonged to on a freshly built cube.
    stickers: [Option<Face>; 6],
}

impl Cubie {
    /// Grid indices along X, Y, Z.
    pub fn grid(&self) -> [u8; 3] {
        self.grid
    }
    /// Continuous position of the cubie center.
    pub fn position(&self) -> Point3<f32> {
        self.position
    }
    /// Color identity of the sticker currently facing `direction`, if any.
    pub fn sticker(&self, direction: Face) -> Option<Face> {
        self.stickers[direction.material_slot()]
    }
    /// All six sticker slots, in material slot order.
    pub fn stickers(&self) -> &[Option<Face>; 6] {
        &self.stickers
    }
}

/// The full NxNxN grid of cubies.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    prefs: CubePreferences,
    offset: f32,
    cubies: Vec<Cubie>,
}

impl Cube {
    /// Builds a solved cube from `prefs`.
    pub fn new(prefs: &CubePreferences) -> Result<Self, CubeError> {
        if !ORDER_RANGE.contains(&prefs.order) {
            return Err(CubeError::InvalidOrder(prefs.order));
        }

        let n = prefs.order;
        let offset = prefs.offset();
        let mut cube = Self {
            prefs: *prefs,
            offset,
            cubies: Vec::with_capacity((n as usize).pow(3)),
        };

        for (i, j, k) in iproduct!(0..n, 0..n, 0..n) {
            let position = Point3::new(cube.coord(i), cube.coord(j), cube.coord(k));

            // A sticker exists exactly where the cubie touches the outside of
            // the cube.
            let mut stickers = [None; 6];
            for face in Face::iter() {
                let boundary = face.sign().float() * offset;
                if (position[face.axis().index()] - boundary).abs() < EPSILON {
                    stickers[face.material_slot()] = Some(face);
                }
            }

            cube.cubies.push(Cubie {
                grid: [i, j, k],
                position,
                stickers,
            });
        }

        log::trace!("built {0}x{0}x{0} cube", n);
        Ok(cube)
    }

    /// Returns the build parameters this cube was generated from.
    pub fn prefs(&self) -> &CubePreferences {
        &self.prefs
    }
    /// Cubies per axis.
    pub fn order(&self) -> u8 {
        self.prefs.order
    }
    /// Distance from the cube center to an outer layer's cubie centers.
    pub fn offset(&self) -> f32 {
        self.offset
    }
    /// Distance from the cube center to the outside of the outer cubies.
    pub fn half_extent(&self) -> f32 {
        self.offset + self.prefs.cubie_size / 2.0
    }

    /// Lattice coordinate of grid index `index`.
    pub fn coord(&self, index: u8) -> f32 {
        index as f32 * self.prefs.step() - self.offset
    }

    /// All cubies, in build order.
    pub fn cubies(&self) -> impl Iterator<Item = (CubieId, &Cubie)> {
        self.cubies
            .iter()
            .enumerate()
            .map(|(i, c)| (CubieId(i as u16), c))
    }
    /// Looks up one cubie.
    pub fn cubie(&self, id: CubieId) -> &Cubie {
        &self.cubies[id.0 as usize]
    }

    /// Selects the slab of `layers` layers measured inward from `face`.
    ///
    /// The boundary sits just inside the innermost rotating layer; a cubie
    /// belongs to the slab when its coordinate along the face's axis is past
    /// the boundary, with a small tolerance so float drift never splits a
    /// layer.
    pub fn select_layers(&self, face: Face, layers: u8) -> Vec<CubieId> {
        let depth = layers.saturating_sub(1) as f32 * self.prefs.step();
        let axis = face.axis().index();
        let sign = face.sign();
        let boundary = sign.float() * (self.offset - depth);

        self.cubies()
            .filter(|(_, cubie)| match sign {
                Sign::Pos => cubie.position[axis] > boundary - EPSILON,
                Sign::Neg => cubie.position[axis] < boundary + EPSILON,
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Applies a settled twist rotation to the given cubies: rotates their
    /// positions, permutes their sticker slots, and reindexes them back onto
    /// the lattice.
    pub fn apply_twist_to(&mut self, ids: &[CubieId], twist: Twist) {
        let rotation = twist.rotation();
        let axis = twist.face.axis();
        for &id in ids {
            let cubie = &mut self.cubies[id.0 as usize];
            cubie.position = rotation.rotate_point(cubie.position);

            let mut stickers = [None; 6];
            for face in Face::iter() {
                stickers[face.rotated(axis, twist.direction).material_slot()] =
                    cubie.stickers[face.material_slot()];
            }
            cubie.stickers = stickers;

            self.reindex(id);
        }
    }

    /// Selects and applies a twist in one step, with no animation. Returns
    /// the affected cubies.
    pub fn apply_twist(&mut self, twist: Twist) -> Vec<CubieId> {
        let grip = self.select_layers(twist.face, twist.layers);
        self.apply_twist_to(&grip, twist);
        grip
    }

    /// Recomputes a cubie's grid indices from its continuous position and
    /// snaps the position back onto the lattice.
    ///
    /// An arbitrary-axis rotation leaves positions slightly off-grid; this is
    /// what keeps the discrete state synchronized with the animated state.
    pub fn reindex(&mut self, id: CubieId) {
        let step = self.prefs.step();
        let offset = self.offset;
        let order = self.prefs.order;
        let cubie = &mut self.cubies[id.0 as usize];
        for axis in Axis::iter() {
            let a = axis.index();
            let index = ((cubie.position[a] + offset) / step).round();
            debug_assert!(
                (0.0..order as f32).contains(&index),
                "cubie {id:?} left the grid: {:?}",
                cubie.position,
            );
            cubie.grid[a] = index as u8;
            cubie.position[a] = index * step - offset;
        }
    }

    /// Returns the sticker color identity facing `face` for every cubie on
    /// that face's boundary.
    pub fn face_colors(&self, face: Face) -> impl Iterator<Item = Option<Face>> + '_ {
        let boundary = face.sign().float() * self.offset;
        let axis = face.axis().index();
        self.cubies
            .iter()
            .filter(move |cubie| (cubie.position[axis] - boundary).abs() < EPSILON)
            .map(move |cubie| cubie.sticker(face))
    }

    /// Returns whether every face of the cube is monochromatic.
    ///
    /// Positions are only on the lattice between twists, so this must not be
    /// called mid-animation; the move engine evaluates it once per settled
    /// twist.
    pub fn is_solved(&self) -> bool {
        Face::iter().all(|face| {
            let mut colors = self.face_colors(face);
            match colors.next() {
                Some(Some(first)) => colors.all(|c| c == Some(first)),
                // A face with no stickers facing out means the state is
                // corrupt; report unsolved rather than panic.
                _ => false,
            }
        })
    }
}
