//! Serializable configuration for the cube and its animations.

use serde::{Deserialize, Serialize};

/// Build parameters for the cube.
///
/// `order` is the number of cubies per axis. `bevel` only affects geometry
/// construction by the renderer; it is carried here so one struct describes a
/// complete build.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct CubePreferences {
    /// Cubies per axis (2 through 9).
    pub order: u8,
    /// Edge length of one cubie.
    pub cubie_size: f32,
    /// Spacing between adjacent cubies.
    pub gap: f32,
    /// Corner rounding radius factor for cubie geometry.
    pub bevel: f32,
}

impl Default for CubePreferences {
    fn default() -> Self {
        Self {
            order: 3,
            cubie_size: 1.0,
            gap: 0.05,
            bevel: 0.1,
        }
    }
}

impl CubePreferences {
    /// Constructs preferences for an `order` sized cube with default
    /// geometry parameters.
    pub fn with_order(order: u8) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Lattice step between adjacent cubie centers.
    pub fn step(&self) -> f32 {
        self.cubie_size + self.gap
    }
    /// Distance from the cube center to an outer layer's cubie centers.
    pub fn offset(&self) -> f32 {
        (self.order - 1) as f32 * self.step() / 2.0
    }
}

/// Preferences for how twists animate.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Wall-clock duration of one twist animation, in seconds, independent of
    /// the twist angle.
    pub twist_duration: f32,
    /// Twist exponentially faster when the queue backs up.
    pub dynamic_twist_speed: bool,
}

impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            twist_duration: 0.15,
            dynamic_twist_speed: false,
        }
    }
}
