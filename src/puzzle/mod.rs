//! Cube state and the move engine.

use thiserror::Error;

mod controller;
mod cube;
mod face;
mod twist;

pub use controller::{interpolate, CubeController, TwistKind};
pub use cube::{max_layer_count, Cube, Cubie, CubieId, EPSILON, ORDER_RANGE};
pub use face::{Axis, Face, Sign};
pub use twist::{Twist, TwistDirection};

/// Everything that can go wrong inside the move engine.
///
/// Malformed input from the interaction adapters is normalized before it gets
/// here, so these mostly guard against misuse of the API itself.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Cube orders outside 2 through 9 are not supported.
    #[error("invalid cube order {0}; expected 2 through 9")]
    InvalidOrder(u8),
    /// The layer count must be between 1 and half the cube order.
    #[error("invalid layer count {layers} for a {order}x{order}x{order} cube")]
    InvalidLayerCount {
        /// Requested slab depth.
        layers: u8,
        /// Cubies per axis of the cube the twist was aimed at.
        order: u8,
    },
    /// Undo was requested with an empty history.
    #[error("nothing to undo")]
    NothingToUndo,
    /// Redo was requested with an empty redo buffer.
    #[error("nothing to redo")]
    NothingToRedo,
}
