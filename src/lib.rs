//! NxNxN twisty puzzle simulator engine.
//!
//! This crate is the state-and-moves core of an interactive cube: the cubie
//! grid, the layer selector, the single-flight move engine with its queues
//! and undo history, solved-state detection, and the input adapters that
//! turn key presses and pointer gestures into twists. Rendering, windowing,
//! and UI live in the host application; it drives the engine by calling
//! [`CubeController::tick()`] once per frame and drawing the cube state plus
//! the transform from [`CubeController::current_rotation()`].
//!
//! ```
//! use std::time::Duration;
//!
//! use cubesim::{
//!     CubeController, CubePreferences, Face, InteractionPreferences, Twist, TwistDirection,
//! };
//!
//! let mut controller = CubeController::new(&CubePreferences::with_order(3))?;
//! controller.twist(Twist::new(Face::Front, TwistDirection::Ccw))?;
//!
//! let prefs = InteractionPreferences::default();
//! while controller.tick(Duration::from_millis(16), &prefs) {
//!     // redraw...
//! }
//!
//! assert_eq!(1, controller.history().len());
//! controller.undo()?;
//! # Ok::<(), cubesim::CubeError>(())
//! ```

pub mod colors;
pub mod commands;
pub mod interaction;
pub mod preferences;
pub mod puzzle;

pub use commands::{Command, KeyboardState};
pub use preferences::{CubePreferences, InteractionPreferences};
pub use puzzle::{
    Axis, Cube, CubeController, CubeError, Cubie, CubieId, Face, Sign, Twist, TwistDirection,
};
