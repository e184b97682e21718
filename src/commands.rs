//! Commands and the keyboard adapter that produces them.

use serde::{Deserialize, Serialize};

use crate::puzzle::{max_layer_count, Face, Twist, TwistDirection};

/// An action the host should perform on the engine.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Rotate a slab of layers.
    Twist {
        /// Face the slab is measured from.
        face: Face,
        /// Rotation direction about the face's axis.
        direction: TwistDirection,
        /// Slab depth.
        layers: u8,
    },
    /// Undo the most recent twist.
    Undo,
    /// Replay the most recently undone twist.
    Redo,
    /// Rebuild the cube in its solved state.
    Reset,
    /// Scramble the cube thoroughly.
    ScrambleFull,
    /// Set the sticky layer count for the next twist.
    SelectLayers(u8),

    /// No action.
    #[default]
    None,
}

impl Command {
    /// The twist this command performs, if it is a twist.
    pub fn twist(self) -> Option<Twist> {
        match self {
            Command::Twist {
                face,
                direction,
                layers,
            } => Some(Twist {
                face,
                direction,
                layers,
            }),
            _ => None,
        }
    }
}

/// Maps key presses to [`Command`]s.
///
/// Digit keys select how many layers the next face key rotates; the
/// selection is sticky until a twist consumes it. Face keys are lowercase
/// for a counterclockwise quarter turn about the face's axis and uppercase
/// for clockwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    layers: u8,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self { layers: 1 }
    }
}

impl KeyboardState {
    /// Constructs a keyboard state with a single-layer selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current sticky layer count.
    pub fn layers(&self) -> u8 {
        self.layers
    }

    /// Handles a key press on an `order` sized cube.
    ///
    /// Layer counts are clamped here, at the input boundary, so out-of-range
    /// values never reach the engine.
    pub fn key_down(&mut self, key: char, order: u8) -> Command {
        if let Some(digit) = key.to_digit(10) {
            if digit >= 1 {
                self.layers = (digit as u8).clamp(1, max_layer_count(order));
                return Command::SelectLayers(self.layers);
            }
            return Command::None;
        }

        match key {
            'z' => Command::Undo,
            'r' => Command::Redo,
            ' ' => Command::ScrambleFull,
            '\r' | '\n' => Command::Reset,
            _ => match face_for_key(key.to_ascii_lowercase()) {
                Some(face) => {
                    let direction = if key.is_ascii_uppercase() {
                        TwistDirection::Cw
                    } else {
                        TwistDirection::Ccw
                    };
                    Command::Twist {
                        face,
                        direction,
                        layers: std::mem::replace(&mut self.layers, 1),
                    }
                }
                None => Command::None,
            },
        }
    }
}

/// The face each letter key rotates.
fn face_for_key(key: char) -> Option<Face> {
    match key {
        'a' => Some(Face::Front),
        'b' => Some(Face::Back),
        'c' => Some(Face::Left),
        'd' => Some(Face::Right),
        'e' => Some(Face::Up),
        'f' => Some(Face::Down),
        _ => None,
    }
}
