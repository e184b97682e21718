//! Default sticker color and label tables.

use crate::puzzle::Face;

/// Right face sticker color (green).
pub const RIGHT: [f32; 3] = [0.0, 1.0, 0.0];
/// Left face sticker color (blue).
pub const LEFT: [f32; 3] = [0.0, 0.0, 1.0];
/// Top face sticker color (white).
pub const UP: [f32; 3] = [0.97, 0.97, 0.97];
/// Bottom face sticker color (yellow).
pub const DOWN: [f32; 3] = [1.0, 1.0, 0.0];
/// Front face sticker color (pink).
pub const FRONT: [f32; 3] = [1.0, 0.0, 0.65];
/// Back face sticker color (dark red).
pub const BACK: [f32; 3] = [0.65, 0.0, 0.0];

/// Returns the default sticker color for a color identity.
pub fn face_color(face: Face) -> [f32; 3] {
    match face {
        Face::Right => RIGHT,
        Face::Left => LEFT,
        Face::Up => UP,
        Face::Down => DOWN,
        Face::Front => FRONT,
        Face::Back => BACK,
    }
}

/// Returns the letter drawn on a face's center sticker.
pub fn face_label(face: Face) -> char {
    match face {
        Face::Front => 'A',
        Face::Back => 'B',
        Face::Left => 'C',
        Face::Right => 'D',
        Face::Up => 'E',
        Face::Down => 'F',
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<char> = Face::iter().map(face_label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(6, labels.len());
    }
}
