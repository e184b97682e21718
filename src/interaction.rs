//! Pointer and screen-space adapters.
//!
//! Everything here is pure geometry: the host feeds in its camera matrices
//! and pixel coordinates, and gets back faces and twists to hand to the
//! engine. Nothing in this module touches engine state.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point2, Point3, Vector2, Vector3};
use float_ord::FloatOrd;
use strum::IntoEnumIterator;

use crate::puzzle::{Cube, Face, Sign, Twist, TwistDirection};

/// Minimum drag length, in pixels, for a gesture to count as a twist.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Pixel dimensions of the rendering surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// A picking ray in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Ray start point.
    pub origin: Point3<f32>,
    /// Ray direction; need not be normalized.
    pub direction: Vector3<f32>,
}

/// Axis-aligned bounding box around the whole cube.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    /// Most negative corner.
    pub min: Point3<f32>,
    /// Most positive corner.
    pub max: Point3<f32>,
}

impl Aabb {
    /// Bounding box of `cube`, including the outer cubies' far sides.
    pub fn around(cube: &Cube) -> Self {
        let h = cube.half_extent();
        Self {
            min: Point3::new(-h, -h, -h),
            max: Point3::new(h, h, h),
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Point3<f32> {
        self.min.midpoint(self.max)
    }

    /// Coordinate of the box plane that `face` lies in.
    pub fn plane_coord(&self, face: Face) -> f32 {
        let a = face.axis().index();
        match face.sign() {
            Sign::Pos => self.max[a],
            Sign::Neg => self.min[a],
        }
    }

    /// Center point of one face of the box.
    pub fn face_center(&self, face: Face) -> Point3<f32> {
        let mut p = self.center();
        p[face.axis().index()] = self.plane_coord(face);
        p
    }
}

/// Projects a world-space point to pixel coordinates (Y down), or `None` when
/// the point is behind the camera.
pub fn project_to_screen(
    point: Point3<f32>,
    view_proj: Matrix4<f32>,
    viewport: Viewport,
) -> Option<Point2<f32>> {
    let clip = view_proj * point.to_homogeneous();
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Point2::new(
        (ndc.x + 1.0) / 2.0 * viewport.width,
        (-ndc.y + 1.0) / 2.0 * viewport.height,
    ))
}

/// Intersects a ray with a box using the slab method. Returns the entry point
/// (or the exit point for a ray starting inside).
pub fn raycast(ray: Ray, aabb: Aabb) -> Option<Point3<f32>> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for a in 0..3 {
        let d = ray.direction[a];
        if d.abs() < f32::EPSILON {
            if ray.origin[a] < aabb.min[a] || ray.origin[a] > aabb.max[a] {
                return None;
            }
        } else {
            let t1 = (aabb.min[a] - ray.origin[a]) / d;
            let t2 = (aabb.max[a] - ray.origin[a]) / d;
            let (t1, t2) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            t_near = t_near.max(t1);
            t_far = t_far.min(t2);
            if t_near > t_far {
                return None;
            }
        }
    }
    if t_far < 0.0 {
        return None;
    }
    let t = if t_near >= 0.0 { t_near } else { t_far };
    Some(ray.origin + ray.direction * t)
}

/// Picks the face a pointer press lands on: casts the ray into the cube's
/// bounding box, then takes whichever of the six box planes is closest to the
/// hit point.
pub fn pick_face(ray: Ray, aabb: Aabb) -> Option<Face> {
    let hit = raycast(ray, aabb)?;
    Face::iter().min_by_key(|&face| {
        FloatOrd((hit[face.axis().index()] - aabb.plane_coord(face)).abs())
    })
}

/// Converts a completed drag gesture on `face` into a quarter turn.
///
/// The rotation sense is the sign of the cross product of the two vectors
/// from the face center (in screen space) to the drag start and end; the
/// three negative faces appear mirrored on screen, so their sign flips to
/// keep the hand gesture consistent across opposite faces. Drags shorter
/// than [`DRAG_THRESHOLD`] yield nothing.
pub fn drag_twist(
    face: Face,
    start: Point2<f32>,
    end: Point2<f32>,
    face_center: Point2<f32>,
    layers: u8,
) -> Option<Twist> {
    if (end - start).magnitude() <= DRAG_THRESHOLD {
        return None;
    }
    let v1 = start - face_center;
    let v2 = end - face_center;
    let visual = if v1.perp_dot(v2) > 0.0 {
        TwistDirection::Cw
    } else {
        TwistDirection::Ccw
    };
    Some(Twist {
        face,
        direction: visual * face.sign(),
        layers,
    })
}

/// Resolves a screen-space direction (for example "up" or "left" from a
/// direction key) to the face whose projected center lies furthest that way
/// from the cube's projected center.
///
/// Faces pointing straight at the camera project onto the center and match
/// no direction.
pub fn nearest_face_to_screen_dir(
    dir: Vector2<f32>,
    aabb: Aabb,
    view_proj: Matrix4<f32>,
    viewport: Viewport,
) -> Option<Face> {
    if dir.magnitude2() < f32::EPSILON {
        return None;
    }
    let dir = dir.normalize();
    let center = project_to_screen(aabb.center(), view_proj, viewport)?;
    Face::iter()
        .filter_map(|face| {
            let p = project_to_screen(aabb.face_center(face), view_proj, viewport)?;
            let offset = p - center;
            if offset.magnitude2() < f32::EPSILON {
                return None;
            }
            Some((face, offset.normalize().dot(dir)))
        })
        .max_by_key(|&(_, alignment)| FloatOrd(alignment))
        .map(|(face, _)| face)
}

/// Returns the face whose center is closest to the camera.
///
/// Complements [`nearest_face_to_screen_dir`] for the two directions that
/// have no screen-space offset: "toward the camera" is the nearest face and
/// "away" is its opposite.
pub fn nearest_face_to_camera(aabb: Aabb, view_proj: Matrix4<f32>) -> Option<Face> {
    Face::iter()
        .filter_map(|face| {
            let clip = view_proj * aabb.face_center(face).to_homogeneous();
            (clip.w > 0.0).then_some((face, clip.w))
        })
        .min_by_key(|&(_, depth)| FloatOrd(depth))
        .map(|(face, _)| face)
}
