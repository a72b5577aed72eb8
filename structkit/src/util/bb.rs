//! Axis-aligned boxes in unit-cell coordinates.

use glam::DVec3;

use super::Face;


/// An axis-aligned bounding box inside one block cell, coordinates in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {

    pub const CUBE: Self = Self { min: DVec3::ZERO, max: DVec3::ONE };

    /// Construct a new bounding box from the minimum and maximum points.
    pub const fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            min: DVec3::new(min_x, min_y, min_z),
            max: DVec3::new(max_x, max_y, max_z),
        }
    }

    /// Return true if this box alone fully covers the given face of its cell:
    /// it reaches the face plane and spans the whole cell on the two other
    /// axes.
    pub fn covers_face(self, face: Face) -> bool {

        let axis = face.axis_index();
        let on_plane = if face.is_pos() {
            self.max[axis] >= 1.0
        } else {
            self.min[axis] <= 0.0
        };
        if !on_plane {
            return false;
        }

        let (u, v) = match axis {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };

        self.min[u] <= 0.0 && self.max[u] >= 1.0 && self.min[v] <= 0.0 && self.max[v] >= 1.0

    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cube_covers_every_face() {
        for face in Face::ALL {
            assert!(BoundingBox::CUBE.covers_face(face));
        }
    }

    #[test]
    fn bottom_slab_covers_only_its_floor() {
        let slab = BoundingBox::new(0.0, 0.0, 0.0, 1.0, 0.5, 1.0);
        assert!(slab.covers_face(Face::NegY));
        assert!(!slab.covers_face(Face::PosY));
        // Side faces are only half covered.
        for face in Face::HORIZONTAL {
            assert!(!slab.covers_face(face));
        }
    }

    #[test]
    fn inset_box_covers_nothing() {
        let pixel = 1.0 / 16.0;
        let post = BoundingBox::new(pixel, 0.0, pixel, 1.0 - pixel, 1.0, 1.0 - pixel);
        for face in Face::ALL {
            assert!(!post.covers_face(face), "{face:?}");
        }
    }

}
