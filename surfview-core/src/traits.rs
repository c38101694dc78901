//! Core traits for surfview

use crate::{mesh::*, point::*};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}

fn bounds_of(points: &[Point3f]) -> (Point3f, Point3f) {
    let Some(first) = points.first() else {
        return (Point3f::origin(), Point3f::origin());
    };

    let mut min = *first;
    let mut max = *first;

    for point in points {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        min.z = min.z.min(point.z);

        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
        max.z = max.z.max(point.z);
    }

    (min, max)
}

impl Drawable for IndexedMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(&self.positions())
    }
}

impl Drawable for [Point3f] {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(self)
    }
}
