//! Point types and height bounds

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Running bounds of the height (z) dimension of a dataset.
///
/// A fresh range is empty: `min` is `+inf` and `max` is `-inf` until the
/// first value is included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    pub min: f64,
    pub max: f64,
}

impl HeightRange {
    /// Create an empty range
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Widen the range to cover `value`
    pub fn include(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// True while no value has been included
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Distance between max and min, zero for an empty range
    pub fn span(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// Gradient lookup coordinate for a height.
    ///
    /// Returns `1 - (h - min) / (max - min)` clamped to `[0, 1]`, so the
    /// highest point maps to 0. Flat or empty ranges map everything to 0.
    pub fn ratio(&self, height: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        (1.0 - (height - self.min) / span).clamp(0.0, 1.0)
    }
}

impl Default for HeightRange {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene axis that carries the height of a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightAxis {
    X,
    #[default]
    Y,
    Z,
}

impl HeightAxis {
    /// Component index into a point
    pub fn index(&self) -> usize {
        match self {
            HeightAxis::X => 0,
            HeightAxis::Y => 1,
            HeightAxis::Z => 2,
        }
    }

    /// Height of a scene point
    pub fn height(&self, point: &Point3f) -> f32 {
        point[self.index()]
    }
}

impl FromIterator<f64> for HeightRange {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut range = Self::new();
        for value in iter {
            range.include(value);
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_range() {
        let range = HeightRange::new();
        assert!(range.is_empty());
        assert_eq!(range.min, f64::INFINITY);
        assert_eq!(range.max, f64::NEG_INFINITY);
        assert_eq!(range.span(), 0.0);
    }

    #[test]
    fn test_include_tracks_bounds() {
        let range: HeightRange = [3.0, -1.5, 7.25, 2.0].into_iter().collect();
        assert!(!range.is_empty());
        assert_eq!(range.min, -1.5);
        assert_eq!(range.max, 7.25);
    }

    #[test]
    fn test_ratio() {
        let range: HeightRange = [0.0, 10.0].into_iter().collect();
        assert_relative_eq!(range.ratio(10.0), 0.0);
        assert_relative_eq!(range.ratio(0.0), 1.0);
        assert_relative_eq!(range.ratio(2.5), 0.75);
        assert_relative_eq!(range.ratio(-5.0), 1.0);
        assert_relative_eq!(range.ratio(15.0), 0.0);
    }

    #[test]
    fn test_height_axis_component() {
        let p = Point3f::new(1.0, 2.0, 3.0);
        assert_eq!(HeightAxis::default(), HeightAxis::Y);
        assert_eq!(HeightAxis::X.height(&p), 1.0);
        assert_eq!(HeightAxis::Y.height(&p), 2.0);
        assert_eq!(HeightAxis::Z.height(&p), 3.0);
    }

    #[test]
    fn test_ratio_flat_range() {
        let range: HeightRange = [4.0, 4.0].into_iter().collect();
        assert_eq!(range.ratio(4.0), 0.0);
    }
}
