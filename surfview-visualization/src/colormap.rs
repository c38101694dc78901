//! Height gradient color scales
//!
//! A scale is a list of `(position, color)` stops over `[0, 1]`, sampled
//! with linear interpolation. The gradient texture stores position 0 in
//! row 0; heights are looked up through [`HeightRange::ratio`], which maps
//! the highest point to 0, so the texture is read bottom-up.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use surfview_core::{Error, HeightAxis, HeightRange, IndexedMesh, Result};

/// Rows in the gradient lookup texture
pub const GRADIENT_TEXTURE_HEIGHT: usize = 1024;

/// Piecewise-linear color scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColorScale")]
pub struct ColorScale {
    stops: Vec<(f32, Color)>,
}

// Deserialized stops go through `ColorScale::new`
#[derive(Deserialize)]
struct RawColorScale {
    stops: Vec<(f32, Color)>,
}

impl TryFrom<RawColorScale> for ColorScale {
    type Error = Error;

    fn try_from(raw: RawColorScale) -> Result<Self> {
        Self::new(raw.stops)
    }
}

impl ColorScale {
    /// Create a scale; stops must be non-empty, within `[0, 1]` and ascending
    pub fn new(stops: Vec<(f32, Color)>) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::InvalidData("Color scale needs at least one stop".to_string()));
        }
        if stops.iter().any(|(t, _)| !(0.0..=1.0).contains(t)) {
            return Err(Error::InvalidData("Color stops must lie in [0, 1]".to_string()));
        }
        if stops.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(Error::InvalidData("Color stops must be in ascending order".to_string()));
        }
        Ok(Self { stops })
    }

    /// Blue to dark red terrain scale
    pub fn terrain() -> Self {
        Self {
            stops: vec![
                (0.0, Color::rgb(0, 0, 131)),
                (0.125, Color::rgb(0, 60, 170)),
                (0.375, Color::rgb(5, 255, 255)),
                (0.625, Color::rgb(255, 255, 0)),
                (0.875, Color::rgb(250, 0, 0)),
                (1.0, Color::rgb(128, 0, 0)),
            ],
        }
    }

    pub fn stops(&self) -> &[(f32, Color)] {
        &self.stops
    }

    /// Color at `t`, clamped to the first and last stop
    pub fn sample(&self, t: f32) -> Color {
        let (first_t, first) = self.stops[0];
        if t.is_nan() || t <= first_t {
            return first;
        }

        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                if span <= 0.0 {
                    return c1;
                }
                return c0.lerp(&c1, (t - t0) / span);
            }
        }

        self.stops[self.stops.len() - 1].1
    }

    /// Color for a height, matching the gradient shader
    pub fn sample_height(&self, range: &HeightRange, height: f64) -> Color {
        self.sample(1.0 - range.ratio(height) as f32)
    }

    /// RGBA rows of the lookup texture, row `i` holding position `i / (rows - 1)`
    pub fn texture(&self, rows: usize) -> Vec<[u8; 4]> {
        let last = rows.saturating_sub(1).max(1) as f32;
        (0..rows)
            .map(|i| {
                let c = self.sample(i as f32 / last);
                [c.r, c.g, c.b, 255]
            })
            .collect()
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::terrain()
    }
}

/// Per-vertex gradient colors in `[0, 1]`, reading heights from `axis`
pub fn vertex_colors(
    mesh: &IndexedMesh,
    range: &HeightRange,
    axis: HeightAxis,
    scale: &ColorScale,
) -> Vec<[f32; 3]> {
    mesh.positions()
        .iter()
        .map(|p| scale.sample_height(range, axis.height(p) as f64).to_f32())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfview_core::Point3f;

    #[test]
    fn test_terrain_stops() {
        let scale = ColorScale::terrain();
        assert_eq!(scale.sample(0.0), Color::rgb(0, 0, 131));
        assert_eq!(scale.sample(0.125), Color::rgb(0, 60, 170));
        assert_eq!(scale.sample(0.625), Color::rgb(255, 255, 0));
        assert_eq!(scale.sample(1.0), Color::rgb(128, 0, 0));
        assert_eq!(scale.sample(-1.0), Color::rgb(0, 0, 131));
        assert_eq!(scale.sample(7.0), Color::rgb(128, 0, 0));
    }

    #[test]
    fn test_midpoints_interpolate() {
        let scale = ColorScale::terrain();
        // Halfway between (0.375, #05ffff) and (0.625, #ffff00)
        assert_eq!(scale.sample(0.5), Color::rgb(130, 255, 128));
        // Halfway between (0.875, #fa0000) and (1, #800000)
        assert_eq!(scale.sample(0.9375), Color::rgb(189, 0, 0));
    }

    #[test]
    fn test_invalid_scales() {
        assert!(ColorScale::new(Vec::new()).is_err());
        assert!(ColorScale::new(vec![(1.5, Color::BLACK)]).is_err());
        assert!(ColorScale::new(vec![(0.5, Color::BLACK), (0.2, Color::WHITE)]).is_err());
        assert!(ColorScale::new(vec![(0.0, Color::BLACK), (1.0, Color::WHITE)]).is_ok());
    }

    #[test]
    fn test_deserialize_validates_stops() {
        assert!(serde_json::from_str::<ColorScale>(r#"{"stops": []}"#).is_err());

        let json = serde_json::to_string(&ColorScale::terrain()).unwrap();
        let scale: ColorScale = serde_json::from_str(&json).unwrap();
        assert_eq!(scale, ColorScale::terrain());

        let descending = json.replacen("0.0", "0.5", 1);
        assert!(serde_json::from_str::<ColorScale>(&descending).is_err());
    }

    #[test]
    fn test_texture_rows() {
        let rows = ColorScale::terrain().texture(GRADIENT_TEXTURE_HEIGHT);
        assert_eq!(rows.len(), GRADIENT_TEXTURE_HEIGHT);
        assert_eq!(rows[0], [0, 0, 131, 255]);
        assert_eq!(rows[GRADIENT_TEXTURE_HEIGHT - 1], [128, 0, 0, 255]);
    }

    #[test]
    fn test_vertex_colors_follow_height() {
        let mesh = IndexedMesh::soup_from_positions(&[
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 10.0, 0.0),
            Point3f::new(0.0, 5.0, 1.0),
        ]);
        let range = HeightRange { min: 0.0, max: 10.0 };
        let colors = vertex_colors(&mesh, &range, HeightAxis::Y, &ColorScale::terrain());

        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], Color::rgb(0, 0, 131).to_f32());
        assert_eq!(colors[1], Color::rgb(128, 0, 0).to_f32());
        assert_eq!(colors[2], Color::rgb(130, 255, 128).to_f32());
    }

    #[test]
    fn test_vertex_colors_z_axis() {
        // y varies widely but heights live on z
        let mesh = IndexedMesh::soup_from_positions(&[
            Point3f::new(0.0, 100.0, 0.0),
            Point3f::new(1.0, 0.0, 10.0),
            Point3f::new(0.0, 200.0, 5.0),
        ]);
        let range = HeightRange { min: 0.0, max: 10.0 };
        let colors = vertex_colors(&mesh, &range, HeightAxis::Z, &ColorScale::terrain());

        assert_eq!(colors[0], Color::rgb(0, 0, 131).to_f32());
        assert_eq!(colors[1], Color::rgb(128, 0, 0).to_f32());
        assert_eq!(colors[2], Color::rgb(130, 255, 128).to_f32());
    }

    #[test]
    fn test_flat_range_uses_top_color() {
        let range = HeightRange { min: 3.0, max: 3.0 };
        assert_eq!(ColorScale::terrain().sample_height(&range, 3.0), Color::rgb(128, 0, 0));
    }
}
