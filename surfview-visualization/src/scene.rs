//! Viewer scene state
//!
//! Every viewer control maps to a [`SceneEvent`]. Applying an event to a
//! [`SceneState`] yields the next state; geometry is never touched.

use crate::camera::Camera;
use crate::color::Color;
use crate::shaders::ShadingMode;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use surfview_core::{HeightAxis, HeightRange};

pub const LIGHT_INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const LIGHT_POSITION_RANGE: RangeInclusive<f32> = -100.0..=100.0;
pub const POINT_SIZE_RANGE: RangeInclusive<f32> = 0.0..=5.0;

/// Length of each axis of the axes helper
pub const AXES_LENGTH: f32 = 200.0;

/// Axis colors of the axes helper (X, Y, Z)
pub const AXES_COLORS: [Color; 3] = [
    Color::rgb(255, 0, 0),
    Color::rgb(0, 128, 0),
    Color::rgb(0, 0, 255),
];

/// Clamp `value` into `range`, keeping `current` when `value` is NaN
fn clamp_or(value: f32, range: &RangeInclusive<f32>, current: f32) -> f32 {
    if value.is_nan() {
        current
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// White directional light shining from `position` towards the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vector3<f32>,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 0.5,
            position: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Phong parameters shared by the plain and gradient surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhongMaterial {
    pub shininess: f32,
    pub specular: Color,
    pub emissive: Color,
    pub double_sided: bool,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            shininess: 0.8,
            specular: Color::rgb(0x00, 0x01, 0x01),
            emissive: Color::rgb(0x04, 0x01, 0x01),
            double_sided: true,
        }
    }
}

/// Everything the viewer needs to draw a frame besides the geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub background: Color,
    pub material_color: Color,
    pub cloud_color: Color,
    pub light: DirectionalLight,
    pub ambient: Color,
    pub material: PhongMaterial,
    pub shading: ShadingMode,
    pub wireframe: bool,
    pub surface_visible: bool,
    pub axes_visible: bool,
    pub points_visible: bool,
    pub point_size: f32,
    /// False while a slider is being dragged
    pub controls_enabled: bool,
    pub camera: Camera,
    pub height_range: HeightRange,
    /// Scene axis the gradient reads heights from
    pub height_axis: HeightAxis,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x1a, 0x1a, 0x1a),
            material_color: Color::rgb(0xff, 0xba, 0x24),
            cloud_color: Color::rgb(0xff, 0xba, 0x24),
            light: DirectionalLight::default(),
            ambient: Color::BLACK,
            material: PhongMaterial::default(),
            shading: ShadingMode::Gradient,
            wireframe: false,
            surface_visible: true,
            axes_visible: true,
            points_visible: false,
            point_size: 1.0,
            controls_enabled: true,
            camera: Camera::default(),
            height_range: HeightRange::new(),
            height_axis: HeightAxis::Y,
        }
    }
}

/// A single viewer interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    SetBackground(Color),
    SetMaterialColor(Color),
    SetCloudColor(Color),
    SetLightIntensity(f32),
    SetLightPosition { axis: Axis, value: f32 },
    SetWireframe(bool),
    SetSurfaceVisible(bool),
    SetAxesVisible(bool),
    SetPointsVisible(bool),
    SetPointSize(f32),
    SetShading(ShadingMode),
    /// A slider drag started
    SliderStart,
    /// A slider drag finished
    SliderEnd,
    Resize { width: u32, height: u32 },
    Orbit { azimuth: f32, polar: f32 },
    Zoom(f32),
    /// A new surface was loaded
    SurfaceLoaded {
        height_range: HeightRange,
        height_axis: HeightAxis,
        bounds_min: Point3<f32>,
        bounds_max: Point3<f32>,
    },
}

impl SceneState {
    /// Apply one event and return the resulting state.
    ///
    /// Numeric inputs are clamped to their control ranges. Orbit and zoom
    /// are ignored while controls are locked by a slider drag.
    pub fn apply(mut self, event: SceneEvent) -> SceneState {
        match event {
            SceneEvent::SetBackground(color) => self.background = color,
            SceneEvent::SetMaterialColor(color) => self.material_color = color,
            SceneEvent::SetCloudColor(color) => self.cloud_color = color,
            SceneEvent::SetLightIntensity(value) => {
                self.light.intensity = clamp_or(value, &LIGHT_INTENSITY_RANGE, self.light.intensity);
            }
            SceneEvent::SetLightPosition { axis, value } => {
                let component = match axis {
                    Axis::X => &mut self.light.position.x,
                    Axis::Y => &mut self.light.position.y,
                    Axis::Z => &mut self.light.position.z,
                };
                *component = clamp_or(value, &LIGHT_POSITION_RANGE, *component);
            }
            SceneEvent::SetWireframe(on) => self.wireframe = on,
            SceneEvent::SetSurfaceVisible(on) => self.surface_visible = on,
            SceneEvent::SetAxesVisible(on) => self.axes_visible = on,
            SceneEvent::SetPointsVisible(on) => self.points_visible = on,
            SceneEvent::SetPointSize(size) => {
                self.point_size = clamp_or(size, &POINT_SIZE_RANGE, self.point_size);
            }
            SceneEvent::SetShading(mode) => self.shading = mode,
            SceneEvent::SliderStart => self.controls_enabled = false,
            SceneEvent::SliderEnd => self.controls_enabled = true,
            SceneEvent::Resize { width, height } => self.camera.set_viewport(width, height),
            SceneEvent::Orbit { azimuth, polar } => {
                if self.controls_enabled && azimuth.is_finite() && polar.is_finite() {
                    self.camera.orbit(azimuth, polar);
                }
            }
            SceneEvent::Zoom(factor) => {
                if self.controls_enabled {
                    self.camera.zoom(factor);
                }
            }
            SceneEvent::SurfaceLoaded {
                height_range,
                height_axis,
                bounds_min,
                bounds_max,
            } => {
                self.height_range = height_range;
                self.height_axis = height_axis;
                self.camera.fit_bounds(&bounds_min, &bounds_max);
            }
        }
        self
    }

    /// Apply a sequence of events in order
    pub fn apply_all<I: IntoIterator<Item = SceneEvent>>(self, events: I) -> SceneState {
        events.into_iter().fold(self, SceneState::apply)
    }

    /// Direction the light travels, from its position towards the origin
    pub fn light_direction(&self) -> Vector3<f32> {
        (-self.light.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| -Vector3::y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let scene = SceneState::default();
        assert_eq!(scene.background.to_hex(), "#1a1a1a");
        assert_eq!(scene.material_color.to_hex(), "#ffba24");
        assert_eq!(scene.cloud_color.to_hex(), "#ffba24");
        assert_eq!(scene.light.intensity, 0.5);
        assert_eq!(scene.light.position, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(scene.ambient, Color::BLACK);
        assert_eq!(scene.shading, ShadingMode::Gradient);
        assert!(!scene.points_visible);
        assert_eq!(scene.point_size, 1.0);
        assert!(scene.controls_enabled);
        assert!(scene.height_range.is_empty());
    }

    #[test]
    fn test_numeric_inputs_are_clamped() {
        let scene = SceneState::default().apply_all([
            SceneEvent::SetLightIntensity(25.0),
            SceneEvent::SetLightPosition { axis: Axis::X, value: -500.0 },
            SceneEvent::SetLightPosition { axis: Axis::Z, value: 42.5 },
            SceneEvent::SetPointSize(-1.0),
        ]);

        assert_eq!(scene.light.intensity, 10.0);
        assert_eq!(scene.light.position, Vector3::new(-100.0, 1.0, 42.5));
        assert_eq!(scene.point_size, 0.0);

        let scene = scene.apply_all([
            SceneEvent::SetLightIntensity(f32::NAN),
            SceneEvent::SetPointSize(7.0),
        ]);
        assert_eq!(scene.light.intensity, 10.0);
        assert_eq!(scene.point_size, 5.0);
    }

    #[test]
    fn test_slider_locks_orbit_controls() {
        let scene = SceneState::default();
        let start = scene.camera.position;

        let dragging = scene.apply(SceneEvent::SliderStart);
        assert!(!dragging.controls_enabled);

        let dragging = dragging.apply_all([
            SceneEvent::Orbit { azimuth: 1.0, polar: 0.2 },
            SceneEvent::Zoom(0.5),
        ]);
        assert_eq!(dragging.camera.position, start);

        let released = dragging.apply(SceneEvent::SliderEnd);
        assert!(released.controls_enabled);
        let moved = released.apply(SceneEvent::Zoom(0.5));
        assert_relative_eq!(moved.camera.distance(), start.coords.norm() * 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_toggles_and_colors() {
        let red = Color::from_hex("#ff0000").unwrap();
        let scene = SceneState::default().apply_all([
            SceneEvent::SetWireframe(true),
            SceneEvent::SetSurfaceVisible(false),
            SceneEvent::SetAxesVisible(false),
            SceneEvent::SetPointsVisible(true),
            SceneEvent::SetShading(ShadingMode::Plain),
            SceneEvent::SetBackground(red),
            SceneEvent::SetCloudColor(red),
        ]);

        assert!(scene.wireframe);
        assert!(!scene.surface_visible);
        assert!(!scene.axes_visible);
        assert!(scene.points_visible);
        assert_eq!(scene.shading, ShadingMode::Plain);
        assert_eq!(scene.background, red);
        assert_eq!(scene.cloud_color, red);
        assert_eq!(scene.material_color.to_hex(), "#ffba24");
    }

    #[test]
    fn test_resize_and_surface_loaded() {
        let range = HeightRange { min: -2.0, max: 8.0 };
        let scene = SceneState::default().apply_all([
            SceneEvent::Resize { width: 1000, height: 500 },
            SceneEvent::SurfaceLoaded {
                height_range: range,
                height_axis: HeightAxis::Z,
                bounds_min: Point3::new(-1.0, -1.0, -1.0),
                bounds_max: Point3::new(1.0, 1.0, 1.0),
            },
        ]);

        assert_eq!(scene.camera.aspect_ratio, 2.0);
        assert_eq!(scene.height_range, range);
        assert_eq!(scene.height_axis, HeightAxis::Z);
        assert_eq!(scene.camera.target, Point3::origin());
    }

    #[test]
    fn test_light_direction() {
        let scene = SceneState::default();
        assert_relative_eq!(
            scene.light_direction(),
            -Vector3::new(1.0, 1.0, 1.0).normalize(),
            epsilon = 1e-6
        );
    }
}
