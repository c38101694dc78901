//! Surface shader template
//!
//! The WGSL source is assembled from one fixed template with named slots.
//! Each [`ShadingMode`] fills the slots with its own chunks, so both modes
//! share the lighting code. Bump [`SHADER_TEMPLATE_VERSION`] whenever the
//! template or a chunk changes; it is part of the pipeline cache key.

use crate::scene::SceneState;
use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use surfview_core::{Error, Result};

pub const SHADER_TEMPLATE_VERSION: u32 = 2;

/// How the surface is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// Color from the height gradient texture
    #[default]
    Gradient,
    /// Single material color
    Plain,
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Gradient => f.write_str("gradient"),
            ShadingMode::Plain => f.write_str("plain"),
        }
    }
}

impl std::str::FromStr for ShadingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gradient" => Ok(ShadingMode::Gradient),
            "plain" => Ok(ShadingMode::Plain),
            other => Err(Error::InvalidData(format!(
                "Unknown shading mode '{}', expected gradient or plain",
                other
            ))),
        }
    }
}

/// Insertion points in [`SURFACE_SHADER_TEMPLATE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderSlot {
    /// Extra resource bindings
    Bindings,
    /// Vertex stage, may write `out.height`
    VertexHeight,
    /// Fragment stage, may overwrite `diffuse_color`
    FragmentColor,
}

impl ShaderSlot {
    pub const ALL: [ShaderSlot; 3] = [ShaderSlot::Bindings, ShaderSlot::VertexHeight, ShaderSlot::FragmentColor];

    pub fn name(&self) -> &'static str {
        match self {
            ShaderSlot::Bindings => "bindings",
            ShaderSlot::VertexHeight => "vertex_height",
            ShaderSlot::FragmentColor => "fragment_color",
        }
    }

    /// Marker line replaced by the slot's chunk
    pub fn marker(&self) -> String {
        format!("// @slot({})", self.name())
    }
}

/// WGSL surface shader with slot markers
pub const SURFACE_SHADER_TEMPLATE: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    camera_position: vec3<f32>,
    shininess: f32,
    light_direction: vec3<f32>,
    light_intensity: f32,
    base_color: vec3<f32>,
    h_min: f32,
    ambient_color: vec3<f32>,
    h_max: f32,
    emissive: vec3<f32>,
    double_sided: f32,
    specular: vec3<f32>,
    height_axis: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
// @slot(bindings)

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) height: f32,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = uniforms.model * vec4<f32>(in.position, 1.0);
    out.clip_position = uniforms.view_proj * world;
    out.world_position = world.xyz;
    out.normal = (uniforms.model * vec4<f32>(in.normal, 0.0)).xyz;
    out.height = 0.0;
    // @slot(vertex_height)
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front_facing: bool) -> @location(0) vec4<f32> {
    var diffuse_color = uniforms.base_color;
    // @slot(fragment_color)

    var normal = normalize(in.normal);
    if (!front_facing && uniforms.double_sided > 0.5) {
        normal = -normal;
    }

    let to_light = -normalize(uniforms.light_direction);
    let to_camera = normalize(uniforms.camera_position - in.world_position);
    let half_dir = normalize(to_light + to_camera);

    let diffuse = max(dot(normal, to_light), 0.0) * uniforms.light_intensity;
    let specular = pow(max(dot(normal, half_dir), 0.0), max(uniforms.shininess, 1e-4)) * uniforms.light_intensity;

    let color = diffuse_color * (uniforms.ambient_color + vec3<f32>(diffuse))
        + uniforms.specular * specular
        + uniforms.emissive;
    return vec4<f32>(color, 1.0);
}
"#;

const GRADIENT_BINDINGS: &str = r#"@group(0) @binding(1) var color_map: texture_2d<f32>;
@group(0) @binding(2) var color_map_sampler: sampler;"#;

// Height is taken before the model offset is applied
const GRADIENT_VERTEX_HEIGHT: &str = "out.height = in.position[u32(uniforms.height_axis)];";

const GRADIENT_FRAGMENT_COLOR: &str = r#"let h_span = uniforms.h_max - uniforms.h_min;
    var h_ratio = 0.0;
    if (h_span > 0.0) {
        h_ratio = clamp(1.0 - (in.height - uniforms.h_min) / h_span, 0.0, 1.0);
    }
    diffuse_color = textureSample(color_map, color_map_sampler, vec2<f32>(0.5, 1.0 - h_ratio)).rgb;"#;

/// Chunk a mode puts into a slot
pub fn chunk(mode: ShadingMode, slot: ShaderSlot) -> &'static str {
    match (mode, slot) {
        (ShadingMode::Gradient, ShaderSlot::Bindings) => GRADIENT_BINDINGS,
        (ShadingMode::Gradient, ShaderSlot::VertexHeight) => GRADIENT_VERTEX_HEIGHT,
        (ShadingMode::Gradient, ShaderSlot::FragmentColor) => GRADIENT_FRAGMENT_COLOR,
        (ShadingMode::Plain, _) => "",
    }
}

/// Full WGSL source for a shading mode
pub fn compose_shader(mode: ShadingMode) -> String {
    let mut source = format!(
        "// surfview surface shader v{} ({})\n",
        SHADER_TEMPLATE_VERSION, mode
    );
    let mut body = SURFACE_SHADER_TEMPLATE.to_string();
    for slot in ShaderSlot::ALL {
        body = body.replace(&slot.marker(), chunk(mode, slot));
    }
    source.push_str(body.trim_start());
    source
}

/// Identifies a compiled pipeline; changes with the template version
pub fn shader_cache_key(mode: ShadingMode) -> String {
    format!("surface-v{}-{}", SHADER_TEMPLATE_VERSION, mode)
}

/// Uniform block matching `Uniforms` in the template
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SurfaceUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub shininess: f32,
    pub light_direction: [f32; 3],
    pub light_intensity: f32,
    pub base_color: [f32; 3],
    pub h_min: f32,
    pub ambient_color: [f32; 3],
    pub h_max: f32,
    pub emissive: [f32; 3],
    pub double_sided: f32,
    pub specular: [f32; 3],
    /// Component of the vertex position read as height: 0, 1 or 2
    pub height_axis: f32,
}

impl SurfaceUniforms {
    /// Build the uniform block for a scene; `offset` translates the mesh
    pub fn from_scene(scene: &SceneState, offset: Vector3<f32>) -> Self {
        let model = Matrix4::new_translation(&offset);
        let (h_min, h_max) = if scene.height_range.is_empty() {
            (0.0, 0.0)
        } else {
            (scene.height_range.min as f32, scene.height_range.max as f32)
        };

        Self {
            view_proj: scene.camera.view_projection_matrix().into(),
            model: model.into(),
            camera_position: scene.camera.position.coords.into(),
            shininess: scene.material.shininess,
            light_direction: scene.light_direction().into(),
            light_intensity: scene.light.intensity,
            base_color: scene.material_color.to_f32(),
            h_min,
            ambient_color: scene.ambient.to_f32(),
            h_max,
            emissive: scene.material.emissive.to_f32(),
            double_sided: if scene.material.double_sided { 1.0 } else { 0.0 },
            specular: scene.material.specular.to_f32(),
            height_axis: scene.height_axis.index() as f32,
        }
    }
}
