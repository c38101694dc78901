//! Vertex welding
//!
//! Collapses vertices whose attributes land in the same quantization bucket
//! into a single vertex and rewrites the triangle list to reference it.
//!
//! The tolerance is converted into a decimal multiplier
//! (`10^log10(1 / tolerance)`) and every attribute component is mapped to
//! `trunc(value * multiplier + tolerance * multiplier / 2)`. Truncation is
//! toward zero, so buckets are not symmetric around zero and two values
//! closer than the tolerance can still land in neighbouring buckets; such
//! vertices are not merged.

use crate::attribute::{VertexAttribute, VertexAttributeSet};
use crate::mesh::IndexedMesh;
use std::collections::HashMap;
use tracing::debug;

/// Tolerance used when callers have no preference
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Maps attribute components to integer hash buckets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    tolerance: f64,
    multiplier: f64,
    additive: f64,
}

impl Quantizer {
    /// Create a quantizer; tolerances below `f64::EPSILON` (including zero,
    /// negative and NaN values) are raised to `f64::EPSILON`.
    pub fn new(tolerance: f64) -> Self {
        let tolerance = tolerance.max(f64::EPSILON);
        let exponent = (1.0 / tolerance).log10();
        let multiplier = 10f64.powf(exponent);
        let additive = tolerance * 0.5 * multiplier;

        Self {
            tolerance,
            multiplier,
            additive,
        }
    }

    /// The effective tolerance after clamping
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Scale applied to each component before truncation
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Bucket of a single component.
    ///
    /// Values outside the `i64` range saturate; NaN maps to 0.
    pub fn quantize(&self, value: f32) -> i64 {
        (value as f64 * self.multiplier + self.additive).trunc() as i64
    }

    /// Composite key of vertex `index`, written into `key`
    fn vertex_key(&self, attributes: &[(String, VertexAttribute)], index: usize, key: &mut Vec<i64>) {
        key.clear();
        for (_, attribute) in attributes {
            key.extend(attribute.item(index).iter().map(|&v| self.quantize(v)));
        }
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

/// Weld vertices of `mesh` that share a quantization bucket in every
/// attribute component.
///
/// The triangle list is walked in order (the index buffer, or `0..n` for a
/// soup). The first vertex to produce a key is copied into the next output
/// slot with all of its attributes and morph targets; later vertices with
/// the same key reuse that slot. The result always carries an index buffer
/// with one entry per input entry.
///
/// Caller precondition: every attribute holds the same number of vertices
/// and every index is in range. [`VertexAttributeSet::insert`] and
/// [`IndexedMesh::from_parts`] check this on construction, but the mesh
/// fields are public; run [`IndexedMesh::validate`] on meshes edited in
/// place or deserialized. The welder panics on an out-of-range index.
pub fn merge_vertices(mesh: &IndexedMesh, tolerance: f64) -> IndexedMesh {
    let quantizer = Quantizer::new(tolerance);
    let source = mesh.attributes.attribute_slice();
    let source_morphs = mesh.attributes.morph_slice();
    let element_count = mesh.element_count();

    // Allocate for the worst case (nothing merges) and trim afterwards
    let mut attributes: Vec<(String, VertexAttribute)> = source
        .iter()
        .map(|(name, attr)| {
            (
                name.clone(),
                VertexAttribute::zeroed(attr.count(), attr.item_size(), attr.normalized()),
            )
        })
        .collect();
    let mut morph_attributes: Vec<(String, Vec<VertexAttribute>)> = source_morphs
        .iter()
        .map(|(name, targets)| {
            let targets = targets
                .iter()
                .map(|t| VertexAttribute::zeroed(t.count(), t.item_size(), t.normalized()))
                .collect();
            (name.clone(), targets)
        })
        .collect();

    let key_len: usize = source.iter().map(|(_, attr)| attr.item_size()).sum();
    let mut key = Vec::with_capacity(key_len);
    let mut key_to_index: HashMap<Vec<i64>, usize> = HashMap::new();
    let mut indices = Vec::with_capacity(element_count);
    let mut next_index = 0;

    for i in 0..element_count {
        let index = mesh.vertex_index(i);
        quantizer.vertex_key(source, index, &mut key);

        if let Some(&existing) = key_to_index.get(key.as_slice()) {
            indices.push(existing);
            continue;
        }

        for ((_, src), (_, dst)) in source.iter().zip(attributes.iter_mut()) {
            dst.set_item(next_index, src.item(index));
        }
        for ((_, src_targets), (_, dst_targets)) in source_morphs.iter().zip(morph_attributes.iter_mut()) {
            for (src, dst) in src_targets.iter().zip(dst_targets.iter_mut()) {
                dst.set_item(next_index, src.item(index));
            }
        }

        key_to_index.insert(key.clone(), next_index);
        indices.push(next_index);
        next_index += 1;
    }

    for (_, attribute) in &mut attributes {
        attribute.truncate(next_index);
    }
    for (_, targets) in &mut morph_attributes {
        for target in targets {
            target.truncate(next_index);
        }
    }

    debug!(
        "Welded {} vertices into {} (tolerance = {:e})",
        mesh.vertex_count(),
        next_index,
        quantizer.tolerance()
    );

    IndexedMesh {
        attributes: VertexAttributeSet::from_parts(attributes, morph_attributes),
        indices: Some(indices),
    }
}

impl IndexedMesh {
    /// Weld this mesh, see [`merge_vertices`]
    pub fn merge_vertices(&self, tolerance: f64) -> IndexedMesh {
        merge_vertices(self, tolerance)
    }
}
