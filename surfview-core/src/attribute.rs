//! Named per-vertex attribute storage
//!
//! A [`VertexAttribute`] is a flat array of `f32` components grouped into
//! items of 1 to 4 components each. A [`VertexAttributeSet`] keeps named
//! attributes in declaration order, together with optional morph targets
//! (alternate states of an attribute, one array per target).

use crate::error::{Error, Result};
use crate::point::{Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// Largest number of components a single vertex item can carry
pub const MAX_ITEM_SIZE: usize = 4;

/// Name of the position attribute
pub const POSITION: &str = "position";

/// Name of the normal attribute
pub const NORMAL: &str = "normal";

/// Name of the per-vertex color attribute
pub const COLOR: &str = "color";

/// A flat array of per-vertex components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexAttribute {
    array: Vec<f32>,
    item_size: usize,
    normalized: bool,
}

impl VertexAttribute {
    /// Create an attribute from a flat component array
    pub fn new(array: Vec<f32>, item_size: usize) -> Result<Self> {
        if item_size == 0 || item_size > MAX_ITEM_SIZE {
            return Err(Error::InvalidData(format!(
                "Attribute item size must be between 1 and {}, got {}",
                MAX_ITEM_SIZE, item_size
            )));
        }
        if array.len() % item_size != 0 {
            return Err(Error::InvalidData(format!(
                "Attribute array length {} is not a multiple of item size {}",
                array.len(),
                item_size
            )));
        }

        Ok(Self {
            array,
            item_size,
            normalized: false,
        })
    }

    /// Create a zero-filled attribute holding `count` items
    pub(crate) fn zeroed(count: usize, item_size: usize, normalized: bool) -> Self {
        Self {
            array: vec![0.0; count * item_size],
            item_size,
            normalized,
        }
    }

    /// Create a 3-component attribute from points
    pub fn from_points(points: &[Point3f]) -> Self {
        Self {
            array: points.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
            item_size: 3,
            normalized: false,
        }
    }

    /// Create a 3-component attribute from vectors
    pub fn from_vectors(vectors: &[Vector3f]) -> Self {
        Self {
            array: vectors.iter().flat_map(|v| [v.x, v.y, v.z]).collect(),
            item_size: 3,
            normalized: false,
        }
    }

    /// Mark the attribute as holding normalized data
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Number of components per vertex
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Whether the data is flagged as normalized
    pub fn normalized(&self) -> bool {
        self.normalized
    }

    /// Number of vertices stored
    pub fn count(&self) -> usize {
        self.array.len() / self.item_size
    }

    /// Check whether the attribute stores no vertices
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// The raw component array
    pub fn array(&self) -> &[f32] {
        &self.array
    }

    /// Components of the vertex at `index`
    pub fn item(&self, index: usize) -> &[f32] {
        let start = index * self.item_size;
        &self.array[start..start + self.item_size]
    }

    /// Overwrite the components of the vertex at `index`
    pub fn set_item(&mut self, index: usize, values: &[f32]) {
        let start = index * self.item_size;
        self.array[start..start + self.item_size].copy_from_slice(values);
    }

    /// Read item `index` as a point, for 3-component attributes
    pub fn point(&self, index: usize) -> Point3f {
        let item = self.item(index);
        Point3f::new(
            item[0],
            item.get(1).copied().unwrap_or(0.0),
            item.get(2).copied().unwrap_or(0.0),
        )
    }

    /// Keep only the first `count` vertices
    pub fn truncate(&mut self, count: usize) {
        self.array.truncate(count * self.item_size);
        self.array.shrink_to_fit();
    }
}

/// Ordered collection of named vertex attributes sharing one vertex count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexAttributeSet {
    attributes: Vec<(String, VertexAttribute)>,
    morph_attributes: Vec<(String, Vec<VertexAttribute>)>,
}

impl VertexAttributeSet {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a named attribute.
    ///
    /// A replaced attribute keeps its position in declaration order. The
    /// vertex count must match every other attribute in the set.
    pub fn insert(&mut self, name: impl Into<String>, attribute: VertexAttribute) -> Result<()> {
        let name = name.into();

        let expected = self
            .attributes
            .iter()
            .find(|(existing, _)| *existing != name)
            .map(|(_, attr)| attr.count());
        if let Some(expected) = expected {
            if attribute.count() != expected {
                return Err(Error::InvalidData(format!(
                    "Attribute '{}' has {} vertices, expected {}",
                    name,
                    attribute.count(),
                    expected
                )));
            }
        }

        if let Some(targets) = self.morph_targets(&name) {
            let mismatched = targets.iter().any(|target| {
                target.item_size() != attribute.item_size() || target.count() != attribute.count()
            });
            if mismatched {
                return Err(Error::InvalidData(format!(
                    "Attribute '{}' does not match the shape of its morph targets",
                    name
                )));
            }
        }

        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = attribute,
            None => self.attributes.push((name, attribute)),
        }
        Ok(())
    }

    /// Attach morph targets to an existing attribute
    pub fn insert_morph_targets(
        &mut self,
        name: impl Into<String>,
        targets: Vec<VertexAttribute>,
    ) -> Result<()> {
        let name = name.into();
        let base = self.get(&name).ok_or_else(|| {
            Error::InvalidData(format!("No attribute '{}' to attach morph targets to", name))
        })?;

        for (i, target) in targets.iter().enumerate() {
            if target.item_size() != base.item_size() || target.count() != base.count() {
                return Err(Error::InvalidData(format!(
                    "Morph target {} of '{}' has {}x{} components, expected {}x{}",
                    i,
                    name,
                    target.count(),
                    target.item_size(),
                    base.count(),
                    base.item_size()
                )));
            }
        }

        match self.morph_attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = targets,
            None => self.morph_attributes.push((name, targets)),
        }
        Ok(())
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, attr)| attr)
    }

    /// Morph targets attached to an attribute, if any
    pub fn morph_targets(&self, name: &str) -> Option<&[VertexAttribute]> {
        self.morph_attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, targets)| targets.as_slice())
    }

    /// Remove an attribute together with its morph targets
    pub fn remove(&mut self, name: &str) -> Option<VertexAttribute> {
        self.morph_attributes.retain(|(existing, _)| existing != name);
        let position = self.attributes.iter().position(|(existing, _)| existing == name)?;
        Some(self.attributes.remove(position).1)
    }

    /// Check whether an attribute exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attribute names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(name, _)| name.as_str())
    }

    /// Attributes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VertexAttribute)> {
        self.attributes.iter().map(|(name, attr)| (name.as_str(), attr))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check whether the set has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Shared vertex count, zero for an empty set
    pub fn vertex_count(&self) -> usize {
        self.attributes.first().map(|(_, attr)| attr.count()).unwrap_or(0)
    }

    pub(crate) fn attribute_slice(&self) -> &[(String, VertexAttribute)] {
        &self.attributes
    }

    pub(crate) fn morph_slice(&self) -> &[(String, Vec<VertexAttribute>)] {
        &self.morph_attributes
    }

    pub(crate) fn from_parts(
        attributes: Vec<(String, VertexAttribute)>,
        morph_attributes: Vec<(String, Vec<VertexAttribute>)>,
    ) -> Self {
        Self {
            attributes,
            morph_attributes,
        }
    }
}
