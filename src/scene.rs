//! The set of meshes rendered together.
//!
//! A [`Scene`] is a collection of independently transformed [`Mesh`] instances,
//! addressable by insertion index or by name.

use std::collections::HashMap;
use std::path::Path;

use crate::error::LoadError;
use crate::mesh::Mesh;

#[derive(Clone, Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    mesh_names: HashMap<String, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a scene from an OBJ file.
    ///
    /// All objects/groups in the OBJ file become separate meshes.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut scene = Self::new();
        for mesh in Mesh::load_all_from_obj(path)? {
            scene.add_mesh(mesh);
        }
        Ok(scene)
    }

    /// Add a mesh and return its index.
    ///
    /// If a mesh with the same name already exists, the name now refers to the
    /// new mesh; the old one stays reachable by index.
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        let index = self.meshes.len();
        self.mesh_names.insert(mesh.name().to_string(), index);
        self.meshes.push(mesh);
        index
    }

    /// Get a mesh by name.
    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.mesh_names.get(name).map(|&i| &self.meshes[i])
    }

    /// Get a mutable reference to a mesh by name.
    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut Mesh> {
        self.mesh_names
            .get(name)
            .copied()
            .map(move |i| &mut self.meshes[i])
    }

    pub fn mesh_by_index(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn mesh_by_index_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.meshes.get_mut(index)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Total face count across all meshes.
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|m| m.faces().len()).sum()
    }
}
