//! Triangle meshes in model space.
//!
//! A [`Mesh`] owns its vertices and faces plus a [`Transform`] placing it in
//! the world. Faces are validated against the vertex list on construction, so
//! the pipeline can index vertices without re-checking.

use std::path::Path;
use std::rc::Rc;

use log::info;

use crate::colors;
use crate::error::LoadError;
use crate::math::{Vec2, Vec3};
use crate::texture::Texture;
use crate::transform::Transform;

/// A triangle referencing three mesh vertices by zero-based index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    /// Texture coordinates for `a`, `b` and `c`, top-left origin.
    pub uvs: [Vec2; 3],
    /// Flat base color, packed ARGB8888.
    pub color: u32,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            a,
            b,
            c,
            uvs: [Vec2::ZERO; 3],
            color: colors::FILL,
        }
    }

    pub fn with_uvs(mut self, uvs: [Vec2; 3]) -> Self {
        self.uvs = uvs;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

// Each side is two faces; the first covers the upper-left half of the side's
// texture and the second the lower-right half.
const CUBE_FACES: [[usize; 3]; 12] = [
    // front
    [0, 1, 2],
    [0, 2, 3],
    // right
    [3, 2, 4],
    [3, 4, 5],
    // back
    [5, 4, 6],
    [5, 6, 7],
    // left
    [7, 6, 1],
    [7, 1, 0],
    // top
    [1, 6, 4],
    [1, 4, 2],
    // bottom
    [5, 7, 0],
    [5, 0, 3],
];

const CUBE_UVS: [[Vec2; 3]; 2] = [
    [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
    [Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
];

/// A triangle mesh with its own world transform and optional texture.
#[derive(Clone, Debug)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    transform: Transform,
    texture: Option<Rc<Texture>>,
}

impl Mesh {
    /// Creates a mesh, rejecting any face that references a missing vertex.
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, LoadError> {
        let vertex_count = vertices.len();
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= vertex_count) {
                return Err(LoadError::VertexIndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            name: name.into(),
            vertices,
            faces,
            transform: Transform::default(),
            texture: None,
        })
    }

    /// The built-in 2x2x2 cube centred on the origin, 8 vertices and 12 faces.
    pub fn cube() -> Self {
        let faces = CUBE_FACES
            .iter()
            .enumerate()
            .map(|(i, &[a, b, c])| Face::new(a, b, c).with_uvs(CUBE_UVS[i % 2]))
            .collect();

        Self {
            name: "cube".to_string(),
            vertices: CUBE_VERTICES.to_vec(),
            faces,
            transform: Transform::default(),
            texture: None,
        }
    }

    /// Load every object in an OBJ file as a single mesh.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string());

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for model in load_obj_models(path)? {
            let offset = vertices.len();
            let (model_vertices, model_faces) = convert_obj_mesh(&model.mesh);
            vertices.extend(model_vertices);
            faces.extend(model_faces.into_iter().map(|mut f: Face| {
                f.a += offset;
                f.b += offset;
                f.c += offset;
                f
            }));
        }

        let mesh = Self::new(name, vertices, faces)?;
        info!(
            "Loaded mesh {} ({} vertices, {} faces)",
            mesh.name,
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Load each object or group in an OBJ file as its own mesh.
    pub fn load_all_from_obj(path: impl AsRef<Path>) -> Result<Vec<Self>, LoadError> {
        let path = path.as_ref();
        load_obj_models(path)?
            .iter()
            .map(|model| {
                let (vertices, faces) = convert_obj_mesh(&model.mesh);
                let mesh = Self::new(model.name.clone(), vertices, faces)?;
                info!(
                    "Loaded mesh {} from {} ({} vertices, {} faces)",
                    mesh.name,
                    path.display(),
                    mesh.vertices.len(),
                    mesh.faces.len()
                );
                Ok(mesh)
            })
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Recolors every face.
    pub fn set_color(&mut self, color: u32) {
        for face in &mut self.faces {
            face.color = color;
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn texture(&self) -> Option<&Rc<Texture>> {
        self.texture.as_ref()
    }

    /// Share `texture` with this mesh. Several meshes may hold the same texture.
    pub fn set_texture(&mut self, texture: Rc<Texture>) {
        self.texture = Some(texture);
    }

    pub fn clear_texture(&mut self) {
        self.texture = None;
    }
}

fn load_obj_models(path: &Path) -> Result<Vec<tobj::Model>, LoadError> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ..Default::default()
        },
    )?;
    Ok(models)
}

/// Converts tobj's flat arrays into vertices and faces.
///
/// OBJ texture coordinates have a bottom-left origin; V is flipped here so
/// faces carry top-left UVs. Faces without texture coordinates get zero UVs.
fn convert_obj_mesh(mesh: &tobj::Mesh) -> (Vec<Vec3>, Vec<Face>) {
    let vertices = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();

    let uv_at = |index: u32| -> Vec2 {
        let i = index as usize * 2;
        match mesh.texcoords.get(i..i + 2) {
            Some(t) => Vec2::new(t[0], 1.0 - t[1]),
            None => Vec2::ZERO,
        }
    };

    let faces = mesh
        .indices
        .chunks_exact(3)
        .enumerate()
        .map(|(i, idx)| {
            let mut face = Face::new(idx[0] as usize, idx[1] as usize, idx[2] as usize);
            if let Some(t) = mesh.texcoord_indices.get(i * 3..i * 3 + 3) {
                face.uvs = [uv_at(t[0]), uv_at(t[1]), uv_at(t[2])];
            }
            face
        })
        .collect();

    (vertices, faces)
}
