//! Bounded convex polygon used as the working set of the frustum clipper.

use crate::error::ClipError;
use crate::math::{Vec2, Vec3};

use super::frustum::FrustumPlane;

/// Upper bound on polygon vertices during clipping.
///
/// A triangle clipped by six planes gains at most one vertex per plane, so nine
/// is the worst case; one slot of headroom absorbs floating point noise.
pub const MAX_POLYGON_VERTICES: usize = 10;

/// A vertex with all attributes needed for clipping interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonVertex {
    /// Camera-space position.
    pub position: Vec3,
    pub uv: Vec2,
}

impl PolygonVertex {
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }

    /// Linearly interpolate every attribute by the same `t`.
    /// Used when a polygon edge crosses a clipping plane.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

/// A convex polygon in insertion order, never holding more than
/// [`MAX_POLYGON_VERTICES`] vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<PolygonVertex>,
}

impl Polygon {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(MAX_POLYGON_VERTICES),
        }
    }

    /// Create a polygon from a triangle (3 vertices).
    pub fn from_triangle(v0: PolygonVertex, v1: PolygonVertex, v2: PolygonVertex) -> Self {
        let mut vertices = Vec::with_capacity(MAX_POLYGON_VERTICES);
        vertices.extend([v0, v1, v2]);
        Self { vertices }
    }

    pub fn vertices(&self) -> &[PolygonVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if too few vertices remain to form a triangle.
    pub fn is_clipped_away(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Appends a vertex, failing instead of growing past the cap.
    pub fn push(&mut self, vertex: PolygonVertex) -> Result<(), ClipError> {
        if self.vertices.len() >= MAX_POLYGON_VERTICES {
            return Err(ClipError::PolygonOverflow {
                capacity: MAX_POLYGON_VERTICES,
            });
        }
        self.vertices.push(vertex);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Intersects this polygon with the inside half-space of `plane`.
    ///
    /// Walks the vertex cycle once, starting with the last vertex as
    /// `previous`. An edge whose endpoints have opposite signed distances emits
    /// the crossing point; a current vertex inside or on the plane is emitted
    /// as is. The result keeps the input's winding.
    pub fn clip_against_plane(&self, plane: &FrustumPlane) -> Result<Polygon, ClipError> {
        let mut output = Polygon::new();
        let Some(last) = self.vertices.last() else {
            return Ok(output);
        };

        let mut previous = last;
        let mut previous_distance = plane.signed_distance(previous.position);

        for current in &self.vertices {
            let current_distance = plane.signed_distance(current.position);

            if previous_distance * current_distance < 0.0 {
                let t = previous_distance / (previous_distance - current_distance);
                output.push(previous.lerp(current, t))?;
            }

            if current_distance >= 0.0 {
                output.push(*current)?;
            }

            previous = current;
            previous_distance = current_distance;
        }

        Ok(output)
    }

    /// Triangulate this convex polygon using fan triangulation.
    ///
    /// Yields `n - 2` triangles `(v0, v[i+1], v[i+2])`, or nothing when fewer
    /// than three vertices remain.
    pub fn triangulate(&self) -> impl Iterator<Item = [PolygonVertex; 3]> + '_ {
        (1..self.vertices.len().saturating_sub(1))
            .map(move |i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32) -> PolygonVertex {
        PolygonVertex::new(Vec3::new(x, y, 1.0), Vec2::new(x, y))
    }

    #[test]
    fn fan_triangulation_pairs_first_vertex_with_each_edge() {
        let mut polygon = Polygon::new();
        for i in 0..5 {
            polygon.push(vertex(i as f32, 0.0)).unwrap();
        }

        let triangles: Vec<_> = polygon.triangulate().collect();
        assert_eq!(triangles.len(), 3);
        assert_eq!(triangles[0], [vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(2.0, 0.0)]);
        assert_eq!(triangles[1], [vertex(0.0, 0.0), vertex(2.0, 0.0), vertex(3.0, 0.0)]);
        assert_eq!(triangles[2], [vertex(0.0, 0.0), vertex(3.0, 0.0), vertex(4.0, 0.0)]);
    }

    #[test]
    fn fewer_than_three_vertices_yield_no_triangles() {
        let mut polygon = Polygon::new();
        assert_eq!(polygon.triangulate().count(), 0);
        polygon.push(vertex(0.0, 0.0)).unwrap();
        polygon.push(vertex(1.0, 0.0)).unwrap();
        assert!(polygon.is_clipped_away());
        assert_eq!(polygon.triangulate().count(), 0);
    }

    #[test]
    fn push_past_capacity_is_an_error() {
        let mut polygon = Polygon::new();
        for i in 0..MAX_POLYGON_VERTICES {
            polygon.push(vertex(i as f32, 0.0)).unwrap();
        }
        assert_eq!(
            polygon.push(vertex(0.0, 1.0)),
            Err(ClipError::PolygonOverflow {
                capacity: MAX_POLYGON_VERTICES
            })
        );
        assert_eq!(polygon.len(), MAX_POLYGON_VERTICES);
    }

    #[test]
    fn lerp_interpolates_uv_with_position() {
        let a = PolygonVertex::new(Vec3::new(0.0, 0.0, 0.0), Vec2::new(0.0, 1.0));
        let b = PolygonVertex::new(Vec3::new(4.0, 0.0, 0.0), Vec2::new(1.0, 0.0));
        let mid = a.lerp(&b, 0.25);
        assert_eq!(mid.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mid.uv, Vec2::new(0.25, 0.75));
    }

    #[test]
    fn vertex_on_the_plane_is_kept_once() {
        let near = FrustumPlane::new(Vec3::new(0.0, 0.0, 0.1), Vec3::FORWARD);
        let on_plane = PolygonVertex::new(Vec3::new(0.0, 0.0, 0.1), Vec2::new(0.0, 0.0));
        let behind = PolygonVertex::new(Vec3::new(1.0, 0.0, -1.0), Vec2::new(1.0, 0.0));
        let ahead = PolygonVertex::new(Vec3::new(0.0, 1.0, 2.0), Vec2::new(0.0, 1.0));

        let clipped = Polygon::from_triangle(on_plane, behind, ahead)
            .clip_against_plane(&near)
            .unwrap();

        // The on-plane vertex, the crossing on edge behind -> ahead, then ahead.
        assert_eq!(clipped.len(), 3);
        let vertices = clipped.vertices();
        assert_eq!(vertices[0], on_plane);
        assert_eq!(vertices[2], ahead);
        assert_eq!(vertices.iter().filter(|v| v.position == on_plane.position).count(), 1);

        let crossing = vertices[1];
        assert!((crossing.position.z - 0.1).abs() < 1e-6);
        assert!((crossing.position - on_plane.position).length() > 0.1);
    }
}
