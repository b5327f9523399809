//! Geometry stage: model space to render-ready screen triangles.
//!
//! For every face of every mesh the [`FramePipeline`] transforms the vertices
//! into camera space, computes the face normal, back-face culls, clips against
//! the view frustum, fan-triangulates, projects, maps to the screen and applies
//! flat lighting. Faces are independent; a face that cannot be processed is
//! skipped and counted in [`FrameStats`], never fatal.

use log::trace;

use crate::clipper::{Frustum, Polygon, PolygonVertex};
use crate::colors;
use crate::light::DirectionalLight;
use crate::math::vec3::NORMALIZE_EPSILON;
use crate::math::{Mat4, Vec3, Vec4};
use crate::mesh::Mesh;
use crate::render::Triangle;
use crate::stats::FrameStats;

/// Unit normal of the triangle `(v0, v1, v2)`, or `None` if it is degenerate.
///
/// The normal is `(v1 - v0) x (v2 - v0)`, which in the left-handed system
/// points toward a viewer that sees the vertices clockwise.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Vec3> {
    let normal = (v1 - v0).cross(v2 - v0);
    if normal.length() <= NORMALIZE_EPSILON {
        return None;
    }
    Some(normal.normalize())
}

/// True if a face with `normal` through camera-space `v0` faces away from the
/// camera at the origin.
pub fn is_back_face(normal: Vec3, v0: Vec3) -> bool {
    let camera_ray = Vec3::ZERO - v0;
    normal.dot(camera_ray) < 0.0
}

/// Maps an NDC position to pixel coordinates, keeping NDC z and w.
///
/// `x = ndc.x * width/2 + width/2` and `y = -ndc.y * height/2 + height/2`, so
/// +y in NDC is up on screen.
pub fn ndc_to_screen(ndc: Vec4, width: u32, height: u32) -> Vec4 {
    let half_width = width as f32 / 2.0;
    let half_height = height as f32 / 2.0;
    Vec4::new(
        ndc.x * half_width + half_width,
        -ndc.y * half_height + half_height,
        ndc.z,
        ndc.w,
    )
}

/// Everything shared by all faces of one frame.
#[derive(Debug, Clone)]
pub struct FramePipeline<'a> {
    pub view: Mat4,
    pub projection: Mat4,
    pub frustum: &'a Frustum,
    pub light: &'a DirectionalLight,
    pub width: u32,
    pub height: u32,
    pub backface_culling: bool,
    pub max_triangles: usize,
}

impl FramePipeline<'_> {
    /// Appends the visible triangles of `mesh` to `triangles`.
    ///
    /// Stops adding once `triangles` holds `max_triangles`; later triangles are
    /// counted as dropped.
    pub fn process_mesh(&self, mesh: &Mesh, triangles: &mut Vec<Triangle>, stats: &mut FrameStats) {
        stats.meshes += 1;

        let model_view = self.view * mesh.transform().to_matrix();
        let camera_vertices: Vec<Vec3> = mesh
            .vertices()
            .iter()
            .map(|&v| (model_view * Vec4::from(v)).to_vec3())
            .collect();

        for (face_index, face) in mesh.faces().iter().enumerate() {
            stats.faces += 1;

            // Indices were validated when the mesh was built.
            let [v0, v1, v2] = face.indices().map(|i| camera_vertices[i]);

            let Some(normal) = face_normal(v0, v1, v2) else {
                trace!("{}: face {} is degenerate", mesh.name(), face_index);
                stats.degenerate += 1;
                continue;
            };

            if self.backface_culling && is_back_face(normal, v0) {
                stats.culled += 1;
                continue;
            }

            let polygon = Polygon::from_triangle(
                PolygonVertex::new(v0, face.uvs[0]),
                PolygonVertex::new(v1, face.uvs[1]),
                PolygonVertex::new(v2, face.uvs[2]),
            );
            let clipped = match self.frustum.clip_polygon(polygon.clone()) {
                Ok(clipped) => clipped,
                Err(err) => {
                    trace!("{}: face {} skipped: {}", mesh.name(), face_index, err);
                    stats.clip_overflows += 1;
                    continue;
                }
            };
            if clipped.is_empty() {
                stats.clipped_away += 1;
                continue;
            }
            if clipped != polygon {
                stats.clipped += 1;
            }

            let intensity = self.light.intensity(normal);
            let color = colors::apply_intensity(face.color, intensity);

            for [a, b, c] in clipped.triangulate() {
                let projected = [a, b, c].map(|v| self.projection.project(Vec4::from(v.position)));
                let [Some(pa), Some(pb), Some(pc)] = projected else {
                    trace!("{}: face {} has a vertex at w = 0", mesh.name(), face_index);
                    stats.rejected += 1;
                    continue;
                };

                if triangles.len() >= self.max_triangles {
                    stats.dropped += 1;
                    continue;
                }

                let points = [pa, pb, pc].map(|p| ndc_to_screen(p, self.width, self.height));
                triangles.push(
                    Triangle::new(points, [a.uv, b.uv, c.uv], color, intensity)
                        .with_texture(mesh.texture().cloned()),
                );
                stats.triangles += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;
    use crate::projection::Projection;
    use approx::assert_relative_eq;

    fn triangle_mesh(vertices: [Vec3; 3]) -> Mesh {
        Mesh::new("tri", vertices.to_vec(), vec![Face::new(0, 1, 2)]).unwrap()
    }

    fn run(mesh: &Mesh, culling: bool, max_triangles: usize) -> (Vec<Triangle>, FrameStats) {
        let projection = Projection::from_degrees(60.0, 1.0, 0.1, 100.0).unwrap();
        let frustum = projection.frustum();
        let light = DirectionalLight::new(Vec3::FORWARD);
        let pipeline = FramePipeline {
            view: Mat4::look_at_lh(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::UP),
            projection: projection.matrix(),
            frustum: &frustum,
            light: &light,
            width: 100,
            height: 100,
            backface_culling: culling,
            max_triangles,
        };
        let mut triangles = Vec::new();
        let mut stats = FrameStats::default();
        pipeline.process_mesh(mesh, &mut triangles, &mut stats);
        (triangles, stats)
    }

    #[test]
    fn counter_clockwise_triangle_faces_away() {
        let v0 = Vec3::new(0.0, 0.0, 5.0);
        let v1 = Vec3::new(1.0, 0.0, 5.0);
        let v2 = Vec3::new(0.0, 1.0, 5.0);
        let normal = face_normal(v0, v1, v2).unwrap();
        assert_eq!(normal, Vec3::new(0.0, 0.0, 1.0));
        assert!(is_back_face(normal, v0));

        let flipped = face_normal(v0, v2, v1).unwrap();
        assert!(!is_back_face(flipped, v0));
    }

    #[test]
    fn culling_follows_winding_through_the_pipeline() {
        // (0,0,0), (1,0,0), (0,1,0) seen from (0,0,-5) looking +z.
        let away = triangle_mesh([Vec3::ZERO, Vec3::RIGHT, Vec3::UP]);
        let (triangles, stats) = run(&away, true, 100);
        assert!(triangles.is_empty());
        assert_eq!(stats.culled, 1);

        let toward = triangle_mesh([Vec3::ZERO, Vec3::UP, Vec3::RIGHT]);
        let (triangles, stats) = run(&toward, true, 100);
        assert_eq!(triangles.len(), 1);
        assert_eq!(stats.culled, 0);

        let (triangles, _) = run(&away, false, 100);
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn degenerate_face_is_skipped() {
        let line = triangle_mesh([Vec3::ZERO, Vec3::RIGHT, Vec3::RIGHT * 2.0]);
        let (triangles, stats) = run(&line, false, 100);
        assert!(triangles.is_empty());
        assert_eq!(stats.degenerate, 1);
        assert!(face_normal(Vec3::ZERO, Vec3::ZERO, Vec3::UP).is_none());
    }

    #[test]
    fn screen_mapping_flips_y() {
        let centre = ndc_to_screen(Vec4::new(0.0, 0.0, 0.5, 3.0), 800, 600);
        assert_eq!(centre, Vec4::new(400.0, 300.0, 0.5, 3.0));
        let top_right = ndc_to_screen(Vec4::new(1.0, 1.0, 0.0, 1.0), 800, 600);
        assert_eq!((top_right.x, top_right.y), (800.0, 0.0));
        let bottom_left = ndc_to_screen(Vec4::new(-1.0, -1.0, 0.0, 1.0), 800, 600);
        assert_eq!((bottom_left.x, bottom_left.y), (0.0, 600.0));
    }

    #[test]
    fn visible_triangle_keeps_view_depth_and_uvs() {
        let mesh = Mesh::new(
            "tri",
            vec![Vec3::ZERO, Vec3::UP, Vec3::RIGHT],
            vec![Face::new(0, 1, 2).with_uvs([
                crate::math::Vec2::new(0.0, 0.0),
                crate::math::Vec2::new(0.0, 1.0),
                crate::math::Vec2::new(1.0, 0.0),
            ])],
        )
        .unwrap();
        let (triangles, stats) = run(&mesh, true, 100);
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.clipped, 0);

        let tri = &triangles[0];
        for p in tri.points {
            assert_relative_eq!(p.w, 5.0, epsilon = 1e-5);
        }
        // Model origin lands in the screen centre.
        assert_relative_eq!(tri.points[0].x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(tri.points[0].y, 50.0, epsilon = 1e-4);
        // +y in the world is up on screen.
        assert!(tri.points[1].y < tri.points[0].y);
        assert_eq!(tri.uvs[1], crate::math::Vec2::new(0.0, 1.0));
    }

    #[test]
    fn lighting_scales_face_color() {
        // Light travels +z, the face normal points -z toward it: fully lit.
        let mesh = triangle_mesh([Vec3::ZERO, Vec3::UP, Vec3::RIGHT]);
        let (triangles, _) = run(&mesh, true, 100);
        assert_relative_eq!(triangles[0].intensity, 1.0, epsilon = 1e-6);
        assert_eq!(triangles[0].color, colors::FILL);
    }

    #[test]
    fn triangle_budget_drops_and_counts_overflow() {
        let faces = (0..4).map(|_| Face::new(0, 1, 2)).collect();
        let mesh = Mesh::new("stack", vec![Vec3::ZERO, Vec3::UP, Vec3::RIGHT], faces).unwrap();
        let (triangles, stats) = run(&mesh, true, 3);
        assert_eq!(triangles.len(), 3);
        assert_eq!(stats.triangles, 3);
        assert_eq!(stats.dropped, 1);
        assert!(stats.overflowed());
    }

    #[test]
    fn faces_outside_and_across_the_frustum_are_counted() {
        let behind = triangle_mesh([
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::new(0.0, 1.0, -10.0),
            Vec3::new(1.0, 0.0, -10.0),
        ]);
        let (triangles, stats) = run(&behind, false, 100);
        assert!(triangles.is_empty());
        assert_eq!(stats.clipped_away, 1);

        // Spans the left plane: part of it is visible.
        let across = triangle_mesh([
            Vec3::new(-20.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ]);
        let (triangles, stats) = run(&across, false, 100);
        assert_eq!(stats.clipped, 1);
        assert!(!triangles.is_empty());
        for tri in &triangles {
            for p in tri.points {
                assert!(p.x >= -1e-2 && p.x <= 100.0 + 1e-2, "x = {}", p.x);
            }
        }
    }
}
