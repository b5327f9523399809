//! Polygon clipping against the view frustum.
//!
//! Triangles are clipped in view space (before projection) as convex polygons,
//! one plane at a time, and then fan-triangulated back into triangles.

pub mod frustum;
pub mod polygon;

pub use frustum::{Frustum, FrustumPlane, FrustumSide};
pub use polygon::{Polygon, PolygonVertex, MAX_POLYGON_VERTICES};
