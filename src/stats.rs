//! Per-frame pipeline counters.

use std::fmt;
use std::ops::AddAssign;

/// What happened to the scene's faces during one [`Engine::update`](crate::Engine::update).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub meshes: usize,
    /// Faces considered, before culling.
    pub faces: usize,
    /// Faces skipped because their normal has zero length.
    pub degenerate: usize,
    /// Faces skipped by back-face culling.
    pub culled: usize,
    /// Faces entirely outside the frustum.
    pub clipped_away: usize,
    /// Faces cut by at least one frustum plane but still partly visible.
    pub clipped: usize,
    /// Faces skipped because clipping exceeded the polygon capacity.
    pub clip_overflows: usize,
    /// Triangles skipped because a vertex failed the perspective divide.
    pub rejected: usize,
    /// Triangles appended to the frame's triangle list.
    pub triangles: usize,
    /// Triangles lost to the per-frame triangle budget.
    pub dropped: usize,
}

impl FrameStats {
    /// True if any capacity limit was hit this frame.
    pub fn overflowed(&self) -> bool {
        self.clip_overflows > 0 || self.dropped > 0
    }
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, other: Self) {
        self.meshes += other.meshes;
        self.faces += other.faces;
        self.degenerate += other.degenerate;
        self.culled += other.culled;
        self.clipped_away += other.clipped_away;
        self.clipped += other.clipped;
        self.clip_overflows += other.clip_overflows;
        self.rejected += other.rejected;
        self.triangles += other.triangles;
        self.dropped += other.dropped;
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} meshes, {} faces: {} culled, {} degenerate, {} outside, {} clipped, {} overflowed; \
             {} triangles ({} rejected, {} dropped)",
            self.meshes,
            self.faces,
            self.culled,
            self.degenerate,
            self.clipped_away,
            self.clipped,
            self.clip_overflows,
            self.triangles,
            self.rejected,
            self.dropped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_flags_capacity_hits() {
        let mut stats = FrameStats::default();
        assert!(!stats.overflowed());
        stats.dropped = 1;
        assert!(stats.overflowed());
    }

    #[test]
    fn add_assign_sums_fields() {
        let mut total = FrameStats {
            faces: 2,
            triangles: 3,
            ..Default::default()
        };
        total += FrameStats {
            faces: 5,
            culled: 1,
            ..Default::default()
        };
        assert_eq!(total.faces, 7);
        assert_eq!(total.culled, 1);
        assert_eq!(total.triangles, 3);
    }
}
