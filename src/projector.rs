//! World point to raster pixel projection.

use rayon::prelude::*;

use crate::camera::Camera;

/// Rotated depth at or below this is behind the camera.
pub const NEAR_PLANE: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: i32,
    pub y: i32,
    pub distance: f32, // euclidean distance to the camera, before rotation
}

/// Projects a world-space point onto the camera's raster.
///
/// Returns `None` when the point is farther than the draw limit or sits on or
/// behind the near plane. Yaw is applied before pitch; roll rotates the
/// already projected point around the screen center. Pixel coordinates are
/// truncated toward zero and may lie outside the surface.
pub fn project(point: [f32; 3], camera: &Camera) -> Option<ProjectedPoint> {
    let pos = camera.position();
    let x = point[0] - pos[0];
    let y = point[1] - pos[1];
    let z = point[2] - pos[2];

    // Cull by true 3D distance before any rotation work
    let distance = (x * x + y * y + z * z).sqrt();
    if distance > camera.draw_limit() {
        return None;
    }

    let r = camera.rotation();

    // Yaw
    let x1 = r.cos_yaw * x - r.sin_yaw * z;
    let z1 = r.sin_yaw * x + r.cos_yaw * z;

    // Pitch, on the yaw-rotated depth
    let y1 = r.cos_pitch * y - r.sin_pitch * z1;
    let z2 = r.sin_pitch * y + r.cos_pitch * z1;

    let depth = z2 / camera.depth_scale();
    if depth <= NEAR_PLANE {
        return None;
    }

    let (cx0, cy0) = camera.screen_center();
    let d = camera.projection_distance();
    let sx = (x1 / depth) * d + cx0;
    let sy = (y1 / depth) * d + cy0;

    // Screen-space roll about the center
    let (dx, dy) = (sx - cx0, sy - cy0);
    let rx = r.cos_roll * dx - r.sin_roll * dy + cx0;
    let ry = r.sin_roll * dx + r.cos_roll * dy + cy0;

    debug_assert!(
        rx.is_finite() && ry.is_finite(),
        "non-finite projection of {point:?}"
    );

    Some(ProjectedPoint {
        x: rx as i32,
        y: ry as i32,
        distance,
    })
}

/// Projects every point in parallel against one camera snapshot.
///
/// Visible results are returned in input order, tagged with their index.
pub fn project_batch(points: &[[f32; 3]], camera: &Camera) -> Vec<(usize, ProjectedPoint)> {
    points
        .par_iter()
        .enumerate()
        .filter_map(|(i, &p)| project(p, camera).map(|pp| (i, pp)))
        .collect()
}
