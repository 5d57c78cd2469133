use crate::{
    camera::Camera,
    projector::project_batch,
    world::{PointGrid, PointKind},
};

#[inline]
const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB, the layout softbuffer expects
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

pub const BACKGROUND: u32 = pack_rgb(0, 0, 0);
pub const PLAIN: u32 = pack_rgb(0xFF, 0xF1, 0xE8);
pub const MARKER: u32 = pack_rgb(0xFF, 0x00, 0x4D);

fn color_of(kind: PointKind) -> u32 {
    match kind {
        PointKind::Plain => PLAIN,
        PointKind::Marker => MARKER,
    }
}

/// Draws the grid as single pixels into `buf`, which must be
/// `width * height` long. Returns the number of pixels plotted.
pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    grid: &PointGrid,
    camera: &Camera,
) -> usize {
    buf.fill(BACKGROUND);

    let visible = project_batch(&grid.points, camera);

    let mut plotted = 0;
    for (i, p) in visible {
        // Projections may land anywhere; only plot what hits the surface
        if p.x < 0 || p.y < 0 || p.x as usize >= width || p.y as usize >= height {
            continue;
        }
        buf[p.y as usize * width + p.x as usize] = color_of(grid.kinds[i]);
        plotted += 1;
    }
    plotted
}
