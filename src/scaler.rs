use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source column/row for every destination pixel
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_y: Vec::new(),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    if src_w == 0 || src_h == 0 {
        return ScaleLut::empty();
    }

    // Integer mapping so every source pixel covers a whole block
    let src_x = (0..dst_w).map(|x| (x * src_w / dst_w).min(src_w - 1)).collect();
    let src_y = (0..dst_h).map(|y| (y * src_h / dst_h).min(src_h - 1)).collect();

    ScaleLut { src_x, src_y }
}

/// Parallel nearest-neighbour stretch
/// Rows are processed in parallel; rows or columns outside the LUT are left as is
pub fn blit_nearest_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&sy) = lut.src_y.get(y) else {
            return;
        };
        let row = &src[sy * sw..(sy + 1) * sw];
        for (d, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
            *d = row[sx];
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_upscale_repeats_pixels_in_blocks() {
        let src = [1, 2, 3, 4]; // 2x2
        let lut = build_scale_lut(4, 4, 2, 2);
        let mut dst = vec![0; 16];

        blit_nearest_stretch(&mut dst, 4, &src, 2, &lut);

        assert_eq!(
            dst,
            vec![
                1, 1, 2, 2, //
                1, 1, 2, 2, //
                3, 3, 4, 4, //
                3, 3, 4, 4,
            ]
        );
    }

    #[test]
    fn non_integer_scale_stays_in_bounds() {
        let lut = build_scale_lut(7, 5, 3, 2);
        assert_eq!(lut.dst_size(), (7, 5));
        assert!(lut.src_x.iter().all(|&x| x < 3));
        assert!(lut.src_y.iter().all(|&y| y < 2));
        assert_eq!(lut.src_x.first(), Some(&0));
        assert_eq!(lut.src_x.last(), Some(&2));
    }

    #[test]
    fn downscale_picks_source_pixels() {
        let src: Vec<u32> = (0..16).collect(); // 4x4
        let lut = build_scale_lut(2, 2, 4, 4);
        let mut dst = vec![0; 4];
        blit_nearest_stretch(&mut dst, 2, &src, 4, &lut);
        assert_eq!(dst, vec![0, 2, 8, 10]);
    }

    #[test]
    fn empty_source_gives_empty_lut() {
        let lut = build_scale_lut(10, 10, 0, 4);
        assert_eq!(lut.dst_size(), (0, 0));
    }
}
