#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Plain,
    Marker, // every `stripe`-th diagonal of the grid
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub cols: usize, // along x
    pub rows: usize, // along z
    pub spacing: f32,
    pub height: f32, // y of the whole grid
    pub stripe: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 50,
            rows: 50,
            spacing: 5.0,
            height: 10.0,
            stripe: 20,
        }
    }
}

/// Flat grid of world points, stored row-major (z outer, x inner).
pub struct PointGrid {
    pub points: Vec<[f32; 3]>,
    pub kinds: Vec<PointKind>,
}

impl PointGrid {
    pub fn new(config: &GridConfig) -> Self {
        let count = config.cols * config.rows;
        let mut points = Vec::with_capacity(count);
        let mut kinds = Vec::with_capacity(count);

        for row in 0..config.rows {
            for col in 0..config.cols {
                points.push([
                    col as f32 * config.spacing,
                    config.height,
                    row as f32 * config.spacing,
                ]);
                let marker = config.stripe > 0 && (col + row) % config.stripe == 0;
                kinds.push(if marker {
                    PointKind::Marker
                } else {
                    PointKind::Plain
                });
            }
        }

        Self { points, kinds }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
