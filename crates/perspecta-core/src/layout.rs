//! Initial shape layouts.

use rand::Rng;

use perspecta_engine::coords::Vec2;
use perspecta_engine::paint::Color;

use crate::registry::ShapeSpec;

/// Side length of the squares in [`fixed_layout`].
const FIXED_SIZE: f32 = 150.0;

const FIXED_CENTERS: [(f32, f32); 4] =
    [(240.0, 180.0), (330.0, 200.0), (300.0, 312.0), (412.0, 300.0)];

const FIXED_COLORS: [Color; 4] = [
    Color::rgb(130, 180, 255), // light blue
    Color::rgb(180, 255, 130), // mint green
    Color::rgb(255, 130, 180), // lavender
    Color::rgb(255, 220, 130), // light orange
];

/// Four overlapping 150×150 squares around the upper-left of an 800×600 canvas.
pub fn fixed_layout() -> Vec<ShapeSpec> {
    FIXED_CENTERS
        .iter()
        .zip(FIXED_COLORS)
        .map(|(&(x, y), color)| ShapeSpec::new(Vec2::new(x, y), FIXED_SIZE, FIXED_SIZE, color))
        .collect()
}

/// Parameters for [`jittered_grid`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Square side as a fraction of the smaller cell dimension; above 1 the
    /// squares overlap their neighbours.
    pub cell_fraction: f32,
    /// Maximum center displacement per axis, in pixels.
    pub jitter: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 4,
            canvas_width: 800.0,
            canvas_height: 600.0,
            cell_fraction: 1.15,
            jitter: 20.0,
        }
    }
}

/// One square per grid cell, row-major, centers jittered by up to `jitter`.
pub fn jittered_grid<R: Rng>(grid: &GridLayout, rng: &mut R) -> Vec<ShapeSpec> {
    if grid.rows == 0 || grid.cols == 0 {
        return Vec::new();
    }

    let cell_w = grid.canvas_width / grid.cols as f32;
    let cell_h = grid.canvas_height / grid.rows as f32;
    let size = cell_w.min(cell_h) * grid.cell_fraction;
    let palette = hue_palette((grid.rows * grid.cols) as usize);

    let mut jitter = || {
        if grid.jitter > 0.0 {
            rng.random_range(-grid.jitter..=grid.jitter)
        } else {
            0.0
        }
    };

    let mut specs = Vec::with_capacity(palette.len());
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let cx = (col as f32 + 0.5) * cell_w + jitter();
            let cy = (row as f32 + 0.5) * cell_h + jitter();
            let color = palette[specs.len()];
            specs.push(ShapeSpec::new(Vec2::new(cx, cy), size, size, color));
        }
    }
    specs
}

/// `n` pastel colors with evenly spaced hues.
pub fn hue_palette(n: usize) -> Vec<Color> {
    (0..n)
        .map(|i| Color::from_hsv(360.0 * i as f32 / n as f32, 0.45, 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fixed_layout_shapes() {
        let specs = fixed_layout();
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].center, Vec2::new(240.0, 180.0));
        assert_eq!(specs[3].center, Vec2::new(412.0, 300.0));
        assert!(specs.iter().all(|s| s.width == 150.0 && s.height == 150.0));
        assert_eq!(specs[1].color, Color::rgb(180, 255, 130));
    }

    #[test]
    fn grid_is_deterministic_for_a_seed() {
        let grid = GridLayout::default();
        let a = jittered_grid(&grid, &mut StdRng::seed_from_u64(7));
        let b = jittered_grid(&grid, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn grid_centers_stay_within_jitter_of_cell_centers() {
        let grid = GridLayout::default();
        let specs = jittered_grid(&grid, &mut StdRng::seed_from_u64(42));
        for (i, s) in specs.iter().enumerate() {
            let (row, col) = (i as u32 / grid.cols, i as u32 % grid.cols);
            let ex = (col as f32 + 0.5) * 200.0;
            let ey = (row as f32 + 0.5) * 200.0;
            assert!((s.center.x - ex).abs() <= grid.jitter + 1e-3);
            assert!((s.center.y - ey).abs() <= grid.jitter + 1e-3);
            assert!((s.width - 230.0).abs() < 1e-3);
        }
    }

    #[test]
    fn zero_jitter_grid_is_regular() {
        let grid = GridLayout {
            rows: 1,
            cols: 2,
            jitter: 0.0,
            ..GridLayout::default()
        };
        let specs = jittered_grid(&grid, &mut StdRng::seed_from_u64(0));
        assert_eq!(specs[0].center, Vec2::new(200.0, 300.0));
        assert_eq!(specs[1].center, Vec2::new(600.0, 300.0));
    }

    #[test]
    fn empty_grid() {
        let grid = GridLayout { rows: 0, ..GridLayout::default() };
        assert!(jittered_grid(&grid, &mut StdRng::seed_from_u64(0)).is_empty());
    }

    #[test]
    fn palette_hues_are_distinct() {
        let p = hue_palette(6);
        assert_eq!(p.len(), 6);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(hue_palette(0).is_empty());
    }
}
