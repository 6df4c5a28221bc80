//! Software rasterization onto the RGB canvas.
//!
//! Coverage is decided at pixel centers `(x + 0.5, y + 0.5)`.

use image::{GrayImage, Luma, Rgb, RgbImage};
use perspecta_engine::coords::Vec2;
use perspecta_engine::paint::Color;

/// Coverage value written for pixels inside a polygon.
pub const COVERED: u8 = 255;

/// Rewrites `mask` so that exactly the pixels whose centers lie inside the
/// polygon `points` are [`COVERED`] (even-odd rule, closing edge implied).
pub fn fill_polygon_mask(mask: &mut GrayImage, points: &[Vec2]) {
    for p in mask.pixels_mut() {
        *p = Luma([0]);
    }

    let (w, h) = mask.dimensions();
    let n = points.len();
    if n < 3 {
        return;
    }

    let (mut y_min, mut y_max) = (f32::INFINITY, f32::NEG_INFINITY);
    for p in points {
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    if !(y_min.is_finite() && y_max.is_finite()) {
        return;
    }
    let row_start = pixel_bound(y_min, h);
    let row_end = pixel_bound(y_max, h);

    let mut nodes: Vec<f32> = Vec::with_capacity(n);
    for y in row_start..row_end {
        let yf = y as f32 + 0.5;

        nodes.clear();
        for i in 0..n {
            let (a, b) = (points[i], points[(i + 1) % n]);
            if (a.y < yf && b.y >= yf) || (b.y < yf && a.y >= yf) {
                let t = (yf - a.y) / (b.y - a.y);
                nodes.push(a.x + t * (b.x - a.x));
            }
        }
        nodes.sort_by(|a, b| a.total_cmp(b));

        for span in nodes.chunks_exact(2) {
            let x_start = pixel_bound(span[0], w);
            let x_end = pixel_bound(span[1], w);
            for x in x_start..x_end {
                mask.put_pixel(x, y, Luma([COVERED]));
            }
        }
    }
}

/// First pixel index whose center is at or past `edge`, clamped to `0..=limit`.
#[inline]
fn pixel_bound(edge: f32, limit: u32) -> u32 {
    let v = (edge - 0.5).ceil();
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, limit as f32) as u32
}

/// Draws a 1 px line between two points.
///
/// The segment is clipped to the canvas first, then walked with Bresenham on
/// truncated integer endpoints.
pub fn draw_line(img: &mut RgbImage, a: Vec2, b: Vec2, color: Color) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let a = (a.x as f64, a.y as f64);
    let b = (b.x as f64, b.y as f64);
    let Some((a, b)) = clip_segment(a, b, (w - 1) as f64, (h - 1) as f64) else {
        return;
    };

    let (x0, y0, x1, y1) = (to_pixel(a.0), to_pixel(a.1), to_pixel(b.0), to_pixel(b.1));
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    let px = Rgb(color.to_array());

    loop {
        if x >= 0 && x < w as i32 && y >= 0 && y < h as i32 {
            img.put_pixel(x as u32, y as u32, px);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Truncates toward zero, snapping values within rounding noise of an integer
/// (clipped endpoints sit exactly on the border).
#[inline]
fn to_pixel(v: f64) -> i32 {
    let r = v.round();
    if (v - r).abs() < 1e-4 { r as i32 } else { v as i32 }
}

type Point = (f64, f64);

/// Liang–Barsky clip of segment `a → b` against `[0, x_max] × [0, y_max]`.
fn clip_segment(a: Point, b: Point, x_max: f64, y_max: f64) -> Option<(Point, Point)> {
    if !(a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()) {
        return None;
    }

    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let edges = [(-dx, a.0), (dx, x_max - a.0), (-dy, a.1), (dy, y_max - a.1)];

    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| (a.0 + dx * t, a.1 + dy * t);
    Some((at(t0), at(t1)))
}

/// Fills the disc `dx² + dy² <= radius²` around `(cx, cy)`, clamped to the canvas.
pub fn fill_circle(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Color) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || radius < 0 {
        return;
    }

    let r_sq = radius as i64 * radius as i64;
    let px = Rgb(color.to_array());

    let y_lo = cy.saturating_sub(radius).max(0);
    let y_hi = cy.saturating_add(radius).min(h as i32 - 1);
    let x_lo = cx.saturating_sub(radius).max(0);
    let x_hi = cx.saturating_add(radius).min(w as i32 - 1);

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let dx = (x - cx) as i64;
            let dy = (y - cy) as i64;
            if dx * dx + dy * dy <= r_sq {
                img.put_pixel(x as u32, y as u32, px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn covered(mask: &GrayImage) -> usize {
        mask.pixels().filter(|p| p.0[0] == COVERED).count()
    }

    #[test]
    fn axis_aligned_square_covers_exact_pixels() {
        let mut mask = GrayImage::new(10, 10);
        fill_polygon_mask(&mut mask, &[v(2.0, 3.0), v(6.0, 3.0), v(6.0, 5.0), v(2.0, 5.0)]);
        assert_eq!(covered(&mask), 4 * 2);
        assert_eq!(mask.get_pixel(2, 3).0[0], COVERED);
        assert_eq!(mask.get_pixel(5, 4).0[0], COVERED);
        assert_eq!(mask.get_pixel(6, 4).0[0], 0);
        assert_eq!(mask.get_pixel(2, 5).0[0], 0);
    }

    #[test]
    fn refill_clears_previous_coverage() {
        let mut mask = GrayImage::new(10, 10);
        fill_polygon_mask(&mut mask, &[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)]);
        assert_eq!(covered(&mask), 100);
        fill_polygon_mask(&mut mask, &[v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)]);
        assert_eq!(covered(&mask), 1);
    }

    #[test]
    fn polygon_partially_off_canvas_is_clamped() {
        let mut mask = GrayImage::new(4, 4);
        fill_polygon_mask(
            &mut mask,
            &[v(-100.0, -100.0), v(2.0, -100.0), v(2.0, 1e9), v(-100.0, 1e9)],
        );
        assert_eq!(covered(&mask), 2 * 4);
    }

    #[test]
    fn line_endpoints_are_drawn() {
        let mut img = RgbImage::new(10, 10);
        draw_line(&mut img, v(1.0, 1.0), v(8.0, 4.0), Color::WHITE);
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(8, 4).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(1, 8).0, [0, 0, 0]);
    }

    #[test]
    fn far_off_canvas_line_is_clipped() {
        let mut img = RgbImage::new(10, 10);
        draw_line(&mut img, v(-1e9, 5.0), v(1e9, 5.0), Color::WHITE);
        for x in 0..10 {
            assert_eq!(img.get_pixel(x, 5).0, [255, 255, 255]);
        }

        let mut img = RgbImage::new(10, 10);
        draw_line(&mut img, v(-50.0, -50.0), v(-10.0, 100.0), Color::WHITE);
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn circle_matches_disc_rule() {
        let mut img = RgbImage::new(20, 20);
        fill_circle(&mut img, 10, 10, 2, Color::WHITE);
        let lit = img.pixels().filter(|p| p.0 == [255, 255, 255]).count();
        // Integer points with dx²+dy² <= 4.
        assert_eq!(lit, 13);
    }

    #[test]
    fn circle_near_edge_is_clamped() {
        let mut img = RgbImage::new(5, 5);
        fill_circle(&mut img, 0, 0, 5, Color::WHITE);
        fill_circle(&mut img, i32::MAX, i32::MIN, 5, Color::WHITE);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(4, 4).0, [0, 0, 0]);
    }
}
