//! Per-frame software compositing of the scene.
//!
//! Shapes are painted in registry order. Each shape's quad is rasterized into a
//! coverage mask (its layer) and the covered pixels are blended over the canvas
//! as `alpha·fill + (1 - alpha)·canvas`, so later shapes blend over the result
//! of earlier ones. Outlines and vertex markers are drawn opaque on top.

use image::{GrayImage, Rgb, RgbImage};
use perspecta_engine::paint::Color;

use crate::config::Style;
use crate::geometry::DisplayedGeometry;
use crate::raster::{self, COVERED};
use crate::registry::ShapeRegistry;
use crate::tracker::DragState;

#[derive(Debug, Clone)]
pub struct Compositor {
    style: Style,
    mask: GrayImage,
}

impl Compositor {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            mask: GrayImage::new(0, 0),
        }
    }

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_highlight_fill(&mut self, fill: Option<Color>) {
        self.style.highlight_fill = fill;
    }

    /// Paints one frame into `canvas`.
    pub fn render(
        &mut self,
        canvas: &mut RgbImage,
        registry: &ShapeRegistry,
        geometry: &DisplayedGeometry,
        drag: Option<&DragState>,
    ) {
        let (w, h) = canvas.dimensions();
        if self.mask.dimensions() != (w, h) {
            self.mask = GrayImage::new(w, h);
        }

        let background = Rgb(self.style.background.to_array());
        for p in canvas.pixels_mut() {
            *p = background;
        }

        for (shape, quad) in registry.iter().zip(geometry.quads()) {
            let fill = match (drag, self.style.highlight_fill) {
                (Some(d), Some(highlight)) if d.shape == shape.index() => highlight,
                _ => shape.color(),
            };

            raster::fill_polygon_mask(&mut self.mask, quad);
            for (m, px) in self.mask.pixels().zip(canvas.pixels_mut()) {
                if m.0[0] == COVERED {
                    let base = Color::from_array(px.0);
                    *px = Rgb(Color::blend(fill, base, self.style.alpha).to_array());
                }
            }
        }

        for quad in geometry.quads() {
            for i in 0..quad.len() {
                let j = (i + 1) % quad.len();
                raster::draw_line(canvas, quad[i], quad[j], self.style.outline);
            }
        }

        for (shape, quad) in geometry.quads().iter().enumerate() {
            for (vertex, v) in quad.iter().enumerate() {
                let color = marker_color(&self.style, drag, shape, vertex);
                let radius = self.style.vertex_radius;
                raster::fill_circle(canvas, v.x as i32, v.y as i32, radius, color);
            }
        }

        log::trace!("composited {} shapes into {w}x{h}", geometry.len());
    }
}

/// Marker color for a vertex given the active drag.
pub fn marker_color(style: &Style, drag: Option<&DragState>, shape: usize, vertex: usize) -> Color {
    match drag {
        Some(d) if d.shape == shape && d.vertex == vertex => style.drag,
        Some(d) if d.shape == shape => style.hint,
        _ => style.vertex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ShapeSpec;
    use perspecta_engine::coords::Vec2;

    fn two_overlapping() -> ShapeRegistry {
        ShapeRegistry::new(&[
            ShapeSpec::new(Vec2::new(10.0, 10.0), 20.0, 20.0, Color::rgb(130, 180, 255)),
            ShapeSpec::new(Vec2::new(20.0, 20.0), 20.0, 20.0, Color::rgb(180, 130, 255)),
        ])
    }

    fn style() -> Style {
        Style {
            vertex_radius: 1,
            ..Style::default()
        }
    }

    fn px(img: &RgbImage, x: u32, y: u32) -> [u8; 3] {
        img.get_pixel(x, y).0
    }

    #[test]
    fn overlapping_layers_blend_sequentially() {
        let reg = two_overlapping();
        let mut canvas = RgbImage::new(40, 40);
        let mut c = Compositor::new(style());
        c.render(&mut canvas, &reg, &reg.rest_geometry(), None);

        // First shape alone over black.
        assert_eq!(px(&canvas, 5, 5), [65, 90, 128]);
        // Second shape alone over black.
        assert_eq!(px(&canvas, 25, 25), [90, 65, 128]);
        // Overlap: second blended over the first, not a flat mix of both fills.
        assert_eq!(px(&canvas, 15, 15), [123, 110, 192]);
        assert_ne!(px(&canvas, 15, 15), [155, 155, 255]);
        // Untouched background.
        assert_eq!(px(&canvas, 35, 5), [0, 0, 0]);
    }

    #[test]
    fn outlines_and_markers_are_opaque() {
        let reg = two_overlapping();
        let mut canvas = RgbImage::new(40, 40);
        let mut c = Compositor::new(style());
        c.render(&mut canvas, &reg, &reg.rest_geometry(), None);

        // Top edge of the first shape, away from its corners.
        assert_eq!(px(&canvas, 10, 0), [255, 255, 255]);
        // Corner marker of the second shape.
        assert_eq!(px(&canvas, 30, 30), Style::default().vertex.to_array());
    }

    #[test]
    fn drag_colors_markers() {
        let s = Style::default();
        let d = DragState {
            shape: 1,
            vertex: 2,
            position: Vec2::zero(),
        };
        assert_eq!(marker_color(&s, Some(&d), 1, 2), s.drag);
        assert_eq!(marker_color(&s, Some(&d), 1, 0), s.hint);
        assert_eq!(marker_color(&s, Some(&d), 0, 2), s.vertex);
        assert_eq!(marker_color(&s, None, 1, 2), s.vertex);
    }

    #[test]
    fn highlight_fill_replaces_dragged_shape_color() {
        let reg = two_overlapping();
        let geometry = reg.rest_geometry();
        let drag = DragState {
            shape: 0,
            vertex: 0,
            position: Vec2::zero(),
        };

        let mut canvas = RgbImage::new(40, 40);
        let mut c = Compositor::new(style());
        c.render(&mut canvas, &reg, &geometry, Some(&drag));
        assert_eq!(px(&canvas, 5, 5), [65, 90, 128]);

        c.set_highlight_fill(Some(Color::rgb(0, 200, 0)));
        c.render(&mut canvas, &reg, &geometry, Some(&drag));
        assert_eq!(px(&canvas, 5, 5), [0, 100, 0]);
        assert_eq!(px(&canvas, 25, 25), [90, 65, 128]);
    }
}
