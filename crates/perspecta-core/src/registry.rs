use perspecta_engine::coords::Vec2;
use perspecta_engine::paint::Color;

use crate::geometry::DisplayedGeometry;

/// Four vertices in winding order: top-left, top-right, bottom-right, bottom-left.
pub type Quad = [Vec2; 4];

/// Layout input for one shape: an axis-aligned rectangle and its fill.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeSpec {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl ShapeSpec {
    pub fn new(center: Vec2, width: f32, height: f32, color: Color) -> Self {
        Self {
            center,
            width,
            height,
            color,
        }
    }

    /// Corners of the rectangle in winding order.
    pub fn corners(&self) -> Quad {
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        let Vec2 { x: cx, y: cy } = self.center;
        [
            Vec2::new(cx - hw, cy - hh),
            Vec2::new(cx + hw, cy - hh),
            Vec2::new(cx + hw, cy + hh),
            Vec2::new(cx - hw, cy + hh),
        ]
    }
}

/// One shape at rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    index: usize,
    rest: Quad,
    color: Color,
}

impl Shape {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn rest(&self) -> &Quad {
        &self.rest
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Ordered, fixed set of shapes built once from a layout.
///
/// Index order is draw order and hit-test order; neither changes after
/// construction. Degenerate rectangles are accepted here and rejected later by
/// transform derivation.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
}

impl ShapeRegistry {
    pub fn new(specs: &[ShapeSpec]) -> Self {
        let shapes = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| Shape {
                index,
                rest: spec.corners(),
                color: spec.color,
            })
            .collect();
        Self { shapes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    #[inline]
    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// All rest quads as displayable geometry.
    pub fn rest_geometry(&self) -> DisplayedGeometry {
        DisplayedGeometry::from_quads(self.shapes.iter().map(|s| s.rest).collect())
    }

    /// Every rest vertex, four per shape, in shape order.
    pub fn rest_points(&self) -> Vec<Vec2> {
        self.shapes.iter().flat_map(|s| s.rest).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ShapeRegistry {
        ShapeRegistry::new(&[
            ShapeSpec::new(Vec2::new(5.0, 5.0), 10.0, 10.0, Color::WHITE),
            ShapeSpec::new(Vec2::new(7.5, 2.5), 5.0, 5.0, Color::rgb(1, 2, 3)),
        ])
    }

    #[test]
    fn corners_follow_winding_order() {
        let r = registry();
        let s = r.shape(0).unwrap();
        assert_eq!(
            *s.rest(),
            [
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ]
        );
        assert_eq!(s.color(), Color::WHITE);
    }

    #[test]
    fn indices_follow_construction_order() {
        let r = registry();
        assert_eq!(r.len(), 2);
        assert!(!r.is_empty());
        let idx: Vec<usize> = r.iter().map(Shape::index).collect();
        assert_eq!(idx, vec![0, 1]);
        assert_eq!(r.shape(1).unwrap().color(), Color::rgb(1, 2, 3));
        assert!(r.shape(2).is_none());
    }

    #[test]
    fn rest_points_are_concatenated_in_shape_order() {
        let r = registry();
        let pts = r.rest_points();
        assert_eq!(pts.len(), 8);
        assert_eq!(&pts[..4], r.shape(0).unwrap().rest());
        assert_eq!(&pts[4..], r.shape(1).unwrap().rest());
        assert_eq!(r.rest_geometry().vertices(), pts.as_slice());
    }

    #[test]
    fn empty_registry() {
        let r = ShapeRegistry::new(&[]);
        assert!(r.is_empty());
        assert!(r.rest_points().is_empty());
        assert_eq!(r.rest_geometry().len(), 0);
    }
}
