use perspecta_engine::coords::Vec2;

use crate::registry::Quad;

/// Vertex positions shown in one frame, one quad per shape in registry order.
///
/// Either the rest geometry or the transformed geometry of an active drag. Hit
/// testing for the next pointer-down runs against this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayedGeometry {
    quads: Vec<Quad>,
}

impl DisplayedGeometry {
    pub fn from_quads(quads: Vec<Quad>) -> Self {
        Self { quads }
    }

    /// Regroups a flat vertex list (four per shape) into quads.
    ///
    /// A trailing partial group is dropped.
    pub fn from_points(points: &[Vec2]) -> Self {
        let quads = points
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Self { quads }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    #[inline]
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    #[inline]
    pub fn quad(&self, shape: usize) -> Option<&Quad> {
        self.quads.get(shape)
    }

    /// All vertices, flattened in shape order.
    pub fn vertices(&self) -> &[Vec2] {
        self.quads.as_flattened()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regroups_flat_points() {
        let pts: Vec<Vec2> = (0..9).map(|i| Vec2::new(i as f32, 0.0)).collect();
        let g = DisplayedGeometry::from_points(&pts);
        assert_eq!(g.len(), 2);
        assert_eq!(g.quad(1).unwrap()[0], Vec2::new(4.0, 0.0));
        assert_eq!(g.vertices(), &pts[..8]);
    }
}
