use super::Vec2;

/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps a point in viewport space onto a `target_width × target_height` raster
    /// that is stretched over the whole viewport.
    ///
    /// Returns the point unchanged when the viewport is degenerate (minimized window).
    pub fn map_to(self, p: Vec2, target_width: u32, target_height: u32) -> Vec2 {
        if !self.is_valid() {
            return p;
        }
        Vec2::new(
            p.x * target_width as f32 / self.width,
            p.y * target_height as f32 / self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_is_identity() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.map_to(Vec2::new(123.0, 45.0), 800, 600), Vec2::new(123.0, 45.0));
    }

    #[test]
    fn scales_each_axis_independently() {
        let vp = Viewport::new(400.0, 600.0);
        assert_eq!(vp.map_to(Vec2::new(100.0, 300.0), 800, 300), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn zero_viewport_passes_through() {
        let vp = Viewport::new(0.0, 0.0);
        assert!(!vp.is_valid());
        assert_eq!(vp.map_to(Vec2::new(7.0, 8.0), 800, 600), Vec2::new(7.0, 8.0));
    }
}
