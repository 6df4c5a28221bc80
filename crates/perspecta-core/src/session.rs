//! One interactive run: registry, drag tracking and compositing wired together.

use image::RgbImage;

use perspecta_engine::paint::Color;

use crate::compositor::Compositor;
use crate::config::{DEFAULT_HIGHLIGHT_FILL, SceneConfig};
use crate::error::HomographyError;
use crate::geometry::DisplayedGeometry;
use crate::homography::Homography;
use crate::registry::{ShapeRegistry, ShapeSpec};
use crate::tracker::{DragState, InputTracker, PointerEvent};

/// Owns the whole interactive state; driven from a single thread.
pub struct Session {
    registry: ShapeRegistry,
    tracker: InputTracker,
    compositor: Compositor,
    canvas: RgbImage,
    /// Geometry of the last rendered frame; hit-testing runs against it.
    displayed: DisplayedGeometry,
}

impl Session {
    pub fn new(config: SceneConfig, specs: &[ShapeSpec]) -> Self {
        let registry = ShapeRegistry::new(specs);
        let displayed = registry.rest_geometry();
        log::info!(
            "scene: {} shapes on a {}x{} canvas",
            registry.len(),
            config.canvas_width,
            config.canvas_height
        );

        Self {
            registry,
            tracker: InputTracker::new(config.pick_radius()),
            compositor: Compositor::new(config.style),
            canvas: RgbImage::new(config.canvas_width, config.canvas_height),
            displayed,
        }
    }

    #[inline]
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    #[inline]
    pub fn drag(&self) -> Option<&DragState> {
        self.tracker.drag()
    }

    #[inline]
    pub fn displayed(&self) -> &DisplayedGeometry {
        &self.displayed
    }

    #[inline]
    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.compositor.style().background
    }

    /// Canvas size in pixels.
    #[inline]
    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    pub fn handle_pointer(&mut self, ev: PointerEvent) {
        self.tracker.handle(ev, &self.displayed);
    }

    /// Switches the dragged-shape highlight on or off; returns the new state.
    pub fn toggle_highlight(&mut self) -> bool {
        let next = match self.compositor.style().highlight_fill {
            Some(_) => None,
            None => Some(DEFAULT_HIGHLIGHT_FILL),
        };
        self.compositor.set_highlight_fill(next);
        next.is_some()
    }

    /// Recomputes the displayed geometry from the current drag and paints it.
    pub fn render_frame(&mut self) -> &RgbImage {
        self.displayed = frame_geometry(&self.registry, self.tracker.drag());
        self.compositor.render(
            &mut self.canvas,
            &self.registry,
            &self.displayed,
            self.tracker.drag(),
        );
        &self.canvas
    }
}

/// Geometry to show for `drag`: rest geometry when idle or when the drag
/// cannot define a transform.
pub fn frame_geometry(registry: &ShapeRegistry, drag: Option<&DragState>) -> DisplayedGeometry {
    let Some(drag) = drag else {
        return registry.rest_geometry();
    };

    match transformed_geometry(registry, drag) {
        Ok(geometry) => geometry,
        Err(err) => {
            log::debug!("{err}; showing rest geometry");
            registry.rest_geometry()
        }
    }
}

/// Derives the transform from the dragged shape alone (its rest quad onto the
/// same quad with the dragged vertex at the pointer) and applies it to every
/// rest vertex in the scene.
pub fn transformed_geometry(
    registry: &ShapeRegistry,
    drag: &DragState,
) -> Result<DisplayedGeometry, HomographyError> {
    let Some(shape) = registry.shape(drag.shape) else {
        return Ok(registry.rest_geometry());
    };

    let src = *shape.rest();
    let mut dst = src;
    if let Some(v) = dst.get_mut(drag.vertex) {
        *v = drag.position;
    }

    let h = Homography::derive(&src, &dst)?;
    let points = h.apply_batch(&registry.rest_points());
    Ok(DisplayedGeometry::from_points(&points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::PointerKind;
    use perspecta_engine::coords::Vec2;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn specs() -> Vec<ShapeSpec> {
        vec![
            ShapeSpec::new(v(5.0, 5.0), 10.0, 10.0, Color::rgb(130, 180, 255)),
            ShapeSpec::new(v(7.5, 2.5), 5.0, 5.0, Color::rgb(180, 255, 130)),
        ]
    }

    fn drag(shape: usize, vertex: usize, position: Vec2) -> DragState {
        DragState {
            shape,
            vertex,
            position,
        }
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(
            (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn idle_shows_rest_geometry_exactly() {
        let reg = ShapeRegistry::new(&specs());
        assert_eq!(frame_geometry(&reg, None), reg.rest_geometry());
    }

    #[test]
    fn dragged_corner_lands_on_pointer() {
        let reg = ShapeRegistry::new(&specs());
        let g = frame_geometry(&reg, Some(&drag(0, 2, v(20.0, 20.0))));

        let q = g.quad(0).unwrap();
        assert_close(q[0], v(0.0, 0.0));
        assert_close(q[1], v(10.0, 0.0));
        assert_close(q[2], v(20.0, 20.0));
        assert_close(q[3], v(0.0, 10.0));
    }

    #[test]
    fn other_shapes_follow_the_same_transform() {
        let reg = ShapeRegistry::new(&specs());
        let g = frame_geometry(&reg, Some(&drag(0, 2, v(20.0, 20.0))));

        // Second shape rests at (5,0) (10,0) (10,5) (5,5).
        let q = g.quad(1).unwrap();
        assert_close(q[0], v(4.0, 0.0));
        assert_close(q[1], v(10.0, 0.0));
        assert_close(q[2], v(40.0 / 3.0, 20.0 / 3.0));
        // The square's diagonal intersection is a fixed point of this drag.
        assert_close(q[3], v(5.0, 5.0));
        assert_ne!(q[2], reg.shape(1).unwrap().rest()[2]);
    }

    #[test]
    fn degenerate_drag_falls_back_to_rest() {
        let reg = ShapeRegistry::new(&specs());

        let collinear = drag(0, 2, v(5.0, 5.0));
        assert!(transformed_geometry(&reg, &collinear).is_err());
        assert_eq!(frame_geometry(&reg, Some(&collinear)), reg.rest_geometry());

        let on_edge = drag(0, 2, v(20.0, 0.0));
        assert_eq!(frame_geometry(&reg, Some(&on_edge)), reg.rest_geometry());
    }

    #[test]
    fn far_drag_still_transforms_the_scene() {
        let reg = ShapeRegistry::new(&crate::layout::fixed_layout());
        for target in [v(1e7, 1e7), v(-1e7, 5.0)] {
            let g = transformed_geometry(&reg, &drag(0, 0, target)).unwrap();
            let q = g.quad(0).unwrap();
            assert!(q[0].distance(target) <= 1.0, "expected {target:?}, got {:?}", q[0]);
            assert_close(q[1], reg.shape(0).unwrap().rest()[1]);
        }
    }

    #[test]
    fn session_round_trip_through_pointer_events() {
        let config = SceneConfig {
            canvas_width: 64,
            canvas_height: 48,
            ..SceneConfig::default()
        };
        let mut s = Session::new(config, &specs());
        s.render_frame();
        assert_eq!(s.displayed(), &s.registry().rest_geometry());

        s.handle_pointer(PointerEvent::new(PointerKind::Down, v(10.0, 10.0)));
        let d = s.drag().copied().unwrap();
        assert_eq!((d.shape, d.vertex), (0, 2));

        s.handle_pointer(PointerEvent::new(PointerKind::Move, v(20.0, 20.0)));
        s.render_frame();
        assert_close(s.displayed().quad(0).unwrap()[2], v(20.0, 20.0));
        // Red marker under the dragged vertex.
        assert_eq!(s.canvas().get_pixel(20, 20).0, [255, 0, 0]);

        s.handle_pointer(PointerEvent::new(PointerKind::Up, v(20.0, 20.0)));
        assert!(s.drag().is_none());
        s.render_frame();
        assert_eq!(s.displayed(), &s.registry().rest_geometry());
        assert_eq!(s.canvas_size(), (64, 48));
    }

    #[test]
    fn highlight_toggles() {
        let mut s = Session::new(SceneConfig::default(), &specs());
        assert!(s.toggle_highlight());
        assert!(!s.toggle_highlight());
    }
}
