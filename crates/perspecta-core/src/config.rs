use perspecta_engine::paint::Color;

/// Fill toggled onto the dragged shape when no explicit highlight is set.
pub const DEFAULT_HIGHLIGHT_FILL: Color = Color::rgb(255, 255, 255);

/// Drawing parameters for the compositor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    pub background: Color,
    pub outline: Color,
    /// Marker color for vertices not involved in a drag.
    pub vertex: Color,
    /// Marker color for the other vertices of the dragged shape.
    pub hint: Color,
    /// Marker color for the dragged vertex.
    pub drag: Color,
    /// Marker radius in canvas pixels.
    pub vertex_radius: i32,
    /// Weight of each shape layer when blended over the canvas.
    pub alpha: f32,
    /// Fill used for the dragged shape instead of its own color, when set.
    pub highlight_fill: Option<Color>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            outline: Color::WHITE,
            vertex: Color::rgb(255, 165, 0),
            hint: Color::rgb(0, 0, 255),
            drag: Color::rgb(255, 0, 0),
            vertex_radius: 5,
            alpha: 0.5,
            highlight_fill: None,
        }
    }
}

impl Style {
    /// Hit-test radius: twice the marker radius.
    #[inline]
    pub fn pick_radius(&self) -> f32 {
        (self.vertex_radius * 2) as f32
    }
}

/// Scene-wide configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub style: Style,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            style: Style::default(),
        }
    }
}

impl SceneConfig {
    #[inline]
    pub fn pick_radius(&self) -> f32 {
        self.style.pick_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SceneConfig::default();
        assert_eq!((cfg.canvas_width, cfg.canvas_height), (800, 600));
        assert_eq!(cfg.pick_radius(), 10.0);
        assert_eq!(cfg.style.highlight_fill, None);
        assert_eq!(cfg.style.alpha, 0.5);
    }
}
