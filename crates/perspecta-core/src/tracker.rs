//! Pointer-driven drag state machine.
//!
//! `Idle --down on a vertex--> Dragging --move--> Dragging --up--> Idle`.
//! A pointer-down while dragging is ignored until release.

use perspecta_engine::coords::Vec2;
use perspecta_engine::input::{ButtonState, InputEvent, MouseButton};

use crate::geometry::DisplayedGeometry;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in canvas pixel coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Vec2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, pos: Vec2) -> Self {
        Self { kind, pos }
    }

    /// Extracts a primary-button pointer event from an engine input event.
    ///
    /// `to_canvas` maps window coordinates onto the canvas.
    pub fn from_input(ev: &InputEvent, to_canvas: impl Fn(Vec2) -> Vec2) -> Option<Self> {
        match ev {
            InputEvent::PointerMoved(m) => {
                Some(Self::new(PointerKind::Move, to_canvas(Vec2::new(m.x, m.y))))
            }
            InputEvent::PointerButton(b) if b.button == MouseButton::Left => {
                let kind = match b.state {
                    ButtonState::Pressed => PointerKind::Down,
                    ButtonState::Released => PointerKind::Up,
                };
                Some(Self::new(kind, to_canvas(Vec2::new(b.x, b.y))))
            }
            _ => None,
        }
    }
}

/// The vertex being dragged and where the pointer currently is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragState {
    pub shape: usize,
    pub vertex: usize,
    pub position: Vec2,
}

#[derive(Debug, Clone)]
pub struct InputTracker {
    pick_radius: f32,
    drag: Option<DragState>,
}

impl InputTracker {
    pub fn new(pick_radius: f32) -> Self {
        Self {
            pick_radius,
            drag: None,
        }
    }

    #[inline]
    pub fn pick_radius(&self) -> f32 {
        self.pick_radius
    }

    #[inline]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a drag on the nearest displayed vertex within the pick radius.
    ///
    /// Returns whether a drag started. Ignored while a drag is active.
    pub fn pointer_down(&mut self, pos: Vec2, displayed: &DisplayedGeometry) -> bool {
        if self.drag.is_some() {
            return false;
        }

        let Some((shape, vertex)) = pick_vertex(displayed, pos, self.pick_radius) else {
            return false;
        };

        log::debug!("drag start: shape {shape} vertex {vertex} at ({:.1}, {:.1})", pos.x, pos.y);
        self.drag = Some(DragState {
            shape,
            vertex,
            position: pos,
        });
        true
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            drag.position = pos;
        }
    }

    /// Ends the drag, if any, and returns its final state.
    pub fn pointer_up(&mut self) -> Option<DragState> {
        let ended = self.drag.take();
        if let Some(d) = &ended {
            log::debug!("drag end: shape {} vertex {}", d.shape, d.vertex);
        }
        ended
    }

    pub fn handle(&mut self, ev: PointerEvent, displayed: &DisplayedGeometry) {
        match ev.kind {
            PointerKind::Down => {
                self.pointer_down(ev.pos, displayed);
            }
            PointerKind::Move => self.pointer_move(ev.pos),
            PointerKind::Up => {
                self.pointer_up();
            }
        }
    }
}

/// Finds the displayed vertex closest to `pos` with distance strictly below
/// `radius`. Ties keep the first vertex in (shape, vertex) order.
pub fn pick_vertex(
    displayed: &DisplayedGeometry,
    pos: Vec2,
    radius: f32,
) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), f32)> = None;

    for (shape, quad) in displayed.quads().iter().enumerate() {
        for (vertex, v) in quad.iter().enumerate() {
            let d = v.distance(pos);
            if d < radius && best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some(((shape, vertex), d));
            }
        }
    }

    best.map(|(hit, _)| hit)
}
