use perspecta_core::{PointerEvent, PointerKind, Session};
use perspecta_engine::coords::Vec2;
use perspecta_engine::core::{App, AppControl, FrameCtx};
use perspecta_engine::input::{InputFrame, InputState, Key, MouseButton};
use perspecta_engine::render::{CanvasImage, CanvasRenderer};

/// Drives a [`Session`] from engine input and presents its canvas.
pub struct StudioApp {
    session: Session,
    renderer: CanvasRenderer,
}

impl StudioApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            renderer: CanvasRenderer::new(),
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let frame = ctx.input_frame;
        if frame.keys_pressed.contains(&Key::Q) || frame.keys_pressed.contains(&Key::Escape) {
            log::info!("quit requested");
            ctx.runtime.exit();
            return AppControl::Continue;
        }
        if frame.keys_pressed.contains(&Key::H) {
            let on = self.session.toggle_highlight();
            log::info!("drag highlight {}", if on { "on" } else { "off" });
        }

        // Window coordinates → canvas pixels (the canvas is stretched over the window).
        let viewport = ctx.window.viewport();
        let (cw, ch) = self.session.canvas_size();
        let to_canvas = |p: Vec2| viewport.map_to(p, cw, ch);

        feed_pointer(&mut self.session, frame, ctx.input, to_canvas);

        let clear = self.session.background();
        let (session, renderer) = (&mut self.session, &mut self.renderer);
        let canvas = session.render_frame();
        let image = CanvasImage {
            width: canvas.width(),
            height: canvas.height(),
            rgb: canvas.as_raw(),
        };

        ctx.render(clear, |rctx, target| renderer.render(rctx, target, image))
    }
}

/// Forwards the frame's primary-button pointer events to `session`.
///
/// A drag still active while the held state says the button is up lost its
/// release to focus loss; it is ended here.
fn feed_pointer(
    session: &mut Session,
    frame: &InputFrame,
    input: &InputState,
    to_canvas: impl Fn(Vec2) -> Vec2,
) {
    for ev in &frame.events {
        if let Some(pointer) = PointerEvent::from_input(ev, &to_canvas) {
            session.handle_pointer(pointer);
        }
    }

    if session.drag().is_some() && !input.button_down(MouseButton::Left) {
        session.handle_pointer(PointerEvent::new(PointerKind::Up, Vec2::zero()));
    }
}

#[cfg(test)]
mod tests {
    use perspecta_core::{SceneConfig, fixed_layout};
    use perspecta_engine::input::{ButtonState, InputEvent, PointerButtonEvent, PointerMoveEvent};

    use super::*;

    fn session() -> Session {
        Session::new(SceneConfig::default(), &fixed_layout())
    }

    fn apply(state: &mut InputState, frame: &mut InputFrame, events: Vec<InputEvent>) {
        for ev in events {
            state.apply_event(frame, ev);
        }
    }

    fn left(state: ButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y })
    }

    #[test]
    fn held_button_keeps_drag_across_frames() {
        let mut s = session();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        // Top-left corner of the first fixed square.
        apply(&mut state, &mut frame, vec![left(ButtonState::Pressed, 165.0, 105.0)]);
        feed_pointer(&mut s, &frame, &state, |p| p);
        frame.clear();
        assert!(s.drag().is_some());

        apply(
            &mut state,
            &mut frame,
            vec![InputEvent::PointerMoved(PointerMoveEvent { x: 120.0, y: 90.0 })],
        );
        feed_pointer(&mut s, &frame, &state, |p| p);
        let drag = s.drag().expect("drag survives a move");
        assert_eq!((drag.shape, drag.vertex), (0, 0));
        assert_eq!(drag.position, Vec2::new(120.0, 90.0));
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut s = session();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        apply(&mut state, &mut frame, vec![left(ButtonState::Pressed, 165.0, 105.0)]);
        feed_pointer(&mut s, &frame, &state, |p| p);
        frame.clear();
        assert!(s.drag().is_some());

        apply(&mut state, &mut frame, vec![InputEvent::Focused(false)]);
        feed_pointer(&mut s, &frame, &state, |p| p);
        assert!(s.drag().is_none());
    }

    #[test]
    fn press_and_release_in_one_frame_leaves_no_drag() {
        let mut s = session();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        apply(
            &mut state,
            &mut frame,
            vec![
                left(ButtonState::Pressed, 165.0, 105.0),
                left(ButtonState::Released, 170.0, 110.0),
            ],
        );
        feed_pointer(&mut s, &frame, &state, |p| p);
        assert!(s.drag().is_none());
    }
}
