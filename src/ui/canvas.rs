use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Program};
use iced::{Point, Rectangle, Renderer, Theme, Vector};

use crate::Message;

/// Trackpad scroll distance, in logical pixels, that makes one zoom step
const PIXELS_PER_ZOOM_STEP: f32 = 50.0;

/// Invisible layer stacked over the preview image.
/// Dragging moves the photo, the mouse wheel scales it.
pub struct PreviewGestures {
    /// Size of the composite shown underneath, in image pixels
    pub image_size: (u32, u32),
    /// Gestures only make sense once a photo is loaded
    pub enabled: bool,
}

impl PreviewGestures {
    /// Image pixels per screen pixel for a content-fit image in `bounds`
    fn image_pixels_per_point(&self, bounds: Rectangle) -> f32 {
        let (w, h) = self.image_size;
        if w == 0 || h == 0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
            return 1.0;
        }
        let fit = (bounds.width / w as f32).min(bounds.height / h as f32);
        1.0 / fit
    }
}

impl Program<Message> for PreviewGestures {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        _renderer: &Renderer,
        _theme: &Theme,
        _bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        // The composite itself is drawn by the image widget below
        vec![]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        if !self.enabled {
            return (canvas::event::Status::Ignored, None);
        }

        match event {
            // Mouse wheel for scaling
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) if cursor.is_over(bounds) => {
                let steps = match delta {
                    // One notch of a wheel is one step
                    mouse::ScrollDelta::Lines { y, .. } if y > 0.0 => 1,
                    mouse::ScrollDelta::Lines { y, .. } if y < 0.0 => -1,
                    mouse::ScrollDelta::Lines { .. } => 0,
                    mouse::ScrollDelta::Pixels { y, .. } => state.accumulate_scroll(y),
                };
                if steps != 0 {
                    return (canvas::event::Status::Captured, Some(Message::Zoom(steps)));
                }
                return (canvas::event::Status::Captured, None);
            }

            // Mouse button press - start dragging
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    state.is_dragging = true;
                    state.last_position = Some(pos);
                    state.remainder = Vector::new(0.0, 0.0);
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Mouse button release - stop dragging
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.is_dragging {
                    state.is_dragging = false;
                    state.last_position = None;
                    state.remainder = Vector::new(0.0, 0.0);
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Mouse move - move the photo if dragging
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let (true, Some(last)) = (state.is_dragging, state.last_position) {
                    let current = position - Vector::new(bounds.x, bounds.y);
                    let ratio = self.image_pixels_per_point(bounds);

                    let (dx, dy) = state.accumulate(
                        (current.x - last.x) * ratio,
                        (current.y - last.y) * ratio,
                    );
                    state.last_position = Some(current);

                    if dx != 0 || dy != 0 {
                        return (canvas::event::Status::Captured, Some(Message::Nudge(dx, dy)));
                    }
                    return (canvas::event::Status::Captured, None);
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if !self.enabled || !cursor.is_over(bounds) {
            mouse::Interaction::default()
        } else if state.is_dragging {
            mouse::Interaction::Grabbing
        } else {
            mouse::Interaction::Grab
        }
    }
}

/// State for drag and scroll interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub last_position: Option<Point>,
    /// Sub-pixel movement not yet sent as a whole-pixel nudge
    pub remainder: Vector,
    /// Pixel scroll not yet sent as a whole zoom step
    pub scroll: f32,
}

impl DragState {
    /// Add a movement in image pixels and take out the whole pixels
    fn accumulate(&mut self, dx: f32, dy: f32) -> (i32, i32) {
        let x = self.remainder.x + dx;
        let y = self.remainder.y + dy;
        let whole = (x.trunc(), y.trunc());
        self.remainder = Vector::new(x - whole.0, y - whole.1);
        (whole.0 as i32, whole.1 as i32)
    }

    /// Add a pixel scroll delta and take out the whole zoom steps
    fn accumulate_scroll(&mut self, dy: f32) -> i32 {
        let total = self.scroll + dy;
        let steps = (total / PIXELS_PER_ZOOM_STEP).trunc();
        self.scroll = total - steps * PIXELS_PER_ZOOM_STEP;
        steps as i32
    }
}
