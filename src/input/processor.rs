//! Converts raw pointer events into scene commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! drag detection, modifier keys). A press followed by a release with no
//! significant movement is a click; movement while pressed orbits (or pans
//! with shift or the secondary buttons) and suppresses the click.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};

/// Squared pixel distance beyond which a press becomes a drag.
const DRAG_THRESHOLD_SQ: f32 = 4.0;

/// What the 3D scene should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// Update hover under the cursor.
    PointerMove {
        /// Cursor position in pixels.
        pos: Vec2,
    },
    /// Toggle selection of whatever is under the cursor.
    Click {
        /// Cursor position in pixels.
        pos: Vec2,
    },
    /// Orbit the camera.
    Rotate {
        /// Pointer delta in pixels.
        delta: Vec2,
    },
    /// Pan the camera.
    Pan {
        /// Pointer delta in pixels.
        delta: Vec2,
    },
    /// Dolly the camera.
    Zoom {
        /// Scroll amount (positive = closer).
        delta: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    button: MouseButton,
    origin: Vec2,
    dragging: bool,
}

/// Converts raw input events into [`SceneCommand`]s.
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    mouse_pos: Vec2,
    press: Option<Press>,
    shift_pressed: bool,
}

impl InputProcessor {
    /// Create a processor with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Whether any tracked button is held.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<SceneCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(SceneCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<SceneCommand> {
        let pos = Vec2::new(x, y);
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;

        let Some(press) = self.press.as_mut() else {
            return Some(SceneCommand::PointerMove { pos });
        };
        if pos.distance_squared(press.origin) > DRAG_THRESHOLD_SQ {
            press.dragging = true;
        }
        if !press.dragging {
            return None;
        }
        let pan = self.shift_pressed || press.button != MouseButton::Left;
        Some(if pan {
            SceneCommand::Pan { delta }
        } else {
            SceneCommand::Rotate { delta }
        })
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<SceneCommand> {
        if pressed {
            if self.press.is_none() {
                self.press = Some(Press {
                    button,
                    origin: self.mouse_pos,
                    dragging: false,
                });
            }
            return None;
        }

        let press = self.press.filter(|p| p.button == button)?;
        self.press = None;
        (!press.dragging && button == MouseButton::Left).then_some(
            SceneCommand::Click {
                pos: self.mouse_pos,
            },
        )
    }
}
