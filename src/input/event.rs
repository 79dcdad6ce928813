/// Pixels of DOM `deltaY` that count as one zoom step.
const PIXELS_PER_STEP: f32 = 100.0;
/// Lines of DOM `deltaY` that count as one zoom step.
const LINES_PER_STEP: f32 = 3.0;

/// Pointer and keyboard input inside the 3D container, independent of the
/// page that produced it.
///
/// An [`InputProcessor`](super::InputProcessor) turns a stream of these
/// into [`SceneCommand`](super::SceneCommand)s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position relative to the container's top-left corner.
    CursorMoved {
        /// Pixels from the left edge.
        x: f32,
        /// Pixels from the top edge.
        y: f32,
    },
    /// A button went down or up.
    MouseButton {
        /// The button.
        button: MouseButton,
        /// Down when `true`.
        pressed: bool,
    },
    /// Zoom steps; positive moves toward the molecule.
    Scroll {
        /// Number of steps, possibly fractional.
        delta: f32,
    },
    /// Shift switches a left drag from orbit to pan.
    ModifiersChanged {
        /// Shift currently held.
        shift: bool,
    },
}

impl InputEvent {
    /// Button change from a DOM `mousedown` / `mouseup`.
    #[must_use]
    pub fn dom_button(code: i16, pressed: bool) -> Self {
        Self::MouseButton {
            button: MouseButton::from_dom(code),
            pressed,
        }
    }

    /// Zoom steps from a DOM `WheelEvent`.
    ///
    /// `delta_mode` is `WheelEvent.deltaMode` (0 pixels, 1 lines, 2 pages).
    /// Scrolling down zooms out.
    #[must_use]
    pub fn dom_wheel(delta_y: f32, delta_mode: u32) -> Self {
        let steps = match delta_mode {
            0 => delta_y / PIXELS_PER_STEP,
            1 => delta_y / LINES_PER_STEP,
            _ => delta_y,
        };
        Self::Scroll { delta: -steps }
    }
}

/// Buttons the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Orbits, pans with shift, and picks on click.
    Left,
    /// Pans.
    Right,
    /// Pans.
    Middle,
}

impl MouseButton {
    /// Map `MouseEvent.button`. Back and forward buttons count as left.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}
