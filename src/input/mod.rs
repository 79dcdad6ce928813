//! Pointer handling for the 3D view.
//!
//! Hosts translate their native events into [`InputEvent`]s; the
//! [`InputProcessor`] tracks drags and clicks and emits [`SceneCommand`]s.

/// Host-independent pointer events and DOM conversions.
pub mod event;
/// Drag, click and hover tracking.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, SceneCommand};
