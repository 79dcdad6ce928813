//! 2D projected views.
//!
//! [`render_flat`] draws one view of a structure onto any
//! [`Canvas2d`](crate::canvas::Canvas2d); [`FlatSession`] keeps what was
//! last drawn so both views can be replayed when the host resizes.

mod flat;
mod session;

pub use flat::{render_flat, RenderOutcome, LABEL_FONT, TITLE_FONT, TITLE_POSITION};
pub use session::{FlatReport, FlatSession};
