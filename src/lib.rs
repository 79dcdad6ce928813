// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Protein structure viewer core.
//!
//! protview turns fixed-column PDB text into two projected 2D views and an
//! interactive 3D scene. Everything between the raw text and the drawing
//! surface lives here; hosts only supply canvases and forward pointer
//! events.
//!
//! # Key entry points
//!
//! - [`viewer::Viewer`] - host facade (`render_2d`, `load_3d`,
//!   `set_options`, `toggle_labels`, `resize`, `frame`)
//! - [`structure::parse_structure`] and [`bonds::infer_bonds`] - the data
//!   pipeline
//! - [`renderer::render_flat`] - one projected view onto a
//!   [`canvas::Canvas2d`]
//! - [`scene::SceneManager`] - 3D scene graph, orbit camera, picking and
//!   labels
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Parsing and bond inference run to completion first. The resulting atoms
//! and bonds are retained by a [`renderer::FlatSession`] (2D) and a
//! [`scene::SceneManager`] (3D), so restyles and resizes never re-parse.
//! Color lookups are shared through [`color`]. The 3D side produces a
//! serializable scene graph; drawing it is left to the host.

pub mod bonds;
pub mod camera;
pub mod canvas;
pub mod color;
pub mod error;
pub mod input;
pub mod lighting;
pub mod options;
pub mod projection;
pub mod renderer;
pub mod scene;
pub mod structure;
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use error::ProtviewError;
pub use options::Options;
pub use viewer::{Host, Viewer};
