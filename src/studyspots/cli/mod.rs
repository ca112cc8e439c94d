//! # CLI Behavior
//!
//! This is **one possible UI client** for studyspots, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the library.
//!
//! ## Naked Execution (`studyspots`)
//!
//! Running `studyspots` with no arguments defaults to `studyspots list`: the first page of
//! all spots, laid out in the stored number of columns.
//!
//! ## One Render Cycle Per Invocation
//!
//! Each invocation loads the catalog once, builds a single filter state from the flags,
//! and renders one page. Preferences and favorites persist between invocations; the
//! page number does not (use `--page`).
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print output
//! - `render`: Card grid layout and templated output
//! - `setup`: Argument parsing via clap, help text
//! - `styles`: Terminal theme
//! - `templates`: Output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
