//! # CLI Templates
//!
//! Output templates live in stand-alone files under `templates/` and are included here as
//! string constants.
//!
//! They are minijinja templates rendered with `trim_blocks` enabled: the newline right after
//! a block tag is dropped. A line that must end with a newline after a closing tag therefore
//! needs an explicit empty line below it (see the cell loop in `grid.tmp`).
//!
//! Layout math (widths, truncation, padding) stays in Rust; templates only choose styles and
//! arrange pre-computed text.

pub const GRID_TEMPLATE: &str = include_str!("templates/grid.tmp");
pub const MALLS_TEMPLATE: &str = include_str!("templates/malls.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const PREFS_TEMPLATE: &str = include_str!("templates/prefs.tmp");
