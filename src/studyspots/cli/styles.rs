//! Styles for the studyspots CLI.
//!
//! Templates refer to semantic style names (see [`names`]) through the `style` filter,
//! never to colors. [`SPOTS_THEME`] maps each name to a `console::Style`, so the look can
//! change without touching templates or layout code.
//!
//! A name missing from the theme renders with a `(!?)` prefix so typos in templates show up
//! in the output instead of silently rendering unstyled.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const FAVORITE: &str = "favorite";
    pub const AREA: &str = "area";
    pub const TAG: &str = "tag";
    pub const HEADER: &str = "header";
    pub const PLAIN: &str = "plain";
}

#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static SPOTS_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(246);
    Theme::new()
        .add(names::TITLE, Style::new().bold())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, Style::new().color256(240))
        .add(names::FAVORITE, Style::new().yellow().bold())
        .add(names::AREA, Style::new().cyan())
        .add(names::TAG, muted.italic())
        .add(names::HEADER, Style::new().bold().underlined())
        .add(names::PLAIN, Style::new())
});
