//! # Rendering Module
//!
//! Turns API values ([`PageView`], [`MallCard`], preferences) into terminal text.
//!
//! The card grid is laid out in Rust: each card becomes a fixed number of lines, the cards of
//! one row are zipped side by side, and every cell carries pre-computed padding so columns line
//! up regardless of styling. Templates then apply semantic styles through the `style` filter.
//!
//! Short status messages (favorite toggled, config saved) are printed with `colored`.

use super::styles::{names, Theme, SPOTS_THEME};
use super::templates::{GRID_TEMPLATE, MALLS_TEMPLATE, PREFS_TEMPLATE, TEXT_LIST_TEMPLATE};
use colored::Colorize;
use minijinja::{Environment, Value};
use serde::Serialize;
use studyspots::api::{Card, MallCard, PageView};
use studyspots::paginate::PageInfo;
use studyspots::prefs::{
    ViewPreferences, MAX_COLUMNS, MAX_ITEMS_PER_PAGE, MIN_COLUMNS, MIN_ITEMS_PER_PAGE,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const GUTTER: usize = 3;
pub const FAVORITE_MARKER: &str = "★";
const CARD_LINES: usize = 5;

#[derive(Serialize)]
struct Cell {
    text: String,
    style: &'static str,
    padding: String,
}

#[derive(Serialize)]
struct GridData {
    header: String,
    subheader: Option<String>,
    rows: Vec<Vec<Vec<Cell>>>,
    empty: bool,
    empty_message: String,
    footer: String,
}

#[derive(Serialize)]
struct MallLine {
    id: String,
    name: String,
    area: String,
    spots: String,
    description: String,
}

#[derive(Serialize)]
struct MallsData {
    header: String,
    malls: Vec<MallLine>,
    empty_message: String,
}

#[derive(Serialize)]
struct TextListData {
    header: String,
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct PrefsData {
    columns: u8,
    items_per_page: usize,
    columns_range: String,
    items_per_page_range: String,
}

fn environment(theme: &Theme, use_color: bool) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    let theme = theme.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
    env
}

fn render_template<T: Serialize>(template: &str, data: &T, use_color: bool) -> String {
    let env = environment(&SPOTS_THEME, use_color);
    env.render_str(template, data)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Header text and optional subheader for a page of cards.
pub struct PageHeading {
    pub title: String,
    pub subtitle: Option<String>,
    pub empty_message: String,
}

pub fn render_page(view: &PageView, heading: &PageHeading, use_color: bool) -> String {
    let columns = usize::from(view.columns.max(1));
    let width = card_width(columns);

    let rows = view
        .cards
        .chunks(columns)
        .map(|chunk| layout_row(chunk, width))
        .collect();

    let data = GridData {
        header: heading.title.clone(),
        subheader: heading.subtitle.clone(),
        rows,
        empty: view.cards.is_empty(),
        empty_message: heading.empty_message.clone(),
        footer: page_footer(&view.page),
    };
    render_template(GRID_TEMPLATE, &data, use_color)
}

pub fn render_malls(malls: &[MallCard], use_color: bool) -> String {
    let lines = malls
        .iter()
        .map(|mall| MallLine {
            id: mall.id.to_string(),
            name: mall.name.clone(),
            area: mall.area.clone(),
            spots: plural(mall.spot_count, "spot"),
            description: truncate_to_width(&mall.description, LINE_WIDTH - 4),
        })
        .collect();

    let data = MallsData {
        header: "Malls".to_string(),
        malls: lines,
        empty_message: "No malls match these filters.".to_string(),
    };
    render_template(MALLS_TEMPLATE, &data, use_color)
}

pub fn render_text_list(header: &str, lines: &[String], empty_message: &str, use_color: bool) -> String {
    let data = TextListData {
        header: header.to_string(),
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };
    render_template(TEXT_LIST_TEMPLATE, &data, use_color)
}

pub fn render_prefs(prefs: &ViewPreferences, use_color: bool) -> String {
    let data = PrefsData {
        columns: prefs.columns,
        items_per_page: prefs.items_per_page,
        columns_range: format!("({}-{})", MIN_COLUMNS, MAX_COLUMNS),
        items_per_page_range: format!("({}-{})", MIN_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE),
    };
    render_template(PREFS_TEMPLATE, &data, use_color)
}

fn card_width(columns: usize) -> usize {
    LINE_WIDTH.saturating_sub(GUTTER * (columns - 1)) / columns
}

/// The text lines of one card, each with its style, already fitted to `width`.
fn card_lines(card: &Card, width: usize) -> Vec<Vec<(String, &'static str)>> {
    let marker = if card.is_favorite {
        format!("{} ", FAVORITE_MARKER)
    } else {
        "  ".to_string()
    };
    let name_width = width.saturating_sub(marker.width());

    let mut place = card.area.clone();
    if let Some(mall) = &card.mall_name {
        place.push_str(" · ");
        place.push_str(mall);
    }

    let tags: Vec<&str> = [&card.noise, &card.charging, &card.wifi, &card.category]
        .into_iter()
        .filter_map(|t| t.as_deref())
        .collect();

    vec![
        vec![
            (marker, names::FAVORITE),
            (truncate_to_width(&card.name, name_width), names::TITLE),
        ],
        vec![(truncate_to_width(&place, width), names::AREA)],
        vec![(truncate_to_width(&tags.join(" · "), width), names::TAG)],
        vec![(truncate_to_width(&card.description, width), names::MUTED)],
        vec![(truncate_to_width(&format!("#{}", card.id), width), names::FAINT)],
    ]
}

fn layout_row(cards: &[Card], width: usize) -> Vec<Vec<Cell>> {
    let laid_out: Vec<_> = cards.iter().map(|c| card_lines(c, width)).collect();

    (0..CARD_LINES)
        .map(|line_idx| {
            let mut cells = Vec::new();
            for (card_idx, lines) in laid_out.iter().enumerate() {
                let is_last = card_idx + 1 == laid_out.len();
                let parts = &lines[line_idx];
                let used: usize = parts.iter().map(|(text, _)| text.width()).sum();
                let count = parts.len();
                for (part_idx, &(ref text, style)) in parts.iter().enumerate() {
                    let padding = if part_idx + 1 < count || is_last {
                        String::new()
                    } else {
                        " ".repeat(width.saturating_sub(used) + GUTTER)
                    };
                    cells.push(Cell {
                        text: text.clone(),
                        style,
                        padding,
                    });
                }
            }
            cells
        })
        .collect()
}

fn page_footer(page: &PageInfo) -> String {
    if page.item_count == 0 {
        return "0 spots".to_string();
    }
    let mut footer = format!(
        "Page {} of {} · {}",
        page.current,
        page.total,
        plural(page.item_count, "spot")
    );
    if page.has_prev {
        footer.push_str(&format!(" · prev: --page {}", page.current - 1));
    }
    if page.has_next {
        footer.push_str(&format!(" · next: --page {}", page.current + 1));
    }
    footer
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: MessageLevel,
    pub content: String,
}

impl Message {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

pub fn print_messages(messages: &[Message]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyspots::model::ItemId;

    fn card(id: &str, name: &str) -> Card {
        Card {
            id: ItemId::new(id),
            name: name.to_string(),
            area: "North".to_string(),
            mall_name: None,
            category: Some("cafe".to_string()),
            noise: Some("Quiet".to_string()),
            charging: None,
            wifi: Some("Wi-Fi".to_string()),
            description: "Big tables by the window".to_string(),
            image: None,
            is_favorite: false,
        }
    }

    fn page(cards: Vec<Card>, columns: u8, current: usize, total: usize, count: usize) -> PageView {
        PageView {
            cards,
            page: PageInfo {
                current,
                total,
                item_count: count,
                items_per_page: 30,
                has_prev: current > 1,
                has_next: current < total,
            },
            columns,
        }
    }

    fn heading() -> PageHeading {
        PageHeading {
            title: "Study spots".to_string(),
            subtitle: None,
            empty_message: "No study spots match these filters.".to_string(),
        }
    }

    #[test]
    fn test_render_empty_page() {
        let output = render_page(&page(vec![], 3, 1, 0, 0), &heading(), false);
        assert!(output.starts_with("Study spots\n"));
        assert!(output.contains("No study spots match these filters."));
        assert!(output.trim_end().ends_with("0 spots"));
    }

    #[test]
    fn test_render_single_column() {
        let output = render_page(&page(vec![card("s-1", "Nook")], 1, 1, 1, 1), &heading(), false);
        assert!(output.contains("  Nook"));
        assert!(output.contains("Quiet · Wi-Fi · cafe"));
        assert!(output.contains("#s-1"));
        assert!(output.contains("Page 1 of 1 · 1 spot"));
        assert!(!output.contains("next:"));
    }

    #[test]
    fn test_cards_side_by_side() {
        let cards = vec![card("1", "Alpha"), card("2", "Beta"), card("3", "Gamma")];
        let output = render_page(&page(cards, 3, 1, 1, 3), &heading(), false);

        let title_line = output
            .lines()
            .find(|l| l.contains("Alpha"))
            .unwrap();
        assert!(title_line.contains("Beta"));
        assert!(title_line.contains("Gamma"));
        let beta_at = title_line.find("Beta").unwrap();
        assert_eq!(beta_at, card_width(3) + GUTTER + 2);
        assert_eq!(title_line, title_line.trim_end());
    }

    #[test]
    fn test_rows_wrap_at_column_count() {
        let cards = vec![card("1", "Alpha"), card("2", "Beta"), card("3", "Gamma")];
        let output = render_page(&page(cards, 2, 1, 1, 3), &heading(), false);
        let gamma_line = output.lines().find(|l| l.contains("Gamma")).unwrap();
        assert!(!gamma_line.contains("Alpha"));
    }

    #[test]
    fn test_favorite_marker() {
        let mut fav = card("1", "Alpha");
        fav.is_favorite = true;
        let output = render_page(&page(vec![fav], 1, 1, 1, 1), &heading(), false);
        assert!(output.contains(&format!("{} Alpha", FAVORITE_MARKER)));
    }

    #[test]
    fn test_footer_navigation_hints() {
        let output = render_page(&page(vec![card("1", "A")], 3, 2, 3, 67), &heading(), false);
        assert!(output.contains("Page 2 of 3 · 67 spots · prev: --page 1 · next: --page 3"));
    }

    #[test]
    fn test_subheader_and_mall_name() {
        let mut c = card("1", "Alpha");
        c.mall_name = Some("Central Plaza".to_string());
        let heading = PageHeading {
            title: "Central Plaza".to_string(),
            subtitle: Some("North".to_string()),
            empty_message: String::new(),
        };
        let output = render_page(&page(vec![c], 1, 1, 1, 1), &heading, false);
        assert!(output.starts_with("Central Plaza\nNorth\n"));
        assert!(output.contains("North · Central Plaza"));
    }

    #[test]
    fn test_render_with_color_includes_ansi() {
        let output = render_page(&page(vec![card("1", "Alpha")], 1, 1, 1, 1), &heading(), true);
        assert!(output.contains("\x1b["));
        assert!(output.contains("Alpha"));
    }

    #[test]
    fn test_render_malls() {
        let malls = vec![MallCard {
            id: ItemId::new("m-1"),
            name: "Central Plaza".to_string(),
            area: "North".to_string(),
            description: "Three floors".to_string(),
            image: None,
            spot_count: 4,
        }];
        let output = render_malls(&malls, false);
        assert!(output.contains("m-1 Central Plaza  North  4 spots"));
        assert!(output.contains("    Three floors"));

        let empty = render_malls(&[], false);
        assert!(empty.contains("No malls match these filters."));
    }

    #[test]
    fn test_render_text_list() {
        let lines = vec!["North".to_string(), "South".to_string()];
        let output = render_text_list("Areas", &lines, "No areas.", false);
        assert_eq!(output, "Areas\n  North\n  South\n");

        let empty = render_text_list("Areas", &[], "No areas.", false);
        assert!(empty.contains("No areas."));
    }

    #[test]
    fn test_render_prefs() {
        let output = render_prefs(&ViewPreferences::default(), false);
        assert!(output.contains("columns   3  (1-3)"));
        assert!(output.contains("per page  30  (12-60)"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_to_width("much too long", 6), "much …");
        assert_eq!(truncate_to_width("日本語のテキスト", 7), "日本語…");
    }
}
