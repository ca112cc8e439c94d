//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print output
//!
//! Handlers that show catalog data load it first; `prefs` and `config` never touch the
//! catalog, so they work even when the data directory is missing. Spot views (`list`,
//! `favorites`, `fav`) only need `spots.json`; mall views fail without `malls.json`.

use super::render::{
    print_messages, render_malls, render_page, render_prefs, render_text_list, Message,
    PageHeading,
};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, Cli, Commands,
    FilterArgs, MallCommands, MiscCommands, SpotCommands,
};
use clap::Parser;
use console::Term;
use std::path::PathBuf;
use studyspots::api::{SpotsApi, View};
use studyspots::catalog::DirSource;
use studyspots::config::{SpotsConfig, CONFIG_KEYS};
use studyspots::error::{Result, SpotsError};
use studyspots::filter::{FilterState, ANY};
use studyspots::init::initialize;
use studyspots::model::ItemId;
use studyspots::store::fs_backend::FsBackend;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct AppContext {
    api: SpotsApi<FsBackend, DirSource>,
    config: SpotsConfig,
    storage_dir: PathBuf,
    data_dir: PathBuf,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Top level uses grouped help, subcommands use clap's default
    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_tracing(cli.verbose);

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.as_deref());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Spots(cmd)) => match cmd {
            SpotCommands::List { filters, page } => {
                handle_browse(&mut ctx, View::AllSpots, filters, page)
            }
            SpotCommands::Favorites { filters, page } => {
                handle_browse(&mut ctx, View::Favorites, filters, page)
            }
            SpotCommands::Fav { id } => handle_fav(&mut ctx, id),
        },
        Some(Commands::Malls(cmd)) => match cmd {
            MallCommands::Malls { area, search } => handle_malls(&mut ctx, area, search),
            MallCommands::Mall { id, filters, page } => {
                handle_browse(&mut ctx, View::Mall(ItemId::new(id)), filters, page)
            }
            MallCommands::Areas => handle_areas(&mut ctx),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Prefs { columns, per_page } => handle_prefs(&mut ctx, columns, per_page),
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Help { command } => handle_help(command.as_deref()),
        },
        None => handle_browse(&mut ctx, View::AllSpots, FilterArgs::default(), 1),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("studyspots=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "studyspots=warn".into())
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.data.clone())?;

    let use_color =
        !cli.no_color && ctx.config.color && Term::stdout().features().colors_supported();
    if !use_color {
        colored::control::set_override(false);
    }

    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
        storage_dir: ctx.storage_dir,
        data_dir: ctx.data_dir,
        use_color,
    })
}

fn filter_state(filters: &FilterArgs) -> FilterState {
    let choice = |value: &Option<String>| value.clone().unwrap_or_else(|| ANY.to_string());
    FilterState::new()
        .category(&choice(&filters.category))
        .area(&choice(&filters.area))
        .noise(&choice(&filters.noise))
        .charging(&choice(&filters.charging))
        .wifi(&choice(&filters.wifi))
        .search(filters.search.clone().unwrap_or_default())
}

/// "area: North · search: desk" for the flags that were given.
fn filter_summary(filters: &FilterArgs) -> Option<String> {
    let parts: Vec<String> = [
        ("category", &filters.category),
        ("area", &filters.area),
        ("noise", &filters.noise),
        ("charging", &filters.charging),
        ("wifi", &filters.wifi),
        ("search", &filters.search),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_ref().map(|v| format!("{}: {}", name, v)))
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

fn handle_browse(ctx: &mut AppContext, view: View, filters: FilterArgs, page: usize) -> Result<()> {
    match view {
        View::Mall(_) => ctx.api.load()?,
        View::AllSpots | View::Favorites => ctx.api.load_spots_first()?,
    }

    let summary = filter_summary(&filters);
    let heading = match &view {
        View::AllSpots => PageHeading {
            title: "Study spots".to_string(),
            subtitle: summary,
            empty_message: "No study spots match these filters.".to_string(),
        },
        View::Favorites => PageHeading {
            title: "Favorite spots".to_string(),
            subtitle: summary,
            empty_message: "No favorites yet. Add one with `studyspots fav <ID>`.".to_string(),
        },
        View::Mall(id) => {
            let mall = ctx.api.mall(id)?;
            let mut subtitle = mall.area.clone();
            if let Some(description) = mall.description.as_deref().filter(|d| !d.is_empty()) {
                subtitle.push_str(" · ");
                subtitle.push_str(description);
            }
            if let Some(summary) = summary {
                subtitle.push_str(" · ");
                subtitle.push_str(&summary);
            }
            PageHeading {
                title: mall.name,
                subtitle: Some(subtitle),
                empty_message: "No spots in this mall match these filters.".to_string(),
            }
        }
    };

    let mut page_view = ctx.api.browse(view, filter_state(&filters))?;
    if page != page_view.page.current {
        page_view = ctx.api.go_to_page(page)?;
    }

    println!("{}", render_page(&page_view, &heading, ctx.use_color));
    Ok(())
}

fn handle_fav(ctx: &mut AppContext, id: String) -> Result<()> {
    ctx.api.load_spots_first()?;
    let id = ItemId::new(id);

    let catalog = ctx.api.catalog()?;
    let name = catalog
        .spots
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name.clone())
        .or_else(|| {
            catalog
                .malls
                .iter()
                .find(|m| m.id == id)
                .map(|m| m.name.clone())
        })
        .ok_or_else(|| SpotsError::Api(format!("No spot or mall with id {}", id)))?;

    let message = if ctx.api.toggle_favorite(&id) {
        Message::success(format!("Added {} to favorites", name))
    } else {
        Message::info(format!("Removed {} from favorites", name))
    };
    print_messages(&[message]);
    Ok(())
}

fn handle_malls(ctx: &mut AppContext, area: Option<String>, search: Option<String>) -> Result<()> {
    ctx.api.load()?;
    let state = FilterState::new()
        .area(area.as_deref().unwrap_or(ANY))
        .search(search.unwrap_or_default());

    let malls = ctx.api.malls(&state)?;
    print!("{}", render_malls(&malls, ctx.use_color));
    Ok(())
}

fn handle_areas(ctx: &mut AppContext) -> Result<()> {
    ctx.api.load()?;
    print!(
        "{}",
        render_text_list("Spot areas", &ctx.api.areas()?, "No spots.", ctx.use_color)
    );
    print!(
        "{}",
        render_text_list("Mall areas", &ctx.api.mall_areas()?, "No malls.", ctx.use_color)
    );
    Ok(())
}

fn handle_prefs(ctx: &mut AppContext, columns: Option<i64>, per_page: Option<i64>) -> Result<()> {
    let changed = columns.is_some() || per_page.is_some();
    if let Some(columns) = columns {
        ctx.api.set_columns(columns);
    }
    if let Some(per_page) = per_page {
        ctx.api.set_items_per_page(per_page);
    }

    print!("{}", render_prefs(&ctx.api.preferences(), ctx.use_color));
    if changed {
        print_messages(&[Message::success("View preferences saved")]);
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            let lines: Vec<String> = CONFIG_KEYS
                .iter()
                .map(|k| format!("{} = {}", k, ctx.config.get(k).unwrap_or_default()))
                .collect();
            print!(
                "{}",
                render_text_list("Configuration", &lines, "No configuration values.", ctx.use_color)
            );
            print_messages(&[Message::info(format!(
                "Reading catalog from {}",
                ctx.data_dir.display()
            ))]);
        }
        (Some(key), None) => {
            let value = ctx
                .config
                .get(&key)
                .ok_or_else(|| SpotsError::Config(format!("Unknown config key: {}", key)))?;
            println!("{}", value);
        }
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.storage_dir)?;
            let shown = ctx.config.get(&key).unwrap_or_default();
            print_messages(&[Message::success(format!("{} = {}", key, shown))]);
        }
    }
    Ok(())
}

fn handle_help(command: Option<&str>) -> Result<()> {
    match command {
        Some(cmd) => print_help_for_command(cmd),
        None => print_grouped_help(),
    }
    Ok(())
}
