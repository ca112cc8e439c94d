use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "studyspots",
    bin_name = "studyspots",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Browse and filter study spots and the malls that host them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding spots.json and malls.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Spots,
    Malls,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Spots => "Spot Commands:",
            CommandGroup::Malls => "Mall Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "favorites" | "fav" => Some(CommandGroup::Spots),
            "malls" | "mall" | "areas" => Some(CommandGroup::Malls),
            "prefs" | "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Spots, CommandGroup::Malls, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("studyspots {version}\n"));
    output.push_str("Browse and filter study spots and the malls that host them\n");
    output.push('\n');
    output.push_str("Usage: studyspots [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data <DIR>  Directory holding spots.json and malls.json\n");
    output.push_str("      --no-color    Disable colored output\n");
    output.push_str("  -v, --verbose     Verbose output\n");
    output.push_str("  -h, --help        Print help\n");
    output.push_str("  -V, --version     Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Spots(c)) => match c {
            SpotCommands::List { .. } => "list",
            SpotCommands::Favorites { .. } => "favorites",
            SpotCommands::Fav { .. } => "fav",
        },
        Some(Commands::Malls(c)) => match c {
            MallCommands::Malls { .. } => "malls",
            MallCommands::Mall { .. } => "mall",
            MallCommands::Areas => "areas",
        },
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Prefs { .. } => "prefs",
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
        None => {
            print_grouped_help();
            return;
        }
    };

    print_help_for_command(name);
}

pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Spots(SpotCommands),

    #[command(flatten)]
    Malls(MallCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

/// Filter controls shared by the spot listings. Unrecognized values are ignored.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterArgs {
    /// Category (e.g. cafe, library)
    #[arg(long)]
    pub category: Option<String>,

    /// Area
    #[arg(short, long)]
    pub area: Option<String>,

    /// Noise level: quiet, medium, noisy
    #[arg(long)]
    pub noise: Option<String>,

    /// Charging ports: none, limited, abundant
    #[arg(long)]
    pub charging: Option<String>,

    /// Wi-Fi: yes, no
    #[arg(long)]
    pub wifi: Option<String>,

    /// Search term (matches name or description)
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SpotCommands {
    /// List study spots
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// List favorite spots
    #[command(alias = "favs", display_order = 2)]
    Favorites {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Toggle a spot or mall as favorite
    #[command(display_order = 3)]
    Fav {
        /// Id of the spot or mall
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MallCommands {
    /// List malls
    #[command(display_order = 10)]
    Malls {
        /// Area
        #[arg(short, long)]
        area: Option<String>,

        /// Search term (matches name or description)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one mall and its spots
    #[command(display_order = 11)]
    Mall {
        /// Id of the mall
        id: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// List the areas used by spots and malls
    #[command(display_order = 12)]
    Areas,
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show or change view preferences
    #[command(display_order = 20)]
    Prefs {
        /// Cards per row (1-3)
        #[arg(long, allow_negative_numbers = true)]
        columns: Option<i64>,

        /// Cards per page (12-60)
        #[arg(long, allow_negative_numbers = true)]
        per_page: Option<i64>,
    },

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// Configuration key (data_dir, color)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for studyspots or a subcommand
    #[command(display_order = 22)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}
