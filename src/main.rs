//! fdash - CLI entry point
//!
//! Opens the interactive dashboard, or edits the persisted widget layout
//! directly from the command line.

use clap::{Parser, Subcommand};
use factory_dashboard::config::{default, xdg, Config, ConfigLoader};
use factory_dashboard::layout::{DashboardRenderer, LayoutEditor, LayoutStore};
use factory_dashboard::tui::app::App;
use factory_dashboard::{logging, open_layout_store, DynStore, StorageOverrides};
use std::path::PathBuf;
use std::process::ExitCode;

/// Factory dashboard widget layout
#[derive(Parser)]
#[command(name = "fdash")]
#[command(version, about = "Factory dashboard widget layout")]
struct Cli {
    /// Configuration file (defaults to the XDG config path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage directory, overriding `storage.dir`
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Keep all state in memory for this run
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the fdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface
    Tui,

    /// Inspect or edit the saved widget layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// Print visible panels in display order, then hidden widgets
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip visibility of one or more widgets and save
    ///
    /// Unlike the settings screen, where an unknown id is ignored, an unknown
    /// id here is reported as an error and nothing is saved.
    Toggle {
        /// Widget ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move the widget at INDEX (0-based, hidden widgets included) one slot earlier
    MoveUp {
        /// Position in the full layout
        index: usize,
    },
    /// Move the widget at INDEX (0-based, hidden widgets included) one slot later
    MoveDown {
        /// Position in the full layout
        index: usize,
    },
    /// Restore and save the default layout
    Reset,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config commands must work even when the current file is broken.
    if let Commands::Config { action } = cli.command {
        return run_config_command(cli.config.as_deref(), action);
    }

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_result = match cli.command {
        Commands::Tui => logging::init_for_tui(&config.logging),
        _ => logging::init(&config.logging),
    };
    if let Err(e) = log_result {
        eprintln!("Warning: could not open log file {}: {e}", config.logging.log_file);
    }

    let overrides = StorageOverrides {
        dir: cli.storage_dir,
        ephemeral: cli.ephemeral,
    };
    let store = open_layout_store(&config, &overrides);

    match cli.command {
        Commands::Tui => run_tui(store, &config),
        Commands::Layout { action } => run_layout_command(&store, action),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

fn run_tui(store: LayoutStore<DynStore>, config: &Config) -> ExitCode {
    let tick_rate = match config.tui.tick_rate() {
        Ok(rate) => rate,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = App::new(store, config.tui.columns);
    if let Err(e) = app.run(tick_rate) {
        eprintln!("TUI error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_layout_command(store: &LayoutStore<DynStore>, action: LayoutAction) -> ExitCode {
    let editor = LayoutEditor::new(*store.registry());

    match action {
        LayoutAction::Show { json } => {
            let view = DashboardRenderer::new(*store.registry()).mount(store);
            if json {
                match serde_json::to_string_pretty(&view) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("Visible:");
                for panel in &view.panels {
                    println!("  {}. {} ({})", panel.rank, panel.title, panel.id);
                }
                if !view.hidden.is_empty() {
                    println!("Hidden:");
                    for id in &view.hidden {
                        println!("  {id}");
                    }
                }
            }
            return ExitCode::SUCCESS;
        }
        LayoutAction::Reset => {
            return match store.reset() {
                Ok(_) => {
                    println!("Restored default layout");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            };
        }
        _ => {}
    }

    let mut session = editor.open(store);
    let edited = match action {
        LayoutAction::Toggle { ids } => {
            let mut result = Ok(());
            for id in &ids {
                if !session.toggle_visibility(id) {
                    result = Err(format!("unknown widget id '{id}'"));
                    break;
                }
            }
            result
        }
        LayoutAction::MoveUp { index } => session.move_up(index).map_err(|e| e.to_string()),
        LayoutAction::MoveDown { index } => session.move_down(index).map_err(|e| e.to_string()),
        LayoutAction::Show { .. } | LayoutAction::Reset => Ok(()),
    };
    if let Err(e) = edited {
        eprintln!("Error: {e}");
        session.discard();
        return ExitCode::FAILURE;
    }

    match session.commit(store) {
        Ok(saved) => {
            println!("Saved layout ({} widgets)", saved.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_config_command(path: Option<&std::path::Path>, action: ConfigAction) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => {
            let created = match path {
                Some(path) => default::create_default_config_at(path, force),
                None => default::create_default_config(force),
            };
            created.map(|path| println!("Created configuration at {}", path.display()))
        }
        ConfigAction::Path => {
            let shown = path.map(PathBuf::from).unwrap_or_else(xdg::config_path);
            println!("{}", shown.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(path).map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
