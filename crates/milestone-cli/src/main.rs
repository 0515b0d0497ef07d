//! milestone CLI: Command-line interface for the interactive timeline

use clap::{Parser, Subcommand};
use milestone_engine::{Catalog, Config, ModalController};
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Interactive timeline of events with a modal detail view
#[derive(Parser)]
#[command(name = "milestone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Catalog file (overrides the config's catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// TUI log file (default: .milestone/milestone.log when .milestone/ exists)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Print the timeline markers
    List {
        /// Output the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the dialog content for one event
    Show {
        /// Event id, as written on the marker
        id: String,

        /// Output the event as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a catalog file
    Check {
        /// Catalog file to validate
        path: PathBuf,
    },

    /// Initialize .milestone/ with a config and the built-in catalog
    Init,
}

const MILESTONE_DIR: &str = ".milestone";
const DEFAULT_CONFIG: &str = ".milestone/config.json";
const LOG_FILE_NAME: &str = "milestone.log";
const LOG_ENV: &str = "MILESTONE_LOG";

/// Wrap width for `show` output.
const SHOW_WIDTH: usize = 72;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_default(&cli.config)?;
    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));

    if tui_mode {
        // Without a log file the TUI runs unlogged
        if let Some(log_file) = tui_log_path(cli.log_file.as_deref(), Path::new(MILESTONE_DIR)) {
            init_file_logging(&config, &log_file)?;
        }
    } else {
        init_stderr_logging(&config);
    }
    debug!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        None | Some(Commands::Tui) => {
            let catalog = Arc::new(load_catalog(&config, cli.catalog.as_deref())?);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(milestone_tui::run_tui(catalog, &config))?;
        }
        Some(Commands::List { json }) => {
            let catalog = load_catalog(&config, cli.catalog.as_deref())?;
            if json {
                println!("{}", catalog.to_json()?);
            } else {
                for line in list_lines(&catalog) {
                    println!("{line}");
                }
            }
        }
        Some(Commands::Show { id, json }) => {
            let catalog = load_catalog(&config, cli.catalog.as_deref())?;
            if let Some(output) = show_output(Arc::new(catalog), &id, json)? {
                println!("{output}");
            }
        }
        Some(Commands::Check { path }) => {
            let catalog = Catalog::load(&path)?;
            println!("{}: {} event(s)", path.display(), catalog.len());
        }
        Some(Commands::Init) => {
            cmd_init(&cli.config)?;
        }
    }

    Ok(())
}

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

fn init_stderr_logging(config: &Config) {
    fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Where TUI logs go: `--log-file`, else the state directory's log if
/// that directory already exists. Never creates the state directory.
fn tui_log_path(flag: Option<&Path>, state_dir: &Path) -> Option<PathBuf> {
    match flag {
        Some(path) => Some(path.to_path_buf()),
        None if state_dir.is_dir() => Some(state_dir.join(LOG_FILE_NAME)),
        None => None,
    }
}

fn init_file_logging(config: &Config, path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    fmt()
        .with_env_filter(env_filter(config))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Resolve the catalog: `--catalog` wins over the config file.
fn load_catalog(config: &Config, flag: Option<&Path>) -> Result<Catalog, Box<dyn Error>> {
    let catalog = match flag {
        Some(path) => Catalog::load(path)?,
        None => config.load_catalog()?,
    };
    info!(events = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn list_lines(catalog: &Catalog) -> Vec<String> {
    catalog
        .iter()
        .map(|event| format!("{:>4}  {}", event.id.get(), event.label()))
        .collect()
}

/// Drive the modal controller for a raw marker id and render what the
/// dialog would show. `None` when the id does not open anything.
fn show_output(
    catalog: Arc<Catalog>,
    raw_id: &str,
    json: bool,
) -> Result<Option<String>, serde_json::Error> {
    let mut modal = ModalController::new(catalog);
    if !modal.open_marker(raw_id).changed() {
        return Ok(None);
    }
    let Some(event) = modal.active_event() else {
        return Ok(None);
    };

    if json {
        return serde_json::to_string_pretty(event).map(Some);
    }

    let slots = modal.dialog();
    let mut out = vec![slots.year.clone(), slots.title.clone(), String::new()];
    out.extend(milestone_tui::text::plain_text(&slots.body, SHOW_WIDTH));
    Ok(Some(out.join("\n")))
}

fn cmd_init(config_path: &Path) -> Result<(), Box<dyn Error>> {
    let dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new(MILESTONE_DIR));
    std::fs::create_dir_all(dir)?;

    let catalog_path = dir.join("catalog.json");
    if catalog_path.exists() {
        println!("Catalog already exists at {}", catalog_path.display());
    } else {
        Catalog::builtin().save(&catalog_path)?;
        println!("Created {}", catalog_path.display());
    }

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
    } else {
        let config = Config {
            catalog: Some(catalog_path),
            ..Config::default()
        };
        config.save(config_path)?;
        println!("Created {}", config_path.display());
    }

    println!("\nInitialization complete!");
    println!("Run `milestone` to open the timeline");
    Ok(())
}
