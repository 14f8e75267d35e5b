use clap::{Parser, Subcommand};
use log::{error, info};
use picsort_core::prompt::{AcceptSuggestions, Confirmer, ConsoleConfirmer};
use picsort_core::{ArchiveTemplate, Config, LogLevel, PicSorter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picsort")]
#[command(about = "Sort photos into a dated archive, one event at a time")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move pictures from a directory into the archive
    Sort {
        /// Directory holding the unsorted pictures
        unsorted_dir: Option<PathBuf>,

        /// Root of the archive
        #[arg(short, long)]
        archive_dir: Option<PathBuf>,

        /// Archive layout, e.g. year/month or year/month/day
        #[arg(short, long)]
        structure: Option<ArchiveTemplate>,

        /// Seconds between pictures that hint at a new event
        #[arg(long)]
        event_length: Option<u64>,

        /// Show where pictures would go without moving them
        #[arg(long)]
        dry_run: bool,

        /// Accept every suggested event name without prompting
        #[arg(short, long)]
        yes: bool,

        /// Remember events across runs, optionally at PATH
        #[arg(long, num_args = 0..=1, value_name = "PATH")]
        event_store: Option<Option<PathBuf>>,

        /// Write logs to files in this directory instead of stderr
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Verbosity level
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "picsort.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Sort {
            unsorted_dir,
            archive_dir,
            structure,
            event_length,
            dry_run,
            yes,
            event_store,
            log_dir,
            verbose,
            config,
        } => {
            // Set up configuration
            let mut config = if let Some(config_path) = config {
                Config::from_file(&config_path)?
            } else {
                Config::default()
            };

            // Override config with command line arguments
            if let Some(dir) = unsorted_dir {
                config.unsorted_dir = dir;
            }
            if let Some(dir) = archive_dir {
                config.archive_dir = dir;
            }
            if let Some(structure) = structure {
                config.archive_structure = structure;
            }
            if let Some(secs) = event_length {
                config.event_length_secs = secs;
            }
            config.dry_run |= dry_run;
            if let Some(path) = event_store {
                config.use_event_store = true;
                if path.is_some() {
                    config.event_store_path = path;
                }
            }

            // Set log level based on verbosity
            config.log_level = match verbose {
                0 => config.log_level,
                1 => LogLevel::Debug,
                _ => LogLevel::Trace,
            };

            init_logging(log_dir, config.log_level)?;

            // Validates the configuration as well
            let mut sorter = PicSorter::new(config)?;

            info!("Starting sort...");
            let mut confirmer: Box<dyn Confirmer> = if yes {
                Box::new(AcceptSuggestions)
            } else {
                Box::new(ConsoleConfirmer::stdio())
            };
            let mut stdout = std::io::stdout();
            let summary = match sorter.run(confirmer.as_mut(), &mut stdout) {
                Ok(summary) => summary,
                Err(e) => {
                    error!("Sort aborted: {}", e);
                    return Err(e.into());
                }
            };

            println!(
                "\nDone: {} placed, {} skipped, {} failed, {} event boundaries",
                summary.placed, summary.skipped, summary.failed, summary.boundaries
            );
            info!("Sort complete");

            Ok(())
        }

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

fn init_logging(log_dir: Option<PathBuf>, level: LogLevel) -> Result<(), anyhow::Error> {
    match log_dir {
        Some(dir) => picsort_core::logging::init_logger(&dir, level.into())
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e)),
        None => {
            env_logger::Builder::new()
                .filter_level(level.into())
                .parse_env("PICSORT_LOG")
                .init();
            Ok(())
        }
    }
}
