use anyhow::{Context, Result};
use apinav::{
    config::Config,
    output::{format_report_to_string, print_endpoints, print_report, OutputFormat},
    provider::{EndpointProvider, ScanStatus},
    scanner::all_ecosystems,
    ProjectTypeDetector,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apinav")]
#[command(
    author,
    version,
    about = "Find HTTP endpoints in Spring, Express, NestJS, Gin, Echo and FastAPI projects"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan workspace roots and list every endpoint
    Scan {
        /// Workspace roots (defaults to the current directory)
        paths: Vec<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write the report as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search endpoints by path, class or handler name
    Search {
        /// Case-insensitive substring to look for
        query: String,

        /// Workspace roots (defaults to the current directory)
        paths: Vec<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Maximum number of results (defaults to search.max_results)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the detected ecosystem of each root
    Detect {
        /// Workspace roots (defaults to the current directory)
        paths: Vec<PathBuf>,
    },

    /// List supported ecosystems
    ListEcosystems,

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_default(),
    };

    match cli.command {
        Commands::Scan {
            paths,
            format,
            output,
        } => {
            let format = parse_format(&format)?;
            let provider = build_provider(&config, paths)?;
            scan_with_progress(&provider, format == OutputFormat::Table).await?;
            let report = provider.snapshot();

            if let Some(path) = output {
                std::fs::write(&path, format_report_to_string(&report)?)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                if format == OutputFormat::Table {
                    println!("Results written to: {}", path.display());
                }
                Ok(())
            } else {
                print_report(&report, format)
            }
        }
        Commands::Search {
            query,
            paths,
            format,
            limit,
        } => {
            let format = parse_format(&format)?;
            let provider = build_provider(&config, paths)?;
            scan_with_progress(&provider, format == OutputFormat::Table).await?;

            let limit = limit.unwrap_or(config.search.max_results);
            let mut hits = provider.search_endpoints(&query);
            hits.truncate(limit);
            print_endpoints(&hits, format)
        }
        Commands::Detect { paths } => {
            let detector = ProjectTypeDetector::new();
            for root in default_roots(paths) {
                let project_type = detector.detect(&root).await;
                println!("  {:<40} {}", root.display(), project_type.display_name());
            }
            Ok(())
        }
        Commands::ListEcosystems => {
            list_ecosystems(&config);
            Ok(())
        }
        Commands::Config { init, path } => handle_config(init, path),
    }
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::from_str(format).map_err(|e| anyhow::anyhow!(e))
}

fn default_roots(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    }
}

fn build_provider(config: &Config, paths: Vec<PathBuf>) -> Result<EndpointProvider> {
    Ok(EndpointProvider::from_config(config, default_roots(paths))?)
}

async fn scan_with_progress(provider: &EndpointProvider, is_interactive: bool) -> Result<()> {
    let progress = if is_interactive {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning workspace...");
        Some(pb)
    } else {
        None
    };

    let status = provider.scan_workspace().await;

    if let Some(pb) = progress {
        match &status {
            Ok(ScanStatus::Completed { endpoints }) => {
                pb.finish_with_message(format!("Found {} endpoints", endpoints))
            }
            Ok(ScanStatus::Rejected) => pb.finish_with_message("Scan already in progress"),
            Err(_) => pb.finish_and_clear(),
        }
    }

    status?;
    Ok(())
}

fn list_ecosystems(config: &Config) {
    println!("Supported ecosystems:");
    println!();

    for spec in all_ecosystems() {
        let extensions = config
            .scanners
            .get(spec.project_type)
            .map(|s| s.file_extensions.iter().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();

        println!("  {:<12} {:<14} [files: {}]", spec.project_type.as_str(), spec.name, extensions);
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        Config::default().save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    print_config_file(&config_path)
}

fn print_config_file(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'apinav config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }
    Ok(())
}
