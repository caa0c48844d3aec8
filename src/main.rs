use anyhow::Result;
use clap::{Parser, Subcommand};

use gestelit::app::App;
use gestelit::config::Config;
use gestelit::logging;

#[derive(Parser)]
#[command(name = "gestelit")]
#[command(about = "Admin console for the Gestelit floor-tracking backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List stations
    Stations,
    /// List workers
    Workers,
    /// List pipeline presets (with step counts)
    Presets,
    /// List jobs
    Jobs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // No subcommand = full-screen console
    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Stations) => cmd_stations(&config).await?,
        Some(Commands::Workers) => cmd_workers(&config).await?,
        Some(Commands::Presets) => cmd_presets(&config).await?,
        Some(Commands::Jobs) => cmd_jobs(&config).await?,
        None => {
            let mut app = App::new(config)?;
            let result = app.run().await;

            // Point at the session log on exit if anything was written
            if let Some(log_path) = logging_handle.log_file_path {
                if log_path.exists() {
                    if let Ok(metadata) = log_path.metadata() {
                        if metadata.len() > 0 {
                            eprintln!("Session log: {}", log_path.display());
                        }
                    }
                }
            }

            result?;
        }
    }

    Ok(())
}

fn client(config: &Config) -> Result<gestelit::api::Client> {
    Ok(gestelit::api::Client::new(&config.server)?)
}

async fn cmd_stations(config: &Config) -> Result<()> {
    let stations = client(config)?.list_stations().await?;
    if stations.is_empty() {
        println!("No stations");
        return Ok(());
    }
    println!("Stations ({})", stations.len());
    println!("{}", "─".repeat(40));
    for station in &stations {
        println!("{:<10} {}", station.code, station.name);
    }
    Ok(())
}

async fn cmd_workers(config: &Config) -> Result<()> {
    let workers = client(config)?.list_workers().await?;
    if workers.is_empty() {
        println!("No workers");
        return Ok(());
    }
    println!("Workers ({})", workers.len());
    println!("{}", "─".repeat(40));
    for worker in &workers {
        println!("{:<8} {:<10} {}", worker.badge, worker.role, worker.name);
    }
    Ok(())
}

async fn cmd_presets(config: &Config) -> Result<()> {
    let presets = client(config)?.list_presets().await?;
    if presets.is_empty() {
        println!("No presets");
        return Ok(());
    }
    println!("Presets ({})", presets.len());
    println!("{}", "─".repeat(40));
    for preset in &presets {
        println!("{:<30} {} steps", preset.name, preset.steps.len());
    }
    Ok(())
}

async fn cmd_jobs(config: &Config) -> Result<()> {
    let jobs = client(config)?.list_jobs().await?;
    if jobs.is_empty() {
        println!("No jobs");
        return Ok(());
    }
    println!("Jobs ({})", jobs.len());
    println!("{}", "─".repeat(40));
    for job in &jobs {
        println!(
            "{:<12} {:<12} {:>6}  {}",
            job.number, job.status, job.quantity, job.product
        );
    }
    Ok(())
}
