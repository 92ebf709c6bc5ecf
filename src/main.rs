mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use merche::{format_api_error, Client, GetVehicleStatusOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use url::Url;

/// Read vehicle status from the Mercedes-Benz vehicle data API
#[derive(Parser, Debug)]
#[command(name = "merche", version, about, long_about = None)]
struct Args {
    /// API root (must end with '/')
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Vehicle identification number
    #[arg(short, long, global = true)]
    vehicle_id: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the resources the vehicle exposes
    Resources,
    /// Read one or more resources by name
    Resource {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Read the whole vehicle status container
    Status,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!("warning: cannot open log file {:?}: {}", log_path, err);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("merche started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("merche").join("merche.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".merche").join("merche.log");
    }
    PathBuf::from("merche.log")
}

fn build_client(config: &Config, args: &Args) -> Result<Client> {
    let base_url = config.effective_base_url(args.base_url.as_deref());
    let base_url = Url::parse(&base_url).with_context(|| format!("Invalid base URL {base_url:?}"))?;

    let mut client = Client::new(reqwest::Client::new()).with_base_url(base_url)?;
    match config.credentials() {
        Some(credentials) => client = client.with_credentials(credentials),
        None => tracing::warn!("No access token configured, sending unauthenticated requests"),
    }

    Ok(client)
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load();
    let client = build_client(&config, &args)?;

    let vehicle_id = config
        .effective_vehicle_id(args.vehicle_id.as_deref())
        .ok_or(merche::Error::MissingVehicleId)?;
    let opts = GetVehicleStatusOptions::new(vehicle_id);
    let service = client.vehicle_status();

    let rendered = match &args.command {
        Command::Resources => {
            let (resources, _) = service.get_available_resources(&opts).await?;
            tracing::info!("Vehicle exposes {} resources", resources.len());
            if args.json {
                output::json(&resources)?
            } else {
                output::resource_list_table(&resources)
            }
        }
        Command::Resource { names } => {
            let resources = service.get_resources(&opts, names.as_slice()).await?;
            if args.json {
                output::json(&resources)?
            } else {
                output::resource_table(&resources)
            }
        }
        Command::Status => {
            let (resources, _) = service.get_vehicle_status(&opts).await?;
            if args.json {
                output::json(&resources)?
            } else {
                output::resource_table(&resources)
            }
        }
    };

    println!("{rendered}");
    Ok(())
}

/// User-facing message: API errors get the short form, everything else its context chain
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<merche::Error>() {
        Some(api_err) => format_api_error(api_err),
        None => format!("{err:#}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Command failed: {:#}", err);
            eprintln!("error: {}", describe(&err));
            ExitCode::FAILURE
        }
    }
}
