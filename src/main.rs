mod api;
mod cli_messages;
mod config;
mod consts;
mod controller;
mod environment;
mod error_classifier;
mod events;
mod export;
mod forms;
mod logging;
mod navigation;
mod notifications;
mod registry;
mod session;
mod ui;

use crate::api::types::HotelId;
use crate::config::{Config, get_config_dir, get_config_path};
use crate::consts::cli_consts::{API_URL_ENV, DEFAULT_TREND_PERIOD_DAYS, LOG_FILE_NAME};
use crate::environment::Environment;
use crate::logging::{LogSink, init_logging};
use crate::navigation::Section;
use crate::session::{HeadlessCommand, run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Root URL of the HotelSat server (default: http://localhost:5000)
    #[arg(long, global = true, env = API_URL_ENV, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive console
    Start {
        /// Section shown first: dashboard, hotels, responses, analytics, reports or automation
        #[arg(long, default_value = "dashboard")]
        section: Section,

        /// Keep the terminal's own background color
        #[arg(long)]
        no_background_color: bool,
    },
    /// Manage hotels
    Hotels {
        #[command(subcommand)]
        action: HotelsCommand,
    },
    /// Print the statistics and insights of a hotel
    Stats {
        #[arg(value_name = "HOTEL_ID")]
        hotel: HotelId,
    },
    /// Print one page of survey responses
    Responses {
        #[arg(value_name = "HOTEL_ID")]
        hotel: HotelId,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Compare the statistics of several hotels side by side
    Compare {
        /// At least two distinct hotels
        #[arg(value_name = "HOTEL_ID", num_args = 2.., required = true)]
        hotels: Vec<HotelId>,

        /// Also save the comparison chart as a PNG
        #[arg(long)]
        chart: bool,

        /// Destination directory of the chart (default: configured export directory)
        #[arg(long, value_name = "DIR", requires = "chart")]
        out: Option<PathBuf>,
    },
    /// Print the weekly average rating of a hotel and its trend
    Trend {
        #[arg(value_name = "HOTEL_ID")]
        hotel: HotelId,

        /// Number of past days analysed
        #[arg(long, default_value_t = DEFAULT_TREND_PERIOD_DAYS, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
    /// Download an Excel export; the global report when no hotel is given
    Export {
        #[arg(long, value_name = "HOTEL_ID")]
        hotel: Option<HotelId>,

        /// Destination directory (default: configured export directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Bind a Tally form to a hotel
    Automate {
        #[arg(long, value_name = "HOTEL_ID")]
        hotel: HotelId,

        #[arg(long, value_name = "URL")]
        tally_url: String,
    },
    /// Send a synthetic submission through the webhook
    TestWebhook {
        #[arg(value_name = "HOTEL_ID")]
        hotel: HotelId,
    },
    /// Store the server URL (--api-url) and export directory
    Configure {
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,
    },
    /// Delete the configuration file
    Reset,
}

#[derive(Subcommand)]
enum HotelsCommand {
    /// List every hotel
    List,
    /// Create a hotel and its Google Sheet
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        location: Option<String>,

        #[arg(long, value_name = "URL")]
        tally_url: Option<String>,
    },
    /// Delete a hotel and all of its responses
    Delete {
        #[arg(value_name = "HOTEL_ID")]
        id: HotelId,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // The TUI owns the terminal, so its logs go to a file
    let sink = match args.command {
        Command::Start { .. } => LogSink::File,
        _ => LogSink::Stderr,
    };
    let log_file = get_config_dir()
        .map(|dir| dir.join(LOG_FILE_NAME))
        .unwrap_or_else(|_| std::env::temp_dir().join(LOG_FILE_NAME));
    init_logging(sink, &log_file);

    let command = match args.command {
        Command::Start {
            section,
            no_background_color,
        } => {
            let session = setup_session(args.api_url.as_deref(), None)?;
            return run_tui_mode(session, section, !no_background_color).await;
        }
        Command::Configure { export_dir } => {
            return configure(args.api_url, export_dir);
        }
        Command::Reset => {
            let config_path = get_config_path()?;
            print_cmd_info!("Reset", "Deleting {}", config_path.display());
            Config::clear(&config_path)?;
            print_cmd_success!("Configuration cleared", "");
            return Ok(());
        }
        Command::Hotels { action } => match action {
            HotelsCommand::List => HeadlessCommand::ListHotels,
            HotelsCommand::Add {
                name,
                location,
                tally_url,
            } => HeadlessCommand::AddHotel {
                name,
                location,
                tally_url,
            },
            HotelsCommand::Delete { id, yes } => HeadlessCommand::DeleteHotel { id, confirmed: yes },
        },
        Command::Stats { hotel } => HeadlessCommand::Statistics(hotel),
        Command::Responses { hotel, page } => HeadlessCommand::Responses { hotel, page },
        Command::Export { hotel, out } => HeadlessCommand::Export { hotel, out },
        Command::Automate { hotel, tally_url } => HeadlessCommand::Automate { hotel, tally_url },
        Command::TestWebhook { hotel } => HeadlessCommand::TestWebhook(hotel),
        Command::Compare { hotels, chart, out } => HeadlessCommand::Compare { hotels, chart, out },
        Command::Trend { hotel, days } => HeadlessCommand::Trend { hotel, days },
    };

    let session = setup_session(args.api_url.as_deref(), None)?;
    if run_headless_mode(session, command).await.is_err() {
        // The failure was already reported on stdout
        std::process::exit(1);
    }
    Ok(())
}

/// Persist the server URL and export directory given on the command line.
///
/// Without arguments, prints the stored configuration.
fn configure(api_url: Option<String>, export_dir: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let mut config = Config::load_or_default(&config_path)?;

    if api_url.is_none() && export_dir.is_none() {
        print_cmd_info!(
            "Configuration",
            "server: {}, exports: {}",
            config.resolve_environment(None)?.server_url(),
            config.resolve_export_dir(None).display()
        );
        return Ok(());
    }

    if let Some(url) = api_url {
        if url.parse::<Environment>().is_err() {
            print_cmd_error!("Invalid API URL", url.as_str());
            return Err(format!("Invalid API URL: {}", url).into());
        }
        config.api_url = Some(url);
    }
    if let Some(dir) = export_dir {
        config.export_dir = Some(dir);
    }

    config
        .save(&config_path)
        .map_err(|e| format!("Failed to save config: {}", e))?;
    print_cmd_success!("Configuration saved", "{}", config_path.display());
    Ok(())
}
