use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;

use tallysheet::TallysheetError;
use tallysheet::config::{consume_force, load_settings};
use tallysheet::export::{DateWindow, JsonOrderSource, resolve_window, run_export};
use tallysheet::files::{list_output_files, resolve_download};
use tallysheet::schedule;

#[derive(Parser)]
#[command(name = "tallysheet")]
#[command(about = "Daily discounted-sales export for completed orders")]
struct Cli {
    /// Settings file (debug mode, output directory, force flag)
    #[arg(long, default_value = "tallysheet-settings.json")]
    settings: PathBuf,

    /// Completed-orders JSON file to export from
    #[arg(long, default_value = "orders.json")]
    orders: PathBuf,

    /// Schedule state file
    #[arg(long, default_value = "tallysheet-schedule.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the schedule and run the export if it is due
    Tick,

    /// Run the export immediately, out of band
    Force {
        /// Day to export (YYYY-MM-DD); defaults to yesterday
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List workbooks in the output directory
    List,

    /// Stream a workbook from the output directory to stdout
    Download {
        /// File name (basename only; any directory parts are stripped)
        file: String,
    },
}

fn main() -> Result<(), TallysheetError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = load_settings(&cli.settings)?;
    let source = JsonOrderSource::new(&cli.orders);

    match cli.command {
        Commands::Tick => {
            let forced = consume_force(&cli.settings)?;
            let mut state = schedule::load_state(&cli.state)?;
            let now = Local::now().naive_local();

            let due = schedule::tick(&mut state, now, forced);
            // Persist the registration first: a failed run waits for the
            // next trigger rather than firing again on the next tick.
            schedule::save_state(&cli.state, &state)?;

            if due {
                let window = resolve_window(now.date(), settings.debug);
                let path = run_export(&source, &settings, &window)?;
                info!(path = %path.display(), "export complete");
            } else if let Some(next) = state.next_run {
                info!(
                    next_run = %schedule::format_datetime(next),
                    "export not due"
                );
            }
        }
        Commands::Force { date } => {
            let window = match date {
                Some(day) => DateWindow::Day(day),
                None => resolve_window(Local::now().date_naive(), settings.debug),
            };
            let path = run_export(&source, &settings, &window)?;
            info!(path = %path.display(), "export complete");
        }
        Commands::List => {
            for file in list_output_files(Path::new(&settings.output_path())) {
                println!("{file}");
            }
        }
        Commands::Download { file } => {
            let path = resolve_download(Path::new(&settings.output_path()), &file)?;
            let bytes = std::fs::read(&path)?;
            std::io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}
