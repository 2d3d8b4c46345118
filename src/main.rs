use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{CompleteEnv, generate};
use std::io;
use std::thread;
use std::time::Duration;

use syncthru::Result;
use syncthru::monitor::Monitor;
use syncthru::sensor::Reading;
use syncthru::source;

#[derive(Parser)]
#[command(name = "syncthru")]
#[command(about = "Sensor monitor for Samsung SyncThru printers")]
#[command(version = "0.1.0")]
#[command(next_line_help = false)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map one status snapshot onto sensor readings
    Sensors(SensorsArgs),
    /// Poll for snapshots and reprint sensor readings on an interval
    Watch(WatchArgs),
    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

#[derive(Args)]
struct SensorsArgs {
    /// Snapshot source: file path, "cmd:<command line>" or "-" for stdin
    /// Examples: status.json, "cmd:syncthru-export printer.local", -
    #[arg(short = 's', long = "source", required = true)]
    source: String,

    /// Base display name for the printer's sensors
    #[arg(short = 'n', long = "name", default_value = "SyncThru Printer")]
    name: String,

    /// Show default-disabled sensors without the "(disabled)" marker
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Output readings as a JSON array
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Show unique ids and attributes
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Args)]
struct WatchArgs {
    /// Snapshot source: file path, "cmd:<command line>" or "-" for stdin
    /// Examples: status.json, "cmd:syncthru-export printer.local", -
    #[arg(short = 's', long = "source", required = true)]
    source: String,

    /// Base display name for the printer's sensors
    #[arg(short = 'n', long = "name", default_value = "SyncThru Printer")]
    name: String,

    /// Seconds between polls
    #[arg(short = 'i', long = "interval", default_value = "30")]
    interval: u64,

    /// Stop after printing this many updates [default: run forever]
    #[arg(short = 'c', long = "count")]
    count: Option<u64>,

    /// Show default-disabled sensors without the "(disabled)" marker
    #[arg(short = 'a', long = "all")]
    all: bool,
}

#[derive(Args)]
struct CompletionArgs {
    /// Shell type
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

fn print_readings(readings: &[Reading], verbose: bool, mark_disabled: bool) {
    let width = readings
        .iter()
        .map(|reading| reading.name.len())
        .max()
        .unwrap_or(0);

    for reading in readings {
        let value = match (&reading.value, reading.unit) {
            (Some(value), Some(unit)) => format!("{} {}", value, unit),
            (Some(value), None) => value.to_string(),
            (None, _) => "unknown".to_string(),
        };
        if mark_disabled && !reading.enabled_by_default {
            println!("{:<width$}  {} (disabled)", reading.name, value, width = width);
        } else {
            println!("{:<width$}  {}", reading.name, value, width = width);
        }

        if verbose {
            match &reading.unique_id {
                Some(id) => println!("{:<width$}  id: {}", "", id, width = width),
                None => println!("{:<width$}  id: (no serial number)", "", width = width),
            }
            for (key, val) in &reading.attributes {
                println!("{:<width$}  {}: {}", "", key, val, width = width);
            }
        }
    }
}

fn handle_sensors_command(args: SensorsArgs) -> Result<()> {
    let source = source::from_spec(&args.source)?;
    let monitor = Monitor::new(source, &args.name)?;
    let readings = monitor.readings();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&readings)?);
    } else {
        print_readings(&readings, args.verbose, !args.all);
    }

    Ok(())
}

fn handle_watch_command(args: WatchArgs) -> Result<()> {
    let source = source::from_spec(&args.source)?;
    let mut monitor = Monitor::new(source, &args.name)?;

    let mut printed: u64 = 0;
    loop {
        print_readings(&monitor.readings(), false, !args.all);
        printed += 1;
        if let Some(count) = args.count
            && printed >= count
        {
            break;
        }

        thread::sleep(Duration::from_secs(args.interval));

        // A failed poll keeps the previous snapshot; the next tick reports
        // whatever the printer last answered.
        if let Err(e) = monitor.refresh() {
            eprintln!("Refresh failed, keeping last snapshot: {}", e);
        }
        println!();
    }

    Ok(())
}

fn handle_completion_command(args: CompletionArgs) -> Result<()> {
    match args.shell {
        clap_complete::Shell::Zsh => {
            // Generate dynamic completion script for zsh using CompleteEnv
            unsafe {
                std::env::set_var("COMPLETE", "zsh");
            }
            CompleteEnv::with_factory(Cli::command).complete();
        }
        _ => {
            // Generate static completion for other shells
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "syncthru", &mut io::stdout());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Check for dynamic completion first
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sensors(args) => handle_sensors_command(args)?,
        Commands::Watch(args) => handle_watch_command(args)?,
        Commands::Completion(args) => handle_completion_command(args)?,
    }

    Ok(())
}
