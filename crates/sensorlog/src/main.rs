//! `sensorlog` - CLI for the sensor reading log
//!
//! This binary provides the command-line interface for recording readings,
//! listing and exporting them, and printing map data.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use tracing::debug;

use sensorlog::cli::{
    AddCommand, Cli, Command, ConfigCommand, ExportCommand, ListCommand, MapCommand,
    OutputFormat, PreviewCommand,
};
use sensorlog::{
    export, init_logging, map, ConfirmationPolicy, Config, EntryForm, MapView, Store,
    Submission, SubmitOutcome,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    let database = cli.database.clone().unwrap_or_else(|| config.database_path());
    debug!("Using database {}", database.display());

    // Execute the command
    match cli.command {
        Command::Init => handle_init(&database),
        Command::Add(add_cmd) => handle_add(&config, &database, &add_cmd),
        Command::Preview(preview_cmd) => handle_preview(&config, &preview_cmd),
        Command::List(list_cmd) => handle_list(&database, &list_cmd),
        Command::Export(export_cmd) => handle_export(&config, &database, export_cmd),
        Command::Map(map_cmd) => handle_map(&database, &map_cmd),
        Command::Status(status_cmd) => handle_status(&database, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, &database, config_cmd),
    }
}

fn open_store(database: &Path) -> anyhow::Result<Store> {
    Store::open(database)
        .with_context(|| format!("cannot open database {}", database.display()))
}

fn handle_init(database: &Path) -> anyhow::Result<()> {
    let store = open_store(database)?;
    println!("Database ready: {}", store.path().display());
    println!("Measurements:   {}", store.count()?);
    Ok(())
}

fn handle_add(config: &Config, database: &Path, cmd: &AddCommand) -> anyhow::Result<()> {
    let date = cmd.date.unwrap_or_else(|| Local::now().date_naive());
    let time = cmd.time.unwrap_or(config.entry.default_time);

    let mut form = EntryForm::new(date, time).with_reading(cmd.temperature, cmd.humidity);
    if let (Some(lat), Some(lon)) = (&cmd.lat, &cmd.lon) {
        form = form.with_coordinates(lat.as_str(), lon.as_str());
    }

    let policy = if cmd.yes {
        ConfirmationPolicy::Skip
    } else {
        config.confirmation_policy()
    };
    let mut submission = Submission::new(form, policy);

    if let Some(pair) = &cmd.coords {
        if let Some(SubmitOutcome::Rejected { message }) = submission.paste_coordinates(pair) {
            bail!(message);
        }
    }

    let store = open_store(database)?;
    match submission.submit(&store)? {
        SubmitOutcome::Persisted { id } => {
            println!("Saved measurement {id}");
        }
        SubmitOutcome::PendingConfirmation(measurement) => {
            println!("{measurement}");
            if prompt_yes_no("Save this measurement?")? {
                if let Some(id) = submission.confirm(&store)? {
                    println!("Saved measurement {id}");
                }
            } else {
                submission.decline();
                println!("Discarded.");
            }
        }
        SubmitOutcome::Rejected { message } => bail!(message),
    }
    Ok(())
}

/// Ask a yes/no question on stdin. Anything but `y` or `yes` means no.
fn prompt_yes_no(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn handle_preview(config: &Config, cmd: &PreviewCommand) -> anyhow::Result<()> {
    let form = EntryForm::new(Local::now().date_naive(), config.entry.default_time)
        .with_reading(cmd.temperature, cmd.humidity);
    println!("Discomfort Index: {:.2}", form.preview_discomfort_index()?);
    Ok(())
}

fn handle_list(database: &Path, cmd: &ListCommand) -> anyhow::Result<()> {
    let rows = open_store(database)?.load_all()?;
    match cmd.format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No measurements recorded yet.");
            } else {
                print!("{}", export::render_table(&rows));
            }
        }
        OutputFormat::Json => export::write_json(&rows, io::stdout().lock())?,
        OutputFormat::Csv => export::write_csv(&rows, io::stdout().lock())?,
    }
    Ok(())
}

fn handle_export(config: &Config, database: &Path, cmd: ExportCommand) -> anyhow::Result<()> {
    let rows = open_store(database)?.load_all()?;

    if cmd.stdout {
        export::write_csv(&rows, io::stdout().lock())?;
        return Ok(());
    }

    let path = cmd
        .output
        .unwrap_or_else(|| PathBuf::from(&config.export.file_name));
    export::write_csv_file(&rows, &path)
        .with_context(|| format!("cannot export to {}", path.display()))?;
    println!("Exported {} measurements to {}", rows.len(), path.display());
    Ok(())
}

fn handle_map(database: &Path, cmd: &MapCommand) -> anyhow::Result<()> {
    let points = open_store(database)?.load_for_map()?;

    let output = if cmd.geojson {
        map::to_geojson(&points)
    } else {
        serde_json::json!({
            "view": MapView::fit(&points),
            "points": points,
        })
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn handle_status(database: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let total = store.count()?;
    let plottable = store.load_for_map()?.len();

    if json {
        let status = serde_json::json!({
            "database_path": store.path(),
            "measurements": total,
            "plottable": plottable,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("sensorlog status");
        println!("----------------");
        println!("Database:      {}", store.path().display());
        println!("Measurements:  {total}");
        println!("Plottable:     {plottable}");
    }
    Ok(())
}

fn handle_config(config: &Config, database: &Path, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:       {}", database.display());
                println!();
                println!("[Entry]");
                println!("  Default time:        {}", config.entry.default_time);
                println!("  Confirm before save: {}", config.entry.confirm_before_save);
                println!();
                println!("[Export]");
                println!("  File name:           {}", config.export.file_name);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
