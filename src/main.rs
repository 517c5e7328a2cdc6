// ABOUTME: Main entry point for the Artemis TUI and its headless subcommands

use anyhow::{Context, Result};
use artemis::{
    app::{App, EventHandler, Services},
    chat::{ExportChoice, ExportOutcome},
    client::{ArtemisApi, HttpArtemisClient},
    components::LayoutComponent,
    config::{AppConfig, ServiceSettings},
    models::{ActiveChat, UploadedFile},
};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, Terminal};
use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "artemis", version, about = "Chat with your document collections from the terminal")]
struct Cli {
    /// Path to a TOML config file (defaults to ~/.artemis/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a chat session's transcript as CSV
    Export {
        /// Chat session to export
        #[arg(long)]
        session: String,
        /// Add a References column
        #[arg(long)]
        references: bool,
        /// Directory to write into (defaults to the configured export directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the capacity metric and the documents of the target collection
    Documents,
    /// Upload and ingest PDF files into the target collection
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_from(cli.config.as_deref())?;

    setup_logging(&config.logging.directory)?;
    setup_panic_handler();

    let settings = config
        .service_settings()
        .context("Artemis service is not configured")?;
    let api = build_client(&settings)?;
    let services = Services::from_settings(api, &settings);

    match cli.command {
        None => {
            let mut app = App::new(services).with_export_dir(config.export.directory.clone());
            app.init().await;
            let mut layout = LayoutComponent::new();
            run_tui(&mut app, &mut layout).await?;
        }
        Some(Command::Export {
            session,
            references,
            output,
        }) => {
            let choice = if references {
                ExportChoice::WithReferences
            } else {
                ExportChoice::DialogueOnly
            };
            let directory = output.unwrap_or_else(|| config.export.directory.clone());
            export_session(&services, &session, choice, &directory).await?;
        }
        Some(Command::Documents) => print_documents(&services).await?,
        Some(Command::Upload { files }) => upload_paths(&services, &files).await?,
    }

    Ok(())
}

fn build_client(settings: &ServiceSettings) -> Result<Arc<dyn ArtemisApi>> {
    let client = HttpArtemisClient::from_settings(settings)?;
    info!("Using Artemis service at {}", settings.address);
    Ok(Arc::new(client))
}

async fn export_session(
    services: &Services,
    session_id: &str,
    choice: ExportChoice,
    directory: &Path,
) -> Result<()> {
    let chat = ActiveChat::new(session_id, session_id);
    match services
        .exporter
        .download_conversation(Some(&chat), choice)
        .await?
    {
        ExportOutcome::NoActiveSession => anyhow::bail!("No active chat session to export."),
        ExportOutcome::Ready(artifact) => {
            let path = artifact.write_to(directory)?;
            println!("Saved {} to {}", artifact.file_name, path.display());
        }
    }
    Ok(())
}

async fn print_documents(services: &Services) -> Result<()> {
    let listing = services.documents.list_documents().await?;
    println!(
        "{}: {}",
        artemis::documents::manager::CAPACITY_LABEL,
        listing.capacity.label()
    );
    if listing.documents.is_empty() {
        println!("{}", artemis::documents::manager::NO_DOCUMENTS);
    }
    for document in &listing.documents {
        println!("{}\t{}", document.id, document.name);
    }
    Ok(())
}

async fn upload_paths(services: &Services, paths: &[PathBuf]) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Error processing {name}"))?;
        files.push(UploadedFile::new(name, bytes));
    }

    let mut failures = 0;
    for outcome in services.documents.upload_files(&files).await {
        if outcome.uploaded() {
            println!("{}: Upload successful.", outcome.file_name);
        }
        match &outcome.result {
            Ok(_) => println!("{}: Document processed successfully.", outcome.file_name),
            Err(failure) => {
                failures += 1;
                eprintln!("Error processing {}: {}", outcome.file_name, failure.error);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} files failed", files.len());
    }
    Ok(())
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {e}");
        return Err(anyhow::anyhow!("Terminal not compatible: {e}"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state) {
                    EventHandler::process_event(app_event, &mut app.state);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            match app.tick().await {
                Ok(()) => {
                    last_tick = Instant::now();

                    if app.needs_ui_refresh() {
                        terminal.draw(|frame| {
                            layout.render(frame, &app.state);
                        })?;
                    }
                }
                Err(e) => {
                    error!("Error during app tick: {}", e);
                    last_tick = Instant::now();
                }
            }
        }

        if app.state.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn setup_logging(log_dir: &Path) -> Result<()> {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_file = log_dir.join(format!(
        "artemis-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artemis=info".into()),
        )
        .init();

    Ok(())
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before reporting
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stderr(), LeaveAlternateScreen, DisableMouseCapture);

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
