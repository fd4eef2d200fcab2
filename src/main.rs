mod app;
mod date_source;
mod domain;
mod error;
mod input;
mod persistence;
mod report;
mod ticker;
mod ui;

use app::AppState;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use date_source::{default_sources, lookup_today};
use domain::{HebrewDate, StudyMode};
use persistence::{init_local_shiur_dir, log_file, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "shiur")]
#[command(about = "A terminal study tracker for the daily Rambam cycle", long_about = None)]
struct Cli {
    /// Skip the online date lookup and use the built-in calendar
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Initialize a local .shiur directory in the current directory
    Init,
    #[command(flatten)]
    Store(StoreCommand),
}

/// Subcommands that open the progress store
#[derive(Debug, Subcommand)]
enum StoreCommand {
    /// Show study mode, overall progress and today's day
    Status,
    /// List the days of a month
    List {
        /// Month id, e.g. heshvan-5787. Defaults to the first month.
        #[arg(short, long)]
        month: Option<String>,
        /// Only days whose subject, chapters or day match
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Mark a whole day done, or not done if it already is
    Toggle {
        day_id: String,
    },
    /// Check off one chapter of a day (1-based)
    Check {
        day_id: String,
        chapter: usize,
        /// Uncheck instead
        #[arg(long)]
        off: bool,
    },
    /// Replace a day's notes
    Note {
        day_id: String,
        text: String,
    },
    /// Switch study mode (3-chapters or 1-chapter)
    Mode {
        mode: String,
    },
    /// Show today's Hebrew date and the matching study day
    Today,
    /// Export account and progress to a backup file
    Export {
        /// Output file path. Defaults to ./rambam_backup_YYYY-MM-DD.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a backup file, overwriting stored progress
    Import {
        path: PathBuf,
    },
    /// Create the local account
    Account {
        name: String,
    },
    /// Sync the local account
    Sync,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // The TUI owns the terminal, so log to a file
            init_logging(Some(&log_file()?))?;
            run_tui(cli.offline)
        }
        Some(Commands::Init) => {
            init_logging(None)?;
            init_local()
        }
        Some(Commands::Store(command)) => {
            init_logging(None)?;
            run_command(command, cli.offline)
        }
    }
}

/// env_logger with `RUST_LOG`, defaulting to warnings
fn init_logging(path: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn open_app() -> Result<AppState> {
    let store = FileStore::open()?;
    log::debug!("Using data directory: {}", store.dir().display());
    AppState::new(Box::new(store))
}

fn init_local() -> Result<()> {
    let dir = init_local_shiur_dir()?;
    println!("Initialized shiur directory: {}", dir.display());
    println!();
    println!("Shiur will now use this local directory for progress storage.");
    println!("Run 'shiur' to start studying.");
    Ok(())
}

fn run_command(command: StoreCommand, offline: bool) -> Result<()> {
    let mut app = open_app()?;

    match command {
        StoreCommand::Status => {
            app.apply_today_date(lookup_today(&default_sources(offline)));
            print!("{}", report::status_report(&app));
        }
        StoreCommand::List { month, search } => {
            // Local calendar only, listing never waits on the network
            app.apply_today_date(lookup_today(&default_sources(true)));
            print!("{}", report::list_report(&app, month.as_deref(), search.as_deref())?);
        }
        StoreCommand::Toggle { day_id } => {
            if !app.toggle_day(&day_id)? {
                anyhow::bail!("Unknown day '{}' in {} schedule", day_id, app.study_mode.to_tag());
            }
            print_day(&app, &day_id);
        }
        StoreCommand::Check { day_id, chapter, off } => {
            let changed = match chapter.checked_sub(1) {
                Some(index) => app.set_subunit(&day_id, index, !off)?,
                None => false,
            };
            if !changed {
                anyhow::bail!("Day '{}' has no chapter {}", day_id, chapter);
            }
            print_day(&app, &day_id);
        }
        StoreCommand::Note { day_id, text } => {
            if !app.set_notes(&day_id, &text)? {
                anyhow::bail!("Unknown day '{}' in {} schedule", day_id, app.study_mode.to_tag());
            }
            print_day(&app, &day_id);
        }
        StoreCommand::Mode { mode } => {
            let mode = StudyMode::from_tag(&mode)?;
            app.set_study_mode(mode)?;
            println!("Study mode: {} ({})", mode.to_tag(), mode.name());
        }
        StoreCommand::Today => {
            let date = lookup_today(&default_sources(offline));
            print_today(&mut app, date);
        }
        StoreCommand::Export { output } => {
            let today = chrono::Local::now().date_naive();
            let path = match output {
                Some(path) => {
                    persistence::write_backup(app.store(), &path)?;
                    path
                }
                None => {
                    let dir = std::env::current_dir().context("Could not determine current directory")?;
                    app.export_backup(&dir, today)?
                }
            };
            println!("Backup written: {}", path.display());
        }
        StoreCommand::Import { path } => {
            let summary = app.import_from(&path)?;
            if summary.is_empty() {
                println!("Backup contained nothing to import.");
            } else {
                println!(
                    "Imported: account {}, 3-chapters {}, 1-chapter {}",
                    yes_no(summary.account),
                    yes_no(summary.progress3),
                    yes_no(summary.progress1)
                );
            }
        }
        StoreCommand::Account { name } => {
            let account = app.create_account(&name)?;
            println!("Account created: {} (sync id {})", account.name, account.sync_id);
        }
        StoreCommand::Sync => {
            if app.account.is_none() {
                anyhow::bail!("No account yet. Create one with 'shiur account <name>'.");
            }
            println!("Syncing...");
            thread::sleep(ticker::SYNC_DELAY);
            app.finish_sync()?;
            if let Some(account) = &app.account {
                println!("Synced at {}", account.last_sync);
            }
        }
    }

    Ok(())
}

fn print_day(app: &AppState, day_id: &str) {
    if let Some(day) = app.schedule.find_day(day_id) {
        print!("{}", report::day_report(app, day));
    }
}

fn print_today(app: &mut AppState, date: Option<HebrewDate>) {
    app.apply_today_date(date);
    let Some(label) = app.today_label() else {
        println!("Today's date is unavailable.");
        return;
    };
    println!("{}", label);
    match app.today.clone() {
        Some(marker) => print_day(app, &marker.day_id),
        None => println!("Today is not in the {} schedule.", app.study_mode.to_tag()),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn run_tui(offline: bool) -> Result<()> {
    let mut app = open_app()?;

    // Look up today's date in the background; the UI starts without it
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let date = lookup_today(&default_sources(offline));
        let _ = tx.send(date);
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("{:#}", err);
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    today_rx: &Receiver<Option<HebrewDate>>,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    // Notes open $EDITOR, which needs the terminal back
                    if app.ui_mode == domain::UiMode::Normal
                        && (key.code == event::KeyCode::Char('n') || key.code == event::KeyCode::Char('N'))
                    {
                        disable_raw_mode()?;
                        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

                        let result = input::handle_key(app, key);

                        enable_raw_mode()?;
                        execute!(io::stdout(), EnterAlternateScreen)?;
                        terminal.clear()?;

                        if let Err(e) = result {
                            log::warn!("Editing notes failed: {:#}", e);
                            app.notice = Some(format!("{:#}", e));
                        }
                    } else if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
            }
        }

        // Today's date arrives once from the lookup thread
        if let Ok(date) = today_rx.try_recv() {
            app.apply_today_date(date);
        }

        app.check_sync(Instant::now())?;
    }
}
