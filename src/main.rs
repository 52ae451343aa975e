// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::wildcard_enum_match_arm)]
#![warn(clippy::fn_params_excessive_bools)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::let_and_return)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::explicit_iter_loop)]

mod agents;
mod app;
mod config;
mod error;
mod services;
mod storage;
mod ui;

use app::{App, Notice, Tab};
use color_eyre::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use services::Services;
use std::path::Path;
use std::{io, time::Duration};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let config = config::Config::load()?;
    init_tracing(&config.data_dir()?)?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        return handle_cli_args(&args, &config);
    }

    let services = Services::from_config(&config)?;
    let mut app = App::new(services);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    // Pastes arrive as one event so embedded newlines do not submit the form
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Logs go to a file because the interactive mode owns the terminal
fn init_tracing(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("meetlog.log"))?;
    let filter = EnvFilter::try_from_env("MEETLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| color_eyre::eyre::eyre!(error))
}

fn handle_cli_args(args: &[String], config: &config::Config) -> Result<()> {
    let cmd = args
        .get(1)
        .ok_or_else(|| color_eyre::eyre::eyre!("No command provided"))?;
    let program_name = args.first().map_or("meetlog", String::as_str);
    let rest = args.get(2..).unwrap_or_default();

    match cmd.as_str() {
        "--help" | "-h" | "help" => print_help(program_name),
        "--version" | "-v" => println!("meetlog v{}", env!("CARGO_PKG_VERSION")),
        "log" => {
            let name = rest.first().map_or("", String::as_str);
            let details = rest.get(1..).unwrap_or_default().join(" ");
            let services = Services::from_config(config)?;
            print_notice(&app::log_notice(&services.logbook.log(name, &details)));
        }
        "ask" => {
            let query = rest.join(" ");
            let services = Services::from_config(config)?;
            let outcome = services.retrieval()?.retrieve(&query);
            let (answer, notice) = app::describe_retrieval(&outcome);
            if let Some(answer) = answer {
                println!("{}", answer.heading);
                println!("{}", answer.details);
            }
            if let Some(notice) = notice {
                print_notice(&notice);
            }
        }
        "list" => {
            let services = Services::from_config(config)?;
            let interactions = services
                .list()
                .map_err(|error| color_eyre::eyre::eyre!(error))?;
            if interactions.is_empty() {
                println!("No interactions logged yet.");
            }
            for interaction in interactions {
                println!("{}: {}", interaction.name, interaction.details);
            }
        }
        cmd_str => {
            eprintln!("Unknown command: {}", cmd_str);
            eprintln!("Run with --help for available commands.");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Success(text) | Notice::Info(text) => println!("{}", text),
        Notice::Error(text) => {
            eprintln!("{}", text);
            std::process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    println!("Meetlog - log interactions with people and retrieve them in natural language");
    println!();
    println!("Usage: {} [command]", program_name);
    println!();
    println!("Commands:");
    println!("  log <name> <details...>  - Log a new interaction");
    println!("  ask <query...>           - Retrieve an interaction, e.g. 'what did I discuss with Pritha'");
    println!("  list                     - List all logged interactions");
    println!("  --help                   - Show this help");
    println!("  --version                - Show version");
    println!();
    println!("Run without arguments to start interactive mode.");
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            break;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                // Only handle KeyPress events to avoid duplicate handling
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(terminal, app, key)?;
            }
            Event::Paste(paste) => app.active_input().insert_str(&paste),
            Event::FocusGained | Event::FocusLost | Event::Mouse(_) | Event::Resize(_, _) => {}
        }
    }

    Ok(())
}

fn handle_key<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab => app.switch_tab(),
        KeyCode::Up | KeyCode::Down if app.tab == Tab::Log => app.toggle_log_field(),
        KeyCode::Enter => match app.tab {
            Tab::Log => app.submit_log(),
            Tab::Retrieve => {
                // The model call blocks, so paint a progress notice first
                app.answer = None;
                app.notice = Some(Notice::Info("Retrieving interaction...".to_string()));
                terminal.draw(|f| ui::render(f, app))?;
                app.submit_query();
            }
        },
        KeyCode::Backspace => app.active_input().remove_char(),
        KeyCode::Delete => app.active_input().delete_char(),
        KeyCode::Left => app.active_input().move_left(),
        KeyCode::Right => app.active_input().move_right(),
        KeyCode::Home => app.active_input().move_to_start(),
        KeyCode::End => app.active_input().move_to_end(),
        KeyCode::Char(c) => app.active_input().add_char(c),
        _ => {}
    }
    Ok(())
}
