mod build_info;
mod constants;
mod input;
mod position;
mod tactic;
mod ui;

use constants::{INPUT_POLL_MS, TICK_INTERVAL_MS};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{map_key, AppInput};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tactic::logic::load_tactic;
use tactic::{process_input, tick, TacticRepository, TacticSession};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut requested_id: Option<usize> = None;

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "tactician {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Tactician - Terminal Chess Tactics Trainer\n");
                println!("Usage: tactician [id]\n");
                println!("Arguments:");
                println!("  id         Start with the tactic of that number");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => match other.parse::<usize>() {
                Ok(id) => requested_id = Some(id),
                Err(_) => {
                    eprintln!("Unknown argument: {}", other);
                    eprintln!("Run 'tactician --help' for usage.");
                    std::process::exit(1);
                }
            },
        }
    }

    let repository = TacticRepository::embedded().map_err(to_io_error)?;
    let mut rng = rand::thread_rng();

    let first = match requested_id {
        Some(id) => repository.by_id(id).map_err(to_io_error)?.clone(),
        None => repository.random(&mut rng).map_err(to_io_error)?.clone(),
    };
    let mut session = TacticSession::new(first).map_err(to_io_error)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut last_tick = Instant::now();

    // Main loop
    loop {
        terminal.draw(|frame| ui::draw_ui(frame, &session))?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                match map_key(key_event) {
                    AppInput::Quit => break,
                    AppInput::NextTactic => {
                        // A record with a bad FEN keeps the current tactic
                        if let Ok(next) = repository.random(&mut rng) {
                            let _ = load_tactic(&mut session, next.clone());
                        }
                    }
                    AppInput::Trainer(trainer_input) => {
                        process_input(&mut session, trainer_input);
                    }
                    AppInput::None => {}
                }
            }
        }

        // Engine tick every 100ms
        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            tick(&mut session);
            last_tick = Instant::now();
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    Ok(())
}

fn to_io_error<E: std::error::Error>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err.to_string())
}
