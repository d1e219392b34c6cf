use chrono::Local;
use log::error;
use spaceman::cli::{Cli, CliInterface, parse_cli};
use spaceman::tui::TuiInterface;
use spaceman::{GameState, SessionEnd, game_loop, logging, save};
use std::error::Error;
use std::io;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn start_game(cli: &Cli, save_path: Option<&Path>) -> Result<GameState, Box<dyn Error>> {
    if !cli.resume {
        return Ok(cli.new_game()?);
    }

    let Some(path) = save_path else {
        return Err("--resume cannot be combined with --no-save".into());
    };
    match save::load_game(path)? {
        Some(saved) => {
            println!(
                "Resuming game saved {}.",
                saved
                    .saved_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
            );
            Ok(saved.game)
        }
        None => Err(format!("No saved game at {}", path.display()).into()),
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let save_path = cli.save_path()?;
    let mut game = start_game(cli, save_path.as_deref())?;

    // The TUI restores the terminal when it is dropped at the end of its block
    let end = if cli.tui {
        let mut interface = TuiInterface::new()?;
        game_loop(&mut game, &mut interface)
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut game, &mut interface)
    };

    let Some(path) = save_path else {
        return Ok(());
    };
    match end {
        SessionEnd::Quit => {
            save::save_game(&path, &game)?;
            println!("Game saved to {}. Continue with --resume.", path.display());
        }
        SessionEnd::Won | SessionEnd::Lost => save::clear_saved_game(&path)?,
    }
    Ok(())
}
