use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use wordquest::cli::{CliInterface, parse_cli};
use wordquest::game_state::{GameOutcome, GameSession, game_loop};
use wordquest::logging::init_logging;
use wordquest::tui::TuiInterface;
use wordquest::wordbank::{Wordbank, load_wordbank_from_file};

fn main() -> ExitCode {
    let cli = parse_cli();

    match init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(path) => log::debug!("Logging to {}", path.display()),
        Err(e) => eprintln!("Logging disabled: {e}"),
    }

    let wordbank = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path),
        None => Wordbank::embedded(),
    };
    let wordbank = match wordbank {
        Ok(words) => words,
        Err(e) => {
            log::error!("Failed to load word bank: {e}");
            eprintln!("Failed to load word bank: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Loaded {} words", wordbank.len());

    let mut session = match cli.seed {
        Some(seed) => GameSession::new(&wordbank, &mut StdRng::seed_from_u64(seed)),
        None => GameSession::new(&wordbank, &mut rand::rng()),
    };

    let outcome = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut session, &mut interface)
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                log::error!("Failed to initialize terminal: {e}");
                eprintln!("Failed to initialize terminal: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut session, &mut interface)
    };

    log::info!("Game finished: {outcome:?}");
    if !cli.plain {
        match outcome {
            GameOutcome::Won { attempts } => {
                println!("Solved in {attempts}: {}", session.state().target());
            }
            GameOutcome::Lost | GameOutcome::Quit => {
                println!("The word was \"{}\".", session.state().target());
            }
        }
    }
    ExitCode::SUCCESS
}
