use mastermind::cli::{CliInterface, UiMode, parse_cli};
use mastermind::logging::init_logging;
use mastermind::tui::TuiInterface;
use mastermind::{GameResult, Outcome, Rules, play_game};
use std::io;

fn main() {
    let cli = parse_cli();
    if let Err(e) = init_logging(&cli.log_target(), cli.verbose) {
        eprintln!("Failed to set up logging: {e}");
    }

    let rules = cli.rules();
    let selector = cli.build_selector();
    let guesser = cli.build_guesser();
    log::info!("starting a {:?} game", cli.mode);

    let result = match cli.mode {
        UiMode::Cli => {
            let stdin = io::stdin();
            let mut ui = CliInterface::new(stdin.lock());
            play_game(rules, selector, guesser, &mut ui)
        }
        UiMode::Tui => run_tui(rules, selector, guesser),
    };

    if let Err(e) = result {
        log::error!("game aborted: {e}");
        eprintln!("Game aborted: {e}");
    }
}

fn run_tui(
    rules: Rules,
    selector: mastermind::cli::Player,
    guesser: mastermind::cli::Player,
) -> GameResult<Outcome> {
    let mut ui = TuiInterface::new(rules.clone())?;
    let outcome = play_game(rules, selector, guesser, &mut ui)?;
    ui.wait_for_key()?;
    Ok(outcome)
}
