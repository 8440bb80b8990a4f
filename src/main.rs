use std::io;
use std::process::ExitCode;
use strands::cli::{
    CliInterface, choose_puzzle_file, expand_puzzle_paths, parse_cli, render_answers, render_check,
};
use strands::dictionary::{DictionaryIndex, EMBEDDED_DICTIONARY, load_dictionary, load_dictionary_from_str};
use strands::game::Game;
use strands::puzzle::Puzzle;
use strands::session::{SessionEnd, game_loop};
use strands::tui::TuiInterface;
use strands::logging;

fn main() -> ExitCode {
    let cli = parse_cli();
    let use_tui = !(cli.cli || cli.show || cli.check);
    logging::init(use_tui);

    if cli.check {
        let paths = match expand_puzzle_paths(&cli.puzzles) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Failed to list puzzles: {e}");
                return ExitCode::FAILURE;
            }
        };
        let mut all_ok = true;
        for path in &paths {
            let result = Puzzle::from_file(path);
            all_ok &= result.is_ok();
            println!("{}", render_check(path, &result));
        }
        return if all_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    }

    let Some(first) = cli.puzzles.first() else {
        eprintln!("No puzzle file given");
        return ExitCode::FAILURE;
    };
    let puzzle_path = match choose_puzzle_file(first) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Failed to pick a puzzle from '{}': {e}", first.display());
            return ExitCode::FAILURE;
        }
    };
    let puzzle = match Puzzle::from_file(&puzzle_path) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Failed to load puzzle from '{}': {e}", puzzle_path.display());
            return ExitCode::FAILURE;
        }
    };

    if cli.show {
        print!("{}", render_answers(&puzzle));
        return ExitCode::SUCCESS;
    }

    let dictionary: DictionaryIndex = match &cli.dictionary {
        Some(path) => match load_dictionary(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load dictionary from '{}': {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => load_dictionary_from_str(EMBEDDED_DICTIONARY),
    };
    log::info!("Dictionary holds {} words", dictionary.len());

    let mut game = Game::new(puzzle, &dictionary, cli.hint_threshold);

    let end = if cli.cli {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut game, &mut interface)
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start the terminal UI: {e}");
                eprintln!("Try again with --cli.");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut game, &mut interface)
    };

    if end == SessionEnd::Completed {
        println!(
            "Solved '{}': all {} strands found.",
            game.theme(),
            game.answers().len()
        );
    }
    ExitCode::SUCCESS
}
