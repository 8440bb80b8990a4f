use crate::board::OutOfBounds;
use crate::game::{DEFAULT_HINT_THRESHOLD, Game, HintOutcome, SubmitOutcome};
use crate::puzzle::{Puzzle, PuzzleLoadError};
use crate::session::{GameInterface, UserAction, hint_message, submit_message};
use crate::step::Pos;
use crate::strand::Strand;
use clap::Parser;
use rand::Rng;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Strands word-search puzzle
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Puzzle file(s) or directories of `.txt` puzzles; play uses the first,
    /// picking a random puzzle from a directory
    #[arg(required = true)]
    pub puzzles: Vec<PathBuf>,

    /// Path to a newline-delimited word list
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary: Option<PathBuf>,

    /// Non-theme words needed to earn a hint
    #[arg(short = 't', long = "hint-threshold", default_value_t = DEFAULT_HINT_THRESHOLD)]
    pub hint_threshold: u32,

    /// Play with line-oriented commands instead of the terminal UI
    #[arg(long)]
    pub cli: bool,

    /// Print the board and every answer strand, then exit
    #[arg(long, conflicts_with = "check")]
    pub show: bool,

    /// Validate the puzzle files, then exit
    #[arg(long)]
    pub check: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// The `.txt` files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns any I/O error from reading the directory.
pub fn puzzle_files_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The puzzle file to play: `path` itself, or a random `.txt` file when it
/// names a directory.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be read or holds no puzzles.
pub fn choose_puzzle_file(path: &Path) -> io::Result<PathBuf> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }
    let files = puzzle_files_in(path)?;
    if files.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no .txt puzzles in '{}'", path.display()),
        ));
    }
    let i: usize = rand::rng().random_range(0..files.len());
    log::info!("Picked {} of {} puzzles", files[i].display(), files.len());
    Ok(files[i].clone())
}

/// Expand directories among `paths` into the puzzle files they hold.
///
/// # Errors
///
/// Returns any I/O error from reading a directory.
pub fn expand_puzzle_paths(paths: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            out.extend(puzzle_files_in(path)?);
        } else {
            out.push(path.clone());
        }
    }
    Ok(out)
}

const PROMPT: &str = "Enter a strand as ROW COL STEP... (e.g. 1 1 e se s), or 'hint', 'board', 'exit':";

/// Interpret one line of player input.
///
/// # Errors
///
/// Returns the message to show when the line is neither a command nor a strand.
pub fn parse_command(input: &str) -> Result<UserAction, String> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "" => Err("Enter a strand, or 'exit' to quit.".to_string()),
        "exit" | "quit" => Ok(UserAction::Exit),
        "hint" | "?" => Ok(UserAction::Hint),
        "board" => Ok(UserAction::ShowBoard),
        _ => input
            .parse::<Strand>()
            .map(UserAction::Submit)
            .map_err(|e| format!("Invalid strand: {e}")),
    }
}

/// Prompt for and read one action. End of input counts as `exit`.
pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!("\n{PROMPT}");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return Some(UserAction::Exit),
        Ok(_) => {}
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            return Some(UserAction::Exit);
        }
    }

    match parse_command(&input) {
        Ok(action) => Some(action),
        Err(message) => {
            println!("{message}");
            None
        }
    }
}

/// The board with 1-indexed row and column labels. Cells of found strands are
/// bracketed and the endpoints of a revealed hint are starred.
#[must_use]
pub fn render_board(game: &Game<'_>) -> String {
    let found: HashSet<Pos> = game
        .found_strands()
        .iter()
        .flat_map(Strand::positions)
        .collect();
    let hinted: Vec<Pos> = game
        .active_hint()
        .filter(|hint| hint.revealed)
        .map(|hint| {
            let strand = &game.answers()[hint.index].strand;
            vec![strand.start(), strand.end()]
        })
        .unwrap_or_default();

    let board = game.board();
    let mut out = String::from("   ");
    for col in 1..=board.num_cols() {
        let _ = write!(out, "{col:^3}");
    }
    out.push('\n');

    for (pos, letter) in board.cells() {
        if pos.col == 0 {
            let _ = write!(out, "{:>2} ", pos.row + 1);
        }
        let letter = letter.to_ascii_uppercase();
        if found.contains(&pos) {
            let _ = write!(out, "[{letter}]");
        } else if hinted.contains(&pos) {
            let _ = write!(out, "*{letter}*");
        } else {
            let _ = write!(out, " {letter} ");
        }
        if board.contains(Pos::new(pos.row, pos.col + 1)) {
            continue;
        }
        out.push('\n');
    }
    out
}

/// Found count and hint meter, as shown under the board.
#[must_use]
pub fn render_progress(game: &Game<'_>) -> String {
    format!(
        "Found: {} / {}    Hint meter: {} / {}",
        game.found_strands().len(),
        game.answers().len(),
        game.hint_meter().min(game.hint_threshold()),
        game.hint_threshold()
    )
}

/// Theme, board and answer strands of a puzzle in file notation.
#[must_use]
pub fn render_answers(puzzle: &Puzzle) -> String {
    let mut out = format!("{}\n\n{}\n", puzzle.theme(), puzzle.board());
    for answer in puzzle.answers() {
        let _ = writeln!(out, "{} {}", answer.word.to_uppercase(), answer.strand);
    }
    out
}

/// One report line per puzzle file, plus tiling notes for loaded puzzles.
#[must_use]
pub fn render_check(path: &Path, result: &Result<Puzzle, PuzzleLoadError>) -> String {
    match result {
        Ok(puzzle) => {
            let mut out = format!(
                "OK   {}: '{}', {} strands",
                path.display(),
                puzzle.theme(),
                puzzle.answers().len()
            );
            let tiling = puzzle.tiling();
            if !tiling.uncovered.is_empty() {
                let _ = write!(out, "\n     {} cells not covered by any strand", tiling.uncovered.len());
            }
            if !tiling.overlapping.is_empty() {
                let _ = write!(out, "\n     {} cells covered by several strands", tiling.overlapping.len());
            }
            out
        }
        Err(e) => format!("FAIL {}: {e}", path.display()),
    }
}

/// Line-oriented front end reading commands from any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_start(&mut self, game: &Game<'_>) {
        println!("Theme: {}", game.theme());
        println!("{}", render_board(game));
        println!("Find {} strands.", game.answers().len());
    }

    fn read_action(&mut self, _game: &Game<'_>) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_submit_outcome(&mut self, game: &Game<'_>, _strand: &Strand, outcome: &SubmitOutcome) {
        println!("{}", submit_message(outcome));
        if matches!(outcome, SubmitOutcome::ThemeWordFound(_)) {
            println!("{}", render_progress(game));
        }
    }

    fn display_out_of_bounds(&mut self, err: &OutOfBounds) {
        println!("Invalid move: {err}");
    }

    fn display_hint_outcome(&mut self, game: &Game<'_>, outcome: HintOutcome) {
        println!("{}", hint_message(game, outcome));
    }

    fn display_board(&mut self, game: &Game<'_>) {
        println!("Theme: {}", game.theme());
        println!("{}", render_board(game));
        println!("{}", render_progress(game));
    }

    fn display_game_over(&mut self, game: &Game<'_>) {
        println!("{}", render_board(game));
        println!("All {} strands found!", game.answers().len());
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::load_dictionary_from_str;
    use crate::step::Step;
    use std::io::Cursor;

    const TWICE: &str = "Twice\n\nt o t\ne x e\n\ntote 1 1 e e s\ntote 1 3 w w s\n";

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["strands", "puzzle.txt"]).unwrap();
        assert_eq!(cli.puzzles, [PathBuf::from("puzzle.txt")]);
        assert_eq!(cli.dictionary, None);
        assert_eq!(cli.hint_threshold, DEFAULT_HINT_THRESHOLD);
        assert!(!cli.cli && !cli.show && !cli.check);
    }

    #[test]
    fn test_parse_cli_options() {
        let cli = Cli::try_parse_from([
            "strands", "-d", "words.txt", "-t", "5", "--cli", "a.txt", "b.txt",
        ])
        .unwrap();
        assert_eq!(cli.dictionary, Some(PathBuf::from("words.txt")));
        assert_eq!(cli.hint_threshold, 5);
        assert!(cli.cli);
        assert_eq!(cli.puzzles.len(), 2);
    }

    #[test]
    fn test_parse_cli_requires_puzzle() {
        assert!(Cli::try_parse_from(["strands"]).is_err());
        assert!(Cli::try_parse_from(["strands", "--show", "--check", "a.txt"]).is_err());
    }

    fn puzzle_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_choose_puzzle_file_from_directory() {
        let dir = puzzle_dir("strands_test_boards");
        std::fs::write(dir.join("b.txt"), TWICE).unwrap();
        std::fs::write(dir.join("a.txt"), TWICE).unwrap();
        std::fs::write(dir.join("notes.md"), "not a puzzle").unwrap();
        std::fs::create_dir(dir.join("nested.txt")).unwrap();

        let files = puzzle_files_in(&dir).unwrap();
        assert_eq!(files, [dir.join("a.txt"), dir.join("b.txt")]);
        for _ in 0..10 {
            let picked = choose_puzzle_file(&dir).unwrap();
            assert!(files.contains(&picked), "{}", picked.display());
        }
        assert_eq!(
            expand_puzzle_paths(&[dir.clone(), PathBuf::from("x.txt")]).unwrap(),
            [dir.join("a.txt"), dir.join("b.txt"), PathBuf::from("x.txt")]
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_choose_puzzle_file_passes_files_through() {
        let path = PathBuf::from("boards/a-good-roast.txt");
        assert_eq!(choose_puzzle_file(&path).unwrap(), path);
    }

    #[test]
    fn test_choose_puzzle_file_empty_directory() {
        let dir = puzzle_dir("strands_test_empty_boards");
        let err = choose_puzzle_file(&dir).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_parse_command_keywords() {
        assert_eq!(parse_command("exit\n"), Ok(UserAction::Exit));
        assert_eq!(parse_command("  QUIT "), Ok(UserAction::Exit));
        assert_eq!(parse_command("Hint"), Ok(UserAction::Hint));
        assert_eq!(parse_command("?"), Ok(UserAction::Hint));
        assert_eq!(parse_command("board"), Ok(UserAction::ShowBoard));
    }

    #[test]
    fn test_parse_command_strand() {
        assert_eq!(
            parse_command("1 1 e se s\n"),
            Ok(UserAction::Submit(Strand::new(
                Pos::new(0, 0),
                vec![Step::E, Step::SE, Step::S]
            )))
        );
    }

    #[test]
    fn test_parse_command_extreme_coordinates() {
        assert!(matches!(
            parse_command("-2147483648 1 e e e"),
            Ok(UserAction::Submit(_))
        ));
        assert!(parse_command("99999999999 1 e e e").is_err());
    }

    #[test]
    fn test_cli_game_survives_extreme_coordinates() {
        let dict = load_dictionary_from_str("");
        let mut game = Game::new(TWICE.parse().unwrap(), &dict, 3);
        let input = "-2147483648 1 e e e\n2147483647 2147483647 s s s\nexit\n";
        let mut ui = CliInterface::new(Cursor::new(input));
        assert_eq!(
            crate::session::game_loop(&mut game, &mut ui),
            crate::session::SessionEnd::Quit
        );
        assert!(game.found_strands().is_empty());
    }

    #[test]
    fn test_parse_command_rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("hello").is_err());
        let message = parse_command("1 1 e up").unwrap_err();
        assert!(message.contains("up"), "{message}");
    }

    #[test]
    fn test_read_action_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_action(&mut reader), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_action_invalid_then_valid() {
        let mut reader = Cursor::new("nonsense\nhint\n");
        assert_eq!(read_action(&mut reader), None);
        assert_eq!(read_action(&mut reader), Some(UserAction::Hint));
    }

    #[test]
    fn test_render_board_marks_found_and_hint() {
        let dict = load_dictionary_from_str("");
        let mut game = Game::new(TWICE.parse().unwrap(), &dict, 0);
        assert_eq!(
            render_board(&game),
            "    1  2  3 \n 1  T  O  T \n 2  E  X  E \n"
        );

        let first = game.answers()[0].strand.clone();
        game.submit_strand(&first).unwrap();
        game.use_hint();
        game.use_hint();
        assert_eq!(
            render_board(&game),
            "    1  2  3 \n 1 [T][O][T]\n 2 *E* X [E]\n"
        );
        assert_eq!(render_progress(&game), "Found: 1 / 2    Hint meter: 0 / 0");
    }

    #[test]
    fn test_render_answers() {
        let puzzle: Puzzle = TWICE.parse().unwrap();
        assert_eq!(
            render_answers(&puzzle),
            "Twice\n\nT O T\nE X E\n\nTOTE 1 1 e e s\nTOTE 1 3 w w s\n"
        );
    }

    #[test]
    fn test_render_check() {
        let path = Path::new("twice.txt");
        let report = render_check(path, &TWICE.parse());
        assert!(report.starts_with("OK   twice.txt: 'Twice', 2 strands"));
        assert!(report.contains("1 cells not covered"));
        assert!(report.contains("3 cells covered by several"));

        let failed = render_check(path, &"".parse());
        assert!(failed.starts_with("FAIL twice.txt: malformed puzzle"));
    }

    #[test]
    fn test_cli_interface_reads_from_reader() {
        let dict = load_dictionary_from_str("");
        let game = Game::new(TWICE.parse().unwrap(), &dict, 3);
        let mut ui = CliInterface::new(Cursor::new("board\n1 3 w w s\n"));
        assert_eq!(ui.read_action(&game), Some(UserAction::ShowBoard));
        assert!(matches!(ui.read_action(&game), Some(UserAction::Submit(_))));
        assert_eq!(ui.read_action(&game), Some(UserAction::Exit));
    }
}
