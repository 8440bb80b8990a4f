// Integration tests for the strands application
// These tests verify that all modules work together correctly

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use strands::cli::CliInterface;
use strands::dictionary::EMBEDDED_DICTIONARY;
use strands::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn roast() -> Puzzle {
    Puzzle::from_file(fixture("a-good-roast.txt")).unwrap()
}

fn embedded() -> DictionaryIndex {
    load_dictionary_from_str(EMBEDDED_DICTIONARY)
}

#[test]
fn test_fixture_loads_with_expected_shape() {
    let puzzle = roast();
    assert_eq!(puzzle.theme().to_lowercase(), "a good roast");
    assert_eq!(puzzle.board().num_rows(), 8);
    assert_eq!(puzzle.board().num_cols(), 6);
    let words: Vec<&str> = puzzle.answers().iter().map(|a| a.word.as_str()).collect();
    assert_eq!(
        words,
        ["howl", "roar", "laugh", "cackle", "giggle", "shriek", "chuckle", "crackingup"]
    );
    assert!(puzzle.tiling().is_exact());
}

#[test]
fn test_every_answer_spells_its_word_and_is_unfolded() {
    let puzzle = roast();
    for answer in puzzle.answers() {
        assert_eq!(
            puzzle.board().evaluate_strand(&answer.strand).unwrap(),
            answer.word
        );
        assert!(!answer.strand.is_folded(), "{}", answer.word);
        assert!(!answer.strand.is_cyclic(), "{}", answer.word);
    }
}

#[test]
fn test_end_to_end_full_solve() {
    // Load from disk, play every answer in file order, then replay them
    let dictionary = embedded();
    let mut game = Game::load(fixture("a-good-roast.txt"), &dictionary, 3).unwrap();
    let answers = game.answers().to_vec();

    for answer in &answers {
        assert_eq!(
            game.submit_strand(&answer.strand),
            Ok(SubmitOutcome::ThemeWordFound(answer.word.clone()))
        );
    }
    assert!(game.game_over());

    for answer in &answers {
        assert_eq!(
            game.submit_strand(&answer.strand),
            Ok(SubmitOutcome::AlreadyFound)
        );
    }
    assert_eq!(game.found_strands().len(), answers.len());
}

#[test]
fn test_reverse_order_solve() {
    let dictionary = embedded();
    let mut game = Game::new(roast(), &dictionary, 3);
    let answers = game.answers().to_vec();
    for answer in answers.iter().rev() {
        assert!(!game.game_over());
        assert!(matches!(
            game.submit_strand(&answer.strand),
            Ok(SubmitOutcome::ThemeWordFound(_))
        ));
    }
    assert!(game.game_over());
    assert_eq!(game.found_strands()[0], answers[answers.len() - 1].strand);
}

#[test]
fn test_embedded_dictionary_earns_a_hint() {
    let dictionary = embedded();
    let mut game = Game::new(roast(), &dictionary, 3);

    for line in ["1 1 e s se", "4 4 e e sw", "7 3 e n w"] {
        let strand: Strand = line.parse().unwrap();
        assert!(
            matches!(
                game.submit_strand(&strand),
                Ok(SubmitOutcome::NonThemeWordFound(_))
            ),
            "{line}"
        );
    }
    assert_eq!(game.hint_meter(), 3);

    let HintOutcome::NewHint(hint) = game.use_hint() else {
        panic!("expected a new hint");
    };
    assert_eq!(hint, ActiveHint { index: 0, revealed: false });
    assert_eq!(game.hint_meter(), 0);
    assert_eq!(
        game.use_hint(),
        HintOutcome::HintAlreadyRevealed(ActiveHint { index: 0, revealed: true })
    );
}

#[test]
fn test_strand_from_selected_cells_matches_answer() {
    // the path a player traces cell by cell is the recorded answer
    let dictionary = embedded();
    let mut game = Game::new(roast(), &dictionary, 3);
    let howl = game.answers()[0].clone();
    let traced = Strand::from_positions(&howl.strand.positions())
        .unwrap()
        .unwrap();
    assert_eq!(traced, howl.strand);
    assert_eq!(
        game.submit_strand(&traced),
        Ok(SubmitOutcome::ThemeWordFound("howl".to_string()))
    );
}

#[test]
fn test_scripted_cli_game_to_completion() {
    let dictionary = embedded();
    let mut game = Game::new(roast(), &dictionary, 3);
    let input = "\
board
1 1 e
8 6 w ne w
8 6 w ne w
1 1 e s se
1 1 e e e
8 6 e e e
what
hint
5 4 ne ne n
5 5 ne s s w
5 2 sw n n e ne
3 1 e nw n e s
6 2 se sw w n e
4 4 ne n ne w w s
8 3 e n n w n n ne nw n
exit
";
    let mut interface = CliInterface::new(Cursor::new(input));
    assert_eq!(game_loop(&mut game, &mut interface), SessionEnd::Completed);
    assert!(game.game_over());
    assert_eq!(game.hint_meter(), 1);
}

#[test]
fn test_scripted_cli_game_quit_early() {
    let dictionary = embedded();
    let mut game = Game::new(roast(), &dictionary, 3);
    let input = "8 6 w ne w\nexit\n5 4 ne ne n\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    assert_eq!(game_loop(&mut game, &mut interface), SessionEnd::Quit);
    assert_eq!(game.found_strands().len(), 1);
}

#[test]
fn test_scripted_cli_game_end_of_input() {
    let dictionary = embedded();
    let mut game = Game::new(roast(), &dictionary, 3);
    let mut interface = CliInterface::new(Cursor::new("4 4 e e sw\n"));
    assert_eq!(game_loop(&mut game, &mut interface), SessionEnd::Quit);
    assert_eq!(game.hint_meter(), 1);
}

#[test]
fn test_custom_dictionary_file_to_game() {
    let path = std::env::temp_dir().join("strands_integration_words.txt");
    fs::write(&path, "glpl\nglee\n").unwrap();
    let dictionary = load_dictionary(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let mut game = Game::new(roast(), &dictionary, 1);
    assert_eq!(
        game.submit_strand(&"1 1 e e e".parse().unwrap()),
        Ok(SubmitOutcome::NonThemeWordFound("glpl".to_string()))
    );
    // "coal" is not in this list
    assert_eq!(
        game.submit_strand(&"4 4 e e sw".parse().unwrap()),
        Ok(SubmitOutcome::InvalidWord)
    );
    assert!(matches!(game.use_hint(), HintOutcome::NewHint(_)));
}

#[test]
fn test_two_games_share_one_dictionary() {
    let dictionary = embedded();
    let mut first = Game::new(roast(), &dictionary, 3);
    let mut second = Game::new(roast(), &dictionary, 3);
    let glee: Strand = "1 1 e s se".parse().unwrap();
    first.submit_strand(&glee).unwrap();
    assert_eq!(first.hint_meter(), 1);
    assert_eq!(second.hint_meter(), 0);
    assert!(matches!(
        second.submit_strand(&glee),
        Ok(SubmitOutcome::NonThemeWordFound(_))
    ));
}

#[test]
fn test_puzzle_file_errors() {
    let dir = std::env::temp_dir();
    let cases = [
        ("strands_bad_layout.txt", "Theme\nG L\nE E\n\nglee 1 1 e s e\n"),
        ("strands_bad_board.txt", "Theme\n\nG L\nE\n\nglee 1 1 e s e\n"),
        ("strands_bad_step.txt", "Theme\n\nG L\nE E\n\nglee 1 1 east s w\n"),
        ("strands_bad_bounds.txt", "Theme\n\nG L\nE E\n\nglee 2 2 s w n\n"),
        ("strands_bad_spelling.txt", "Theme\n\nG L\nE E\n\nglee 1 1 s e n\n"),
        ("strands_bad_fold.txt", "Theme\n\nG L\nE E\n\ngeel 1 1 se w ne\n"),
    ];

    let mut errors = Vec::new();
    for (name, contents) in cases {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        errors.push(Puzzle::from_file(&path).unwrap_err());
        fs::remove_file(&path).unwrap();
    }

    assert!(matches!(errors[0], PuzzleLoadError::MalformedPuzzle(_)));
    assert!(matches!(errors[1], PuzzleLoadError::InvalidBoard(_)));
    assert!(matches!(errors[2], PuzzleLoadError::UnknownStep { line: 6, .. }));
    assert!(matches!(errors[3], PuzzleLoadError::OutOfBoundsAnswer { line: 6, .. }));
    assert!(matches!(errors[4], PuzzleLoadError::SpellingMismatch { line: 6, .. }));
    assert!(matches!(errors[5], PuzzleLoadError::FoldedAnswer { line: 6, .. }));
}

#[test]
fn test_error_messages_name_the_line() {
    let err = "Theme\n\nG L\nE E\n\nglee 1 1 s e n\n"
        .parse::<Puzzle>()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 6: answer 'glee' spells 'geel' on the board"
    );
}
