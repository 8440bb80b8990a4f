use crate::board::OutOfBounds;
use crate::game::{Game, HintOutcome, SubmitOutcome};
use crate::step::Pos;
use crate::strand::Strand;
use crate::{debug_log, info_log};

/// Something the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit(Strand),
    Hint,
    ShowBoard,
    Exit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Quit,
}

/// Front end driven by [`game_loop`].
///
/// `read_action` returns `None` when the input was not understood; the loop
/// asks again.
pub trait GameInterface {
    fn display_start(&mut self, game: &Game<'_>);
    fn read_action(&mut self, game: &Game<'_>) -> Option<UserAction>;
    fn display_submit_outcome(&mut self, game: &Game<'_>, strand: &Strand, outcome: &SubmitOutcome);
    fn display_out_of_bounds(&mut self, err: &OutOfBounds);
    fn display_hint_outcome(&mut self, game: &Game<'_>, outcome: HintOutcome);
    fn display_board(&mut self, game: &Game<'_>);
    fn display_game_over(&mut self, game: &Game<'_>);
    fn display_exit_message(&mut self);
}

/// Play `game` until every theme word is found or the player quits.
pub fn game_loop<I: GameInterface + ?Sized>(game: &mut Game<'_>, interface: &mut I) -> SessionEnd {
    info_log!("Starting session for '{}'", game.theme());
    interface.display_start(game);

    while !game.game_over() {
        let Some(action) = interface.read_action(game) else {
            continue;
        };
        debug_log!("Action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                return SessionEnd::Quit;
            }
            UserAction::ShowBoard => interface.display_board(game),
            UserAction::Hint => {
                let outcome = game.use_hint();
                interface.display_hint_outcome(game, outcome);
            }
            UserAction::Submit(strand) => match game.submit_strand(&strand) {
                Ok(outcome) => interface.display_submit_outcome(game, &strand, &outcome),
                Err(err) => interface.display_out_of_bounds(&err),
            },
        }
    }

    info_log!("Session complete for '{}'", game.theme());
    interface.display_game_over(game);
    SessionEnd::Completed
}

/// One-line report of a submission, shared by the front ends.
#[must_use]
pub fn submit_message(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::TooShort => "Too short".to_string(),
        SubmitOutcome::AlreadyFound => "Already found".to_string(),
        SubmitOutcome::ThemeWordFound(word) => format!("{} is a strand!", word.to_uppercase()),
        SubmitOutcome::NonThemeWordFound(word) => {
            format!("{} is a word, but not a strand", word.to_uppercase())
        }
        SubmitOutcome::InvalidWord => "Not in word list".to_string(),
    }
}

/// One-line report of a hint request.
#[must_use]
pub fn hint_message(game: &Game<'_>, outcome: HintOutcome) -> String {
    match outcome {
        HintOutcome::NoHintYet => format!(
            "No hint yet ({} / {})",
            game.hint_meter().min(game.hint_threshold()),
            game.hint_threshold()
        ),
        HintOutcome::NewHint(hint) => format!(
            "Hint: look for a {}-letter strand",
            game.answers()[hint.index].word.chars().count()
        ),
        HintOutcome::HintAlreadyRevealed(hint) => {
            let strand = &game.answers()[hint.index].strand;
            format!(
                "Hint: the strand runs from {} to {}",
                one_based(strand.start()),
                one_based(strand.end())
            )
        }
        HintOutcome::AlreadyUsingCurrent => "Use your current hint".to_string(),
        HintOutcome::NothingToHint => "Nothing left to hint".to_string(),
    }
}

/// `ROW COL` with 1-indexed coordinates, the notation players type.
fn one_based(pos: Pos) -> String {
    format!("{} {}", i64::from(pos.row) + 1, i64::from(pos.col) + 1)
}
