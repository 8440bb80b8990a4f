//! TUI (Terminal User Interface) module for Strands
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `Selection`: cursor and the path of cells being traced, independent of the terminal
//! - `TuiInterface`: renders the game and turns key presses into `UserAction`s
//!
//! # Controls
//! Arrow keys move the cursor, `SPACE` adds the cursor cell to the path (it must
//! touch the previous cell), `BACKSPACE` drops the last cell, `ENTER` submits the
//! path, `?` asks for a hint and `ESC` clears the path or, with no path, quits.

use crate::board::{Board, OutOfBounds};
use crate::game::{Game, HintOutcome, SubmitOutcome};
use crate::session::{GameInterface, UserAction, hint_message, submit_message};
use crate::step::{Pos, Step};
use crate::strand::Strand;
use crate::{debug_log, info_log};
use chrono::{DateTime, Local, TimeDelta};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::HashMap;
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

const CELL_STYLE: Style = Style::new().fg(Color::White);
const PATH_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);
const HINT_STYLE: Style = Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD);
const FOUND_COLORS: [Color; 4] = [Color::Green, Color::Blue, Color::Magenta, Color::Cyan];

/// Cursor position and the cells selected so far.
#[derive(Debug)]
struct Selection {
    cursor: Pos,
    path: Vec<Pos>,
}

impl Selection {
    fn new() -> Self {
        Self {
            cursor: Pos::new(0, 0),
            path: Vec::new(),
        }
    }

    /// Move the cursor one step, staying on the board.
    fn move_cursor(&mut self, step: Step, board: &Board) {
        let next = self.cursor.take_step(step);
        if board.contains(next) {
            self.cursor = next;
        }
    }

    fn add_cursor(&mut self) -> Result<(), String> {
        if self.path.contains(&self.cursor) {
            return Err("Invalid move: cell is already in the path".to_string());
        }
        if let Some(&last) = self.path.last()
            && let Err(e) = last.step_to(self.cursor)
        {
            return Err(format!("Invalid move: {e}"));
        }
        self.path.push(self.cursor);
        Ok(())
    }

    fn strand(&self) -> Option<Strand> {
        Strand::from_positions(&self.path).ok().flatten()
    }

    /// Apply a key press. `Err` carries a message for the player.
    fn handle_key(&mut self, key: KeyEvent, board: &Board) -> Result<Option<UserAction>, String> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(UserAction::Exit));
        }
        if key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL) {
            debug_log!("Ignoring key with modifier: {:?}", key.modifiers);
            return Ok(None);
        }

        match key.code {
            KeyCode::Up => self.move_cursor(Step::N, board),
            KeyCode::Down => self.move_cursor(Step::S, board),
            KeyCode::Left => self.move_cursor(Step::W, board),
            KeyCode::Right => self.move_cursor(Step::E, board),
            KeyCode::Char(' ') => self.add_cursor()?,
            KeyCode::Backspace => {
                self.path.pop();
            }
            KeyCode::Enter => {
                let strand = self
                    .strand()
                    .ok_or_else(|| "Select some cells with SPACE first".to_string())?;
                self.path.clear();
                return Ok(Some(UserAction::Submit(strand)));
            }
            KeyCode::Char('?') => return Ok(Some(UserAction::Hint)),
            KeyCode::Esc if self.path.is_empty() => return Ok(Some(UserAction::Exit)),
            KeyCode::Esc => self.path.clear(),
            _ => {
                debug_log!("Ignoring key: {:?}", key.code);
            }
        }
        Ok(None)
    }
}

/// Elapsed play time as `m:ss`, or `h:mm:ss` past the hour.
fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a, 'd> {
    game: &'a Game<'d>,
    selection: &'a Selection,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    elapsed: String,
    instructions: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    selection: Selection,
    message: String,
    message_style: Style,
    error_message: String,
    started: DateTime<Local>,
    finished: Option<DateTime<Local>>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            selection: Selection::new(),
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            started: Local::now(),
            finished: None,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn elapsed(&self) -> TimeDelta {
        self.finished.unwrap_or_else(Local::now) - self.started
    }

    fn set_message(&mut self, message: String, style: Style) {
        self.message = message;
        self.message_style = style;
        self.error_message.clear();
    }

    fn set_error(&mut self, message: String) {
        self.message.clear();
        self.error_message = message;
    }

    /// Draw the current UI state to the terminal.
    ///
    /// Returns an error if rendering fails.
    fn draw(&mut self, game: &Game<'_>) -> Result<(), io::Error> {
        let instructions = if self.finished.is_some() {
            "Press any key to exit"
        } else {
            "ARROWS: Move | SPACE: Select | BACKSPACE: Undo | ENTER: Submit | ?: Hint | ESC: Clear / Quit"
        };
        let ctx = RenderContext {
            game,
            selection: &self.selection,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            elapsed: format_elapsed(self.elapsed()),
            instructions,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self, game: &Game<'_>) {
        if let Err(e) = self.draw(game) {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let board_height = u16::try_from(ctx.game.board().num_rows() + 2).unwrap_or(u16::MAX);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Theme
                Constraint::Length(board_height), // Board
                Constraint::Min(5),               // Info panel
                Constraint::Length(3),            // Status line
                Constraint::Length(3),            // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.game.theme());
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx);
        Self::render_instructions(f, chunks[4], ctx.instructions);
    }

    fn render_title(f: &mut Frame, area: Rect, theme: &str) {
        let title = Paragraph::new(format!("STRANDS - {theme}"))
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Theme"));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let game = ctx.game;

        let mut found: HashMap<Pos, Color> = HashMap::new();
        for (i, strand) in game.found_strands().iter().enumerate() {
            let color = FOUND_COLORS[i % FOUND_COLORS.len()];
            for pos in strand.positions() {
                found.insert(pos, color);
            }
        }
        let hinted: Vec<Pos> = game
            .active_hint()
            .filter(|hint| hint.revealed)
            .map(|hint| {
                let strand = &game.answers()[hint.index].strand;
                vec![strand.start(), strand.end()]
            })
            .unwrap_or_default();

        let mut lines = Vec::with_capacity(game.board().num_rows());
        let mut spans = vec![Span::raw(" ")];
        for (pos, letter) in game.board().cells() {
            let mut style = if ctx.selection.path.contains(&pos) {
                PATH_STYLE
            } else if let Some(&color) = found.get(&pos) {
                Style::new().fg(Color::Black).bg(color)
            } else if hinted.contains(&pos) {
                HINT_STYLE
            } else {
                CELL_STYLE
            };
            if pos == ctx.selection.cursor && ctx.game.found_strands().len() < ctx.game.answers().len() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(
                format!(" {} ", letter.to_ascii_uppercase()),
                style,
            ));

            if !game.board().contains(Pos::new(pos.row, pos.col + 1)) {
                lines.push(Line::from(std::mem::replace(&mut spans, vec![Span::raw(" ")])));
            }
        }

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Board").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let game = ctx.game;
        let mut lines = Vec::new();

        if let Some(strand) = ctx.selection.strand()
            && let Ok(word) = game.board().evaluate_strand(&strand)
        {
            lines.push(Line::from(vec![
                Span::styled("Selected: ", INFO_STYLE),
                Span::raw(word.to_uppercase()),
            ]));
        }

        if let Some(hint) = game.active_hint() {
            let answer = &game.answers()[hint.index];
            let text = if hint.revealed {
                format!(
                    "Hint: a {}-letter strand between the highlighted letters",
                    answer.word.chars().count()
                )
            } else {
                format!("Hint: look for a {}-letter strand", answer.word.chars().count())
            };
            lines.push(Line::from(vec![Span::styled(text, INFO_STYLE)]));
        }

        // Messages
        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, ctx.message_style)]));
        }

        // Error messages
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let game = ctx.game;
        let status = format!(
            "Found: {} / {} | Hint meter: {} / {} | Time: {}",
            game.found_strands().len(),
            game.answers().len(),
            game.hint_meter().min(game.hint_threshold()),
            game.hint_threshold(),
            ctx.elapsed
        );
        let paragraph = Paragraph::new(status)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, text: &str) {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Wait up to one poll interval for a key press.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    debug_log!("next_key() - Ignoring non-Press key event: {:?}", key.kind);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_input(&mut self, game: &Game<'_>) -> Result<Option<UserAction>, io::Error> {
        let Some(key) = Self::next_key()? else {
            return Ok(None);
        };
        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );

        self.error_message.clear();
        match self.selection.handle_key(key, game.board()) {
            Ok(action) => Ok(action),
            Err(message) => {
                self.set_error(message);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_start(&mut self, game: &Game<'_>) {
        self.started = Local::now();
        self.set_message(
            format!("Find {} strands on the theme.", game.answers().len()),
            MESSAGE_STYLE,
        );
        self.draw_or_log(game);
    }

    fn read_action(&mut self, game: &Game<'_>) -> Option<UserAction> {
        loop {
            if self.draw(game).is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input(game) {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input: {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_submit_outcome(&mut self, game: &Game<'_>, _strand: &Strand, outcome: &SubmitOutcome) {
        let message = submit_message(outcome);
        match outcome {
            SubmitOutcome::ThemeWordFound(_) => self.set_message(message, SUCCESS_STYLE),
            SubmitOutcome::NonThemeWordFound(_) => self.set_message(message, MESSAGE_STYLE),
            SubmitOutcome::TooShort | SubmitOutcome::AlreadyFound | SubmitOutcome::InvalidWord => {
                self.set_error(message);
            }
        }
        self.draw_or_log(game);
    }

    fn display_out_of_bounds(&mut self, err: &OutOfBounds) {
        self.set_error(format!("Invalid move: {err}"));
    }

    fn display_hint_outcome(&mut self, game: &Game<'_>, outcome: HintOutcome) {
        let message = hint_message(game, outcome);
        match outcome {
            HintOutcome::NewHint(_) | HintOutcome::HintAlreadyRevealed(_) => {
                self.set_message(message, INFO_STYLE);
            }
            HintOutcome::NoHintYet | HintOutcome::AlreadyUsingCurrent | HintOutcome::NothingToHint => {
                self.set_error(message);
            }
        }
        self.draw_or_log(game);
    }

    fn display_board(&mut self, game: &Game<'_>) {
        self.draw_or_log(game);
    }

    fn display_game_over(&mut self, game: &Game<'_>) {
        let finished = Local::now();
        self.finished = Some(finished);
        self.selection.path.clear();
        self.set_message(
            format!(
                "All {} strands found in {}!",
                game.answers().len(),
                format_elapsed(finished - self.started)
            ),
            SUCCESS_STYLE,
        );

        loop {
            if self.draw(game).is_err() {
                return;
            }
            match Self::next_key() {
                Ok(Some(_)) | Err(_) => return,
                Ok(None) => {}
            }
        }
    }

    fn display_exit_message(&mut self) {
        info_log!("display_exit_message() - Leaving TUI");
        self.message = "Exiting...".to_string();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
