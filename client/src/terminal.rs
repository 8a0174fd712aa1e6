use std::io::{Stdout, Write, stdout};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use tokio::sync::mpsc::UnboundedSender;

use common::game::{Direction, FieldSize, GameSnapshot};
use common::leaderboard::HighScoreEntry;
use common::log;

use crate::driver::{GameDriver, InputEvent};

/// One glyph per fruit sprite index.
const FRUIT_GLYPHS: [char; 5] = ['*', '@', '%', '&', '+'];

/// Terminal stand-in for the original canvas front-end: border, snake, food
/// glyph, score line, and message rows below the board.
pub struct TerminalDriver {
    out: Stdout,
    field: FieldSize,
}

impl TerminalDriver {
    pub fn new(field: FieldSize) -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, Hide, Clear(ClearType::All))?;
        Ok(Self { out, field })
    }

    fn status_row(&self) -> u16 {
        self.field.height as u16 + 2
    }

    fn message_row(&self) -> u16 {
        self.status_row() + 1
    }

    fn scores_row(&self) -> u16 {
        self.message_row() + 1
    }

    fn draw_board(&mut self, snapshot: &GameSnapshot) -> std::io::Result<()> {
        let width = self.field.width as u16;
        let height = self.field.height as u16;

        execute!(self.out, Clear(ClearType::All))?;

        for x in 0..width + 2 {
            execute!(self.out, MoveTo(x, 0), Print('#'))?;
            execute!(self.out, MoveTo(x, height + 1), Print('#'))?;
        }
        for y in 1..height + 1 {
            execute!(self.out, MoveTo(0, y), Print('#'))?;
            execute!(self.out, MoveTo(width + 1, y), Print('#'))?;
        }

        if let Some(food) = snapshot.food {
            let glyph = FRUIT_GLYPHS[usize::from(food.sprite) % FRUIT_GLYPHS.len()];
            execute!(
                self.out,
                MoveTo(food.position.x as u16 + 1, food.position.y as u16 + 1),
                Print(glyph)
            )?;
        }

        for (index, cell) in snapshot.snake.iter().enumerate() {
            let glyph = if index == 0 { 'O' } else { 'o' };
            execute!(
                self.out,
                MoveTo(cell.x as u16 + 1, cell.y as u16 + 1),
                Print(glyph)
            )?;
        }

        let status_row = self.status_row();
        execute!(
            self.out,
            MoveTo(0, status_row),
            Print(format!("Your Score: {}", snapshot.score)),
        )?;
        self.out.flush()
    }

    fn print_at(&mut self, row: u16, text: &str) -> std::io::Result<()> {
        execute!(
            self.out,
            MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        self.out.flush()
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.out, Show);
        println!();
    }
}

impl GameDriver for TerminalDriver {
    fn render(&mut self, snapshot: &GameSnapshot) {
        if let Err(e) = self.draw_board(snapshot) {
            log!("Render error: {}", e);
        }
    }

    fn show_game_over(&mut self, score: u32) {
        let text = format!(
            "Game Over! Final score: {}. Press Space to restart, Q to quit.",
            score
        );
        if let Err(e) = self.print_at(self.message_row(), &text) {
            log!("Render error: {}", e);
        }
    }

    fn show_high_scores(&mut self, entries: &[HighScoreEntry]) {
        let row = self.scores_row();
        let result = self.print_at(row, "High Scores:").and_then(|_| {
            for (index, entry) in entries.iter().enumerate() {
                let line = format!("{}. {}: {}", index + 1, entry.name, entry.score);
                self.print_at(row + 1 + index as u16, &line)?;
            }
            Ok(())
        });
        if let Err(e) = result {
            log!("Render error: {}", e);
        }
    }

    fn show_name_prompt(&mut self, buffer: &str) {
        let text = format!("New High Score! Enter your name: {}_", buffer);
        if let Err(e) = self.print_at(self.message_row(), &text) {
            log!("Render error: {}", e);
        }
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = self.print_at(self.message_row(), message) {
            log!("Render error: {}", e);
        }
    }
}

/// Reads keyboard events on a dedicated thread and forwards them as discrete
/// input signals; exits when the receiving side hangs up.
pub fn spawn_input_thread(sender: UnboundedSender<InputEvent>) {
    std::thread::spawn(move || {
        loop {
            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(_) => break,
            };

            let input = match key.code {
                KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
                KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
                KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
                KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::Quit)
                }
                KeyCode::Char(c) => Some(InputEvent::Char(c)),
                KeyCode::Backspace => Some(InputEvent::Backspace),
                KeyCode::Enter => Some(InputEvent::Enter),
                KeyCode::Esc => Some(InputEvent::Escape),
                _ => None,
            };

            if let Some(input) = input
                && sender.send(input).is_err()
            {
                break;
            }
        }
    });
}
