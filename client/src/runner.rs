use tokio::sync::mpsc::UnboundedReceiver;

use common::game::{GameSettings, SessionRng, SnakeGameState, TickOutcome};
use common::leaderboard::Leaderboard;
use common::log;

use crate::clock::SessionClock;
use crate::driver::{GameDriver, InputEvent};
use crate::gateway::ScoreService;

/// What the runner is waiting for between ticks. `EnteringName` routes text
/// input into the high-score prompt instead of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Playing,
    GameOver,
    EnteringName,
}

enum Step {
    Tick,
    Input(Option<InputEvent>),
}

/// Owns the whole control flow: the simulation state, the re-armable clock,
/// the input channel and the leaderboard sequence on game over.
pub struct GameRunner<D: GameDriver, S: ScoreService> {
    game: SnakeGameState,
    clock: SessionClock,
    rng: SessionRng,
    driver: D,
    score_service: S,
    input: UnboundedReceiver<InputEvent>,
    leaderboard: Leaderboard,
    mode: Mode,
    name_buffer: String,
}

impl<D: GameDriver, S: ScoreService> GameRunner<D, S> {
    pub fn new(
        settings: GameSettings,
        driver: D,
        score_service: S,
        input: UnboundedReceiver<InputEvent>,
    ) -> Self {
        Self {
            game: SnakeGameState::new(settings),
            clock: SessionClock::new(),
            rng: SessionRng::from_random(),
            driver,
            score_service,
            input,
            leaderboard: Leaderboard::default(),
            mode: Mode::GameOver,
            name_buffer: String::new(),
        }
    }

    pub async fn run(mut self) {
        self.refresh_leaderboard().await;
        self.start_game();

        loop {
            let step = tokio::select! {
                _ = self.clock.tick() => Step::Tick,
                event = self.input.recv() => Step::Input(event),
            };

            match step {
                Step::Tick => self.handle_tick().await,
                Step::Input(None) => break,
                Step::Input(Some(event)) => {
                    if !self.handle_input(event).await {
                        break;
                    }
                }
            }
        }

        log!("Client shutting down");
    }

    fn start_game(&mut self) {
        self.game.start(&mut self.rng);
        self.clock.start(self.game.tick_interval());
        self.mode = Mode::Playing;
        self.driver.render(&self.game.snapshot());
    }

    async fn handle_tick(&mut self) {
        match self.game.tick(&mut self.rng) {
            TickOutcome::Moved => self.driver.render(&self.game.snapshot()),
            TickOutcome::Ate => {
                // Growth is the only event that changes the cadence.
                self.clock.reschedule(self.game.tick_interval());
                self.driver.render(&self.game.snapshot());
            }
            TickOutcome::Died(_) => {
                self.clock.stop();
                self.driver.render(&self.game.snapshot());
                self.handle_game_over().await;
            }
            TickOutcome::Skipped => {}
        }
    }

    /// Runs once per ended run. Leaderboard failures are reported and the
    /// game stays in GameOver whatever the gateway does.
    async fn handle_game_over(&mut self) {
        let score = self.game.score();
        self.driver.show_game_over(score);
        self.refresh_leaderboard().await;

        if self.leaderboard.qualifies(i64::from(score)) {
            self.mode = Mode::EnteringName;
            self.name_buffer.clear();
            self.driver.show_name_prompt(&self.name_buffer);
        } else {
            self.mode = Mode::GameOver;
        }
    }

    async fn refresh_leaderboard(&mut self) {
        match self.score_service.fetch_high_scores().await {
            Ok(board) => {
                self.leaderboard = board;
                self.driver.show_high_scores(self.leaderboard.entries());
            }
            Err(e) => {
                log!("High score fetch failed: {}", e);
                self.driver
                    .notify(&format!("Failed to fetch high scores: {}", e));
            }
        }
    }

    /// Returns false when the client should exit.
    async fn handle_input(&mut self, event: InputEvent) -> bool {
        if event == InputEvent::Quit {
            return false;
        }

        match self.mode {
            Mode::Playing => match event {
                InputEvent::Turn(direction) => self.game.set_direction(direction),
                // Space restarts mid-run, matching the keyboard wiring the
                // simulation was built for.
                InputEvent::Char(' ') => self.start_game(),
                InputEvent::Char('q') | InputEvent::Escape => return false,
                _ => {}
            },
            Mode::GameOver => match event {
                InputEvent::Char(' ') | InputEvent::Enter => self.start_game(),
                InputEvent::Char('q') | InputEvent::Escape => return false,
                _ => {}
            },
            Mode::EnteringName => match event {
                InputEvent::Char(c) => {
                    self.name_buffer.push(c);
                    self.driver.show_name_prompt(&self.name_buffer);
                }
                InputEvent::Backspace => {
                    self.name_buffer.pop();
                    self.driver.show_name_prompt(&self.name_buffer);
                }
                InputEvent::Enter => self.finish_name_entry().await,
                InputEvent::Escape => {
                    // Declined the prompt.
                    self.mode = Mode::GameOver;
                    self.driver.show_game_over(self.game.score());
                }
                _ => {}
            },
        }
        true
    }

    async fn finish_name_entry(&mut self) {
        let name = self.name_buffer.trim().to_string();
        self.mode = Mode::GameOver;
        self.driver.show_game_over(self.game.score());

        // A blank name declines the submission.
        if name.is_empty() {
            return;
        }

        let score = i64::from(self.game.score());
        match self.score_service.submit_score(&name, score).await {
            Ok(()) => {
                self.driver.notify("Score submitted successfully!");
                self.refresh_leaderboard().await;
            }
            Err(e) => {
                log!("Score submission failed: {}", e);
                self.driver
                    .notify(&format!("Failed to submit score: {}", e));
            }
        }
    }
}
