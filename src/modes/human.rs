use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::debug;

use super::dialog::{DialogOutcome, StartDialog};
use crate::game::{Difficulty, GameConfig, GameEngine, Phase, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::rating::KeyValueStore;
use crate::render::{Canvas, Controls, DialogView, Hud, Renderer, View};

/// Interactive play in the terminal
pub struct HumanMode<K> {
    engine: GameEngine<Canvas, K>,
    renderer: Renderer,
    input_handler: InputHandler,
    difficulties: Vec<Difficulty>,
    dialog: Option<StartDialog>,
    should_quit: bool,
}

impl<K: KeyValueStore> HumanMode<K> {
    /// Build the engine and open the start dialog, prefilled with
    /// `player_name` and `difficulty`
    pub fn new(config: GameConfig, store: K, player_name: &str, difficulty: Difficulty) -> Result<Self> {
        let engine = GameEngine::new(config, Canvas::default(), store)
            .context("Invalid game configuration")?;

        let mut difficulties = Difficulty::presets();
        let selected = match difficulties.iter().position(|d| *d == difficulty) {
            Some(i) => i,
            None => {
                difficulties.push(difficulty);
                difficulties.len() - 1
            }
        };
        let dialog = StartDialog::new(player_name, selected, difficulties.len());

        Ok(Self {
            engine,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            difficulties,
            dialog: Some(dialog),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Present at 30 FPS; game ticks follow the difficulty
        let mut render_timer = interval(Duration::from_millis(33));
        let mut ticker: Option<Interval> = None;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, only while a round is running
                _ = next_tick(&mut ticker) => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let view = self.view();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // Drop the timer as soon as the round stops so no late tick fires
            sync_ticker(self.engine.tick_interval(), &mut ticker);

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(dialog) = self.dialog.as_mut() {
            let action = self.input_handler.handle_dialog_event(key);
            match dialog.apply(action) {
                DialogOutcome::Editing => {}
                DialogOutcome::Submit { name, difficulty } => {
                    self.dialog = None;
                    let difficulty = self.difficulties[difficulty].clone();
                    self.engine.start(&name, difficulty);
                }
                DialogOutcome::Dismiss => self.dialog = None,
                DialogOutcome::Quit => self.should_quit = true,
            }
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(name) => {
                self.engine.on_direction_input(&name);
            }
            KeyAction::EndGame => self.engine.end(),
            KeyAction::Restart => self.open_dialog(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Reopen the start dialog unless a round is running
    fn open_dialog(&mut self) {
        if self.engine.is_running() {
            return;
        }
        self.engine.restart();

        let (name, selected) = match &self.dialog {
            Some(dialog) => (dialog.name.clone(), dialog.selected),
            None => {
                let selected = self
                    .difficulties
                    .iter()
                    .position(|d| d == self.engine.difficulty())
                    .unwrap_or(0);
                (self.engine.player_name().to_string(), selected)
            }
        };
        self.dialog = Some(StartDialog::new(name, selected, self.difficulties.len()));
    }

    fn update_game(&mut self) {
        let outcome = self.engine.tick();
        if matches!(outcome, TickOutcome::Crashed | TickOutcome::BoardFull) {
            debug!(?outcome, "round over");
        }
    }

    fn view(&self) -> View<'_> {
        let engine = &self.engine;
        let score = if engine.is_running() {
            engine.score()
        } else {
            engine.last_score()
        };

        let controls = match (&self.dialog, engine.phase()) {
            (Some(_), _) => Controls::Dialog,
            (None, Phase::Running) => Controls::Running,
            (None, Phase::Ended) => Controls::RoundOver,
            (None, Phase::Idle) => Controls::Idle,
        };

        View {
            hud: Hud {
                score,
                player_name: engine.player_name(),
                difficulty: &engine.difficulty().label,
            },
            canvas: engine.surface(),
            cell_size: engine.grid().cell_size() as u32,
            leaderboard: engine.leaderboard(),
            controls,
            dialog: self.dialog.as_ref().map(|dialog| DialogView {
                name: &dialog.name,
                difficulties: &self.difficulties,
                selected: dialog.selected,
            }),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Wait for the next tick, or forever when no round is running
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Create the tick timer when a round starts and drop it when it stops
fn sync_ticker(period: Option<Duration>, ticker: &mut Option<Interval>) {
    match (period, ticker.as_ref()) {
        (Some(period), None) => {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some(timer);
        }
        (None, Some(_)) => *ticker = None,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode<MemoryStore> {
        HumanMode::new(GameConfig::small(), MemoryStore::new(), "Ann", Difficulty::hard()).unwrap()
    }

    fn key(mode: &mut HumanMode<MemoryStore>, code: KeyCode) {
        mode.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.engine.phase(), Phase::Idle);
        let dialog = mode.dialog.as_ref().unwrap();
        assert_eq!(dialog.name, "Ann");
        assert_eq!(mode.difficulties[dialog.selected], Difficulty::hard());
        assert_eq!(mode.view().controls, Controls::Dialog);
    }

    #[test]
    fn test_custom_difficulty_is_offered() {
        let mode = HumanMode::new(
            GameConfig::small(),
            MemoryStore::new(),
            "",
            Difficulty::new("Custom", 150),
        )
        .unwrap();
        let dialog = mode.dialog.as_ref().unwrap();
        assert_eq!(mode.difficulties[dialog.selected].label, "Custom");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let result = HumanMode::new(GameConfig::new(1, 10), MemoryStore::new(), "", Difficulty::easy());
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_starts_round() {
        let mut mode = mode();
        key(&mut mode, KeyCode::Enter);

        assert!(mode.dialog.is_none());
        assert!(mode.engine.is_running());
        assert_eq!(mode.engine.difficulty(), &Difficulty::hard());
        assert_eq!(mode.engine.tick_interval(), Some(Duration::from_millis(100)));
        assert_eq!(mode.view().controls, Controls::Running);
    }

    #[test]
    fn test_steering_and_ending() {
        let mut mode = mode();
        key(&mut mode, KeyCode::Enter);

        key(&mut mode, KeyCode::Char('d'));
        assert_eq!(mode.engine.pending_direction(), Some(crate::game::Direction::Right));

        // Restart is ignored mid-round
        key(&mut mode, KeyCode::Char('r'));
        assert!(mode.dialog.is_none());

        key(&mut mode, KeyCode::Char('e'));
        assert_eq!(mode.engine.phase(), Phase::Ended);
        assert_eq!(mode.engine.leaderboard().len(), 1);
        assert_eq!(mode.view().controls, Controls::RoundOver);

        key(&mut mode, KeyCode::Char('r'));
        assert_eq!(mode.engine.phase(), Phase::Idle);
        assert_eq!(mode.dialog.as_ref().unwrap().name, "Ann");
    }

    #[test]
    fn test_dismissed_dialog_can_be_reopened() {
        let mut mode = mode();
        key(&mut mode, KeyCode::Esc);
        assert!(mode.dialog.is_none());
        assert_eq!(mode.view().controls, Controls::Idle);

        key(&mut mode, KeyCode::Char('n'));
        assert!(mode.dialog.is_some());
    }

    #[test]
    fn test_ticks_advance_round() {
        let mut mode = mode();
        key(&mut mode, KeyCode::Enter);
        let head = mode.engine.snake().head();

        mode.update_game();
        assert_ne!(mode.engine.snake().head(), head);
    }

    #[test]
    fn test_quit_from_dialog() {
        let mut mode = mode();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        mode.handle_event(Event::Key(ctrl_c));
        assert!(mode.should_quit);
    }

    #[tokio::test]
    async fn test_sync_ticker_follows_round() {
        let mut ticker = None;
        sync_ticker(Some(Duration::from_millis(100)), &mut ticker);
        assert!(ticker.is_some());

        sync_ticker(Some(Duration::from_millis(100)), &mut ticker);
        assert!(ticker.is_some());

        sync_ticker(None, &mut ticker);
        assert!(ticker.is_none());
    }
}
