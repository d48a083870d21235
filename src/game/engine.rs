use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    config::{ConfigError, Difficulty, GameConfig},
    grid::Grid,
    state::{Cell, Phase, Snake},
};
use crate::rating::{KeyValueStore, RatingEntry, RatingStore};
use crate::render::{Surface, palette};

const LOSE_FONT_PX: u32 = 50;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not running; nothing happened
    Idle,
    /// The snake advanced one cell
    Moved,
    /// The snake ate and grew by one cell
    Ate,
    /// The snake ran into itself and the round ended
    Crashed,
    /// The snake ate the last free cell and the round ended
    BoardFull,
}

/// The game engine: snake, food, score and the round lifecycle
///
/// The engine draws onto its surface and records results in its rating
/// store. It does not own a timer; whoever drives it calls [`tick`] every
/// [`tick_interval`] while the engine is running.
///
/// [`tick`]: GameEngine::tick
/// [`tick_interval`]: GameEngine::tick_interval
pub struct GameEngine<S, K> {
    config: GameConfig,
    grid: Grid,
    surface: S,
    ratings: RatingStore<K>,
    rng: StdRng,
    phase: Phase,
    snake: Snake,
    food: Option<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    score: u32,
    last_score: u32,
    player_name: String,
    difficulty: Difficulty,
    leaderboard: Vec<RatingEntry>,
}

impl<S: Surface, K: KeyValueStore> GameEngine<S, K> {
    /// Create an idle engine and draw the empty grid
    pub fn new(config: GameConfig, surface: S, store: K) -> Result<Self, ConfigError> {
        Self::with_rng(config, surface, store, StdRng::from_entropy())
    }

    /// Like [`GameEngine::new`] with reproducible food placement
    pub fn with_seed(config: GameConfig, surface: S, store: K, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, surface, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut surface: S, store: K, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(&config);
        grid.resize(&mut surface);
        grid.redraw(&mut surface);
        let snake = initial_snake(&config);

        Ok(Self {
            config,
            grid,
            surface,
            ratings: RatingStore::new(store),
            rng,
            phase: Phase::Idle,
            snake,
            food: None,
            direction: Direction::Down,
            pending_direction: None,
            score: 0,
            last_score: 0,
            player_name: String::new(),
            difficulty: Difficulty::default(),
            leaderboard: Vec::new(),
        })
    }

    /// Begin a round. Returns false, changing nothing, if a round is running.
    pub fn start(&mut self, player_name: &str, difficulty: Difficulty) -> bool {
        if self.phase == Phase::Running {
            debug!("start ignored, round already running");
            return false;
        }

        self.leaderboard.clear();
        self.player_name = player_name.to_string();
        self.difficulty = difficulty;
        self.score = 0;
        self.snake = initial_snake(&self.config);
        self.direction = Direction::Down;
        self.pending_direction = None;

        self.grid.resize(&mut self.surface);
        self.grid.redraw(&mut self.surface);
        self.phase = Phase::Running;

        info!(
            player = %self.player_name,
            difficulty = %self.difficulty.label,
            tick_ms = self.difficulty.tick_ms,
            "round started"
        );

        self.food = self.spawn_food();
        if self.food.is_none() {
            self.end();
        }
        true
    }

    /// Handle a key name such as `ArrowUp` or `w`. Returns true when it
    /// became the pending direction.
    pub fn on_direction_input(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(direction) => self.steer(direction),
            None => false,
        }
    }

    /// Queue a direction for the next tick. Reversals and input outside a
    /// running round are ignored; the latest accepted input wins.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running || self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advance the round by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        self.surface.clear();
        self.grid.redraw(&mut self.surface);
        self.draw_snake();
        self.draw_food();

        if let Some(direction) = self.pending_direction.take() {
            if direction != self.direction {
                debug!(from = ?self.direction, to = ?direction, "turn");
            }
            self.direction = direction;
        }

        let next = self.next_head();
        if self.snake.occupies(next) {
            self.grid.fill_cell(&mut self.surface, next, palette::SNAKE_CRASH);
            self.end();
            return TickOutcome::Crashed;
        }

        self.snake.push_head(next);

        if self.food != Some(next) {
            self.snake.pop_tail();
            return TickOutcome::Moved;
        }

        let size = self.grid.cell_size() as u32;
        self.surface.clear_rect(next.x, next.y, size, size);
        self.score += 1;
        debug!(score = self.score, length = self.snake.len(), "food eaten");

        self.food = self.spawn_food();
        if self.food.is_none() {
            self.end();
            return TickOutcome::BoardFull;
        }
        self.draw_food();
        TickOutcome::Ate
    }

    /// Finish the running round: record the score, draw the result and load
    /// the leaderboard. Does nothing unless a round is running.
    pub fn end(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        // Leave Running first so no further tick acts on this round.
        self.phase = Phase::Ended;
        self.pending_direction = None;

        if let Err(err) = self
            .ratings
            .upsert(&self.difficulty.label, &self.player_name, self.score)
        {
            warn!(error = %err, "failed to save rating");
        }

        self.draw_lose_text();
        info!(
            player = %self.player_name,
            difficulty = %self.difficulty.label,
            score = self.score,
            "round ended"
        );

        self.last_score = self.score;
        self.score = 0;
        self.leaderboard = self.ratings.list(&self.difficulty.label);
    }

    /// Leave the end-of-round screen. Returns false unless a round has ended.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::Ended {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether the restart control should be offered
    pub fn can_restart(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Interval between ticks, `None` unless a round is running
    pub fn tick_interval(&self) -> Option<Duration> {
        self.is_running().then(|| self.difficulty.tick_interval())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score of the most recently ended round
    pub fn last_score(&self) -> u32 {
        self.last_score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Leaderboard of the current difficulty, filled when a round ends
    pub fn leaderboard(&self) -> &[RatingEntry] {
        &self.leaderboard
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn ratings(&self) -> &RatingStore<K> {
        &self.ratings
    }

    /// Head position after one step, wrapping around the edges.
    ///
    /// A head sitting on the edge it is about to leave is first shifted to
    /// the virtual cell just beyond the opposite edge, then moved.
    fn next_head(&self) -> Cell {
        let cell_size = self.grid.cell_size();
        let last = self.grid.grid_size() - cell_size;
        let Cell { mut x, mut y } = self.snake.head();

        match self.direction {
            Direction::Left if x == 0 => x = last + cell_size,
            Direction::Right if x == last => x = -cell_size,
            Direction::Up if y == 0 => y = last + cell_size,
            Direction::Down if y == last => y = -cell_size,
            _ => {}
        }

        Cell::new(x, y).moved_in_direction(self.direction, cell_size)
    }

    /// Random free cell. Falls back to picking among the remaining free
    /// cells when sampling keeps hitting the snake; `None` on a full board.
    fn spawn_food(&mut self) -> Option<Cell> {
        let count = self.grid.cell_count();
        let cell_size = self.grid.cell_size();
        let attempts = 4 * (count as usize).pow(2);

        for _ in 0..attempts {
            let cell = Cell::at(
                self.rng.gen_range(0..count),
                self.rng.gen_range(0..count),
                cell_size,
            );
            if !self.snake.occupies(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = self
            .grid
            .cells()
            .filter(|cell| !self.snake.occupies(*cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    fn draw_snake(&mut self) {
        let (head, body) = self.snake.cells().split_at(1);
        self.grid.fill_cell(&mut self.surface, head[0], palette::SNAKE_HEAD);
        for cell in body {
            self.grid.fill_cell(&mut self.surface, *cell, palette::SNAKE);
        }
    }

    fn draw_food(&mut self) {
        let Some(food) = self.food else {
            return;
        };
        let half = self.grid.cell_size() / 2;
        let radius = (half - 1).max(1) as u32;
        self.surface
            .fill_circle(food.x + half, food.y + half, radius, palette::FOOD);
    }

    fn draw_lose_text(&mut self) {
        let center = self.grid.center();
        let half_font = (LOSE_FONT_PX / 2) as i32;
        self.surface.fill_text(
            &format!("Score: {}", self.score),
            center,
            center - half_font,
            LOSE_FONT_PX,
            palette::LOSE_TEXT,
        );
        self.surface
            .fill_text("Lose", center, center + half_font, LOSE_FONT_PX, palette::LOSE_TEXT);
    }
}

/// Vertical snake in the start column, head on the bottom row
fn initial_snake(config: &GameConfig) -> Snake {
    let length = config.initial_snake_length.min(config.cell_count) as usize;
    Snake::vertical(
        config.start_column as i32,
        config.cell_count as i32 - 1,
        length,
        config.cell_size as i32,
    )
}
