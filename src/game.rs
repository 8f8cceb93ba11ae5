// Live game model: board dimensions, snake body, food, score and
// terminal flags, plus the single state-advance operation.
//
// Everything the arbiter simulates runs on private copies (see
// safety.rs); this struct is only ever mutated through advance() and
// reset(), so the live state stays consistent even when a search branch
// is abandoned mid-evaluation.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::VecDeque;

use crate::config::Config;
use crate::pathfinding::GridView;
use crate::tail_chase::TailChaseTracker;
use crate::types::{Coord, Direction, GameSnapshot, Path};

/// Initial snake length produced by reset()
const INITIAL_LENGTH: usize = 3;

pub struct Game {
    width: i32,
    height: i32,
    snake: VecDeque<Coord>,
    direction: Direction,
    food: Option<Coord>,
    score: u32,
    game_over: bool,
    win: bool,

    // Visualization surface consumed by the renderer/runner
    current_path: Option<Path>,
    show_path: bool,

    pub(crate) tail_chase: TailChaseTracker,
    rng: StdRng,
}

impl Game {
    /// Creates a game with a centered 3-segment snake heading Right and
    /// food already spawned.
    ///
    /// `seed` fixes the food placement sequence for reproducible runs;
    /// `None` seeds from the OS.
    pub fn new(width: i32, height: i32, seed: Option<u64>) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!(
                "Board dimensions must be positive, got {}x{}",
                width, height
            ));
        }
        if width < INITIAL_LENGTH as i32 {
            return Err(format!(
                "Board width {} cannot fit the initial {}-segment snake",
                width, INITIAL_LENGTH
            ));
        }

        let mut game = Game {
            width,
            height,
            snake: VecDeque::new(),
            direction: Direction::Right,
            food: None,
            score: 0,
            game_over: false,
            win: false,
            current_path: None,
            show_path: true,
            tail_chase: TailChaseTracker::default(),
            rng: seed_rng(seed),
        };
        game.reset();
        Ok(game)
    }

    /// Creates a game from the `[board]` and `[loop_detection]` config sections
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let mut game = Game::new(config.board.width, config.board.height, config.board.seed)?;
        game.tail_chase = TailChaseTracker::new(config.loop_detection.max_loops);
        Ok(game)
    }

    /// Creates a game from an explicit snake placement. Used by tests,
    /// scenario setups and replay reconstruction.
    ///
    /// Fails fast on inconsistent placement: empty or out-of-bounds
    /// bodies, repeated cells, non-adjacent consecutive segments, or
    /// food on the snake.
    pub fn with_snake(
        width: i32,
        height: i32,
        body: Vec<Coord>,
        direction: Direction,
        food: Option<Coord>,
        seed: Option<u64>,
    ) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!(
                "Board dimensions must be positive, got {}x{}",
                width, height
            ));
        }
        if body.is_empty() {
            return Err("Snake body must contain at least one cell".to_string());
        }
        for (i, cell) in body.iter().enumerate() {
            if cell.x < 0 || cell.x >= width || cell.y < 0 || cell.y >= height {
                return Err(format!("Snake segment {} at {} is out of bounds", i, cell));
            }
            if body[..i].contains(cell) {
                return Err(format!("Snake segment {} at {} repeats an earlier cell", i, cell));
            }
        }
        for (i, pair) in body.windows(2).enumerate() {
            if pair[0].manhattan(pair[1]) != 1 {
                return Err(format!(
                    "Snake segments {} and {} at {} and {} are not 4-adjacent",
                    i,
                    i + 1,
                    pair[0],
                    pair[1]
                ));
            }
        }
        if let Some(f) = food {
            if f.x < 0 || f.x >= width || f.y < 0 || f.y >= height {
                return Err(format!("Food at {} is out of bounds", f));
            }
            if body.contains(&f) {
                return Err(format!("Food at {} overlaps the snake", f));
            }
        }

        Ok(Game {
            width,
            height,
            snake: body.into_iter().collect(),
            direction,
            food,
            score: 0,
            game_over: false,
            win: false,
            current_path: None,
            show_path: true,
            tail_chase: TailChaseTracker::default(),
            rng: seed_rng(seed),
        })
    }

    /// Resets to a fresh session in place: centered snake heading Right,
    /// new food, cleared score, flags and loop tracking.
    pub fn reset(&mut self) {
        // Head x is clamped so the initial body fits on narrow boards.
        let cx = (self.width / 2).max(INITIAL_LENGTH as i32 - 1);
        let cy = self.height / 2;
        self.snake = (0..INITIAL_LENGTH as i32)
            .map(|i| Coord::new(cx - i, cy))
            .collect();
        self.direction = Direction::Right;
        self.score = 0;
        self.game_over = false;
        self.win = false;
        self.current_path = None;
        self.show_path = true;
        self.tail_chase.reset();
        self.spawn_food();
    }

    /// Places food on a uniformly random free cell, or declares a win
    /// when the snake occupies the whole board.
    fn spawn_food(&mut self) {
        let mut free: Vec<Coord> = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Coord::new(x, y);
                if !self.snake.contains(&cell) {
                    free.push(cell);
                }
            }
        }

        match free.choose(&mut self.rng) {
            Some(&cell) => self.food = Some(cell),
            None => {
                self.food = None;
                self.game_over = true;
                self.win = true;
                debug!("Board full: win state reached");
            }
        }
    }

    /// True iff `p` can be moved into given the current (pre-move) body.
    /// See GridView::valid_cell for the tail-leniency rule.
    pub fn valid_cell(&self, p: Coord, allow_tail: bool) -> bool {
        self.grid().valid_cell(p, allow_tail)
    }

    /// Obstacle view over the live body for path searches
    pub fn grid(&self) -> GridView {
        GridView::new(self.width, self.height, &self.snake)
    }

    /// Advances the game by one tick in the given direction.
    ///
    /// This is the only mutator of live state. It substitutes the
    /// current heading for an instantaneous reversal, detects wall and
    /// body collisions (stepping onto the tail is legal only when the
    /// move does not eat food, since the tail vacates otherwise), grows
    /// on food and resets the loop tracker on every consumption.
    pub fn advance(&mut self, direction: Direction) {
        if self.game_over {
            return;
        }

        let mut direction = direction;
        if self.snake.len() > 1 && direction.apply(&self.head()) == self.snake[1] {
            direction = self.direction;
        }

        let new_head = direction.apply(&self.head());
        self.direction = direction;
        let tail = self.tail();

        let will_eat = self.food == Some(new_head);
        let stepping_on_tail = new_head == tail;

        if !self.grid().in_bounds(new_head) {
            self.game_over = true;
            debug!("Collision with wall at {}", new_head);
            return;
        }
        if self.snake.contains(&new_head) && !(stepping_on_tail && !will_eat) {
            self.game_over = true;
            debug!("Collision with body at {}", new_head);
            return;
        }

        self.snake.push_front(new_head);

        if will_eat {
            self.score += 1;
            self.spawn_food();
            self.tail_chase.reset();
        } else {
            self.snake.pop_back();
        }
    }

    // ==================== ACCESSORS ====================

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn snake(&self) -> &VecDeque<Coord> {
        &self.snake
    }

    pub fn head(&self) -> Coord {
        self.snake[0]
    }

    pub fn tail(&self) -> Coord {
        self.snake[self.snake.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn win(&self) -> bool {
        self.win
    }

    /// The path chosen by the last arbiter decision, for visualization only
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_ref()
    }

    pub(crate) fn set_current_path(&mut self, path: Option<Path>) {
        self.current_path = path;
    }

    pub fn show_path(&self) -> bool {
        self.show_path
    }

    pub fn set_show_path(&mut self, show: bool) {
        self.show_path = show;
    }

    pub fn tail_chase(&self) -> &TailChaseTracker {
        &self.tail_chase
    }

    // ==================== SNAPSHOTS ====================

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.width,
            height: self.height,
            snake: self.snake.iter().copied().collect(),
            direction: self.direction,
            food: self.food,
            score: self.score,
        }
    }

    /// Rebuilds a live game from a recorded snapshot. The RNG is seeded
    /// to a fixed value: replayed decisions never spawn food themselves.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self, String> {
        let mut game = Game::with_snake(
            snapshot.width,
            snapshot.height,
            snapshot.snake.clone(),
            snapshot.direction,
            snapshot.food,
            Some(0),
        )?;
        game.score = snapshot.score;
        Ok(game)
    }
}

fn seed_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(Game::new(0, 5, Some(1)).is_err());
        assert!(Game::new(5, 0, Some(1)).is_err());
        assert!(Game::new(-3, 4, Some(1)).is_err());
    }

    #[test]
    fn test_rejects_inconsistent_snake() {
        // out of bounds
        assert!(Game::with_snake(
            3,
            3,
            vec![Coord::new(3, 0)],
            Direction::Right,
            None,
            Some(1)
        )
        .is_err());
        // repeated cell
        assert!(Game::with_snake(
            3,
            3,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 0)],
            Direction::Right,
            None,
            Some(1)
        )
        .is_err());
        // non-adjacent segments
        assert!(Game::with_snake(
            3,
            3,
            vec![Coord::new(0, 0), Coord::new(2, 0)],
            Direction::Right,
            None,
            Some(1)
        )
        .is_err());
        // food on the snake
        assert!(Game::with_snake(
            3,
            3,
            vec![Coord::new(0, 0)],
            Direction::Right,
            Some(Coord::new(0, 0)),
            Some(1)
        )
        .is_err());
    }

    #[test]
    fn test_food_spawn_is_reproducible_under_seed() {
        let a = Game::new(10, 10, Some(42)).unwrap();
        let b = Game::new(10, 10, Some(42)).unwrap();
        assert_eq!(a.food(), b.food());
    }

    #[test]
    fn test_reversal_is_substituted() {
        let mut game = Game::with_snake(
            5,
            5,
            vec![Coord::new(2, 2), Coord::new(1, 2), Coord::new(0, 2)],
            Direction::Right,
            Some(Coord::new(4, 4)),
            Some(1),
        )
        .unwrap();

        // Left would reverse onto the neck; the engine keeps heading Right.
        game.advance(Direction::Left);
        assert!(!game.game_over());
        assert_eq!(game.head(), Coord::new(3, 2));
        assert_eq!(game.direction(), Direction::Right);
    }

    #[test]
    fn test_stepping_on_tail_is_legal_when_not_eating() {
        // 2x2 ring: head can step onto the vacating tail forever.
        let mut game = Game::with_snake(
            3,
            3,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(1, 1),
                Coord::new(0, 1),
            ],
            Direction::Left,
            Some(Coord::new(2, 2)),
            Some(1),
        )
        .unwrap();

        game.advance(Direction::Down);
        assert!(!game.game_over());
        assert_eq!(game.head(), Coord::new(0, 1));
    }

    #[test]
    fn test_eating_unconditionally_resets_loop_tracking() {
        let mut game = Game::with_snake(
            5,
            5,
            vec![Coord::new(1, 1), Coord::new(0, 1)],
            Direction::Right,
            Some(Coord::new(2, 1)),
            Some(1),
        )
        .unwrap();

        // Simulate an active tail-chase session with a completed orbit.
        let head = game.head();
        game.tail_chase.note_tail_chase(head, Direction::Right, 1);
        game.tail_chase.note_tail_chase(head, Direction::Right, 1);
        assert!(game.tail_chase.in_session());
        assert_eq!(game.tail_chase.loops(), 1);

        game.advance(Direction::Right);
        assert_eq!(game.score(), 1);
        assert!(!game.tail_chase.in_session());
        assert_eq!(game.tail_chase.loops(), 0);
        assert_eq!(game.tail_chase.steps_since_anchor(), 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let game = Game::new(8, 8, Some(7)).unwrap();
        let snap = game.snapshot();
        let rebuilt = Game::from_snapshot(&snap).unwrap();
        assert_eq!(rebuilt.head(), game.head());
        assert_eq!(rebuilt.food(), game.food());
        assert_eq!(rebuilt.direction(), game.direction());
        assert_eq!(rebuilt.score(), game.score());
    }
}
