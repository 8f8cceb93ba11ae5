// Safety evaluator: decides whether a candidate first move can be
// ridden all the way to food and still leave the snake alive afterward.
//
// One algorithm shape serves both leniency levels. The leg to food
// always grants tail leniency (the tail keeps advancing while the snake
// rides the path); only the post-eat head-to-tail check varies with the
// mode. The asymmetry is the risk-escalation policy and must not be
// collapsed into a single flag.

use std::collections::VecDeque;

use crate::game::Game;
use crate::pathfinding::{astar, GridView};
use crate::simple_profiler::ProfileGuard;
use crate::types::{Coord, Direction, Path};

/// Minimal simulation value: just the body, the food and the board
/// dimensions. Cloned freely, never aliased with live state.
#[derive(Debug, Clone)]
pub struct SimState {
    width: i32,
    height: i32,
    body: VecDeque<Coord>,
    food: Option<Coord>,
}

impl SimState {
    pub fn from_game(game: &Game) -> Self {
        SimState {
            width: game.width(),
            height: game.height(),
            body: game.snake().clone(),
            food: game.food(),
        }
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    pub fn tail(&self) -> Coord {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    pub fn body(&self) -> &VecDeque<Coord> {
        &self.body
    }

    pub fn grid(&self) -> GridView {
        GridView::new(self.width, self.height, &self.body)
    }

    /// Moves the hypothetical head onto `cell`: grows when the cell is
    /// the food, otherwise the tail advances.
    pub fn apply_step(&mut self, cell: Coord) {
        self.body.push_front(cell);
        if self.food != Some(cell) {
            self.body.pop_back();
        }
    }

    /// The neck blocks an instantaneous reversal, mirroring the live
    /// model's substitution rule.
    fn is_reversal(&self, direction: Direction) -> bool {
        self.body.len() > 1 && direction.apply(&self.head()) == self.body[1]
    }
}

/// Leniency of the post-eat survivability leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyMode {
    /// Post-eat tail reachability with the tail as a normal obstacle
    Strict,
    /// Post-eat tail reachability assuming the tail keeps vacating;
    /// only used after the loop detector signals prolonged orbiting
    Lenient,
}

impl SafetyMode {
    fn post_eat_allows_tail(self) -> bool {
        match self {
            SafetyMode::Strict => false,
            SafetyMode::Lenient => true,
        }
    }
}

/// An accepted candidate: the first move, the full visualization path
/// (live head included) and the total trip length used for ranking.
#[derive(Debug, Clone)]
pub struct FoodPlan {
    pub direction: Direction,
    pub path: Path,
    pub total_len: usize,
}

/// Evaluates one candidate first move against the eight-step safety
/// check. Returns the plan when the move survives, `None` otherwise.
pub fn evaluate_direction(
    state: &SimState,
    direction: Direction,
    mode: SafetyMode,
) -> Option<FoodPlan> {
    let food = state.food()?;
    let head = state.head();
    let tail = state.tail();

    if state.is_reversal(direction) {
        return None;
    }

    let first = direction.apply(&head);
    if !state.grid().valid_cell(first, true) {
        return None;
    }
    // The tail cannot vacate if this very step eats: the cell would stay
    // occupied forever.
    if first == tail && first == food {
        return None;
    }

    // Hypothetical first step.
    let mut sim = state.clone();
    sim.apply_step(first);

    // Ride to food with tail leniency; the tail advances under us.
    let path_to_food = astar(&sim.grid(), sim.head(), Some(food), true)?;

    // Replay the whole trip to materialize the body at the moment of
    // eating (growth happens exactly once, on the final cell).
    let mut after_eat = sim.clone();
    for &cell in path_to_food.iter().skip(1) {
        after_eat.apply_step(cell);
    }

    // Post-eat survivability at this mode's leniency.
    astar(
        &after_eat.grid(),
        after_eat.head(),
        Some(after_eat.tail()),
        mode.post_eat_allows_tail(),
    )?;

    let total_len = 1 + path_to_food.len().saturating_sub(1);
    let mut full_path = Vec::with_capacity(path_to_food.len() + 1);
    full_path.push(head);
    full_path.extend_from_slice(&path_to_food);

    Some(FoodPlan {
        direction,
        path: full_path,
        total_len,
    })
}

/// Evaluates all four directions and returns the shortest surviving
/// plan. Ties break by Direction declaration order: the first minimal
/// plan found wins.
pub fn best_plan(state: &SimState, mode: SafetyMode) -> Option<FoodPlan> {
    let _guard = ProfileGuard::new("safety_eval");

    let mut best: Option<FoodPlan> = None;
    for d in Direction::all().iter() {
        if let Some(plan) = evaluate_direction(state, *d, mode) {
            let improves = match &best {
                Some(b) => plan.total_len < b.total_len,
                None => true,
            };
            if improves {
                best = Some(plan);
            }
        }
    }
    best
}

/// Existence probe used by the horizon simulation: does any strict-safe
/// plan exist from this state?
pub fn strict_plan_exists(state: &SimState) -> bool {
    Direction::all()
        .iter()
        .any(|d| evaluate_direction(state, *d, SafetyMode::Strict).is_some())
}
