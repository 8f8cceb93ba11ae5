// Integration tests for the live game model
//
// Exercises the documented model behavior: the reset layout, food
// consumption and respawn, the collision rules enforced by advance,
// and the board-full win state.

use ai_snake_rust::game::Game;
use ai_snake_rust::types::{Coord, Direction};

#[test]
fn test_reset_scenario_on_10x10() {
    let game = Game::new(10, 10, Some(3)).unwrap();

    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.head(), Coord::new(5, 5));
    assert_eq!(
        game.snake().iter().copied().collect::<Vec<_>>(),
        vec![Coord::new(5, 5), Coord::new(4, 5), Coord::new(3, 5)]
    );
    assert_eq!(game.direction(), Direction::Right);
    assert_eq!(game.score(), 0);
    assert!(!game.game_over());
    assert!(!game.win());

    let food = game.food().expect("food must be spawned on reset");
    assert!(!game.snake().contains(&food), "food must not be on the snake");
}

#[test]
fn test_reset_reinitializes_a_finished_game() {
    let mut game = Game::with_snake(
        5,
        5,
        vec![Coord::new(0, 0), Coord::new(1, 0)],
        Direction::Left,
        Some(Coord::new(4, 4)),
        Some(1),
    )
    .unwrap();

    game.advance(Direction::Left);
    assert!(game.game_over());

    game.reset();
    assert!(!game.game_over());
    assert_eq!(game.score(), 0);
    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.direction(), Direction::Right);
    assert!(game.food().is_some());
}

#[test]
fn test_eating_grows_scores_and_relocates_food() {
    let mut game = Game::with_snake(
        5,
        5,
        vec![Coord::new(1, 1), Coord::new(0, 1)],
        Direction::Right,
        Some(Coord::new(2, 1)),
        Some(9),
    )
    .unwrap();

    game.advance(Direction::Right);

    assert!(!game.game_over());
    assert_eq!(game.score(), 1);
    assert_eq!(game.snake().len(), 3, "eating must grow the snake by one");
    assert_eq!(game.head(), Coord::new(2, 1));

    let food = game.food().expect("food must respawn after being eaten");
    assert!(!game.snake().contains(&food));
    assert!(!game.tail_chase().in_session());
    assert_eq!(game.tail_chase().loops(), 0);
}

#[test]
fn test_normal_move_does_not_grow() {
    let mut game = Game::with_snake(
        5,
        5,
        vec![Coord::new(1, 1), Coord::new(0, 1)],
        Direction::Right,
        Some(Coord::new(4, 4)),
        Some(1),
    )
    .unwrap();

    game.advance(Direction::Right);
    assert_eq!(game.snake().len(), 2);
    assert_eq!(game.head(), Coord::new(2, 1));
    assert_eq!(game.score(), 0);
}

#[test]
fn test_wall_collision_terminates() {
    let mut game = Game::with_snake(
        5,
        5,
        vec![Coord::new(0, 0), Coord::new(1, 0)],
        Direction::Left,
        Some(Coord::new(4, 4)),
        Some(1),
    )
    .unwrap();

    game.advance(Direction::Left);
    assert!(game.game_over());
    assert!(!game.win());
    assert_eq!(game.head(), Coord::new(0, 0), "a fatal move must not be applied");
}

#[test]
fn test_body_collision_terminates() {
    let mut game = Game::with_snake(
        5,
        5,
        vec![
            Coord::new(0, 1),
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(1, 2),
        ],
        Direction::Down,
        Some(Coord::new(4, 4)),
        Some(1),
    )
    .unwrap();

    // (1,1) is body but neither neck nor tail.
    game.advance(Direction::Right);
    assert!(game.game_over());
    assert!(!game.win());
}

#[test]
fn test_win_when_the_last_cell_is_eaten() {
    let mut game = Game::with_snake(
        2,
        2,
        vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)],
        Direction::Up,
        Some(Coord::new(1, 0)),
        Some(1),
    )
    .unwrap();

    game.advance(Direction::Right);

    assert_eq!(game.score(), 1);
    assert_eq!(game.snake().len(), 4);
    assert!(game.win());
    assert!(game.game_over(), "win implies game over");
    assert_eq!(game.food(), None);
}

#[test]
fn test_advance_is_a_noop_after_game_over() {
    let mut game = Game::with_snake(
        5,
        5,
        vec![Coord::new(0, 0), Coord::new(1, 0)],
        Direction::Left,
        Some(Coord::new(4, 4)),
        Some(1),
    )
    .unwrap();

    game.advance(Direction::Left);
    assert!(game.game_over());

    let head = game.head();
    let score = game.score();
    game.advance(Direction::Down);
    assert_eq!(game.head(), head);
    assert_eq!(game.score(), score);
}
