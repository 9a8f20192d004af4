use serpent::config::{BoundaryPolicy, GridSize};
use serpent::engine::{GameOverReason, GameState, GameStatus, TickResult};
use serpent::input::Direction;
use serpent::snake::{Position, Snake};
use serpent::spawner::Food;

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GameState::new_with_seed(
        GridSize {
            width: 8,
            height: 6,
        },
        BoundaryPolicy::Blocking,
        false,
        42,
    );

    state.snake = Snake::new(Position { x: 2, y: 2 }, Direction::Right);
    state.food = Food::new(Position { x: 3, y: 2 });

    let first = state.tick(None);
    assert_eq!(first, TickResult::Continue);
    assert_eq!(state.score, 1);
    assert_eq!(state.snake.len(), 2);
    assert_eq!(state.snake.head(), Position { x: 3, y: 2 });
    assert!(!state.snake.occupies(state.food.position));

    let second = state.tick(Some(Direction::Up));
    assert_eq!(second, TickResult::Continue);
    assert_eq!(state.snake.head(), Position { x: 3, y: 1 });

    let third = state.tick(None);
    assert_eq!(third, TickResult::GameOver(GameOverReason::WallCollision));
    assert_eq!(
        state.status,
        GameStatus::Over(GameOverReason::WallCollision)
    );
}

#[test]
fn wrapping_run_crosses_the_right_edge() {
    let mut state = GameState::new_with_seed(
        GridSize {
            width: 8,
            height: 6,
        },
        BoundaryPolicy::Wrapping,
        false,
        7,
    );

    state.snake = Snake::new(Position { x: 6, y: 3 }, Direction::Right);
    state.food = Food::new(Position { x: 0, y: 0 });

    let expected_heads = [
        Position { x: 7, y: 3 },
        Position { x: 0, y: 3 },
        Position { x: 1, y: 3 },
        Position { x: 2, y: 3 },
    ];

    for expected in expected_heads {
        let result = state.tick(None);
        assert_eq!(result, TickResult::Continue);
        assert_eq!(state.snake.head(), expected);
    }

    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.score, 0);
}
