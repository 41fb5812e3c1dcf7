use console_snake::config::{GridSize, MIN_SPEED_MS};
use console_snake::game::{GameState, GameStatus, Outcome, StepResult};
use console_snake::grid::{Cell, Position};
use console_snake::input::{Direction, GameInput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn remove_food(state: &mut GameState) {
    if let Some(food) = state.food.take() {
        state.grid.set(food, Cell::Empty);
    }
}

fn place_food(state: &mut GameState, position: Position) {
    remove_food(state);
    state.grid.set(position, Cell::Food);
    state.food = Some(position);
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GameState::new_with_seed(
        GridSize {
            width: 6,
            height: 4,
        },
        42,
    );
    // Grid is 8x6; the snake starts with its head at (4, 3).
    place_food(&mut state, Position::new(5, 3));

    assert_eq!(state.step(), Some(StepResult::Ate));
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 4);
    assert_eq!(state.snake.head(), Position::new(5, 3));
    remove_food(&mut state);

    state.apply_input(GameInput::Direction(Direction::Up));
    assert_eq!(state.step(), Some(StepResult::Continue));
    assert_eq!(state.snake.head(), Position::new(5, 2));

    assert_eq!(state.step(), Some(StepResult::Continue));
    assert_eq!(state.snake.head(), Position::new(5, 1));

    assert_eq!(state.step(), Some(StepResult::Collided));
    assert_eq!(state.status, GameStatus::Over);
    assert_eq!(
        state.outcome(),
        Some(Outcome::Collided {
            at: Position::new(5, 0),
            cell: Cell::Wall,
        })
    );
}

#[test]
fn turning_back_on_itself_in_two_ticks_hits_the_body() {
    let mut state = GameState::new_with_seed(
        GridSize {
            width: 20,
            height: 20,
        },
        9,
    );
    remove_food(&mut state);
    // Grow to five cells so a tight U-turn lands on the body, not the tail.
    place_food(&mut state, Position::new(12, 11));
    assert_eq!(state.step(), Some(StepResult::Ate));
    place_food(&mut state, Position::new(13, 11));
    assert_eq!(state.step(), Some(StepResult::Ate));
    remove_food(&mut state);

    state.apply_input(GameInput::Direction(Direction::Down));
    assert_eq!(state.step(), Some(StepResult::Continue));
    state.apply_input(GameInput::Direction(Direction::Left));
    assert_eq!(state.step(), Some(StepResult::Continue));
    state.apply_input(GameInput::Direction(Direction::Up));

    assert_eq!(state.step(), Some(StepResult::Collided));
    assert!(matches!(
        state.outcome(),
        Some(Outcome::Collided {
            cell: Cell::SnakeBody(_),
            ..
        })
    ));
}

#[test]
fn random_play_keeps_every_invariant() {
    for seed in 0..40 {
        let mut state = GameState::new_with_seed(
            GridSize {
                width: 8,
                height: 8,
            },
            seed,
        );
        let mut inputs = StdRng::seed_from_u64(seed ^ 0x5eed);

        for _ in 0..2_000 {
            let before_len = state.snake.len();
            let before_score = state.score;
            let before_speed = state.speed_ms;
            let before_tail = state.snake.tail();
            let live = state.snake.direction();

            let wanted = DIRECTIONS[inputs.gen_range(0..DIRECTIONS.len())];
            state.apply_input(GameInput::Direction(wanted));
            assert_ne!(state.snake.pending_direction(), live.opposite());

            match state.step() {
                Some(StepResult::Continue) => {
                    assert_eq!(state.snake.len(), before_len);
                    assert_eq!(state.score, before_score);
                    assert_eq!(state.speed_ms, before_speed);
                    assert_ne!(state.snake.tail(), before_tail);
                    assert!(state.path_is_intact(), "seed {seed}");
                }
                Some(StepResult::Ate) => {
                    assert_eq!(state.snake.len(), before_len + 1);
                    assert_eq!(state.score, before_score + 10);
                    assert_eq!(state.snake.tail(), before_tail);
                    let expected_speed = if state.score % 50 == 0 && before_speed > MIN_SPEED_MS {
                        before_speed - 10
                    } else {
                        before_speed
                    };
                    assert_eq!(state.speed_ms, expected_speed);
                    assert!(state.path_is_intact(), "seed {seed}");
                }
                Some(StepResult::Collided) | None => {
                    assert!(state.is_over());
                    break;
                }
            }
        }
    }
}

#[test]
fn filling_the_board_ends_the_session_as_a_win() {
    // A 4x2 play area: snake seeded on row 2 from (1,2) to (3,2).
    let mut state = GameState::new_with_seed(
        GridSize {
            width: 4,
            height: 2,
        },
        3,
    );

    // Serpentine through every free cell: right, up, then left along row 1.
    let route = [
        (Direction::Right, Position::new(4, 2)),
        (Direction::Up, Position::new(4, 1)),
        (Direction::Left, Position::new(3, 1)),
        (Direction::Left, Position::new(2, 1)),
        (Direction::Left, Position::new(1, 1)),
    ];

    for (direction, target) in route {
        assert!(!state.is_over());
        place_food(&mut state, target);
        state.apply_input(GameInput::Direction(direction));
        assert_eq!(state.step(), Some(StepResult::Ate));
    }

    assert_eq!(state.snake.len(), 8);
    assert_eq!(state.grid.count(|cell| cell == Cell::Empty), 0);
    assert_eq!(state.status, GameStatus::Over);
    assert_eq!(state.outcome(), Some(Outcome::BoardFull));
    assert!(state.path_is_intact());
}
