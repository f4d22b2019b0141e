use std::time::Duration;

use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;
use super::error::SimulationError;
use super::grid::{Grid, PlacementArea};
use super::observer::SimulationObserver;
use super::settings::SimulationSettings;
use super::snake::Snake;
use super::types::{CellType, Direction, GameState, Outcome, Point, RotationSide};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed.
    Ignored,
    Moved,
    Grew { new_length: usize },
    Ended(Outcome),
}

/// Single-player grid snake: owns the board, the snake, the fruit and the
/// extra obstacles, and advances them one cell per `tick`.
///
/// All logical state commits inside `tick`. Callers driving a timer must
/// re-read `move_interval` after every tick since growth shortens it.
pub struct GridSimulation {
    settings: SimulationSettings,
    grid: Grid,
    snake: Snake,
    fruit: Option<Point>,
    extra_obstacles: Vec<Point>,
    state: GameState,
    move_interval: Duration,
    move_animation_duration: Duration,
    rng: SessionRng,
}

impl GridSimulation {
    /// Validates `settings` and lays out a fresh board. The game starts `Idle`.
    pub fn new(settings: SimulationSettings, rng: SessionRng) -> Result<Self, SimulationError> {
        settings.validate().map_err(SimulationError::InvalidConfig)?;

        let mut simulation = Self {
            grid: Grid::new(settings.grid_size),
            snake: Snake::centered(settings.grid_size),
            fruit: None,
            extra_obstacles: Vec::new(),
            state: GameState::Idle,
            move_interval: settings.move_interval,
            move_animation_duration: settings.move_animation_duration,
            settings,
            rng,
        };
        simulation.spawn_board();

        log!(
            "Board {}x{} ready (seed {}), {} extra obstacles",
            simulation.settings.grid_size,
            simulation.settings.grid_size,
            simulation.rng.seed(),
            simulation.extra_obstacles.len()
        );
        Ok(simulation)
    }

    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.state != GameState::Idle {
            return Err(SimulationError::InvalidTransition {
                state: self.state,
                operation: "start",
            });
        }
        self.begin_level();
        Ok(())
    }

    /// Rebuilds the board with a new snake, new extra obstacles and a new
    /// fruit, then runs again at the base speed.
    pub fn restart(&mut self) -> Result<(), SimulationError> {
        if self.state.is_running() {
            return Err(SimulationError::InvalidTransition {
                state: self.state,
                operation: "restart",
            });
        }

        self.fruit = None;
        self.extra_obstacles.clear();
        self.grid.reset();
        self.spawn_board();
        self.begin_level();

        log!("Level restarted with {} extra obstacles", self.extra_obstacles.len());
        Ok(())
    }

    /// Queues a quarter turn relative to the current direction. Returns
    /// whether the resulting direction was queued.
    pub fn request_rotate(&mut self, side: RotationSide) -> bool {
        if self.state.is_ended() {
            return false;
        }
        let direction = self.snake.direction.rotated(side);
        self.snake.queue_direction(direction)
    }

    pub fn tick<O>(&mut self, observer: &mut O) -> TickOutcome
    where
        O: SimulationObserver + ?Sized,
    {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }

        if let Some(direction) = self.snake.take_pending_direction() {
            self.snake.direction = direction;
        }

        let next_head = match self.snake.cell_in_front() {
            Some(point) if !self.grid.get(point).is_blocking() => point,
            blocked => {
                if let Some(point) = blocked {
                    log!("Snake crashed into {:?} at {}", self.grid.get(point), point);
                }
                self.end(Outcome::Lose, observer);
                return TickOutcome::Ended(Outcome::Lose);
            }
        };

        let ate_fruit = self.grid.get(next_head) == CellType::Fruit;
        let tail_direction = self.snake.tail_direction();

        if let Some(vacated) = self.snake.advance(next_head, ate_fruit) {
            self.grid.set(vacated, CellType::Empty);
        }
        self.grid.set(next_head, CellType::SnakeSegment);

        if !ate_fruit {
            return TickOutcome::Moved;
        }

        self.fruit = None;
        observer.on_fruit_eaten(next_head);

        let new_length = self.snake.len();
        observer.on_grown(new_length, tail_direction);
        self.apply_speed_boost();

        if new_length >= self.settings.max_snake_length {
            self.end(Outcome::Win, observer);
            return TickOutcome::Ended(Outcome::Win);
        }

        self.spawn_fruit();
        TickOutcome::Grew { new_length }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    pub fn cell(&self, point: Point) -> CellType {
        self.grid.get(point)
    }

    /// Head first.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.snake.segments()
    }

    pub fn snake_length(&self) -> usize {
        self.snake.len()
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn cell_in_front_of_head(&self) -> Option<Point> {
        self.snake.cell_in_front()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn pending_directions(&self) -> impl ExactSizeIterator<Item = Direction> + '_ {
        self.snake.pending_directions()
    }

    pub fn fruit(&self) -> Option<Point> {
        self.fruit
    }

    pub fn extra_obstacles(&self) -> &[Point] {
        &self.extra_obstacles
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn move_interval(&self) -> Duration {
        self.move_interval
    }

    pub fn move_animation_duration(&self) -> Duration {
        self.move_animation_duration
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    fn begin_level(&mut self) {
        self.state = GameState::Running;
        self.snake.direction = Direction::Up;
        self.move_interval = self.settings.move_interval;
        self.move_animation_duration = self.settings.move_animation_duration;
    }

    fn end<O>(&mut self, outcome: Outcome, observer: &mut O)
    where
        O: SimulationObserver + ?Sized,
    {
        self.state = GameState::Ended(outcome);
        log!("Game ended: {} at length {}", outcome, self.snake.len());
        observer.on_game_ended(outcome);
    }

    fn apply_speed_boost(&mut self) {
        let multiplier = self.settings.fruit_speed_boost_multiplier;
        self.move_interval = self.move_interval.mul_f32(multiplier);
        self.move_animation_duration = self.move_animation_duration.mul_f32(multiplier);
    }

    fn spawn_board(&mut self) {
        self.spawn_snake();
        self.spawn_extra_obstacles();
        self.spawn_fruit();
    }

    fn spawn_snake(&mut self) {
        self.snake = Snake::centered(self.settings.grid_size);
        for segment in self.snake.segments() {
            self.grid.set(segment, CellType::SnakeSegment);
        }
    }

    fn spawn_extra_obstacles(&mut self) {
        let forbidden = self.snake.cell_in_front();
        let count = self
            .rng
            .random_range(self.settings.extra_obstacles_min..=self.settings.extra_obstacles_max);

        for _ in 0..count {
            match self
                .grid
                .find_placement(PlacementArea::FullBoard, forbidden, &mut self.rng)
            {
                Some(point) => {
                    self.grid.set(point, CellType::Obstacle);
                    self.extra_obstacles.push(point);
                }
                None => {
                    log!("No room left for extra obstacles after {}", self.extra_obstacles.len());
                    break;
                }
            }
        }
    }

    fn spawn_fruit(&mut self) {
        let forbidden = self.snake.cell_in_front();
        let placement = self
            .grid
            .find_placement(PlacementArea::Interior, forbidden, &mut self.rng);

        match placement {
            Some(point) => {
                self.grid.set(point, CellType::Fruit);
                self.fruit = Some(point);
                log!("Fruit spawned at {}", point);
            }
            None => {
                self.fruit = None;
                log!("No empty cell left for fruit away from the head, board has no fruit");
            }
        }
    }

    #[cfg(test)]
    fn place_fruit(&mut self, point: Point) {
        if let Some(old) = self.fruit.take() {
            self.grid.set(old, CellType::Empty);
        }
        self.grid.set(point, CellType::Fruit);
        self.fruit = Some(point);
    }

    #[cfg(test)]
    fn place_obstacle(&mut self, point: Point) {
        self.grid.set(point, CellType::Obstacle);
        self.extra_obstacles.push(point);
    }

    #[cfg(test)]
    fn replace_snake(&mut self, body: Vec<Point>, direction: Direction) {
        for segment in self.snake.segments().collect::<Vec<_>>() {
            self.grid.set(segment, CellType::Empty);
        }
        self.snake = Snake::from_body(body, direction);
        for segment in self.snake.segments().collect::<Vec<_>>() {
            if self.fruit == Some(segment) {
                self.fruit = None;
            }
            self.grid.set(segment, CellType::SnakeSegment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::SimulationEvent;

    fn settings() -> SimulationSettings {
        SimulationSettings {
            grid_size: 10,
            move_interval: Duration::from_millis(400),
            move_animation_duration: Duration::from_millis(200),
            max_snake_length: 5,
            fruit_speed_boost_multiplier: 0.95,
            extra_obstacles_min: 0,
            extra_obstacles_max: 0,
        }
    }

    fn running(settings: SimulationSettings, seed: u64) -> GridSimulation {
        let mut simulation = GridSimulation::new(settings, SessionRng::new(seed)).unwrap();
        simulation.start().unwrap();
        simulation
    }

    fn assert_consistent(simulation: &GridSimulation) {
        let grid = simulation.grid();
        let segments: Vec<Point> = simulation.segments().collect();

        for point in grid.points() {
            let cell = grid.get(point);
            if grid.is_border(point) {
                assert_eq!(cell, CellType::Obstacle, "border {}", point);
            }
            assert_eq!(
                cell == CellType::SnakeSegment,
                segments.contains(&point),
                "segment mismatch at {}",
                point
            );
            assert_eq!(
                cell == CellType::Fruit,
                simulation.fruit() == Some(point),
                "fruit mismatch at {}",
                point
            );
        }

        let mut unique = segments.clone();
        unique.sort_by_key(|p| (p.x, p.z));
        unique.dedup();
        assert_eq!(unique.len(), segments.len(), "segments overlap");

        for obstacle in simulation.extra_obstacles() {
            assert_eq!(grid.get(*obstacle), CellType::Obstacle);
        }

        if simulation.state().is_running() {
            assert_ne!(simulation.fruit(), simulation.cell_in_front_of_head());
        }
    }

    #[test]
    fn test_new_lays_out_idle_board() {
        let simulation = GridSimulation::new(
            SimulationSettings {
                extra_obstacles_min: 2,
                extra_obstacles_max: 6,
                ..settings()
            },
            SessionRng::new(42),
        )
        .unwrap();

        assert_eq!(simulation.state(), GameState::Idle);
        assert_eq!(
            simulation.segments().collect::<Vec<_>>(),
            vec![Point::new(5, 5), Point::new(5, 4)]
        );
        assert_eq!(simulation.direction(), Direction::Up);

        let in_front = Point::new(5, 6);
        let fruit = simulation.fruit().unwrap();
        assert_ne!(fruit, in_front);
        assert!(!simulation.grid().is_border(fruit));

        let obstacles = simulation.extra_obstacles();
        assert!((2..=6).contains(&obstacles.len()));
        assert!(!obstacles.contains(&in_front));
        assert_consistent(&simulation);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = GridSimulation::new(
            SimulationSettings { grid_size: 3, ..settings() },
            SessionRng::new(1),
        );
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_same_seed_builds_same_board() {
        let s = SimulationSettings {
            extra_obstacles_min: 3,
            extra_obstacles_max: 8,
            ..settings()
        };
        let a = GridSimulation::new(s.clone(), SessionRng::new(99)).unwrap();
        let b = GridSimulation::new(s, SessionRng::new(99)).unwrap();
        assert_eq!(a.fruit(), b.fruit());
        assert_eq!(a.extra_obstacles(), b.extra_obstacles());
    }

    #[test]
    fn test_tick_while_idle_is_ignored() {
        let mut simulation = GridSimulation::new(settings(), SessionRng::new(42)).unwrap();
        assert_eq!(simulation.tick(&mut ()), TickOutcome::Ignored);
        assert_eq!(simulation.head(), Point::new(5, 5));
    }

    #[test]
    fn test_tick_moves_one_cell_and_frees_tail() {
        let mut simulation = running(settings(), 42);

        assert_eq!(simulation.tick(&mut ()), TickOutcome::Moved);

        assert_eq!(
            simulation.segments().collect::<Vec<_>>(),
            vec![Point::new(5, 6), Point::new(5, 5)]
        );
        assert_eq!(simulation.cell(Point::new(5, 4)), CellType::Empty);
        assert_eq!(simulation.cell(Point::new(5, 5)), CellType::SnakeSegment);
        assert_eq!(simulation.cell(Point::new(5, 6)), CellType::SnakeSegment);
        assert_consistent(&simulation);
    }

    #[test]
    fn test_rotate_right_is_not_queued_twice() {
        let mut simulation = running(settings(), 42);

        assert!(simulation.request_rotate(RotationSide::Right));
        assert!(!simulation.request_rotate(RotationSide::Right));
        assert_eq!(
            simulation.pending_directions().collect::<Vec<_>>(),
            vec![Direction::Right]
        );
    }

    #[test]
    fn test_rotations_are_relative_to_current_direction() {
        let mut simulation = running(settings(), 42);

        assert!(simulation.request_rotate(RotationSide::Right));
        assert!(simulation.request_rotate(RotationSide::Left));
        assert!(!simulation.request_rotate(RotationSide::Right));
        assert_eq!(
            simulation.pending_directions().collect::<Vec<_>>(),
            vec![Direction::Right, Direction::Left]
        );
    }

    #[test]
    fn test_pending_direction_applies_at_next_tick() {
        let mut simulation = running(settings(), 42);
        simulation.place_fruit(Point::new(1, 1));

        simulation.request_rotate(RotationSide::Right);
        assert_eq!(simulation.direction(), Direction::Up);

        simulation.tick(&mut ());
        assert_eq!(simulation.direction(), Direction::Right);
        assert_eq!(simulation.head(), Point::new(6, 5));

        simulation.request_rotate(RotationSide::Right);
        simulation.tick(&mut ());
        assert_eq!(simulation.direction(), Direction::Down);
        assert_eq!(simulation.head(), Point::new(6, 4));
        assert_consistent(&simulation);
    }

    #[test]
    fn test_hitting_obstacle_loses_and_freezes() {
        let mut simulation = running(settings(), 42);
        simulation.place_fruit(Point::new(1, 1));
        simulation.place_obstacle(Point::new(5, 6));

        let mut events = Vec::new();
        assert_eq!(simulation.tick(&mut events), TickOutcome::Ended(Outcome::Lose));
        assert_eq!(events, vec![SimulationEvent::GameEnded { outcome: Outcome::Lose }]);
        assert_eq!(simulation.state(), GameState::Ended(Outcome::Lose));
        assert_eq!(simulation.head(), Point::new(5, 5));

        assert!(!simulation.request_rotate(RotationSide::Left));
        assert_eq!(simulation.tick(&mut events), TickOutcome::Ignored);
        assert_eq!(events.len(), 1);
        assert_eq!(
            simulation.segments().collect::<Vec<_>>(),
            vec![Point::new(5, 5), Point::new(5, 4)]
        );
        assert_consistent(&simulation);
    }

    #[test]
    fn test_running_into_border_loses() {
        let mut simulation = running(settings(), 42);
        simulation.place_fruit(Point::new(1, 1));

        let mut outcome = TickOutcome::Moved;
        for _ in 0..10 {
            outcome = simulation.tick(&mut ());
            if outcome != TickOutcome::Moved {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Ended(Outcome::Lose));
        assert_eq!(simulation.head(), Point::new(5, 8));
    }

    #[test]
    fn test_moving_into_own_tail_loses() {
        let mut simulation = running(settings(), 42);
        simulation.place_fruit(Point::new(1, 1));
        simulation.replace_snake(
            vec![Point::new(5, 5), Point::new(5, 4), Point::new(4, 4), Point::new(4, 5)],
            Direction::Left,
        );
        assert_consistent(&simulation);

        assert_eq!(simulation.tick(&mut ()), TickOutcome::Ended(Outcome::Lose));
    }

    #[test]
    fn test_eating_fruit_grows_and_speeds_up() {
        let mut simulation = running(settings(), 42);
        simulation.place_fruit(Point::new(5, 6));

        let mut events = Vec::new();
        assert_eq!(simulation.tick(&mut events), TickOutcome::Grew { new_length: 3 });
        assert_eq!(
            events,
            vec![
                SimulationEvent::FruitEaten { position: Point::new(5, 6) },
                SimulationEvent::Grown { new_length: 3, tail_direction: Some(Direction::Down) },
            ]
        );
        assert_eq!(
            simulation.segments().collect::<Vec<_>>(),
            vec![Point::new(5, 6), Point::new(5, 5), Point::new(5, 4)]
        );

        let fruit = simulation.fruit().unwrap();
        assert_ne!(fruit, Point::new(5, 7));
        assert_eq!(simulation.cell(fruit), CellType::Fruit);

        assert_eq!(simulation.move_interval(), Duration::from_millis(400).mul_f32(0.95));
        assert_eq!(
            simulation.move_animation_duration(),
            Duration::from_millis(200).mul_f32(0.95)
        );
        assert_consistent(&simulation);
    }

    #[test]
    fn test_fruit_never_spawns_in_front_of_head() {
        let s = SimulationSettings {
            grid_size: 5,
            max_snake_length: 9,
            ..settings()
        };
        let mut simulation = running(s, 7);
        // Fills the 3x3 interior except (1, 2) and (1, 3).
        simulation.replace_snake(
            vec![
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(3, 2),
                Point::new(2, 2),
                Point::new(2, 3),
                Point::new(3, 3),
            ],
            Direction::Up,
        );
        simulation.place_fruit(Point::new(1, 2));

        assert_eq!(simulation.tick(&mut ()), TickOutcome::Grew { new_length: 8 });
        assert_eq!(simulation.head(), Point::new(1, 2));
        assert_eq!(simulation.cell_in_front_of_head(), Some(Point::new(1, 3)));
        assert_eq!(simulation.fruit(), None);
        assert_eq!(simulation.cell(Point::new(1, 3)), CellType::Empty);
        assert_eq!(simulation.state(), GameState::Running);
        assert_consistent(&simulation);

        // Snake keeps going into the free cell and the game stays playable.
        assert_eq!(simulation.tick(&mut ()), TickOutcome::Moved);
        assert_ne!(simulation.fruit(), simulation.cell_in_front_of_head());
        assert_consistent(&simulation);
    }

    #[test]
    fn test_replacing_snake_over_fruit_drops_it() {
        let mut simulation = running(settings(), 42);
        simulation.place_fruit(Point::new(3, 3));
        simulation.replace_snake(vec![Point::new(3, 4), Point::new(3, 3)], Direction::Up);

        assert_eq!(simulation.fruit(), None);
        assert_eq!(simulation.cell(Point::new(3, 3)), CellType::SnakeSegment);

        simulation.place_fruit(Point::new(6, 6));
        assert_eq!(simulation.cell(Point::new(3, 3)), CellType::SnakeSegment);
        assert_consistent(&simulation);
    }

    #[test]
    fn test_reaching_max_length_wins_without_new_fruit() {
        let mut simulation = running(SimulationSettings { max_snake_length: 3, ..settings() }, 42);
        simulation.place_fruit(Point::new(5, 6));

        let mut events = Vec::new();
        assert_eq!(simulation.tick(&mut events), TickOutcome::Ended(Outcome::Win));
        assert_eq!(simulation.snake_length(), 3);
        assert_eq!(simulation.state(), GameState::Ended(Outcome::Win));
        assert_eq!(simulation.fruit(), None);
        assert_eq!(simulation.grid().count(CellType::Fruit), 0);
        assert_eq!(events.last(), Some(&SimulationEvent::GameEnded { outcome: Outcome::Win }));
        assert_eq!(events.len(), 3);
        assert_consistent(&simulation);
    }

    #[test]
    fn test_restart_rebuilds_board_at_base_speed() {
        let mut simulation = running(
            SimulationSettings {
                max_snake_length: 3,
                extra_obstacles_min: 1,
                extra_obstacles_max: 4,
                ..settings()
            },
            7,
        );
        simulation.place_fruit(Point::new(5, 6));
        simulation.tick(&mut ());
        assert!(simulation.state().is_ended());

        simulation.restart().unwrap();

        assert_eq!(simulation.state(), GameState::Running);
        assert_eq!(
            simulation.segments().collect::<Vec<_>>(),
            vec![Point::new(5, 5), Point::new(5, 4)]
        );
        assert_eq!(simulation.direction(), Direction::Up);
        assert_eq!(simulation.pending_directions().len(), 0);
        assert_eq!(simulation.move_interval(), Duration::from_millis(400));
        assert!(simulation.fruit().is_some());
        assert!((1..=4).contains(&simulation.extra_obstacles().len()));
        assert_eq!(
            simulation.grid().count(CellType::Obstacle),
            36 + simulation.extra_obstacles().len()
        );
        assert_consistent(&simulation);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let mut simulation = running(settings(), 42);
        assert!(matches!(
            simulation.start(),
            Err(SimulationError::InvalidTransition { operation: "start", .. })
        ));
        assert!(matches!(
            simulation.restart(),
            Err(SimulationError::InvalidTransition { operation: "restart", .. })
        ));

        let mut idle = GridSimulation::new(settings(), SessionRng::new(1)).unwrap();
        assert!(idle.restart().is_ok());
        assert_eq!(idle.state(), GameState::Running);
    }

    #[test]
    fn test_random_play_keeps_board_consistent() {
        let s = SimulationSettings {
            grid_size: 8,
            max_snake_length: 12,
            extra_obstacles_min: 0,
            extra_obstacles_max: 3,
            ..settings()
        };

        for seed in 0..20 {
            let mut simulation = running(s.clone(), seed);
            let mut input = SessionRng::new(seed + 1000);

            for _ in 0..300 {
                match input.random_range(0..4u8) {
                    0 => {
                        simulation.request_rotate(RotationSide::Left);
                    }
                    1 => {
                        simulation.request_rotate(RotationSide::Right);
                    }
                    _ => {}
                }

                let head = simulation.head();
                let length = simulation.snake_length();
                match simulation.tick(&mut ()) {
                    TickOutcome::Moved => {
                        assert_eq!(head.manhattan_distance(simulation.head()), 1);
                        assert_eq!(simulation.snake_length(), length);
                    }
                    TickOutcome::Grew { new_length } => {
                        assert_eq!(head.manhattan_distance(simulation.head()), 1);
                        assert_eq!(new_length, length + 1);
                    }
                    TickOutcome::Ended(_) => {
                        assert_consistent(&simulation);
                        simulation.restart().unwrap();
                    }
                    TickOutcome::Ignored => panic!("running game ignored a tick"),
                }
                assert_consistent(&simulation);
            }
        }
    }
}
