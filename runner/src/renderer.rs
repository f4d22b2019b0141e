use grid_snake_common::games::snake::{
    CellType, Direction, GridSimulation, Outcome, Point, SimulationObserver,
};
use grid_snake_common::log;

use crate::config::LevelResults;

/// Draws the committed board with the highest `z` row on top.
pub fn render_board(simulation: &GridSimulation) -> String {
    let size = simulation.grid_size();
    let head = simulation.head();
    let mut out = String::with_capacity((size * 2 + 1) * size);

    for z in (0..size).rev() {
        for x in 0..size {
            let point = Point::new(x, z);
            let symbol = if point == head {
                head_symbol(simulation.direction())
            } else {
                match simulation.cell(point) {
                    CellType::Empty => '.',
                    CellType::SnakeSegment => 'o',
                    CellType::Fruit => '*',
                    CellType::Obstacle => '#',
                }
            };
            out.push(symbol);
            if x + 1 < size {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Logs simulation events and remembers how the level ended.
pub struct ConsoleObserver<'a> {
    level_results: &'a LevelResults,
    pub fruits_eaten: u32,
    pub outcome: Option<Outcome>,
}

impl<'a> ConsoleObserver<'a> {
    pub fn new(level_results: &'a LevelResults) -> Self {
        Self {
            level_results,
            fruits_eaten: 0,
            outcome: None,
        }
    }
}

impl SimulationObserver for ConsoleObserver<'_> {
    fn on_fruit_eaten(&mut self, position: Point) {
        self.fruits_eaten += 1;
        log!("Fruit eaten at {}", position);
    }

    fn on_grown(&mut self, new_length: usize, _tail_direction: Option<Direction>) {
        log!("Snake grew to {}", new_length);
    }

    fn on_game_ended(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        log!("{}", self.level_results.text_for(outcome));
    }
}
