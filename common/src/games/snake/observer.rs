use super::types::{Direction, Outcome, Point};

/// Receives simulation events synchronously from inside `GridSimulation::tick`.
/// Each callback fires at most once per tick.
pub trait SimulationObserver {
    fn on_fruit_eaten(&mut self, _position: Point) {}

    /// `tail_direction` is the direction the tail was extending in,
    /// which a renderer can use to orient the new tail segment.
    fn on_grown(&mut self, _new_length: usize, _tail_direction: Option<Direction>) {}

    fn on_game_ended(&mut self, _outcome: Outcome) {}
}

impl SimulationObserver for () {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationEvent {
    FruitEaten { position: Point },
    Grown { new_length: usize, tail_direction: Option<Direction> },
    GameEnded { outcome: Outcome },
}

impl SimulationObserver for Vec<SimulationEvent> {
    fn on_fruit_eaten(&mut self, position: Point) {
        self.push(SimulationEvent::FruitEaten { position });
    }

    fn on_grown(&mut self, new_length: usize, tail_direction: Option<Direction>) {
        self.push(SimulationEvent::Grown { new_length, tail_direction });
    }

    fn on_game_ended(&mut self, outcome: Outcome) {
        self.push(SimulationEvent::GameEnded { outcome });
    }
}
