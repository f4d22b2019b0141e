use crate::games::SessionRng;
use super::simulation::GridSimulation;
use super::types::{Direction, Point, RotationSide};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotType {
    /// Greedy: the safe move that gets closest to the fruit.
    Efficient,
    Random,
}

pub struct BotController;

impl BotController {
    /// `None` means keep going straight.
    pub fn calculate_rotation(
        bot_type: BotType,
        simulation: &GridSimulation,
        rng: &mut SessionRng,
    ) -> Option<RotationSide> {
        if !simulation.state().is_running() {
            return None;
        }

        match bot_type {
            BotType::Efficient => Self::efficient_move(simulation, rng),
            BotType::Random => Self::random_safe_move(simulation, rng),
        }
    }

    fn efficient_move(simulation: &GridSimulation, rng: &mut SessionRng) -> Option<RotationSide> {
        let Some(fruit) = simulation.fruit() else {
            return Self::random_safe_move(simulation, rng);
        };

        Self::safe_moves(simulation)
            .into_iter()
            .min_by_key(|(_, next)| next.manhattan_distance(fruit))
            .and_then(|(rotation, _)| rotation)
    }

    fn random_safe_move(simulation: &GridSimulation, rng: &mut SessionRng) -> Option<RotationSide> {
        let safe_moves = Self::safe_moves(simulation);
        rng.choose(&safe_moves).and_then(|(rotation, _)| *rotation)
    }

    fn safe_moves(simulation: &GridSimulation) -> Vec<(Option<RotationSide>, Point)> {
        let current = simulation.direction();
        let head = simulation.head();

        [None, Some(RotationSide::Left), Some(RotationSide::Right)]
            .into_iter()
            .filter_map(|rotation| {
                let direction = Self::direction_after(current, rotation);
                let next = head.offset(direction)?;
                if simulation.cell(next).is_blocking() {
                    None
                } else {
                    Some((rotation, next))
                }
            })
            .collect()
    }

    fn direction_after(current: Direction, rotation: Option<RotationSide>) -> Direction {
        match rotation {
            Some(side) => current.rotated(side),
            None => current,
        }
    }
}
