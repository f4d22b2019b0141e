use super::types::GameState;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    InvalidConfig(String),
    InvalidTransition {
        state: GameState,
        operation: &'static str,
    },
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
            SimulationError::InvalidTransition { state, operation } => {
                write!(f, "Cannot {} while the game is {}", operation, state)
            }
        }
    }
}

impl std::error::Error for SimulationError {}
