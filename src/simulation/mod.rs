//! Simulation state and the tick orchestrator

pub mod events;
pub mod movement;
pub mod outcome;
pub mod setup;
pub mod side_effects;
pub mod state;
pub mod tick;

pub use events::{EventLog, SimEvent, SimEventType};
pub use outcome::evaluate_outcome;
pub use setup::{launch, LaunchOptions};
pub use state::{SimulationState, TickReport};
pub use tick::{run, step};
