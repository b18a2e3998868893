pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{EngineConfig, FogViewers};
pub use error::{Result, SimError};
pub use rng::SimRng;
pub use types::{EntityId, IdAllocator, Tick};
