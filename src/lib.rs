mod macros;

pub mod constants;
pub mod error;
pub mod organism;
pub mod population;
pub mod random;
pub mod rules;
pub mod serde_traits;
pub mod simulation;

pub use error::{Error, Result};
pub use organism::{Organism, Variant};
pub use population::{Census, Event, Population};
pub use rules::Rules;
pub use simulation::{Hook, Simulation, Summary, Target, TickStats};
