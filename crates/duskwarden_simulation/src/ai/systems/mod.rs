//! AI systems (enemy decision logic)

pub mod attack;
pub mod fsm;
pub mod movement;
pub mod phase;

// Re-export all systems
pub use attack::*;
pub use fsm::*;
pub use movement::*;
pub use phase::*;
