//! Agent loop primitives: routing, turn execution, progress events.

pub mod events;
pub mod router;
pub mod runner;

pub use events::*;
pub use router::*;
pub use runner::*;
