mod config;
pub use config::*;

mod track;
pub use track::*;

mod traits;
pub use traits::*;

mod queue;
pub use queue::*;

mod local_index;
pub use local_index::*;

mod resolver;
pub use resolver::*;

mod orchestrator;
pub use orchestrator::*;

#[cfg(test)]
mod mocks;
