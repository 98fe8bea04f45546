//! Evolutionary route search: random walks bred, mutated and regenerated
//! while random events reweight the graph.

mod candidate;
mod config;
mod offspring;
mod population;
mod runner;

pub use candidate::Candidate;
pub use config::GeneticConfig;
pub use offspring::Offspring;
pub use population::Population;
pub use runner::{Evolution, GeneticResult, GeneticSearch, RandomEvent};
