pub mod cs;
pub mod error;

pub use cs::graph;
pub use cs::graph::{find_hamiltonian_path, is_hamiltonian_path, Graph, PathFinder, SearchConfig};
pub use error::{Error, Result};
