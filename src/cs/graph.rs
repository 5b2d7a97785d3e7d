pub mod adjacency;
pub mod hamiltonian;
pub mod render;

pub use adjacency::Graph;
pub use hamiltonian::{
    find_hamiltonian_path, is_hamiltonian_path, PathFinder, SearchConfig, SearchStrategy,
};
pub use render::{render_to_file, to_dot, to_svg, write_rendering, RenderConfig, RenderFormat};
