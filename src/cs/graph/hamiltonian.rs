//! # Hamiltonian Path Search
//!
//! Backtracking search for a **Hamiltonian path**: a simple path that visits every vertex of a
//! graph exactly once. The graph is an insertion-ordered adjacency mapping ([`Graph`]) that can
//! be read either as **directed** (only declared `u -> v` entries are edges) or **undirected**
//! (an entry `u -> v` also lets the path go from `v` to `u`, since an undirected edge is often
//! recorded on one side only).
//!
//! ## Search order
//! For each start vertex in key order, a depth-first search extends the current path from its
//! last vertex `last`, trying candidates in this order:
//! 1. the declared neighbors of `last`, in list order;
//! 2. when undirected, every key whose own neighbor list contains `last`, in key order.
//!
//! Vertices already on the path are skipped. The first complete path found is returned, so the
//! result is fully determined by the declaration order of the graph.
//!
//! Worst case is exponential in the number of vertices. This is meant for small graphs.
//!
//! ## Example
//! ```rust
//! use hampath::graph::{find_hamiltonian_path, Graph};
//!
//! // A square 0-1-3-2-0, each edge written from both sides.
//! let g: Graph<u32> = [
//!     (0, vec![1, 2]),
//!     (1, vec![0, 3]),
//!     (2, vec![0, 3]),
//!     (3, vec![1, 2]),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(find_hamiltonian_path(&g, false), Some(vec![0, 1, 3, 2]));
//!
//! // Directed: vertex 3 is never reached.
//! let g: Graph<u32> = [(0, vec![1]), (1, vec![2]), (2, vec![0]), (3, vec![])]
//!     .into_iter()
//!     .collect();
//! assert_eq!(find_hamiltonian_path(&g, true), None);
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use bitvec::prelude::*;
use log::{debug, trace};

use crate::graph::Graph;

/// How the depth-first search keeps its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Call-stack recursion, one frame per path vertex.
    #[default]
    Recursive,
    /// Heap-allocated stack of candidate cursors. Same results, no recursion depth limit.
    Iterative,
}

/// Configuration for [`PathFinder::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchConfig {
    /// Only declared `u -> v` entries are edges when `true`.
    pub directed: bool,
    pub strategy: SearchStrategy,
}

impl SearchConfig {
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    pub fn undirected() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Hamiltonian path search over a borrowed [`Graph`].
///
/// Construction translates the graph into vertex positions once: forward lists with dangling
/// neighbors removed, and a reverse index used for undirected reads. Each call to
/// [`find`](Self::find) allocates its own path and visited set.
#[derive(Debug)]
pub struct PathFinder<'a, V>
where
    V: Eq + Hash + Clone,
{
    graph: &'a Graph<V>,
    /// `forward[u]`: positions of the declared neighbors of `u` that are keys, in list order.
    forward: Vec<Vec<usize>>,
    /// `reverse[u]`: positions of the keys whose neighbor list contains `u`, in key order, once each.
    reverse: Vec<Vec<usize>>,
}

impl<'a, V> PathFinder<'a, V>
where
    V: Eq + Hash + Clone,
{
    pub fn new(graph: &'a Graph<V>) -> Self {
        let n = graph.len();
        let mut forward = Vec::with_capacity(n);
        let mut reverse = vec![Vec::new(); n];

        for (u, (_, neighbors)) in graph.iter().enumerate() {
            let targets: Vec<usize> = neighbors
                .iter()
                .filter_map(|v| graph.index_of(v))
                .collect();
            for &v in &targets {
                // Keys are visited in order, so a repeated entry can only follow itself.
                if reverse[v].last() != Some(&u) {
                    reverse[v].push(u);
                }
            }
            forward.push(targets);
        }

        Self {
            graph,
            forward,
            reverse,
        }
    }

    /// Runs the search and returns the first Hamiltonian path found, or `None` if there is none.
    ///
    /// An empty graph has no path; a single vertex is a path by itself.
    pub fn find(&self, config: &SearchConfig) -> Option<Vec<V>> {
        let n = self.graph.len();
        if n == 0 {
            debug!("empty graph, no Hamiltonian path");
            return None;
        }

        let mut path = Vec::with_capacity(n);
        let mut visited = bitvec![0; n];

        for start in 0..n {
            debug!("searching from start vertex #{start} of {n}");
            path.push(start);
            visited.set(start, true);

            let found = match config.strategy {
                SearchStrategy::Recursive => {
                    self.backtrack(&mut path, &mut visited, config.directed)
                }
                SearchStrategy::Iterative => {
                    self.backtrack_iterative(&mut path, &mut visited, config.directed)
                }
            };
            if found {
                debug!("found Hamiltonian path starting at vertex #{start}");
                return path
                    .iter()
                    .map(|&i| self.graph.vertex(i).cloned())
                    .collect();
            }

            path.pop();
            visited.set(start, false);
        }

        debug!("search exhausted, no Hamiltonian path");
        None
    }

    /// The `k`-th extension candidate of `last`: forward entries first, then reverse entries if
    /// the graph is read as undirected.
    fn candidate(&self, last: usize, k: usize, directed: bool) -> Option<usize> {
        let forward = &self.forward[last];
        if k < forward.len() {
            Some(forward[k])
        } else if directed {
            None
        } else {
            self.reverse[last].get(k - forward.len()).copied()
        }
    }

    fn backtrack(&self, path: &mut Vec<usize>, visited: &mut BitSlice, directed: bool) -> bool {
        if path.len() == self.forward.len() {
            return true;
        }
        let Some(&last) = path.last() else {
            return false;
        };

        let reverse: &[usize] = if directed { &[] } else { &self.reverse[last] };
        for &next in self.forward[last].iter().chain(reverse) {
            if visited[next] {
                continue;
            }
            trace!("push #{next} at depth {}", path.len());
            visited.set(next, true);
            path.push(next);

            if self.backtrack(path, visited, directed) {
                return true;
            }

            path.pop();
            visited.set(next, false);
            trace!("pop #{next}");
        }
        false
    }

    /// Same traversal as [`backtrack`](Self::backtrack) with `cursors[d]` holding how many
    /// candidates of `path[d]` have been tried. Leaves `path` at its start vertex on failure.
    fn backtrack_iterative(
        &self,
        path: &mut Vec<usize>,
        visited: &mut BitSlice,
        directed: bool,
    ) -> bool {
        let n = self.forward.len();
        let mut cursors = vec![0usize; path.len()];

        while let Some(&last) = path.last() {
            if path.len() == n {
                return true;
            }
            let depth = path.len() - 1;

            let mut next = None;
            while let Some(c) = self.candidate(last, cursors[depth], directed) {
                cursors[depth] += 1;
                if !visited[c] {
                    next = Some(c);
                    break;
                }
            }

            match next {
                Some(c) => {
                    trace!("push #{c} at depth {}", path.len());
                    visited.set(c, true);
                    path.push(c);
                    cursors.push(0);
                }
                None if path.len() == 1 => return false,
                None => {
                    cursors.pop();
                    if let Some(v) = path.pop() {
                        visited.set(v, false);
                        trace!("pop #{v}");
                    }
                }
            }
        }
        false
    }
}

/// Finds a Hamiltonian path in `graph`, reading it as directed or undirected.
///
/// Returns the first path found in key order (see the module docs), or `None` when the graph is
/// empty or no path exists. Uses the recursive strategy; see [`PathFinder`] for the iterative one.
///
/// # Examples
/// ```
/// use hampath::find_hamiltonian_path;
/// use hampath::Graph;
///
/// let g: Graph<u32> = [(0, vec![1]), (1, vec![2]), (2, vec![3]), (3, vec![])]
///     .into_iter()
///     .collect();
/// assert_eq!(find_hamiltonian_path(&g, true), Some(vec![0, 1, 2, 3]));
///
/// let single: Graph<u32> = [(0, vec![])].into_iter().collect();
/// assert_eq!(find_hamiltonian_path(&single, false), Some(vec![0]));
/// ```
pub fn find_hamiltonian_path<V>(graph: &Graph<V>, directed: bool) -> Option<Vec<V>>
where
    V: Eq + Hash + Clone,
{
    let config = SearchConfig {
        directed,
        ..SearchConfig::default()
    };
    PathFinder::new(graph).find(&config)
}

/// Checks that `path` is a Hamiltonian path of `graph`: it lists every key exactly once, and each
/// consecutive pair is joined by a declared entry (forward only when `directed`, either way
/// otherwise). An empty path is never valid.
pub fn is_hamiltonian_path<V>(graph: &Graph<V>, path: &[V], directed: bool) -> bool
where
    V: Eq + Hash + Clone,
{
    if path.is_empty() || path.len() != graph.len() {
        return false;
    }

    let mut seen = HashSet::with_capacity(path.len());
    for v in path {
        if !graph.contains_vertex(v) || !seen.insert(v) {
            return false;
        }
    }

    path.windows(2).all(|pair| {
        let (u, v) = (&pair[0], &pair[1]);
        graph.has_edge(u, v) || (!directed && graph.has_edge(v, u))
    })
}
