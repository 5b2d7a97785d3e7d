//! # Adjacency Mapping
//!
//! A graph stored the way it is usually written down by hand: a mapping from each vertex to the
//! ordered list of its out-neighbors. Unlike a `HashMap`, keys keep the order in which they were
//! declared, so every traversal over the graph is reproducible.
//!
//! - The **vertex set** is exactly the set of keys. A key with an empty neighbor list is still a
//!   vertex.
//! - A neighbor that never appears as a key is kept in its list but is not a vertex.
//! - Re-inserting a key replaces its neighbor list and keeps its original position.
//!
//! ## Example
//! ```rust
//! use hampath::graph::Graph;
//!
//! let mut g: Graph<&str> = Graph::new();
//! g.insert("a", vec!["b", "c"]);
//! g.insert("b", vec![]);
//! g.add_edge("c", "a");
//!
//! assert_eq!(g.vertices().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
//! assert_eq!(g.neighbors(&"a"), Some(&["b", "c"][..]));
//! assert!(g.has_edge(&"c", &"a"));
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Insertion-ordered adjacency mapping from vertex to declared out-neighbors.
#[derive(Debug, Clone)]
pub struct Graph<V>
where
    V: Eq + Hash + Clone,
{
    /// `(key, neighbors)` in declaration order.
    entries: Vec<(V, Vec<V>)>,
    /// Position of each key in `entries`.
    index: HashMap<V, usize>,
}

impl<V> Graph<V>
where
    V: Eq + Hash + Clone,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Declares `vertex` with the given neighbor list.
    ///
    /// If `vertex` was already a key its neighbor list is replaced (the key keeps its position)
    /// and the previous list is returned.
    pub fn insert(&mut self, vertex: V, neighbors: Vec<V>) -> Option<Vec<V>> {
        if let Some(&i) = self.index.get(&vertex) {
            return Some(std::mem::replace(&mut self.entries[i].1, neighbors));
        }
        self.index.insert(vertex.clone(), self.entries.len());
        self.entries.push((vertex, neighbors));
        None
    }

    /// Declares `vertex` with no neighbors if it is not a key yet. Returns its position.
    pub fn add_vertex(&mut self, vertex: V) -> usize {
        if let Some(&i) = self.index.get(&vertex) {
            return i;
        }
        self.insert(vertex, Vec::new());
        self.entries.len() - 1
    }

    /// Appends `v` to the neighbor list of `u`. Both endpoints become keys if they were not.
    ///
    /// Only the `u -> v` entry is recorded; whether it also counts as `v -> u` is decided by the
    /// reader of the graph (see the `directed` flag of the path search).
    pub fn add_edge(&mut self, u: V, v: V) {
        let i = self.add_vertex(u);
        self.add_vertex(v.clone());
        self.entries[i].1.push(v);
    }

    /// Number of vertices (keys).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in declaration order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(v, _)| v)
    }

    /// `(vertex, neighbors)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &[V])> {
        self.entries.iter().map(|(v, ns)| (v, ns.as_slice()))
    }

    /// Declared neighbors of `vertex`, or `None` if it is not a key.
    pub fn neighbors(&self, vertex: &V) -> Option<&[V]> {
        self.index
            .get(vertex)
            .map(|&i| self.entries[i].1.as_slice())
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Position of `vertex` in key order.
    pub fn index_of(&self, vertex: &V) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    /// Vertex at position `i` in key order.
    pub fn vertex(&self, i: usize) -> Option<&V> {
        self.entries.get(i).map(|(v, _)| v)
    }

    /// Whether `v` appears in the declared neighbor list of `u`.
    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.neighbors(u).is_some_and(|ns| ns.contains(v))
    }

    /// Total number of declared neighbor entries, duplicates and dangling entries included.
    pub fn num_edges(&self) -> usize {
        self.entries.iter().map(|(_, ns)| ns.len()).sum()
    }
}

impl<V> Default for Graph<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(V, Vec<V>)> for Graph<V>
where
    V: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (V, Vec<V>)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        for (vertex, neighbors) in iter {
            graph.insert(vertex, neighbors);
        }
        graph
    }
}

/// Parses the line-oriented adjacency format:
///
/// ```text
/// # comment
/// 0: 1 2
/// 1: 0, 3
/// 3:
/// ```
///
/// Each non-blank line declares one key followed by its neighbors, separated by whitespace or
/// commas. Anything after `#` is ignored.
///
/// # Errors
/// Returns [`Error::Parse`] with the 1-based line number if a line has no `:` or the key is empty
/// or contains whitespace.
impl FromStr for Graph<String> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut graph = Graph::new();
        for (n, raw) in s.lines().enumerate() {
            let line = n + 1;
            let content = match raw.find('#') {
                Some(pos) => &raw[..pos],
                None => raw,
            }
            .trim();
            if content.is_empty() {
                continue;
            }

            let (key, rest) = content.split_once(':').ok_or_else(|| {
                Error::parse(line, format!("expected '<vertex>: <neighbors>', found {content:?}"))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::parse(line, "empty vertex name"));
            }
            if key.contains(char::is_whitespace) {
                return Err(Error::parse(
                    line,
                    format!("vertex name {key:?} contains whitespace"),
                ));
            }

            let neighbors = rest
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|tok| !tok.is_empty())
                .map(str::to_string)
                .collect();
            graph.insert(key.to_string(), neighbors);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let g: Graph<i32> = [(3, vec![]), (1, vec![3]), (2, vec![1])]
            .into_iter()
            .collect();
        assert_eq!(g.vertices().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(g.index_of(&2), Some(2));
        assert_eq!(g.vertex(0), Some(&3));
    }

    #[test]
    fn test_reinsert_replaces_neighbors_in_place() {
        let mut g = Graph::new();
        g.insert(0, vec![1]);
        g.insert(1, vec![0]);
        let old = g.insert(0, vec![2, 1]);
        assert_eq!(old, Some(vec![1]));
        assert_eq!(g.len(), 2);
        assert_eq!(g.vertex(0), Some(&0));
        assert_eq!(g.neighbors(&0), Some(&[2, 1][..]));
    }

    #[test]
    fn test_first_insert_returns_none() {
        let mut g = Graph::new();
        assert_eq!(g.insert("x", vec![]), None);
        assert_eq!(g.insert("x", vec![]), Some(vec![]));
        assert_eq!(g.add_vertex("y"), 1);
        assert_eq!(g.add_vertex("x"), 0);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_dangling_neighbor_is_not_a_vertex() {
        let g: Graph<i32> = [(0, vec![7])].into_iter().collect();
        assert_eq!(g.len(), 1);
        assert!(!g.contains_vertex(&7));
        assert!(g.has_edge(&0, &7));
        assert_eq!(g.neighbors(&7), None);
    }

    #[test]
    fn test_add_edge_declares_both_endpoints() {
        let mut g = Graph::new();
        g.add_edge('a', 'b');
        g.add_edge('a', 'c');
        assert_eq!(g.len(), 3);
        assert_eq!(g.neighbors(&'a'), Some(&['b', 'c'][..]));
        assert_eq!(g.neighbors(&'b'), Some(&[][..]));
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let g: Graph<u8> = Graph::default();
        assert!(g.is_empty());
        assert_eq!(g.iter().count(), 0);
    }

    #[test]
    fn test_parse_basic() {
        let text = "# square\n0: 1 2\n1: 0, 3\n\n2: 0 3  # trailing\n3:\n";
        let g: Graph<String> = text.parse().unwrap();
        let keys: Vec<&str> = g.vertices().map(String::as_str).collect();
        assert_eq!(keys, vec!["0", "1", "2", "3"]);
        assert_eq!(
            g.neighbors(&"1".to_string()),
            Some(&["0".to_string(), "3".to_string()][..])
        );
        assert_eq!(g.neighbors(&"3".to_string()), Some(&[][..]));
    }

    #[test]
    fn test_parse_missing_colon() {
        let err = "0: 1\n1 0\n".parse::<Graph<String>>().unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_empty_key() {
        let err = ": 1\n".parse::<Graph<String>>().unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_key_with_space() {
        let err = "# header\nnew york: boston\n"
            .parse::<Graph<String>>()
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_only_comments() {
        let g: Graph<String> = "# nothing here\n\n   \n".parse().unwrap();
        assert!(g.is_empty());
    }
}
