//! # Graph Rendering
//!
//! Draws a [`Graph`] with a Hamiltonian path highlighted, either as Graphviz DOT source or as a
//! standalone SVG image. Every declared entry is drawn (gray) and the edges and vertices of the
//! path are drawn on top (red edges, salmon vertices). The title names the path, or says that
//! none was found.
//!
//! Neighbors that are not keys are still drawn as vertices, since they appear in the input.
//!
//! ## Example
//! ```rust
//! use hampath::graph::{find_hamiltonian_path, to_dot, Graph, RenderConfig};
//!
//! let g: Graph<u32> = [(0, vec![1]), (1, vec![2]), (2, vec![])].into_iter().collect();
//! let path = find_hamiltonian_path(&g, true);
//! let dot = to_dot(&g, path.as_deref(), true, &RenderConfig::default());
//!
//! assert!(dot.starts_with("digraph"));
//! assert!(dot.contains("Hamiltonian path: 0 → 1 → 2"));
//! ```

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::fmt::{self, Display, Write};
use std::fs;
use std::hash::Hash;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::graph::{find_hamiltonian_path, Graph};

const NODE_COLOR: &str = "lightblue";
const PATH_NODE_COLOR: &str = "salmon";
const EDGE_COLOR: &str = "gray";
const PATH_EDGE_COLOR: &str = "red";
const TITLE_BAND: f64 = 60.0;
const NODE_RADIUS: f64 = 24.0;
const PATH_NODE_RADIUS: f64 = 26.0;

/// Output format of [`render_to_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// Graphviz source (`dot -Tpng graph.dot`).
    Dot,
    Svg,
}

impl RenderFormat {
    /// Picks the format from the file extension: `.dot`/`.gv` or `.svg`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "dot" | "gv" => Some(RenderFormat::Dot),
            "svg" => Some(RenderFormat::Svg),
            _ => None,
        }
    }

    /// Like [`from_path`](Self::from_path), but an unsupported extension is an error instead of
    /// a guess, so nothing is written under a misleading name.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`] if the extension is not `.dot`, `.gv` or `.svg`.
    pub fn for_target(path: &Path) -> Result<Self> {
        Self::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }
}

/// Drawing options.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Overrides the generated title.
    pub title: Option<String>,
    /// SVG canvas width in pixels.
    pub width: u32,
    /// SVG canvas height in pixels.
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: 1440,
            height: 960,
        }
    }
}

/// Vertices and edges as drawn: keys first, then dangling neighbors, with edges deduplicated.
struct Layout<'g, V> {
    labels: Vec<&'g V>,
    edges: Vec<(usize, usize)>,
    on_path: Vec<bool>,
    path_edges: HashSet<(usize, usize)>,
    directed: bool,
}

impl<'g, V> Layout<'g, V>
where
    V: Eq + Hash + Clone,
{
    fn new(graph: &'g Graph<V>, path: Option<&[V]>, directed: bool) -> Self {
        let mut labels: Vec<&V> = graph.vertices().collect();
        let mut index: HashMap<&V, usize> =
            labels.iter().enumerate().map(|(i, &v)| (v, i)).collect();

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for (u, neighbors) in graph.iter() {
            let ui = index[u];
            for v in neighbors {
                let vi = *index.entry(v).or_insert_with(|| {
                    labels.push(v);
                    labels.len() - 1
                });
                if seen.insert(edge_key(ui, vi, directed)) {
                    edges.push((ui, vi));
                }
            }
        }

        let mut on_path = vec![false; labels.len()];
        let mut path_edges = HashSet::new();
        if let Some(path) = path {
            let positions: Vec<usize> =
                path.iter().filter_map(|v| index.get(v).copied()).collect();
            for &i in &positions {
                on_path[i] = true;
            }
            for pair in positions.windows(2) {
                path_edges.insert(edge_key(pair[0], pair[1], directed));
            }
        }

        Self {
            labels,
            edges,
            on_path,
            path_edges,
            directed,
        }
    }
}

impl<V> Layout<'_, V> {
    fn is_path_edge(&self, u: usize, v: usize) -> bool {
        self.path_edges.contains(&edge_key(u, v, self.directed))
    }
}

fn edge_key(u: usize, v: usize, directed: bool) -> (usize, usize) {
    if directed || u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

fn default_title<V: Display>(path: Option<&[V]>) -> String {
    match path {
        Some(path) => {
            let names: Vec<String> = path.iter().map(ToString::to_string).collect();
            format!("Hamiltonian path: {}", names.join(" → "))
        }
        None => "No Hamiltonian path found".to_string(),
    }
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders `graph` as Graphviz DOT source with `path` highlighted.
///
/// Directed graphs use `digraph`/`->`; undirected graphs use `graph`/`--` and draw each
/// unordered pair once.
pub fn to_dot<V>(
    graph: &Graph<V>,
    path: Option<&[V]>,
    directed: bool,
    config: &RenderConfig,
) -> String
where
    V: Eq + Hash + Clone + Display,
{
    let layout = Layout::new(graph, path, directed);
    let title = config.title.clone().unwrap_or_else(|| default_title(path));
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dot(&mut out, &layout, &title);
    out
}

fn write_dot<V: Display>(
    out: &mut impl Write,
    layout: &Layout<'_, V>,
    title: &str,
) -> fmt::Result {
    let (kind, arrow) = if layout.directed {
        ("digraph", "->")
    } else {
        ("graph", "--")
    };
    writeln!(out, "{kind} G {{")?;
    writeln!(out, "    label=\"{}\";", escape_dot(title))?;
    writeln!(out, "    labelloc=t;")?;
    writeln!(out, "    node [shape=circle, style=filled, fontsize=12];")?;

    for (i, label) in layout.labels.iter().enumerate() {
        let color = if layout.on_path[i] {
            PATH_NODE_COLOR
        } else {
            NODE_COLOR
        };
        writeln!(
            out,
            "    n{i} [label=\"{}\", fillcolor={color}];",
            escape_dot(&label.to_string())
        )?;
    }

    for &(u, v) in &layout.edges {
        if layout.is_path_edge(u, v) {
            writeln!(out, "    n{u} {arrow} n{v} [color={PATH_EDGE_COLOR}, penwidth=3];")?;
        } else {
            writeln!(out, "    n{u} {arrow} n{v} [color={EDGE_COLOR}];")?;
        }
    }
    writeln!(out, "}}")
}

/// Renders `graph` as a standalone SVG image with `path` highlighted.
///
/// Vertices are placed on a circle in key order (dangling neighbors last). Self-loops are not
/// drawn.
pub fn to_svg<V>(
    graph: &Graph<V>,
    path: Option<&[V]>,
    directed: bool,
    config: &RenderConfig,
) -> String
where
    V: Eq + Hash + Clone + Display,
{
    let layout = Layout::new(graph, path, directed);
    let title = config.title.clone().unwrap_or_else(|| default_title(path));
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_svg(&mut out, &layout, &title, config);
    out
}

fn circle_positions(count: usize, config: &RenderConfig) -> Vec<(f64, f64)> {
    let width = f64::from(config.width);
    let height = f64::from(config.height);
    let cx = width / 2.0;
    let cy = TITLE_BAND + (height - TITLE_BAND) / 2.0;
    if count == 1 {
        return vec![(cx, cy)];
    }
    let radius = (width.min(height - TITLE_BAND) / 2.0 - 2.0 * NODE_RADIUS).max(NODE_RADIUS);
    (0..count)
        .map(|k| {
            let angle = -PI / 2.0 + 2.0 * PI * k as f64 / count as f64;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

fn write_svg<V: Display>(
    out: &mut impl Write,
    layout: &Layout<'_, V>,
    title: &str,
    config: &RenderConfig,
) -> fmt::Result {
    let (w, h) = (config.width, config.height);
    let pos = circle_positions(layout.labels.len(), config);

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    if layout.directed {
        writeln!(out, "  <defs>")?;
        for (id, color) in [("arrow", EDGE_COLOR), ("arrow-path", PATH_EDGE_COLOR)] {
            writeln!(
                out,
                r#"    <marker id="{id}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto"><path d="M0,0 L10,5 L0,10 z" fill="{color}"/></marker>"#
            )?;
        }
        writeln!(out, "  </defs>")?;
    }
    writeln!(out, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        out,
        r#"  <text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="20">{}</text>"#,
        w / 2,
        TITLE_BAND / 2.0 + 7.0,
        escape_xml(title)
    )?;

    // Plain edges first so path edges are drawn over them.
    for highlight in [false, true] {
        for &(u, v) in &layout.edges {
            if u == v || layout.is_path_edge(u, v) != highlight {
                continue;
            }
            let ((x1, y1), (x2, y2)) = (pos[u], pos[v]);
            let len = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt().max(f64::EPSILON);
            let end = if layout.on_path[v] {
                PATH_NODE_RADIUS
            } else {
                NODE_RADIUS
            };
            let (ex, ey) = (x2 - (x2 - x1) * end / len, y2 - (y2 - y1) * end / len);
            let (color, width, opacity, marker) = if highlight {
                (PATH_EDGE_COLOR, 3, 0.8, "arrow-path")
            } else {
                (EDGE_COLOR, 1, 0.5, "arrow")
            };
            write!(
                out,
                r#"  <line x1="{x1:.1}" y1="{y1:.1}" x2="{ex:.1}" y2="{ey:.1}" stroke="{color}" stroke-width="{width}" stroke-opacity="{opacity}""#
            )?;
            if layout.directed {
                write!(out, r#" marker-end="url(#{marker})""#)?;
            }
            writeln!(out, "/>")?;
        }
    }

    for (i, label) in layout.labels.iter().enumerate() {
        let (x, y) = pos[i];
        let (fill, r) = if layout.on_path[i] {
            (PATH_NODE_COLOR, PATH_NODE_RADIUS)
        } else {
            (NODE_COLOR, NODE_RADIUS)
        };
        writeln!(
            out,
            r#"  <circle cx="{x:.1}" cy="{y:.1}" r="{r}" fill="{fill}"/>"#
        )?;
        writeln!(
            out,
            r#"  <text x="{x:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="12" font-weight="bold">{}</text>"#,
            y + 4.0,
            escape_xml(&label.to_string())
        )?;
    }
    writeln!(out, "</svg>")
}

/// Searches `graph` for a Hamiltonian path, renders it, and writes the result to `target`,
/// creating missing parent directories.
///
/// Returns the path that was drawn, or `None` if the graph has no Hamiltonian path (the image is
/// still written, titled accordingly).
///
/// # Errors
/// Returns [`Error::Io`] if the directory cannot be created or the file cannot be written.
pub fn render_to_file<V>(
    graph: &Graph<V>,
    directed: bool,
    target: &Path,
    format: RenderFormat,
    config: &RenderConfig,
) -> Result<Option<Vec<V>>>
where
    V: Eq + Hash + Clone + Display,
{
    let path = find_hamiltonian_path(graph, directed);
    write_rendering(graph, path.as_deref(), directed, target, format, config)?;
    Ok(path)
}

/// Renders `graph` with an already computed `path` and writes it to `target`, creating missing
/// parent directories.
///
/// # Errors
/// Returns [`Error::Io`] if the directory cannot be created or the file cannot be written.
pub fn write_rendering<V>(
    graph: &Graph<V>,
    path: Option<&[V]>,
    directed: bool,
    target: &Path,
    format: RenderFormat,
    config: &RenderConfig,
) -> Result<()>
where
    V: Eq + Hash + Clone + Display,
{
    let body = match format {
        RenderFormat::Dot => to_dot(graph, path, directed, config),
        RenderFormat::Svg => to_svg(graph, path, directed, config),
    };

    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    fs::write(target, body).map_err(|e| Error::io(target, e))?;
    info!(
        "wrote {:?} rendering of {} vertices to {}",
        format,
        graph.len(),
        target.display()
    );
    Ok(())
}
