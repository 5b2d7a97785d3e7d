use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hampath::graph::{
    write_rendering, Graph, PathFinder, RenderConfig, RenderFormat, SearchConfig, SearchStrategy,
};
use hampath::{is_hamiltonian_path, Error, Result};
use log::info;
use tracing_subscriber::filter::LevelFilter;

/// Find a Hamiltonian path in a graph given as an adjacency list.
#[derive(Debug, Parser)]
#[command(name = "hampath", version)]
struct Cli {
    /// Adjacency file, one `vertex: neighbor neighbor ...` entry per line.
    /// The built-in demo graph is used when omitted.
    file: Option<PathBuf>,

    /// Read adjacency entries as directed edges only.
    #[arg(short, long)]
    directed: bool,

    /// Search with an explicit stack instead of recursion.
    #[arg(long)]
    iterative: bool,

    /// Render the graph with the path highlighted (`.dot`, `.gv` or `.svg`).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn demo_graph() -> Graph<String> {
    let entries: [(u32, &[u32]); 5] = [
        (0, &[1, 2]),
        (1, &[0, 3, 4]),
        (2, &[0, 3]),
        (3, &[1, 2, 4]),
        (4, &[1, 3]),
    ];
    entries
        .iter()
        .map(|(v, ns)| (v.to_string(), ns.iter().map(u32::to_string).collect::<Vec<_>>()))
        .collect()
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    // Reject unsupported targets before searching.
    let output = cli
        .output
        .as_deref()
        .map(|target| RenderFormat::for_target(target).map(|format| (target, format)))
        .transpose()?;

    let graph = match &cli.file {
        Some(file) => fs::read_to_string(file)
            .map_err(|e| Error::io(file, e))?
            .parse::<Graph<String>>()?,
        None => {
            info!("no input file, using the demo graph");
            demo_graph()
        }
    };
    info!(
        "loaded {} vertices with {} adjacency entries",
        graph.len(),
        graph.num_edges()
    );

    let config = SearchConfig {
        directed: cli.directed,
        strategy: if cli.iterative {
            SearchStrategy::Iterative
        } else {
            SearchStrategy::Recursive
        },
    };
    let path = PathFinder::new(&graph).find(&config);

    match &path {
        Some(path) => {
            debug_assert!(is_hamiltonian_path(&graph, path, cli.directed));
            println!("Hamiltonian path: {}", path.join(" -> "));
        }
        None => println!("No Hamiltonian path found"),
    }

    if let Some((target, format)) = output {
        write_rendering(
            &graph,
            path.as_deref(),
            cli.directed,
            target,
            format,
            &RenderConfig::default(),
        )?;
        println!("Image written to {}", target.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
