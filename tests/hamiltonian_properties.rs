use hampath::graph::{PathFinder, SearchConfig, SearchStrategy};
use hampath::{find_hamiltonian_path, is_hamiltonian_path, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(rng: &mut StdRng, n: u32, p: f64, offset: u32) -> Graph<u32> {
    (0..n)
        .map(|u| {
            let neighbors: Vec<u32> = (0..n)
                .filter(|&v| v != u && rng.gen_bool(p))
                .map(|v| v + offset)
                .collect();
            (u + offset, neighbors)
        })
        .collect()
}

/// Every ordering of the keys, checked edge by edge.
fn brute_force_exists(graph: &Graph<u32>, directed: bool) -> bool {
    fn edge(graph: &Graph<u32>, u: u32, v: u32, directed: bool) -> bool {
        let forward = graph.neighbors(&u).is_some_and(|ns| ns.contains(&v));
        let backward = graph.neighbors(&v).is_some_and(|ns| ns.contains(&u));
        forward || (!directed && backward)
    }

    fn extend(
        graph: &Graph<u32>,
        order: &mut Vec<u32>,
        rest: &mut Vec<u32>,
        directed: bool,
    ) -> bool {
        if rest.is_empty() {
            return true;
        }
        for i in 0..rest.len() {
            let v = rest.remove(i);
            let ok = order.last().map_or(true, |&u| edge(graph, u, v, directed));
            if ok {
                order.push(v);
                if extend(graph, order, rest, directed) {
                    return true;
                }
                order.pop();
            }
            rest.insert(i, v);
        }
        false
    }

    if graph.is_empty() {
        return false;
    }
    let mut rest: Vec<u32> = graph.vertices().copied().collect();
    extend(graph, &mut Vec::new(), &mut rest, directed)
}

#[test]
fn test_matches_brute_force_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(0x4a31);
    for _ in 0..300 {
        let n = rng.gen_range(1..=6);
        let p = rng.gen_range(0.1..0.6);
        let g = random_graph(&mut rng, n, p, 0);

        for directed in [false, true] {
            let found = find_hamiltonian_path(&g, directed);
            assert_eq!(found.is_some(), brute_force_exists(&g, directed), "{g:?}");
            if let Some(path) = found {
                assert_eq!(path.len(), g.len());
                assert!(is_hamiltonian_path(&g, &path, directed), "{path:?} in {g:?}");
            }
        }
    }
}

#[test]
fn test_strategies_agree_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let n = rng.gen_range(1..=9);
        let g = random_graph(&mut rng, n, 0.3, 0);
        let finder = PathFinder::new(&g);

        for base in [SearchConfig::undirected(), SearchConfig::directed()] {
            let recursive = finder.find(&base.with_strategy(SearchStrategy::Recursive));
            let iterative = finder.find(&base.with_strategy(SearchStrategy::Iterative));
            assert_eq!(recursive, iterative, "{g:?}");
        }
    }
}

#[test]
fn test_undirected_path_exists_whenever_directed_does() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let n = rng.gen_range(2..=7);
        let g = random_graph(&mut rng, n, 0.35, 0);
        if find_hamiltonian_path(&g, true).is_some() {
            assert!(find_hamiltonian_path(&g, false).is_some(), "{g:?}");
        }
    }
}

#[test]
fn test_disjoint_components_have_no_path() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let (a, b) = (rng.gen_range(1..=4), rng.gen_range(1..=4));
        let left = random_graph(&mut rng, a, 0.7, 0);
        let right = random_graph(&mut rng, b, 0.7, 100);
        let g: Graph<u32> = left
            .iter()
            .chain(right.iter())
            .map(|(v, ns)| (*v, ns.to_vec()))
            .collect();

        assert_eq!(find_hamiltonian_path(&g, false), None);
        assert_eq!(find_hamiltonian_path(&g, true), None);
    }
}

#[test]
fn test_result_is_stable_across_calls() {
    let mut rng = StdRng::seed_from_u64(11);
    let g = random_graph(&mut rng, 8, 0.4, 0);
    let first = find_hamiltonian_path(&g, false);
    for _ in 0..5 {
        assert_eq!(find_hamiltonian_path(&g, false), first);
    }
}

#[test]
fn test_parsed_graph_end_to_end() {
    let text = "\
# the demo graph
0: 1 2
1: 0 3 4
2: 0 3
3: 1 2 4
4: 1 3
";
    let g: Graph<String> = text.parse().unwrap();
    let path = find_hamiltonian_path(&g, false).unwrap();
    assert_eq!(path, vec!["0", "1", "4", "3", "2"]);
    assert!(is_hamiltonian_path(&g, &path, false));
}
