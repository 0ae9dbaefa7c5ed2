use std::fs;
use std::io::Write;

use social_graph_analyzer::error::MalformedInput;
use social_graph_analyzer::graph::mutualize;
use social_graph_analyzer::metrics::{degree, degree_of, DegreeMode};
use social_graph_analyzer::{load_adjacency_matrix, storage, viz, Analysis, Config, GraphError};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn three_person_network_from_csv() {
    let file = write_csv(",A,B,C\nA,0,1,0\nB,1,0,1\nC,0,0,0\n");
    let matrix = load_adjacency_matrix(file.path()).unwrap();
    let analysis = Analysis::run(&matrix, &Config::default()).unwrap();
    let graph = &analysis.graph;

    assert_eq!(degree(graph, DegreeMode::In).values(), &[1, 1, 1]);
    assert_eq!(degree(graph, DegreeMode::Out).values(), &[1, 2, 0]);
    assert_eq!(degree_of(graph, "B", DegreeMode::Total).unwrap(), 3);

    let mutual = &analysis.mutual_graph;
    assert_eq!(mutual.edge_count(), 1);
    assert!(mutual.has_edge("A", "B").unwrap());
    assert_eq!(degree_of(mutual, "C", DegreeMode::Total).unwrap(), 0);

    assert!(matches!(
        degree_of(graph, "D", DegreeMode::In),
        Err(GraphError::UnknownNode(_))
    ));
}

#[test]
fn reciprocated_star_centres_on_the_hub() {
    let k = 5;
    let mut csv = String::from(",hub");
    for i in 0..k {
        csv.push_str(&format!(",leaf{i}"));
    }
    csv.push('\n');
    csv.push_str("hub");
    for _ in 0..k {
        csv.push_str(",1");
    }
    csv.push('\n');
    for i in 0..k {
        csv.push_str(&format!("leaf{i},1"));
        for _ in 0..k {
            csv.push_str(",0");
        }
        csv.push('\n');
    }

    let file = write_csv(&csv);
    let matrix = load_adjacency_matrix(file.path()).unwrap();
    let analysis = Analysis::run(&matrix, &Config::default()).unwrap();
    let c = &analysis.centralities;

    let hub_betweenness = *c.betweenness.get("hub").unwrap();
    let hub_eigenvector = *c.eigenvector.scores.get("hub").unwrap();
    assert!(hub_betweenness > 0.0);
    for i in 0..k {
        let leaf = format!("leaf{i}");
        assert_eq!(*c.betweenness.get(&leaf).unwrap(), 0.0);
        assert!(hub_eigenvector > *c.eigenvector.scores.get(&leaf).unwrap());
    }
    assert!(analysis.warnings.is_empty());
}

#[test]
fn malformed_csv_is_rejected() {
    let ragged = write_csv(",A,B\nA,0,1\nB,1\n");
    assert!(matches!(
        load_adjacency_matrix(ragged.path()),
        Err(GraphError::MalformedInput(MalformedInput::NotSquare { .. }))
    ));

    let self_loop = write_csv(",A,B\nA,1,1\nB,1,0\n");
    assert!(matches!(
        load_adjacency_matrix(self_loop.path()),
        Err(GraphError::MalformedInput(MalformedInput::NonZeroDiagonal { .. }))
    ));

    let text = write_csv(",A,B\nA,0,yes\nB,1,0\n");
    assert!(matches!(
        load_adjacency_matrix(text.path()),
        Err(GraphError::MalformedInput(MalformedInput::InvalidCell { .. }))
    ));
}

#[test]
fn sample_network_end_to_end() {
    let matrix = load_adjacency_matrix(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/social_network.csv")).unwrap();
    assert_eq!(matrix.len(), 12);

    let config = Config::default();
    let analysis = Analysis::run(&matrix, &config).unwrap();
    assert_eq!(analysis.mutual_graph.edge_count(), mutualize(&analysis.graph).edge_count());
    assert!(analysis.greedy.assignment.modularity > 0.0);
    assert!(analysis.girvan_newman.assignment.modularity > 0.0);

    let pagerank_sum: f64 = analysis.centralities.pagerank.scores.values().iter().sum();
    assert!((pagerank_sum - 1.0).abs() < 1e-9);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_str().unwrap();
    storage::save_results(&analysis, &config, out).unwrap();
    viz::generate_visualizations(&analysis, out, Some("Grace")).unwrap();

    let metrics = fs::read_to_string(dir.path().join("node_metrics.csv")).unwrap();
    assert_eq!(metrics.lines().count(), 13);
    assert!(dir.path().join("visualizations/mutual_greedy_modularity.html").exists());
}
