//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty, Value};
use statrs::statistics::Statistics;

use crate::analysis::{Analysis, CommunityResult};
use crate::config::Config;

/// Save analysis results to the specified directory
pub fn save_results(analysis: &Analysis, config: &Config, output_dir: &str) -> Result<()> {
    log::info!("Saving analysis results to {}", output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(analysis, config, output_dir)?;
    save_node_metrics(analysis, output_dir)?;
    save_communities(analysis, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(analysis: &Analysis, config: &Config, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let graph = &analysis.graph;
    let mutual = &analysis.mutual_graph;
    let nodes = graph.node_count().max(1) as f64;
    let c = &analysis.centralities;

    let as_f64 = |values: &[usize]| values.iter().map(|&v| v as f64).collect::<Vec<_>>();

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "mutual_edge_count": mutual.edge_count(),
            "avg_out_degree": graph.edge_count() as f64 / nodes,
            "avg_mutual_degree": 2.0 * mutual.edge_count() as f64 / nodes,
        },
        "centrality_stats": {
            "degree_total": describe(&as_f64(c.degree_total.values())),
            "degree_in": describe(&as_f64(c.degree_in.values())),
            "degree_out": describe(&as_f64(c.degree_out.values())),
            "mutual_degree": describe(&as_f64(c.mutual_degree.values())),
            "eigenvector": describe(c.eigenvector.scores.values()),
            "pagerank": describe(c.pagerank.scores.values()),
            "betweenness": describe(c.betweenness.values()),
        },
        "solvers": {
            "eigenvector": {
                "iterations": c.eigenvector.iterations,
                "residual": c.eigenvector.residual,
                "converged": c.eigenvector.converged,
            },
            "pagerank": {
                "iterations": c.pagerank.iterations,
                "residual": c.pagerank.residual,
                "converged": c.pagerank.converged,
            },
        },
        "community_stats": {
            "greedy_modularity": community_stats(&analysis.greedy),
            "girvan_newman": community_stats(&analysis.girvan_newman),
        },
        "warnings": analysis.warnings,
        "config": config,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Mean, standard deviation and range of one measure
fn describe(values: &[f64]) -> Value {
    json!({
        "mean": Statistics::mean(values.iter()),
        "std_dev": Statistics::std_dev(values.iter()),
        "min": Statistics::min(values.iter()),
        "max": Statistics::max(values.iter()),
    })
}

fn community_stats(result: &CommunityResult) -> Value {
    json!({
        "community_count": result.assignment.community_count(),
        "modularity": result.assignment.modularity,
        "largest_community_size": result.clusters.first().map_or(0, |c| c.size),
        "singleton_count": result.clusters.iter().filter(|c| c.size == 1).count(),
    })
}

/// Save one CSV row of measures per node
fn save_node_metrics(analysis: &Analysis, output_dir: &str) -> Result<()> {
    log::info!("Saving per-node metrics");

    let path = Path::new(output_dir).join("node_metrics.csv");
    let mut writer = csv::Writer::from_path(path)?;
    for row in analysis.all_node_metrics() {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Save community summaries and the histories of both algorithms
fn save_communities(analysis: &Analysis, output_dir: &str) -> Result<()> {
    log::info!("Saving community information");

    let communities_dir = Path::new(output_dir).join("communities");
    fs::create_dir_all(&communities_dir)?;

    for result in [&analysis.greedy, &analysis.girvan_newman] {
        let path = communities_dir.join(format!("{}.json", result.assignment.algorithm));
        let mut file = File::create(path)?;

        let communities_json = json!({
            "algorithm": result.assignment.algorithm,
            "modularity": result.assignment.modularity,
            "membership": result.assignment.membership,
            "clusters": result.clusters,
        });
        file.write_all(to_string_pretty(&communities_json)?.as_bytes())?;
    }

    let dendrogram_path = communities_dir.join("greedy_modularity_dendrogram.json");
    File::create(dendrogram_path)?.write_all(to_string_pretty(&analysis.dendrogram)?.as_bytes())?;

    let removals_path = communities_dir.join("girvan_newman_removals.json");
    File::create(removals_path)?.write_all(to_string_pretty(&analysis.removals)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AdjacencyMatrix;

    #[test]
    fn writes_every_artifact() {
        let matrix = AdjacencyMatrix::from_rows(
            vec!["A", "B", "C"],
            vec![
                vec![0.0, 1.0, 0.0],
                vec![1.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0],
            ],
        )
        .unwrap();
        let config = Config::default();
        let analysis = Analysis::run(&matrix, &config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        save_results(&analysis, &config, out).unwrap();

        let summary: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["graph_stats"]["node_count"], 3);
        assert_eq!(summary["graph_stats"]["mutual_edge_count"], 1);
        assert_eq!(summary["community_stats"]["greedy_modularity"]["community_count"], 2);

        let csv = fs::read_to_string(dir.path().join("node_metrics.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.starts_with("id,degree_total,degree_in,degree_out"));

        assert!(dir.path().join("communities/greedy_modularity.json").exists());
        assert!(dir.path().join("communities/girvan_newman.json").exists());

        let dendrogram: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("communities/greedy_modularity_dendrogram.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(dendrogram["merges"].as_array().unwrap().len(), 1);
        assert_eq!(dendrogram["best_step"], 1);

        let removals: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("communities/girvan_newman_removals.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(removals.as_array().unwrap().len(), 1);
        assert_eq!(removals[0]["edge"], json!(["A", "B"]));
    }
}
