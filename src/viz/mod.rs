//! Visualization generation module

pub mod render;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use petgraph::EdgeType;
use serde::Serialize;
use serde_json::json;

use crate::analysis::{Analysis, CommunityResult};
use crate::graph::SocialGraph;
use crate::metrics::CentralityVector;

pub use render::{NodeStyle, RenderSpec};

const MIN_NODE_SIZE: f64 = 8.0;
const MAX_NODE_SIZE: f64 = 40.0;

/// Generate visualizations from analysis results
pub fn generate_visualizations(analysis: &Analysis, output_dir: &str, highlight: Option<&str>) -> Result<()> {
    log::info!("Generating visualizations");

    // Create visualizations directory
    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    let c = &analysis.centralities;
    let sized_views: [(&str, &str, CentralityVector); 4] = [
        ("degree", "Total degree", c.degree_total.to_centrality()),
        ("eigenvector", "Eigenvector centrality", c.eigenvector.scores.clone()),
        ("pagerank", "PageRank centrality", c.pagerank.scores.clone()),
        ("betweenness", "Betweenness centrality", c.betweenness.clone()),
    ];

    for (name, title, scores) in &sized_views {
        let mut spec = RenderSpec::new(&analysis.graph).size_by(scores, MIN_NODE_SIZE, MAX_NODE_SIZE)?;
        if let Some(id) = highlight {
            spec = spec.highlight(id)?;
        }
        let stem = viz_dir.join(format!("directed_{name}"));
        write_graphml(&analysis.graph, &spec, &stem.with_extension("graphml"))?;
        write_html(&analysis.graph, &spec, title, &stem.with_extension("html"))?;
    }

    let mutual_degree = c.mutual_degree.to_centrality();
    for result in [&analysis.greedy, &analysis.girvan_newman] {
        let algorithm = result.assignment.algorithm;
        let mut spec = RenderSpec::new(&analysis.mutual_graph)
            .size_by(&mutual_degree, MIN_NODE_SIZE, MAX_NODE_SIZE)?
            .color_by(&result.assignment)?;
        if let Some(id) = highlight {
            spec = spec.highlight(id)?;
        }
        let title = format!(
            "Mutual graph: {} (Q = {:.4})",
            algorithm, result.assignment.modularity
        );
        let stem = viz_dir.join(format!("mutual_{algorithm}"));
        write_graphml(&analysis.mutual_graph, &spec, &stem.with_extension("graphml"))?;
        write_html(&analysis.mutual_graph, &spec, &title, &stem.with_extension("html"))?;
    }

    generate_stats_visualizations(&[&analysis.greedy, &analysis.girvan_newman], &viz_dir)?;

    log::info!("Visualizations generated successfully");

    Ok(())
}

/// Write `graph` as GraphML with the styles of `spec` as node data
pub fn write_graphml<Ty: EdgeType>(graph: &SocialGraph<Ty>, spec: &RenderSpec, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    let edge_default = if graph.is_directed() { "directed" } else { "undirected" };

    // Write GraphML header
    writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
    writeln!(file, "  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>")?;
    writeln!(file, "  <key id=\"size\" for=\"node\" attr.name=\"size\" attr.type=\"double\"/>")?;
    writeln!(file, "  <key id=\"color\" for=\"node\" attr.name=\"color\" attr.type=\"string\"/>")?;
    writeln!(file, "  <key id=\"highlighted\" for=\"node\" attr.name=\"highlighted\" attr.type=\"boolean\"/>")?;
    writeln!(file, "  <graph id=\"G\" edgedefault=\"{}\">", edge_default)?;

    // Write nodes
    for (index, style) in spec.styles().iter().enumerate() {
        writeln!(file, "    <node id=\"n{}\">", index)?;
        writeln!(file, "      <data key=\"label\">{}</data>", escape_xml(&style.label))?;
        writeln!(file, "      <data key=\"size\">{:.3}</data>", style.size)?;
        writeln!(file, "      <data key=\"color\">{}</data>", style.color)?;
        writeln!(file, "      <data key=\"highlighted\">{}</data>", style.highlighted)?;
        writeln!(file, "    </node>")?;
    }

    // Write edges
    for (edge_id, (src, dst)) in graph.edge_pairs().enumerate() {
        writeln!(file, "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\"/>", edge_id, src, dst)?;
    }

    // Write GraphML footer
    writeln!(file, "  </graph>")?;
    writeln!(file, "</graphml>")?;

    Ok(())
}

/// Write a self-contained interactive page (vis-network) for `graph`
pub fn write_html<Ty: EdgeType>(graph: &SocialGraph<Ty>, spec: &RenderSpec, title: &str, path: &Path) -> Result<()> {
    let nodes: Vec<_> = spec
        .styles()
        .iter()
        .enumerate()
        .map(|(index, style)| {
            json!({
                "id": index,
                "label": style.label,
                "title": style.title,
                "value": style.size,
                "color": style.color,
                "borderWidth": if style.highlighted { 4 } else { 1 },
            })
        })
        .collect();
    let edges: Vec<_> = graph
        .edge_pairs()
        .map(|(src, dst)| json!({ "from": src, "to": dst }))
        .collect();
    let arrows = if graph.is_directed() { "to" } else { "" };

    let mut file = File::create(path)?;
    writeln!(file, "<!DOCTYPE html>")?;
    writeln!(file, "<html lang=\"en\">")?;
    writeln!(file, "<head>")?;
    writeln!(file, "  <meta charset=\"UTF-8\">")?;
    writeln!(file, "  <title>{}</title>", escape_xml(title))?;
    writeln!(file, "  <script src=\"https://unpkg.com/vis-network/standalone/umd/vis-network.min.js\"></script>")?;
    writeln!(file, "  <style>")?;
    writeln!(file, "    body {{ font-family: Arial, sans-serif; margin: 20px; }}")?;
    writeln!(file, "    #network {{ width: 100%; height: 750px; border: 1px solid #ddd; }}")?;
    writeln!(file, "  </style>")?;
    writeln!(file, "</head>")?;
    writeln!(file, "<body>")?;
    writeln!(file, "  <h1>{}</h1>", escape_xml(title))?;
    writeln!(file, "  <div id=\"network\"></div>")?;
    writeln!(file, "  <script>")?;
    writeln!(file, "    const nodes = new vis.DataSet({});", script_json(&nodes)?)?;
    writeln!(file, "    const edges = new vis.DataSet({});", script_json(&edges)?)?;
    writeln!(file, "    const options = {{")?;
    writeln!(file, "      nodes: {{ shape: \"dot\", scaling: {{ min: {}, max: {} }} }},", MIN_NODE_SIZE, MAX_NODE_SIZE)?;
    writeln!(file, "      edges: {{ arrows: \"{}\", color: {{ opacity: 0.4 }} }},", arrows)?;
    writeln!(file, "      physics: {{ solver: \"forceAtlas2Based\" }}")?;
    writeln!(file, "    }};")?;
    writeln!(file, "    new vis.Network(document.getElementById(\"network\"), {{ nodes, edges }}, options);")?;
    writeln!(file, "  </script>")?;
    writeln!(file, "</body>")?;
    writeln!(file, "</html>")?;

    Ok(())
}

/// JSON for embedding inside an inline `<script>`; `</` is escaped so no
/// string value can close the element
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// One row of `community_stats.csv`
#[derive(Debug, Serialize)]
struct CommunityStatsRow<'a> {
    algorithm: &'a str,
    community_id: usize,
    size: usize,
    density: f64,
    top_member: &'a str,
}

/// Generate statistical visualizations
fn generate_stats_visualizations(results: &[&CommunityResult], viz_dir: &Path) -> Result<()> {
    log::info!("Generating community statistics");

    let stats_path = viz_dir.join("community_stats.csv");
    let mut writer = csv::Writer::from_path(stats_path)?;

    for result in results {
        for cluster in &result.clusters {
            writer.serialize(CommunityStatsRow {
                algorithm: result.assignment.algorithm.name(),
                community_id: cluster.id,
                size: cluster.size,
                density: cluster.density,
                top_member: cluster.central_nodes.degree.first().map_or("", String::as_str),
            })?;
        }
    }
    writer.flush()?;

    Ok(())
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
