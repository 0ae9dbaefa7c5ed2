use anyhow::Result;
use clap::Parser;

use social_graph_analyzer::analysis::CommunityResult;
use social_graph_analyzer::metrics::NodeVector;
use social_graph_analyzer::{load_adjacency_matrix, storage, viz, Analysis, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "social-graph-analyzer",
    about = "Centrality and community analysis of a social network adjacency matrix"
)]
struct Cli {
    /// Path to input CSV adjacency matrix (labelled header row and first column)
    #[clap(long, default_value = "assets/social_network.csv")]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: String,

    /// PageRank damping factor
    #[clap(long, default_value = "0.85")]
    damping: f64,

    /// Convergence tolerance for eigenvector centrality and PageRank
    #[clap(long, default_value = "1e-6")]
    tolerance: f64,

    /// Iteration cap for eigenvector centrality and PageRank
    #[clap(long, default_value = "1000")]
    max_iterations: usize,

    /// Number of top-ranked individuals to report per measure
    #[clap(long, default_value = "5")]
    top_n: usize,

    /// Individual to single out in the report and renderings
    #[clap(long)]
    highlight: Option<String>,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting social graph analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    let config = Config::new(args.damping, args.tolerance, args.max_iterations, args.top_n);

    // 1. Load data
    let matrix = load_adjacency_matrix(&args.input)?;

    // 2. Build graphs and run every measure
    let analysis = Analysis::run(&matrix, &config)?;

    log::info!(
        "Directed graph has {} nodes and {} edges; mutual graph has {} edges",
        analysis.graph.node_count(),
        analysis.graph.edge_count(),
        analysis.mutual_graph.edge_count()
    );

    // 3. Report
    report(&analysis, &config);

    if let Some(id) = args.highlight.as_deref() {
        let m = analysis.node_metrics(id)?;
        log::info!(
            "{}: degree {} (in {}, out {}), mutual degree {}, eigenvector {:.4}, pagerank {:.4}, betweenness {:.4}",
            m.id,
            m.degree_total,
            m.degree_in,
            m.degree_out,
            m.mutual_degree,
            m.eigenvector,
            m.pagerank,
            m.betweenness
        );
        log::info!(
            "{}: community {} by greedy modularity, {} by Girvan-Newman",
            m.id,
            m.greedy_community,
            m.girvan_newman_community
        );
    }

    // 4. Save results
    storage::save_results(&analysis, &config, &args.output_dir)?;

    // 5. Generate visualizations if requested
    if !args.skip_viz {
        viz::generate_visualizations(&analysis, &args.output_dir, args.highlight.as_deref())?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}

fn report(analysis: &Analysis, config: &Config) {
    let c = &analysis.centralities;
    log_top("total degree", &c.degree_total, config.top_n);
    log_top("in-degree", &c.degree_in, config.top_n);
    log_top("out-degree", &c.degree_out, config.top_n);
    log_top("mutual degree", &c.mutual_degree, config.top_n);
    log_top("eigenvector centrality", &c.eigenvector.scores, config.top_n);
    log_top("PageRank", &c.pagerank.scores, config.top_n);
    log_top("betweenness", &c.betweenness, config.top_n);

    for result in [&analysis.greedy, &analysis.girvan_newman] {
        log_communities(result);
    }
}

fn log_top<T: Copy + PartialOrd + std::fmt::Display>(measure: &str, values: &NodeVector<T>, n: usize) {
    let ranked: Vec<String> = values
        .top(n)
        .into_iter()
        .map(|(id, value)| format!("{id} ({value:.4})"))
        .collect();
    log::info!("Top {} by {}: {}", n, measure, ranked.join(", "));
}

fn log_communities(result: &CommunityResult) {
    let assignment = &result.assignment;
    log::info!(
        "{} found {} communities with modularity {:.4}",
        assignment.algorithm,
        assignment.community_count(),
        assignment.modularity
    );
    for cluster in &result.clusters {
        log::info!(
            "  community {}: {} members, density {:.3}, most connected: {}",
            cluster.id,
            cluster.size,
            cluster.density,
            cluster.central_nodes.degree.join(", ")
        );
    }
}
