use std::{
    error::Error,
    fs::File,
    io::{stdout, BufReader, BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

use clap::Parser;
use kspwlo::{
    graphs::{
        graph_factory::{GraphFactory, IndexBase},
        path::{validate_path, PathRequest},
    },
    search::{
        one_pass_plus::OnePassPlus, parameters::KspwloParameters, similarity::SimilarityMeasure,
    },
};
use log::info;

/// Computes up to k shortest paths between two vertices that pairwise overlap
/// by at most theta and prints them as json.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph in `.gr` or `.bincode` format
    #[arg(short, long)]
    graph: PathBuf,
    /// Numbering of the vertex ids in a `.gr` file
    #[arg(long, value_enum, default_value_t = IndexBase::Zero)]
    index_base: IndexBase,
    #[arg(short, long)]
    source: u32,
    #[arg(short, long)]
    target: u32,
    /// Json file with search parameters, flags given on the command line take
    /// precedence
    #[arg(short, long)]
    parameters: Option<PathBuf>,
    /// Number of paths
    #[arg(short)]
    k: Option<usize>,
    /// Maximum similarity between two paths
    #[arg(long)]
    theta: Option<f64>,
    #[arg(long, value_enum)]
    similarity: Option<SimilarityMeasure>,
    /// Stop after creating this many labels
    #[arg(long)]
    max_labels: Option<usize>,
    /// Do not discard partial paths early
    #[arg(long)]
    no_pruning: bool,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut parameters = match &args.parameters {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => KspwloParameters::default(),
    };
    if let Some(k) = args.k {
        parameters.k = k;
    }
    if let Some(theta) = args.theta {
        parameters.theta = theta;
    }
    if let Some(similarity) = args.similarity {
        parameters.similarity = similarity;
    }
    if args.max_labels.is_some() {
        parameters.max_labels = args.max_labels;
    }
    if args.no_pruning {
        parameters.prune_overlapping_labels = false;
    }

    let graph = GraphFactory::from_file(&args.graph, args.index_base)?;

    let request = PathRequest::new(args.source, args.target);
    let one_pass_plus = OnePassPlus::new(&graph, parameters)?;

    let start = Instant::now();
    let result = one_pass_plus.run(&request, None)?;
    info!("search took {:?}", start.elapsed());

    for path in result.paths.iter() {
        validate_path(&graph, &request, path)?;
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, &result)?;
    writeln!(writer)?;

    Ok(())
}
