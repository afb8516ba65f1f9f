use std::path::PathBuf;

use clap::Parser;
use kspwlo::graphs::{
    graph_factory::{GraphFactory, IndexBase},
    Graph,
};

/// Reading a .bincode file is way faster than a .gr file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .gr format
    #[arg(short, long)]
    gr: PathBuf,
    /// Numbering of the vertex ids in the infile
    #[arg(short, long, value_enum, default_value_t = IndexBase::One)]
    index_base: IndexBase,
    /// Outfile in .bincode format
    #[arg(short, long)]
    bincode: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let graph = GraphFactory::from_gr_file(&args.gr, args.index_base).unwrap();
    println!(
        "read {} vertices and {} edges",
        graph.number_of_vertices(),
        graph.number_of_edges()
    );

    GraphFactory::to_bincode_file(&graph, &args.bincode).unwrap();
}
