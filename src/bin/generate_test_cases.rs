use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use indicatif::ParallelProgressIterator;
use kspwlo::{
    graphs::{
        graph_factory::{GraphFactory, IndexBase},
        path::{validate_path, PathRequest},
    },
    search::{
        one_pass_plus::{KspwloResult, OnePassPlus},
        parameters::KspwloParameters,
    },
    utility::{get_progressbar, random_request},
};
use rand::{rngs::StdRng, SeedableRng};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;

#[derive(Serialize)]
struct TestCase {
    request: PathRequest,
    parameters: KspwloParameters,
    result: KspwloResult,
}

/// Generates `number_of_tests` random requests for the graph at `graph`,
/// answers and validates them in parallel and saves requests and results at
/// `test_cases`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph in `.gr` or `.bincode` format
    #[arg(short, long)]
    graph: PathBuf,
    #[arg(long, value_enum, default_value_t = IndexBase::Zero)]
    index_base: IndexBase,
    /// Path where the test cases will be saved
    #[arg(short, long)]
    test_cases: PathBuf,
    /// Number of tests to be generated
    #[arg(short, long, default_value = "1000")]
    number_of_tests: u32,
    #[arg(short, default_value = "3")]
    k: usize,
    #[arg(long, default_value = "0.5")]
    theta: f64,
    /// Stop a single search after creating this many labels
    #[arg(long, default_value = "1000000")]
    max_labels: usize,
    #[arg(long, default_value = "0")]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let graph = GraphFactory::from_file(&args.graph, args.index_base).unwrap();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let requests = (0..args.number_of_tests)
        .map_while(|_| random_request(&graph, &mut rng))
        .collect::<Vec<_>>();

    let mut parameters = KspwloParameters::new(args.k, args.theta);
    parameters.max_labels = Some(args.max_labels);
    let one_pass_plus = OnePassPlus::new(&graph, parameters).unwrap();

    let test_cases = requests
        .par_iter()
        .progress_with(get_progressbar("Answering requests", requests.len() as u64))
        .map(|request| {
            let result = one_pass_plus.run(request, None).unwrap();
            for path in result.paths.iter() {
                if let Err(err) = validate_path(&graph, request, path) {
                    panic!("invalid path for {:?}: {}", request, err);
                }
            }
            TestCase {
                request: *request,
                parameters: one_pass_plus.parameters().clone(),
                result,
            }
        })
        .collect::<Vec<_>>();

    let truncated = test_cases
        .iter()
        .filter(|test_case| test_case.result.statistics.truncated)
        .count();
    println!(
        "{} of {} searches hit the label limit",
        truncated,
        test_cases.len()
    );

    let writer = BufWriter::new(File::create(&args.test_cases).unwrap());
    serde_json::to_writer(writer, &test_cases).unwrap();
}
