use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;

use crate::graphs::{path::PathRequest, Graph};

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(
            "{msg} {wide_bar} {human_pos}/{human_len} {percent}% eta: {eta_precise}",
        )
        .expect("valid progress bar template"),
    );
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Draws a request with `source != target` uniformly at random. Returns
/// `None` if the graph has less than two vertices.
pub fn random_request(graph: &dyn Graph, rng: &mut impl Rng) -> Option<PathRequest> {
    if graph.number_of_vertices() <= 1 {
        return None;
    }

    // guarantee that source != target
    let source = rng.gen_range(0..graph.number_of_vertices());
    let mut target = rng.gen_range(0..graph.number_of_vertices() - 1);
    if target >= source {
        target += 1;
    }

    Some(PathRequest::new(source, target))
}
