use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
    path::Path,
    str::{FromStr, SplitWhitespace},
};

use clap::ValueEnum;
use log::info;

use super::{
    edge::DirectedWeightedEdge, error::GraphError, reversible_vec_graph::ReversibleVecGraph,
    Graph, VertexId, Weight,
};
use crate::utility::get_progressspinner;

/// How vertex ids are numbered in a graph file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum IndexBase {
    #[default]
    Zero,
    One,
}

impl IndexBase {
    fn offset(&self) -> u32 {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }
}

#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    /// Reads a graph, choosing the format by the file extension.
    pub fn from_file(path: &Path, index_base: IndexBase) -> Result<ReversibleVecGraph, GraphError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();
        match extension {
            "gr" => Self::from_gr_file(path, index_base),
            "bincode" => Self::from_bincode_file(path),
            _ => Err(GraphError::UnsupportedExtension(extension.to_string())),
        }
    }

    pub fn from_gr_file(path: &Path, index_base: IndexBase) -> Result<ReversibleVecGraph, GraphError> {
        let spinner = get_progressspinner("Reading graph");
        let reader = BufReader::new(File::open(path)?);
        let graph = Self::from_gr_reader(reader, index_base)?;
        spinner.finish_and_clear();

        info!(
            "read graph with {} vertices and {} edges from {:?}",
            graph.number_of_vertices(),
            graph.number_of_edges(),
            path
        );
        Ok(graph)
    }

    pub fn from_gr_str(gr: &str, index_base: IndexBase) -> Result<ReversibleVecGraph, GraphError> {
        Self::from_gr_reader(gr.as_bytes(), index_base)
    }

    /// Parses the line based `.gr` format.
    ///
    /// ```text
    /// c comment
    /// p sp <number of vertices> <number of arcs>
    /// a <tail> <head> <weight>
    /// ```
    ///
    /// The header has to precede every arc and the number of arcs has to
    /// match the header.
    pub fn from_gr_reader(
        reader: impl BufRead,
        index_base: IndexBase,
    ) -> Result<ReversibleVecGraph, GraphError> {
        let mut header: Option<(u32, usize)> = None;
        let mut edges = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line?;
            let mut values = line.split_whitespace();

            match values.next() {
                None | Some("c") => continue,
                Some("p") => {
                    if header.is_some() {
                        return Err(GraphError::parse(line_number, "duplicate header"));
                    }
                    let problem = values.next().unwrap_or_default();
                    if problem != "sp" {
                        return Err(GraphError::parse(
                            line_number,
                            format!("unknown problem type {:?}", problem),
                        ));
                    }
                    let number_of_vertices = next_value(&mut values, line_number, "vertex count")?;
                    let number_of_edges: usize = next_value(&mut values, line_number, "arc count")?;
                    // the arc count is only checked once every arc is read
                    edges.reserve(number_of_edges.min(1 << 20));
                    header = Some((number_of_vertices, number_of_edges));
                }
                Some("a") => {
                    let Some((number_of_vertices, _)) = header else {
                        return Err(GraphError::parse(line_number, "arc before header"));
                    };
                    let tail = next_vertex(&mut values, line_number, "tail", index_base)?;
                    let head = next_vertex(&mut values, line_number, "head", index_base)?;
                    let weight: Weight = next_value(&mut values, line_number, "weight")?;

                    for vertex in [tail, head] {
                        if vertex >= number_of_vertices {
                            return Err(GraphError::parse(
                                line_number,
                                format!(
                                    "vertex {} out of range for {} vertices",
                                    vertex, number_of_vertices
                                ),
                            ));
                        }
                    }

                    edges.push(DirectedWeightedEdge::new(tail, head, weight));
                }
                Some(line_type) => {
                    return Err(GraphError::parse(
                        line_number,
                        format!("unknown line type {:?}", line_type),
                    ))
                }
            }
        }

        let Some((number_of_vertices, number_of_edges)) = header else {
            return Err(GraphError::parse(0, "missing header"));
        };
        if edges.len() != number_of_edges {
            return Err(GraphError::parse(
                0,
                format!(
                    "header declares {} arcs but {} were found",
                    number_of_edges,
                    edges.len()
                ),
            ));
        }

        ReversibleVecGraph::from_edges(number_of_vertices, &edges)
    }

    /// Reading a .bincode file is way faster than a .gr file.
    pub fn from_bincode_file(path: &Path) -> Result<ReversibleVecGraph, GraphError> {
        let spinner = get_progressspinner("Reading bincode graph");
        let reader = BufReader::new(File::open(path)?);
        let graph: ReversibleVecGraph = bincode::deserialize_from(reader)?;
        spinner.finish_and_clear();
        graph.validate()?;
        Ok(graph)
    }

    pub fn to_bincode_file(graph: &ReversibleVecGraph, path: &Path) -> Result<(), GraphError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, graph)?;
        Ok(())
    }

    /// Writes the graph in `.gr` format, the inverse of `from_gr_reader`.
    pub fn to_gr_string(graph: &dyn Graph, index_base: IndexBase) -> String {
        let offset = index_base.offset();
        let mut gr = format!(
            "p sp {} {}\n",
            graph.number_of_vertices(),
            graph.number_of_edges()
        );
        for edge in graph.vertices().flat_map(|vertex| graph.out_edges(vertex)) {
            gr.push_str(&format!(
                "a {} {} {}\n",
                edge.tail() + offset,
                edge.head() + offset,
                edge.weight()
            ));
        }
        gr
    }
}

fn next_value<T: FromStr>(
    values: &mut SplitWhitespace,
    line_number: usize,
    name: &str,
) -> Result<T, GraphError> {
    let value = values
        .next()
        .ok_or_else(|| GraphError::parse(line_number, format!("no {} found", name)))?;
    value.parse().map_err(|_| {
        GraphError::parse(
            line_number,
            format!("unable to parse {} from {:?}", name, value),
        )
    })
}

fn next_vertex(
    values: &mut SplitWhitespace,
    line_number: usize,
    name: &str,
    index_base: IndexBase,
) -> Result<VertexId, GraphError> {
    let vertex: VertexId = next_value(values, line_number, name)?;
    vertex.checked_sub(index_base.offset()).ok_or_else(|| {
        GraphError::parse(
            line_number,
            format!("{} {} is not a valid 1-based vertex id", name, vertex),
        )
    })
}
