use std::rc::Rc;

use crate::graphs::{
    edge::{DirectedEdge, DirectedWeightedEdge},
    path::Path,
    Distance, VertexId, Weight,
};

/// Node of the search tree built by the label setting search.
///
/// Every label points to the label it was expanded from. Many labels share
/// the same ancestors, a label lives as long as a queue entry or one of its
/// descendants refers to it.
#[derive(Debug)]
pub struct Label {
    vertex: VertexId,
    weight: Distance,
    key: Distance,
    parent: Option<Rc<Label>>,
    edge_weight: Weight,
    overlaps: Vec<Distance>,
}

impl Label {
    pub fn root(vertex: VertexId, lower_bound: Distance) -> Rc<Label> {
        Rc::new(Label {
            vertex,
            weight: 0,
            key: lower_bound,
            parent: None,
            edge_weight: 0,
            overlaps: Vec::new(),
        })
    }

    /// Extends `parent` along `edge`. `overlaps[i]` is the weight the
    /// extended partial path shares with the i-th accepted path.
    pub fn child(
        parent: &Rc<Label>,
        edge: &DirectedWeightedEdge,
        lower_bound: Distance,
        overlaps: Vec<Distance>,
    ) -> Rc<Label> {
        debug_assert_eq!(parent.vertex, edge.tail());
        let weight = parent.weight + edge.weight() as Distance;
        Rc::new(Label {
            vertex: edge.head(),
            weight,
            key: weight + lower_bound,
            parent: Some(Rc::clone(parent)),
            edge_weight: edge.weight(),
            overlaps,
        })
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// Weight of the partial path from the root to this label.
    pub fn weight(&self) -> Distance {
        self.weight
    }

    /// Weight plus the lower bound towards the target.
    pub fn key(&self) -> Distance {
        self.key
    }

    pub fn parent(&self) -> Option<&Rc<Label>> {
        self.parent.as_ref()
    }

    /// Overlaps with the accepted paths known when the label was created.
    pub fn overlaps(&self) -> &[Distance] {
        &self.overlaps
    }

    /// This label followed by its parent, grandparent and so on up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &Label> {
        std::iter::successors(Some(self), |label| label.parent.as_deref())
    }

    /// Edges of the partial path, starting with the last one.
    pub fn edges_reversed(&self) -> impl Iterator<Item = DirectedWeightedEdge> + '_ {
        self.ancestors().filter_map(|label| {
            let parent = label.parent.as_ref()?;
            Some(DirectedWeightedEdge::new(
                parent.vertex,
                label.vertex,
                label.edge_weight,
            ))
        })
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.ancestors().any(|label| label.vertex == vertex)
    }

    /// Weight the partial path shares with `path`.
    pub fn overlap_with(&self, path: &Path) -> Distance {
        self.edges_reversed()
            .filter_map(|edge| {
                let path_weight = path.edge_weight(&DirectedEdge::new(edge.tail(), edge.head()))?;
                Some(edge.weight().min(path_weight) as Distance)
            })
            .sum()
    }

    pub fn root_vertex(&self) -> VertexId {
        self.ancestors()
            .last()
            .map_or(self.vertex, |root| root.vertex)
    }

    pub fn get_path(&self) -> Path {
        let mut edges = self.edges_reversed().collect::<Vec<_>>();
        edges.reverse();
        Path::from_edges(self.root_vertex(), edges)
    }
}

// Dropping a long chain recursively may overflow the stack.
impl Drop for Label {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(label) = parent {
            match Rc::try_unwrap(label) {
                Ok(mut label) => parent = label.parent.take(),
                Err(_) => break,
            }
        }
    }
}
