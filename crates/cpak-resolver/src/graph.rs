//! Dependency edges between package coordinates.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use cpak_core::coordinate::Coordinate;

/// The mutable store of dependency edges discovered during resolution.
///
/// Forward lookups (what a coordinate depends on) and backward lookups
/// (what depends on a coordinate) are the two directions over the same
/// recorded edge, so the views can never fall out of sync.
pub struct DependencyGraph {
    graph: DiGraph<Coordinate, ()>,
    /// Lookup from canonical coordinate string to node index.
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    fn ensure_node(&mut self, coordinate: &Coordinate) -> NodeIndex {
        let key = coordinate.to_string();
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(coordinate.clone());
        self.index.insert(key, idx);
        idx
    }

    /// Record that `from` depends on `to`.
    ///
    /// Repeated pairs are stored as-is; callers are responsible for not
    /// recording semantically duplicate edges.
    pub fn add_dependency(&mut self, from: &Coordinate, to: &Coordinate) {
        let from = self.ensure_node(from);
        let to = self.ensure_node(to);
        self.graph.add_edge(from, to, ());
    }

    /// Direct dependencies of a coordinate, in the order they were recorded.
    pub fn dependencies_of(&self, coordinate: &Coordinate) -> Vec<&Coordinate> {
        self.neighbors(coordinate, Direction::Outgoing)
    }

    /// Direct dependents of a coordinate (reverse edges).
    pub fn dependents_of(&self, coordinate: &Coordinate) -> Vec<&Coordinate> {
        self.neighbors(coordinate, Direction::Incoming)
    }

    fn neighbors(&self, coordinate: &Coordinate, direction: Direction) -> Vec<&Coordinate> {
        let Some(&idx) = self.index.get(&coordinate.to_string()) else {
            return Vec::new();
        };
        let mut found: Vec<&Coordinate> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                &self.graph[other]
            })
            .collect();
        // petgraph iterates edges newest-first
        found.reverse();
        found
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(s: &str) -> Coordinate {
        Coordinate::parse(s).unwrap()
    }

    #[test]
    fn forward_and_backward_views_mirror() {
        let mut g = DependencyGraph::new();
        let libpng = coord("g:libpng:1.6.0");
        let zlib = coord("g:zlib:1.2.11");
        g.add_dependency(&libpng, &zlib);

        assert_eq!(g.dependencies_of(&libpng), vec![&zlib]);
        assert_eq!(g.dependents_of(&zlib), vec![&libpng]);
        assert!(g.dependencies_of(&zlib).is_empty());
        assert!(g.dependents_of(&libpng).is_empty());
    }

    #[test]
    fn duplicate_edges_are_kept() {
        let mut g = DependencyGraph::new();
        let a = coord("g:a:1.0");
        let b = coord("g:b:1.0");
        g.add_dependency(&a, &b);
        g.add_dependency(&a, &b);
        assert_eq!(g.dependencies_of(&a).len(), 2);
    }

    #[test]
    fn recorded_order_is_preserved() {
        let mut g = DependencyGraph::new();
        let a = coord("g:a:1.0");
        let b = coord("g:b:1.0");
        let c = coord("g:c:1.0");
        g.add_dependency(&a, &b);
        g.add_dependency(&a, &c);
        assert_eq!(g.dependencies_of(&a), vec![&b, &c]);
    }

    #[test]
    fn unknown_coordinate_has_no_edges() {
        let g = DependencyGraph::new();
        assert!(g.dependencies_of(&coord("g:missing:1.0")).is_empty());
    }
}
