//! Per-load layout cache.
//!
//! The store keeps exactly one layout: the one for the room graph it last
//! saw. Positions are never patched in place; when the graph (or start room)
//! changes, the old layout is discarded and recomputed from scratch.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::LayoutError;
use crate::graph::RoomGraph;
use crate::layout::{Layout, LayoutEngine};

/// SHA-256 digest identifying a room graph, start room and strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GraphFingerprint([u8; 32]);

impl GraphFingerprint {
    /// Hashes rooms and exits in canonical order, so two graphs built in a
    /// different insertion order fingerprint the same.
    pub fn compute(graph: &RoomGraph, start: &str, engine: &LayoutEngine) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(engine.kind().as_str().as_bytes());
        hasher.update([0]);
        hasher.update(start.as_bytes());
        hasher.update([0]);

        for room in graph.rooms() {
            hasher.update(room.id().as_str().as_bytes());
            hasher.update([0]);
            for (direction, target) in room.exits() {
                hasher.update(direction.as_ref().as_bytes());
                hasher.update([b'=']);
                hasher.update(target.as_str().as_bytes());
                hasher.update([0]);
            }
            hasher.update([0xff]);
        }

        Self(hasher.finalize().into())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Layout cache keyed by graph fingerprint.
#[derive(Debug)]
pub struct LayoutStore {
    engine: LayoutEngine,
    cached: Option<(GraphFingerprint, Layout)>,
    computations: usize,
}

impl LayoutStore {
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            cached: None,
            computations: 0,
        }
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Returns the layout for `graph`, recomputing only if the graph or
    /// start room differs from the cached one.
    pub fn refresh(&mut self, graph: &RoomGraph, start: &str) -> Result<&Layout, LayoutError> {
        let fingerprint = GraphFingerprint::compute(graph, start, &self.engine);

        let entry = match self.cached.take() {
            Some((cached, layout)) if cached == fingerprint => (cached, layout),
            _ => {
                debug!(fingerprint = %fingerprint.to_hex(), "room graph changed, recomputing layout");
                let layout = self.engine.layout(graph, start)?;
                self.computations += 1;
                (fingerprint, layout)
            }
        };

        Ok(&self.cached.insert(entry).1)
    }

    /// The cached layout, if any.
    pub fn current(&self) -> Option<&Layout> {
        self.cached.as_ref().map(|(_, layout)| layout)
    }

    pub fn fingerprint(&self) -> Option<GraphFingerprint> {
        self.cached.as_ref().map(|(fingerprint, _)| *fingerprint)
    }

    /// Drops the cached layout; the next refresh recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of layouts computed since the store was created.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::graph::Direction;

    fn store() -> LayoutStore {
        LayoutStore::new(LayoutEngine::new(LayoutConfig::default()).unwrap())
    }

    fn graph() -> RoomGraph {
        let mut graph = RoomGraph::new();
        graph.connect_both("a", Direction::East, "b");
        graph
    }

    #[test]
    fn unchanged_graph_hits_cache() {
        let mut store = store();
        let graph = graph();

        let first = store.refresh(&graph, "a").unwrap().clone();
        let second = store.refresh(&graph, "a").unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(store.computations(), 1);
    }

    #[test]
    fn changed_graph_recomputes() {
        let mut store = store();
        let mut graph = graph();
        store.refresh(&graph, "a").unwrap();

        graph.connect_both("b", Direction::North, "c");
        let layout = store.refresh(&graph, "a").unwrap();
        assert!(layout.contains("c"));
        assert_eq!(store.computations(), 2);
    }

    #[test]
    fn changed_start_recomputes() {
        let mut store = store();
        let graph = graph();
        store.refresh(&graph, "a").unwrap();
        store.refresh(&graph, "b").unwrap();
        assert_eq!(store.computations(), 2);
        assert_eq!(store.current().unwrap().start().as_str(), "b");
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut store = store();
        let graph = graph();
        store.refresh(&graph, "a").unwrap();
        store.invalidate();
        assert!(store.current().is_none());
        store.refresh(&graph, "a").unwrap();
        assert_eq!(store.computations(), 2);
    }

    #[test]
    fn failed_refresh_leaves_store_empty() {
        let mut store = store();
        let graph = graph();
        store.refresh(&graph, "a").unwrap();
        assert!(store.refresh(&graph, "nowhere").is_err());
        assert!(store.current().is_none());
    }

    #[test]
    fn insertion_order_does_not_change_fingerprint() {
        let engine = LayoutEngine::new(LayoutConfig::default()).unwrap();
        let mut forward = RoomGraph::new();
        forward.connect_both("a", Direction::East, "b");
        forward.connect_both("b", Direction::North, "c");
        let mut backward = RoomGraph::new();
        backward.connect_both("b", Direction::North, "c");
        backward.connect_both("a", Direction::East, "b");

        assert_eq!(
            GraphFingerprint::compute(&forward, "a", &engine),
            GraphFingerprint::compute(&backward, "a", &engine)
        );
        assert_eq!(GraphFingerprint::compute(&forward, "a", &engine).to_hex().len(), 64);
    }
}
