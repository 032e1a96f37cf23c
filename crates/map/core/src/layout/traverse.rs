//! Single-source traversals assigning 3-axis offsets to reachable rooms.
//!
//! Both traversals follow exits in canonical direction order, skip exits
//! whose target is missing from the graph, and guard against revisiting with
//! a visited set, so cyclic graphs terminate. Neither recurses; large graphs
//! cannot exhaust the call stack.

use std::collections::{HashSet, VecDeque};

use crate::error::LayoutError;
use crate::geometry::GridOffset;
use crate::graph::{RoomGraph, RoomId};

/// A room reached by a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visit {
    pub room: RoomId,
    pub offset: GridOffset,
    /// Number of exits followed from the start room.
    pub depth: usize,
}

/// Depth-first, first-visit-wins offsets in discovery order.
///
/// Reproduces recursive pre-order exactly: a room's offset is fixed by
/// whichever path reaches it first, which is not necessarily the shortest.
/// Children are pushed in reverse direction order and the visited check
/// happens on pop, matching the point at which a recursive call would
/// check it.
pub fn depth_first(graph: &RoomGraph, start: &str) -> Result<Vec<Visit>, LayoutError> {
    let start = start_room(graph, start)?;

    let mut visited: HashSet<&RoomId> = HashSet::with_capacity(graph.len());
    let mut order = Vec::with_capacity(graph.len());
    let mut stack = vec![(start, GridOffset::ORIGIN, 0usize)];

    while let Some((room, offset, depth)) = stack.pop() {
        if !visited.insert(room) {
            continue;
        }
        order.push(Visit {
            room: room.clone(),
            offset,
            depth,
        });

        let children: Vec<_> = graph.neighbors(room.as_str()).collect();
        for (direction, target) in children.into_iter().rev() {
            if !visited.contains(target) {
                stack.push((target, offset + direction.delta(), depth + 1));
            }
        }
    }

    Ok(order)
}

/// Breadth-first offsets in discovery order.
///
/// Every room receives the offset of a shortest (fewest exits) path; ties
/// are broken by direction order.
pub fn breadth_first(graph: &RoomGraph, start: &str) -> Result<Vec<Visit>, LayoutError> {
    let start = start_room(graph, start)?;

    let mut visited: HashSet<&RoomId> = HashSet::with_capacity(graph.len());
    let mut order = Vec::with_capacity(graph.len());
    let mut queue = VecDeque::from([(start, GridOffset::ORIGIN, 0usize)]);
    visited.insert(start);

    while let Some((room, offset, depth)) = queue.pop_front() {
        order.push(Visit {
            room: room.clone(),
            offset,
            depth,
        });

        for (direction, target) in graph.neighbors(room.as_str()) {
            if visited.insert(target) {
                queue.push_back((target, offset + direction.delta(), depth + 1));
            }
        }
    }

    Ok(order)
}

/// Rooms in the graph that no traversal from `start` reaches.
pub fn unreachable(graph: &RoomGraph, start: &str) -> Result<Vec<RoomId>, LayoutError> {
    let reached: HashSet<RoomId> = breadth_first(graph, start)?
        .into_iter()
        .map(|visit| visit.room)
        .collect();

    Ok(graph
        .rooms()
        .map(|room| room.id())
        .filter(|id| !reached.contains(*id))
        .cloned()
        .collect())
}

fn start_room<'a>(graph: &'a RoomGraph, start: &str) -> Result<&'a RoomId, LayoutError> {
    graph
        .room(start)
        .map(|room| room.id())
        .ok_or_else(|| LayoutError::UnknownStart(RoomId::new(start)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Direction, Room};

    fn offsets(visits: &[Visit]) -> Vec<(&str, GridOffset)> {
        visits
            .iter()
            .map(|visit| (visit.room.as_str(), visit.offset))
            .collect()
    }

    #[test]
    fn unknown_start_is_an_error() {
        let graph = RoomGraph::new().with_room(Room::new("a"));
        assert_eq!(
            depth_first(&graph, "b"),
            Err(LayoutError::UnknownStart(RoomId::new("b")))
        );
    }

    #[test]
    fn depth_first_follows_direction_order() {
        let mut graph = RoomGraph::new();
        graph.connect_both("hub", Direction::West, "w");
        graph.connect_both("hub", Direction::North, "n");
        graph.connect_both("hub", Direction::Down, "cellar");
        graph.connect_both("n", Direction::East, "ne");

        let visits = depth_first(&graph, "hub").unwrap();
        assert_eq!(
            offsets(&visits),
            vec![
                ("hub", GridOffset::new(0, 0, 0)),
                ("n", GridOffset::new(-1, 0, 0)),
                ("ne", GridOffset::new(-1, 1, 0)),
                ("w", GridOffset::new(0, -1, 0)),
                ("cellar", GridOffset::new(0, 0, 1)),
            ]
        );
        assert_eq!(visits[2].depth, 2);
    }

    #[test]
    fn depth_first_keeps_first_path_not_shortest() {
        // start -> north -> a -> east -> b, and start -> east -> b directly.
        // North is explored first, so b is fixed via the longer path.
        let mut graph = RoomGraph::new();
        graph.connect("start", Direction::North, "a");
        graph.connect("a", Direction::East, "b");
        graph.connect("start", Direction::East, "b");

        let dfs = depth_first(&graph, "start").unwrap();
        let b = dfs.iter().find(|v| v.room.as_str() == "b").unwrap();
        assert_eq!(b.offset, GridOffset::new(-1, 1, 0));
        assert_eq!(b.depth, 2);

        let bfs = breadth_first(&graph, "start").unwrap();
        let b = bfs.iter().find(|v| v.room.as_str() == "b").unwrap();
        assert_eq!(b.offset, GridOffset::new(0, 1, 0));
        assert_eq!(b.depth, 1);
    }

    #[test]
    fn cycles_terminate_with_one_visit_each() {
        let mut graph = RoomGraph::new();
        graph.connect_both("a", Direction::East, "b");
        graph.connect_both("b", Direction::North, "c");
        graph.connect_both("c", Direction::West, "a");

        for visits in [depth_first(&graph, "a").unwrap(), breadth_first(&graph, "a").unwrap()] {
            let mut names: Vec<_> = visits.iter().map(|v| v.room.as_str()).collect();
            names.sort_unstable();
            assert_eq!(names, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn unreachable_and_dangling_rooms_are_skipped() {
        let graph = RoomGraph::new()
            .with_room(Room::new("a").with_exit(Direction::East, "b").with_exit(Direction::Up, "ghost"))
            .with_room(Room::new("b"))
            .with_room(Room::new("island"));

        let visits = depth_first(&graph, "a").unwrap();
        assert_eq!(visits.len(), 2);
        assert_eq!(unreachable(&graph, "a").unwrap(), vec![RoomId::new("island")]);
    }
}
