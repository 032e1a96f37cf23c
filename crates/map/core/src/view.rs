//! Render boundary: plain view records handed to a drawing collaborator.
//!
//! The layout core never draws. A front end keeps an [`Exploration`] (where
//! the player is, what they have seen), builds a [`MapView`] from it and the
//! current [`Layout`], and passes that to whatever [`MapRenderer`] it uses.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::geometry::Point;
use crate::graph::{Direction, RoomGraph, RoomId};
use crate::layout::Layout;

/// Which rooms a map view shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Reveal {
    /// Every positioned room.
    #[default]
    All,
    /// Only rooms the player has entered.
    Visited,
}

impl fmt::Display for Reveal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reveal::All => "all",
            Reveal::Visited => "visited",
        })
    }
}

impl FromStr for Reveal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Reveal::All),
            "visited" => Ok(Reveal::Visited),
            _ => Err(ParseError::UnknownReveal(s.to_owned())),
        }
    }
}

/// Player exploration state, owned by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exploration {
    current: Option<RoomId>,
    visited: BTreeSet<RoomId>,
    reveal: Reveal,
}

impl Exploration {
    pub fn new(reveal: Reveal) -> Self {
        Self {
            reveal,
            ..Self::default()
        }
    }

    /// Moves the player into `room` and marks it visited.
    pub fn enter(&mut self, room: impl Into<RoomId>) {
        let room = room.into();
        self.visited.insert(room.clone());
        self.current = Some(room);
    }

    /// Marks `room` visited without moving the player.
    pub fn mark_visited(&mut self, room: impl Into<RoomId>) {
        self.visited.insert(room.into());
    }

    pub fn current(&self) -> Option<&RoomId> {
        self.current.as_ref()
    }

    pub fn has_visited(&self, room: &str) -> bool {
        self.visited.contains(room)
    }

    pub fn visited(&self) -> impl Iterator<Item = &RoomId> {
        self.visited.iter()
    }

    pub fn reveal(&self) -> Reveal {
        self.reveal
    }

    pub fn is_revealed(&self, room: &str) -> bool {
        match self.reveal {
            Reveal::All => true,
            Reveal::Visited => {
                self.has_visited(room) || self.current.as_ref().is_some_and(|c| c.as_str() == room)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeView {
    pub id: RoomId,
    pub label: String,
    pub point: Point,
    pub current: bool,
    pub visited: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeView {
    pub from: RoomId,
    pub to: RoomId,
    pub from_point: Point,
    pub to_point: Point,
    pub direction: Direction,
}

impl EdgeView {
    /// Up/down connections, usually drawn dashed.
    pub fn is_vertical(&self) -> bool {
        self.direction.is_vertical()
    }
}

/// Everything a renderer needs to draw the mini-map.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl MapView {
    /// Collects revealed, positioned rooms and the connections between them.
    ///
    /// Rooms without a position (unreachable from the layout's start) are
    /// left out, as are edges touching them.
    pub fn build(graph: &RoomGraph, layout: &Layout, exploration: &Exploration) -> Self {
        let shown: BTreeMap<&RoomId, Point> = layout
            .iter()
            .filter(|(id, _)| exploration.is_revealed(id.as_str()))
            .collect();

        let nodes = shown
            .iter()
            .map(|(id, point)| NodeView {
                id: (*id).clone(),
                label: graph
                    .room(id.as_str())
                    .map_or_else(|| id.display_name(), |room| room.label()),
                point: *point,
                current: exploration.current() == Some(*id),
                visited: exploration.has_visited(id.as_str()),
            })
            .collect();

        let edges = graph
            .connections()
            .into_iter()
            .filter_map(|connection| {
                let from_point = *shown.get(&connection.a)?;
                let to_point = *shown.get(&connection.b)?;
                Some(EdgeView {
                    from: connection.a,
                    to: connection.b,
                    from_point,
                    to_point,
                    direction: connection.direction,
                })
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|node| node.id.as_str() == id)
    }

    pub fn current(&self) -> Option<&NodeView> {
        self.nodes.iter().find(|node| node.current)
    }
}

/// Drawing collaborator for a [`MapView`].
pub trait MapRenderer {
    type Output;

    fn render(&self, view: &MapView) -> Self::Output;
}
