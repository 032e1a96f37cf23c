//! Room graph: rooms keyed by identifier, exits keyed by direction.
//!
//! The graph is read-only input to the layout strategies. It tolerates
//! everything hand-authored room data tends to contain: one-way exits,
//! cycles, self-loops and exits naming rooms that do not exist
//! ("dangling" exits). None of these are errors here; the traversal simply
//! never positions a room it cannot reach.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::geometry::GridOffset;

/// Identifier of a room, as authored in the room data (`jungleClearing`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label derived from the identifier.
    ///
    /// Splits camelCase, `snake_case` and `kebab-case` into title-cased
    /// words: `hallOfStatues` becomes `Hall Of Statues`.
    pub fn display_name(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 4);
        let mut word_start = true;

        for ch in self.0.chars() {
            if ch == '_' || ch == '-' || ch.is_whitespace() {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                word_start = true;
                continue;
            }

            if ch.is_uppercase() && !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
                word_start = true;
            }

            if word_start {
                out.extend(ch.to_uppercase());
                word_start = false;
            } else {
                out.push(ch);
            }
        }

        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoomId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Exit direction between two rooms.
///
/// Declaration order is the canonical iteration order used by every
/// traversal: north, south, east, west, up, down.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Axis step taken when following an exit in this direction.
    ///
    /// North and up decrement their axis, south and down increment it;
    /// east increments and west decrements the east-west axis.
    pub const fn delta(self) -> GridOffset {
        match self {
            Direction::North => GridOffset::new(-1, 0, 0),
            Direction::South => GridOffset::new(1, 0, 0),
            Direction::East => GridOffset::new(0, 1, 0),
            Direction::West => GridOffset::new(0, -1, 0),
            Direction::Up => GridOffset::new(0, 0, -1),
            Direction::Down => GridOffset::new(0, 0, 1),
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(ParseError::UnknownDirection(s.to_owned())),
        }
    }
}

/// A single room: its identifier, an optional display name and its exits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    id: RoomId,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    exits: BTreeMap<Direction, RoomId>,
}

impl Room {
    pub fn new(id: impl Into<RoomId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            exits: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_exit(mut self, direction: Direction, target: impl Into<RoomId>) -> Self {
        self.exits.insert(direction, target.into());
        self
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Authored name if present, otherwise [`RoomId::display_name`].
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.id.display_name())
    }

    pub fn exit(&self, direction: Direction) -> Option<&RoomId> {
        self.exits.get(&direction)
    }

    /// Exits in canonical direction order.
    pub fn exits(&self) -> impl Iterator<Item = (Direction, &RoomId)> {
        self.exits.iter().map(|(dir, target)| (*dir, target))
    }

    pub fn set_exit(&mut self, direction: Direction, target: impl Into<RoomId>) -> Option<RoomId> {
        self.exits.insert(direction, target.into())
    }
}

/// An exit whose target room does not exist in the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DanglingExit {
    pub from: RoomId,
    pub direction: Direction,
    pub target: RoomId,
}

/// Undirected connection between two existing rooms.
///
/// `a` always sorts before `b`; `direction` is the exit direction as seen
/// from `a` when the exit exists on that side, otherwise the opposite of
/// `b`'s exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub a: RoomId,
    pub b: RoomId,
    pub direction: Direction,
}

/// Directed room graph keyed by room identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomGraph {
    rooms: BTreeMap<RoomId, Room>,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a room, replacing (and returning) any room with the same id.
    pub fn insert(&mut self, room: Room) -> Option<Room> {
        self.rooms.insert(room.id.clone(), room)
    }

    #[must_use]
    pub fn with_room(mut self, room: Room) -> Self {
        self.insert(room);
        self
    }

    /// Adds a one-way exit, creating either room if it does not exist yet.
    pub fn connect(&mut self, from: impl Into<RoomId>, direction: Direction, to: impl Into<RoomId>) {
        let from = from.into();
        let to = to.into();
        self.ensure_room(&to);
        self.rooms
            .entry(from.clone())
            .or_insert_with(|| Room::new(from))
            .set_exit(direction, to);
    }

    /// Adds an exit and its opposite back-reference.
    pub fn connect_both(&mut self, a: impl Into<RoomId>, direction: Direction, b: impl Into<RoomId>) {
        let a = a.into();
        let b = b.into();
        self.connect(a.clone(), direction, b.clone());
        self.connect(b, direction.opposite(), a);
    }

    fn ensure_room(&mut self, id: &RoomId) {
        if !self.rooms.contains_key(id) {
            self.rooms.insert(id.clone(), Room::new(id.clone()));
        }
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in identifier order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn exit(&self, id: &str, direction: Direction) -> Option<&RoomId> {
        self.room(id).and_then(|room| room.exit(direction))
    }

    /// Exits of `id` whose targets exist, in canonical direction order.
    pub fn neighbors<'a>(
        &'a self,
        id: &str,
    ) -> impl Iterator<Item = (Direction, &'a RoomId)> + use<'a> {
        self.room(id)
            .into_iter()
            .flat_map(|room| room.exits())
            .filter(|(_, target)| self.contains(target.as_str()))
    }

    /// Exits pointing at rooms that are missing from the graph.
    pub fn dangling_exits(&self) -> Vec<DanglingExit> {
        self.rooms
            .values()
            .flat_map(|room| {
                room.exits()
                    .filter(|(_, target)| !self.contains(target.as_str()))
                    .map(|(direction, target)| DanglingExit {
                        from: room.id.clone(),
                        direction,
                        target: target.clone(),
                    })
            })
            .collect()
    }

    /// De-duplicated undirected connections between existing rooms.
    ///
    /// A bidirectional exit pair yields one connection; self-loops are
    /// dropped.
    pub fn connections(&self) -> Vec<Connection> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();

        for room in self.rooms.values() {
            for (direction, target) in self.neighbors(room.id.as_str()) {
                if *target == room.id {
                    continue;
                }
                let (a, b, direction) = if room.id < *target {
                    (room.id.clone(), target.clone(), direction)
                } else {
                    (target.clone(), room.id.clone(), direction.opposite())
                };
                if seen.insert((a.clone(), b.clone())) {
                    out.push(Connection { a, b, direction });
                }
            }
        }

        out
    }
}

impl FromIterator<Room> for RoomGraph {
    fn from_iter<I: IntoIterator<Item = Room>>(iter: I) -> Self {
        let mut graph = RoomGraph::new();
        for room in iter {
            graph.insert(room);
        }
        graph
    }
}
