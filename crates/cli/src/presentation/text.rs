//! Character-grid mini-map.

use console::style;
use map_core::{MapRenderer, MapView, Point};

const CURRENT_MARKER: char = '@';
const MARKERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Draws the map on a fixed character grid followed by a legend.
///
/// The current room is `@`; other rooms get a letter from the legend.
/// Up/down connections are dotted (`:`).
#[derive(Clone, Debug)]
pub struct TextRenderer {
    pub columns: usize,
    pub rows: usize,
    /// Style the legend with terminal colors.
    pub colored: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            columns: 61,
            rows: 25,
            colored: false,
        }
    }
}

impl TextRenderer {
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn cell(&self, point: Point) -> (usize, usize) {
        let scale = |value: f64, cells: usize| {
            let max = cells.saturating_sub(1) as f64;
            (value.clamp(0.0, 100.0) / 100.0 * max).round() as usize
        };
        (scale(point.x, self.columns), scale(point.y, self.rows))
    }
}

impl MapRenderer for TextRenderer {
    type Output = String;

    fn render(&self, view: &MapView) -> String {
        let mut grid = vec![vec![' '; self.columns.max(1)]; self.rows.max(1)];

        for edge in &view.edges {
            let (c0, r0) = self.cell(edge.from_point);
            let (c1, r1) = self.cell(edge.to_point);
            let (dc, dr) = (c1 as i64 - c0 as i64, r1 as i64 - r0 as i64);
            let glyph = if edge.is_vertical() {
                ':'
            } else if dr.abs() * 2 < dc.abs() {
                '-'
            } else if dc.abs() * 2 < dr.abs() {
                '|'
            } else if (dc > 0) == (dr > 0) {
                '\\'
            } else {
                '/'
            };

            let steps = dc.abs().max(dr.abs());
            for step in 1..steps {
                let c = c0 as i64 + dc * step / steps;
                let r = r0 as i64 + dr * step / steps;
                grid[r as usize][c as usize] = glyph;
            }
        }

        let mut legend = Vec::with_capacity(view.nodes.len());
        for (index, node) in view.nodes.iter().enumerate() {
            let marker = if node.current {
                CURRENT_MARKER
            } else {
                MARKERS.get(index).map_or('#', |byte| char::from(*byte))
            };
            let (c, r) = self.cell(node.point);
            grid[r][c] = marker;

            let mut line = format!(
                "{marker} {} ({:.1}, {:.1})",
                node.label, node.point.x, node.point.y
            );
            if node.current {
                line.push_str(" <- you are here");
            }
            legend.push(if !self.colored {
                line
            } else if node.current {
                style(line).bold().green().to_string()
            } else if node.visited {
                style(line).cyan().to_string()
            } else {
                style(line).dim().to_string()
            });
        }

        let mut out = String::new();
        for row in grid {
            let line: String = row.into_iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out.push('\n');
        for line in legend {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use map_core::{EdgeView, Direction, NodeView, RoomId};

    use super::*;

    fn node(id: &str, x: f64, y: f64, current: bool) -> NodeView {
        NodeView {
            id: RoomId::new(id),
            label: RoomId::new(id).display_name(),
            point: Point::new(x, y),
            current,
            visited: current,
        }
    }

    fn edge(from: &NodeView, to: &NodeView, direction: Direction) -> EdgeView {
        EdgeView {
            from: from.id.clone(),
            to: to.id.clone(),
            from_point: from.point,
            to_point: to.point,
            direction,
        }
    }

    #[test]
    fn draws_rooms_and_corridor() {
        let west = node("westWing", 10.0, 50.0, true);
        let east = node("eastWing", 90.0, 50.0, false);
        let view = MapView {
            edges: vec![edge(&west, &east, Direction::East)],
            nodes: vec![west, east],
        };

        let out = TextRenderer::default().render(&view);
        let middle = out.lines().nth(12).unwrap();
        assert!(middle.contains("@-"), "{out}");
        assert!(middle.trim_end().ends_with("-B"), "{out}");
        assert!(out.contains("@ West Wing (10.0, 50.0) <- you are here"));
        assert!(out.contains("B East Wing (90.0, 50.0)"));
    }

    #[test]
    fn vertical_exits_are_dotted() {
        let cellar = node("cellar", 50.0, 80.0, false);
        let attic = node("attic", 50.0, 20.0, false);
        let view = MapView {
            edges: vec![edge(&cellar, &attic, Direction::Up)],
            nodes: vec![cellar, attic],
        };

        let out = TextRenderer::default().render(&view);
        assert!(out.contains(':'));
        assert!(!out.contains('|'));
    }
}
