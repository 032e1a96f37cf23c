//! SVG mini-map.
//!
//! Room coordinates are already percentages, so the drawing uses a
//! `0 0 100 100` view box and scales to any pixel size.

use map_core::{MapRenderer, MapView};

#[derive(Clone, Debug)]
pub struct SvgRenderer {
    /// Rendered width and height in pixels.
    pub size: u32,
    pub node_radius: f64,
    pub show_labels: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            size: 400,
            node_radius: 2.2,
            show_labels: true,
        }
    }
}

const STYLE: &str = "\
.edge{stroke:#8a7f6a;stroke-width:0.6}\
.edge.vertical{stroke-dasharray:1.2 0.8}\
.room{fill:#3b3428;stroke:#d9c9a3;stroke-width:0.4}\
.room.visited{fill:#6b5b3e}\
.room.current{fill:#e0b44c;stroke:#fff6d5}\
.label{font:2.6px sans-serif;fill:#d9c9a3;text-anchor:middle}";

impl MapRenderer for SvgRenderer {
    type Output = String;

    fn render(&self, view: &MapView) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\" width=\"{0}\" height=\"{0}\">\n<style>{STYLE}</style>\n",
            self.size
        );

        for edge in &view.edges {
            let class = if edge.is_vertical() { "edge vertical" } else { "edge" };
            out.push_str(&format!(
                "<line class=\"{class}\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
                edge.from_point.x, edge.from_point.y, edge.to_point.x, edge.to_point.y
            ));
        }

        for node in &view.nodes {
            let mut class = String::from("room");
            if node.visited {
                class.push_str(" visited");
            }
            if node.current {
                class.push_str(" current");
            }
            let label = escape(&node.label);
            out.push_str(&format!(
                "<circle class=\"{class}\" data-room=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\"><title>{label}</title></circle>\n",
                escape(node.id.as_str()),
                node.point.x,
                node.point.y,
                self.node_radius
            ));
            if self.show_labels {
                out.push_str(&format!(
                    "<text class=\"label\" x=\"{:.2}\" y=\"{:.2}\">{label}</text>\n",
                    node.point.x,
                    node.point.y + self.node_radius + 3.0
                ));
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use map_core::{Direction, EdgeView, NodeView, Point, RoomId};

    use super::*;

    #[test]
    fn renders_rooms_edges_and_current_marker() {
        let hall = NodeView {
            id: RoomId::new("hall"),
            label: "Hall <East>".into(),
            point: Point::new(40.0, 50.0),
            current: true,
            visited: true,
        };
        let stairs = NodeView {
            id: RoomId::new("stairs"),
            label: "Stairs".into(),
            point: Point::new(60.0, 50.0),
            current: false,
            visited: false,
        };
        let view = MapView {
            edges: vec![EdgeView {
                from: hall.id.clone(),
                to: stairs.id.clone(),
                from_point: hall.point,
                to_point: stairs.point,
                direction: Direction::Down,
            }],
            nodes: vec![hall, stairs],
        };

        let svg = SvgRenderer::default().render(&view);
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"<line class="edge vertical" x1="40.00" y1="50.00" x2="60.00" y2="50.00"/>"#));
        assert!(svg.contains(r#"class="room visited current" data-room="hall""#));
        assert!(svg.contains("Hall &lt;East&gt;"));
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn labels_can_be_hidden() {
        let view = MapView {
            nodes: vec![NodeView {
                id: RoomId::new("a"),
                label: "A".into(),
                point: Point::CENTER,
                current: false,
                visited: false,
            }],
            edges: Vec::new(),
        };
        let renderer = SvgRenderer {
            show_labels: false,
            ..SvgRenderer::default()
        };
        assert!(!renderer.render(&view).contains("<text"));
    }
}
