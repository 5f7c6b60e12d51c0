//! Static circular layout for the mind graph diagram.

use std::f64::consts::PI;

use serde::Serialize;

use crate::note::MindGraph;

pub const CANVAS_WIDTH: f64 = 600.0;
pub const CANVAS_HEIGHT: f64 = 400.0;
const CENTER_X: f64 = 300.0;
const CENTER_Y: f64 = 200.0;
const RADIUS_X: f64 = 150.0;
const RADIUS_Y: f64 = 120.0;
const MIN_NODE_RADIUS: f64 = 5.0;
const MAX_NODE_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLink {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphLayout {
    pub nodes: Vec<PlacedNode>,
    pub links: Vec<PlacedLink>,
}

/// Place nodes evenly on an ellipse, in node order, starting at 3 o'clock.
///
/// Links whose source or target is not a node are skipped.
pub fn circular_layout(graph: &MindGraph) -> GraphLayout {
    let n = graph.nodes.len();
    let step = if n == 0 { 0.0 } else { 2.0 * PI / n as f64 };

    let nodes: Vec<PlacedNode> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let angle = i as f64 * step;
            PlacedNode {
                id: node.id.clone(),
                label: node.label.clone(),
                x: CENTER_X + angle.cos() * RADIUS_X,
                y: CENTER_Y + angle.sin() * RADIUS_Y,
                radius: node.val.clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS),
            }
        })
        .collect();

    let position = |id: &str| nodes.iter().find(|p| p.id == id).map(|p| (p.x, p.y));

    let links = graph
        .links
        .iter()
        .filter_map(|link| {
            let (x1, y1) = position(&link.source)?;
            let (x2, y2) = position(&link.target)?;
            Some(PlacedLink {
                x1,
                y1,
                x2,
                y2,
                width: link.value.max(0.0),
            })
        })
        .collect();

    GraphLayout { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{MindGraphLink, MindGraphNode};

    fn node(id: &str, val: f64) -> MindGraphNode {
        MindGraphNode {
            id: id.to_string(),
            label: id.to_uppercase(),
            val,
        }
    }

    fn link(source: &str, target: &str, value: f64) -> MindGraphLink {
        MindGraphLink {
            source: source.to_string(),
            target: target.to_string(),
            value,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_graph() {
        let layout = circular_layout(&MindGraph::default());
        assert!(layout.nodes.is_empty());
        assert!(layout.links.is_empty());
    }

    #[test]
    fn test_four_nodes_on_ellipse() {
        let graph = MindGraph {
            nodes: vec![node("a", 10.0), node("b", 10.0), node("c", 10.0), node("d", 10.0)],
            links: vec![],
        };
        let layout = circular_layout(&graph);
        let p: Vec<(f64, f64)> = layout.nodes.iter().map(|n| (n.x, n.y)).collect();

        assert!(close(p[0].0, 450.0) && close(p[0].1, 200.0));
        assert!(close(p[1].0, 300.0) && close(p[1].1, 320.0));
        assert!(close(p[2].0, 150.0) && close(p[2].1, 200.0));
        assert!(close(p[3].0, 300.0) && close(p[3].1, 80.0));
        assert_eq!(layout.nodes[0].label, "A");
    }

    #[test]
    fn test_node_radius_clamped() {
        let graph = MindGraph {
            nodes: vec![node("a", 0.0), node("b", 12.0), node("c", 99.0)],
            links: vec![],
        };
        let radii: Vec<f64> = circular_layout(&graph).nodes.iter().map(|n| n.radius).collect();
        assert_eq!(radii, vec![5.0, 12.0, 20.0]);
    }

    #[test]
    fn test_links_connect_node_positions() {
        let graph = MindGraph {
            nodes: vec![node("a", 10.0), node("b", 10.0)],
            links: vec![link("a", "b", 3.0), link("a", "ghost", 1.0)],
        };
        let layout = circular_layout(&graph);
        assert_eq!(layout.links.len(), 1);

        let l = &layout.links[0];
        assert!(close(l.x1, layout.nodes[0].x) && close(l.y1, layout.nodes[0].y));
        assert!(close(l.x2, layout.nodes[1].x) && close(l.y2, layout.nodes[1].y));
        assert_eq!(l.width, 3.0);
    }

    #[test]
    fn test_nodes_inside_canvas() {
        let graph = MindGraph {
            nodes: (0..15).map(|i| node(&i.to_string(), 10.0)).collect(),
            links: vec![],
        };
        for n in circular_layout(&graph).nodes {
            assert!(n.x >= 0.0 && n.x <= CANVAS_WIDTH);
            assert!(n.y >= 0.0 && n.y <= CANVAS_HEIGHT);
        }
    }
}
