//! Read-only snapshots published to the rendering layer.
//!
//! The simulation owns the live node array; after every completed step it
//! hands subscribers an owned [`LayoutFrame`], so a renderer can never
//! observe a half-updated position.

use super::graph::Graph;

/// Number of entries in the node color palette. Color indices published in
/// [`NodeView`] are always below this.
pub const PALETTE_SIZE: usize = 8;

/// Extra clickable margin around a node, in canvas pixels.
const HIT_SLOP: f64 = 6.0;

/// Floor opacity for a strength-1 edge.
const EDGE_OPACITY_BASE: f64 = 0.2;
/// Opacity gained per additional shared tag.
const EDGE_OPACITY_STEP: f64 = 0.15;
/// Opacity ceiling for heavily tagged pairs.
const EDGE_OPACITY_MAX: f64 = 0.85;

/// Renderable state of one document node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	/// Document id.
	pub id: String,
	/// Display title.
	pub title: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	/// Stable palette index derived from the id; always `< PALETTE_SIZE`.
	pub color_index: usize,
}

/// Renderable state of one relationship edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeView {
	pub source_id: String,
	pub target_id: String,
	/// Line opacity; grows with the number of shared tags, capped below 1.
	pub opacity: f64,
}

/// Complete snapshot of one simulation step.
#[derive(Clone, Debug, Default)]
pub struct LayoutFrame {
	pub nodes: Vec<NodeView>,
	pub edges: Vec<EdgeView>,
	/// Steps completed in the current run, this one included.
	pub iteration: u32,
	/// True once the run's iteration budget is exhausted.
	pub settled: bool,
}

impl LayoutFrame {
	/// Snapshot the graph as it stands after a completed step.
	pub fn capture(graph: &Graph, iteration: u32, settled: bool) -> Self {
		let nodes = graph
			.nodes
			.iter()
			.map(|node| NodeView {
				id: node.id.clone(),
				title: node.title.clone(),
				x: node.x,
				y: node.y,
				radius: node.radius,
				color_index: palette_index(&node.id),
			})
			.collect();
		let edges = graph
			.edges
			.iter()
			.map(|edge| EdgeView {
				source_id: graph.nodes[edge.source].id.clone(),
				target_id: graph.nodes[edge.target].id.clone(),
				opacity: edge_opacity(edge.strength),
			})
			.collect();
		Self {
			nodes,
			edges,
			iteration,
			settled,
		}
	}

	/// The topmost node whose disc (plus a small slop) covers the point.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&NodeView> {
		self.nodes.iter().rev().find(|node| {
			let (dx, dy) = (node.x - x, node.y - y);
			(dx * dx + dy * dy).sqrt() <= node.radius + HIT_SLOP
		})
	}
}

/// Stable palette index for a document id (FNV-1a over the id bytes).
pub fn palette_index(id: &str) -> usize {
	let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
	for byte in id.bytes() {
		hash ^= u64::from(byte);
		hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
	}
	(hash % PALETTE_SIZE as u64) as usize
}

/// Edge opacity as a non-decreasing function of strength.
fn edge_opacity(strength: usize) -> f64 {
	(EDGE_OPACITY_BASE + EDGE_OPACITY_STEP * (strength.saturating_sub(1)) as f64)
		.min(EDGE_OPACITY_MAX)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::super::document::Document;
	use super::super::graph::{Bounds, build_graph};
	use super::*;

	fn doc(id: &str, tags: &[&str]) -> Document {
		Document {
			id: id.into(),
			title: id.to_uppercase(),
			subjects: tags.iter().map(|t| t.to_string()).collect(),
			..Document::default()
		}
	}

	#[test]
	fn palette_index_is_stable_and_in_range() {
		for id in ["doc-1", "doc-2", "a", "", "long-identifier-string"] {
			let index = palette_index(id);
			assert_eq!(index, palette_index(id));
			assert!(index < PALETTE_SIZE);
		}
	}

	#[test]
	fn edge_opacity_grows_with_strength_and_caps() {
		let opacities: Vec<f64> = (1usize..=10).map(edge_opacity).collect();
		for pair in opacities.windows(2) {
			assert!(pair[1] >= pair[0]);
		}
		assert_eq!(opacities[0], EDGE_OPACITY_BASE);
		assert!(opacities.iter().all(|&o| o <= EDGE_OPACITY_MAX));
	}

	#[test]
	fn capture_preserves_ids_and_maps_edges_to_ids() {
		let docs = [doc("a", &["t"]), doc("b", &["t"])];
		let graph = build_graph(&docs, Bounds::new(800.0, 600.0), 1);
		let frame = LayoutFrame::capture(&graph, 4, false);

		assert_eq!(frame.iteration, 4);
		assert!(!frame.settled);
		let ids: Vec<_> = frame.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b"]);
		assert_eq!(frame.edges.len(), 1);
		assert_eq!(frame.edges[0].source_id, "a");
		assert_eq!(frame.edges[0].target_id, "b");
	}

	#[test]
	fn node_at_honors_radius_and_prefers_topmost() {
		let docs = [doc("under", &[]), doc("over", &[])];
		let mut graph = build_graph(&docs, Bounds::new(800.0, 600.0), 1);
		graph.nodes[0].x = 100.0;
		graph.nodes[0].y = 100.0;
		graph.nodes[1].x = 100.0;
		graph.nodes[1].y = 100.0;
		let frame = LayoutFrame::capture(&graph, 1, false);

		assert_eq!(frame.node_at(100.0, 100.0).unwrap().id, "over");
		assert!(frame.node_at(300.0, 300.0).is_none());
	}
}
