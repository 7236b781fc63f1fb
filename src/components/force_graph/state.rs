use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::config::GraphConfig;
use super::encoding::{Rgb, color_for_partition, size_for_node};
use crate::data::{GraphData, NodeId};

/// Extra screen-space slack around a sphere when hit testing.
pub const HIT_SLOP: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: NodeId,
	pub radius: f64,
	pub color: Rgb,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	fn lerp(&self, to: &ViewTransform, t: f64) -> ViewTransform {
		ViewTransform {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Set once the pointer travelled far enough that the release is not a click.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug)]
struct ZoomTransition {
	from: ViewTransform,
	to: ViewTransform,
	elapsed_ms: f64,
	duration_ms: f64,
}

fn ease_in_out_quad(t: f64) -> f64 {
	if t < 0.5 {
		2.0 * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub config: GraphConfig,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	ticks: usize,
	zoom: Option<ZoomTransition>,
}

impl ForceGraphState {
	/// Build the simulation from the dataset and run the warmup ticks.
	pub fn new(data: &GraphData, config: GraphConfig, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: config.force_charge,
			force_spring: config.force_spring,
			force_max: config.force_max,
			node_speed: config.node_speed,
			damping_factor: config.damping_factor,
		});
		let mut id_to_idx = HashMap::new();
		let count = data.nodes().len().max(1) as f64;

		for (i, node) in data.nodes().iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: config.node_mass,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					radius: size_for_node(node),
					color: color_for_partition(node.partition),
				},
			});
			id_to_idx.insert(&node.id, idx);
		}

		for link in data.links() {
			match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				_ => warn!(
					"dropping link {} -> {}: unknown endpoint",
					link.source, link.target
				),
			}
		}

		let mut state = Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			width,
			height,
			animation_running: true,
			ticks: 0,
			zoom: None,
			config,
		};
		state.warm_up();
		state
	}

	fn warm_up(&mut self) {
		for _ in 0..self.config.warmup_ticks {
			self.graph.update(self.config.tick_dt);
		}
		self.animation_running = self.config.cooldown_ticks > 0;
		debug!(
			"warmup done after {} ticks, live simulation {}",
			self.config.warmup_ticks,
			if self.animation_running { "on" } else { "off" }
		);
	}

	/// Advance one frame. `dt_ms` only drives the camera transition; the
	/// simulation steps with the configured fixed timestep.
	pub fn tick(&mut self, dt_ms: f64) {
		if self.animation_running {
			self.graph.update(self.config.tick_dt);
			self.ticks += 1;
			if self.ticks >= self.config.cooldown_ticks {
				self.animation_running = false;
			}
		}
		self.advance_zoom(dt_ms);
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Id of the closest sphere under the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let slop = HIT_SLOP / self.transform.k;
		let mut found: Option<(NodeId, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < node.data.user_data.radius + slop
				&& found.as_ref().is_none_or(|(_, best)| dist < *best)
			{
				found = Some((node.data.user_data.id.clone(), dist));
			}
		});
		found.map(|(id, _)| id)
	}

	/// Pointer moved to a screen point: drag the view if a pan is in progress
	/// and return the node now under the pointer. Hover is suppressed only once
	/// the pan has travelled past the click slop.
	pub fn pointer_moved(&mut self, sx: f64, sy: f64) -> Option<NodeId> {
		if self.pan.active {
			self.pan_to(sx, sy);
			if self.pan.moved {
				return None;
			}
		}
		self.node_at_position(sx, sy)
	}

	/// World-space bounding box of every sphere as `(min_x, min_y, max_x, max_y)`.
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (x, y, r) = (
				node.x() as f64,
				node.y() as f64,
				node.data.user_data.radius,
			);
			if !(x.is_finite() && y.is_finite()) {
				return;
			}
			bounds = Some(match bounds {
				None => (x - r, y - r, x + r, y + r),
				Some((x0, y0, x1, y1)) => (x0.min(x - r), y0.min(y - r), x1.max(x + r), y1.max(y + r)),
			});
		});
		bounds
	}

	/// Transform that centers the graph and fits it inside the padded viewport.
	pub fn fit_transform(&self) -> Option<ViewTransform> {
		let (x0, y0, x1, y1) = self.bounds()?;
		let pad = self.config.zoom_to_fit_padding;
		let (avail_w, avail_h) = (
			(self.width - 2.0 * pad).max(1.0),
			(self.height - 2.0 * pad).max(1.0),
		);
		let (gw, gh) = ((x1 - x0).max(1e-6), (y1 - y0).max(1e-6));
		let k = (avail_w / gw)
			.min(avail_h / gh)
			.clamp(self.config.min_zoom, self.config.max_zoom);
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		Some(ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		})
	}

	/// Animate the camera onto [`Self::fit_transform`] over `duration_ms`.
	pub fn zoom_to_fit(&mut self, duration_ms: f64) {
		let Some(to) = self.fit_transform() else {
			return;
		};
		if duration_ms <= 0.0 {
			self.transform = to;
			self.zoom = None;
			return;
		}
		self.zoom = Some(ZoomTransition {
			from: self.transform,
			to,
			elapsed_ms: 0.0,
			duration_ms,
		});
	}

	#[cfg(test)]
	pub fn is_zooming(&self) -> bool {
		self.zoom.is_some()
	}

	fn advance_zoom(&mut self, dt_ms: f64) {
		let Some(zoom) = self.zoom.as_mut() else {
			return;
		};
		zoom.elapsed_ms += dt_ms;
		let t = zoom.elapsed_ms / zoom.duration_ms;
		if t >= 1.0 {
			self.transform = zoom.to;
			self.zoom = None;
		} else {
			self.transform = zoom.from.lerp(&zoom.to, ease_in_out_quad(t));
		}
	}

	/// Zoom by `factor` around a screen point. Cancels any running transition.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.zoom = None;
		let new_k = (self.transform.k * factor).clamp(self.config.min_zoom, self.config.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn start_pan(&mut self, sx: f64, sy: f64) {
		self.zoom = None;
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
		if dx.abs() > HIT_SLOP || dy.abs() > HIT_SLOP {
			self.pan.moved = true;
		}
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{Edge, Node};

	fn node(id: &str, size: f64) -> Node {
		Node {
			id: id.into(),
			size,
			partition: 1,
			..Default::default()
		}
	}

	fn edge(a: &str, b: &str) -> Edge {
		Edge {
			source: a.into(),
			target: b.into(),
		}
	}

	fn sample() -> GraphData {
		GraphData::new(
			vec![node("a", 16.0), node("b", 4.0), node("c", 8.0)],
			vec![edge("a", "b"), edge("b", "c"), edge("c", "ghost")],
		)
		.unwrap()
	}

	fn positions(state: &ForceGraphState) -> Vec<(NodeId, f64, f64)> {
		let mut out = Vec::new();
		state.graph.visit_nodes(|n| {
			out.push((n.data.user_data.id.clone(), n.x() as f64, n.y() as f64))
		});
		out
	}

	fn screen_position(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let (_, x, y) = positions(state)
			.into_iter()
			.find(|(n, _, _)| n.0 == id)
			.unwrap();
		let t = state.transform;
		(x * t.k + t.x, y * t.k + t.y)
	}

	#[test]
	fn dangling_links_are_dropped() {
		let state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		let mut edges = 0;
		state.graph.visit_edges(|_, _, _| edges += 1);
		assert_eq!(edges, 2);
	}

	#[test]
	fn node_info_uses_encoders() {
		let state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		state.graph.visit_nodes(|n| {
			let info = &n.data.user_data;
			assert_eq!(info.color, color_for_partition(1));
			if info.id == NodeId::from("a") {
				assert_eq!(info.radius, 4.0);
			}
		});
	}

	#[test]
	fn zero_cooldown_freezes_layout_after_warmup() {
		let mut state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		assert!(!state.animation_running);
		let before = positions(&state);
		state.tick(16.0);
		assert_eq!(positions(&state), before);
	}

	#[test]
	fn cooldown_runs_for_configured_ticks() {
		let config = GraphConfig {
			warmup_ticks: 0,
			cooldown_ticks: 3,
			..Default::default()
		};
		let mut state = ForceGraphState::new(&sample(), config, 800.0, 600.0);
		assert!(state.animation_running);
		for _ in 0..3 {
			state.tick(16.0);
		}
		assert!(!state.animation_running);
	}

	#[test]
	fn hit_test_finds_node_under_pointer() {
		let state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		let t = state.transform;
		for (id, x, y) in positions(&state) {
			let (sx, sy) = (x * t.k + t.x, y * t.k + t.y);
			assert_eq!(state.node_at_position(sx, sy), Some(id));
		}
		assert_eq!(state.node_at_position(-10_000.0, -10_000.0), None);
	}

	#[test]
	fn press_without_drag_keeps_hover() {
		let mut state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		let (sx, sy) = screen_position(&state, "a");
		assert_eq!(state.pointer_moved(sx, sy), Some(NodeId::from("a")));

		state.start_pan(sx, sy);
		assert_eq!(state.pointer_moved(sx + 1.0, sy + 1.0), Some(NodeId::from("a")));
		assert!(!state.pan.moved);
		state.end_pan();
		assert_eq!(state.pointer_moved(sx + 1.0, sy + 1.0), Some(NodeId::from("a")));
	}

	#[test]
	fn dragging_past_slop_suppresses_hover_until_release() {
		let mut state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		let (sx, sy) = screen_position(&state, "a");
		state.start_pan(sx, sy);
		assert_eq!(state.pointer_moved(sx + 40.0, sy), None);
		assert!(state.pan.moved);

		// The view followed the pointer, so the node is still under it.
		state.end_pan();
		assert_eq!(state.pointer_moved(sx + 40.0, sy), Some(NodeId::from("a")));
	}

	#[test]
	fn zoom_to_fit_settles_on_fit_transform() {
		let mut state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		let target = state.fit_transform().unwrap();
		state.zoom_to_fit(400.0);
		assert!(state.is_zooming());
		state.tick(200.0);
		assert!(state.is_zooming());
		state.tick(250.0);
		assert!(!state.is_zooming());
		assert_eq!(state.transform, target);

		let (x0, y0, x1, y1) = state.bounds().unwrap();
		let k = target.k;
		let pad = state.config.zoom_to_fit_padding;
		assert!(x0 * k + target.x >= pad - 1e-6);
		assert!(y0 * k + target.y >= pad - 1e-6);
		assert!(x1 * k + target.x <= 800.0 - pad + 1e-6);
		assert!(y1 * k + target.y <= 600.0 - pad + 1e-6);
	}

	#[test]
	fn instant_zoom_to_fit() {
		let mut state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		state.zoom_to_fit(0.0);
		assert!(!state.is_zooming());
		assert_eq!(Some(state.transform), state.fit_transform());
	}

	#[test]
	fn empty_graph_has_no_bounds() {
		let mut state = ForceGraphState::new(&GraphData::default(), GraphConfig::default(), 800.0, 600.0);
		let before = state.transform;
		state.zoom_to_fit(400.0);
		assert_eq!(state.transform, before);
		assert!(!state.is_zooming());
	}

	#[test]
	fn pan_marks_drag_past_slop() {
		let mut state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		let start = state.transform;
		state.start_pan(100.0, 100.0);
		state.pan_to(101.0, 101.0);
		assert!(!state.pan.moved);
		state.pan_to(150.0, 80.0);
		assert!(state.pan.moved);
		assert_eq!(state.transform.x, start.x + 50.0);
		assert_eq!(state.transform.y, start.y - 20.0);
		state.end_pan();
		state.pan_to(0.0, 0.0);
		assert_eq!(state.transform.x, start.x + 50.0);
	}

	#[test]
	fn wheel_zoom_is_clamped_and_anchored() {
		let mut state = ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0);
		let anchor = state.screen_to_graph(300.0, 200.0);
		state.zoom_at(300.0, 200.0, 1.1);
		let (ax, ay) = state.screen_to_graph(300.0, 200.0);
		assert!((ax - anchor.0).abs() < 1e-9 && (ay - anchor.1).abs() < 1e-9);
		for _ in 0..100 {
			state.zoom_at(300.0, 200.0, 1.1);
		}
		assert_eq!(state.transform.k, state.config.max_zoom);
	}
}
