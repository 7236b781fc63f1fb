//! Hover and click state for the graph.
//!
//! The canvas reports pointer events here; nothing in this module touches the
//! DOM or the simulation. Navigation goes through [`Navigator`] so the browser
//! side effect can be swapped out.

use log::debug;

use super::encoding::{Rgba, color_for_link};
use super::tooltip::Tooltip;
use crate::data::{Edge, GraphData, Node, NodeId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
	#[default]
	Idle,
	Hovering(NodeId),
}

/// Opens a URL in a new navigation context.
pub trait Navigator {
	fn open(&mut self, url: &str);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverController {
	state: HoverState,
}

impl HoverController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> &HoverState {
		&self.state
	}

	pub fn hovered(&self) -> Option<&NodeId> {
		match &self.state {
			HoverState::Idle => None,
			HoverState::Hovering(id) => Some(id),
		}
	}

	/// Pointer entered `node`, or left every node when `None`.
	/// Returns whether the state changed.
	pub fn on_node_hover(&mut self, node: Option<&Node>) -> bool {
		let next = match node {
			Some(n) => HoverState::Hovering(n.id.clone()),
			None => HoverState::Idle,
		};
		if next == self.state {
			return false;
		}
		debug!("hover: {:?} -> {:?}", self.state, next);
		self.state = next;
		true
	}

	/// Overlay for the hovered node; `None` hides it.
	pub fn tooltip(&self, data: &GraphData) -> Option<Tooltip> {
		self.hovered()
			.and_then(|id| data.node(id))
			.map(Tooltip::overlay)
	}

	/// Follow the node's link, if it has one. Returns whether navigation happened.
	pub fn on_node_click(&self, node: &Node, navigator: &mut impl Navigator) -> bool {
		match node.url.as_deref() {
			Some(url) if !url.is_empty() => {
				debug!("click: opening {} for node {}", url, node.id);
				navigator.open(url);
				true
			}
			_ => false,
		}
	}

	pub fn link_color(&self, edge: &Edge) -> Rgba {
		color_for_link(edge, self.hovered())
	}
}
