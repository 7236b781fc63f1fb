//! Immutable node/edge dataset with precomputed graph metrics.

use std::collections::HashMap;
use std::fmt;

use log::info;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Dataset bundled into the binary at build time.
pub const EMBEDDED_DATASET: &str = include_str!("../assets/graph.json");

/// Partition code used when a node carries none.
pub const UNKNOWN_PARTITION: i32 = -1;

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum DataError {
	/// The document is not valid dataset JSON.
	#[error("failed to parse graph dataset: {0}")]
	Parse(#[from] serde_json::Error),
	/// Two nodes share an identifier.
	#[error("duplicate node id {0}")]
	DuplicateNodeId(NodeId),
}

/// Stable node identifier. Accepted from JSON as either an integer or a string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self(id.to_owned())
	}
}

impl<'de> Deserialize<'de> for NodeId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum RawId {
			Int(i64),
			Str(String),
		}

		Ok(match RawId::deserialize(deserializer)? {
			RawId::Int(n) => NodeId(n.to_string()),
			RawId::Str(s) => NodeId(s),
		})
	}
}

fn unknown_partition() -> i32 {
	UNKNOWN_PARTITION
}

/// A node of the era network. Metrics are display-only and may be absent.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Node {
	pub id: NodeId,
	#[serde(default)]
	pub name: String,
	/// Era classification, `0..=6` for the known eras.
	#[serde(default = "unknown_partition")]
	pub partition: i32,
	/// Drives the sphere radius through `log2(size)`.
	#[serde(default)]
	pub size: f64,
	#[serde(default)]
	pub is_president: bool,
	pub url: Option<String>,
	pub num_edges: Option<u32>,
	pub rank: Option<u32>,
	pub page_rank: Option<f64>,
	pub hubs: Option<f64>,
	pub authorities: Option<f64>,
	pub betweenness_centrality: Option<f64>,
	pub betweenness_centrality_rank: Option<u32>,
	pub closeness_centrality: Option<f64>,
	pub closeness_centrality_rank: Option<u32>,
	pub eigen_centrality: Option<f64>,
	pub eigen_centrality_rank: Option<u32>,
}

/// An undirected link between two node ids.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Edge {
	pub source: NodeId,
	pub target: NodeId,
}

impl Edge {
	/// Whether `id` is one of the two endpoints.
	pub fn touches(&self, id: &NodeId) -> bool {
		self.source == *id || self.target == *id
	}
}

#[derive(Deserialize)]
struct RawGraph {
	nodes: Vec<Node>,
	#[serde(default)]
	links: Vec<Edge>,
}

/// Complete dataset: nodes, links and an id lookup.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	nodes: Vec<Node>,
	links: Vec<Edge>,
	index: HashMap<NodeId, usize>,
}

impl GraphData {
	/// Build a dataset, rejecting duplicate node ids.
	pub fn new(nodes: Vec<Node>, links: Vec<Edge>) -> Result<Self, DataError> {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(DataError::DuplicateNodeId(node.id.clone()));
			}
		}
		Ok(Self {
			nodes,
			links,
			index,
		})
	}

	/// Parse a `{ "nodes": [...], "links": [...] }` document.
	pub fn from_json(json: &str) -> Result<Self, DataError> {
		let raw: RawGraph = serde_json::from_str(json)?;
		let data = Self::new(raw.nodes, raw.links)?;
		info!(
			"era-graph: loaded {} nodes, {} links",
			data.nodes.len(),
			data.links.len()
		);
		Ok(data)
	}

	/// The dataset shipped with the app.
	pub fn embedded() -> Result<Self, DataError> {
		Self::from_json(EMBEDDED_DATASET)
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Edge] {
		&self.links
	}

	/// Identity lookup.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_accept_numbers_and_strings() {
		let data = GraphData::from_json(
			r#"{"nodes":[{"id":7,"name":"A"},{"id":"n1","name":"B"}],
			"links":[{"source":7,"target":"n1"}]}"#,
		)
		.unwrap();
		assert_eq!(data.nodes()[0].id, NodeId::from("7"));
		assert_eq!(data.node(&"n1".into()).unwrap().name, "B");
		assert_eq!(data.links()[0].source, NodeId::from("7"));
	}

	#[test]
	fn missing_fields_fall_back() {
		let data = GraphData::from_json(r#"{"nodes":[{"id":1}]}"#).unwrap();
		let node = &data.nodes()[0];
		assert_eq!(node.partition, UNKNOWN_PARTITION);
		assert!(!node.is_president);
		assert_eq!(node.url, None);
		assert_eq!(node.page_rank, None);
		assert!(data.links().is_empty());
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let err = GraphData::from_json(r#"{"nodes":[{"id":1},{"id":"1"}]}"#).unwrap_err();
		assert!(matches!(err, DataError::DuplicateNodeId(id) if id.0 == "1"));
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = GraphData::from_json("{\"nodes\": [").unwrap_err();
		assert!(matches!(err, DataError::Parse(_)));
	}

	#[test]
	fn embedded_dataset_is_consistent() {
		let data = GraphData::embedded().unwrap();
		assert!(!data.nodes().is_empty());
		for link in data.links() {
			assert!(data.node(&link.source).is_some(), "dangling {}", link.source);
			assert!(data.node(&link.target).is_some(), "dangling {}", link.target);
		}
		assert_eq!(data.nodes().iter().filter(|n| n.is_president).count(), 10);
	}

	#[test]
	fn edge_touches_either_endpoint() {
		let edge = Edge {
			source: "a".into(),
			target: "b".into(),
		};
		assert!(edge.touches(&"a".into()));
		assert!(edge.touches(&"b".into()));
		assert!(!edge.touches(&"c".into()));
	}
}
