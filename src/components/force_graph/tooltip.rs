//! Tooltip templates for a node.
//!
//! Two layouts exist: the fixed overlay shown while a node is hovered, and
//! the longer pointer label carrying every centrality metric. Absent metrics
//! render as blank values.

use std::fmt::{Display, Write};

use super::encoding::label_for_partition;
use crate::data::Node;

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipField {
	pub label: &'static str,
	pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub title: String,
	pub fields: Vec<TooltipField>,
}

fn field(label: &'static str, value: impl Into<String>) -> TooltipField {
	TooltipField {
		label,
		value: value.into(),
	}
}

fn metric<T: Display>(value: Option<T>) -> String {
	value.map(|v| v.to_string()).unwrap_or_default()
}

impl Tooltip {
	/// Overlay content: identity, era and link-analysis scores.
	pub fn overlay(node: &Node) -> Self {
		Self {
			title: node.name.clone(),
			fields: vec![
				field("ID", node.id.to_string()),
				field("Partition", label_for_partition(node.partition)),
				field("Total Edges", metric(node.num_edges)),
				field("Rank", metric(node.rank)),
				field("PageRank", metric(node.page_rank)),
				field("Hubs", metric(node.hubs)),
				field("Authorities", metric(node.authorities)),
			],
		}
	}

	/// Pointer label content: identity, era and every centrality with its rank.
	pub fn node_label(node: &Node) -> Self {
		Self {
			title: node.name.clone(),
			fields: vec![
				field("ID", node.id.to_string()),
				field("Partition", label_for_partition(node.partition)),
				field("Total Edges", metric(node.num_edges)),
				field("PageRank", metric(node.page_rank)),
				field("PageRank Rank", metric(node.rank)),
				field("Betweenness Centrality", metric(node.betweenness_centrality)),
				field(
					"Betweenness Centrality Rank",
					metric(node.betweenness_centrality_rank),
				),
				field("Closeness Centrality", metric(node.closeness_centrality)),
				field(
					"Closeness Centrality Rank",
					metric(node.closeness_centrality_rank),
				),
				field("Eigenvector Centrality", metric(node.eigen_centrality)),
				field(
					"Eigenvector Centrality Rank",
					metric(node.eigen_centrality_rank),
				),
			],
		}
	}

	/// Plain text, one `Label: value` line per field under the title.
	pub fn text(&self) -> String {
		let mut out = self.title.clone();
		for f in &self.fields {
			let _ = write!(out, "\n{}: {}", f.label, f.value);
		}
		out
	}

	/// Escaped HTML fragment.
	pub fn to_html(&self) -> String {
		let mut out = format!("<strong>{}</strong><br/>", escape_html(&self.title));
		for f in &self.fields {
			let _ = write!(
				out,
				"<em>{}:</em> {}<br/>",
				f.label,
				escape_html(&f.value)
			);
		}
		out
	}
}

/// HTML for the surface's pointer label.
pub fn node_label_html(node: &Node) -> String {
	format!(
		r#"<div class="tooltip-text">{}</div>"#,
		Tooltip::node_label(node).to_html()
	)
}

fn escape_html(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn sample() -> Node {
		Node {
			id: "n1".into(),
			name: "X".into(),
			partition: 2,
			size: 16.0,
			num_edges: Some(4),
			page_rank: Some(0.05),
			rank: Some(3),
			..Default::default()
		}
	}

	#[test]
	fn overlay_text() {
		assert_eq!(
			Tooltip::overlay(&sample()).text(),
			"X\nID: n1\nPartition: Trump Era\nTotal Edges: 4\nRank: 3\nPageRank: 0.05\nHubs: \nAuthorities: "
		);
	}

	#[test]
	fn node_label_lists_centralities() {
		let mut node = sample();
		node.closeness_centrality = Some(0.5);
		node.closeness_centrality_rank = Some(9);
		let text = Tooltip::node_label(&node).text();
		assert!(text.contains("PageRank Rank: 3"));
		assert!(text.contains("Closeness Centrality: 0.5"));
		assert!(text.contains("Closeness Centrality Rank: 9"));
		assert!(text.contains("Eigenvector Centrality: \n"));
	}

	#[test]
	fn unknown_partition_label() {
		let mut node = sample();
		node.partition = 99;
		assert!(Tooltip::overlay(&node).text().contains("Partition: Unknown Era"));
	}

	#[test]
	fn html_is_escaped() {
		let mut node = sample();
		node.name = "Iran<Contra> & \"co\"".into();
		let html = node_label_html(&node);
		assert!(html.starts_with(r#"<div class="tooltip-text"><strong>Iran&lt;Contra&gt; &amp; &quot;co&quot;</strong><br/>"#));
		assert!(html.contains("<em>Partition:</em> Trump Era<br/>"));
		assert!(html.ends_with("</div>"));
	}
}
