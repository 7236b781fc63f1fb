//! Visual encodings: partition colors and labels, node radii, link colors.
//!
//! Nodes and the legend both read [`PARTITIONS`], so a swatch always matches
//! the sphere it describes.

use std::fmt;

use crate::data::{Edge, Node, NodeId};

/// Opaque color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

	pub const fn from_hex(hex: u32) -> Self {
		Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
	}

	pub const fn to_hex(self) -> u32 {
		((self.0 as u32) << 16) | ((self.1 as u32) << 8) | self.2 as u32
	}

	/// Blend toward white by `t` in `0.0..=1.0`.
	pub fn lighten(self, t: f64) -> Self {
		let mix = |c: u8| (c as f64 + (255.0 - c as f64) * t.clamp(0.0, 1.0)).round() as u8;
		Self(mix(self.0), mix(self.1), mix(self.2))
	}

	/// Blend toward black by `t` in `0.0..=1.0`.
	pub fn darken(self, t: f64) -> Self {
		let mix = |c: u8| (c as f64 * (1.0 - t.clamp(0.0, 1.0))).round() as u8;
		Self(mix(self.0), mix(self.1), mix(self.2))
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
	}
}

/// Color with alpha, printed as a CSS `rgba(...)` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub rgb: Rgb,
	pub alpha: f64,
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"rgba({}, {}, {}, {:.1})",
			self.rgb.0, self.rgb.1, self.rgb.2, self.alpha
		)
	}
}

/// One era: its partition code, display label and color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartitionStyle {
	pub code: i32,
	pub label: &'static str,
	pub color: Rgb,
}

pub const PARTITIONS: [PartitionStyle; 7] = [
	PartitionStyle {
		code: 0,
		label: "Nixon Era",
		color: Rgb::from_hex(0xFFB3B3),
	},
	PartitionStyle {
		code: 1,
		label: "Obama Era",
		color: Rgb::from_hex(0xB3FFB3),
	},
	PartitionStyle {
		code: 2,
		label: "Trump Era",
		color: Rgb::from_hex(0xB3B3FF),
	},
	PartitionStyle {
		code: 3,
		label: "Biden Era",
		color: Rgb::from_hex(0xFFD9B3),
	},
	PartitionStyle {
		code: 4,
		label: "Carter/Reagan Era",
		color: Rgb::from_hex(0xFFB3DE),
	},
	PartitionStyle {
		code: 5,
		label: "Bush Era",
		color: Rgb::from_hex(0xB3FFFF),
	},
	PartitionStyle {
		code: 6,
		label: "H. W. Bush/Clinton Era",
		color: Rgb::from_hex(0xFFFFB3),
	},
];

pub const FALLBACK_LABEL: &str = "Unknown Era";
pub const FALLBACK_COLOR: Rgb = Rgb::WHITE;

/// Radius used for sizes that have no usable logarithm.
pub const MIN_RADIUS: f64 = 0.5;
const PRESIDENT_SCALE: f64 = 2.0;

pub const LINK_HIGHLIGHT: Rgba = Rgba {
	rgb: Rgb::WHITE,
	alpha: 1.0,
};
pub const LINK_DIMMED: Rgba = Rgba {
	rgb: Rgb::WHITE,
	alpha: 0.5,
};

pub fn partition_style(partition: i32) -> Option<&'static PartitionStyle> {
	PARTITIONS.iter().find(|p| p.code == partition)
}

pub fn color_for_partition(partition: i32) -> Rgb {
	partition_style(partition).map_or(FALLBACK_COLOR, |p| p.color)
}

pub fn label_for_partition(partition: i32) -> &'static str {
	partition_style(partition).map_or(FALLBACK_LABEL, |p| p.label)
}

/// Sphere radius: `log2(size)`, doubled for presidents.
///
/// Any finite `size >= 1` maps straight to `log2(size)`, so `size == 1` gives
/// a zero radius. Sizes with a negative or non-finite logarithm (`size < 1`,
/// NaN, infinity) are drawn at [`MIN_RADIUS`] instead.
pub fn size_for_node(node: &Node) -> f64 {
	let base = if node.size.is_finite() && node.size >= 1.0 {
		node.size.log2()
	} else {
		MIN_RADIUS
	};
	if node.is_president {
		base * PRESIDENT_SCALE
	} else {
		base
	}
}

/// Link color for the current hover state. Recomputed on every paint.
pub fn color_for_link(edge: &Edge, hovered: Option<&NodeId>) -> Rgba {
	link_color_between(&edge.source, &edge.target, hovered)
}

/// [`color_for_link`] over bare endpoints, for callers that hold ids rather
/// than an [`Edge`].
pub fn link_color_between(source: &NodeId, target: &NodeId, hovered: Option<&NodeId>) -> Rgba {
	match hovered {
		Some(id) if id == source || id == target => LINK_HIGHLIGHT,
		_ => LINK_DIMMED,
	}
}
