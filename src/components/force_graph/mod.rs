//! Force-directed view of the era network.
//!
//! The canvas owns the simulation and camera. Everything it draws is derived
//! from [`encoding`], and pointer events are forwarded to a
//! [`hover::HoverController`] whose state drives link highlighting and the
//! tooltip overlay.

mod component;
pub mod config;
pub mod encoding;
pub mod hover;
mod render;
mod state;
pub mod tooltip;

pub use component::ForceGraphCanvas;
pub use config::GraphConfig;
