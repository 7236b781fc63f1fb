/// Tuning knobs for the canvas: physics, warmup, camera and styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub node_mass: f32,
	/// Simulation steps run before the first paint.
	pub warmup_ticks: usize,
	/// Steps run after the first paint; `0` freezes the layout after warmup.
	pub cooldown_ticks: usize,
	/// Fixed timestep for warmup and live ticks, in seconds.
	pub tick_dt: f32,
	/// Duration of the zoom-to-fit run once after mount, in milliseconds.
	pub zoom_to_fit_ms: f64,
	/// Screen-space margin kept around the graph by zoom-to-fit.
	pub zoom_to_fit_padding: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub link_width: f64,
	pub background: &'static str,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			warmup_ticks: 100,
			cooldown_ticks: 0,
			tick_dt: 0.016,
			zoom_to_fit_ms: 400.0,
			zoom_to_fit_padding: 40.0,
			min_zoom: 0.1,
			max_zoom: 10.0,
			link_width: 1.0,
			background: "#000011",
		}
	}
}
