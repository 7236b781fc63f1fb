use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::encoding::link_color_between;
use super::hover::HoverController;
use super::state::ForceGraphState;

pub fn render(state: &ForceGraphState, hover: &HoverController, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.config.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, hover, ctx);
	draw_nodes(state, hover, ctx);
	ctx.restore();
}

fn draw_links(state: &ForceGraphState, hover: &HoverController, ctx: &CanvasRenderingContext2d) {
	let hovered = hover.hovered();
	ctx.set_line_width(state.config.link_width / state.transform.k);

	state.graph.visit_edges(|n1, n2, _| {
		let color = link_color_between(&n1.data.user_data.id, &n2.data.user_data.id, hovered);
		ctx.set_stroke_style_str(&color.to_string());
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

// Spheres are faked with an off-center radial gradient: a lit highlight fading
// into the partition color and a darker rim.
fn draw_nodes(state: &ForceGraphState, hover: &HoverController, ctx: &CanvasRenderingContext2d) {
	let hovered = hover.hovered();
	let k = state.transform.k;

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y, r) = (node.x() as f64, node.y() as f64, info.radius);

		match ctx.create_radial_gradient(x - r * 0.35, y - r * 0.35, r * 0.1, x, y, r) {
			Ok(gradient) => {
				let _ = gradient.add_color_stop(0.0, &info.color.lighten(0.6).to_string());
				let _ = gradient.add_color_stop(0.7, &info.color.to_string());
				let _ = gradient.add_color_stop(1.0, &info.color.darken(0.35).to_string());
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
			}
			Err(_) => ctx.set_fill_style_str(&info.color.to_string()),
		}
		ctx.begin_path();
		let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		ctx.fill();

		if hovered == Some(&info.id) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, r + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
	});
}
