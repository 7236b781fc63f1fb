use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::GraphConfig;
use super::hover::{HoverController, Navigator};
use super::render;
use super::state::ForceGraphState;
use super::tooltip::{Tooltip, node_label_html};
use crate::data::{GraphData, NodeId};

/// Opens links in a new browser tab.
struct WindowNavigator;

impl Navigator for WindowNavigator {
	fn open(&mut self, url: &str) {
		let Some(window) = web_sys::window() else {
			error!("no window to open {}", url);
			return;
		};
		if let Err(e) = window.open_with_url_and_target(url, "_blank") {
			error!("failed to open {}: {:?}", url, e);
		}
	}
}

/// Pointer-following label: screen position and rendered HTML.
#[derive(Clone, Debug, PartialEq)]
struct PointerLabel {
	x: f64,
	y: f64,
	html: String,
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Shared liveness flag between the component's cleanup and its frame loop.
/// `Send + Sync` so it can be handed to `on_cleanup`.
#[derive(Clone, Debug)]
struct MountFlag(Arc<AtomicBool>);

impl MountFlag {
	fn new() -> Self {
		Self(Arc::new(AtomicBool::new(true)))
	}

	fn unmount(&self) {
		self.0.store(false, Ordering::Relaxed);
	}

	fn is_mounted(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Push the node under the pointer into the hover controller and the
/// pointer label.
fn sync_hover(
	hover: RwSignal<HoverController>,
	pointer_label: RwSignal<Option<PointerLabel>>,
	data: &GraphData,
	hovered: Option<NodeId>,
	(x, y): (f64, f64),
) {
	let node = hovered.as_ref().and_then(|id| data.node(id));
	if hover.with_untracked(|h| h.hovered() != node.map(|n| &n.id)) {
		hover.update(|h| {
			h.on_node_hover(node);
		});
	}
	pointer_label.set(node.map(|n| PointerLabel {
		x: x + 14.0,
		y: y + 14.0,
		html: node_label_html(n),
	}));
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn ForceGraphCanvas(
	data: Arc<GraphData>,
	#[prop(optional)] config: GraphConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let hover = RwSignal::new(HoverController::new());
	let pointer_label = RwSignal::new(None::<PointerLabel>);
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let mounted = MountFlag::new();
	let (state_init, animate_init, resize_cb_init, data_init, mounted_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		data.clone(),
		mounted.clone(),
	);

	on_cleanup(move || mounted.unmount());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("force graph: no window");
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("force graph: 2d context has unexpected type");
					return;
				}
			},
			_ => {
				error!("force graph: canvas 2d context unavailable");
				return;
			}
		};

		let mut initial = ForceGraphState::new(&data_init, config.clone(), w, h);
		initial.zoom_to_fit(initial.config.zoom_to_fit_ms);
		*state_init.borrow_mut() = Some(initial);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, resize_teardown, mounted_anim) = (
			state_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			mounted_init.clone(),
		);
		let last_frame = Rc::new(Cell::new(js_sys::Date::now()));
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Unmounted: detach the resize listener and release the loop.
			if !mounted_anim.is_mounted() {
				if let Some(cb) = resize_teardown.borrow_mut().take() {
					if let Some(win) = web_sys::window() {
						let _ = win
							.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
					}
				}
				animate_inner.borrow_mut().take();
				return;
			}
			let now = js_sys::Date::now();
			let dt_ms = (now - last_frame.replace(now)).clamp(0.0, 100.0);
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(dt_ms);
				hover.with_untracked(|h| render::render(s, h, &ctx));
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.start_pan(x, y);
		}
	};

	let (state_mm, data_mm) = (state.clone(), data.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		let hovered = {
			let mut guard = state_mm.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			s.pointer_moved(x, y)
		};
		sync_hover(hover, pointer_label, &data_mm, hovered, (x, y));
	};

	let (state_mu, data_mu) = (state.clone(), data.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let hovered = {
			let mut guard = state_mu.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			s.end_pan();
			s.node_at_position(x, y)
		};
		sync_hover(hover, pointer_label, &data_mu, hovered, (x, y));
	};

	let (state_click, data_click) = (state.clone(), data.clone());
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let clicked: Option<NodeId> = {
			let guard = state_click.borrow();
			let Some(s) = guard.as_ref() else {
				return;
			};
			if s.pan.moved {
				return;
			}
			s.node_at_position(x, y)
		};
		if let Some(node) = clicked.as_ref().and_then(|id| data_click.node(id)) {
			hover.with_untracked(|h| h.on_node_click(node, &mut WindowNavigator));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_pan();
		}
		if hover.with_untracked(|h| h.hovered().is_some()) {
			hover.update(|h| {
				h.on_node_hover(None);
			});
		}
		pointer_label.set(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	let data_tooltip = data.clone();
	let overlay = move || {
		hover
			.with(|h| h.tooltip(&data_tooltip))
			.map(|tooltip| view! { <TooltipOverlay tooltip=tooltip /> })
	};

	view! {
		<div class="force-graph" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:click=on_click
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block;"
				style:cursor=move || if hover.with(|h| h.hovered().is_some()) { "pointer" } else { "grab" }
			/>
			{overlay}
			{move || {
				pointer_label
					.get()
					.map(|label| {
						view! {
							<div
								class="node-label"
								style="position: absolute; pointer-events: none;"
								style:left=format!("{}px", label.x)
								style:top=format!("{}px", label.y)
								inner_html=label.html
							/>
						}
					})
			}}
		</div>
	}
}

/// Fixed overlay for the hovered node. Mounted only while a node is hovered.
#[component]
fn TooltipOverlay(tooltip: Tooltip) -> impl IntoView {
	view! {
		<div class="graph-tooltip">
			<strong>{tooltip.title}</strong>
			<br />
			{tooltip
				.fields
				.into_iter()
				.map(|f| {
					view! {
						<em>{f.label}":"</em>
						" "
						{f.value}
						<br />
					}
				})
				.collect_view()}
		</div>
	}
}
