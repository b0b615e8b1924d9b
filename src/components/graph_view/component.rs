//! Leptos components for the topology view.
//!
//! [`GraphView`] owns the graph fetch for the selected application and
//! overlays loading/error states; [`TopologyCanvas`] renders the scene and
//! wires mouse, wheel, and keyboard input into store and document
//! mutations. An animation loop runs via `requestAnimationFrame`, advancing
//! the physics simulation and redrawing each frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use crate::api::{self, Remote, RemoteState};
use crate::model::Graph;
use crate::store::AppStore;

use super::doc::RenderedGraph;
use super::render::{self, NodeVisual, VisualIndex};
use super::scale::ScaleConfig;
use super::scene::GraphScene;
use super::theme::Theme;

/// Bundles the simulation scene with its visual configuration.
struct CanvasContext {
	scene: GraphScene,
	scale: ScaleConfig,
	theme: Theme,
}

/// Asserts `Send + Sync` for a value that only ever runs on the single-threaded
/// wasm event loop, to satisfy [`leptos::prelude::on_cleanup`]'s bound.
struct AssertSendSync<T>(T);

// Safety: the CSR app is single-threaded; this type is never shared across
// real threads.
unsafe impl<T> Send for AssertSendSync<T> {}
unsafe impl<T> Sync for AssertSendSync<T> {}

impl<T: FnOnce()> AssertSendSync<T> {
	fn call(self) {
		(self.0)()
	}
}

fn visual_index(doc: &RenderedGraph) -> VisualIndex {
	doc.with_untracked(|g| {
		g.nodes
			.iter()
			.map(|n| {
				(
					n.id.clone(),
					NodeVisual {
						label: n.data.label.clone(),
						status: n.data.status,
					},
				)
			})
			.collect()
	})
}

/// The topology view for the currently selected application.
///
/// Requests the graph from the gateway whenever the selection changes,
/// keying the request by application id so a superseded response is
/// discarded instead of overwriting newer state.
#[component]
pub fn GraphView() -> impl IntoView {
	let store = expect_context::<AppStore>();
	let doc = expect_context::<RenderedGraph>();
	let remote = Remote::<Graph>::new();

	Effect::new(move |prev: Option<Option<String>>| {
		let selected = store.selected_app_id().get();
		if prev.as_ref() == Some(&selected) {
			return selected;
		}
		match &selected {
			Some(id) => {
				doc.clear();
				remote.load(id.clone(), |id| async move { api::fetch_graph(&id).await });
			}
			None => {
				doc.clear();
				remote.reset();
			}
		}
		selected
	});

	// Wholesale replacement of the rendered document on arrival.
	Effect::new(move |_| {
		if let RemoteState::Ready(graph) = remote.state() {
			doc.replace(graph);
		}
	});

	view! {
		<div class="graph-view">
			<TopologyCanvas />
			{move || match remote.state() {
				RemoteState::Idle => {
					view! { <div class="graph-status">"Select an application"</div> }.into_any()
				}
				RemoteState::Loading => {
					view! { <div class="graph-status">"Loading graph..."</div> }.into_any()
				}
				RemoteState::Failed(_) => {
					view! {
						<div class="graph-status graph-status-error">"Failed to load graph"</div>
					}
						.into_any()
				}
				RemoteState::Ready(_) => ().into_any(),
			}}
		</div>
	}
}

/// Renders the rendered document on a canvas element.
///
/// Pointer interactions: click selects a node, a motionless background
/// click deselects, drag moves a node (anchoring it against the layout),
/// background drag pans, the wheel zooms, and shift-drag from a node draws
/// a new connection. Delete/Backspace removes the selected node and its
/// incident edges while an application is selected.
#[component]
pub fn TopologyCanvas() -> impl IntoView {
	let store = expect_context::<AppStore>();
	let doc = expect_context::<RenderedGraph>();

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let alive = Rc::new(Cell::new(true));

	// Build the scene on mount and rebuild it fresh on every wholesale
	// document replacement; the animation loop starts exactly once.
	let (context_init, animate_init, alive_init) =
		(context.clone(), animate.clone(), alive.clone());
	Effect::new(move |_| {
		doc.generation().get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let (w, h) = canvas
			.parent_element()
			.map(|p| (p.client_width() as f64, p.client_height() as f64))
			.filter(|&(w, h)| w > 0.0 && h > 0.0)
			.unwrap_or((800.0, 600.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		*context_init.borrow_mut() = Some(CanvasContext {
			scene: doc.with_untracked(|g| GraphScene::new(g, w, h)),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		if animate_init.borrow().is_some() {
			return;
		}
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let (context_anim, animate_inner, alive_anim) = (
			context_init.clone(),
			animate_init.clone(),
			alive_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.get() {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				// Project the store selection onto the scene every frame,
				// independent of fetches and structural edits.
				let selected = store.selected_node_id().get_untracked();
				c.scene.set_selected_id(selected.as_deref());
				let visuals = visual_index(&doc);
				c.scene.tick(0.016);
				render::render(&c.scene, &ctx, &c.scale, &c.theme, &visuals);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Structural edits resynchronize the simulation without losing the
	// current layout or viewport.
	let context_sync = context.clone();
	Effect::new(move |prev: Option<u64>| {
		let revision = doc.revision().get();
		if let Some(prev) = prev {
			if prev != revision {
				if let Some(ref mut c) = *context_sync.borrow_mut() {
					let next = doc.with_untracked(|g| GraphScene::rebuild(g, &c.scene));
					c.scene = next;
				}
			}
		}
		revision
	});

	// Delete/Backspace removes the selected node while an application is
	// selected. The listener is window-level so the canvas does not need
	// focus, and it is removed again when this view unmounts.
	let keydown_init = keydown.clone();
	Effect::new(move |_| {
		if keydown_init.borrow().is_some() {
			return;
		}
		*keydown_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			let key = ev.key();
			if key != "Delete" && key != "Backspace" {
				return;
			}
			if store.selected_app_id().get_untracked().is_none() {
				return;
			}
			let Some(node_id) = store.selected_node_id().get_untracked() else {
				return;
			};
			if doc.remove_node(&node_id) {
				store.set_selected_node_id(None);
			}
		}));
		if let Some(ref cb) = *keydown_init.borrow() {
			if let Some(window) = web_sys::window() {
				let _ =
					window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
			}
		}
	});

	let (alive_cleanup, keydown_cleanup) = (alive.clone(), keydown.clone());
	let cleanup = AssertSendSync(move || {
		alive_cleanup.set(false);
		if let Some(cb) = keydown_cleanup.borrow_mut().take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
			}
		}
	});
	on_cleanup(move || cleanup.call());

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.scene.node_at_position(x, y, &c.scale) {
				if ev.shift_key() {
					let (gx, gy) = c.scene.screen_to_graph(x, y);
					c.scene.link.begin(idx, gx, gy);
				} else {
					if let Some(id) = c.scene.id_of(idx) {
						store.set_selected_node_id(Some(id));
					}
					c.scene.drag.active = true;
					c.scene.drag.node_idx = Some(idx);
					c.scene.drag.start_x = x;
					c.scene.drag.start_y = y;
					if let Some((nx, ny)) = c.scene.node_position(idx) {
						c.scene.drag.node_start_x = nx;
						c.scene.drag.node_start_y = ny;
					}
				}
			} else {
				c.scene.pan.active = true;
				c.scene.pan.moved = false;
				c.scene.pan.start_x = x;
				c.scene.pan.start_y = y;
				c.scene.pan.transform_start_x = c.scene.transform.x;
				c.scene.pan.transform_start_y = c.scene.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.scene.link.active {
				c.scene.link.cursor = c.scene.screen_to_graph(x, y);
				let hover = c.scene.node_at_position(x, y, &c.scale);
				c.scene.set_hover(hover);
			} else if c.scene.drag.active {
				if let Some(idx) = c.scene.drag.node_idx {
					let (dx, dy) = (
						(x - c.scene.drag.start_x) / c.scene.transform.k,
						(y - c.scene.drag.start_y) / c.scene.transform.k,
					);
					let (nx, ny) = (
						c.scene.drag.node_start_x + dx as f32,
						c.scene.drag.node_start_y + dy as f32,
					);
					c.scene.move_node(idx, nx, ny, true);
				}
			} else if c.scene.pan.active {
				c.scene.pan.moved = true;
				c.scene.transform.x = c.scene.pan.transform_start_x + (x - c.scene.pan.start_x);
				c.scene.transform.y = c.scene.pan.transform_start_y + (y - c.scene.pan.start_y);
			} else {
				let hover = c.scene.node_at_position(x, y, &c.scale);
				c.scene.set_hover(hover);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		// Resolve the interaction under the borrow, then apply document and
		// store mutations after releasing it.
		let mut connect: Option<(String, String)> = None;
		let mut drag_end: Option<(String, f64, f64)> = None;
		let mut clear_selection = false;

		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.scene.link.active {
				if let Some(src) = c.scene.link.source {
					if let Some(tgt) = c.scene.node_at_position(x, y, &c.scale) {
						if src != tgt {
							if let (Some(src_id), Some(tgt_id)) =
								(c.scene.id_of(src), c.scene.id_of(tgt))
							{
								connect = Some((src_id, tgt_id));
							}
						}
					}
				}
				c.scene.link.clear();
			}
			if c.scene.drag.active {
				if let Some(idx) = c.scene.drag.node_idx {
					if let (Some(id), Some((nx, ny))) =
						(c.scene.id_of(idx), c.scene.node_position(idx))
					{
						drag_end = Some((id, nx as f64, ny as f64));
					}
				}
				c.scene.drag.active = false;
				c.scene.drag.node_idx = None;
			}
			if c.scene.pan.active {
				clear_selection = !c.scene.pan.moved;
				c.scene.pan.active = false;
			}
		}

		if let Some((source, target)) = connect {
			doc.add_edge(&source, &target);
		}
		if let Some((id, px, py)) = drag_end {
			doc.set_position(&id, px, py);
		}
		if clear_selection {
			store.set_selected_node_id(None);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.scene.drag.active = false;
			c.scene.drag.node_idx = None;
			c.scene.pan.active = false;
			c.scene.link.clear();
			c.scene.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.scene.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.scene.transform.k;
			c.scene.transform.x = x - (x - c.scene.transform.x) * ratio;
			c.scene.transform.y = y - (y - c.scene.transform.y) * ratio;
			c.scene.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="topology-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
