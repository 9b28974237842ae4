//! Leptos component wrapping the evidence graph canvas.
//!
//! The component owns one [`LayoutEngine`] driven by `requestAnimationFrame`.
//! Whenever the document collection changes (or the window resizes in
//! fullscreen mode) it rebuilds the relationship graph and starts a fresh
//! run; the engine's generation counter silences the superseded run. Each
//! published frame is painted straight to the canvas.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::theme::Theme;
use crate::engine::{Bounds, Document, LayoutEngine, LayoutFrame, TickSource, build_graph};

/// [`TickSource`] backed by the browser's animation frame.
///
/// Each requested tick becomes a one-shot closure handed to
/// `requestAnimationFrame`; ownership moves to the JS side and the closure
/// is dropped after it fires.
struct RafTicker;

impl TickSource for RafTicker {
	fn request_tick(&self, tick: Box<dyn FnOnce()>) {
		let closure = Closure::once_into_js(move || tick());
		if let Some(window) = web_sys::window() {
			let _ = window.request_animation_frame(closure.unchecked_ref());
		}
	}
}

/// Canvas handle plus its current extent, shared between the publish
/// callback and the mouse handlers.
struct CanvasState {
	ctx: CanvasRenderingContext2d,
	bounds: Bounds,
}

/// Per-run layout seed: a collection hashes to the same seed every time, so
/// revisiting the same documents reproduces the same layout.
fn collection_seed(documents: &[Document]) -> u64 {
	let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
	for doc in documents {
		for byte in doc.id.bytes() {
			hash ^= u64::from(byte);
			hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
		}
		// Separator so ["ab"] and ["a", "b"] hash apart.
		hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
	}
	hash
}

fn redraw(
	canvas_state: &Rc<RefCell<Option<CanvasState>>>,
	latest: &Rc<RefCell<Option<LayoutFrame>>>,
	theme: &Theme,
	hovered: Option<&str>,
) {
	let state = canvas_state.borrow();
	let frame = latest.borrow();
	if let (Some(state), Some(frame)) = (state.as_ref(), frame.as_ref()) {
		render::render(frame, &state.ctx, theme, state.bounds, hovered);
	}
}

/// Renders the evidence relationship graph on a canvas element.
///
/// Pass the document collection via the reactive `documents` signal; every
/// change triggers a fresh layout run. The component sizes itself to its
/// parent container by default; set `fullscreen = true` to fill the viewport
/// and re-run the layout on window resize. A click on a node invokes
/// `on_node_select` with the document title, and `settled` (when provided)
/// flips to `true` once the run exhausts its iteration budget — wire it to a
/// loading affordance.
#[component]
pub fn EvidenceGraphCanvas(
	#[prop(into)] documents: Signal<Vec<Document>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_node_select: Option<Callback<String>>,
	#[prop(default = None)] settled: Option<RwSignal<bool>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let theme: Rc<Theme> = Rc::new(Theme::default());
	let engine = LayoutEngine::new(Rc::new(RafTicker));
	let canvas_state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let latest: Rc<RefCell<Option<LayoutFrame>>> = Rc::new(RefCell::new(None));
	let hovered: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let engine_cleanup = leptos::__reexports::send_wrapper::SendWrapper::new(engine.clone());
	on_cleanup(move || engine_cleanup.cancel());

	let (engine_init, canvas_state_init, latest_init, hovered_init, theme_init, resize_cb_init) = (
		engine.clone(),
		canvas_state.clone(),
		latest.clone(),
		hovered.clone(),
		theme.clone(),
		resize_cb.clone(),
	);

	Effect::new(move |_| {
		// Read first so the effect re-runs on every collection change even
		// before the canvas has mounted.
		let docs = documents.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
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

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let bounds = Bounds::new(w, h);
		*canvas_state_init.borrow_mut() = Some(CanvasState {
			ctx: ctx.clone(),
			bounds,
		});

		{
			let (canvas_state, latest, hovered, theme) = (
				canvas_state_init.clone(),
				latest_init.clone(),
				hovered_init.clone(),
				theme_init.clone(),
			);
			engine_init.subscribe(move |frame| {
				*latest.borrow_mut() = Some(frame.clone());
				if frame.settled {
					if let Some(signal) = settled {
						signal.set(true);
					}
				}
				redraw(&canvas_state, &latest, &theme, hovered.borrow().as_deref());
			});
		}

		if fullscreen && resize_cb_init.borrow().is_none() {
			let (engine_resize, canvas_state_resize, canvas_resize) = (
				engine_init.clone(),
				canvas_state_init.clone(),
				canvas.clone(),
			);
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);

				let new_bounds = Bounds::new(nw, nh);
				if let Some(ref mut state) = *canvas_state_resize.borrow_mut() {
					state.bounds = new_bounds;
				}
				// A resize invalidates the run in progress; start over
				// rather than resuming partial progress.
				if let Some(signal) = settled {
					signal.set(false);
				}
				let docs = documents.get_untracked();
				let graph = build_graph(&docs, new_bounds, collection_seed(&docs));
				engine_resize.start(graph, new_bounds);
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		if let Some(signal) = settled {
			signal.set(false);
		}
		let graph = build_graph(&docs, bounds, collection_seed(&docs));
		engine_init.start(graph, bounds);
	});

	let (canvas_state_mm, latest_mm, hovered_mm, theme_mm) = (
		canvas_state.clone(),
		latest.clone(),
		hovered.clone(),
		theme.clone(),
	);
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let hit = latest_mm
			.borrow()
			.as_ref()
			.and_then(|frame| frame.node_at(x, y).map(|node| node.id.clone()));

		if *hovered_mm.borrow() != hit {
			let _ = web_sys::HtmlElement::style(canvas.as_ref())
				.set_property("cursor", if hit.is_some() { "pointer" } else { "default" });
			*hovered_mm.borrow_mut() = hit;
			redraw(
				&canvas_state_mm,
				&latest_mm,
				&theme_mm,
				hovered_mm.borrow().as_deref(),
			);
		}
	};

	let (canvas_state_ml, latest_ml, hovered_ml, theme_ml) = (
		canvas_state.clone(),
		latest.clone(),
		hovered.clone(),
		theme.clone(),
	);
	let on_mouseleave = move |_: MouseEvent| {
		if hovered_ml.borrow_mut().take().is_some() {
			redraw(&canvas_state_ml, &latest_ml, &theme_ml, None);
		}
	};

	let latest_click = latest.clone();
	let on_click = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let title = latest_click
			.borrow()
			.as_ref()
			.and_then(|frame| frame.node_at(x, y).map(|node| node.title.clone()));
		if let Some(title) = title {
			if let Some(callback) = &on_node_select {
				callback.run(title);
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="evidence-graph-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block;"
		/>
	}
}
