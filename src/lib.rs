//! evidence-graph: force-directed visualization of evidence document
//! relationships.
//!
//! This crate provides a WASM-based canvas component that lays out a
//! collection of tagged documents as a similarity graph: documents sharing
//! category tags are linked, and an iterative force simulation settles the
//! layout over a fixed number of animation frames. Clicking a node hands the
//! document title back to the surrounding application as a search query.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, HtmlScriptElement, Window};

pub mod components;
pub mod engine;

pub use components::evidence_graph::EvidenceGraphCanvas;
pub use engine::{Document, LayoutEngine, LayoutFrame, TickSource};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("evidence-graph: logging initialized");
}

/// Load the document collection from a script element with
/// id="document-data". Expected format: a JSON array of document records.
fn load_documents() -> Option<Vec<Document>> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("document-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<Vec<Document>>(&json_text) {
		Ok(documents) => {
			info!("evidence-graph: loaded {} documents", documents.len());
			Some(documents)
		}
		Err(e) => {
			warn!("evidence-graph: failed to parse document data: {}", e);
			None
		}
	}
}

/// Hand a node click to the surrounding search subsystem: the document title
/// is dispatched as the detail of an `evidence-search` event on `window`.
fn forward_search_query(title: &str) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let init = CustomEventInit::new();
	init.set_detail(&title.into());
	if let Ok(event) = CustomEvent::new_with_event_init_dict("evidence-search", &init) {
		info!("evidence-graph: search query {title:?}");
		let _ = window.dispatch_event(&event);
	}
}

/// Main application component.
/// Loads the document collection from the DOM and renders the relationship
/// graph fullscreen, with a settling indicator until the layout finishes.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let documents = load_documents().unwrap_or_default();
	let documents_signal = Signal::derive(move || documents.clone());
	let settled = RwSignal::new(false);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Evidence Relationship Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<EvidenceGraphCanvas
				documents=documents_signal
				fullscreen=true
				settled=Some(settled)
				on_node_select=Callback::new(move |title: String| forward_search_query(&title))
			/>
			<div class="graph-overlay">
				<h1>"Evidence Relationship Map"</h1>
				<p class="subtitle">
					{move || {
						if settled.get() {
							"Documents sharing tags sit closer together. Click a node to search for it."
						} else {
							"Settling layout…"
						}
					}}
				</p>
			</div>
		</div>
	}
}
