//! Evidence relationship graph canvas component.
//!
//! Renders a document collection as a force-directed graph on an HTML
//! canvas:
//! - documents sharing category tags are linked, more shared tags pulling
//!   nodes closer together
//! - layout runs cooperatively, one simulation step per animation frame
//! - hovering highlights a node; clicking forwards its title to the caller
//!   as a search query
//!
//! # Example
//!
//! ```ignore
//! use evidence_graph::{Document, EvidenceGraphCanvas};
//!
//! let documents: Vec<Document> = load_documents();
//!
//! view! {
//!     <EvidenceGraphCanvas
//!         documents=documents
//!         fullscreen=true
//!         on_node_select=move |title: String| search(title)
//!     />
//! }
//! ```

mod component;
mod render;
pub mod theme;

pub use component::EvidenceGraphCanvas;
pub use theme::Theme;
