//! Evidence relationship layout engine.
//!
//! Everything under this module is plain Rust with no browser dependency:
//! documents go in, a tag-similarity graph comes out
//! ([`build_graph`]), and a [`LayoutEngine`] steps the force simulation once
//! per tick of an injected [`TickSource`], publishing a read-only
//! [`LayoutFrame`] after every completed step. The Leptos component in
//! `crate::components` supplies the animation-frame tick source and renders
//! the published frames.

mod document;
mod graph;
mod scheduler;
mod simulation;
mod view;

pub use document::Document;
pub use graph::{Bounds, Edge, Graph, Node, build_graph};
pub use scheduler::{ITERATION_BUDGET, LayoutEngine, RunPhase, TickSource};
pub use view::{EdgeView, LayoutFrame, NodeView, PALETTE_SIZE, palette_index};
