//! Force-directed topology view.
//!
//! Renders the selected application's dependency graph on an HTML canvas:
//! - Physics-based layout seeded from the fetched node positions
//! - Pan, zoom, node dragging, and shift-drag edge creation
//! - Selection rings and hover glow with smooth transitions
//! - Keyboard deletion of the selected node and its incident edges
//!
//! The rendered document ([`RenderedGraph`]) is the only mutable graph
//! state; the inspector edits it through the same handle the canvas reads.

mod component;
mod doc;
mod render;
pub mod scale;
mod scene;
pub mod theme;

pub use component::{GraphView, TopologyCanvas};
pub use doc::RenderedGraph;
