//! Force-directed graph visualization component.
//!
//! Renders the band/member graph on an HTML canvas with:
//! - Physics-based node positioning via force simulation
//! - Neighborhood highlighting, cluster colors and search marks read from the
//!   element store the explorer writes to
//! - Pan, zoom, node dragging (cluster mates move along) and hover tooltips
//! - Configurable theming and visual scaling
//!
//! # Example
//!
//! ```ignore
//! use punx_graph::{ForceGraphCanvas, GraphController, GraphData, ViewerConfig};
//!
//! let controller = GraphController::new(ViewerConfig::default());
//! view! { <ForceGraphCanvas data=data controller=controller.clone() fullscreen=true /> }
//! ```

mod component;
mod controller;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use controller::{ExplorerStatus, GraphContext, GraphController};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, NodeDetails, NodeKind, RelatedEntry};
