//! Render-independent exploration state: neighborhood highlighting, clusters,
//! search and filtering.
//!
//! Every operation takes the graph it acts on as a [`GraphHandle`] and fully
//! rewrites the display state it owns, so the result never depends on what
//! was marked before.
//!
//! ```
//! use punx_graph::explore::{ClusterColor, Explorer, GraphHandle, GraphStore};
//!
//! let mut graph = GraphStore::new(["A", "B", "C"], [("A", "B"), ("B", "C")]);
//! let mut explorer = Explorer::default();
//!
//! explorer.select_node(&mut graph, "A");
//! explorer.create_cluster(&mut graph, Some(ClusterColor::new("#ffd700")));
//!
//! assert_eq!(graph.node_color("B").as_deref(), Some("#ffd700"));
//! assert_eq!(graph.node_color("C"), None);
//! ```

mod cluster;
mod filter;
mod handle;
mod highlight;
mod search;
mod session;
mod store;

pub use cluster::{ClusterColor, ClusterManager, ClusterRecord, ClusterStyle, Membership};
pub use filter::ShowOnlyFilter;
pub use handle::{EdgeEnds, EdgeId, GraphHandle, Mark};
pub use highlight::{NeighborhoodHighlighter, compute_reachable};
pub use search::NodeSearch;
pub use session::Explorer;
pub use store::{ElementStyle, GraphStore};
