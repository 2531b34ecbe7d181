//! UI components.

/// Canvas graph view and its controller.
pub mod force_graph;
