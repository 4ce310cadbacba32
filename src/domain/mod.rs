//! Domain logic independent of any transport or UI

pub mod graph;

pub use graph::{parse, Graph, GraphEdge, GraphNode};
