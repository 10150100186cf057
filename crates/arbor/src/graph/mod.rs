pub mod dispositor;

pub use dispositor::{
    Convergence, DispositorEdge, DispositorGraph, DispositorGraphBuilder, GraphNode, PressureLevel,
    UnresolvedRuler,
};
