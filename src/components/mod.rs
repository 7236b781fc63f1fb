pub mod force_graph;
pub mod legend;
