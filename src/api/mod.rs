pub mod subgraph;
