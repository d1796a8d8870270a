mod graph;
mod index;
mod load;
mod parse;
mod view;

pub use graph::{Device, Edge, GraphMetadata, LineageGraph};
pub use index::{Adjacency, GraphIndex};
pub use load::load_graph;
pub use parse::parse_graph;
pub use view::View;
