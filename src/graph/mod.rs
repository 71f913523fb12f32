//! 图核心模块
//!
//! 定义顶点、边、邻接索引和图的核心数据结构

mod edge;
mod graph;
mod index;
mod vertex;

pub use edge::{Edge, EdgeId, EdgeRef};
pub use graph::Graph;
pub use index::EdgeIndex;
pub use vertex::{GraphId, Vertex, VertexId};
