//! LabelGraph - 小图组合标号穷举搜索
//!
//! 可编辑的无向图模型，以及在其上运行的穷举搜索：
//! - 反魔术标号（antimagic labeling）
//! - 优美标号（graceful labeling）
//! - 给定基数的支配集
//!
//! 搜索是惰性迭代器，由协作式驱动分批推进，宿主在批次之间保持响应。

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod generators;
pub mod graph;
pub mod labeling;
pub mod metrics;
pub mod types;

// 重导出常用类型
pub use config::SearchConfig;
pub use driver::{CancelHandle, Driver, NullReporter, Reporter, Step};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, EdgeRef, Graph, GraphId, Vertex, VertexId};
pub use labeling::{
    search_antimagic, search_dominating_set, search_graceful, Labeling, LabelingKind, Search,
    SearchOptions, SearchOutcome,
};
pub use types::Label;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
