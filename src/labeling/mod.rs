//! 图标号穷举搜索模块
//!
//! 包含反魔术标号、优美标号和支配集三种搜索，共用同一个惰性搜索引擎

mod antimagic;
pub mod combinatorics;
mod dominating;
mod engine;
pub mod enumerate;
mod graceful;

pub use antimagic::{is_antimagic, search_antimagic, search_antimagic_with, vertex_weight, Antimagic};
pub use dominating::{
    is_dominating_set, search_dominating_set, search_dominating_set_with, DominatingSet,
};
pub use engine::{Labeling, LabelingKind, Search, SearchOptions, SearchOutcome, Tick};
pub use graceful::{edge_weight, is_graceful, search_graceful, search_graceful_with, Graceful};
