//! 顶点定义
//!
//! 顶点可独立创建，加入图后持有指向所属图的非拥有回引（`GraphId`）

use crate::types::Label;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VERTEX_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// 顶点 ID（进程内全局唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// 分配下一个未使用的 ID
    pub fn next() -> Self {
        Self(NEXT_VERTEX_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 图 ID，顶点用它回指所属的图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphId(pub u64);

impl GraphId {
    pub fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// 顶点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 当前标签（名称或权重）
    label: Label,
    /// 所属图（未加入任何图时为 None）
    graph: Option<GraphId>,
}

impl Vertex {
    /// 创建独立顶点
    pub fn new(label: impl Into<Label>) -> Self {
        Self::with_id(VertexId::next(), label)
    }

    /// 使用指定 ID 创建独立顶点
    pub fn with_id(id: VertexId, label: impl Into<Label>) -> Self {
        Self {
            id,
            label: label.into(),
            graph: None,
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取标签
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// 设置标签
    pub fn set_label(&mut self, label: impl Into<Label>) {
        self.label = label.into();
    }

    /// 所属图
    pub fn graph(&self) -> Option<GraphId> {
        self.graph
    }

    pub fn is_attached(&self) -> bool {
        self.graph.is_some()
    }

    pub(crate) fn set_graph(&mut self, graph: Option<GraphId>) {
        self.graph = graph;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_standalone() {
        let v = Vertex::new("A");

        assert_eq!(v.label(), &Label::Text("A".to_string()));
        assert!(v.graph().is_none());
        assert!(!v.is_attached());
    }

    #[test]
    fn test_vertex_ids_unique() {
        let a = Vertex::new("");
        let b = Vertex::new("");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_vertex_relabel() {
        let mut v = Vertex::with_id(VertexId::new(900), "");
        v.set_label(12i64);
        assert_eq!(v.label().as_integer(), Some(12));
        assert_eq!(v.id().to_string(), "v900");
    }
}
