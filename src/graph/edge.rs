//! 边定义
//!
//! 无向边：(A, B) 与 (B, A) 是同一条边

use crate::graph::vertex::VertexId;
use crate::types::Label;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// 边的引用方式：边 ID 或无序端点对
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRef {
    Id(EdgeId),
    Pair(VertexId, VertexId),
}

impl From<EdgeId> for EdgeRef {
    fn from(id: EdgeId) -> Self {
        EdgeRef::Id(id)
    }
}

impl From<(VertexId, VertexId)> for EdgeRef {
    fn from((v1, v2): (VertexId, VertexId)) -> Self {
        EdgeRef::Pair(v1, v2)
    }
}

/// 边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 端点一
    v1: VertexId,
    /// 端点二
    v2: VertexId,
    /// 标签
    label: Label,
}

impl Edge {
    /// 创建新边
    pub fn new(id: EdgeId, v1: VertexId, v2: VertexId, label: impl Into<Label>) -> Self {
        Self {
            id,
            v1,
            v2,
            label: label.into(),
        }
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取两个端点（保持创建时的顺序）
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.v1, self.v2)
    }

    pub fn v1(&self) -> VertexId {
        self.v1
    }

    pub fn v2(&self) -> VertexId {
        self.v2
    }

    /// 给定一个端点，返回另一个端点
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if v == self.v1 {
            Some(self.v2)
        } else if v == self.v2 {
            Some(self.v1)
        } else {
            None
        }
    }

    /// 是否连接 a 与 b（与顺序无关）
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.v1 == a && self.v2 == b) || (self.v1 == b && self.v2 == a)
    }

    /// 获取标签
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// 设置标签
    pub fn set_label(&mut self, label: impl Into<Label>) {
        self.label = label.into();
    }
}
