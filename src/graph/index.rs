//! 邻接索引
//!
//! 两级映射 顶点 -> 邻居 -> 边，支持 O(1) 邻居查询和按端点查边

use crate::graph::edge::EdgeId;
use crate::graph::vertex::VertexId;
use indexmap::IndexMap;

/// 边索引
///
/// 只有度数大于零的顶点才占有槽位，删除最后一条关联边时槽位一并移除，
/// 因此"加边再删边"会把索引恢复成完全相同的状态。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeIndex {
    adjacency: IndexMap<VertexId, IndexMap<VertexId, EdgeId>>,
}

impl EdgeIndex {
    /// 创建新索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 在两个端点下登记边
    pub fn insert(&mut self, edge_id: EdgeId, v1: VertexId, v2: VertexId) {
        self.adjacency.entry(v1).or_default().insert(v2, edge_id);
        self.adjacency.entry(v2).or_default().insert(v1, edge_id);
    }

    /// 按端点移除边，返回被移除的边 ID
    pub fn remove(&mut self, v1: VertexId, v2: VertexId) -> Option<EdgeId> {
        let edge_id = self.detach_slot(v1, v2)?;
        self.detach_slot(v2, v1);
        Some(edge_id)
    }

    fn detach_slot(&mut self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        let slot = self.adjacency.get_mut(&from)?;
        let edge_id = slot.shift_remove(&to)?;
        if slot.is_empty() {
            self.adjacency.shift_remove(&from);
        }
        Some(edge_id)
    }

    /// 按端点查边
    pub fn get(&self, v1: VertexId, v2: VertexId) -> Option<EdgeId> {
        self.adjacency.get(&v1)?.get(&v2).copied()
    }

    pub fn contains(&self, v1: VertexId, v2: VertexId) -> bool {
        self.get(v1, v2).is_some()
    }

    /// 获取邻居（按加边顺序）
    pub fn neighbors(&self, vertex_id: VertexId) -> Vec<VertexId> {
        self.adjacency
            .get(&vertex_id)
            .map(|slot| slot.keys().copied().collect())
            .unwrap_or_default()
    }

    /// 获取关联边及其对端
    pub fn incident(&self, vertex_id: VertexId) -> Vec<(VertexId, EdgeId)> {
        self.adjacency
            .get(&vertex_id)
            .map(|slot| slot.iter().map(|(&v, &e)| (v, e)).collect())
            .unwrap_or_default()
    }

    /// 获取顶点的度
    pub fn degree(&self, vertex_id: VertexId) -> usize {
        self.adjacency.get(&vertex_id).map(|slot| slot.len()).unwrap_or(0)
    }

    /// 有关联边的顶点数
    pub fn indexed_vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }
}
