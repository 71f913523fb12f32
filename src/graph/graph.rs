//! 图数据结构
//!
//! 简单无向图：无重边、无自环。顶点和边均按插入顺序稳定迭代，
//! 搜索引擎依赖这一点建立 候选下标 -> 顶点/边 的映射。

use super::edge::{Edge, EdgeId, EdgeRef};
use super::index::EdgeIndex;
use super::vertex::{GraphId, Vertex, VertexId};
use crate::error::{Error, Result};
use crate::types::Label;
use indexmap::IndexMap;
use tracing::debug;

/// 图
#[derive(Debug)]
pub struct Graph {
    /// 图 ID（顶点回引使用）
    id: GraphId,
    /// 顶点集合
    vertices: IndexMap<VertexId, Vertex>,
    /// 边集合
    edges: IndexMap<EdgeId, Edge>,
    /// 邻接索引
    index: EdgeIndex,
    /// 下一个边 ID
    next_edge_id: u64,
}

impl Clone for Graph {
    /// 副本是一个新图：分配新的图 ID，顶点回引指向副本
    fn clone(&self) -> Self {
        let id = GraphId::next();
        let vertices = self
            .vertices
            .iter()
            .map(|(&vid, vertex)| {
                let mut vertex = vertex.clone();
                vertex.set_graph(Some(id));
                (vid, vertex)
            })
            .collect();
        Self {
            id,
            vertices,
            edges: self.edges.clone(),
            index: self.index.clone(),
            next_edge_id: self.next_edge_id,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            id: GraphId::next(),
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            index: EdgeIndex::new(),
            next_edge_id: 1,
        }
    }

    /// 由初始顶点和 (端点, 端点, 标签) 三元组构建
    pub fn from_parts(vertices: Vec<Vertex>, edges: &[(VertexId, VertexId, Label)]) -> Result<Self> {
        let mut graph = Self::new();
        for vertex in vertices {
            graph.add_vertex(vertex);
        }
        for (v1, v2, label) in edges {
            graph.add_edge((*v1, *v2), label.clone())?;
        }
        Ok(graph)
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    // ==================== 顶点操作 ====================

    /// 加入顶点，已存在时返回 false
    pub fn add_vertex(&mut self, mut vertex: Vertex) -> bool {
        let id = vertex.id();
        if self.vertices.contains_key(&id) {
            return false;
        }
        vertex.set_graph(Some(self.id));
        self.vertices.insert(id, vertex);
        true
    }

    /// 创建并加入新顶点
    pub fn create_vertex(&mut self, label: impl Into<Label>) -> VertexId {
        let vertex = Vertex::new(label);
        let id = vertex.id();
        self.add_vertex(vertex);
        id
    }

    /// 删除顶点（先级联删除关联边），不存在时返回 false
    pub fn delete_vertex(&mut self, id: VertexId) -> bool {
        self.detach_vertex(id).is_some()
    }

    /// 删除顶点并返回脱离后的顶点（回引已清除）
    pub fn detach_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        if !self.vertices.contains_key(&id) {
            return None;
        }

        let incident = self.index.incident(id);
        if !incident.is_empty() {
            debug!(vertex = %id, edges = incident.len(), "级联删除关联边");
        }
        for (_, edge_id) in incident {
            self.delete_edge(edge_id);
        }

        let mut vertex = self.vertices.shift_remove(&id)?;
        vertex.set_graph(None);
        Some(vertex)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// 按插入顺序迭代顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// 顶点 ID 快照（稳定顺序）
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.keys().copied().collect()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex_label(&self, id: VertexId) -> Option<&Label> {
        self.vertices.get(&id).map(Vertex::label)
    }

    /// 设置顶点标签
    pub fn set_vertex_label(&mut self, id: VertexId, label: impl Into<Label>) -> Result<()> {
        let vertex = self
            .vertices
            .get_mut(&id)
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))?;
        vertex.set_label(label);
        Ok(())
    }

    /// 把所有顶点标签清空
    pub fn clear_vertex_labels(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.set_label(Label::Empty);
        }
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 任一端点不在图中时报错；两点间已有边时返回 `Ok(None)`。
    pub fn add_edge(
        &mut self,
        (v1, v2): (VertexId, VertexId),
        label: impl Into<Label>,
    ) -> Result<Option<EdgeId>> {
        for v in [v1, v2] {
            if !self.vertices.contains_key(&v) {
                return Err(Error::VertexNotInGraph(v.to_string()));
            }
        }
        if v1 == v2 {
            return Err(Error::SelfLoop(v1.to_string()));
        }
        if self.index.contains(v1, v2) {
            return Ok(None);
        }

        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        self.index.insert(id, v1, v2);
        self.edges.insert(id, Edge::new(id, v1, v2, label));

        Ok(Some(id))
    }

    /// 删除边（按 ID 或无序端点对），未找到时返回 false
    pub fn delete_edge(&mut self, edge: impl Into<EdgeRef>) -> bool {
        let Some(id) = self.resolve(edge.into()) else {
            return false;
        };
        match self.edges.shift_remove(&id) {
            Some(e) => {
                self.index.remove(e.v1(), e.v2());
                true
            }
            None => false,
        }
    }

    fn resolve(&self, edge: EdgeRef) -> Option<EdgeId> {
        match edge {
            EdgeRef::Id(id) => self.edges.contains_key(&id).then_some(id),
            EdgeRef::Pair(v1, v2) => self.index.get(v1, v2),
        }
    }

    /// 按无序端点对查边
    pub fn get_edge(&self, (v1, v2): (VertexId, VertexId)) -> Option<&Edge> {
        let id = self.index.get(v1, v2)?;
        self.edges.get(&id)
    }

    pub fn has_edge(&self, edge: impl Into<EdgeRef>) -> bool {
        self.resolve(edge.into()).is_some()
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// 按插入顺序迭代边
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// 边 ID 快照（稳定顺序）
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().copied().collect()
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_label(&self, id: EdgeId) -> Option<&Label> {
        self.edges.get(&id).map(Edge::label)
    }

    /// 设置边标签
    pub fn set_edge_label(&mut self, id: EdgeId, label: impl Into<Label>) -> Result<()> {
        let edge = self
            .edges
            .get_mut(&id)
            .ok_or_else(|| Error::EdgeNotFound(id.to_string()))?;
        edge.set_label(label);
        Ok(())
    }

    // ==================== 邻居查询 ====================

    /// 获取顶点的邻居
    pub fn neighbors(&self, vertex_id: VertexId) -> Vec<VertexId> {
        self.index.neighbors(vertex_id)
    }

    /// 获取关联边及其对端
    pub fn incident_edges(&self, vertex_id: VertexId) -> Vec<(VertexId, EdgeId)> {
        self.index.incident(vertex_id)
    }

    /// 获取顶点的度
    pub fn degree(&self, vertex_id: VertexId) -> usize {
        self.index.degree(vertex_id)
    }

    /// 获取邻接索引引用
    pub fn edge_index(&self) -> &EdgeIndex {
        &self.index
    }

    /// 删除全部顶点和边
    pub fn clear(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.set_graph(None);
        }
        self.vertices.clear();
        self.edges.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3() -> (Graph, VertexId, VertexId, VertexId) {
        let mut graph = Graph::new();
        let a = graph.create_vertex("A");
        let b = graph.create_vertex("B");
        let c = graph.create_vertex("C");
        graph.add_edge((a, b), "").unwrap();
        graph.add_edge((b, c), "").unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn test_graph_basic() {
        let (graph, a, b, c) = path3();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(b), vec![a, c]);
        assert_eq!(graph.degree(a), 1);
        assert!(graph.get_edge((c, b)).is_some());
        assert!(graph.get_edge((a, c)).is_none());
    }

    #[test]
    fn test_add_vertex_twice() {
        let mut graph = Graph::new();
        let v = Vertex::new("x");
        let copy = v.clone();

        assert!(graph.add_vertex(v));
        assert!(!graph.add_vertex(copy));
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.vertices().next().unwrap().graph(), Some(graph.id()));
    }

    #[test]
    fn test_add_edge_requires_members() {
        let mut graph = Graph::new();
        let a = graph.create_vertex("A");
        let outsider = Vertex::new("Z").id();

        let err = graph.add_edge((a, outsider), "").unwrap_err();
        assert!(matches!(err, Error::VertexNotInGraph(_)));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_rejects_self_loop() {
        let mut graph = Graph::new();
        let a = graph.create_vertex("A");
        assert!(matches!(graph.add_edge((a, a), ""), Err(Error::SelfLoop(_))));
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let (mut graph, a, b, _) = path3();

        assert_eq!(graph.add_edge((b, a), "7").unwrap(), None);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.get_edge((a, b)).unwrap().label().is_empty());
    }

    #[test]
    fn test_delete_edge_by_id_and_pair() {
        let (mut graph, a, b, c) = path3();
        let ab = graph.get_edge((a, b)).unwrap().id();

        assert!(graph.delete_edge(ab));
        assert!(!graph.delete_edge(ab));
        assert!(graph.delete_edge((c, b)));
        assert!(!graph.delete_edge((b, c)));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(b).is_empty());
    }

    #[test]
    fn test_delete_vertex_cascades() {
        let (mut graph, a, b, c) = path3();

        let detached = graph.detach_vertex(b).unwrap();
        assert!(detached.graph().is_none());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(a).is_empty());
        assert!(graph.neighbors(c).is_empty());
        assert_eq!(graph.edge_index().indexed_vertex_count(), 0);

        assert!(!graph.delete_vertex(b));
    }

    #[test]
    fn test_labels() {
        let (mut graph, a, b, _) = path3();
        let ab = graph.get_edge((a, b)).unwrap().id();

        graph.set_edge_label(ab, 5i64).unwrap();
        graph.set_vertex_label(a, "start").unwrap();
        assert_eq!(graph.edge_label(ab).unwrap().as_integer(), Some(5));
        assert_eq!(graph.vertex_label(a).unwrap().to_string(), "start");

        graph.clear_vertex_labels();
        assert!(graph.vertices().all(|v| v.label().is_empty()));

        assert!(matches!(
            graph.set_edge_label(EdgeId::new(999), 1i64),
            Err(Error::EdgeNotFound(_))
        ));
    }

    #[test]
    fn test_from_parts() {
        let vs: Vec<Vertex> = (0..3).map(|i| Vertex::new(i as i64)).collect();
        let ids: Vec<VertexId> = vs.iter().map(Vertex::id).collect();
        let graph = Graph::from_parts(
            vs,
            &[(ids[0], ids[1], Label::Integer(1)), (ids[1], ids[2], Label::Empty)],
        )
        .unwrap();

        assert_eq!(graph.vertex_ids(), ids);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_clone_is_a_new_graph() {
        let mut graph = Graph::new();
        let a = graph.create_vertex("a");
        let b = graph.create_vertex("b");
        graph.add_edge((a, b), 1i64).unwrap();

        let mut copy = graph.clone();
        assert_ne!(copy.id(), graph.id());
        assert_eq!(copy.vertex(a).and_then(Vertex::graph), Some(copy.id()));
        assert_eq!(graph.vertex(a).and_then(Vertex::graph), Some(graph.id()));
        assert_eq!(copy.edge_index(), graph.edge_index());

        // 副本上的修改不影响原图
        copy.set_vertex_label(a, 7i64).unwrap();
        assert!(copy.delete_edge((a, b)));
        assert_eq!(graph.vertex_label(a), Some(&Label::text("a")));
        assert!(graph.has_edge((a, b)));
    }
}
