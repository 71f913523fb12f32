//! 优美标号
//!
//! 从 0..=|E| 中取互不相同的值标记顶点，使所有边权重（端点标签差的绝对值）两两不同。

use super::combinatorics::permutations;
use super::engine::{Labeling, LabelingKind, Search, SearchOptions};
use super::enumerate::{Candidates, Permutations};
use crate::error::Result;
use crate::graph::{Edge, Graph, VertexId};
use std::collections::HashSet;

/// 边权重：两端点标签之差的绝对值；任一端点非数值或溢出时为 None
pub fn edge_weight(graph: &Graph, edge: &Edge) -> Option<i64> {
    let (v1, v2) = edge.endpoints();
    let a = graph.vertex_label(v1)?.as_integer()?;
    let b = graph.vertex_label(v2)?.as_integer()?;
    a.checked_sub(b)?.checked_abs()
}

/// 当前顶点标签是否构成优美标号
pub fn is_graceful(graph: &Graph) -> bool {
    let mut weights = HashSet::with_capacity(graph.edge_count());
    for edge in graph.edges() {
        match edge_weight(graph, edge) {
            Some(w) if weights.insert(w) => {}
            _ => return false,
        }
    }
    true
}

/// 优美标号搜索策略
#[derive(Debug, Clone)]
pub struct Graceful {
    vertices: Vec<VertexId>,
    /// 值域大小 |E| + 1
    codomain: usize,
}

impl Labeling for Graceful {
    type Params = ();

    /// 对当前顶点顺序做快照，值域取 0..=|E|
    fn bind(graph: &Graph, _params: ()) -> Self {
        Self {
            vertices: graph.vertex_ids(),
            codomain: graph.edge_count() + 1,
        }
    }

    fn kind(&self) -> LabelingKind {
        LabelingKind::Graceful
    }

    fn total(&self) -> u128 {
        permutations(self.codomain, self.vertices.len())
    }

    fn candidates(&self) -> Candidates {
        Candidates::Permutations(Permutations::new(self.codomain, self.vertices.len()))
    }

    fn apply(&self, graph: &mut Graph, candidate: &[usize]) -> Result<()> {
        for (&vertex, &value) in self.vertices.iter().zip(candidate) {
            graph.set_vertex_label(vertex, value as i64)?;
        }
        Ok(())
    }

    fn evaluate(&self, graph: &Graph) -> bool {
        is_graceful(graph)
    }

    fn annotate(&self, graph: &mut Graph) -> Result<()> {
        let view: &Graph = graph;
        let weights: Vec<_> = view
            .edges()
            .filter_map(|e| edge_weight(view, e).map(|w| (e.id(), w)))
            .collect();
        for (edge, weight) in weights {
            graph.set_edge_label(edge, weight)?;
        }
        Ok(())
    }
}

/// 搜索优美标号
pub fn search_graceful(graph: &mut Graph, all: bool) -> Search<'_, Graceful> {
    search_graceful_with(graph, SearchOptions { all, annotate: true })
}

pub fn search_graceful_with(graph: &mut Graph, options: SearchOptions) -> Search<'_, Graceful> {
    Search::new(graph, (), options)
}
