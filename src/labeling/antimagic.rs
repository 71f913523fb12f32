//! 反魔术标号
//!
//! 用 1..=|E| 各一次标记边，使所有顶点权重（关联边标签之和）两两不同。

use super::combinatorics::factorial;
use super::engine::{Labeling, LabelingKind, Search, SearchOptions};
use super::enumerate::{Candidates, Permutations};
use crate::error::Result;
use crate::graph::{EdgeId, Graph, VertexId};
use std::collections::HashSet;

/// 顶点权重：关联边标签按整数求和；存在非数值标签或溢出时为 None
pub fn vertex_weight(graph: &Graph, vertex: VertexId) -> Option<i64> {
    graph
        .incident_edges(vertex)
        .into_iter()
        .try_fold(0i64, |sum, (_, edge_id)| {
            let weight = graph.edge_label(edge_id)?.as_integer()?;
            sum.checked_add(weight)
        })
}

/// 当前边标签是否构成反魔术标号
pub fn is_antimagic(graph: &Graph) -> bool {
    let mut weights = HashSet::with_capacity(graph.vertex_count());
    for vertex in graph.vertices() {
        match vertex_weight(graph, vertex.id()) {
            Some(w) if weights.insert(w) => {}
            _ => return false,
        }
    }
    true
}

/// 反魔术标号搜索策略
#[derive(Debug, Clone)]
pub struct Antimagic {
    edges: Vec<EdgeId>,
}

impl Labeling for Antimagic {
    type Params = ();

    /// 对当前边顺序做快照
    fn bind(graph: &Graph, _params: ()) -> Self {
        Self {
            edges: graph.edge_ids(),
        }
    }

    fn kind(&self) -> LabelingKind {
        LabelingKind::Antimagic
    }

    fn total(&self) -> u128 {
        factorial(self.edges.len())
    }

    fn candidates(&self) -> Candidates {
        Candidates::Permutations(Permutations::new(self.edges.len(), self.edges.len()))
    }

    fn apply(&self, graph: &mut Graph, candidate: &[usize]) -> Result<()> {
        for (position, &edge) in candidate.iter().enumerate() {
            graph.set_edge_label(self.edges[edge], (position + 1) as i64)?;
        }
        Ok(())
    }

    fn evaluate(&self, graph: &Graph) -> bool {
        is_antimagic(graph)
    }

    fn annotate(&self, graph: &mut Graph) -> Result<()> {
        for vertex in graph.vertex_ids() {
            if let Some(weight) = vertex_weight(graph, vertex) {
                graph.set_vertex_label(vertex, weight)?;
            }
        }
        Ok(())
    }
}

/// 搜索反魔术标号
pub fn search_antimagic(graph: &mut Graph, all: bool) -> Search<'_, Antimagic> {
    search_antimagic_with(graph, SearchOptions { all, annotate: true })
}

pub fn search_antimagic_with(graph: &mut Graph, options: SearchOptions) -> Search<'_, Antimagic> {
    Search::new(graph, (), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::SearchOutcome;
    use crate::types::Label;

    fn path(n: usize) -> (Graph, Vec<VertexId>) {
        let mut graph = Graph::new();
        let vs: Vec<VertexId> = (0..n).map(|i| graph.create_vertex(i as i64)).collect();
        for w in vs.windows(2) {
            graph.add_edge((w[0], w[1]), "").unwrap();
        }
        (graph, vs)
    }

    #[test]
    fn test_path3_counts_both_labelings() {
        let (mut graph, _) = path(3);
        let search = search_antimagic(&mut graph, true);
        assert_eq!(search.total(), 2);

        // 两种标号下顶点权重均为 {1, 3, 2} 或 {2, 3, 1}，都两两不同
        assert_eq!(
            search.run(),
            SearchOutcome::Counted {
                found: 2,
                attempted: 2
            }
        );
    }

    #[test]
    fn test_first_found_leaves_candidate_visible() {
        let (mut graph, vs) = path(3);
        let outcome = search_antimagic(&mut graph, false).run();
        assert_eq!(outcome, SearchOutcome::Found);

        // 第一个候选：边按顺序标 1, 2
        assert_eq!(graph.vertex_label(vs[0]), Some(&Label::Integer(1)));
        assert_eq!(graph.vertex_label(vs[1]), Some(&Label::Integer(3)));
        assert_eq!(graph.vertex_label(vs[2]), Some(&Label::Integer(2)));
        assert!(is_antimagic(&graph));
    }

    #[test]
    fn test_single_edge_is_not_antimagic() {
        let (mut graph, _) = path(2);
        let outcome = search_antimagic(&mut graph, true).run();
        assert_eq!(
            outcome,
            SearchOutcome::Counted {
                found: 0,
                attempted: 1
            }
        );
    }

    #[test]
    fn test_non_numeric_label_fails_predicate() {
        let (mut graph, vs) = path(3);
        let e = graph.get_edge((vs[0], vs[1])).unwrap().id();
        graph.set_edge_label(e, "x").unwrap();
        assert_eq!(vertex_weight(&graph, vs[0]), None);
        assert!(!is_antimagic(&graph));
    }

    #[test]
    fn test_without_annotation_vertex_labels_untouched() {
        let (mut graph, vs) = path(3);
        let options = SearchOptions::exhaustive().with_annotate(false);
        search_antimagic_with(&mut graph, options).run();
        assert_eq!(graph.vertex_label(vs[1]), Some(&Label::Integer(1)));
    }

    #[test]
    fn test_edgeless_graph_has_one_candidate() {
        let mut graph = Graph::new();
        graph.create_vertex("");
        let search = search_antimagic(&mut graph, true);
        assert_eq!(search.total(), 1);
        // 单个孤立顶点权重为 0，自然两两不同
        assert_eq!(
            search.run(),
            SearchOutcome::Counted {
                found: 1,
                attempted: 1
            }
        );
    }

    #[test]
    fn test_overflowing_weight_is_none() {
        let (mut graph, vs) = path(3);
        for (a, b) in [(vs[0], vs[1]), (vs[1], vs[2])] {
            let e = graph.get_edge((a, b)).unwrap().id();
            graph.set_edge_label(e, i64::MAX).unwrap();
        }
        assert_eq!(vertex_weight(&graph, vs[0]), Some(i64::MAX));
        assert_eq!(vertex_weight(&graph, vs[1]), None);
        assert!(!is_antimagic(&graph));
    }
}
