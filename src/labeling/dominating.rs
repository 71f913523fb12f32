//! 支配集
//!
//! 选中的顶点标记为 "o"；每个顶点要么被选中，要么至少有一个被选中的邻居。

use super::combinatorics::combinations;
use super::engine::{Labeling, LabelingKind, Search, SearchOptions};
use super::enumerate::{Candidates, Combinations};
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use crate::types::{Label, DOMINATING_MARK};

/// 当前标记（非空标签）是否构成支配集
pub fn is_dominating_set(graph: &Graph) -> bool {
    graph.vertices().all(|vertex| {
        vertex.label().is_marked()
            || graph
                .neighbors(vertex.id())
                .into_iter()
                .any(|n| graph.vertex_label(n).is_some_and(Label::is_marked))
    })
}

/// 支配集搜索策略
#[derive(Debug, Clone)]
pub struct DominatingSet {
    vertices: Vec<VertexId>,
    cardinality: usize,
}

impl DominatingSet {
    fn mark(&self, graph: &mut Graph, candidate: &[usize], label: Label) -> Result<()> {
        for &i in candidate {
            graph.set_vertex_label(self.vertices[i], label.clone())?;
        }
        Ok(())
    }
}

impl Labeling for DominatingSet {
    type Params = usize;

    /// 对当前顶点顺序做快照；k > |V| 时候选空间为空
    fn bind(graph: &Graph, cardinality: usize) -> Self {
        Self {
            vertices: graph.vertex_ids(),
            cardinality,
        }
    }

    fn kind(&self) -> LabelingKind {
        LabelingKind::DominatingSet {
            cardinality: self.cardinality,
        }
    }

    fn total(&self) -> u128 {
        combinations(self.vertices.len(), self.cardinality)
    }

    fn candidates(&self) -> Candidates {
        Candidates::Combinations(Combinations::new(self.vertices.len(), self.cardinality))
    }

    fn prepare(&self, graph: &mut Graph) {
        graph.clear_vertex_labels();
    }

    fn apply(&self, graph: &mut Graph, candidate: &[usize]) -> Result<()> {
        self.mark(graph, candidate, Label::text(DOMINATING_MARK))
    }

    fn evaluate(&self, graph: &Graph) -> bool {
        is_dominating_set(graph)
    }

    fn retract(&self, graph: &mut Graph, candidate: &[usize]) -> Result<()> {
        self.mark(graph, candidate, Label::Empty)
    }
}

/// 搜索基数为 `cardinality` 的支配集
pub fn search_dominating_set(
    graph: &mut Graph,
    cardinality: usize,
    all: bool,
) -> Search<'_, DominatingSet> {
    search_dominating_set_with(graph, cardinality, SearchOptions { all, annotate: true })
}

pub fn search_dominating_set_with(
    graph: &mut Graph,
    cardinality: usize,
    options: SearchOptions,
) -> Search<'_, DominatingSet> {
    Search::new(graph, cardinality, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::SearchOutcome;

    fn star(leaves: usize) -> (Graph, VertexId, Vec<VertexId>) {
        let mut graph = Graph::new();
        let center = graph.create_vertex("c");
        let leaves: Vec<VertexId> = (0..leaves)
            .map(|_| {
                let leaf = graph.create_vertex("l");
                graph.add_edge((center, leaf), "").unwrap();
                leaf
            })
            .collect();
        (graph, center, leaves)
    }

    #[test]
    fn test_star_center_is_only_singleton_dominator() {
        let (mut graph, _, _) = star(3);
        let search = search_dominating_set(&mut graph, 1, true);
        assert_eq!(search.total(), 4);
        assert_eq!(
            search.run(),
            SearchOutcome::Counted {
                found: 1,
                attempted: 4
            }
        );
        // 穷举后标记全部清除
        assert!(graph.vertices().all(|v| v.label().is_empty()));
    }

    #[test]
    fn test_found_set_stays_marked() {
        let (mut graph, center, leaves) = star(3);
        assert_eq!(
            search_dominating_set(&mut graph, 1, false).run(),
            SearchOutcome::Found
        );
        assert!(graph.vertex_label(center).unwrap().is_marked());
        assert!(leaves
            .iter()
            .all(|&l| graph.vertex_label(l).unwrap().is_empty()));
    }

    #[test]
    fn test_empty_set_dominates_nothing() {
        let (mut graph, _, _) = star(2);
        let search = search_dominating_set(&mut graph, 0, true);
        assert_eq!(search.total(), 1);
        assert_eq!(
            search.run(),
            SearchOutcome::Counted {
                found: 0,
                attempted: 1
            }
        );
    }

    #[test]
    fn test_empty_graph_dominated_by_empty_set() {
        let mut graph = Graph::new();
        assert_eq!(
            search_dominating_set(&mut graph, 0, false).run(),
            SearchOutcome::Found
        );
    }

    #[test]
    fn test_cardinality_beyond_order_is_empty_space() {
        let (mut graph, _, _) = star(2);
        let search = search_dominating_set(&mut graph, 4, false);
        assert_eq!(search.total(), 0);
        assert_eq!(search.run(), SearchOutcome::NotFound);
    }

    #[test]
    fn test_prepare_clears_existing_names() {
        let (mut graph, center, _) = star(1);
        // 两个顶点的 K2：任意一个顶点都是支配集
        let outcome = search_dominating_set(&mut graph, 1, true).run();
        assert_eq!(
            outcome,
            SearchOutcome::Counted {
                found: 2,
                attempted: 2
            }
        );
        assert!(graph.vertex_label(center).unwrap().is_empty());
    }

    #[test]
    fn test_search_binds_graph_it_borrows() {
        let mut graph = Graph::new();
        graph.create_vertex("a");
        // 构造前加入的顶点必须进入候选空间
        graph.create_vertex("b");

        let search = Search::<DominatingSet>::new(&mut graph, 1, SearchOptions::exhaustive());
        assert_eq!(search.total(), 2);
        assert_eq!(
            search.run(),
            SearchOutcome::Counted {
                found: 0,
                attempted: 2
            }
        );
    }
}
