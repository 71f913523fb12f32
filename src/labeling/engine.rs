//! 通用穷举搜索引擎
//!
//! 三种标号问题共用一个流程：枚举候选 -> 应用到图 -> 判定 -> 汇总。
//! 具体问题通过 [`Labeling`] 描述候选空间、应用方式和判定谓词。

use super::enumerate::Candidates;
use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// 标号问题类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelingKind {
    /// 反魔术边标号
    Antimagic,
    /// 优美顶点标号
    Graceful,
    /// 给定基数的支配集
    DominatingSet { cardinality: usize },
}

impl LabelingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelingKind::Antimagic => "antimagic",
            LabelingKind::Graceful => "graceful",
            LabelingKind::DominatingSet { .. } => "dominating-set",
        }
    }
}

impl fmt::Display for LabelingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelingKind::DominatingSet { cardinality } => {
                write!(f, "dominating-set(k={})", cardinality)
            }
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// 一种标号问题的搜索策略
///
/// 策略由 [`Search::new`] 在借用图的同时绑定，对图的顶点/边顺序做快照，
/// 候选下标都相对该快照解释。
pub trait Labeling: Sized {
    /// 绑定参数（支配集为基数，其余为 `()`）
    type Params;

    /// 对图做快照
    fn bind(graph: &Graph, params: Self::Params) -> Self;

    /// 问题类型
    fn kind(&self) -> LabelingKind;

    /// 精确的候选总数
    fn total(&self) -> u128;

    /// 惰性候选序列
    fn candidates(&self) -> Candidates;

    /// 搜索开始前对图的准备
    fn prepare(&self, _graph: &mut Graph) {}

    /// 把候选写入图标签
    fn apply(&self, graph: &mut Graph, candidate: &[usize]) -> Result<()>;

    /// 纯判定：只读当前图状态
    fn evaluate(&self, graph: &Graph) -> bool;

    /// 把判定过程中计算的权重写回标签用于展示
    fn annotate(&self, _graph: &mut Graph) -> Result<()> {
        Ok(())
    }

    /// 撤销未被接受的候选
    fn retract(&self, _graph: &mut Graph, _candidate: &[usize]) -> Result<()> {
        Ok(())
    }
}

/// 搜索选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// true 时穷举全部候选并计数，false 时找到第一个即停止
    pub all: bool,
    /// 是否把权重写回标签
    pub annotate: bool,
}

impl SearchOptions {
    pub fn first() -> Self {
        Self {
            all: false,
            annotate: true,
        }
    }

    pub fn exhaustive() -> Self {
        Self {
            all: true,
            annotate: true,
        }
    }

    pub fn with_annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::first()
    }
}

/// 进度事件：每评估一个候选产出一个
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// 已评估候选数（从 1 开始）
    pub attempt: u128,
    /// 候选总数
    pub total: u128,
    /// 目前满足谓词的候选数
    pub found: u128,
    /// 本候选是否满足谓词
    pub satisfied: bool,
}

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// 找到满足条件的候选（`all = false`）
    Found,
    /// 候选耗尽仍未找到（`all = false`）
    NotFound,
    /// 穷举计数（`all = true`）
    Counted { found: u128, attempted: u128 },
    /// 某个候选无法写入图，搜索中止；结果不可用
    Aborted { attempted: u128 },
}

impl SearchOutcome {
    /// found / attempted；attempted 为 0 时没有比例
    pub fn ratio(&self) -> Option<f64> {
        match *self {
            SearchOutcome::Counted { found, attempted } if attempted > 0 => {
                Some(found as f64 / attempted as f64)
            }
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        match *self {
            SearchOutcome::Found => true,
            SearchOutcome::NotFound | SearchOutcome::Aborted { .. } => false,
            SearchOutcome::Counted { found, .. } => found > 0,
        }
    }

    /// 面向宿主的结果文本
    pub fn message(&self, kind: LabelingKind) -> String {
        let (article_noun, plural) = match kind {
            LabelingKind::Antimagic => ("An antimagic labeling", "antimagic"),
            LabelingKind::Graceful => ("A graceful labeling", "graceful"),
            LabelingKind::DominatingSet { .. } => ("A dominating set", "dominating sets"),
        };

        match *self {
            SearchOutcome::Found => format!("{} was found", article_noun),
            SearchOutcome::NotFound => match kind {
                LabelingKind::DominatingSet { cardinality } => format!(
                    "No dominating sets with cardinality {} was found",
                    cardinality
                ),
                _ => format!("No {} labeling was found", plural),
            },
            SearchOutcome::Counted { found, attempted } => match self.ratio() {
                Some(ratio) => format!("{} out of {} ({}) are {}", found, attempted, ratio, plural),
                None => format!("{} out of {} are {}", found, attempted, plural),
            },
            SearchOutcome::Aborted { attempted } => {
                format!("Search aborted after {} candidates", attempted)
            }
        }
    }
}

/// 一次搜索
///
/// 作为 `Iterator<Item = Tick>` 惰性推进；搜索期间独占 `&mut Graph`。
/// 结束后的图状态：`all = false` 且找到时保留该候选；否则保留最后尝试的候选
/// （由策略的 `retract` 决定是否清除）。
pub struct Search<'g, L: Labeling> {
    graph: &'g mut Graph,
    labeling: L,
    options: SearchOptions,
    candidates: Candidates,
    total: u128,
    attempted: u128,
    found: u128,
    prepared: bool,
    finished: bool,
    failure: Option<Error>,
}

impl<'g, L: Labeling> Search<'g, L> {
    /// 绑定策略并创建搜索；在第一次 `next()` 之前不会改动图
    pub fn new(graph: &'g mut Graph, params: L::Params, options: SearchOptions) -> Self {
        let labeling = L::bind(graph, params);
        let candidates = labeling.candidates();
        let total = labeling.total();
        Self {
            graph,
            labeling,
            options,
            candidates,
            total,
            attempted: 0,
            found: 0,
            prepared: false,
            finished: false,
            failure: None,
        }
    }

    pub fn kind(&self) -> LabelingKind {
        self.labeling.kind()
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// 精确的候选总数（预先计算）
    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn attempted(&self) -> u128 {
        self.attempted
    }

    pub fn found(&self) -> u128 {
        self.found
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 导致搜索中止的错误
    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    /// 只读访问被搜索的图
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    /// 当前结果（未结束时按已评估部分计算）
    pub fn outcome(&self) -> SearchOutcome {
        if self.failure.is_some() {
            SearchOutcome::Aborted {
                attempted: self.attempted,
            }
        } else if self.options.all {
            SearchOutcome::Counted {
                found: self.found,
                attempted: self.attempted,
            }
        } else if self.found > 0 {
            SearchOutcome::Found
        } else {
            SearchOutcome::NotFound
        }
    }

    /// 跑完剩余候选并返回结果
    pub fn run(mut self) -> SearchOutcome {
        self.by_ref().for_each(drop);
        self.outcome()
    }

    /// 应用、判定、标注一个候选；未被接受时撤销
    fn try_candidate(&mut self, candidate: &[usize]) -> Result<bool> {
        self.labeling.apply(self.graph, candidate)?;
        let satisfied = self.labeling.evaluate(self.graph);
        if self.options.annotate {
            self.labeling.annotate(self.graph)?;
        }

        if satisfied {
            self.found += 1;
            debug!(attempt = %self.attempted, ?candidate, "候选满足条件");
        }

        if satisfied && !self.options.all {
            self.finish();
        } else {
            self.labeling.retract(self.graph, candidate)?;
        }
        Ok(satisfied)
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        info!(
            kind = %self.labeling.kind(),
            attempted = %self.attempted,
            found = %self.found,
            total = %self.total,
            "搜索结束"
        );
    }
}

impl<'g, L: Labeling> Iterator for Search<'g, L> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.finished {
            return None;
        }
        if !self.prepared {
            self.prepared = true;
            info!(
                kind = %self.labeling.kind(),
                total = %self.total,
                all = self.options.all,
                "搜索开始"
            );
            self.labeling.prepare(self.graph);
        }

        let Some(candidate) = self.candidates.next() else {
            self.finish();
            return None;
        };
        self.attempted += 1;

        let satisfied = match self.try_candidate(&candidate) {
            Ok(satisfied) => satisfied,
            Err(e) => {
                warn!(error = %e, attempt = %self.attempted, "候选无法写入图，搜索中止");
                self.failure = Some(e);
                self.finish();
                return None;
            }
        };

        Some(Tick {
            attempt: self.attempted,
            total: self.total,
            found: self.found,
            satisfied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;
    use crate::labeling::enumerate::Permutations;

    /// 第二个候选指向不存在的顶点
    struct Faulty {
        vertex: VertexId,
    }

    impl Labeling for Faulty {
        type Params = ();

        fn bind(graph: &Graph, _params: ()) -> Self {
            Self {
                vertex: graph.vertex_ids()[0],
            }
        }

        fn kind(&self) -> LabelingKind {
            LabelingKind::Antimagic
        }

        fn total(&self) -> u128 {
            2
        }

        fn candidates(&self) -> Candidates {
            Candidates::Permutations(Permutations::new(2, 2))
        }

        fn apply(&self, graph: &mut Graph, candidate: &[usize]) -> Result<()> {
            let target = if candidate[0] == 0 {
                self.vertex
            } else {
                VertexId::new(u64::MAX)
            };
            graph.set_vertex_label(target, candidate[0] as i64)
        }

        fn evaluate(&self, _graph: &Graph) -> bool {
            false
        }
    }

    #[test]
    fn test_failed_apply_aborts_search() {
        let mut graph = Graph::new();
        graph.create_vertex("");

        let mut search: Search<'_, Faulty> =
            Search::new(&mut graph, (), SearchOptions::exhaustive());
        assert!(search.next().is_some());
        assert!(search.next().is_none());
        assert!(search.is_finished());
        assert!(matches!(search.failure(), Some(Error::VertexNotFound(_))));

        let outcome = search.outcome();
        assert_eq!(outcome, SearchOutcome::Aborted { attempted: 2 });
        assert!(!outcome.is_found());
        assert_eq!(outcome.ratio(), None);
        assert_eq!(
            outcome.message(LabelingKind::Antimagic),
            "Search aborted after 2 candidates"
        );
    }

    #[test]
    fn test_ratio_undefined_without_attempts() {
        let empty = SearchOutcome::Counted {
            found: 0,
            attempted: 0,
        };
        assert_eq!(empty.ratio(), None);
        assert_eq!(
            empty.message(LabelingKind::Antimagic),
            "0 out of 0 are antimagic"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            SearchOutcome::Found.message(LabelingKind::Graceful),
            "A graceful labeling was found"
        );
        assert_eq!(
            SearchOutcome::NotFound.message(LabelingKind::Antimagic),
            "No antimagic labeling was found"
        );
        assert_eq!(
            SearchOutcome::NotFound.message(LabelingKind::DominatingSet { cardinality: 2 }),
            "No dominating sets with cardinality 2 was found"
        );
        assert_eq!(
            SearchOutcome::Counted {
                found: 1,
                attempted: 4
            }
            .message(LabelingKind::DominatingSet { cardinality: 1 }),
            "1 out of 4 (0.25) are dominating sets"
        );
        assert_eq!(
            SearchOutcome::Counted {
                found: 6,
                attempted: 6
            }
            .message(LabelingKind::Graceful),
            "6 out of 6 (1) are graceful"
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(LabelingKind::Antimagic.to_string(), "antimagic");
        assert_eq!(
            LabelingKind::DominatingSet { cardinality: 3 }.to_string(),
            "dominating-set(k=3)"
        );
    }
}
