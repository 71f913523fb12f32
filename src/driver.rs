//! 协作式搜索驱动
//!
//! 每次 `resume` 最多评估 `batch_size` 个候选后把控制权交还宿主，
//! 宿主可以在两次 `resume` 之间重绘界面或请求取消。
//! 驱动只改变执行的交错方式，不改变搜索的顺序和结果。

use crate::config::{SearchConfig, DEFAULT_BATCH_SIZE};
use crate::labeling::{Labeling, LabelingKind, Search, SearchOutcome};
use crate::metrics::{global_metrics, Metrics, SearchTimer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// 宿主回调：进度条和结果文本
pub trait Reporter {
    /// 进度（0..=max）
    fn progress(&mut self, value: u128, max: u128);

    /// 最终结果文本
    fn result(&mut self, message: &str);
}

/// 丢弃所有报告
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn progress(&mut self, _value: u128, _max: u128) {}

    fn result(&mut self, _message: &str) {}
}

/// 由两个闭包组成的报告器
pub struct CallbackReporter<P, R>
where
    P: FnMut(u128, u128),
    R: FnMut(&str),
{
    on_progress: P,
    on_result: R,
}

impl<P, R> CallbackReporter<P, R>
where
    P: FnMut(u128, u128),
    R: FnMut(&str),
{
    pub fn new(on_progress: P, on_result: R) -> Self {
        Self {
            on_progress,
            on_result,
        }
    }
}

impl<P, R> Reporter for CallbackReporter<P, R>
where
    P: FnMut(u128, u128),
    R: FnMut(&str),
{
    fn progress(&mut self, value: u128, max: u128) {
        (self.on_progress)(value, max)
    }

    fn result(&mut self, message: &str) {
        (self.on_result)(message)
    }
}

/// 取消句柄，可在宿主的其他位置持有
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消；在下一次 `resume` 时生效
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// 清除取消请求，供下一次搜索复用
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// 一次 `resume` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 本批已评估完，等待宿主再次调度
    Pending { attempted: u128, total: u128 },
    /// 搜索完成
    Finished(SearchOutcome),
    /// 搜索被取消
    Cancelled { attempted: u128, total: u128 },
}

impl Step {
    pub fn is_pending(&self) -> bool {
        matches!(self, Step::Pending { .. })
    }
}

/// 协作式驱动
pub struct Driver<'g, L: Labeling> {
    search: Search<'g, L>,
    batch_size: usize,
    cancel: CancelHandle,
    metrics: Arc<Metrics>,
    timer: Option<SearchTimer>,
    terminal: Option<Step>,
}

impl<'g, L: Labeling> Driver<'g, L> {
    /// 以默认批大小包装一次搜索
    pub fn new(search: Search<'g, L>) -> Self {
        Self {
            search,
            batch_size: DEFAULT_BATCH_SIZE,
            cancel: CancelHandle::new(),
            metrics: global_metrics(),
            timer: None,
            terminal: None,
        }
    }

    /// 按配置包装一次搜索
    pub fn from_config(search: Search<'g, L>, config: &SearchConfig) -> Self {
        Self::new(search).with_batch_size(config.batch_size)
    }

    /// 设置批大小（至少为 1）
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// 使用外部提供的取消句柄
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// 把统计记到指定的 `Metrics` 而不是全局实例
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn kind(&self) -> LabelingKind {
        self.search.kind()
    }

    pub fn search(&self) -> &Search<'g, L> {
        &self.search
    }

    /// 评估下一批候选
    ///
    /// 终止后再次调用会直接返回同一个终止结果，不再报告。
    pub fn resume(&mut self, reporter: &mut dyn Reporter) -> Step {
        if let Some(step) = self.terminal {
            return step;
        }
        let metrics = Arc::clone(&self.metrics);
        if self.timer.is_none() {
            self.timer = Some(metrics.record_search_start());
        }

        if self.cancel.is_cancelled() {
            let attempted = self.search.attempted();
            let total = self.search.total();
            info!(kind = %self.kind(), attempted = %attempted, "搜索被取消");
            reporter.result(&format!(
                "Search cancelled after {} of {} candidates",
                attempted, total
            ));
            if let Some(timer) = self.timer.take() {
                metrics.record_search_cancelled(timer);
            }
            let step = Step::Cancelled { attempted, total };
            self.terminal = Some(step);
            return step;
        }

        let mut evaluated = 0u64;
        for _ in 0..self.batch_size {
            if self.search.next().is_none() {
                break;
            }
            evaluated += 1;
        }
        metrics.record_candidates(evaluated);
        reporter.progress(self.search.attempted(), self.search.total());
        debug!(evaluated, attempted = %self.search.attempted(), "批次完成");

        if !self.search.is_finished() {
            return Step::Pending {
                attempted: self.search.attempted(),
                total: self.search.total(),
            };
        }

        let outcome = self.search.outcome();
        reporter.result(&outcome.message(self.kind()));
        if let Some(timer) = self.timer.take() {
            metrics.record_search_complete(timer, &outcome);
        }
        let step = Step::Finished(outcome);
        self.terminal = Some(step);
        step
    }

    /// 阻塞式宿主循环：一直 resume 直到终止
    pub fn run_to_completion(&mut self, reporter: &mut dyn Reporter) -> Step {
        loop {
            let step = self.resume(reporter);
            if !step.is_pending() {
                return step;
            }
        }
    }

    /// 异步宿主循环：每批之后让出给 tokio 调度器
    pub async fn run_async(&mut self, reporter: &mut dyn Reporter) -> Step {
        loop {
            let step = self.resume(reporter);
            if !step.is_pending() {
                return step;
            }
            tokio::task::yield_now().await;
        }
    }
}

impl<'g, L: Labeling> Drop for Driver<'g, L> {
    /// 未到终止状态就被丢弃的搜索按取消计
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(kind = %self.kind(), attempted = %self.search.attempted(), "驱动提前丢弃");
            self.metrics.record_search_cancelled(timer);
        }
    }
}
