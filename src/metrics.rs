//! 性能指标收集模块
//!
//! 统计搜索次数、评估的候选数和找到的标号数，并导出为 Prometheus 文本格式

use crate::labeling::SearchOutcome;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 搜索统计
    search_stats: SearchStats,
    /// 启动时间
    start_time: Instant,
}

/// 搜索统计
#[derive(Debug, Default)]
struct SearchStats {
    /// 启动的搜索数
    started: AtomicU64,
    /// 正常结束的搜索数
    completed: AtomicU64,
    /// 被取消的搜索数
    cancelled: AtomicU64,
    /// 评估过的候选数
    candidates_evaluated: AtomicU64,
    /// 满足谓词的候选数
    labelings_found: AtomicU64,
    /// 搜索总耗时（微秒）
    total_duration_us: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub searches_started: u64,
    pub searches_completed: u64,
    pub searches_cancelled: u64,
    pub candidates_evaluated: u64,
    pub labelings_found: u64,
    pub avg_search_duration_ms: f64,
    pub candidates_per_second: f64,
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            search_stats: SearchStats::default(),
            start_time: Instant::now(),
        }
    }

    /// 记录搜索开始
    pub fn record_search_start(&self) -> SearchTimer {
        self.search_stats.started.fetch_add(1, Ordering::Relaxed);
        SearchTimer::new()
    }

    /// 记录一批评估过的候选
    pub fn record_candidates(&self, count: u64) {
        self.search_stats
            .candidates_evaluated
            .fetch_add(count, Ordering::Relaxed);
    }

    /// 记录搜索结束
    pub fn record_search_complete(&self, timer: SearchTimer, outcome: &SearchOutcome) {
        self.search_stats.completed.fetch_add(1, Ordering::Relaxed);
        let found = match *outcome {
            SearchOutcome::Found => 1,
            SearchOutcome::NotFound | SearchOutcome::Aborted { .. } => 0,
            SearchOutcome::Counted { found, .. } => found.min(u64::MAX as u128) as u64,
        };
        self.search_stats
            .labelings_found
            .fetch_add(found, Ordering::Relaxed);
        self.record_duration(timer.elapsed());
    }

    /// 记录搜索被取消
    pub fn record_search_cancelled(&self, timer: SearchTimer) {
        self.search_stats.cancelled.fetch_add(1, Ordering::Relaxed);
        self.record_duration(timer.elapsed());
    }

    fn record_duration(&self, duration: Duration) {
        self.search_stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let started = self.search_stats.started.load(Ordering::Relaxed);
        let completed = self.search_stats.completed.load(Ordering::Relaxed);
        let cancelled = self.search_stats.cancelled.load(Ordering::Relaxed);
        let candidates = self.search_stats.candidates_evaluated.load(Ordering::Relaxed);
        let total_duration_us = self.search_stats.total_duration_us.load(Ordering::Relaxed);

        let finished = completed + cancelled;
        let avg_search_duration_ms = if finished > 0 {
            (total_duration_us as f64) / (finished as f64) / 1000.0
        } else {
            0.0
        };

        let candidates_per_second = if total_duration_us > 0 {
            (candidates as f64) / (total_duration_us as f64 / 1_000_000.0)
        } else {
            0.0
        };

        MetricsSnapshot {
            searches_started: started,
            searches_completed: completed,
            searches_cancelled: cancelled,
            candidates_evaluated: candidates,
            labelings_found: self.search_stats.labelings_found.load(Ordering::Relaxed),
            avg_search_duration_ms,
            candidates_per_second,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let mut content = String::new();
        let mut push = |name: &str, kind: &str, help: &str, value: String| {
            content.push_str(&format!("# HELP labelgraph_{} {}\n", name, help));
            content.push_str(&format!("# TYPE labelgraph_{} {}\n", name, kind));
            content.push_str(&format!("labelgraph_{} {}\n", name, value));
        };

        push(
            "searches_started_total",
            "counter",
            "Total number of searches started",
            snapshot.searches_started.to_string(),
        );
        push(
            "searches_completed_total",
            "counter",
            "Number of searches that ran to completion",
            snapshot.searches_completed.to_string(),
        );
        push(
            "searches_cancelled_total",
            "counter",
            "Number of searches cancelled by the host",
            snapshot.searches_cancelled.to_string(),
        );
        push(
            "candidates_evaluated_total",
            "counter",
            "Total candidates evaluated",
            snapshot.candidates_evaluated.to_string(),
        );
        push(
            "labelings_found_total",
            "counter",
            "Total candidates satisfying their predicate",
            snapshot.labelings_found.to_string(),
        );
        push(
            "search_duration_avg_ms",
            "gauge",
            "Average search duration in milliseconds",
            format!("{:.2}", snapshot.avg_search_duration_ms),
        );
        push(
            "candidates_per_second",
            "gauge",
            "Candidate evaluation throughput",
            format!("{:.2}", snapshot.candidates_per_second),
        );
        push(
            "uptime_seconds",
            "counter",
            "Process uptime in seconds",
            snapshot.uptime_seconds.to_string(),
        );

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.search_stats.started.store(0, Ordering::Relaxed);
        self.search_stats.completed.store(0, Ordering::Relaxed);
        self.search_stats.cancelled.store(0, Ordering::Relaxed);
        self.search_stats.candidates_evaluated.store(0, Ordering::Relaxed);
        self.search_stats.labelings_found.store(0, Ordering::Relaxed);
        self.search_stats.total_duration_us.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 搜索计时器
#[derive(Debug)]
pub struct SearchTimer {
    start: Instant,
}

impl SearchTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_search_start();
        metrics.record_candidates(24);
        metrics.record_search_complete(
            timer,
            &SearchOutcome::Counted {
                found: 12,
                attempted: 24,
            },
        );

        let timer = metrics.record_search_start();
        metrics.record_search_cancelled(timer);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.searches_started, 2);
        assert_eq!(snapshot.searches_completed, 1);
        assert_eq!(snapshot.searches_cancelled, 1);
        assert_eq!(snapshot.candidates_evaluated, 24);
        assert_eq!(snapshot.labelings_found, 12);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.record_search_start();
        metrics.record_candidates(3);

        let prom = metrics.to_prometheus();
        assert!(prom.content.contains("labelgraph_searches_started_total 1"));
        assert!(prom.content.contains("labelgraph_candidates_evaluated_total 3"));
        assert!(prom
            .content
            .contains("# TYPE labelgraph_search_duration_avg_ms gauge"));
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_search_start();
        metrics.record_candidates(10);
        metrics.reset();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.searches_started, 0);
        assert_eq!(snapshot.candidates_evaluated, 0);
    }
}
