//! 搜索配置
//!
//! 可从 JSON 文件加载，缺省字段取默认值；命令行参数再覆盖

use crate::error::{Error, Result};
use crate::labeling::SearchOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 每轮调度评估的默认候选数
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// 默认的候选总数上限
pub const DEFAULT_MAX_CANDIDATES: u64 = 50_000_000;

/// 搜索配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 每次 resume 评估的候选数
    pub batch_size: usize,
    /// 是否把权重写回标签
    pub annotate: bool,
    /// 候选总数超过该值时拒绝启动
    pub max_candidates: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            annotate: true,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl SearchConfig {
    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::ConfigError("batch_size 必须大于 0".to_string()));
        }
        if self.max_candidates == 0 {
            return Err(Error::ConfigError("max_candidates 必须大于 0".to_string()));
        }
        Ok(())
    }

    /// 检查候选总数是否在允许范围内
    pub fn admit(&self, total: u128) -> Result<()> {
        let limit = self.max_candidates as u128;
        if total > limit {
            return Err(Error::SearchSpaceTooLarge { total, limit });
        }
        Ok(())
    }

    /// 生成搜索选项
    pub fn search_options(&self, all: bool) -> SearchOptions {
        SearchOptions {
            all,
            annotate: self.annotate,
        }
    }
}
