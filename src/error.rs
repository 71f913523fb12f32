//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不在图中: {0}")]
    VertexNotInGraph(String),

    #[error("不允许自环: {0}")]
    SelfLoop(String),

    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("边不存在: {0}")]
    EdgeNotFound(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("搜索空间过大: {total} 个候选, 上限 {limit}")]
    SearchSpaceTooLarge { total: u128, limit: u128 },

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
