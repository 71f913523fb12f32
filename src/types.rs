//! 通用类型定义
//!
//! 顶点/边标签既是算法输入（数值权重），也是展示文本

use serde::{Deserialize, Serialize};
use std::fmt;

/// 支配集搜索中"被选中"顶点的标记
pub const DOMINATING_MARK: &str = "o";

/// 标签值
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Label {
    /// 空标签
    #[default]
    Empty,
    /// 整数标签
    Integer(i64),
    /// 文本标签
    Text(String),
}

impl Label {
    /// 按最窄类型解析用户输入：空串为 `Empty`，整数字面量为 `Integer`，其余为 `Text`
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Label::Empty;
        }
        match trimmed.parse::<i64>() {
            Ok(n) => Label::Integer(n),
            Err(_) => Label::Text(s.to_string()),
        }
    }

    /// 创建文本标签
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Label::Empty
        } else {
            Label::Text(s)
        }
    }

    /// 数值解释（整数，或可解析为整数的文本）
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Label::Integer(n) => Some(*n),
            Label::Text(s) => s.trim().parse().ok(),
            Label::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Label::Empty)
    }

    /// 非空标签视为"已标记"
    pub fn is_marked(&self) -> bool {
        !self.is_empty()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Label::Empty => "empty",
            Label::Integer(_) => "int",
            Label::Text(_) => "text",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Empty => Ok(()),
            Label::Integer(n) => write!(f, "{}", n),
            Label::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Label::Integer(v)
    }
}

impl From<u64> for Label {
    fn from(v: u64) -> Self {
        Label::Integer(v as i64)
    }
}

impl From<usize> for Label {
    fn from(v: usize) -> Self {
        Label::Integer(v as i64)
    }
}

impl From<String> for Label {
    fn from(v: String) -> Self {
        Label::text(v)
    }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Label::text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!(Label::parse(""), Label::Empty);
        assert_eq!(Label::parse("   "), Label::Empty);
        assert_eq!(Label::parse("42"), Label::Integer(42));
        assert_eq!(Label::parse("-3"), Label::Integer(-3));
        assert_eq!(Label::parse("A"), Label::Text("A".to_string()));
    }

    #[test]
    fn test_label_numeric_view() {
        assert_eq!(Label::Integer(7).as_integer(), Some(7));
        assert_eq!(Label::Text("12".to_string()).as_integer(), Some(12));
        assert_eq!(Label::Text("x".to_string()).as_integer(), None);
        assert_eq!(Label::Empty.as_integer(), None);
    }

    #[test]
    fn test_label_marking_and_display() {
        assert!(!Label::Empty.is_marked());
        assert!(Label::from(DOMINATING_MARK).is_marked());
        assert_eq!(Label::from("").to_string(), "");
        assert_eq!(Label::Integer(5).to_string(), "5");
    }
}
