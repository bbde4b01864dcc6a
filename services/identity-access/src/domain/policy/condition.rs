//! 冲突条件
//!
//! 冲突规则的每一侧是一个条件: 精确角色名、伪标签
//! (ANY_OPERATIONAL / ANY_WRITE) 或具体的写标签。

use serde::{Deserialize, Serialize};
use tpa_common::RoleName;

use super::tables::PolicyTables;

/// 写标签集合
pub const WRITE_TAGS: [&str; 3] = ["Identity-Write", "Finance-Write", "Operations-Write"];

/// 判断标签是否属于写标签
pub fn is_write_tag(tag: &str) -> bool {
    WRITE_TAGS.contains(&tag)
}

/// 冲突条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConflictCondition {
    /// 精确角色名
    Role(RoleName),
    /// 角色属于运营角色集合
    AnyOperational,
    /// 角色携带任意写标签
    AnyWrite,
    /// 角色携带指定写标签
    WriteTag(String),
}

impl ConflictCondition {
    /// 条件匹配
    pub fn matches(&self, role: &RoleName, tables: &PolicyTables) -> bool {
        match self {
            Self::Role(name) => name == role,
            Self::AnyOperational => tables.is_operational(role),
            Self::AnyWrite => tables.has_any_write_tag(role),
            Self::WriteTag(tag) => tables.has_tag(role, tag),
        }
    }
}

impl From<String> for ConflictCondition {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ANY_OPERATIONAL" => Self::AnyOperational,
            "ANY_WRITE" => Self::AnyWrite,
            tag if is_write_tag(tag) => Self::WriteTag(s),
            _ => Self::Role(RoleName(s)),
        }
    }
}

impl From<&str> for ConflictCondition {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ConflictCondition> for String {
    fn from(condition: ConflictCondition) -> Self {
        condition.to_string()
    }
}

impl std::fmt::Display for ConflictCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictCondition::Role(name) => write!(f, "{}", name),
            ConflictCondition::AnyOperational => write!(f, "ANY_OPERATIONAL"),
            ConflictCondition::AnyWrite => write!(f, "ANY_WRITE"),
            ConflictCondition::WriteTag(tag) => write!(f, "{}", tag),
        }
    }
}

/// 冲突规则: 一对无序条件
///
/// 两个角色冲突当且仅当某条规则的两侧条件各自匹配其中一个角色
/// (顺序不限)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRule {
    pub left: ConflictCondition,
    pub right: ConflictCondition,
}

impl ConflictRule {
    pub fn new(left: impl Into<ConflictCondition>, right: impl Into<ConflictCondition>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// 对称匹配
    pub fn matches(&self, a: &RoleName, b: &RoleName, tables: &PolicyTables) -> bool {
        (self.left.matches(a, tables) && self.right.matches(b, tables))
            || (self.left.matches(b, tables) && self.right.matches(a, tables))
    }
}
