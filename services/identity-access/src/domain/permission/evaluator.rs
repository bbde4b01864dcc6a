//! 权限评估器

use std::collections::BTreeSet;

/// 权限评估器
///
/// 判断授予集合是否覆盖全部必需的权限 key。授予条目可以以
/// `.*` 结尾表示前缀通配。
pub struct PermissionEvaluator;

impl PermissionEvaluator {
    /// 单条匹配: 精确相等，或授予条目以 `.*` 结尾且必需 key
    /// 以其前缀开头
    pub fn matches_wildcard(granted: &str, required: &str) -> bool {
        if granted == required {
            return true;
        }
        if let Some(prefix) = granted.strip_suffix(".*") {
            return required.starts_with(prefix);
        }
        false
    }

    /// 返回未被覆盖的权限 key；非空表示拒绝
    pub fn missing_permissions(granted: &BTreeSet<String>, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|key| {
                !granted.contains(*key)
                    && !granted.iter().any(|g| Self::matches_wildcard(g, key))
            })
            .cloned()
            .collect()
    }

    /// 是否覆盖全部必需 key
    pub fn has_all(granted: &BTreeSet<String>, required: &[String]) -> bool {
        Self::missing_permissions(granted, required).is_empty()
    }
}
