//! 角色权限模板
//!
//! 模板给出角色的 allow 列表和 deny 模式；生效权限是 allow
//! 减去 deny 命中的条目。

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tpa_common::RoleName;

/// 模板作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateScope {
    Global,
    Tenant,
}

/// 角色权限模板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionTemplate {
    pub role: RoleName,
    pub scope: TemplateScope,
    /// 权限 key 列表，可以以 `.*` 结尾表示前缀通配
    #[serde(default)]
    pub allow: Vec<String>,
    /// deny 模式，可带 `:write` 后缀表示只剔除写类条目
    #[serde(default)]
    pub deny: Vec<String>,
}

impl PermissionTemplate {
    /// 解析生效权限: allow 集合减去 deny 命中的条目
    ///
    /// deny 模式是字面前缀 + 写启发式，不是通用的 ACL 模式语言:
    /// 1. `write_only` = 模式包含 ":write"
    /// 2. 前缀 = 模式去掉结尾的 `*` 和 ":write" 子串
    /// 3. 非空前缀只命中以它开头的条目；`write_only` 时只剔除
    ///    看起来是写操作的条目 (write/update/approve, 不分大小写)
    ///
    /// deny 按模板顺序应用，结果对同一模板是确定的。
    pub fn resolve_effective(&self) -> BTreeSet<String> {
        let mut allow: BTreeSet<String> = self.allow.iter().cloned().collect();

        for deny in &self.deny {
            let write_only = deny.contains(":write");
            let trimmed = deny.replace(":write", "");
            let prefix = trimmed.strip_suffix('*').unwrap_or(&trimmed).to_string();

            allow.retain(|entry| {
                if !prefix.is_empty() && !entry.starts_with(&prefix) {
                    return true;
                }
                if write_only && !is_write_like(entry) {
                    return true;
                }
                false
            });
        }

        allow
    }
}

/// 写类条目判断 (write/update/approve, 不分大小写)
fn is_write_like(entry: &str) -> bool {
    let lower = entry.to_ascii_lowercase();
    ["write", "update", "approve"]
        .iter()
        .any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::builtin_templates;

    fn find(role: &str) -> PermissionTemplate {
        builtin_templates()
            .templates
            .into_iter()
            .find(|t| t.role == RoleName::from(role))
            .expect("template missing")
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let template = find("Compliance Officer");
        assert_eq!(template.resolve_effective(), template.resolve_effective());
    }

    #[test]
    fn test_plain_deny_removes_whole_prefix() {
        let template = find("Compliance Officer");
        let effective = template.resolve_effective();

        assert!(!effective.iter().any(|p| p.starts_with("tp.identity.user")));
        assert!(effective.contains("tp.finance.report.read"));
        assert!(effective.contains("risk.review"));
    }

    #[test]
    fn test_write_scoped_deny_keeps_reads() {
        let template = PermissionTemplate {
            role: RoleName::from("Wirtschaftsprüfer"),
            scope: TemplateScope::Tenant,
            allow: vec![
                "finance.tax.read".to_string(),
                "finance.tax.write".to_string(),
                "finance.tax.update".to_string(),
            ],
            deny: vec!["finance.tax:write".to_string()],
        };

        let effective = template.resolve_effective();
        assert!(effective.contains("finance.tax.read"));
        assert!(!effective.contains("finance.tax.write"));
        assert!(!effective.contains("finance.tax.update"));
    }

    #[test]
    fn test_kontroller_is_read_only_shaped() {
        let effective = find("Kontroller").resolve_effective();
        assert!(effective.contains("tp.finance.report.read"));
        assert!(!effective.iter().any(|p| is_write_like(p)));
    }

    #[test]
    fn test_wildcard_write_deny_strips_writes_under_prefix() {
        let template = PermissionTemplate {
            role: RoleName::from("Kontroller"),
            scope: TemplateScope::Tenant,
            allow: vec![
                "tp.company.read".to_string(),
                "tp.company.update".to_string(),
                "tp.approval.approve".to_string(),
                "hr.write".to_string(),
            ],
            deny: vec!["tp.*:write".to_string()],
        };

        let effective = template.resolve_effective();
        assert!(effective.contains("tp.company.read"));
        assert!(!effective.contains("tp.company.update"));
        assert!(!effective.contains("tp.approval.approve"));
        // 前缀之外的写条目不受影响
        assert!(effective.contains("hr.write"));
    }

    #[test]
    fn test_steuerberater_has_vorbuchhaltung() {
        let template = find("Steuerberater");
        assert!(template.allow.contains(&"tp.vorbuchhaltung.*".to_string()));
    }

    #[test]
    fn test_empty_prefix_deny_removes_everything() {
        let template = PermissionTemplate {
            role: RoleName::from("Notar"),
            scope: TemplateScope::Tenant,
            allow: vec!["docs.upload".to_string(), "contract.read".to_string()],
            deny: vec!["*".to_string()],
        };

        assert!(template.resolve_effective().is_empty());
    }
}
