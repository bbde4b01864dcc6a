//! 策略表
//!
//! 进程启动时加载一次，此后只读。角色目录由运营方扩展，
//! 所以这里不对角色名做封闭枚举。

use std::collections::{BTreeSet, HashMap, HashSet};

use tpa_common::RoleName;

use super::condition::ConflictRule;
use super::seed::{ConflictMatrixSeed, RoleCatalogSeed};

/// 策略表
#[derive(Debug, Clone)]
pub struct PolicyTables {
    /// 互斥角色集合
    exclusive: HashSet<RoleName>,
    /// 运营角色集合 (ANY_OPERATIONAL 的取值范围)
    operational: HashSet<RoleName>,
    /// 角色 -> policy tag
    role_tags: HashMap<RoleName, BTreeSet<String>>,
    /// 冲突规则
    rules: Vec<ConflictRule>,
}

impl PolicyTables {
    /// 从种子数据构建
    pub fn from_seeds(matrix: ConflictMatrixSeed, catalog: RoleCatalogSeed) -> Self {
        let rules = matrix
            .pairs
            .into_iter()
            .map(|(left, right)| ConflictRule { left, right })
            .collect();

        Self {
            exclusive: matrix.exclusive.into_iter().collect(),
            operational: catalog.operational.into_iter().collect(),
            role_tags: catalog
                .tags
                .into_iter()
                .map(|(role, tags)| (role, tags.into_iter().collect()))
                .collect(),
            rules,
        }
    }

    /// 内置目录 (原始 seed 数据)
    pub fn builtin() -> Self {
        Self::from_seeds(
            super::seed::builtin_conflict_matrix(),
            super::seed::builtin_role_catalog(),
        )
    }

    /// 角色是否互斥
    pub fn is_exclusive(&self, role: &RoleName) -> bool {
        self.exclusive.contains(role)
    }

    /// 角色是否属于运营角色集合
    pub fn is_operational(&self, role: &RoleName) -> bool {
        self.operational.contains(role)
    }

    /// 角色携带的 policy tag
    pub fn tags_of(&self, role: &RoleName) -> impl Iterator<Item = &str> {
        self.role_tags
            .get(role)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// 角色是否携带指定 tag
    pub fn has_tag(&self, role: &RoleName, tag: &str) -> bool {
        self.role_tags
            .get(role)
            .is_some_and(|tags| tags.contains(tag))
    }

    /// 角色是否携带任意写标签
    pub fn has_any_write_tag(&self, role: &RoleName) -> bool {
        super::condition::WRITE_TAGS
            .iter()
            .any(|tag| self.has_tag(role, tag))
    }

    /// 冲突规则列表
    pub fn conflict_rules(&self) -> &[ConflictRule] {
        &self.rules
    }

    /// 两个角色是否冲突 (对称)
    pub fn conflicts(&self, a: &RoleName, b: &RoleName) -> bool {
        self.rules.iter().any(|rule| rule.matches(a, b, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::ConflictCondition;

    fn role(name: &str) -> RoleName {
        RoleName::from(name)
    }

    #[test]
    fn test_builtin_exclusive_roles() {
        let tables = PolicyTables::builtin();
        assert!(tables.is_exclusive(&role("Superadmin")));
        assert!(tables.is_exclusive(&role("Kontroller")));
        assert!(!tables.is_exclusive(&role("Fahrer")));
    }

    #[test]
    fn test_builtin_tags() {
        let tables = PolicyTables::builtin();
        assert!(tables.has_tag(&role("Wirtschaftsprüfer"), "Finance-Write"));
        assert!(tables.has_any_write_tag(&role("Gewerberechtliche GF")));
        assert!(!tables.has_any_write_tag(&role("Fahrer")));
        let tags: Vec<&str> = tables.tags_of(&role("Superadmin")).collect();
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_conflicts_symmetric() {
        let tables = PolicyTables::builtin();
        let wp = role("Wirtschaftsprüfer");
        let stb = role("Steuerberater");
        assert!(tables.conflicts(&wp, &stb));
        assert!(tables.conflicts(&stb, &wp));
    }

    #[test]
    fn test_auditor_conflicts_with_operational_roles() {
        let tables = PolicyTables::builtin();
        assert!(tables.conflicts(&role("Wirtschaftsprüfer"), &role("Fahrer")));
        assert!(tables.conflicts(&role("Internal Auditor"), &role("HR Manager")));
    }

    #[test]
    fn test_operational_roles_are_compatible() {
        let tables = PolicyTables::builtin();
        assert!(!tables.conflicts(&role("Fahrer"), &role("Gewerberechtliche GF")));
        assert!(!tables.conflicts(&role("Mitarbeiter"), &role("Fuhrparkleiter")));
    }

    #[test]
    fn test_write_tag_condition() {
        let matrix = ConflictMatrixSeed {
            exclusive: vec![],
            pairs: vec![(
                ConflictCondition::from("Betriebsrat"),
                ConflictCondition::from("Operations-Write"),
            )],
        };
        let tables = PolicyTables::from_seeds(matrix, super::super::seed::builtin_role_catalog());

        // Fuhrparkleiter 携带 Operations-Write
        assert!(tables.conflicts(&role("Betriebsrat"), &role("Fuhrparkleiter")));
        assert!(!tables.conflicts(&role("Betriebsrat"), &role("Fahrer")));
    }
}
