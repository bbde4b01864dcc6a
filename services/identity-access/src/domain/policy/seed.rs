//! 策略种子数据
//!
//! 冲突矩阵、角色目录和权限模板既可以从 JSON 种子文件加载，
//! 也可以使用内置目录。文件格式与运维侧的 seed 文档一致:
//! `{"exclusive": [...], "pairs": [["A", "B"], ...]}` 等。

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tpa_common::RoleName;
use tpa_config::PolicySettings;
use tpa_errors::{AppError, AppResult};

use super::condition::ConflictCondition;
use super::tables::PolicyTables;
use crate::domain::permission::{PermissionTemplate, TemplateScope, TemplateSet};

/// 冲突矩阵种子 (role_incompatible.json)
#[derive(Debug, Clone, Deserialize)]
pub struct ConflictMatrixSeed {
    #[serde(default)]
    pub exclusive: Vec<RoleName>,
    #[serde(default)]
    pub pairs: Vec<(ConflictCondition, ConflictCondition)>,
}

/// 角色目录种子: 运营角色集合 + 角色->tag 映射
#[derive(Debug, Clone, Deserialize)]
pub struct RoleCatalogSeed {
    #[serde(default)]
    pub operational: Vec<RoleName>,
    #[serde(default)]
    pub tags: HashMap<RoleName, Vec<String>>,
}

/// 权限模板种子 (seed_role_permissions.json)
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSeed {
    #[serde(default)]
    pub templates: Vec<PermissionTemplate>,
}

fn read_seed<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::internal(format!("failed to read seed {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::validation(format!("invalid seed {}: {}", path.display(), e)))
}

/// 根据配置加载策略表
///
/// 未配置路径的部分回退到内置目录。
pub fn load_policy_tables(settings: &PolicySettings) -> AppResult<PolicyTables> {
    let matrix = match &settings.conflict_matrix {
        Some(path) => read_seed(path)?,
        None => builtin_conflict_matrix(),
    };
    let catalog = match &settings.role_catalog {
        Some(path) => read_seed(path)?,
        None => builtin_role_catalog(),
    };
    Ok(PolicyTables::from_seeds(matrix, catalog))
}

/// 根据配置加载权限模板集合
pub fn load_template_set(settings: &PolicySettings) -> AppResult<TemplateSet> {
    let seed = match &settings.role_templates {
        Some(path) => read_seed(path)?,
        None => builtin_templates(),
    };
    Ok(TemplateSet::from_seed(seed))
}

/// 内置冲突矩阵
pub fn builtin_conflict_matrix() -> ConflictMatrixSeed {
    let pairs = [
        // 外部审计与税务顾问不能同时持有
        ("Wirtschaftsprüfer", "Steuerberater"),
        // 审计角色不能兼任运营角色
        ("Wirtschaftsprüfer", "ANY_OPERATIONAL"),
        ("Internal Auditor", "ANY_OPERATIONAL"),
        // 审查者不能持有任何写角色
        ("Kontroller", "ANY_WRITE"),
        // 职工委员会与人事管理分离
        ("Betriebsrat", "HR Manager"),
        ("Compliance Officer", "Operations-Write"),
    ];

    ConflictMatrixSeed {
        exclusive: vec![RoleName::from("Superadmin"), RoleName::from("Kontroller")],
        pairs: pairs
            .into_iter()
            .map(|(left, right)| (ConflictCondition::from(left), ConflictCondition::from(right)))
            .collect(),
    }
}

/// 内置角色目录
pub fn builtin_role_catalog() -> RoleCatalogSeed {
    let operational = [
        "Fahrer",
        "Mitarbeiter",
        "HR Manager",
        "Fuhrparkleiter",
        "Data Entry",
        "Recruiter",
        "Handelsrechtliche GF",
        "Gewerberechtliche GF",
        "Gesellschafter",
        "Hauptgesellschafter",
    ];

    let tags: [(&str, &[&str]); 21] = [
        ("Superadmin", &["Identity-Write", "Finance-Write", "Operations-Write"]),
        ("Compliance Officer", &["Identity-Write"]),
        ("Wirtschaftsprüfer", &["Finance-Write"]),
        ("Internal Auditor", &["Operations-Write"]),
        ("Kontroller", &["Identity-Write"]),
        ("Steuerberater", &["Finance-Write"]),
        ("Avukat", &["Identity-Write"]),
        ("Handelsrechtliche GF", &["Identity-Write", "Operations-Write"]),
        ("Gewerberechtliche GF", &["Operations-Write"]),
        ("HR Manager", &["Identity-Write", "Operations-Write"]),
        ("Fuhrparkleiter", &["Operations-Write"]),
        ("Fahrer", &[]),
        ("Mitarbeiter", &[]),
        ("Gesellschafter", &[]),
        ("Hauptgesellschafter", &[]),
        ("Data Entry", &["Operations-Write"]),
        ("Recruiter", &["Identity-Write"]),
        ("Bank Viewer", &[]),
        ("Versicherungspartner", &[]),
        ("Notar", &[]),
        ("Betriebsrat", &["Identity-Write"]),
    ];

    RoleCatalogSeed {
        operational: operational.into_iter().map(RoleName::from).collect(),
        tags: tags
            .into_iter()
            .map(|(role, tags)| {
                (
                    RoleName::from(role),
                    tags.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect(),
    }
}

/// 内置权限模板
pub fn builtin_templates() -> TemplateSeed {
    fn template(
        role: &str,
        scope: TemplateScope,
        allow: &[&str],
        deny: &[&str],
    ) -> PermissionTemplate {
        PermissionTemplate {
            role: RoleName::from(role),
            scope,
            allow: allow.iter().map(|p| p.to_string()).collect(),
            deny: deny.iter().map(|p| p.to_string()).collect(),
        }
    }

    TemplateSeed {
        templates: vec![
            template("Superadmin", TemplateScope::Global, &["tp.*"], &[]),
            template(
                "Steuerberater",
                TemplateScope::Tenant,
                &[
                    "tp.vorbuchhaltung.*",
                    "tp.finance.report.read",
                    "finance.tax.read",
                    "finance.tax.write",
                ],
                &[],
            ),
            template(
                "Kontroller",
                TemplateScope::Tenant,
                &[
                    "tp.finance.report.read",
                    "tp.company.read",
                    "tp.ou.read",
                    "tp.approval.read",
                ],
                &["tp.*:write"],
            ),
            template(
                "Compliance Officer",
                TemplateScope::Tenant,
                &[
                    "tp.identity.user.view",
                    "tp.identity.user.create",
                    "tp.identity.user.update",
                    "tp.finance.report.read",
                    "risk.review",
                ],
                &["tp.identity.user*"],
            ),
            template(
                "Wirtschaftsprüfer",
                TemplateScope::Tenant,
                &[
                    "tp.finance.report.read",
                    "finance.view",
                    "finance.tax.read",
                    "tp.company.read",
                ],
                &["finance.tax:write"],
            ),
            template(
                "HR Manager",
                TemplateScope::Tenant,
                &[
                    "hr.read",
                    "hr.write",
                    "tp.identity.user.view",
                    "tp.identity.user.create",
                ],
                &[],
            ),
            template(
                "Fuhrparkleiter",
                TemplateScope::Tenant,
                &["vehicle.manage", "tp.assignment.vehicle.*"],
                &[],
            ),
            template(
                "Fahrer",
                TemplateScope::Tenant,
                &["tp.assignment.driver.read"],
                &[],
            ),
            template(
                "Handelsrechtliche GF",
                TemplateScope::Tenant,
                &["tp.company.*", "contract.read", "contract.write"],
                &[],
            ),
            template(
                "Gewerberechtliche GF",
                TemplateScope::Tenant,
                &["tp.company.read", "vehicle.manage", "traffic.report"],
                &[],
            ),
            template(
                "Recruiter",
                TemplateScope::Tenant,
                &["hr.read", "tp.identity.user.create"],
                &[],
            ),
            template("Bank Viewer", TemplateScope::Tenant, &["finance.view"], &[]),
        ],
    }
}
