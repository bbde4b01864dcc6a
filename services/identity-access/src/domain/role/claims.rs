//! 审计角色 claims 校验
//!
//! 审计/合规角色在授予前必须声明其认证的作用域 (租户列表 +
//! 申报期间)。缺少作用域的授予是合规缺陷，不只是体验问题。

use tpa_common::RoleName;
use tpa_errors::{AppError, AppResult};

use crate::domain::user::User;

/// 审计敏感角色集合
pub const AUDIT_ROLES: [&str; 4] = [
    "Kontroller",
    "Wirtschaftsprüfer",
    "Compliance Officer",
    "Internal Auditor",
];

/// claims 校验器
pub struct ClaimsValidator;

impl ClaimsValidator {
    /// 角色是否属于审计敏感集合
    pub fn is_audit_role(role: &RoleName) -> bool {
        AUDIT_ROLES.contains(&role.as_str())
    }

    /// 审计角色授予前的 claims 校验
    ///
    /// 非审计角色直接通过。审计角色要求 claims.tenants 非空且
    /// 申报期间两端俱全。
    pub fn require_claims_for_audit_roles(user: &User, new_role: &RoleName) -> AppResult<()> {
        if !Self::is_audit_role(new_role) {
            return Ok(());
        }

        if user.claims.tenants.is_empty() {
            return Err(AppError::validation(format!(
                "'{}' requires at least one tenant claim",
                new_role
            )));
        }

        if !user.claims.has_complete_period() {
            return Err(AppError::validation(format!(
                "'{}' requires a reporting period with both from and to",
                new_role
            )));
        }

        Ok(())
    }
}
