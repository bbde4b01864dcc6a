//! 角色授予守卫
//!
//! 决定一次角色授予是否合法 (互斥、冲突、claims)，并产出更新后
//! 的用户。守卫从不部分修改输入: 要么返回完整的新值，要么失败。

use std::sync::Arc;

use tpa_common::RoleName;
use tpa_errors::{AppError, AppResult};

use super::claims::ClaimsValidator;
use crate::domain::policy::PolicyTables;
use crate::domain::user::User;

/// 角色授予守卫
#[derive(Debug, Clone)]
pub struct RoleAssignmentGuard {
    tables: Arc<PolicyTables>,
}

impl RoleAssignmentGuard {
    pub fn new(tables: Arc<PolicyTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &PolicyTables {
        &self.tables
    }

    /// 授予角色
    ///
    /// 1. 已持有该角色: 幂等返回原用户 (不是错误)
    /// 2. 新角色互斥且用户已有角色: Conflict
    /// 3. 新角色与任一既有角色命中冲突规则: Conflict
    /// 4. 既有角色中已有互斥角色: Conflict
    /// 5. 审计角色 claims 校验
    /// 6. 成功时返回新用户: 追加角色、强制 mfa、作废全部会话
    pub fn assign(&self, user: &User, new_role: &RoleName) -> AppResult<User> {
        if user.has_role(new_role) {
            return Ok(user.clone());
        }

        if self.tables.is_exclusive(new_role) && !user.roles.is_empty() {
            return Err(AppError::conflict(format!(
                "'{}' is exclusive and cannot be combined with existing roles",
                new_role
            )));
        }

        for existing in &user.roles {
            if self.tables.conflicts(existing, new_role) {
                return Err(AppError::conflict(format!(
                    "'{}' and '{}' cannot be held together",
                    existing, new_role
                )));
            }
        }

        if let Some(existing) = user.roles.iter().find(|r| self.tables.is_exclusive(r)) {
            return Err(AppError::conflict(format!(
                "user already holds exclusive role '{}'; no further roles may be granted",
                existing
            )));
        }

        ClaimsValidator::require_claims_for_audit_roles(user, new_role)?;

        let mut updated = user.clone();
        updated.roles.push(new_role.clone());
        updated.mfa_enabled = true;
        updated.invalidate_sessions();

        Ok(updated)
    }
}
