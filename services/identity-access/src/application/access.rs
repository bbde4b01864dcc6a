//! 访问控制服务
//!
//! 统一访问控制决策点: 角色授予、权限检查和作用域校验。

use std::sync::Arc;

use tpa_common::{RoleName, TenantId, UserId};
use tpa_errors::{AppError, AppResult};
use tracing::{debug, info};

use crate::domain::permission::{PermissionEvaluator, PermissionTemplateSource};
use crate::domain::policy::PolicyTables;
use crate::domain::role::RoleAssignmentGuard;
use crate::domain::scope::{ScopeGuard, ScopeParams};
use crate::domain::user::{User, UserRepository};

/// 访问控制服务
pub struct AccessControlService<R, S>
where
    R: UserRepository,
    S: PermissionTemplateSource,
{
    users: Arc<R>,
    templates: Arc<S>,
    guard: RoleAssignmentGuard,
}

impl<R, S> AccessControlService<R, S>
where
    R: UserRepository,
    S: PermissionTemplateSource,
{
    pub fn new(users: Arc<R>, templates: Arc<S>, tables: Arc<PolicyTables>) -> Self {
        Self {
            users,
            templates,
            guard: RoleAssignmentGuard::new(tables),
        }
    }

    /// 授予角色并持久化更新后的用户
    ///
    /// 读-改-写: 同一用户的并发授予必须由调用方串行化。
    pub async fn assign_role(&self, user_id: &UserId, role: &RoleName) -> AppResult<User> {
        use metrics::counter;

        let user = self.load_user(user_id).await?;
        let result = self.guard.assign(&user, role);

        let outcome = if result.is_ok() { "granted" } else { "rejected" };
        counter!("role_assignments_total", "outcome" => outcome).increment(1);

        let updated = result?;
        let saved = self.users.save(&updated).await?;

        info!(user = %user_id, role = %role, "role granted");
        Ok(saved)
    }

    /// 检查用户是否拥有全部必需权限
    pub async fn check_permissions(&self, user_id: &UserId, required: &[String]) -> AppResult<()> {
        use metrics::{counter, histogram};
        let start = std::time::Instant::now();

        let result = self.check_internal(user_id, required).await;

        counter!("authorization_checks_total",
            "allowed" => if result.is_ok() { "true" } else { "false" }
        )
        .increment(1);
        histogram!("authorization_check_duration_ms")
            .record(start.elapsed().as_millis() as f64);

        result
    }

    async fn check_internal(&self, user_id: &UserId, required: &[String]) -> AppResult<()> {
        let user = self.load_user(user_id).await?;

        let granted = self.templates.granted_for(&user);
        let missing = PermissionEvaluator::missing_permissions(&granted, required);

        if !missing.is_empty() {
            debug!(user = %user_id, missing = ?missing, "permission check failed");
            return Err(AppError::forbidden(format!(
                "missing permissions: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }

    /// 校验请求作用域，返回规范化的租户 ID
    pub async fn authorize_scope(
        &self,
        user_id: &UserId,
        params: &ScopeParams,
    ) -> AppResult<TenantId> {
        let user = self.load_user(user_id).await?;
        ScopeGuard::authorize(&user, params)
    }

    /// 按 ID 读取用户
    pub async fn get_user(&self, user_id: &UserId) -> AppResult<User> {
        self.load_user(user_id).await
    }

    async fn load_user(&self, user_id: &UserId) -> AppResult<User> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user '{}' not found", user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::permission::TemplateSet;
    use crate::infrastructure::InMemoryUserRepository;

    fn service() -> AccessControlService<InMemoryUserRepository, TemplateSet> {
        AccessControlService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(TemplateSet::builtin()),
            Arc::new(PolicyTables::builtin()),
        )
    }

    fn seeded_service(
        users: &[User],
    ) -> AccessControlService<InMemoryUserRepository, TemplateSet> {
        let repo = InMemoryUserRepository::new();
        for user in users {
            repo.seed(user.clone());
        }
        AccessControlService::new(
            Arc::new(repo),
            Arc::new(TemplateSet::builtin()),
            Arc::new(PolicyTables::builtin()),
        )
    }

    #[tokio::test]
    async fn test_assign_role_persists_updated_user() {
        let driver = User::new("u1").with_roles(["Fahrer"]).with_sessions(["s1"]);
        let service = seeded_service(&[driver]);

        let updated = service
            .assign_role(&UserId::from("u1"), &RoleName::from("Gewerberechtliche GF"))
            .await
            .unwrap();
        assert_eq!(updated.roles.len(), 2);
        assert!(updated.mfa_enabled);
        assert!(updated.sessions.is_empty());

        // 再次读取看到持久化的结果
        let reloaded = service.load_user(&UserId::from("u1")).await.unwrap();
        assert_eq!(reloaded.roles.len(), 2);
        assert!(reloaded.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_assign_role_unknown_user() {
        let service = service();

        let err = service
            .assign_role(&UserId::from("ghost"), &RoleName::from("Fahrer"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_check_permissions_with_wildcard() {
        let gf = User::new("u2").with_roles(["Handelsrechtliche GF"]);
        let service = seeded_service(&[gf]);

        // tp.company.* 覆盖 tp.company.create
        service
            .check_permissions(&UserId::from("u2"), &["tp.company.create".to_string()])
            .await
            .unwrap();

        let err = service
            .check_permissions(&UserId::from("u2"), &["tp.vehicle.manage".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(err.to_string().contains("tp.vehicle.manage"));
    }

    #[tokio::test]
    async fn test_authorize_scope_through_repository() {
        let mut member = User::new("u3");
        member.claims.tenants = vec![TenantId::from("t1")];
        let service = seeded_service(&[member]);

        let tenant = service
            .authorize_scope(&UserId::from("u3"), &ScopeParams::new("t1"))
            .await
            .unwrap();
        assert_eq!(tenant, TenantId::from("t1"));

        let err = service
            .authorize_scope(&UserId::from("u3"), &ScopeParams::new("t2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
