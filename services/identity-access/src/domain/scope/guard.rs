//! 作用域守卫
//!
//! header 是租户的唯一事实来源；body/query 里的值只能与它一致，
//! 不能覆盖它。

use tpa_common::{OrgUnitId, TenantId};
use tpa_errors::{AppError, AppResult};

use crate::domain::user::User;

/// 一次请求声明的作用域
#[derive(Debug, Clone, Default)]
pub struct ScopeParams {
    /// x-tenant-id header (必填)
    pub header_tenant: Option<TenantId>,
    /// body 中的 tenantId (可选，只允许与 header 一致)
    pub body_tenant: Option<TenantId>,
    /// query 中的 tenantId (可选，只允许与 header 一致)
    pub query_tenant: Option<TenantId>,
    /// 组织单元 (可选)
    pub ou: Option<OrgUnitId>,
}

impl ScopeParams {
    pub fn new(header_tenant: impl Into<TenantId>) -> Self {
        Self {
            header_tenant: Some(header_tenant.into()),
            ..Self::default()
        }
    }

    pub fn with_body_tenant(mut self, tenant: impl Into<TenantId>) -> Self {
        self.body_tenant = Some(tenant.into());
        self
    }

    pub fn with_query_tenant(mut self, tenant: impl Into<TenantId>) -> Self {
        self.query_tenant = Some(tenant.into());
        self
    }

    pub fn with_ou(mut self, ou: impl Into<OrgUnitId>) -> Self {
        self.ou = Some(ou.into());
        self
    }
}

/// 作用域守卫
pub struct ScopeGuard;

impl ScopeGuard {
    /// 校验请求作用域，返回规范化的租户 ID
    ///
    /// 1. header 租户必填
    /// 2. body/query 租户只能与 header 一致
    /// 3. Superadmin (大小写不敏感) 跳过租户/OU 成员检查
    /// 4. 其余用户 header 租户必须在 claims.tenants 中
    /// 5. 给出 ou 时必须在 claims.ous 中
    pub fn authorize(user: &User, params: &ScopeParams) -> AppResult<TenantId> {
        let header = params
            .header_tenant
            .as_ref()
            .ok_or_else(|| AppError::validation("x-tenant-id header is required"))?;

        if let Some(body) = &params.body_tenant {
            if body != header {
                return Err(AppError::validation("tenantId mismatch"));
            }
        }
        if let Some(query) = &params.query_tenant {
            if query != header {
                return Err(AppError::validation("tenantId mismatch"));
            }
        }

        let superadmin = user.is_superadmin();

        if !superadmin && !user.claims.tenants.contains(header) {
            return Err(AppError::forbidden(format!(
                "no access to tenant '{}'",
                header
            )));
        }

        if let Some(ou) = &params.ou {
            if !superadmin && !user.claims.ous.contains(ou) {
                return Err(AppError::forbidden(format!(
                    "no access to organizational unit '{}'",
                    ou
                )));
            }
        }

        Ok(header.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Claims;

    fn member_of(tenants: &[&str], ous: &[&str]) -> Claims {
        Claims {
            tenants: tenants.iter().map(|t| TenantId::from(*t)).collect(),
            period: None,
            ous: ous.iter().map(|o| OrgUnitId::from(*o)).collect(),
        }
    }

    #[test]
    fn test_header_is_mandatory() {
        let user = User::new("u1");
        let err = ScopeGuard::authorize(&user, &ScopeParams::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_body_mismatch_rejected() {
        let user = User::new("u1").with_claims(member_of(&["t1"], &[]));
        let params = ScopeParams::new("t1").with_body_tenant("t2");

        let err = ScopeGuard::authorize(&user, &params).unwrap_err();
        assert!(err.to_string().contains("tenantId mismatch"));
    }

    #[test]
    fn test_query_mismatch_rejected() {
        let user = User::new("u1").with_claims(member_of(&["t1"], &[]));
        let params = ScopeParams::new("t1").with_query_tenant("t9");

        let err = ScopeGuard::authorize(&user, &params).unwrap_err();
        assert!(err.to_string().contains("tenantId mismatch"));
    }

    #[test]
    fn test_agreeing_body_and_query_pass() {
        let user = User::new("u1").with_claims(member_of(&["t1"], &[]));
        let params = ScopeParams::new("t1")
            .with_body_tenant("t1")
            .with_query_tenant("t1");

        let tenant = ScopeGuard::authorize(&user, &params).unwrap();
        assert_eq!(tenant, TenantId::from("t1"));
    }

    #[test]
    fn test_non_member_rejected() {
        let user = User::new("u1").with_claims(member_of(&["t2"], &[]));

        let err = ScopeGuard::authorize(&user, &ScopeParams::new("t1")).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_superadmin_bypasses_membership() {
        let user = User::new("sa").with_roles(["Superadmin"]);
        let params = ScopeParams::new("t1").with_ou("ou1");

        let tenant = ScopeGuard::authorize(&user, &params).unwrap();
        assert_eq!(tenant, TenantId::from("t1"));
    }

    #[test]
    fn test_ou_membership_enforced() {
        let user = User::new("u1").with_claims(member_of(&["t1"], &["ou1"]));

        let ok = ScopeGuard::authorize(&user, &ScopeParams::new("t1").with_ou("ou1"));
        assert!(ok.is_ok());

        let err =
            ScopeGuard::authorize(&user, &ScopeParams::new("t1").with_ou("ou2")).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(err.to_string().contains("ou2"));
    }
}
