//! 用户实体
//!
//! 用户本体由外部身份系统持有；核心只消费传入的值并返回
//! 新值，不自己持久化。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tpa_common::{OrgUnitId, RoleName, SessionId, TenantId, UserId};

/// 申报期间 (审计角色的作用域声明)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl ReportingPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// 两端都已声明
    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}

/// 作用域 claims (由外部 AuthN 协作者提供)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    /// 允许操作的租户列表
    #[serde(default)]
    pub tenants: Vec<TenantId>,
    /// 申报期间
    #[serde(default)]
    pub period: Option<ReportingPeriod>,
    /// 允许操作的组织单元列表
    #[serde(default)]
    pub ous: Vec<OrgUnitId>,
}

impl Claims {
    /// 期间是否完整声明
    pub fn has_complete_period(&self) -> bool {
        self.period.as_ref().is_some_and(ReportingPeriod::is_complete)
    }
}

/// 用户
///
/// 不变式 (由 RoleAssignmentGuard 维护):
/// - 持有互斥角色时 roles 只含该角色
/// - roles 中任意两个角色不命中冲突规则
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// 角色集合 (按名字唯一)
    #[serde(default)]
    pub roles: Vec<RoleName>,
    #[serde(default)]
    pub claims: Claims,
    #[serde(default)]
    pub mfa_enabled: bool,
    /// 活跃会话
    #[serde(default)]
    pub sessions: Vec<SessionId>,
}

impl User {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            roles: Vec::new(),
            claims: Claims::default(),
            mfa_enabled: false,
            sessions: Vec::new(),
        }
    }

    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleName>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_claims(mut self, claims: Claims) -> Self {
        self.claims = claims;
        self
    }

    pub fn with_sessions<I, S>(mut self, sessions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SessionId>,
    {
        self.sessions = sessions.into_iter().map(Into::into).collect();
        self
    }

    /// 是否持有指定角色 (精确匹配)
    pub fn has_role(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }

    /// 是否持有 Superadmin (大小写不敏感)
    pub fn is_superadmin(&self) -> bool {
        self.roles.iter().any(RoleName::is_superadmin)
    }

    /// 作废全部会话
    ///
    /// 角色变更不允许在旧会话下静默生效，因此这是一个独立命名的
    /// 副作用，可单独测试。
    pub fn invalidate_sessions(&mut self) {
        self.sessions.clear();
    }
}
