//! identity-access 冒烟入口
//!
//! 加载配置与策略表，在内存仓储上走一遍完整决策链:
//! 角色授予 -> 权限检查 -> 作用域校验 -> 双人审批。

use std::sync::Arc;

use tpa_common::{RoleName, TenantId, UserId};
use tpa_config::load_config;
use tpa_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tracing::{debug, info};

use identity_access::application::{AccessControlService, ApprovalFlowService};
use identity_access::domain::policy::{load_policy_tables, load_template_set};
use identity_access::domain::scope::ScopeParams;
use identity_access::domain::user::User;
use identity_access::infrastructure::{InMemoryApprovalRepository, InMemoryUserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    if config.telemetry.json_logs {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }
    let metrics_handle = init_metrics();

    info!("identity-access starting");

    let tables = Arc::new(load_policy_tables(&config.policy)?);
    let templates = Arc::new(load_template_set(&config.policy)?);

    let users = Arc::new(InMemoryUserRepository::new());
    users.seed(User::new("u1").with_roles(["Fahrer"]).with_sessions(["s1"]));
    users.seed(User::new("sa1").with_roles(["Superadmin"]));
    users.seed(User::new("sa2").with_roles(["Superadmin"]));
    users.seed({
        let mut hr = User::new("hr1").with_roles(["HR Manager"]);
        hr.claims.tenants = vec![TenantId::from("t1")];
        hr
    });

    let access = AccessControlService::new(users.clone(), templates, tables);
    let approvals = ApprovalFlowService::new(Arc::new(InMemoryApprovalRepository::new()));

    // 角色授予: Fahrer + Gewerberechtliche GF 是兼容组合
    let updated = access
        .assign_role(&UserId::from("u1"), &RoleName::from("Gewerberechtliche GF"))
        .await?;
    info!(user = %updated.id, roles = ?updated.roles, mfa = updated.mfa_enabled, "role assignment done");

    // 权限检查: GF 模板的通配符授权
    access
        .check_permissions(&UserId::from("u1"), &["tp.company.read".to_string()])
        .await?;
    info!(user = "u1", permission = "tp.company.read", "permission check passed");

    // 作用域校验
    let tenant = access
        .authorize_scope(&UserId::from("hr1"), &ScopeParams::new("t1"))
        .await?;
    info!(%tenant, "scope authorized");

    // 双人审批
    let hr = access.get_user(&UserId::from("hr1")).await?;
    let sa1 = access.get_user(&UserId::from("sa1")).await?;
    let sa2 = access.get_user(&UserId::from("sa2")).await?;

    let request = approvals
        .create_request(
            "company.delete",
            TenantId::from("t1"),
            Some("c42".to_string()),
            &hr,
        )
        .await?;
    let request = approvals.approve(&request.id, &sa1).await?;
    info!(id = %request.id, status = %request.status, "first approval recorded");
    let request = approvals.approve(&request.id, &sa2).await?;
    info!(id = %request.id, status = %request.status, "second approval recorded");

    debug!(metrics = %metrics_handle.render(), "collected metrics");
    info!("identity-access smoke run complete");
    Ok(())
}
