//! identity-access - 授权决策引擎
//!
//! 多租户后台的访问控制核心: 角色互斥/冲突矩阵、权限模板解析、
//! 审计角色 claims 校验、租户/OU 作用域守卫和双人审批工作流。
//! 传输层和持久化由外部协作者负责，本 crate 只对传入的值做决策。

pub mod application;
pub mod domain;
pub mod infrastructure;
