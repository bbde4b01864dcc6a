//! 应用层: 聚合领域守卫与仓储协作者

mod access;
mod approvals;

pub use access::*;
pub use approvals::*;
