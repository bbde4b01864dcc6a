//! 领域层

pub mod approval;
pub mod permission;
pub mod policy;
pub mod role;
pub mod scope;
pub mod user;
