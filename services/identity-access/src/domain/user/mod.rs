//! 用户实体与仓储接口

mod repository;
mod user;

pub use repository::*;
pub use user::*;
