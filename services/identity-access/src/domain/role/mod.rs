//! 角色授予守卫

mod claims;
mod guard;

pub use claims::*;
pub use guard::*;
