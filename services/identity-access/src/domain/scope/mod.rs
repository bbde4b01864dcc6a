//! 租户/OU 作用域守卫

mod guard;

pub use guard::*;
