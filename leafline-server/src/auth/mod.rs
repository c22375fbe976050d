//! 认证模块
//!
//! JWT 令牌验证与权限检查。令牌由平台身份服务签发，本服务只消费。

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
