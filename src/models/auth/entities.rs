use crate::models::users::entities::UserRole;

/// 通过会话校验后的当前用户，由 RequireJWT 写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub role: UserRole,
}
