use super::entities::UserRole;

// 用户创建参数（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub name: String,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub roll_no: Option<String>,
    pub classes_taught: Vec<String>,
    pub subjects: Vec<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<String>,
}

/// 资料更新参数（用于存储层）
///
/// 外层 `None` 表示不修改；可空字段的 `Some(None)` 表示清空。
/// 邮箱、角色和密码不在此处，资料接口无法修改它们。
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub school: Option<Option<String>>,
    pub grade: Option<Option<String>>,
    pub class_name: Option<Option<String>>,
    pub roll_no: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub experience: Option<Option<String>>,
    pub classes_taught: Option<Vec<String>>,
    pub subjects: Option<Vec<String>>,
}
