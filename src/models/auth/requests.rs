use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// 注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub school: Option<String>,
    /// 学生字段
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub roll_no: Option<String>,
    /// 教师字段
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub classes_taught: Vec<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<String>,
}

// 个人资料更新请求
//
// 未知字段（email、role、password 等）会被直接忽略
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub school: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    /// 学生字段
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub roll_no: Option<String>,
    /// 教师字段
    pub experience: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub classes_taught: Option<Vec<String>>,
}
