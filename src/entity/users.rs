//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub name: String,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub roll_no: Option<String>,
    /// JSON 数组
    #[sea_orm(column_type = "Text")]
    pub classes_taught: String,
    /// JSON 数组
    #[sea_orm(column_type = "Text")]
    pub subjects: String,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub experience: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quiz_submissions::Entity")]
    QuizSubmissions,
    #[sea_orm(has_many = "super::tasks::Entity")]
    Tasks,
}

impl Related<super::quiz_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizSubmissions.def()
    }
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::errors::Result<crate::models::users::entities::User> {
        use crate::errors::LearnHubError;
        use crate::models::users::entities::{User, UserRole};

        let id = self.id;
        let corrupt = |field: &str, e: String| {
            LearnHubError::serialization(format!("用户 {id} 的 {field} 字段解析失败: {e}"))
        };

        Ok(User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            role: self
                .role
                .parse::<UserRole>()
                .map_err(|e| corrupt("role", e))?,
            name: self.name,
            school: self.school,
            grade: self.grade,
            class_name: self.class_name,
            roll_no: self.roll_no,
            classes_taught: serde_json::from_str(&self.classes_taught)
                .map_err(|e| corrupt("classes_taught", e.to_string()))?,
            subjects: serde_json::from_str(&self.subjects)
                .map_err(|e| corrupt("subjects", e.to_string()))?,
            phone: self.phone,
            bio: self.bio,
            experience: self.experience,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LearnHubError;
    use crate::models::users::entities::UserRole;

    fn model() -> Model {
        Model {
            id: 5,
            email: "t@school.edu".to_string(),
            password_hash: "hash".to_string(),
            role: "TEACHER".to_string(),
            name: "Teacher".to_string(),
            school: None,
            grade: None,
            class_name: None,
            roll_no: None,
            classes_taught: r#"["7A","7B"]"#.to_string(),
            subjects: "[]".to_string(),
            phone: Some("555-0100".to_string()),
            bio: None,
            experience: Some("5 years".to_string()),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_into_user_decodes_lists() {
        let user = model().into_user().unwrap();
        assert_eq!(user.role, UserRole::Teacher);
        assert_eq!(user.classes_taught, vec!["7A", "7B"]);
        assert!(user.subjects.is_empty());
        assert_eq!(user.experience.as_deref(), Some("5 years"));
    }

    #[test]
    fn test_into_user_rejects_corrupt_columns() {
        let mut bad_role = model();
        bad_role.role = "ADMIN".to_string();
        assert!(matches!(bad_role.into_user(), Err(LearnHubError::Serialization(_))));

        let mut bad_list = model();
        bad_list.subjects = "Math".to_string();
        let err = bad_list.into_user().unwrap_err();
        assert!(err.message().contains("subjects"));
    }
}
