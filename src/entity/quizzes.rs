//! 测验实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub subject: String,
    pub class_name: String,
    /// 题目列表（JSON）
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub due_date: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::quiz_submissions::Entity")]
    Submissions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::quiz_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 题目 JSON 无法解析时返回序列化错误
    pub fn into_quiz(self) -> crate::errors::Result<crate::models::quizzes::entities::Quiz> {
        use crate::errors::LearnHubError;
        use crate::models::quizzes::entities::Quiz;

        let questions = serde_json::from_str(&self.questions).map_err(|e| {
            LearnHubError::serialization(format!("测验 {} 题目解析失败: {e}", self.id))
        })?;

        Ok(Quiz {
            id: self.id,
            title: self.title,
            subject: self.subject,
            class_name: self.class_name,
            teacher_id: self.teacher_id,
            questions,
            due_date: self.due_date.map(super::ts_to_datetime),
            created_at: super::ts_to_datetime(self.created_at),
        })
    }
}
