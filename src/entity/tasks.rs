//! 个人待办实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub completed: bool,
    pub due_date: Option<i64>,
    pub priority: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_task(self) -> crate::models::tasks::entities::Task {
        use crate::models::tasks::entities::{Task, TaskPriority};

        Task {
            id: self.id,
            user_id: self.user_id,
            text: self.text,
            completed: self.completed,
            due_date: self.due_date.map(super::ts_to_datetime),
            priority: self.priority.parse().unwrap_or(TaskPriority::Medium),
            created_at: super::ts_to_datetime(self.created_at),
        }
    }
}
