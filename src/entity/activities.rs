//! 互动活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub class_name: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub url: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_activity(self) -> crate::models::activities::entities::Activity {
        crate::models::activities::entities::Activity {
            id: self.id,
            teacher_id: self.teacher_id,
            class_name: self.class_name,
            title: self.title,
            description: self.description,
            url: self.url,
            created_at: super::ts_to_datetime(self.created_at),
        }
    }
}
