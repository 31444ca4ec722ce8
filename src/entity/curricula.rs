//! 课程大纲实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "curricula")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub subject: String,
    pub grade: String,
    pub duration: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::lesson_plans::Entity")]
    LessonPlan,
}

impl Related<super::lesson_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_curriculum(
        self,
        lesson_plan: Option<super::lesson_plans::Model>,
    ) -> crate::models::curricula::entities::Curriculum {
        crate::models::curricula::entities::Curriculum {
            id: self.id,
            teacher_id: self.teacher_id,
            title: self.title,
            subject: self.subject,
            grade: self.grade,
            duration: self.duration,
            content: self.content,
            created_at: super::ts_to_datetime(self.created_at),
            lesson_plan: lesson_plan.map(|p| p.into_lesson_plan()),
        }
    }
}
