use super::{SeaOrmStorage, map_insert_err};
use crate::entity::curricula::{ActiveModel, Column, Entity as Curricula};
use crate::entity::lesson_plans::{ActiveModel as LessonPlanActiveModel, Entity as LessonPlans};
use crate::errors::{LearnHubError, Result};
use crate::models::curricula::{
    entities::{Curriculum, LessonPlan},
    requests::GenerateCurriculumRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 保存课程大纲
    pub async fn create_curriculum_impl(
        &self,
        teacher_id: i64,
        req: &GenerateCurriculumRequest,
        title: String,
        content: String,
    ) -> Result<Curriculum> {
        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(title),
            subject: Set(req.subject.clone()),
            grade: Set(req.grade.clone()),
            duration: Set(req.duration.clone()),
            content: Set(content),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("保存课程大纲失败: {e}")))?;

        Ok(result.into_curriculum(None))
    }

    /// 通过 ID 获取大纲及其教案
    pub async fn get_curriculum_by_id_impl(&self, id: i64) -> Result<Option<Curriculum>> {
        let result = Curricula::find_by_id(id)
            .find_also_related(LessonPlans)
            .one(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询课程大纲失败: {e}")))?;

        Ok(result.map(|(curriculum, plan)| curriculum.into_curriculum(plan)))
    }

    /// 列出教师的大纲（新的在前）
    pub async fn list_curricula_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Curriculum>> {
        let rows = Curricula::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .find_also_related(LessonPlans)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询课程大纲列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(curriculum, plan)| curriculum.into_curriculum(plan))
            .collect())
    }

    /// 保存教案，每个大纲只有一份
    pub async fn create_lesson_plan_impl(
        &self,
        curriculum_id: i64,
        teacher_id: i64,
        title: String,
        content: String,
    ) -> Result<LessonPlan> {
        let model = LessonPlanActiveModel {
            curriculum_id: Set(curriculum_id),
            teacher_id: Set(teacher_id),
            title: Set(title),
            content: Set(content),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err(e, "Lesson plan already exists", "保存教案"))?;

        Ok(result.into_lesson_plan())
    }
}
