use super::SeaOrmStorage;
use crate::entity::activities::{ActiveModel, Column, Entity as Activities};
use crate::errors::{LearnHubError, Result};
use crate::models::activities::{
    entities::Activity,
    requests::{CreateActivityRequest, DEFAULT_ACTIVITY_DESCRIPTION},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建活动
    pub async fn create_activity_impl(
        &self,
        teacher_id: i64,
        req: CreateActivityRequest,
    ) -> Result<Activity> {
        let description = req
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ACTIVITY_DESCRIPTION.to_string());

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            class_name: Set(req.class_name),
            title: Set(req.title),
            description: Set(description),
            url: Set(req.url),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_activity())
    }

    /// 列出班级活动
    pub async fn list_activities_for_class_impl(&self, class_name: &str) -> Result<Vec<Activity>> {
        let activities = Activities::find()
            .filter(Column::ClassName.eq(class_name))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询班级活动失败: {e}")))?;

        Ok(activities.into_iter().map(|m| m.into_activity()).collect())
    }
}
