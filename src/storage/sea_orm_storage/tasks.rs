use super::SeaOrmStorage;
use crate::entity::tasks::{ActiveModel, Column, Entity as Tasks};
use crate::errors::{LearnHubError, Result};
use crate::models::tasks::{entities::Task, requests::CreateTaskRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出用户待办（新的在前）
    pub async fn list_tasks_by_user_impl(&self, user_id: i64) -> Result<Vec<Task>> {
        let tasks = Tasks::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询待办失败: {e}")))?;

        Ok(tasks.into_iter().map(|m| m.into_task()).collect())
    }

    /// 创建待办
    pub async fn create_task_impl(&self, user_id: i64, req: CreateTaskRequest) -> Result<Task> {
        let model = ActiveModel {
            user_id: Set(user_id),
            text: Set(req.text),
            completed: Set(false),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            priority: Set(req.priority.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("创建待办失败: {e}")))?;

        Ok(result.into_task())
    }

    /// 修改完成状态，只允许本人操作
    pub async fn update_task_completion_impl(
        &self,
        id: i64,
        user_id: i64,
        completed: bool,
    ) -> Result<Option<Task>> {
        let existing = Tasks::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询待办失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.completed = Set(completed);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("更新待办失败: {e}")))?;

        Ok(Some(result.into_task()))
    }

    /// 删除待办
    pub async fn delete_task_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = Tasks::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("删除待办失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
