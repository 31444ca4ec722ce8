use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{LearnHubError, Result};
use crate::models::assignments::{
    entities::{Assignment, AssignmentStatus},
    requests::CreateAssignmentRequest,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 列出学生的作业（按截止时间）
    pub async fn list_assignments_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(assignments
            .into_iter()
            .map(|m| m.into_assignment())
            .collect())
    }

    /// 为一组学生各创建一份待完成作业
    pub async fn create_assignments_impl(
        &self,
        student_ids: &[i64],
        req: &CreateAssignmentRequest,
    ) -> Result<i64> {
        if student_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let models = student_ids.iter().map(|student_id| ActiveModel {
            student_id: Set(*student_id),
            title: Set(req.title.clone()),
            subject: Set(req.subject.clone()),
            description: Set(req.description.clone()),
            due_date: Set(req.due_date.timestamp()),
            status: Set(AssignmentStatus::Pending.to_string()),
            score: Set(None),
            total_points: Set(None),
            created_at: Set(now),
            ..Default::default()
        });

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LearnHubError::database_operation(format!("开启事务失败: {e}")))?;

        Assignments::insert_many(models)
            .exec(&txn)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("批量创建作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LearnHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(student_ids.len() as i64)
    }
}
