use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::{LearnHubError, Result};
use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use tracing::error;

impl SeaOrmStorage {
    /// 查询班级某日考勤
    pub async fn list_attendance_impl(
        &self,
        class_name: &str,
        date: &str,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = Attendance::find()
            .filter(Column::ClassName.eq(class_name))
            .filter(Column::Date.eq(date))
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }

    /// 批量保存考勤
    ///
    /// 以 (student_id, date) 为键 upsert，任何一行失败则整体回滚。
    pub async fn save_attendance_impl(
        &self,
        teacher_id: i64,
        class_name: &str,
        date: &str,
        entries: &[(i64, AttendanceStatus)],
    ) -> Result<i64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LearnHubError::database_operation(format!("开启事务失败: {e}")))?;

        for (student_id, status) in entries {
            let model = ActiveModel {
                student_id: Set(*student_id),
                teacher_id: Set(teacher_id),
                class_name: Set(class_name.to_string()),
                date: Set(date.to_string()),
                status: Set(status.to_string()),
                ..Default::default()
            };

            let upsert = Attendance::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::StudentId, Column::Date])
                        .update_columns([Column::Status, Column::TeacherId, Column::ClassName])
                        .to_owned(),
                )
                .exec(&txn)
                .await;

            if let Err(e) = upsert {
                error!("保存考勤失败，学生 {}: {}", student_id, e);
                let _ = txn.rollback().await;
                return Err(LearnHubError::database_operation(format!(
                    "保存考勤失败: {e}"
                )));
            }
        }

        txn.commit()
            .await
            .map_err(|e| LearnHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(entries.len() as i64)
    }

    /// 列出教师记录的全部考勤
    pub async fn list_attendance_by_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = Attendance::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }
}
