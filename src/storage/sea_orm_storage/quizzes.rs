use std::collections::HashMap;

use super::{SeaOrmStorage, map_insert_err};
use crate::entity::quiz_submissions::{
    ActiveModel as SubmissionActiveModel, Column as SubmissionColumn,
    Entity as QuizSubmissions,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::{LearnHubError, Result};
use crate::models::quizzes::{
    entities::{AnswerMap, Quiz, QuizSubmission},
    requests::CreateQuizRequest,
    responses::QuizSummary,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建测验
    pub async fn create_quiz_impl(&self, teacher_id: i64, req: CreateQuizRequest) -> Result<Quiz> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title),
            subject: Set(req.subject),
            class_name: Set(req.class_name),
            questions: Set(serde_json::to_string(&req.questions)?),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("创建测验失败: {e}")))?;

        result.into_quiz()
    }

    /// 通过 ID 获取测验
    pub async fn get_quiz_by_id_impl(&self, id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询测验失败: {e}")))?;

        result.map(|m| m.into_quiz()).transpose()
    }

    /// 列出教师的测验，附带提交数
    pub async fn list_quizzes_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<QuizSummary>> {
        let quizzes = Quizzes::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询测验列表失败: {e}")))?;

        let quiz_ids: Vec<i64> = quizzes.iter().map(|q| q.id).collect();
        let mut counts: HashMap<i64, i64> = HashMap::new();
        for submission in self.list_submissions_for_quizzes_impl(&quiz_ids).await? {
            *counts.entry(submission.quiz_id).or_default() += 1;
        }

        quizzes
            .into_iter()
            .map(|m| {
                let submission_count = counts.get(&m.id).copied().unwrap_or(0);
                Ok(QuizSummary {
                    quiz: m.into_quiz()?,
                    submission_count,
                })
            })
            .collect()
    }

    /// 列出班级可见的测验
    pub async fn list_quizzes_for_class_impl(&self, class_name: &str) -> Result<Vec<Quiz>> {
        let quizzes = Quizzes::find()
            .filter(Column::ClassName.eq(class_name))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询班级测验失败: {e}")))?;

        quizzes.into_iter().map(|m| m.into_quiz()).collect()
    }

    /// 保存测验提交，(quiz_id, student_id) 唯一
    pub async fn create_quiz_submission_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
        answers: &AnswerMap,
        score: i32,
        total_points: i32,
    ) -> Result<QuizSubmission> {
        let now = chrono::Utc::now().timestamp();

        let model = SubmissionActiveModel {
            quiz_id: Set(quiz_id),
            student_id: Set(student_id),
            answers: Set(serde_json::to_string(answers)?),
            score: Set(score),
            total_points: Set(total_points),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err(e, "Quiz already submitted", "保存测验提交"))?;

        result.into_submission()
    }

    /// 获取学生对某测验的提交
    pub async fn get_quiz_submission_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizSubmission>> {
        let result = QuizSubmissions::find()
            .filter(SubmissionColumn::QuizId.eq(quiz_id))
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询测验提交失败: {e}")))?;

        result.map(|m| m.into_submission()).transpose()
    }

    /// 列出学生的全部提交
    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<QuizSubmission>> {
        let submissions = QuizSubmissions::find()
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .order_by_desc(SubmissionColumn::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询学生提交失败: {e}")))?;

        submissions.into_iter().map(|m| m.into_submission()).collect()
    }

    /// 列出若干测验的全部提交（新的在前）
    pub async fn list_submissions_for_quizzes_impl(
        &self,
        quiz_ids: &[i64],
    ) -> Result<Vec<QuizSubmission>> {
        if quiz_ids.is_empty() {
            return Ok(Vec::new());
        }

        let submissions = QuizSubmissions::find()
            .filter(SubmissionColumn::QuizId.is_in(quiz_ids.iter().copied()))
            .order_by_desc(SubmissionColumn::SubmittedAt)
            .order_by_desc(SubmissionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询测验提交失败: {e}")))?;

        submissions.into_iter().map(|m| m.into_submission()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};

    async fn storage_with_teacher() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory storage");
        let teacher = storage
            .create_user_impl(CreateUserRequest {
                email: "t@school.edu".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Teacher,
                name: "Teacher".to_string(),
                school: None,
                grade: None,
                class_name: None,
                roll_no: None,
                classes_taught: vec!["7A".to_string()],
                subjects: vec!["Math".to_string()],
                phone: None,
                bio: None,
                experience: None,
            })
            .await
            .expect("create teacher");
        (storage, teacher.id)
    }

    #[tokio::test]
    async fn test_corrupt_questions_surface_as_error() {
        let (storage, teacher_id) = storage_with_teacher().await;

        let row = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set("Broken".to_string()),
            subject: Set("Math".to_string()),
            class_name: Set("7A".to_string()),
            questions: Set("not json".to_string()),
            due_date: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .expect("insert raw quiz");

        let err = storage.get_quiz_by_id_impl(row.id).await.unwrap_err();
        assert!(matches!(err, LearnHubError::Serialization(_)));
        assert!(storage.list_quizzes_for_class_impl("7A").await.is_err());
        assert!(storage.list_quizzes_by_teacher_impl(teacher_id).await.is_err());
    }
}
