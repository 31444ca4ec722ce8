//! 测验提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    /// 作答（JSON 对象）
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    pub score: i32,
    pub total_points: i32,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id"
    )]
    Quiz,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(
        self,
    ) -> crate::errors::Result<crate::models::quizzes::entities::QuizSubmission> {
        use crate::errors::LearnHubError;
        use crate::models::quizzes::entities::QuizSubmission;

        let answers = serde_json::from_str(&self.answers).map_err(|e| {
            LearnHubError::serialization(format!("提交 {} 作答解析失败: {e}", self.id))
        })?;

        Ok(QuizSubmission {
            id: self.id,
            quiz_id: self.quiz_id,
            student_id: self.student_id,
            answers,
            score: self.score,
            total_points: self.total_points,
            submitted_at: super::ts_to_datetime(self.submitted_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LearnHubError;

    fn model(answers: &str) -> Model {
        Model {
            id: 3,
            quiz_id: 1,
            student_id: 2,
            answers: answers.to_string(),
            score: 1,
            total_points: 2,
            submitted_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_into_submission_keeps_answers() {
        let submission = model(r#"{"0":1,"1":0}"#).into_submission().unwrap();
        assert_eq!(submission.answers.get(&0), Some(&1));
        assert_eq!(submission.answers.len(), 2);
    }

    #[test]
    fn test_into_submission_rejects_corrupt_answers() {
        let err = model("[1, 2").into_submission().unwrap_err();
        assert!(matches!(err, LearnHubError::Serialization(_)));
    }
}
