//! 学习流合并
//!
//! 作业、班级测验、班级活动统一成 `FeedItem`，按截止时间升序稳定排序。

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::activities::entities::Activity;
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::feed::entities::{FeedItem, FeedItemStatus, FeedItemType};
use crate::models::quizzes::entities::{Quiz, QuizSubmission};
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 活动条目的科目名
pub const ACTIVITY_SUBJECT: &str = "Activity";

/// 一个学生的学习流原始数据
#[derive(Debug, Default)]
pub struct FeedSources {
    pub assignments: Vec<Assignment>,
    pub quizzes: Vec<Quiz>,
    pub activities: Vec<Activity>,
    pub submissions: Vec<QuizSubmission>,
}

impl FeedSources {
    /// 读取学生的作业、提交，以及所在班级的测验和活动
    pub async fn load(storage: &Arc<dyn Storage>, student: &User) -> Result<Self> {
        let assignments = storage.list_assignments_by_student(student.id).await?;
        let submissions = storage.list_submissions_by_student(student.id).await?;

        let (quizzes, activities) = match student.class_name.as_deref() {
            Some(class_name) if !class_name.trim().is_empty() => (
                storage.list_quizzes_for_class(class_name).await?,
                storage.list_activities_for_class(class_name).await?,
            ),
            _ => (Vec::new(), Vec::new()),
        };

        Ok(Self {
            assignments,
            quizzes,
            activities,
            submissions,
        })
    }
}

/// 合并并排序
pub fn build_feed(sources: FeedSources) -> Vec<FeedItem> {
    let FeedSources {
        assignments,
        quizzes,
        activities,
        submissions,
    } = sources;

    let mut by_quiz: HashMap<i64, QuizSubmission> =
        submissions.into_iter().map(|s| (s.quiz_id, s)).collect();

    let mut items = Vec::with_capacity(assignments.len() + quizzes.len() + activities.len());
    items.extend(assignments.into_iter().map(assignment_item));
    items.extend(
        quizzes
            .into_iter()
            .map(|q| {
                let submission = by_quiz.remove(&q.id);
                quiz_item(q, submission)
            }),
    );
    items.extend(activities.into_iter().map(activity_item));

    // sort_by_key 是稳定排序，同一时间保持 作业 > 测验 > 活动 的原始顺序
    items.sort_by_key(|item| item.due_date);
    items
}

fn assignment_item(a: Assignment) -> FeedItem {
    let status = match a.status {
        AssignmentStatus::Pending => FeedItemStatus::Pending,
        AssignmentStatus::Submitted => FeedItemStatus::Submitted,
        AssignmentStatus::Graded => FeedItemStatus::Graded,
    };

    FeedItem {
        id: a.id,
        item_type: FeedItemType::Assignment,
        title: a.title,
        subject: a.subject,
        description: a.description,
        due_date: a.due_date,
        status,
        score: a.score,
        total_points: a.total_points,
        questions: None,
        student_answers: None,
        url: None,
    }
}

fn quiz_item(q: Quiz, submission: Option<QuizSubmission>) -> FeedItem {
    let due_date = q.effective_due_date();
    let description = Some(format!("{} questions", q.questions.len()));

    let (status, score, total_points, answers) = match submission {
        Some(s) => (
            FeedItemStatus::Completed,
            Some(s.score),
            Some(s.total_points),
            Some(s.answers),
        ),
        None => (FeedItemStatus::Pending, None, None, None),
    };

    FeedItem {
        id: q.id,
        item_type: FeedItemType::Quiz,
        title: q.title,
        subject: q.subject,
        description,
        due_date,
        status,
        score,
        total_points,
        questions: Some(q.questions),
        student_answers: answers,
        url: None,
    }
}

fn activity_item(a: Activity) -> FeedItem {
    FeedItem {
        id: a.id,
        item_type: FeedItemType::Activity,
        title: a.title,
        subject: ACTIVITY_SUBJECT.to_string(),
        description: Some(a.description),
        due_date: a.created_at,
        status: FeedItemStatus::Pending,
        score: None,
        total_points: None,
        questions: None,
        student_answers: None,
        url: Some(a.url),
    }
}
