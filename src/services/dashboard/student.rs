use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DashboardService, percentage};
use crate::errors::error_response;
use crate::models::dashboard::responses::{RecentGrade, StudentDashboardResponse, SubjectProgress};
use crate::models::feed::entities::FeedItem;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::services::feed::build::{FeedSources, build_feed};

const PENDING_PREVIEW: usize = 3;
const RECENT_GRADES: usize = 4;

pub async fn get_student_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let student = match storage.get_user_by_id(session.id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "Student not found")));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    let mut sources = match FeedSources::load(&storage, &student).await {
        Ok(sources) => sources,
        Err(e) => return Ok(error_response(&e)),
    };
    // 仪表盘只统计作业和测验
    sources.activities.clear();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summarize(student.name, build_feed(sources)),
        "Dashboard retrieved successfully",
    )))
}

/// 由已按截止时间升序排好的条目计算仪表盘
pub fn summarize(student_name: String, items: Vec<FeedItem>) -> StudentDashboardResponse {
    let (pending, rest): (Vec<FeedItem>, Vec<FeedItem>) =
        items.into_iter().partition(FeedItem::is_pending);
    let mut completed: Vec<FeedItem> = rest.into_iter().filter(|i| i.score.is_some()).collect();

    let (score_sum, total_sum) = sums(&completed);

    // 科目按首次出现的顺序排列
    let mut subjects: Vec<(String, i64, i64, i64)> = Vec::new();
    for item in &completed {
        let (score, total) = points(item);
        match subjects.iter_mut().find(|entry| entry.0 == item.subject) {
            Some(entry) => {
                entry.1 += 1;
                entry.2 += score;
                entry.3 += total;
            }
            None => subjects.push((item.subject.clone(), 1, score, total)),
        }
    }
    let subject_progress = subjects
        .into_iter()
        .map(|(subject, count, score, total)| SubjectProgress {
            subject,
            completed: count,
            avg_score: percentage(score, total),
        })
        .collect();

    completed.sort_by(|a, b| b.due_date.cmp(&a.due_date));
    let recent_grades = completed
        .iter()
        .take(RECENT_GRADES)
        .map(|item| {
            let (score, total) = points(item);
            RecentGrade {
                id: item.id,
                title: item.title.clone(),
                subject: item.subject.clone(),
                score: score as i32,
                total_points: total as i32,
                percentage: percentage(score, total),
                date: item.due_date,
            }
        })
        .collect();

    StudentDashboardResponse {
        student_name,
        active_assignments: pending.len() as i64,
        completed_assignments: completed.len() as i64,
        avg_score: percentage(score_sum, total_sum),
        subject_progress,
        pending_items: pending.into_iter().take(PENDING_PREVIEW).collect(),
        recent_grades,
    }
}

fn points(item: &FeedItem) -> (i64, i64) {
    (
        i64::from(item.score.unwrap_or(0)),
        i64::from(item.total_points.unwrap_or(0)),
    )
}

fn sums(items: &[FeedItem]) -> (i64, i64) {
    items
        .iter()
        .map(points)
        .fold((0, 0), |(s, t), (score, total)| (s + score, t + total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentStatus;
    use crate::services::feed::build::tests::{assignment, quiz, submission};

    #[test]
    fn test_empty_dashboard_has_zero_average() {
        let dash = summarize("Arnold".into(), Vec::new());
        assert_eq!(dash.student_name, "Arnold");
        assert_eq!(dash.avg_score, 0);
        assert_eq!(dash.active_assignments, 0);
        assert_eq!(dash.completed_assignments, 0);
        assert!(dash.subject_progress.is_empty());
        assert!(dash.recent_grades.is_empty());
    }

    #[test]
    fn test_pending_only_has_zero_average() {
        let items = build_feed(FeedSources {
            assignments: vec![assignment(1, 4, AssignmentStatus::Pending)],
            quizzes: vec![quiz(10, "Math", 2, None)],
            ..Default::default()
        });
        let dash = summarize("Arnold".into(), items);
        assert_eq!(dash.active_assignments, 2);
        assert_eq!(dash.avg_score, 0);
    }

    #[test]
    fn test_counts_and_averages() {
        let items = build_feed(FeedSources {
            assignments: vec![
                assignment(1, 4, AssignmentStatus::Pending),
                assignment(2, 6, AssignmentStatus::Graded), // 8/10
                assignment(3, 7, AssignmentStatus::Submitted), // 无分数，不计入完成
            ],
            quizzes: vec![
                quiz(10, "Math", 2, None),
                quiz(11, "Math", 3, None),
                quiz(12, "History", 8, None),
                quiz(13, "Math", 9, None),
            ],
            activities: vec![],
            submissions: vec![submission(11, 1), submission(13, 2)],
        });

        let dash = summarize("Arnold".into(), items);
        // 作业 1、测验 10、测验 12 待完成
        assert_eq!(dash.active_assignments, 3);
        assert_eq!(dash.completed_assignments, 3);
        // (8 + 1 + 2) / (10 + 2 + 2) = 11 / 14
        assert_eq!(dash.avg_score, 79);

        assert_eq!(
            dash.subject_progress,
            vec![
                SubjectProgress {
                    subject: "Math".into(),
                    completed: 2,
                    avg_score: 75,
                },
                SubjectProgress {
                    subject: "Science".into(),
                    completed: 1,
                    avg_score: 80,
                },
            ]
        );

        let pending_ids: Vec<i64> = dash.pending_items.iter().map(|i| i.id).collect();
        assert_eq!(pending_ids, vec![10, 1, 12]);

        // 最近成绩按日期倒序
        let grade_ids: Vec<i64> = dash.recent_grades.iter().map(|g| g.id).collect();
        assert_eq!(grade_ids, vec![13, 2, 11]);
        assert_eq!(dash.recent_grades[0].percentage, 100);
    }

    #[test]
    fn test_previews_are_capped() {
        let items = build_feed(FeedSources {
            quizzes: (1..=6).map(|i| quiz(i, "Math", i as u32, None)).collect(),
            submissions: vec![
                submission(1, 1),
                submission(2, 1),
                submission(3, 1),
                submission(4, 1),
                submission(5, 1),
            ],
            ..Default::default()
        });
        let dash = summarize("Arnold".into(), items);
        assert_eq!(dash.recent_grades.len(), 4);
        assert_eq!(dash.pending_items.len(), 1);
        assert_eq!(dash.completed_assignments, 5);
    }
}
