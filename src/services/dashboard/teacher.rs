use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DashboardService, percentage};
use crate::errors::error_response;
use crate::models::attendance::entities::AttendanceRecord;
use crate::models::dashboard::responses::{
    ClassOverview, RecentActivity, RecentActivityKind, TeacherDashboardResponse,
};
use crate::models::quizzes::{entities::QuizSubmission, responses::QuizSummary};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

const NO_SUBJECT: &str = "N/A";

/// 教师仪表盘所需的全部数据
#[derive(Debug)]
pub struct TeacherSources {
    pub teacher: User,
    pub quizzes: Vec<QuizSummary>,
    pub students: Vec<User>,
    pub attendance: Vec<AttendanceRecord>,
    /// 教师所有测验的提交，新的在前
    pub submissions: Vec<QuizSubmission>,
    pub latest_submitter: Option<String>,
}

pub async fn get_teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let teacher = match storage.get_user_by_id(session.id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "Teacher not found")));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    let result = async {
        let quizzes = storage.list_quizzes_by_teacher(teacher.id).await?;
        let students = storage
            .list_students_in_classes(&teacher.distinct_classes())
            .await?;
        let attendance = storage.list_attendance_by_teacher(teacher.id).await?;

        let quiz_ids: Vec<i64> = quizzes.iter().map(|q| q.quiz.id).collect();
        let submissions = storage.list_submissions_for_quizzes(&quiz_ids).await?;

        let latest_submitter = match submissions.first() {
            Some(s) => storage.get_user_by_id(s.student_id).await?.map(|u| u.name),
            None => None,
        };

        Ok::<_, crate::errors::LearnHubError>(TeacherSources {
            teacher,
            quizzes,
            students,
            attendance,
            submissions,
            latest_submitter,
        })
    }
    .await;

    match result {
        Ok(sources) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize(sources),
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub fn summarize(sources: TeacherSources) -> TeacherDashboardResponse {
    let TeacherSources {
        teacher,
        quizzes,
        students,
        attendance,
        submissions,
        latest_submitter,
    } = sources;

    let classes = teacher.distinct_classes();

    let attended = attendance.iter().filter(|r| r.status.is_attended()).count() as i64;
    let avg_attendance = percentage(attended, attendance.len() as i64);

    let classes_overview = classes
        .iter()
        .map(|class_name| class_overview(class_name, &teacher, &quizzes, &students, &submissions))
        .collect();

    let mut recent_activity = Vec::new();
    if let Some(latest) = submissions.iter().max_by_key(|s| s.submitted_at) {
        let title = quizzes
            .iter()
            .find(|q| q.quiz.id == latest.quiz_id)
            .map(|q| q.quiz.title.as_str())
            .unwrap_or_default();
        let who = latest_submitter.as_deref().unwrap_or("A student");
        recent_activity.push(RecentActivity {
            kind: RecentActivityKind::Submission,
            description: format!("{who} completed \"{title}\""),
            at: latest.submitted_at,
        });
    }
    if let Some(latest) = quizzes.iter().max_by_key(|q| q.quiz.created_at) {
        recent_activity.push(RecentActivity {
            kind: RecentActivityKind::QuizCreated,
            description: format!("You created the quiz \"{}\"", latest.quiz.title),
            at: latest.quiz.created_at,
        });
    }

    TeacherDashboardResponse {
        total_classes: classes.len() as i64,
        total_students: students.len() as i64,
        active_quizzes: quizzes.len() as i64,
        avg_attendance,
        classes_overview,
        recent_activity,
    }
}

fn class_overview(
    class_name: &str,
    teacher: &User,
    quizzes: &[QuizSummary],
    students: &[User],
    submissions: &[QuizSubmission],
) -> ClassOverview {
    let student_count = students
        .iter()
        .filter(|s| s.class_name.as_deref() == Some(class_name))
        .count() as i64;

    let class_quizzes: Vec<&QuizSummary> = quizzes
        .iter()
        .filter(|q| q.quiz.class_name == class_name)
        .collect();

    // 最早为该班出的测验的科目，其次是教师的第一门科目
    let subject = class_quizzes
        .iter()
        .min_by_key(|q| q.quiz.created_at)
        .map(|q| q.quiz.subject.clone())
        .or_else(|| teacher.subjects.first().cloned())
        .unwrap_or_else(|| NO_SUBJECT.to_string());

    let percentages: Vec<i64> = submissions
        .iter()
        .filter(|s| class_quizzes.iter().any(|q| q.quiz.id == s.quiz_id))
        .map(|s| percentage(i64::from(s.score), i64::from(s.total_points)))
        .collect();
    let progress = percentage(percentages.iter().sum(), 100 * percentages.len() as i64);

    ClassOverview {
        class_name: class_name.to_string(),
        student_count,
        subject,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::users::entities::UserRole;
    use crate::services::feed::build::tests::{day, quiz};

    fn user(id: i64, role: UserRole, class_name: Option<&str>) -> User {
        User {
            id,
            email: format!("u{id}@school.edu"),
            password_hash: String::new(),
            role,
            name: format!("User {id}"),
            school: None,
            grade: None,
            class_name: class_name.map(str::to_string),
            roll_no: None,
            classes_taught: Vec::new(),
            subjects: Vec::new(),
            phone: None,
            bio: None,
            experience: None,
            created_at: day(1),
            updated_at: day(1),
        }
    }

    fn teacher() -> User {
        let mut t = user(9, UserRole::Teacher, None);
        t.classes_taught = vec!["10-A".into(), "10-B".into(), "10-A".into()];
        t.subjects = vec!["Physics".into()];
        t
    }

    fn summary(id: i64, class_name: &str, subject: &str, created: u32) -> QuizSummary {
        let mut q = quiz(id, subject, created, None);
        q.class_name = class_name.into();
        QuizSummary {
            quiz: q,
            submission_count: 0,
        }
    }

    fn record(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 0,
            student_id: 1,
            teacher_id: 9,
            class_name: "10-A".into(),
            date: "2025-03-01".into(),
            status,
        }
    }

    fn submission(quiz_id: i64, score: i32, total: i32, at: u32) -> QuizSubmission {
        QuizSubmission {
            id: quiz_id * 10 + i64::from(at),
            quiz_id,
            student_id: 1,
            answers: Default::default(),
            score,
            total_points: total,
            submitted_at: day(at),
        }
    }

    #[test]
    fn test_empty_teacher() {
        let dash = summarize(TeacherSources {
            teacher: user(9, UserRole::Teacher, None),
            quizzes: vec![],
            students: vec![],
            attendance: vec![],
            submissions: vec![],
            latest_submitter: None,
        });
        assert_eq!(dash.total_classes, 0);
        assert_eq!(dash.avg_attendance, 0);
        assert!(dash.classes_overview.is_empty());
        assert!(dash.recent_activity.is_empty());
    }

    #[test]
    fn test_full_dashboard() {
        let dash = summarize(TeacherSources {
            teacher: teacher(),
            quizzes: vec![
                summary(2, "10-A", "Chemistry", 6),
                summary(1, "10-A", "Math", 3),
            ],
            students: vec![
                user(1, UserRole::Student, Some("10-A")),
                user(2, UserRole::Student, Some("10-A")),
                user(3, UserRole::Student, Some("10-B")),
            ],
            attendance: vec![
                record(AttendanceStatus::Present),
                record(AttendanceStatus::Late),
                record(AttendanceStatus::Absent),
            ],
            submissions: vec![submission(2, 1, 2, 12), submission(1, 2, 2, 10)],
            latest_submitter: Some("Ana".into()),
        });

        assert_eq!(dash.total_classes, 2);
        assert_eq!(dash.total_students, 3);
        assert_eq!(dash.active_quizzes, 2);
        // 出勤 + 迟到 = 2 / 3
        assert_eq!(dash.avg_attendance, 67);

        let a = &dash.classes_overview[0];
        assert_eq!(a.class_name, "10-A");
        assert_eq!(a.student_count, 2);
        assert_eq!(a.subject, "Math");
        // (50 + 100) / 2
        assert_eq!(a.progress, 75);

        let b = &dash.classes_overview[1];
        assert_eq!(b.student_count, 1);
        assert_eq!(b.subject, "Physics");
        assert_eq!(b.progress, 0);

        assert_eq!(dash.recent_activity.len(), 2);
        assert_eq!(dash.recent_activity[0].kind, RecentActivityKind::Submission);
        assert_eq!(
            dash.recent_activity[0].description,
            "Ana completed \"Quiz 2\""
        );
        assert_eq!(dash.recent_activity[1].kind, RecentActivityKind::QuizCreated);
        assert_eq!(dash.recent_activity[1].at, day(6));
    }

    #[test]
    fn test_subject_falls_back_to_na() {
        let mut t = teacher();
        t.subjects.clear();
        let dash = summarize(TeacherSources {
            teacher: t,
            quizzes: vec![],
            students: vec![],
            attendance: vec![],
            submissions: vec![],
            latest_submitter: None,
        });
        assert!(dash.classes_overview.iter().all(|c| c.subject == "N/A"));
    }
}
