use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, validate_class_and_date};
use crate::errors::error_response;
use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use crate::models::attendance::requests::AttendanceQuery;
use crate::models::attendance::responses::{AttendanceRosterResponse, RosterEntry};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_roster(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceQuery,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_class_and_date(&query.class_name, &query.date) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AttendanceInvalid, msg)));
    }
    let class_name = query.class_name.trim();
    let date = query.date.trim();

    let storage = service.get_storage(request);

    let students = match storage.list_students_by_class(class_name).await {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };
    let records = match storage.list_attendance(class_name, date).await {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceRosterResponse {
            class_name: class_name.to_string(),
            date: date.to_string(),
            items: build_roster(students, &records),
        },
        "Attendance retrieved successfully",
    )))
}

/// 学生按存储层给出的学号顺序排列，没有记录的记为缺勤
pub fn build_roster(students: Vec<User>, records: &[AttendanceRecord]) -> Vec<RosterEntry> {
    let status_of: HashMap<i64, AttendanceStatus> =
        records.iter().map(|r| (r.student_id, r.status)).collect();

    students
        .into_iter()
        .map(|s| RosterEntry {
            student_id: s.id,
            status: status_of
                .get(&s.id)
                .copied()
                .unwrap_or(AttendanceStatus::Absent),
            name: s.name,
            roll_no: s.roll_no,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn student(id: i64, roll_no: &str) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            email: format!("s{id}@school.edu"),
            password_hash: String::new(),
            role: UserRole::Student,
            name: format!("Student {id}"),
            school: None,
            grade: None,
            class_name: Some("10-A".into()),
            roll_no: Some(roll_no.into()),
            classes_taught: Vec::new(),
            subjects: Vec::new(),
            phone: None,
            bio: None,
            experience: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_missing_records_default_to_absent() {
        let records = vec![AttendanceRecord {
            id: 1,
            student_id: 2,
            teacher_id: 9,
            class_name: "10-A".into(),
            date: "2025-03-14".into(),
            status: AttendanceStatus::Late,
        }];

        let roster = build_roster(vec![student(1, "01"), student(2, "02")], &records);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].student_id, 1);
        assert_eq!(roster[0].status, AttendanceStatus::Absent);
        assert_eq!(roster[1].status, AttendanceStatus::Late);
        assert_eq!(roster[1].roll_no.as_deref(), Some("02"));
    }
}
