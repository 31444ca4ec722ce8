use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{AttendanceService, validate_class_and_date};
use crate::errors::{LearnHubError, Result, error_response};
use crate::models::attendance::entities::{AttendanceExportRow, AttendanceRecord};
use crate::models::attendance::requests::AttendanceQuery;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

const CSV_HEADER: [&str; 3] = ["Roll No", "Name", "Status"];

pub async fn export_attendance(
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

    let records = match storage.list_attendance(class_name, date).await {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };
    let student_ids: Vec<i64> = records.iter().map(|r| r.student_id).collect();
    let students = match storage.get_users_by_ids(&student_ids).await {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };

    let data = match render_csv(&export_rows(&records, &students)) {
        Ok(data) => data,
        Err(e) => {
            error!("CSV 生成失败: {}", e);
            return Ok(error_response(&e));
        }
    };

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", export_filename(class_name, date)),
        ))
        .body(data))
}

pub fn export_filename(class_name: &str, date: &str) -> String {
    format!("attendance-{class_name}-{date}.csv")
}

/// 只保留出勤和迟到，按学号排序
pub fn export_rows(records: &[AttendanceRecord], students: &[User]) -> Vec<AttendanceExportRow> {
    let mut rows: Vec<AttendanceExportRow> = records
        .iter()
        .filter(|r| r.status.is_attended())
        .filter_map(|r| {
            students
                .iter()
                .find(|s| s.id == r.student_id)
                .map(|s| AttendanceExportRow {
                    roll_no: s.roll_no.clone().unwrap_or_default(),
                    name: s.name.clone(),
                    status: r.status,
                })
        })
        .collect();
    rows.sort_by(|a, b| a.roll_no.cmp(&b.roll_no));
    rows
}

/// 表头始终输出
pub fn render_csv(rows: &[AttendanceExportRow]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)
        .map_err(|e| LearnHubError::serialization(format!("CSV 写入失败: {e}")))?;

    for row in rows {
        let status = row.status.to_string();
        wtr.write_record([row.roll_no.as_str(), row.name.as_str(), status.as_str()])
            .map_err(|e| LearnHubError::serialization(format!("CSV 写入失败: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| LearnHubError::serialization(format!("CSV 生成失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::users::entities::UserRole;

    fn student(id: i64, name: &str, roll_no: &str) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            email: format!("s{id}@school.edu"),
            password_hash: String::new(),
            role: UserRole::Student,
            name: name.into(),
            school: None,
            grade: Some("10".into()),
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

    fn record(student_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: student_id,
            student_id,
            teacher_id: 9,
            class_name: "10-A".into(),
            date: "2025-03-14".into(),
            status,
        }
    }

    #[test]
    fn test_only_present_and_late_exported_in_roll_order() {
        let students = vec![student(1, "Ana", "03"), student(2, "Ben", "01"), student(3, "Cy", "02")];
        let records = vec![
            record(1, AttendanceStatus::Late),
            record(2, AttendanceStatus::Present),
            record(3, AttendanceStatus::Absent),
        ];

        let rows = export_rows(&records, &students);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Ana"]);

        let csv = String::from_utf8(render_csv(&rows).unwrap()).unwrap();
        assert_eq!(csv, "Roll No,Name,Status\n01,Ben,PRESENT\n03,Ana,LATE\n");
    }

    #[test]
    fn test_header_present_when_empty() {
        let csv = String::from_utf8(render_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "Roll No,Name,Status\n");
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let rows = vec![AttendanceExportRow {
            roll_no: "05".into(),
            name: "Doe, Jane".into(),
            status: AttendanceStatus::Present,
        }];
        let csv = String::from_utf8(render_csv(&rows).unwrap()).unwrap();
        assert!(csv.contains("05,\"Doe, Jane\",PRESENT"));
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            export_filename("10-A", "2025-03-14"),
            "attendance-10-A-2025-03-14.csv"
        );
    }
}
