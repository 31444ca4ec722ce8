use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{AttendanceService, validate_class_and_date};
use crate::models::attendance::entities::AttendanceStatus;
use crate::models::attendance::requests::SaveAttendanceRequest;
use crate::models::attendance::responses::SaveAttendanceResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn save_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    save_request: SaveAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_class_and_date(&save_request.class_name, &save_request.date) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AttendanceInvalid, msg)));
    }
    if save_request.attendance.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceInvalid,
            "Attendance data is required",
        )));
    }

    let mut entries: Vec<(i64, AttendanceStatus)> = save_request.attendance.into_iter().collect();
    entries.sort_by_key(|(student_id, _)| *student_id);

    let class_name = save_request.class_name.trim();
    let date = save_request.date.trim();

    let storage = service.get_storage(request);
    match storage
        .save_attendance(session.id, class_name, date, &entries)
        .await
    {
        Ok(saved) => {
            info!(
                "Teacher {} saved {} attendance rows for {} on {}",
                session.id, saved, class_name, date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SaveAttendanceResponse { saved },
                "Attendance saved successfully",
            )))
        }
        Err(e) => {
            // 事务已回滚，不会留下部分写入
            error!("Failed to save attendance for {} on {}: {}", class_name, date, e);
            Ok(HttpResponse::build(e.status_code()).json(ApiResponse::error_empty(
                ErrorCode::AttendanceSaveFailed,
                format!("Failed to save attendance: {}", e.message()),
            )))
        }
    }
}
