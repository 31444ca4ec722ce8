pub mod export;
pub mod roster;
pub mod save;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{AttendanceQuery, SaveAttendanceRequest};
use crate::storage::Storage;
use crate::utils::validate::{require_non_blank, validate_date};

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 点名册
    pub async fn get_roster(
        &self,
        request: &HttpRequest,
        query: AttendanceQuery,
    ) -> ActixResult<HttpResponse> {
        roster::get_roster(self, request, query).await
    }

    // 保存考勤
    pub async fn save_attendance(
        &self,
        request: &HttpRequest,
        save_request: SaveAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_attendance(self, request, save_request).await
    }

    // 导出 CSV
    pub async fn export_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceQuery,
    ) -> ActixResult<HttpResponse> {
        export::export_attendance(self, request, query).await
    }
}

/// 班级与日期都必填，日期格式为 YYYY-MM-DD
pub(crate) fn validate_class_and_date(class_name: &str, date: &str) -> Result<(), String> {
    require_non_blank("Class name", class_name)?;
    require_non_blank("Date", date)?;
    validate_date(date.trim())?;
    Ok(())
}
