use serde::Serialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;

// 点名册条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RosterEntry {
    pub student_id: i64,
    pub name: String,
    pub roll_no: Option<String>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRosterResponse {
    pub class_name: String,
    pub date: String,
    pub items: Vec<RosterEntry>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SaveAttendanceResponse {
    pub saved: i64,
}
