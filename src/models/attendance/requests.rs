use std::collections::HashMap;

use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;

// 按班级 + 日期查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceQuery {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub date: String,
}

// 保存考勤：学生 ID -> 状态
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SaveAttendanceRequest {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub attendance: HashMap<i64, AttendanceStatus>,
}
