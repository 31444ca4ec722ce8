//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_learnhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LearnHubError {
            $($variant(String),)*
        }

        impl LearnHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LearnHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LearnHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LearnHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LearnHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LearnHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_learnhub_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Conflict"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    Upstream("E011", "Upstream Service Error"),
    FileOperation("E012", "File Operation Error"),
}

impl LearnHubError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            LearnHubError::Validation(_) | LearnHubError::DateParse(_) => StatusCode::BAD_REQUEST,
            LearnHubError::Authentication(_) => StatusCode::UNAUTHORIZED,
            LearnHubError::Authorization(_) => StatusCode::FORBIDDEN,
            LearnHubError::NotFound(_) => StatusCode::NOT_FOUND,
            LearnHubError::Conflict(_) => StatusCode::CONFLICT,
            LearnHubError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            LearnHubError::Validation(_) | LearnHubError::DateParse(_) => ErrorCode::BadRequest,
            LearnHubError::Authentication(_) => ErrorCode::Unauthorized,
            LearnHubError::Authorization(_) => ErrorCode::Forbidden,
            LearnHubError::NotFound(_) => ErrorCode::NotFound,
            LearnHubError::Conflict(_) => ErrorCode::Conflict,
            LearnHubError::Upstream(_) => ErrorCode::UpstreamServiceError,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl fmt::Display for LearnHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LearnHubError {}

/// 将错误转换为统一的 JSON 响应
pub fn error_response(err: &LearnHubError) -> HttpResponse {
    if err.status_code().is_server_error() {
        tracing::error!("{}", err.format_simple());
    }
    HttpResponse::build(err.status_code())
        .json(ApiResponse::error_empty(err.error_code(), err.message()))
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LearnHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        LearnHubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LearnHubError {
    fn from(err: std::io::Error) -> Self {
        LearnHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LearnHubError {
    fn from(err: serde_json::Error) -> Self {
        LearnHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LearnHubError {
    fn from(err: chrono::ParseError) -> Self {
        LearnHubError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for LearnHubError {
    fn from(err: reqwest::Error) -> Self {
        LearnHubError::Upstream(format!("generation failed: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, LearnHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LearnHubError::database_config("test").code(), "E001");
        assert_eq!(LearnHubError::validation("test").code(), "E004");
        assert_eq!(LearnHubError::authentication("test").code(), "E009");
        assert_eq!(LearnHubError::upstream("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            LearnHubError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            LearnHubError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = LearnHubError::validation("Quiz title is required");
        assert_eq!(err.message(), "Quiz title is required");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            LearnHubError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LearnHubError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            LearnHubError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LearnHubError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LearnHubError::upstream("x").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            LearnHubError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_simple() {
        let err = LearnHubError::upstream("malformed AI response");
        let formatted = err.format_simple();
        assert!(formatted.contains("Upstream Service Error"));
        assert!(formatted.contains("malformed AI response"));
    }
}
