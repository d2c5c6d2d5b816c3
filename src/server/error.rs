//! 在线服务错误类型

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// 接口错误类型
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("未登录")]
    Unauthorized,

    #[error("题目未找到")]
    QuestionNotFound,

    #[error("服务器内部错误: {0}")]
    Internal(String),
}

/// 错误响应体
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::QuestionNotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// 接口结果类型
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_question_not_found_status() {
        let response = ApiError::QuestionNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::Unauthorized.to_string(), "未登录");
        assert_eq!(ApiError::QuestionNotFound.to_string(), "题目未找到");
    }
}
