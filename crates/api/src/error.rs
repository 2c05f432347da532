//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。
//! 响应体固定为 `{"error": "<message>"}`，message 即各变体携带的原文。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use hikyaku_core::signal::error::SignalError;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 认证失败 (401)
    #[error("认证失败: {0}")]
    Unauthorized(String),

    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 订单执行失败 (500)，携带交易所或下层适配器的原始错误文本
    #[error("订单执行失败: {0}")]
    Execution(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Execution(msg) => {
                // 执行失败记录日志后将错误原文透传给信号源
                tracing::error!("Order execution failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `SignalError` 转换 - 信号校验失败一律映射为 400
impl From<SignalError> for ApiError {
    fn from(err: SignalError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
