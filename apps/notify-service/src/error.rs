//! # Notify Service エラー定義
//!
//! ハンドラ境界のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! エラーレスポンスも成功時と同じ `{ "success": false, "message": ... }`
//! エンベロープで返す（フォームクライアントは `success` フィールドで
//! 結果を判定するため）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use formflow_shared::ApiResponse;
use thiserror::Error;

/// Notify Service で発生するエラー
#[derive(Debug, Error)]
pub enum NotifyError {
    /// 不正なリクエスト（ボディ欠落、必須フィールド欠落）
    #[error("{0}")]
    BadRequest(String),

    /// 許可されていない HTTP メソッド
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// 内部エラー
    #[error("Server error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for NotifyError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let status = match &self {
            NotifyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            NotifyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            NotifyError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ApiResponse::fail(self.to_string()))).into_response()
    }
}
