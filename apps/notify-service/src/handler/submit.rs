//! # フォーム送信ハンドラ
//!
//! 送信レコードを受け取り、2 通のメール送信結果を 1 つのレスポンスに
//! 合成して返す。
//!
//! ## コントラクト
//!
//! - ボディ: フィールドキー → `{ label?, value }` の JSON オブジェクト
//! - ボディ欠落・パース不能: 400 "No data received"
//! - `email` フィールドの値が空・欠落: 400 "Email is required"
//! - 確認メール成功 + 管理者メール成功（または宛先未設定）: 200
//! - 確認メール成功 + 管理者メール失敗: 200（注記付きメッセージ）
//! - 確認メール失敗: 500（管理者メールの結果に関わらず失敗）

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use formflow_shared::ApiResponse;

use crate::{
    error::NotifyError,
    usecase::{NotificationService, SubmissionBody},
};

/// 送信ハンドラの共有状態
pub struct SubmitState {
    pub service: NotificationService,
}

/// フォーム送信エンドポイント
///
/// `POST /api/submit`
pub async fn submit(
    State(state): State<Arc<SubmitState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse>), NotifyError> {
    if body.is_empty() {
        return Err(NotifyError::BadRequest("No data received".to_string()));
    }

    let data: SubmissionBody = serde_json::from_slice(&body)
        .map_err(|_| NotifyError::BadRequest("No data received".to_string()))?;

    // 申込者のメールアドレス（必須）
    let Some(recipient) = data
        .get("email")
        .and_then(|f| f.value.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
    else {
        return Err(NotifyError::BadRequest("Email is required".to_string()));
    };

    // パーソナライズ用の表示名（未指定時は汎用プレースホルダ）
    let user_name = data
        .get("name")
        .and_then(|f| f.value.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("Participant")
        .to_string();

    let outcome = state.service.dispatch(&data, &recipient, &user_name).await;

    // 2 通の成否を 1 つのレスポンスに合成する。
    // 確認メールの失敗は管理者メールの結果に関わらず全体の失敗になる。
    let (status, response) = if outcome.confirmation_sent && outcome.admin_sent {
        (
            StatusCode::OK,
            ApiResponse::ok("Form submitted successfully and confirmation email sent"),
        )
    } else if outcome.confirmation_sent {
        (
            StatusCode::OK,
            ApiResponse::ok(
                "Form submitted and confirmation email sent, but admin notification failed",
            ),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiResponse::fail("Form received but failed to send confirmation email"),
        )
    };

    Ok((status, Json(response)))
}

/// 許可されていないメソッドへのフォールバック
///
/// axum デフォルトの 405 は空ボディのため、コントラクトどおり
/// `{ "success": false, "message": "Method not allowed" }` を返す。
pub async fn method_not_allowed() -> NotifyError {
    NotifyError::MethodNotAllowed
}
