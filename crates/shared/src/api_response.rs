//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式 `{ "success": bool, "message": string }`
//! を提供する。
//!
//! 成功・失敗どちらの応答もこの 1 つの形で返す。フォーム送信クライアントは
//! HTTP ステータスではなく `success` フィールドで結果を判定するため、
//! エラーレスポンスもこのエンベロープを使用する。

use serde::{Deserialize, Serialize};

/// 公開 API の統一レスポンス型
///
/// この型は以下の場所で使用される:
/// - Notify Service ハンドラ（Serialize でレスポンスを返す）
/// - Notify Service エラー変換（4xx/5xx でも同じ形で返す）
///
/// ## 使用例
///
/// ```
/// use formflow_shared::ApiResponse;
///
/// let response = ApiResponse::ok("sent");
/// assert!(response.success);
/// assert_eq!(response.message, "sent");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    /// 成功レスポンスを作成する
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// 失敗レスポンスを作成する
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
