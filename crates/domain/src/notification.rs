//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **結果は bool に還元**: 送信失敗はエラー伝播ではなく成否の結果値として
//!   扱う（report, don't retry 方針）
//! - **使い捨ての値オブジェクト**: [`EmailMessage`] は送信ごとに構築され、
//!   保存されない

use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// SMTP クレデンシャルが未設定
    #[error("SMTP クレデンシャルが設定されていません")]
    CredentialsMissing,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
}
