//! クレデンシャル未設定時の通知送信実装
//!
//! SMTP のユーザー名・パスワードが未設定の場合に使用する。
//! プロセスは起動させたまま、送信ごとにログを出して失敗を返す
//! （フェイルクローズ。例外は投げない）。

use async_trait::async_trait;
use formflow_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// 未設定時の通知送信（常に失敗を返す）
#[derive(Debug, Clone)]
pub struct UnconfiguredNotificationSender;

#[async_trait]
impl NotificationSender for UnconfiguredNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::error!(
            to = %email.to,
            "SMTP クレデンシャルが未設定のため送信できません"
        );
        Err(NotificationError::CredentialsMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_emailが常にcredentials_missingを返す() {
        let sender = UnconfiguredNotificationSender;
        let email = EmailMessage {
            to:        "test@example.com".to_string(),
            subject:   "テスト件名".to_string(),
            html_body: "<p>テスト</p>".to_string(),
        };

        let result = sender.send_email(&email).await;
        assert!(matches!(result, Err(NotificationError::CredentialsMissing)));
    }
}
