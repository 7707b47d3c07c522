//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! formflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use formflow_domain::notification::{EmailMessage, NotificationError};

use crate::notification::NotificationSender;

/// テスト用通知送信モック
///
/// 送信されたメッセージを記録する。[`failing`](Self::failing) で構築すると
/// すべての送信が失敗し、[`failing_recipient`](Self::failing_recipient) で
/// 構築すると特定の宛先のみ失敗する。失敗経路のテストに使用できる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:           Arc<Mutex<Vec<EmailMessage>>>,
    fail_all:       bool,
    fail_recipient: Option<String>,
}

impl MockNotificationSender {
    /// 常に成功するモックを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に失敗するモックを作成する
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// 特定の宛先のみ失敗するモックを作成する
    pub fn failing_recipient(recipient: impl Into<String>) -> Self {
        Self {
            fail_recipient: Some(recipient.into()),
            ..Self::default()
        }
    }

    /// これまでに送信を試みられたメッセージ
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email.clone());
        let should_fail =
            self.fail_all || self.fail_recipient.as_deref() == Some(email.to.as_str());
        if should_fail {
            return Err(NotificationError::SendFailed(
                "mock sender configured to fail".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_email() -> EmailMessage {
        EmailMessage {
            to:        "ada@example.com".to_string(),
            subject:   "テスト件名".to_string(),
            html_body: "<p>テスト</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn 送信メッセージが記録される() {
        let sender = MockNotificationSender::new();

        sender.send_email(&make_email()).await.unwrap();

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@example.com");
    }

    #[tokio::test]
    async fn failingモックは記録した上で失敗を返す() {
        let sender = MockNotificationSender::failing();

        let result = sender.send_email(&make_email()).await;

        assert!(result.is_err());
        assert_eq!(sender.sent_emails().len(), 1);
    }

    #[tokio::test]
    async fn failing_recipientモックは指定宛先のみ失敗する() {
        let sender = MockNotificationSender::failing_recipient("admin@example.com");

        assert!(sender.send_email(&make_email()).await.is_ok());

        let mut admin_email = make_email();
        admin_email.to = "admin@example.com".to_string();
        assert!(sender.send_email(&admin_email).await.is_err());
    }
}
