//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 認証付き STARTTLS リレー（ポート 587）に接続する。

use async_trait::async_trait;
use formflow_domain::notification::{EmailMessage, NotificationError};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Message, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::NotificationSender;

/// SMTP 認証情報
#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 送信は 1 通ずつ、リトライ・バッチ・キューなし。トランスポートに
/// タイムアウトは設定しない（ハングした呼び出しは完了まで待つ）。
pub struct SmtpNotificationSender {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成する
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "smtp.gmail.com"）
    /// - `port`: SMTP サーバーのポート番号（例: 587）
    /// - `credentials`: SMTP 認証情報
    /// - `from_email`: 送信元メールアドレス
    /// - `from_name`: 送信元表示名
    pub fn new(
        host: &str,
        port: u16,
        credentials: SmtpCredentials,
        from_email: &str,
        from_name: &str,
    ) -> Result<Self, NotificationError> {
        // starttls_relay: 平文接続後に STARTTLS へアップグレード（587 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| {
                NotificationError::SendFailed(format!("SMTP トランスポート構築失敗: {e}"))
            })?
            .port(port)
            .credentials(Credentials::new(credentials.username, credentials.password))
            .build();

        Ok(Self {
            transport,
            from_address: format!("{from_name} <{from_email}>"),
        })
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = Message::builder()
            .from(self.from_address.parse().map_err(|e| {
                NotificationError::SendFailed(format!("送信元アドレス不正: {e}"))
            })?)
            .to(email
                .to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
            .subject(&email.subject)
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(email.html_body.clone()),
            )
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}
