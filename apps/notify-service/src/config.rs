//! # Notify Service 設定
//!
//! 環境変数から Notify Service サーバーの設定を読み込む。

use std::env;

/// Notify Service サーバーの設定
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// 送信バックエンド（"smtp" | "noop"）
    pub backend: String,
    /// SMTP 設定
    pub smtp: SmtpConfig,
    /// 管理者通知の宛先（未設定の場合は管理者メールをスキップ）
    pub admin_address: Option<String>,
}

/// SMTP 接続の設定
///
/// `SMTP_USERNAME` / `SMTP_PASSWORD` の両方が揃っていない場合、
/// 送信はフェイルクローズする（プロセスは起動したまま、送信ごとに失敗を返す）。
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP ホスト
    pub server:     String,
    /// SMTP ポート（587 = STARTTLS）
    pub port:       u16,
    /// SMTP ユーザー名
    pub username:   Option<String>,
    /// SMTP パスワード
    pub password:   Option<String>,
    /// 送信元メールアドレス（デフォルト: ユーザー名）
    pub from_email: String,
    /// 送信元表示名
    pub from_name:  String,
}

impl NotifyConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            host: env::var("NOTIFY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("NOTIFY_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("NOTIFY_PORT は有効なポート番号である必要があります"),
            backend: env::var("NOTIFICATION_BACKEND").unwrap_or_else(|_| "smtp".to_string()),
            smtp: SmtpConfig::from_env(),
            admin_address: env::var("EMAIL_SUBMISSIONS").ok().filter(|s| !s.is_empty()),
        }
    }
}

impl SmtpConfig {
    /// 環境変数から SMTP 設定を読み込む
    fn from_env() -> Self {
        let username = env::var("SMTP_USERNAME").ok().filter(|s| !s.is_empty());
        let from_email = env::var("SMTP_FROM_EMAIL")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| username.clone())
            .unwrap_or_default();

        Self {
            server: env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
            username,
            password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            from_email,
            from_name: env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| "Workshop Registration".to_string()),
        }
    }

    /// ユーザー名・パスワードが両方設定されているか
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}
