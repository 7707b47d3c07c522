//! # Notify Service サーバー
//!
//! フォーム送信レコードを受け取り、トランザクショナルメールを送信する
//! ステートレスなサービス。
//!
//! ## 役割
//!
//! - **確認メール**: 申込者に登録受付の確認を送信（送信内容は含めない）
//! - **管理者メール**: `EMAIL_SUBMISSIONS` 設定時のみ、送信内容の詳細を送信
//!
//! リクエスト間で共有する可変状態はなく、プロセス全体の状態は起動時に
//! 1 回読み込む設定のみ。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFY_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `NOTIFY_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `NOTIFICATION_BACKEND` | No | `smtp`（デフォルト）または `noop` |
//! | `SMTP_SERVER` | No | SMTP ホスト（デフォルト: `smtp.gmail.com`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `587`） |
//! | `SMTP_USERNAME` | Yes* | SMTP ユーザー名（未設定時は送信が常に失敗する） |
//! | `SMTP_PASSWORD` | Yes* | SMTP パスワード（同上） |
//! | `SMTP_FROM_EMAIL` | No | 送信元アドレス（デフォルト: ユーザー名） |
//! | `SMTP_FROM_NAME` | No | 送信元表示名（デフォルト: `Workshop Registration`） |
//! | `EMAIL_SUBMISSIONS` | No | 管理者通知の宛先（未設定時はスキップ） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（メール送信なし）
//! NOTIFICATION_BACKEND=noop cargo run -p formflow-notify-service
//!
//! # 本番環境
//! SMTP_USERNAME=... SMTP_PASSWORD=... cargo run -p formflow-notify-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use formflow_infra::notification::{
    NoopNotificationSender,
    NotificationSender,
    SmtpCredentials,
    SmtpNotificationSender,
    UnconfiguredNotificationSender,
};
use formflow_notify_service::{
    app_builder::build_app,
    config::NotifyConfig,
    handler::SubmitState,
    usecase::{NotificationService, TemplateRenderer},
};
use formflow_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;

/// Notify Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(LogFormat::from_env());

    // 設定読み込み
    let config = NotifyConfig::from_env();

    tracing::info!(
        "Notify Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // 依存コンポーネントを初期化
    let sender = build_sender(&config);
    let renderer = TemplateRenderer::new().expect("メールテンプレートの登録に失敗しました");
    let service = NotificationService::new(sender, renderer, config.admin_address.clone());
    let state = Arc::new(SubmitState { service });

    // ルーター構築
    let app = build_app(state);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Notify Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// 設定に応じた通知送信バックエンドを構築する
///
/// SMTP バックエンドでクレデンシャルが未設定の場合は、プロセスを
/// 起動させたまま送信ごとに失敗を返すフェイルクローズ実装を使用する。
fn build_sender(config: &NotifyConfig) -> Arc<dyn NotificationSender> {
    if config.backend == "noop" {
        tracing::info!("通知バックエンド: noop（メール送信なし）");
        return Arc::new(NoopNotificationSender);
    }

    let smtp = &config.smtp;
    match (&smtp.username, &smtp.password) {
        (Some(username), Some(password)) => {
            let sender = SmtpNotificationSender::new(
                &smtp.server,
                smtp.port,
                SmtpCredentials {
                    username: username.clone(),
                    password: password.clone(),
                },
                &smtp.from_email,
                &smtp.from_name,
            )
            .expect("SMTP トランスポートの構築に失敗しました");
            tracing::info!(server = %smtp.server, port = smtp.port, "通知バックエンド: smtp");
            Arc::new(sender)
        }
        _ => {
            tracing::error!(
                "SMTP クレデンシャルが未設定です。メール送信は常に失敗を返します"
            );
            Arc::new(UnconfiguredNotificationSender)
        }
    }
}
