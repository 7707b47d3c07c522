//! # 通知ユースケース
//!
//! フォーム送信に伴う 2 通のメールの生成・送信を統合する。
//!
//! ## 設計方針
//!
//! - **逐次送信**: 確認メール → 管理者メールの順に 1 通ずつ送信する
//!   （並行送信しない。総レイテンシは両者の和）
//! - **bool への還元**: レンダリング・送信の失敗はログに記録して
//!   成否の bool に変換する。エラーは伝播しない（report, don't retry）
//! - **空成功**: 管理者宛先が未設定の場合、管理者メールは送信せず
//!   成功として扱う
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成

pub mod template_renderer;

use std::{collections::BTreeMap, sync::Arc};

use formflow_domain::notification::EmailMessage;
use formflow_infra::notification::NotificationSender;
use serde::Deserialize;
use serde_json::Value as JsonValue;
pub use template_renderer::TemplateRenderer;

/// 送信レコード内の 1 フィールド
///
/// リクエストボディはフィールドキー → この形のマッピング。
/// `value` は生の JSON 値（文字列・配列など）をそのまま保持する。
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedField {
    /// 表示ラベル（省略時はキーから導出する）
    #[serde(default)]
    pub label: Option<String>,
    /// 生の値
    #[serde(default)]
    pub value: JsonValue,
}

/// リクエストボディ全体
///
/// BTreeMap によりレンダリング順序はキー順で決定的になる。
pub type SubmissionBody = BTreeMap<String, SubmittedField>;

/// 2 通の送信結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// 申込者への確認メールが送信できたか
    pub confirmation_sent: bool,
    /// 管理者への詳細メールが送信できたか（宛先未設定時は空成功で true）
    pub admin_sent: bool,
}

/// 通知サービス
///
/// フォーム送信 1 件に対するメール通知の全体フローを統合する。
pub struct NotificationService {
    sender: Arc<dyn NotificationSender>,
    renderer: TemplateRenderer,
    admin_address: Option<String>,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        renderer: TemplateRenderer,
        admin_address: Option<String>,
    ) -> Self {
        Self {
            sender,
            renderer,
            admin_address,
        }
    }

    /// 確認メールと（設定時のみ）管理者メールを逐次送信する
    ///
    /// # 引数
    ///
    /// - `data`: 送信レコード
    /// - `recipient`: 申込者のメールアドレス
    /// - `user_name`: パーソナライズ用の表示名
    pub async fn dispatch(
        &self,
        data: &SubmissionBody,
        recipient: &str,
        user_name: &str,
    ) -> DispatchOutcome {
        // 確認メール（送信内容は含めない）
        let confirmation_sent = match self.renderer.render_confirmation(user_name) {
            Ok(html_body) => {
                self.send(
                    recipient,
                    format!("Workshop Registration Confirmation - {user_name}"),
                    html_body,
                )
                .await
            }
            Err(e) => {
                tracing::error!(error = %e, "確認メールのレンダリングに失敗");
                false
            }
        };

        // 管理者メール（宛先が設定されている場合のみ）
        let admin_sent = match &self.admin_address {
            None => true,
            Some(address) => match self.renderer.render_submission_details(data) {
                Ok(html_body) => {
                    self.send(
                        address,
                        format!("New Workshop Registration - {user_name}"),
                        html_body,
                    )
                    .await
                }
                Err(e) => {
                    tracing::error!(error = %e, "管理者メールのレンダリングに失敗");
                    false
                }
            },
        };

        DispatchOutcome {
            confirmation_sent,
            admin_sent,
        }
    }

    /// 1 通送信して成否を bool に還元する
    async fn send(&self, to: &str, subject: String, html_body: String) -> bool {
        let email = EmailMessage {
            to: to.to_string(),
            subject,
            html_body,
        };

        match self.sender.send_email(&email).await {
            Ok(()) => {
                tracing::info!(to = %email.to, subject = %email.subject, "メール送信成功");
                true
            }
            Err(e) => {
                tracing::error!(to = %email.to, error = %e, "メール送信失敗");
                false
            }
        }
    }
}
