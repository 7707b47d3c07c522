//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで 2 種類の通知メールを HTML 形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに
//!   埋め込まれる
//! - **メタキーの除外**: `access_key` と `subject` はレンダリング対象外
//! - **確認メールは内容を含めない**: 申込者への確認メールには送信された
//!   フィールド値を一切含めない（機微な入力値をエコーしないため）

use formflow_domain::notification::NotificationError;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tera::{Context, Tera};

use super::SubmissionBody;

/// レンダリングから除外するメタキー
const METADATA_KEYS: [&str; 2] = ["access_key", "subject"];

/// 管理者メールの 1 行
#[derive(Debug, Clone, Serialize)]
struct FieldRow {
    label: String,
    value: String,
}

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、送信レコードから
/// メール本文の HTML を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "submission_details.html",
                    include_str!("../../../templates/notifications/submission_details.html"),
                ),
                (
                    "confirmation.html",
                    include_str!("../../../templates/notifications/confirmation.html"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 申込者への確認メール本文を生成する
    ///
    /// 表示名だけでパーソナライズした静的な本文。送信されたフィールド値は
    /// 含めない。
    pub fn render_confirmation(&self, user_name: &str) -> Result<String, NotificationError> {
        let mut context = Context::new();
        context.insert("user_name", user_name);

        self.engine
            .render("confirmation.html", &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))
    }

    /// 管理者への送信詳細メール本文を生成する
    ///
    /// メタキー以外の全フィールドを 1 行ずつレンダリングする。
    /// ラベルは明示指定があればそれを、なければキーから導出する。
    /// 配列値は ", " で結合し、空配列のフィールドは行ごと省略する。
    pub fn render_submission_details(
        &self,
        data: &SubmissionBody,
    ) -> Result<String, NotificationError> {
        let rows: Vec<FieldRow> = data
            .iter()
            .filter(|(key, _)| !METADATA_KEYS.contains(&key.as_str()))
            .filter_map(|(key, field)| {
                let value = render_value(&field.value)?;
                let label = field
                    .label
                    .clone()
                    .unwrap_or_else(|| derive_label(key));
                Some(FieldRow { label, value })
            })
            .collect();

        let mut context = Context::new();
        context.insert("rows", &rows);

        self.engine
            .render("submission_details.html", &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))
    }
}

/// 生の JSON 値を表示文字列に変換する
///
/// 配列は ", " で結合する。空配列は `None`（フィールドごと省略）。
/// 欠落値（null）は空文字列としてレンダリングする。
fn render_value(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Array(items) => {
            if items.is_empty() {
                return None;
            }
            let joined: Vec<String> = items.iter().map(scalar_to_string).collect();
            Some(joined.join(", "))
        }
        other => Some(scalar_to_string(other)),
    }
}

fn scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// キーから表示ラベルを導出する
///
/// アンダースコアをスペースに置き換え、各単語の先頭を大文字にする
/// （例: `phone_number` → `Phone Number`）。
fn derive_label(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
