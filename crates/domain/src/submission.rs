//! # 送信レコードとリレー API ポート
//!
//! 最終送信時に構築されるフラットなレコードと、フォームリレー API への
//! 送信を抽象化するポートトレイトを定義する。
//!
//! ## 設計方針
//!
//! - **生値のパススルー**: フィールド値は文字列 / 文字列配列のまま
//!   レコードに入る（型変換しない）
//! - **ポートはドメイン側で宣言**: 送信の具体的な方法（HTTP クライアント）は
//!   インフラ層が実装する

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::field::FieldDefinition;

/// 送信メタデータ
///
/// レコードに必ず含まれる 2 つの固定エントリ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionMeta {
    /// リレー API のアクセスクレデンシャル
    pub access_key: String,
    /// 固定の件名行
    pub subject:    String,
}

impl SubmissionMeta {
    /// デフォルトの件名でメタデータを作成する
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            subject:    "New submission from multistep form".to_string(),
        }
    }
}

/// 送信レコード
///
/// `access_key`・`subject` の 2 メタエントリと、全フィールドキー → 生値の
/// フラットな JSON オブジェクト。最終送信時に 1 回だけ構築され、
/// そのままリレー API に送られる。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord(JsonValue);

impl SubmissionRecord {
    /// メタデータとフィールド列からレコードを構築する
    pub fn build(meta: &SubmissionMeta, fields: &[FieldDefinition]) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(
            "access_key".to_string(),
            JsonValue::String(meta.access_key.clone()),
        );
        map.insert(
            "subject".to_string(),
            JsonValue::String(meta.subject.clone()),
        );
        for field in fields {
            map.insert(field.key.clone(), JsonValue::from(&field.value));
        }

        Self(JsonValue::Object(map))
    }

    /// レコードの JSON 表現への参照
    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }
}

/// リレー API のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct RelayResponse {
    /// 受理されたかどうか
    pub success: bool,
    /// 付随メッセージ（省略可）
    #[serde(default)]
    pub message: Option<String>,
}

/// リレー送信エラー
#[derive(Debug, Error)]
pub enum RelayError {
    /// 接続・送信に失敗
    #[error("リレー API への送信に失敗: {0}")]
    Transport(String),

    /// レスポンスのデコードに失敗
    #[error("リレー API のレスポンスが不正: {0}")]
    InvalidResponse(String),
}

/// フォームリレー API ポート
///
/// フォームコントローラが送信時に使用する。インフラ層の HTTP クライアントが
/// 実装する。
#[async_trait]
pub trait RelayGateway: Send + Sync {
    /// レコードをリレー API に送信する
    async fn submit(&self, record: &SubmissionRecord) -> Result<RelayResponse, RelayError>;
}
