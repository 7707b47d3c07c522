//! # フィールド定義
//!
//! フォームを構成する 1 入力単位（フィールド）のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **プレーンデータ**: フィールド定義は Serialize/Deserialize 可能な
//!   純粋データ。バリデーションは [`ValidationRule`] のタグ付き列挙で宣言し、
//!   解釈は [`crate::validation`] エンジンに委譲する
//! - **値の二形態**: 自由入力・単一選択は文字列、複数選択は文字列配列。
//!   `#[serde(untagged)]` によりワイヤ上は生の値としてそのまま通過する

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// フィールド値
///
/// リレー API へは untagged でシリアライズされ、文字列または
/// 文字列配列としてそのまま送信される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 自由入力・単一選択の値
    Text(String),
    /// 複数選択の値（選択順を保持）
    Selections(Vec<String>),
}

impl FieldValue {
    /// 空の値かどうか
    ///
    /// 空文字列と空配列の両方を「空」と判定する。必須チェックは
    /// この述語 1 つで全フィールド種別をカバーする。
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Selections(items) => items.is_empty(),
        }
    }

    /// 文字列値への参照（複数選択値の場合は None）
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Selections(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<&FieldValue> for serde_json::Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Selections(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
        }
    }
}

/// フィールド種別
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    /// 自由入力
    Text,
    /// 単一選択
    Select,
    /// 複数選択
    MultiSelect,
}

/// バリデーションルール（タグ付きデータ）
///
/// フィールド定義に埋め込まれる宣言的ルール。述語の実体は
/// [`crate::validation`] エンジンが持ち、ここではルール種別と
/// 失敗時メッセージのみを保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationRule {
    /// 必須入力（空文字列・空配列を拒否）
    Required {
        /// 失敗時に表示するメッセージ
        message: String,
    },
    /// メールアドレス形式（`local-part@domain`、大文字小文字を区別しない）
    ///
    /// 空値も形式不一致として拒否する。
    EmailFormat {
        /// 失敗時に表示するメッセージ
        message: String,
    },
}

impl ValidationRule {
    /// 必須ルールを作成する
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    /// メール形式ルールを作成する
    pub fn email_format(message: impl Into<String>) -> Self {
        Self::EmailFormat {
            message: message.into(),
        }
    }

    /// 失敗時メッセージへの参照
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message } | Self::EmailFormat { message } => message,
        }
    }
}

/// フィールド定義
///
/// フォームの 1 入力単位。キー・表示ラベル（バイリンガル可）・現在値・
/// 種別・選択肢・バリデーションルールを保持する。
///
/// 不変条件: `optional = false` のフィールドは、空値を拒否するルールを
/// 少なくとも 1 つ持つ（[`crate::form::validate_definition`] が検証する）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// 一意なフィールドキー（送信レコードのキーになる）
    pub key:      String,
    /// 表示ラベル
    pub label:    String,
    /// フィールド種別
    pub kind:     FieldKind,
    /// 現在の入力値
    pub value:    FieldValue,
    /// 選択肢（select 系のみ非空）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options:  Vec<String>,
    /// 任意入力かどうか（デフォルト false = 必須）
    #[serde(default)]
    pub optional: bool,
    /// バリデーションルール（宣言順に評価される）
    #[serde(default)]
    pub rules:    Vec<ValidationRule>,
}

impl FieldDefinition {
    /// 自由入力フィールドを作成する（空文字列で初期化）
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key:      key.into(),
            label:    label.into(),
            kind:     FieldKind::Text,
            value:    FieldValue::Text(String::new()),
            options:  Vec::new(),
            optional: false,
            rules:    Vec::new(),
        }
    }

    /// 単一選択フィールドを作成する
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FieldKind::Select,
            value: FieldValue::Text(String::new()),
            options,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// 複数選択フィールドを作成する（空配列で初期化）
    pub fn multi_select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FieldKind::MultiSelect,
            value: FieldValue::Selections(Vec::new()),
            options,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// バリデーションルールを設定する（ビルダー）
    pub fn with_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.rules = rules;
        self
    }

    /// 任意入力に設定する（ビルダー）
    pub fn into_optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_空文字列はis_emptyがtrue() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(!FieldValue::Text("x".to_string()).is_empty());
    }

    #[test]
    fn test_空配列はis_emptyがtrue() {
        assert!(FieldValue::Selections(Vec::new()).is_empty());
        assert!(!FieldValue::Selections(vec!["A".to_string()]).is_empty());
    }

    #[test]
    fn test_文字列値はuntaggedで文字列にシリアライズされる() {
        let value = FieldValue::Text("ada@example.com".to_string());
        let json = serde_json::to_value(&value).unwrap();

        assert_eq!(json, serde_json::json!("ada@example.com"));
    }

    #[test]
    fn test_複数選択値はuntaggedで配列にシリアライズされる() {
        let value = FieldValue::Selections(vec!["A".to_string(), "B".to_string()]);
        let json = serde_json::to_value(&value).unwrap();

        assert_eq!(json, serde_json::json!(["A", "B"]));
    }

    #[test]
    fn test_validation_ruleはタグ付きでシリアライズされる() {
        let rule = ValidationRule::required("Name is a required field");
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "kind": "required",
                "message": "Name is a required field"
            })
        );
    }

    #[test]
    fn test_textコンストラクタは必須の空フィールドを作る() {
        let field = FieldDefinition::text("name", "Name");

        assert_eq!(field.key, "name");
        assert_eq!(field.kind, FieldKind::Text);
        assert!(field.value.is_empty());
        assert!(!field.optional);
    }

    #[test]
    fn test_multi_selectコンストラクタは空配列で初期化する() {
        let field = FieldDefinition::multi_select(
            "workshops1",
            "Workshops",
            vec!["A".to_string(), "B".to_string()],
        );

        assert_eq!(field.value, FieldValue::Selections(Vec::new()));
        assert_eq!(field.options.len(), 2);
    }
}
