//! # バリデーションエンジン
//!
//! フィールド定義に宣言されたタグ付きルール（[`ValidationRule`]）を
//! 解釈する共有エンジン。
//!
//! ## 設計方針
//!
//! - **データと振る舞いの分離**: ルール自体はプレーンデータ、述語の実体は
//!   このモジュールに集約する
//! - **先勝ち**: 1 フィールドの複数ルールは宣言順に評価し、最初に失敗した
//!   ルールのメッセージを採用する

use std::sync::LazyLock;

use regex::Regex;

use crate::field::{FieldDefinition, FieldValue, ValidationRule};

/// メールアドレス形式の検証パターン
///
/// `local-part@domain` 形式。ドメインは FQDN またはブラケット付き IPv4 を
/// 許容し、大文字小文字を区別しない。
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("メール形式の正規表現が不正です")
});

/// 1 ルールを評価する
///
/// 失敗した場合はルールのメッセージを返す。
pub fn check_rule<'a>(rule: &'a ValidationRule, value: &FieldValue) -> Option<&'a str> {
    let passed = match rule {
        ValidationRule::Required { .. } => !value.is_empty(),
        ValidationRule::EmailFormat { .. } => {
            value.as_text().is_some_and(|s| EMAIL_RE.is_match(s))
        }
    };

    if passed { None } else { Some(rule.message()) }
}

/// 1 フィールドの全ルールを宣言順に評価する
///
/// 最初に失敗したルールのメッセージを返す。すべて通過した場合は `None`。
pub fn first_failure(field: &FieldDefinition) -> Option<String> {
    field
        .rules
        .iter()
        .find_map(|rule| check_rule(rule, &field.value).map(str::to_string))
}
