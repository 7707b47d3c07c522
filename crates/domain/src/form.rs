//! # フォーム定義
//!
//! マルチステップフォームの構造（フィールド列 + ステップ分割）と、
//! その構造的整合性の検証を提供する。
//!
//! ## 設計方針
//!
//! - **ステップはキーの分割**: ステップ列はフィールドキー全体を
//!   ちょうど 1 回ずつ分割する（どのフィールドも 0 回・複数回出現しない）
//! - **コード付きエラー収集**: 検証ルールを順に適用し、
//!   すべてのエラーを収集して返す

pub mod controller;

pub use controller::{EnterAction, FormController, FormPhase, FormState, SubmissionPhase};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::field::{FieldDefinition, FieldKind};

/// ステップ
///
/// 同時に表示されるフィールドキーの順序付き列。前進・後退ナビゲーションの
/// 単位になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// このステップで表示するフィールドキー
    pub field_keys: Vec<String>,
}

impl Step {
    /// 単一フィールドのステップを作成する
    pub fn single(key: impl Into<String>) -> Self {
        Self {
            field_keys: vec![key.into()],
        }
    }
}

/// フォーム定義
///
/// フィールド定義（宣言順）とステップ列。構造的整合性は
/// [`validate_definition`] で検証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// フィールド定義（宣言順 = 送信レコードの構築順）
    pub fields: Vec<FieldDefinition>,
    /// ステップ列（フィールドキー全体の分割）
    pub steps:  Vec<Step>,
}

impl FormDefinition {
    /// キーでフィールドを検索する
    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// キーでフィールドを可変参照として検索する
    pub fn field_mut(&mut self, key: &str) -> Option<&mut FieldDefinition> {
        self.fields.iter_mut().find(|f| f.key == key)
    }

    /// ステップ数
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

/// バリデーション結果
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid:  bool,
    pub errors: Vec<DefinitionError>,
}

/// フォーム定義の構造エラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionError {
    pub code:      String,
    pub message:   String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_key: Option<String>,
}

impl DefinitionError {
    fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code:      code.into(),
            message:   message.into(),
            field_key: None,
        }
    }

    fn with_field_key(
        code: impl Into<String>,
        message: impl Into<String>,
        field_key: impl Into<String>,
    ) -> Self {
        Self {
            code:      code.into(),
            message:   message.into(),
            field_key: Some(field_key.into()),
        }
    }
}

/// フォーム定義をバリデーションする
///
/// 6 つのルールを順に検証し、すべてのエラーを収集して返す。
pub fn validate_definition(definition: &FormDefinition) -> ValidationReport {
    let mut errors = Vec::new();

    validate_field_keys_unique(definition, &mut errors);
    validate_step_references(definition, &mut errors);
    validate_steps_partition(definition, &mut errors);
    validate_required_rules(definition, &mut errors);
    validate_select_options(definition, &mut errors);

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

// --- バリデーションルール ---

/// ルール 1: フィールドキーの重複チェック
fn validate_field_keys_unique(definition: &FormDefinition, errors: &mut Vec<DefinitionError>) {
    let mut seen = HashSet::new();
    for field in &definition.fields {
        if !seen.insert(field.key.as_str()) {
            errors.push(DefinitionError::with_field_key(
                "duplicate_field_key",
                format!("フィールドキー '{}' が重複しています", field.key),
                field.key.as_str(),
            ));
        }
    }
}

/// ルール 2, 3: ステップが有効なフィールドキーをちょうど 1 回ずつ参照しているか
fn validate_step_references(definition: &FormDefinition, errors: &mut Vec<DefinitionError>) {
    let field_keys: HashSet<&str> = definition.fields.iter().map(|f| f.key.as_str()).collect();

    let mut assigned = HashSet::new();
    for step in &definition.steps {
        for key in &step.field_keys {
            if !field_keys.contains(key.as_str()) {
                errors.push(DefinitionError::with_field_key(
                    "unknown_step_field",
                    format!("ステップが存在しないフィールド '{}' を参照しています", key),
                    key.as_str(),
                ));
                continue;
            }
            if !assigned.insert(key.as_str()) {
                errors.push(DefinitionError::with_field_key(
                    "duplicate_step_field",
                    format!("フィールド '{}' が複数のステップに出現しています", key),
                    key.as_str(),
                ));
            }
        }
    }
}

/// ルール 4: どのステップにも割り当てられていないフィールドがないか
fn validate_steps_partition(definition: &FormDefinition, errors: &mut Vec<DefinitionError>) {
    let assigned: HashSet<&str> = definition
        .steps
        .iter()
        .flat_map(|s| s.field_keys.iter().map(String::as_str))
        .collect();

    for field in &definition.fields {
        if !assigned.contains(field.key.as_str()) {
            errors.push(DefinitionError::with_field_key(
                "unassigned_field",
                format!(
                    "フィールド '{}' がどのステップにも割り当てられていません",
                    field.key
                ),
                field.key.as_str(),
            ));
        }
    }
}

/// ルール 5: 必須フィールドが空値を拒否するルールを持つか
///
/// 既存のルール種別（Required / EmailFormat）はどちらも空値を拒否するため、
/// ルールが 1 つ以上あれば不変条件を満たす。
fn validate_required_rules(definition: &FormDefinition, errors: &mut Vec<DefinitionError>) {
    for field in &definition.fields {
        if !field.optional && field.rules.is_empty() {
            errors.push(DefinitionError::with_field_key(
                "missing_required_rule",
                format!(
                    "必須フィールド '{}' にバリデーションルールがありません",
                    field.key
                ),
                field.key.as_str(),
            ));
        }
    }
}

/// ルール 6: select 系フィールドに選択肢があるか
fn validate_select_options(definition: &FormDefinition, errors: &mut Vec<DefinitionError>) {
    for field in &definition.fields {
        let is_select = matches!(field.kind, FieldKind::Select | FieldKind::MultiSelect);
        if is_select && field.options.is_empty() {
            errors.push(DefinitionError::with_field_key(
                "missing_options",
                format!("フィールド '{}' (select) に options が必要です", field.key),
                field.key.as_str(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::field::ValidationRule;

    /// テスト用の有効な定義を生成するヘルパー
    fn valid_definition() -> FormDefinition {
        FormDefinition {
            fields: vec![
                FieldDefinition::text("email", "Email").with_rules(vec![
                    ValidationRule::required("Email is required"),
                    ValidationRule::email_format("Must be a valid email address"),
                ]),
                FieldDefinition::text("name", "Name")
                    .with_rules(vec![ValidationRule::required("Name is a required field")]),
            ],
            steps:  vec![Step::single("email"), Step::single("name")],
        }
    }

    fn has_error(report: &ValidationReport, code: &str) -> bool {
        report.errors.iter().any(|e| e.code == code)
    }

    #[test]
    fn test_有効な定義でバリデーション成功() {
        let report = validate_definition(&valid_definition());

        assert!(report.valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_フィールドキーが重複している場合エラー() {
        let mut definition = valid_definition();
        definition.fields.push(
            FieldDefinition::text("email", "Email 2")
                .with_rules(vec![ValidationRule::required("required")]),
        );
        definition.steps.push(Step::single("email"));

        let report = validate_definition(&definition);

        assert!(has_error(&report, "duplicate_field_key"));
    }

    #[test]
    fn test_ステップが存在しないフィールドを参照している場合エラー() {
        let mut definition = valid_definition();
        definition.steps.push(Step::single("phone"));

        let report = validate_definition(&definition);

        assert!(has_error(&report, "unknown_step_field"));
        let error = report
            .errors
            .iter()
            .find(|e| e.code == "unknown_step_field")
            .unwrap();
        assert_eq!(error.field_key.as_deref(), Some("phone"));
    }

    #[test]
    fn test_フィールドが複数ステップに出現している場合エラー() {
        let mut definition = valid_definition();
        definition.steps.push(Step::single("email"));

        let report = validate_definition(&definition);

        assert!(has_error(&report, "duplicate_step_field"));
    }

    #[test]
    fn test_どのステップにも割り当てられていないフィールドはエラー() {
        let mut definition = valid_definition();
        definition.fields.push(
            FieldDefinition::text("phone", "Phone")
                .with_rules(vec![ValidationRule::required("required")]),
        );

        let report = validate_definition(&definition);

        assert!(has_error(&report, "unassigned_field"));
    }

    #[test]
    fn test_必須フィールドにルールがない場合エラー() {
        let mut definition = valid_definition();
        definition.fields.push(FieldDefinition::text("phone", "Phone"));
        definition.steps.push(Step::single("phone"));

        let report = validate_definition(&definition);

        assert!(has_error(&report, "missing_required_rule"));
    }

    #[test]
    fn test_任意フィールドはルールなしでも正常() {
        let mut definition = valid_definition();
        definition.fields.push(
            FieldDefinition::multi_select("workshops1", "Workshops", vec!["A".to_string()])
                .into_optional(),
        );
        definition.steps.push(Step::single("workshops1"));

        let report = validate_definition(&definition);

        assert!(report.valid, "errors: {:?}", report.errors);
    }

    #[test]
    fn test_selectフィールドにoptionsがない場合エラー() {
        let mut definition = valid_definition();
        definition.fields.push(
            FieldDefinition::select("gender", "Gender", Vec::new())
                .with_rules(vec![ValidationRule::required("required")]),
        );
        definition.steps.push(Step::single("gender"));

        let report = validate_definition(&definition);

        assert!(has_error(&report, "missing_options"));
    }

    #[test]
    fn test_複数エラーが同時に返される() {
        let definition = FormDefinition {
            fields: vec![FieldDefinition::text("phone", "Phone")],
            steps:  vec![Step::single("email")],
        };

        let report = validate_definition(&definition);

        assert!(!report.valid);
        let codes: Vec<&str> = report.errors.iter().map(|e| e.code.as_str()).collect();
        assert!(codes.contains(&"unknown_step_field"));
        assert!(codes.contains(&"unassigned_field"));
        assert!(codes.contains(&"missing_required_rule"));
    }
}
