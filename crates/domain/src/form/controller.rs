//! # フォームコントローラ
//!
//! マルチステップフォームの進行・検証・送信を担うステートマシン。
//!
//! ## 設計方針
//!
//! - **状態は 1 構造体に集約**: [`FormState`] をコントローラが所有する。
//!   グローバルシングルトンは使用しない
//! - **検証は現在ステップのみ**: `validate_step` は `invalid_fields` を
//!   現在ステップの結果で丸ごと置き換える。後退ナビゲーションでは検証せず
//!   無条件にクリアする
//! - **送信は現在ステップのみ再検証**: 直接の状態操作で過去ステップが
//!   不正になっていても再チェックしない（既知のスコープ制限。UI 経由では
//!   到達不能なため、挙動をそのまま維持する）

use std::collections::HashMap;

use crate::{
    DomainError,
    field::FieldValue,
    form::{FormDefinition, validate_definition},
    submission::{RelayGateway, SubmissionMeta, SubmissionRecord},
    validation,
};

/// 送信の進行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// 未送信
    #[default]
    NotSubmitted,
    /// 送信中（リレー API の応答待ち）
    Submitting,
    /// 送信成功（終端）
    Succeeded,
    /// 送信失敗（submit の再実行で回復可能）
    Failed,
}

/// フォーム全体のフェーズ（導出ビュー）
///
/// [`FormState`] から導出される状態機械の語彙。
/// `NotStarted → InProgress(step) → Submitting → SubmittedSuccess | SubmittedError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// 開始前
    NotStarted,
    /// 入力中
    InProgress {
        /// 現在のステップインデックス（0 起点）
        step: usize,
    },
    /// 送信中
    Submitting,
    /// 送信成功
    SubmittedSuccess,
    /// 送信失敗
    SubmittedError,
}

/// Enter キーでディスパッチされた操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterAction {
    /// フォームを開始した
    Start,
    /// 次のステップへ進めようとした
    Next,
    /// 送信を実行しようとした
    Submit,
}

/// フォームのセッション状態
///
/// ページロードごとに新規作成され、ナビゲーションと検証の操作だけが
/// 変更する。リロードをまたいで永続化されない。
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// 現在のステップインデックス（`[0, step_count - 1]` に束縛）
    pub current_step:   usize,
    /// フォームが開始されたか
    pub started:        bool,
    /// 送信の進行状態
    pub submission:     SubmissionPhase,
    /// フィールドキー → 検証結果（`None` = 通過、`Some(msg)` = 最初に
    /// 失敗したルールのメッセージ）。現在ステップのみのスコープ
    pub invalid_fields: HashMap<String, Option<String>>,
}

/// フォームコントローラ
///
/// フォーム定義・送信メタデータ・セッション状態を所有する単一インスタンス。
pub struct FormController {
    definition: FormDefinition,
    meta:       SubmissionMeta,
    state:      FormState,
}

impl FormController {
    /// 新しいコントローラを作成する
    ///
    /// フォーム定義の構造検証に失敗した場合は
    /// [`DomainError::Validation`] を返す。
    pub fn new(definition: FormDefinition, meta: SubmissionMeta) -> Result<Self, DomainError> {
        let report = validate_definition(&definition);
        if !report.valid {
            let messages: Vec<&str> = report.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(DomainError::Validation(messages.join("; ")));
        }

        Ok(Self {
            definition,
            meta,
            state: FormState::default(),
        })
    }

    /// セッション状態への参照
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// フォーム定義への参照
    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    /// 導出フェーズビュー
    pub fn phase(&self) -> FormPhase {
        match self.state.submission {
            SubmissionPhase::Submitting => FormPhase::Submitting,
            SubmissionPhase::Succeeded => FormPhase::SubmittedSuccess,
            SubmissionPhase::Failed => FormPhase::SubmittedError,
            SubmissionPhase::NotSubmitted => {
                if self.state.started {
                    FormPhase::InProgress {
                        step: self.state.current_step,
                    }
                } else {
                    FormPhase::NotStarted
                }
            }
        }
    }

    /// 最初のステップにいるか
    pub fn is_first_step(&self) -> bool {
        self.state.current_step == 0
    }

    /// 最後のステップにいるか
    pub fn is_last_step(&self) -> bool {
        self.state.current_step == self.definition.step_count().saturating_sub(1)
    }

    /// フォームを開始する（`NotStarted → InProgress(0)`）
    pub fn start(&mut self) {
        self.state.started = true;
    }

    /// フィールドの現在値を設定する
    pub fn set_value(&mut self, key: &str, value: FieldValue) -> Result<(), DomainError> {
        let Some(field) = self.definition.field_mut(key) else {
            return Err(DomainError::UnknownField {
                key: key.to_string(),
            });
        };
        field.value = value;
        Ok(())
    }

    /// 指定ステップの全フィールドを検証する
    ///
    /// `invalid_fields` をこのステップの結果で丸ごと置き換える
    /// （他ステップの古い結果は破棄される）。
    pub fn validate_step(&mut self, step_index: usize) {
        let Some(step) = self.definition.steps.get(step_index) else {
            return;
        };

        let mut results = HashMap::new();
        for key in &step.field_keys {
            if let Some(field) = self.definition.field(key) {
                results.insert(key.clone(), validation::first_failure(field));
            }
        }
        self.state.invalid_fields = results;
    }

    /// 現在記録されている検証結果に失敗が含まれるか
    pub fn is_step_invalid(&self) -> bool {
        self.state.invalid_fields.values().any(Option::is_some)
    }

    /// 次のステップへ進む
    ///
    /// 最後のステップでは何もしない。現在ステップの検証に失敗した場合は
    /// エラーを表示したまま進まない。
    pub fn next(&mut self) {
        if self.is_last_step() {
            return;
        }
        self.validate_step(self.state.current_step);
        if self.is_step_invalid() {
            return;
        }
        self.state.current_step += 1;
    }

    /// 前のステップへ戻る
    ///
    /// 後退時は検証せず、記録済みの検証結果を無条件にクリアする。
    /// 最初のステップではステップは移動しない。
    pub fn previous(&mut self) {
        self.state.invalid_fields.clear();
        if self.is_first_step() {
            return;
        }
        self.state.current_step -= 1;
    }

    /// フォームを送信する
    ///
    /// どのフェーズからでも呼び出せる。現在ステップのみを再検証し、
    /// 失敗した場合は中断する。成功した場合は送信レコードを構築して
    /// リレー API に送信し、応答に応じて `Succeeded` / `Failed` に遷移する。
    /// `Failed` からは submit の再実行で回復できる。
    pub async fn submit(&mut self, relay: &dyn RelayGateway) {
        self.validate_step(self.state.current_step);
        if self.is_step_invalid() {
            return;
        }

        self.state.submission = SubmissionPhase::Submitting;
        let record = SubmissionRecord::build(&self.meta, &self.definition.fields);

        self.state.submission = match relay.submit(&record).await {
            Ok(response) if response.success => SubmissionPhase::Succeeded,
            Ok(_) | Err(_) => SubmissionPhase::Failed,
        };
    }

    /// Enter キーのグローバルディスパッチ
    ///
    /// - 未開始: フォームを開始する
    /// - 開始済みで最後のステップ以外、かつ現在エラーなし: 次へ進む
    /// - それ以外（最後のステップ等）: 送信する
    ///
    /// 戻り値はディスパッチされた操作の種別。
    pub async fn handle_enter(&mut self, relay: &dyn RelayGateway) -> EnterAction {
        if !self.state.started {
            self.start();
            EnterAction::Start
        } else if !self.is_last_step() && !self.is_step_invalid() {
            self.next();
            EnterAction::Next
        } else {
            self.submit(relay).await;
            EnterAction::Submit
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::Value as JsonValue;

    use super::*;
    use crate::{
        field::{FieldDefinition, ValidationRule},
        form::Step,
        submission::{RelayError, RelayResponse},
    };

    /// テスト用リレースタブ
    ///
    /// 送信されたレコードを記録し、設定された応答を返す。
    #[derive(Clone)]
    struct StubRelay {
        outcome:  StubOutcome,
        received: Arc<Mutex<Vec<JsonValue>>>,
    }

    #[derive(Clone, Copy)]
    enum StubOutcome {
        Accept,
        Decline,
        TransportError,
    }

    impl StubRelay {
        fn new(outcome: StubOutcome) -> Self {
            Self {
                outcome,
                received: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn received(&self) -> Vec<JsonValue> {
            self.received.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RelayGateway for StubRelay {
        async fn submit(
            &self,
            record: &SubmissionRecord,
        ) -> Result<RelayResponse, RelayError> {
            self.received.lock().unwrap().push(record.as_json().clone());
            match self.outcome {
                StubOutcome::Accept => Ok(RelayResponse {
                    success: true,
                    message: None,
                }),
                StubOutcome::Decline => Ok(RelayResponse {
                    success: false,
                    message: Some("invalid access key".to_string()),
                }),
                StubOutcome::TransportError => {
                    Err(RelayError::Transport("connection refused".to_string()))
                }
            }
        }
    }

    /// 2 ステップ（email / name）のテストフォームを作る
    fn make_controller() -> FormController {
        let definition = FormDefinition {
            fields: vec![
                FieldDefinition::text("email", "Email").with_rules(vec![
                    ValidationRule::required("Email is required"),
                    ValidationRule::email_format("Must be a valid email address"),
                ]),
                FieldDefinition::text("name", "Name")
                    .with_rules(vec![ValidationRule::required("Name is a required field")]),
            ],
            steps:  vec![Step::single("email"), Step::single("name")],
        };
        FormController::new(definition, SubmissionMeta::new("test-key")).unwrap()
    }

    #[test]
    fn test_不正な定義でnewが失敗する() {
        let definition = FormDefinition {
            fields: vec![FieldDefinition::text("email", "Email")],
            steps:  Vec::new(),
        };

        let result = FormController::new(definition, SubmissionMeta::new("key"));

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_開始前はnot_startedフェーズ() {
        let controller = make_controller();

        assert_eq!(controller.phase(), FormPhase::NotStarted);
    }

    #[test]
    fn test_startでin_progressの最初のステップに遷移する() {
        let mut controller = make_controller();

        controller.start();

        assert_eq!(controller.phase(), FormPhase::InProgress { step: 0 });
    }

    #[test]
    fn test_nextは検証失敗時にステップを進めない() {
        let mut controller = make_controller();
        controller.start();

        // email が空のまま進もうとする
        controller.next();

        assert_eq!(controller.phase(), FormPhase::InProgress { step: 0 });
        assert!(controller.is_step_invalid());
        assert_eq!(
            controller.state().invalid_fields.get("email"),
            Some(&Some("Email is required".to_string()))
        );
    }

    #[test]
    fn test_nextは検証通過時にステップを進める() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();

        controller.next();

        assert_eq!(controller.phase(), FormPhase::InProgress { step: 1 });
        assert!(!controller.is_step_invalid());
    }

    #[test]
    fn test_nextは最後のステップで何もしない() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();
        controller.next();

        // name が空でも最後のステップなので no-op（検証も走らない）
        controller.next();

        assert_eq!(controller.phase(), FormPhase::InProgress { step: 1 });
        assert!(!controller.is_step_invalid());
    }

    #[test]
    fn test_previousは検証せず記録済みエラーを無条件にクリアする() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();
        controller.next();
        controller.validate_step(1);
        assert!(controller.is_step_invalid());

        controller.previous();

        assert_eq!(controller.phase(), FormPhase::InProgress { step: 0 });
        assert!(controller.state().invalid_fields.is_empty());
    }

    #[test]
    fn test_previousは最初のステップでもエラーをクリアしステップは移動しない() {
        let mut controller = make_controller();
        controller.start();
        controller.validate_step(0);
        assert!(controller.is_step_invalid());

        controller.previous();

        assert_eq!(controller.phase(), FormPhase::InProgress { step: 0 });
        assert!(controller.state().invalid_fields.is_empty());
    }

    #[test]
    fn test_validate_stepは他ステップの結果を破棄する() {
        let mut controller = make_controller();
        controller.start();
        controller.validate_step(0);
        assert!(controller.state().invalid_fields.contains_key("email"));

        controller.validate_step(1);

        assert!(!controller.state().invalid_fields.contains_key("email"));
        assert!(controller.state().invalid_fields.contains_key("name"));
    }

    #[test]
    fn test_メール形式エラーは形式メッセージを記録する() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "not-an-email".into()).unwrap();

        controller.validate_step(0);

        assert_eq!(
            controller.state().invalid_fields.get("email"),
            Some(&Some("Must be a valid email address".to_string()))
        );
    }

    #[tokio::test]
    async fn test_submitは現在ステップの検証失敗で中断する() {
        let mut controller = make_controller();
        controller.start();
        let relay = StubRelay::new(StubOutcome::Accept);

        // email 未入力のまま送信
        controller.submit(&relay).await;

        assert_eq!(controller.phase(), FormPhase::InProgress { step: 0 });
        assert!(relay.received().is_empty());
    }

    #[tokio::test]
    async fn test_submit成功でsubmitted_successに遷移する() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();
        controller.next();
        controller.set_value("name", "Ada".into()).unwrap();
        let relay = StubRelay::new(StubOutcome::Accept);

        controller.submit(&relay).await;

        assert_eq!(controller.phase(), FormPhase::SubmittedSuccess);

        // レコードにはメタエントリと全フィールドの生値が入る
        let received = relay.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0]["access_key"], "test-key");
        assert_eq!(received[0]["subject"], "New submission from multistep form");
        assert_eq!(received[0]["email"], "ada@example.com");
        assert_eq!(received[0]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_relayの非成功応答でsubmitted_errorに遷移する() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();
        controller.next();
        controller.set_value("name", "Ada".into()).unwrap();
        let relay = StubRelay::new(StubOutcome::Decline);

        controller.submit(&relay).await;

        assert_eq!(controller.phase(), FormPhase::SubmittedError);
    }

    #[tokio::test]
    async fn test_transport失敗でsubmitted_errorに遷移する() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();
        controller.next();
        controller.set_value("name", "Ada".into()).unwrap();
        let relay = StubRelay::new(StubOutcome::TransportError);

        controller.submit(&relay).await;

        assert_eq!(controller.phase(), FormPhase::SubmittedError);
    }

    #[tokio::test]
    async fn test_submitted_errorからsubmitの再実行で回復できる() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();
        controller.next();
        controller.set_value("name", "Ada".into()).unwrap();

        let failing = StubRelay::new(StubOutcome::TransportError);
        controller.submit(&failing).await;
        assert_eq!(controller.phase(), FormPhase::SubmittedError);

        let accepting = StubRelay::new(StubOutcome::Accept);
        controller.submit(&accepting).await;
        assert_eq!(controller.phase(), FormPhase::SubmittedSuccess);
    }

    #[tokio::test]
    async fn test_enterは未開始時にフォームを開始する() {
        let mut controller = make_controller();
        let relay = StubRelay::new(StubOutcome::Accept);

        let action = controller.handle_enter(&relay).await;

        assert_eq!(action, EnterAction::Start);
        assert_eq!(controller.phase(), FormPhase::InProgress { step: 0 });
    }

    #[tokio::test]
    async fn test_enterは途中のステップで次へ進める() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();
        let relay = StubRelay::new(StubOutcome::Accept);

        let action = controller.handle_enter(&relay).await;

        assert_eq!(action, EnterAction::Next);
        assert_eq!(controller.phase(), FormPhase::InProgress { step: 1 });
    }

    #[tokio::test]
    async fn test_enterは最後のステップで送信する() {
        let mut controller = make_controller();
        controller.start();
        controller.set_value("email", "ada@example.com".into()).unwrap();
        controller.next();
        controller.set_value("name", "Ada".into()).unwrap();
        let relay = StubRelay::new(StubOutcome::Accept);

        let action = controller.handle_enter(&relay).await;

        assert_eq!(action, EnterAction::Submit);
        assert_eq!(controller.phase(), FormPhase::SubmittedSuccess);
    }
}
