//! # FormFlow ドメイン層
//!
//! マルチステップ登録フォームのビジネスロジックの中核を担う
//! ドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **プレーンデータのフィールド定義**: バリデーションはタグ付きルール
//!   （[`field::ValidationRule`]）として宣言し、共有エンジン
//!   （[`validation`]）が解釈する。フィールド定義にクロージャは埋め込まない
//! - **明示的な状態構造体**: フォームの進行状態は
//!   [`form::controller::FormController`] が所有する 1 つの構造体に集約する。
//!   グローバルシングルトンは使用しない
//! - **ポートの宣言**: 外部送信先（フォームリレー API）は
//!   [`submission::RelayGateway`] トレイトとして宣言し、インフラ層が実装する
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain → shared
//! ```
//!
//! ドメイン層はインフラ層（SMTP、HTTP クライアント）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`field`] - フィールド定義・値・バリデーションルール
//! - [`validation`] - タグ付きルールを解釈する共有バリデーションエンジン
//! - [`form`] - フォーム定義・構造検証・進行ステートマシン
//! - [`submission`] - 送信レコードとリレー API ポート
//! - [`notification`] - メールメッセージと通知エラー
//! - [`registration`] - 本番のワークショップ登録フォームカタログ

pub mod error;
pub mod field;
pub mod form;
pub mod notification;
pub mod registration;
pub mod submission;
pub mod validation;

pub use error::DomainError;
