//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// フォーム定義やフィールド操作の実行中に発生する例外状態を表現する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// フォーム定義が構造的不変条件に違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - ステップに存在しないフィールドキーが含まれる
    /// - 必須フィールドにバリデーションルールがない
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 存在しないフィールドキーへの操作
    #[error("フィールドが見つかりません: {key}")]
    UnknownField {
        /// 操作に使用したフィールドキー
        key: String,
    },
}
