//! # FormFlow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはドメイン層で宣言されたポート（`RelayGateway`）の具体的な
//! 実装と、通知送信の抽象（[`notification::NotificationSender`]）を提供する。
//! 外部システムの詳細をカプセル化し、ドメイン層をインフラの変更から保護する。
//!
//! ## 責務
//!
//! - **リレー API クライアント**: フォーム送信先（web3forms 互換 API）への
//!   HTTP POST
//! - **メール送信**: SMTP（lettre）によるトランザクショナルメール送信
//!
//! ## 依存関係
//!
//! ```text
//! apps → infra → domain → shared
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信（SMTP / Noop / 未設定時フェイルクローズ）
//! - [`relay`] - フォームリレー API クライアント
//! - `mock` - テスト用モック（`test-utils` feature）

pub mod notification;
pub mod relay;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use relay::{HttpRelayClient, RelayConfig};
