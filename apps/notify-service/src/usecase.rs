//! # ユースケース層
//!
//! Notify Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: 送信手段を `Arc<dyn NotificationSender>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - [`notification`]: メールレンダリング + 送信 + 結果合成

pub mod notification;

pub use notification::{
    DispatchOutcome,
    NotificationService,
    SubmissionBody,
    SubmittedField,
    TemplateRenderer,
};
