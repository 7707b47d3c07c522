//! # Notify Service
//!
//! フォーム送信レコードを受け取り、2 通のトランザクショナルメール
//! （申込者への確認メールと、設定時のみ管理者への詳細メール）を
//! レンダリングして SMTP で送信するステートレスなサービス。
//!
//! ## 役割
//!
//! - **リクエスト受付**: `POST /api/submit` で送信レコードを受け取る
//! - **メールレンダリング**: tera テンプレートで HTML メールを生成する
//! - **メール送信**: 確認メール → 管理者メールの順に逐次送信する
//!
//! 送信結果はリクエストごとに 1 つのレスポンス
//! `{ "success": bool, "message": string }` に合成される。
//! 失敗時の自動リトライは行わない（report, don't retry 方針）。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーター構築（main とテストで共用）
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - ハンドラエラーと HTTP レスポンスへの変換
//! - [`handler`] - axum ハンドラ
//! - [`usecase`] - 通知サービス（レンダリング + 送信 + 結果合成）

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
