//! # ルーター構築
//!
//! Notify Service の axum ルーターを構築する。
//! main とインテグレーションテストの両方から使用される。

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handler::{SubmitState, health_check, method_not_allowed, submit};

/// ルーターを構築する
///
/// - `GET /health`: ヘルスチェック
/// - `POST /api/submit`: フォーム送信
/// - OPTIONS プリフライト: CORS レイヤーが応答する
/// - その他のメソッド: 405 フォールバック
pub fn build_app(state: Arc<SubmitState>) -> Router {
    // 任意オリジンからの POST / OPTIONS を許可する
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/submit", post(submit))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
