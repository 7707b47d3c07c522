//! # フォームリレー API クライアント
//!
//! 完成した送信レコードを受け付けるサードパーティのフォームリレー API
//! （web3forms 互換）への HTTP クライアント。
//!
//! ドメイン層の [`RelayGateway`] ポートを実装する。

use async_trait::async_trait;
use formflow_domain::submission::{RelayError, RelayGateway, RelayResponse, SubmissionRecord};

/// デフォルトのリレー API エンドポイント
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// リレー API の設定
///
/// 環境変数から読み込む:
/// - `RELAY_ENDPOINT`: 送信先 URL（デフォルト: web3forms）
/// - `RELAY_ACCESS_KEY`: アクセスクレデンシャル
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// 送信先 URL
    pub endpoint:   String,
    /// アクセスクレデンシャル（送信レコードの `access_key` エントリになる）
    pub access_key: String,
}

impl RelayConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            endpoint:   std::env::var("RELAY_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_RELAY_ENDPOINT.to_string()),
            access_key: std::env::var("RELAY_ACCESS_KEY").unwrap_or_default(),
        }
    }
}

/// リレー API クライアント実装
#[derive(Clone)]
pub struct HttpRelayClient {
    endpoint: String,
    client:   reqwest::Client,
}

impl HttpRelayClient {
    /// 新しいクライアントを作成する
    ///
    /// # 引数
    ///
    /// - `endpoint`: リレー API の URL（例: `https://api.web3forms.com/submit`）
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client:   reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RelayGateway for HttpRelayClient {
    /// レコードを JSON として POST し、`{ "success": bool }` 応答をパースする
    ///
    /// 非 2xx でも JSON ボディがあればそのままパースする（`success: false`
    /// として失敗側に倒れる）。接続失敗・デコード失敗は [`RelayError`]。
    async fn submit(&self, record: &SubmissionRecord) -> Result<RelayResponse, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(record.as_json())
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        response
            .json::<RelayResponse>()
            .await
            .map_err(|e| RelayError::InvalidResponse(e.to_string()))
    }
}
