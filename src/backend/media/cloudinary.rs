use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{MediaError, MediaStore};
use crate::backend::server::config::CloudinaryConfig;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Signed uploads against the Cloudinary image API
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig, timeout: Duration) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.config.cloud_name)
    }

    /// Sign request parameters: sorted `key=value` pairs joined with `&`,
    /// followed by the API secret, hashed with SHA-256.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        sign_params(params, &self.config.api_secret)
    }

    async fn post_signed(
        &self,
        action: &str,
        signed: &[(&str, &str)],
        extra: &[(&str, &str)],
    ) -> Result<reqwest::Response, MediaError> {
        let signature = self.sign(signed);
        let mut form: Vec<(&str, &str)> = signed.to_vec();
        form.extend_from_slice(extra);
        form.push(("api_key", self.config.api_key.as_str()));
        form.push(("signature", signature.as_str()));
        form.push(("signature_algorithm", "sha256"));

        let response = self.client.post(self.endpoint(action)).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

pub(crate) fn sign_params(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, payload: &str) -> Result<String, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let response = self
            .post_signed("upload", &[("timestamp", timestamp.as_str())], &[("file", payload)])
            .await?;

        let body: UploadResponse = response.json().await?;
        tracing::debug!(url = %body.secure_url, "Uploaded image");
        Ok(body.secure_url)
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let response = self
            .post_signed(
                "destroy",
                &[("public_id", public_id), ("timestamp", timestamp.as_str())],
                &[],
            )
            .await?;

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(MediaError::Destroy(other.to_string())),
        }
    }
}
