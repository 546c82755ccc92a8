//! HttpClient: GrievanceApi over the complaint service's REST API.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use grievance_core::{ComplaintUpdateRequest, GrievanceError};
use grievance_types::{
    ApprovalDecision, Comment, Complaint, ComplaintDocument, ComplaintFilter, NewComplaint,
    Officer,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{GrievanceApi, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<ComplaintDocument>,
}

impl HttpClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid API base url: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(GrievanceError::Internal(anyhow::anyhow!(
                "API base url cannot carry paths: {base_url}"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base/api/<segments...>`, each segment percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GrievanceError::Internal(anyhow::anyhow!("API base url cannot carry paths"))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request to complaint service failed");
            GrievanceError::remote(None, format!("could not reach the complaint service: {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = remote_message(status, &body);
        tracing::warn!(status = status.as_u16(), %message, "complaint service rejected request");
        Err(GrievanceError::remote(Some(status.as_u16()), message))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let status = response.status();
        response.json::<T>().await.map_err(|e| {
            GrievanceError::remote(
                Some(status.as_u16()),
                format!("unexpected response from the complaint service: {e}"),
            )
        })
    }
}

/// Best human-readable message from an error response body.
pub(crate) fn remote_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.trim().is_empty() {
                    return msg.trim().to_string();
                }
            }
        }
    }
    let text = body.trim();
    if !text.is_empty() && text.len() <= 200 {
        return text.to_string();
    }
    status
        .canonical_reason()
        .map(String::from)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[async_trait]
impl GrievanceApi for HttpClient {
    async fn fetch_complaint(&self, id: &str) -> Result<Complaint> {
        let url = self.endpoint(&["complaints", id])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>> {
        let mut url = self.endpoint(&["complaints"])?;
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn file_complaint(&self, complaint: NewComplaint) -> Result<Complaint> {
        let url = self.endpoint(&["complaints"])?;
        self.send_json(self.request(Method::POST, url).json(&complaint))
            .await
    }

    async fn submit_complaint_update(&self, request: ComplaintUpdateRequest) -> Result<Complaint> {
        let url = self.endpoint(&["complaints", &request.complaint_id])?;
        self.send_json(self.request(Method::PATCH, url).json(&request))
            .await
    }

    async fn list_approved_officers(&self, search: Option<&str>) -> Result<Vec<Officer>> {
        let mut url = self.endpoint(&["officers", "approved"])?;
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            url.query_pairs_mut().append_pair("search", term);
        }
        let officers: Vec<Officer> = self.send_json(self.request(Method::GET, url)).await?;
        // Assignment must never see an unapproved officer, whatever the server sent.
        Ok(officers.into_iter().filter(Officer::is_assignable).collect())
    }

    async fn list_pending_officers(&self) -> Result<Vec<Officer>> {
        let url = self.endpoint(&["officers", "pending"])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn approve_officer(&self, officer_id: &str, approver_id: &str) -> Result<()> {
        let url = self.endpoint(&["officers", officer_id, "approve"])?;
        let body = ApprovalDecision {
            approver_id: approver_id.to_string(),
        };
        self.send(self.request(Method::POST, url).json(&body)).await?;
        Ok(())
    }

    async fn reject_officer(&self, officer_id: &str, approver_id: &str) -> Result<()> {
        let url = self.endpoint(&["officers", officer_id, "reject"])?;
        let body = ApprovalDecision {
            approver_id: approver_id.to_string(),
        };
        self.send(self.request(Method::POST, url).json(&body)).await?;
        Ok(())
    }

    async fn post_comment(
        &self,
        complaint_id: &str,
        text: &str,
        attachments: Vec<ComplaintDocument>,
    ) -> Result<Comment> {
        let url = self.endpoint(&["complaints", complaint_id, "comments"])?;
        let body = CommentBody { text, attachments };
        self.send_json(self.request(Method::POST, url).json(&body))
            .await
    }

    async fn edit_comment(&self, comment_id: &str, text: &str) -> Result<Comment> {
        let url = self.endpoint(&["comments", comment_id])?;
        let body = CommentBody {
            text,
            attachments: Vec::new(),
        };
        self.send_json(self.request(Method::PUT, url).json(&body))
            .await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let url = self.endpoint(&["comments", comment_id])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
