//! Thin client for the advisor API: posts form data and renders the reply as text.

use crate::domain::model::{AdviceResponse, ContextualAdvice, SchemeDetails, SchemeRecommendation};
use crate::utils::error::{AdvisorError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct AdvisorClient {
    base_url: String,
    http: Client,
}

impl AdvisorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `payload` to `endpoint` and returns the JSON reply.
    ///
    /// Non-2xx replies become [`AdvisorError::ClientError`] carrying the server's `error` text.
    pub async fn post<T: Serialize + ?Sized>(&self, endpoint: &str, payload: &T) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        tracing::debug!("POST {}", url);

        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(AdvisorError::ClientError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    pub async fn post_as<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.post(endpoint, payload).await?;
        Ok(serde_json::from_value(body)?)
    }
}

pub fn render_advice(advice: &AdviceResponse) -> String {
    let mut out = format!("**{}**\n\n{}\n", advice.title, advice.information.trim_end());
    out.push_str("\nHelpful Resources:\n");
    for link in &advice.external_links {
        out.push_str(&format!("[{}]({})\n", link.title, link.url));
    }
    out
}

pub fn render_scheme(scheme: &SchemeRecommendation) -> String {
    format!("**{}**\n\n{}\n", scheme.scheme_name, scheme.description)
}

pub fn render_scheme_details(details: &SchemeDetails) -> String {
    format!(
        "**{}**\n\n{}\n\nEligibility:\n{}\n\nBenefits:\n{}\n\nHow to apply:\n{}\n",
        details.scheme_name,
        details.description,
        details.eligibility,
        details.benefits,
        details.how_to_apply
    )
}

pub fn render_contextual(advice: &ContextualAdvice) -> String {
    format!(
        "**{}** ({})\n\n{}\n",
        advice.query_type.description(),
        advice.metadata.language,
        advice.advice.trim_end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ExternalLink;

    #[test]
    fn test_render_advice_lists_links_as_markdown() {
        let advice = AdviceResponse {
            title: "Business Advice".to_string(),
            information: "Start small with a dairy unit.\n".to_string(),
            external_links: vec![ExternalLink {
                title: "PMEGP portal".to_string(),
                url: "https://www.google.com/search?q=PMEGP+portal".to_string(),
            }],
        };

        let rendered = render_advice(&advice);
        assert_eq!(
            rendered,
            "**Business Advice**\n\nStart small with a dairy unit.\n\nHelpful Resources:\n[PMEGP portal](https://www.google.com/search?q=PMEGP+portal)\n"
        );
    }

    #[test]
    fn test_render_scheme_details() {
        let details = SchemeDetails {
            scheme_name: "PM-KISAN".to_string(),
            description: "Income support".to_string(),
            eligibility: "Landholding farmers".to_string(),
            benefits: "₹6000 per year".to_string(),
            how_to_apply: "Through the PM-KISAN portal or CSC".to_string(),
        };
        let rendered = render_scheme_details(&details);
        assert!(rendered.starts_with("**PM-KISAN**"));
        assert!(rendered.contains("Eligibility:\nLandholding farmers"));
        assert!(rendered.contains("How to apply:\nThrough the PM-KISAN portal or CSC"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = AdvisorClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
