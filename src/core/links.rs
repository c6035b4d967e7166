use crate::domain::model::ExternalLink;
use url::Url;

pub const SEARCH_BASE: &str = "https://www.google.com/search";

pub const FINANCIAL_TOPICS: &str = "saving money, investments, financial goals";
pub const BUSINESS_TOPICS: &str = "starting a business, managing finances, business growth";
pub const LOAN_TOPICS: &str = "loan types, loan comparison, financial planning";

/// Search URL for a suggested resource title; spaces become `+`.
pub fn search_url(title: &str) -> String {
    match Url::parse_with_params(SEARCH_BASE, &[("q", title)]) {
        Ok(url) => url.to_string(),
        // SEARCH_BASE 是常數，理論上不會失敗
        Err(_) => format!("{}?q={}", SEARCH_BASE, title.replace(' ', "+")),
    }
}

/// One link stub per non-empty line of the model's reply.
pub fn parse_external_links(text: &str) -> Vec<ExternalLink> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| ExternalLink {
            title: line.to_string(),
            url: search_url(line),
        })
        .collect()
}
