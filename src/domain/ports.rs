use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A hosted model that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn api_key(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn api_base(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn schemes_file(&self) -> Option<&str>;

    fn server_addr(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }
}
