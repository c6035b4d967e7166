pub mod advisor;
pub mod extract;
pub mod links;
pub mod prompts;
pub mod schemes;

pub use crate::domain::model::{AdviceResponse, ExternalLink, RequiredFields};
pub use crate::domain::ports::{ConfigProvider, TextGenerator};
pub use crate::utils::error::Result;
