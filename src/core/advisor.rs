use crate::core::extract::extract_as;
use crate::core::links::{self, parse_external_links};
use crate::core::prompts;
use crate::core::schemes::SchemeCatalog;
use crate::core::TextGenerator;
use crate::domain::model::{
    AdviceMetadata, AdviceResponse, BusinessProfile, ContextualAdvice, ExternalLink,
    FinancialProfile, FinancialQuery, LoanProfile, SchemeDetails, SchemeDetailsQuery,
    SchemeQuery, SchemeRecommendation,
};
use crate::utils::error::Result;

/// Turns validated requests into prompts, calls the model, and reshapes the reply.
pub struct Advisor<G: TextGenerator> {
    generator: G,
    catalog: SchemeCatalog,
}

impl<G: TextGenerator> Advisor<G> {
    pub fn new(generator: G) -> Self {
        Self::with_catalog(generator, SchemeCatalog::builtin())
    }

    pub fn with_catalog(generator: G, catalog: SchemeCatalog) -> Self {
        Self { generator, catalog }
    }

    pub async fn financial_advice(&self, profile: &FinancialProfile) -> Result<AdviceResponse> {
        tracing::info!("Generating financial advice");
        tracing::debug!(location = %profile.location, "Financial profile");
        self.advice_with_links(
            "Financial Advice",
            prompts::financial_prompt(profile),
            links::FINANCIAL_TOPICS,
        )
        .await
    }

    pub async fn business_advice(&self, profile: &BusinessProfile) -> Result<AdviceResponse> {
        tracing::info!("Generating business advice");
        tracing::debug!(idea = %profile.business_idea, "Business profile");
        self.advice_with_links(
            "Business Advice",
            prompts::business_prompt(profile),
            links::BUSINESS_TOPICS,
        )
        .await
    }

    pub async fn loan_advice(&self, profile: &LoanProfile) -> Result<AdviceResponse> {
        tracing::info!("Generating loan advice");
        tracing::debug!(amount = %profile.loan_amount, term = %profile.loan_term, "Loan profile");
        self.advice_with_links(
            "Loan Advice",
            prompts::loan_prompt(profile),
            links::LOAN_TOPICS,
        )
        .await
    }

    pub async fn recommend_scheme(&self, query: &SchemeQuery) -> Result<SchemeRecommendation> {
        tracing::info!("Recommending scheme");
        tracing::debug!(state = %query.state, occupation = %query.occupation, "Scheme query");
        let reply = self.generator.generate(&prompts::scheme_prompt(query)).await?;
        tracing::debug!("Scheme reply: {} chars", reply.len());
        extract_as(&reply)
    }

    pub async fn scheme_details(&self, query: &SchemeDetailsQuery) -> Result<SchemeDetails> {
        tracing::info!(scheme = %query.scheme_name, "Fetching scheme details");
        let reply = self
            .generator
            .generate(&prompts::scheme_details_prompt(&query.scheme_name))
            .await?;
        tracing::debug!("Scheme details reply: {} chars", reply.len());
        extract_as(&reply)
    }

    pub async fn contextual_advice(&self, query: &FinancialQuery) -> Result<ContextualAdvice> {
        tracing::info!(query_type = query.query_type.as_str(), "Generating contextual advice");
        let prompt = prompts::contextual_prompt(query, &self.catalog);
        let advice = self.generator.generate(&prompt).await?;

        Ok(ContextualAdvice {
            status: "success".to_string(),
            query_type: query.query_type,
            advice,
            metadata: AdviceMetadata {
                language: query.language.clone(),
                location: query.location.clone(),
                context_provided: query.context_provided(),
            },
        })
    }

    pub async fn external_links(&self, topic: &str) -> Result<Vec<ExternalLink>> {
        let reply = self
            .generator
            .generate(&prompts::external_links_prompt(topic))
            .await?;
        Ok(parse_external_links(&reply))
    }

    async fn advice_with_links(
        &self,
        title: &str,
        prompt: String,
        topic: &str,
    ) -> Result<AdviceResponse> {
        // 建議內容與延伸連結互不相依，同時送出
        let (information, external_links) =
            tokio::try_join!(self.generator.generate(&prompt), self.external_links(topic))?;

        tracing::debug!(
            "{}: {} chars, {} links",
            title,
            information.len(),
            external_links.len()
        );

        Ok(AdviceResponse {
            title: title.to_string(),
            information,
            external_links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{IncomeSource, QueryType};
    use crate::utils::error::AdvisorError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers link prompts with a fixed list and everything else with `reply`.
    struct ScriptedGenerator {
        reply: String,
        links: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(reply: &str, links: &str) -> Self {
            Self {
                reply: reply.to_string(),
                links: links.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if prompt.starts_with("Provide external resources") {
                Ok(self.links.clone())
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(AdvisorError::UpstreamError {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            })
        }
    }

    fn loan_profile() -> LoanProfile {
        LoanProfile {
            loan_amount: 50000.0_f64.into(),
            interest_rate: 12.0_f64.into(),
            loan_term: 3_u32.into(),
            risk_management: "Low".to_string(),
            current_debts: 0.0_f64.into(),
        }
    }

    #[tokio::test]
    async fn test_loan_advice_combines_text_and_links() {
        let generator = ScriptedGenerator::new(
            "Prefer a KCC loan at 7%.",
            "MUDRA loan guide\n\nComparing gold loans",
        );
        let advisor = Advisor::new(generator);

        let response = advisor.loan_advice(&loan_profile()).await.unwrap();
        assert_eq!(response.title, "Loan Advice");
        assert_eq!(response.information, "Prefer a KCC loan at 7%.");
        assert_eq!(response.external_links.len(), 2);
        assert_eq!(response.external_links[0].title, "MUDRA loan guide");

        let prompts = advisor.generator.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts
            .iter()
            .any(|p| p.ends_with("loan types, loan comparison, financial planning")));
    }

    #[tokio::test]
    async fn test_advice_fails_when_model_fails() {
        let advisor = Advisor::new(FailingGenerator);
        let err = advisor.loan_advice(&loan_profile()).await.unwrap_err();
        assert!(matches!(err, AdvisorError::UpstreamError { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_recommend_scheme_extracts_json() {
        let generator = ScriptedGenerator::new(
            "Sure! {\"scheme_name\": \"PM-KISAN\", \"description\": \"₹6000 per year for farmers\"}",
            "",
        );
        let advisor = Advisor::new(generator);
        let query = SchemeQuery {
            age: 40_u32.into(),
            income: 90000.0_f64.into(),
            state: "Punjab".to_string(),
            occupation: "Farmer".to_string(),
            category: "General".to_string(),
        };

        let recommendation = advisor.recommend_scheme(&query).await.unwrap();
        assert_eq!(recommendation.scheme_name, "PM-KISAN");
    }

    #[tokio::test]
    async fn test_scheme_details_reports_unparseable_reply() {
        let advisor = Advisor::new(ScriptedGenerator::new("I am not sure about that scheme.", ""));
        let err = advisor
            .scheme_details(&SchemeDetailsQuery {
                scheme_name: "Unknown".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::ExtractionError { .. }));
    }

    #[tokio::test]
    async fn test_contextual_advice_metadata() {
        let advisor = Advisor::new(ScriptedGenerator::new("Join a self-help group.", ""));
        let query = FinancialQuery {
            query_type: QueryType::Savings,
            question: "How do I save?".to_string(),
            language: "Marathi".to_string(),
            monthly_income: None,
            income_sources: Some(vec![IncomeSource::Handicrafts]),
            location: Some("Kolhapur".to_string()),
            age: None,
            family_size: None,
            has_bank_account: Some(true),
            education_level: None,
            existing_loans: None,
        };

        let advice = advisor.contextual_advice(&query).await.unwrap();
        assert_eq!(advice.status, "success");
        assert_eq!(advice.query_type, QueryType::Savings);
        assert_eq!(advice.advice, "Join a self-help group.");
        assert_eq!(advice.metadata.language, "Marathi");
        assert_eq!(advice.metadata.location.as_deref(), Some("Kolhapur"));
        assert!(advice.metadata.context_provided);
    }
}
