use serde::{Deserialize, Serialize};
use std::fmt;

/// Request payloads list the keys that must be present before decoding.
pub trait RequiredFields {
    const REQUIRED: &'static [&'static str];
}

/// Numeric form input. Form clients send `38`, `5.0` or `"15,000"` for the
/// same field; the value only ever ends up in a prompt, so it is kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    write!(f, "{}", i)
                } else if let Some(u) = n.as_u64() {
                    write!(f, "{}", u)
                } else if let Some(x) = n.as_f64() {
                    // 5.0 -> 5, 9500.5 -> 9500.5
                    write!(f, "{}", x)
                } else {
                    write!(f, "{}", n)
                }
            }
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(FieldValue::Number)
            .unwrap_or_else(|| FieldValue::Text(value.to_string()))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub name: String,
    pub age: FieldValue,
    pub location: String,
    pub monthly_income: FieldValue,
    pub expenditure: FieldValue,
    pub financial_goals: String,
    pub investments: String,
    pub loans: String,
}

impl RequiredFields for FinancialProfile {
    const REQUIRED: &'static [&'static str] = &[
        "name",
        "age",
        "location",
        "monthly_income",
        "expenditure",
        "financial_goals",
        "investments",
        "loans",
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub business_idea: String,
    pub current_finances: FieldValue,
    pub monthly_revenue: FieldValue,
    pub expenses: FieldValue,
    pub financial_goals: String,
}

impl RequiredFields for BusinessProfile {
    const REQUIRED: &'static [&'static str] = &[
        "business_idea",
        "current_finances",
        "monthly_revenue",
        "expenses",
        "financial_goals",
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanProfile {
    pub loan_amount: FieldValue,
    /// Annual rate in percent.
    pub interest_rate: FieldValue,
    /// Term in years.
    pub loan_term: FieldValue,
    pub risk_management: String,
    pub current_debts: FieldValue,
}

impl RequiredFields for LoanProfile {
    const REQUIRED: &'static [&'static str] = &[
        "loan_amount",
        "interest_rate",
        "loan_term",
        "risk_management",
        "current_debts",
    ];
}

fn default_category() -> String {
    "General".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeQuery {
    pub age: FieldValue,
    /// Annual income in rupees.
    pub income: FieldValue,
    pub state: String,
    pub occupation: String,
    #[serde(default = "default_category")]
    pub category: String,
}

impl RequiredFields for SchemeQuery {
    const REQUIRED: &'static [&'static str] = &["age", "income", "state", "occupation"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeDetailsQuery {
    pub scheme_name: String,
}

impl RequiredFields for SchemeDetailsQuery {
    const REQUIRED: &'static [&'static str] = &["scheme_name"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    Agriculture,
    DailyWage,
    SmallBusiness,
    Livestock,
    Handicrafts,
    Other,
}

impl IncomeSource {
    pub const ALL: [IncomeSource; 6] = [
        IncomeSource::Agriculture,
        IncomeSource::DailyWage,
        IncomeSource::SmallBusiness,
        IncomeSource::Livestock,
        IncomeSource::Handicrafts,
        IncomeSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeSource::Agriculture => "agriculture",
            IncomeSource::DailyWage => "daily_wage",
            IncomeSource::SmallBusiness => "small_business",
            IncomeSource::Livestock => "livestock",
            IncomeSource::Handicrafts => "handicrafts",
            IncomeSource::Other => "other",
        }
    }

    pub fn description(&self) -> String {
        title_case(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    BusinessAdvice,
    Savings,
    Loan,
    GovernmentSchemes,
    Investment,
    Insurance,
    General,
}

impl QueryType {
    pub const ALL: [QueryType; 7] = [
        QueryType::BusinessAdvice,
        QueryType::Savings,
        QueryType::Loan,
        QueryType::GovernmentSchemes,
        QueryType::Investment,
        QueryType::Insurance,
        QueryType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::BusinessAdvice => "business_advice",
            QueryType::Savings => "savings",
            QueryType::Loan => "loan",
            QueryType::GovernmentSchemes => "government_schemes",
            QueryType::Investment => "investment",
            QueryType::Insurance => "insurance",
            QueryType::General => "general",
        }
    }

    pub fn description(&self) -> String {
        title_case(self.as_str())
    }
}

/// `daily_wage` -> `Daily Wage`
fn title_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn default_language() -> String {
    "English".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialQuery {
    pub query_type: QueryType,
    pub question: String,
    #[serde(default = "default_language")]
    pub language: String,

    // 以下為選填的背景資訊
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub income_sources: Option<Vec<IncomeSource>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub family_size: Option<u32>,
    #[serde(default)]
    pub has_bank_account: Option<bool>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub existing_loans: Option<f64>,
}

impl RequiredFields for FinancialQuery {
    const REQUIRED: &'static [&'static str] = &["query_type", "question"];
}

impl FinancialQuery {
    pub fn context_provided(&self) -> bool {
        self.monthly_income.is_some_and(|income| income != 0.0)
            || self
                .income_sources
                .as_ref()
                .is_some_and(|sources| !sources.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub title: String,
    pub information: String,
    pub external_links: Vec<ExternalLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecommendation {
    pub scheme_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeDetails {
    pub scheme_name: String,
    pub description: String,
    pub eligibility: String,
    pub benefits: String,
    pub how_to_apply: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceMetadata {
    pub language: String,
    pub location: Option<String>,
    pub context_provided: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualAdvice {
    pub status: String,
    pub query_type: QueryType,
    pub advice: String,
    pub metadata: AdviceMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptions_are_title_cased() {
        assert_eq!(QueryType::BusinessAdvice.description(), "Business Advice");
        assert_eq!(QueryType::GovernmentSchemes.description(), "Government Schemes");
        assert_eq!(IncomeSource::DailyWage.description(), "Daily Wage");
        assert_eq!(IncomeSource::Other.description(), "Other");
    }

    #[test]
    fn test_scheme_query_defaults_category() {
        let query: SchemeQuery = serde_json::from_value(json!({
            "age": 45,
            "income": 120000,
            "state": "Odisha",
            "occupation": "Farmer"
        }))
        .unwrap();
        assert_eq!(query.category, "General");
    }

    #[test]
    fn test_financial_query_defaults_and_context() {
        let query: FinancialQuery = serde_json::from_value(json!({
            "query_type": "savings",
            "question": "How do I save with seasonal income?"
        }))
        .unwrap();
        assert_eq!(query.language, "English");
        assert!(!query.context_provided());

        let query: FinancialQuery = serde_json::from_value(json!({
            "query_type": "loan",
            "question": "Should I take a KCC loan?",
            "income_sources": ["agriculture", "livestock"]
        }))
        .unwrap();
        assert!(query.context_provided());
        assert_eq!(
            query.income_sources.unwrap(),
            vec![IncomeSource::Agriculture, IncomeSource::Livestock]
        );
    }

    #[test]
    fn test_form_numbers_accept_any_number_or_text() {
        let profile: LoanProfile = serde_json::from_value(json!({
            "loan_amount": "1,50,000",
            "interest_rate": 9.25,
            "loan_term": 5.0,
            "risk_management": "Low",
            "current_debts": 0
        }))
        .unwrap();
        assert_eq!(profile.loan_amount.to_string(), "1,50,000");
        assert_eq!(profile.interest_rate.to_string(), "9.25");
        assert_eq!(profile.loan_term.to_string(), "5");
        assert_eq!(profile.current_debts.to_string(), "0");

        let query: SchemeQuery = serde_json::from_value(json!({
            "age": "38",
            "income": 72000,
            "state": "Bihar",
            "occupation": "Weaver"
        }))
        .unwrap();
        assert_eq!(query.age, FieldValue::from("38"));
        assert_eq!(query.income.to_string(), "72000");
    }

    #[test]
    fn test_form_numbers_reject_structured_values() {
        let result: Result<SchemeQuery, _> = serde_json::from_value(json!({
            "age": [38],
            "income": 72000,
            "state": "Bihar",
            "occupation": "Weaver"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_query_type_is_rejected() {
        let result: Result<FinancialQuery, _> = serde_json::from_value(json!({
            "query_type": "lottery",
            "question": "?"
        }));
        assert!(result.is_err());
    }
}
