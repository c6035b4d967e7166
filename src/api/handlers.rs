use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::{parse_request, AppJson, AppState};
use crate::domain::model::{
    AdviceResponse, BusinessProfile, ContextualAdvice, FinancialProfile, FinancialQuery,
    IncomeSource, LoanProfile, QueryType, SchemeDetails, SchemeDetailsQuery, SchemeQuery,
    SchemeRecommendation,
};
use crate::utils::error::Result;

pub async fn financial_advisor(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<AdviceResponse>> {
    let profile: FinancialProfile = parse_request(payload)?;
    let response = state.advisor.financial_advice(&profile).await?;
    Ok(Json(response))
}

pub async fn business_advisor(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<AdviceResponse>> {
    let profile: BusinessProfile = parse_request(payload)?;
    let response = state.advisor.business_advice(&profile).await?;
    Ok(Json(response))
}

pub async fn loan_advisor(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<AdviceResponse>> {
    let profile: LoanProfile = parse_request(payload)?;
    let response = state.advisor.loan_advice(&profile).await?;
    Ok(Json(response))
}

pub async fn recommend_scheme(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<SchemeRecommendation>> {
    let query: SchemeQuery = parse_request(payload)?;
    let recommendation = state.advisor.recommend_scheme(&query).await?;
    Ok(Json(recommendation))
}

pub async fn scheme_details(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<SchemeDetails>> {
    let query: SchemeDetailsQuery = parse_request(payload)?;
    let details = state.advisor.scheme_details(&query).await?;
    Ok(Json(details))
}

/// Free-form question with optional household context.
pub async fn get_advice(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<ContextualAdvice>> {
    let query: FinancialQuery = parse_request(payload)?;
    let advice = state.advisor.contextual_advice(&query).await?;
    Ok(Json(advice))
}

pub async fn supported_query_types() -> Json<Value> {
    let query_types: Vec<Value> = QueryType::ALL
        .iter()
        .map(|query_type| {
            json!({
                "type": query_type.as_str(),
                "description": query_type.description(),
            })
        })
        .collect();
    Json(json!({ "query_types": query_types }))
}

pub async fn income_sources() -> Json<Value> {
    let income_sources: Vec<Value> = IncomeSource::ALL
        .iter()
        .map(|source| {
            json!({
                "source": source.as_str(),
                "description": source.description(),
            })
        })
        .collect();
    Json(json!({ "income_sources": income_sources }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "model": state.model.as_ref() }))
}
