//! Prompt templates sent to the generative model.

use crate::core::schemes::SchemeCatalog;
use crate::domain::model::{
    BusinessProfile, FinancialProfile, FinancialQuery, LoanProfile, QueryType, SchemeQuery,
};

pub fn financial_prompt(profile: &FinancialProfile) -> String {
    format!(
        r#"
As a financial advisor for rural India, provide guidance in simple language for:

Background:
- Name: {name}
- Age: {age}
- Location: {location}
- Monthly Income: ₹{monthly_income}
- Expenditure: ₹{expenditure}
- Financial Goals: {financial_goals}
- Investments: {investments}
- Loans: {loans}

Ask the following questions:
1. What is your target savings percentage?
2. Are you interested in any specific investment plans?
3. Do you want advice on budgeting, savings, or retirement plans?

Provide detailed advice in a simplified manner, using examples and suggestions.
"#,
        name = profile.name,
        age = profile.age,
        location = profile.location,
        monthly_income = profile.monthly_income,
        expenditure = profile.expenditure,
        financial_goals = profile.financial_goals,
        investments = profile.investments,
        loans = profile.loans,
    )
}

pub fn business_prompt(profile: &BusinessProfile) -> String {
    format!(
        r#"
As a business advisor for rural India, provide guidance on the following business idea:

Background:
- Business Idea: {business_idea}
- Current Finances: ₹{current_finances}
- Monthly Revenue: ₹{monthly_revenue}
- Expenses: ₹{expenses}
- Financial Goals: {financial_goals}

Ask the following questions:
1. What is your expected growth rate for the business?
2. Do you need advice on expanding, managing cash flow, or optimizing expenses?

Provide practical advice in simple language on:
1. Business setup steps
2. Financial planning for the business
3. Identifying potential funding or government schemes
"#,
        business_idea = profile.business_idea,
        current_finances = profile.current_finances,
        monthly_revenue = profile.monthly_revenue,
        expenses = profile.expenses,
        financial_goals = profile.financial_goals,
    )
}

pub fn loan_prompt(profile: &LoanProfile) -> String {
    format!(
        r#"
As a loan advisor, provide guidance based on the following loan details:

Background:
- Loan Amount: ₹{loan_amount}
- Interest Rate: {interest_rate}%
- Loan Term: {loan_term} years
- Risk Management: {risk_management}
- Current Debts: ₹{current_debts}

Ask the following questions:
1. What is the purpose of the loan (e.g., home, business, education)?
2. Do you need advice on adjusting your loan amount, term, or interest rate?
3. Would you like information on government schemes for loans or financial relief?

Provide advice on:
1. Choosing the right loan
2. Risks involved and risk management
3. Loan repayment strategies
"#,
        loan_amount = profile.loan_amount,
        interest_rate = profile.interest_rate,
        loan_term = profile.loan_term,
        risk_management = profile.risk_management,
        current_debts = profile.current_debts,
    )
}

pub fn scheme_prompt(query: &SchemeQuery) -> String {
    format!(
        r#"You are a government scheme recommendation system. Based on the following user details, recommend ONE most relevant Indian government scheme.

User Details:
- Age: {age}
- Income: ₹{income} per annum
- State: {state}
- Occupation: {occupation}
- Category: {category}

Provide your response strictly in the following JSON format, with no additional text:
{{
    "scheme_name": "Name of the scheme",
    "description": "Brief description of the scheme"
}}"#,
        age = query.age,
        income = query.income,
        state = query.state,
        occupation = query.occupation,
        category = query.category,
    )
}

pub fn scheme_details_prompt(scheme_name: &str) -> String {
    format!(
        r#"Provide detailed information about the Indian government scheme: {scheme_name}

Return your response strictly in the following JSON format, with no additional text:
{{
    "scheme_name": "Name of the scheme",
    "description": "Detailed description",
    "eligibility": "Eligibility criteria",
    "benefits": "Key benefits",
    "how_to_apply": "Application process"
}}"#
    )
}

pub fn external_links_prompt(topic: &str) -> String {
    format!("Provide external resources such as articles or videos related to: {topic}")
}

fn focus_block(query_type: QueryType) -> &'static str {
    match query_type {
        QueryType::BusinessAdvice => {
            "Focus on:
- Local market opportunities and challenges
- Initial investment requirements and potential returns
- Risk assessment and mitigation strategies
- Required licenses and regulations
- Local success stories and common pitfalls
- Step-by-step implementation plan"
        }
        QueryType::Savings => {
            "Focus on:
- Practical savings methods for irregular income
- Priority-based saving goals
- Local savings groups and self-help groups
- Digital banking and mobile money options
- Emergency fund planning
- Child education planning"
        }
        QueryType::Loan => {
            "Focus on:
- Suitable loan products (priority sector, MUDRA, KCC)
- Documentation requirements
- Interest rates and EMI calculations
- Risk assessment
- Alternatives to formal loans
- Debt management strategies"
        }
        QueryType::GovernmentSchemes => {
            "Focus on:
- Eligibility criteria and benefits
- Application process and required documents
- Local success stories
- Common application mistakes to avoid
- Timeline and follow-up process
- Alternative schemes if not eligible"
        }
        QueryType::Investment => {
            "Focus on:
- Safe and suitable investment options
- Risk assessment
- Local investment opportunities
- Avoiding fraud and scams
- Long-term vs short-term planning
- Diversification strategies"
        }
        QueryType::Insurance => {
            "Focus on:
- Relevant insurance products (crop, health, life)
- Premium affordability
- Claim process
- Coverage understanding
- Family protection planning
- Government insurance schemes"
        }
        QueryType::General => {
            "Focus on:
- Practical and actionable advice
- Local context and cultural considerations
- Risk awareness and protection
- Long-term financial health
- Available support systems
- Step-by-step guidance"
        }
    }
}

const ADDITIONAL_GUIDELINES: &str = "Additional Guidelines:
1. Provide advice in simple, clear language with local examples
2. Include specific numbers and calculations where relevant
3. Suggest both immediate actions and long-term planning
4. Address common risks and misconceptions
5. Include relevant government schemes and support programs
6. Provide alternative solutions for different scenarios
7. Include contact information for local resources when applicable

Please provide comprehensive advice that is practical, actionable, and sensitive to rural financial realities.";

/// Context-aware prompt: only the context fields the user actually filled in are listed.
pub fn contextual_prompt(query: &FinancialQuery, catalog: &SchemeCatalog) -> String {
    let mut prompt = format!(
        "As an expert financial advisor specialized in rural finance and financial inclusion:

Query Type: {}
Question: {}
Language: {}

Available Context:",
        query.query_type.as_str(),
        query.question,
        query.language
    );

    // 0 與空字串視為未提供
    if let Some(income) = query.monthly_income.filter(|v| *v != 0.0) {
        prompt.push_str(&format!("\n- Monthly Income: ₹{}", income));
    }
    if let Some(sources) = query.income_sources.as_ref().filter(|s| !s.is_empty()) {
        let joined = sources
            .iter()
            .map(|source| source.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("\n- Income Sources: {}", joined));
    }
    if let Some(location) = query.location.as_deref().filter(|s| !s.is_empty()) {
        prompt.push_str(&format!("\n- Location: {}", location));
    }
    if let Some(age) = query.age.filter(|v| *v != 0) {
        prompt.push_str(&format!("\n- Age: {}", age));
    }
    if let Some(family_size) = query.family_size.filter(|v| *v != 0) {
        prompt.push_str(&format!("\n- Family Size: {}", family_size));
    }
    if let Some(has_account) = query.has_bank_account {
        let answer = if has_account { "Yes" } else { "No" };
        prompt.push_str(&format!("\n- Has Bank Account: {}", answer));
    }
    if let Some(education) = query.education_level.as_deref().filter(|s| !s.is_empty()) {
        prompt.push_str(&format!("\n- Education Level: {}", education));
    }
    if let Some(loans) = query.existing_loans.filter(|v| *v != 0.0) {
        prompt.push_str(&format!("\n- Existing Loans: ₹{}", loans));
    }

    prompt.push_str("\n\n");
    prompt.push_str(focus_block(query.query_type));

    if query.query_type == QueryType::GovernmentSchemes && !catalog.is_empty() {
        prompt.push_str("\n\nReference Schemes:");
        for (category, schemes) in catalog.categories() {
            if schemes.is_empty() {
                continue;
            }
            prompt.push_str(&format!("\n- {}: {}", category, schemes.join(", ")));
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(ADDITIONAL_GUIDELINES);
    prompt
}
