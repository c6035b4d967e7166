use clap::{Parser, Subcommand};
use rural_advisor::client::{self, AdvisorClient, DEFAULT_SERVER_URL};
use rural_advisor::domain::model::{
    AdviceResponse, BusinessProfile, ContextualAdvice, FinancialProfile, FinancialQuery,
    IncomeSource, LoanProfile, QueryType, SchemeDetails, SchemeDetailsQuery, SchemeQuery,
    SchemeRecommendation,
};
use rural_advisor::utils::logger;

#[derive(Parser)]
#[command(name = "advisor-client")]
#[command(about = "Ask the rural advisor API for financial, business, loan or scheme guidance")]
struct Args {
    /// Base URL of the advisor API
    #[arg(long, env = "ADVISOR_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Personal financial advice
    Financial {
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(18..))]
        age: u32,
        #[arg(long)]
        location: String,
        #[arg(long)]
        monthly_income: f64,
        #[arg(long)]
        expenditure: f64,
        #[arg(long)]
        financial_goals: String,
        #[arg(long, default_value = "")]
        investments: String,
        #[arg(long, default_value = "")]
        loans: String,
    },
    /// Advice on a business idea
    Business {
        #[arg(long)]
        business_idea: String,
        #[arg(long)]
        current_finances: f64,
        #[arg(long)]
        monthly_revenue: f64,
        #[arg(long)]
        expenses: f64,
        #[arg(long)]
        financial_goals: String,
    },
    /// Advice on a loan
    Loan {
        #[arg(long)]
        loan_amount: f64,
        #[arg(long)]
        interest_rate: f64,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        loan_term: u32,
        /// Low, Medium or High
        #[arg(long)]
        risk_management: String,
        #[arg(long, default_value_t = 0.0)]
        current_debts: f64,
    },
    /// Recommend one government scheme
    Scheme {
        #[arg(long)]
        age: u32,
        /// Annual income in rupees
        #[arg(long)]
        income: f64,
        #[arg(long)]
        state: String,
        #[arg(long)]
        occupation: String,
        #[arg(long, default_value = "General")]
        category: String,
    },
    /// Details of a named government scheme
    SchemeDetails {
        #[arg(long)]
        scheme_name: String,
    },
    /// Free-form question with optional household context
    Ask {
        #[arg(long, value_parser = parse_query_type)]
        query_type: QueryType,
        #[arg(long)]
        question: String,
        #[arg(long, default_value = "English")]
        language: String,
        #[arg(long)]
        monthly_income: Option<f64>,
        #[arg(long, value_delimiter = ',', value_parser = parse_income_source)]
        income_sources: Vec<IncomeSource>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        family_size: Option<u32>,
        #[arg(long)]
        has_bank_account: Option<bool>,
        #[arg(long)]
        education_level: Option<String>,
        #[arg(long)]
        existing_loans: Option<f64>,
    },
}

fn parse_query_type(value: &str) -> Result<QueryType, String> {
    QueryType::ALL
        .into_iter()
        .find(|query_type| query_type.as_str() == value)
        .ok_or_else(|| {
            let valid: Vec<&str> = QueryType::ALL.iter().map(|q| q.as_str()).collect();
            format!("expected one of: {}", valid.join(", "))
        })
}

fn parse_income_source(value: &str) -> Result<IncomeSource, String> {
    IncomeSource::ALL
        .into_iter()
        .find(|source| source.as_str() == value)
        .ok_or_else(|| {
            let valid: Vec<&str> = IncomeSource::ALL.iter().map(|s| s.as_str()).collect();
            format!("expected one of: {}", valid.join(", "))
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = AdvisorClient::new(args.server);

    let result = match args.command {
        Command::Financial {
            name,
            age,
            location,
            monthly_income,
            expenditure,
            financial_goals,
            investments,
            loans,
        } => {
            let profile = FinancialProfile {
                name,
                age: age.into(),
                location,
                monthly_income: monthly_income.into(),
                expenditure: expenditure.into(),
                financial_goals,
                investments,
                loans,
            };
            client
                .post_as::<_, AdviceResponse>("financial-advisor", &profile)
                .await
                .map(|advice| client::render_advice(&advice))
        }
        Command::Business {
            business_idea,
            current_finances,
            monthly_revenue,
            expenses,
            financial_goals,
        } => {
            let profile = BusinessProfile {
                business_idea,
                current_finances: current_finances.into(),
                monthly_revenue: monthly_revenue.into(),
                expenses: expenses.into(),
                financial_goals,
            };
            client
                .post_as::<_, AdviceResponse>("business-advisor", &profile)
                .await
                .map(|advice| client::render_advice(&advice))
        }
        Command::Loan {
            loan_amount,
            interest_rate,
            loan_term,
            risk_management,
            current_debts,
        } => {
            let profile = LoanProfile {
                loan_amount: loan_amount.into(),
                interest_rate: interest_rate.into(),
                loan_term: loan_term.into(),
                risk_management,
                current_debts: current_debts.into(),
            };
            client
                .post_as::<_, AdviceResponse>("loan-advisor", &profile)
                .await
                .map(|advice| client::render_advice(&advice))
        }
        Command::Scheme {
            age,
            income,
            state,
            occupation,
            category,
        } => {
            let query = SchemeQuery {
                age: age.into(),
                income: income.into(),
                state,
                occupation,
                category,
            };
            client
                .post_as::<_, SchemeRecommendation>("api/recommend-scheme", &query)
                .await
                .map(|scheme| client::render_scheme(&scheme))
        }
        Command::SchemeDetails { scheme_name } => client
            .post_as::<_, SchemeDetails>("api/scheme-details", &SchemeDetailsQuery { scheme_name })
            .await
            .map(|details| client::render_scheme_details(&details)),
        Command::Ask {
            query_type,
            question,
            language,
            monthly_income,
            income_sources,
            location,
            age,
            family_size,
            has_bank_account,
            education_level,
            existing_loans,
        } => {
            let query = FinancialQuery {
                query_type,
                question,
                language,
                monthly_income,
                income_sources: (!income_sources.is_empty()).then_some(income_sources),
                location,
                age,
                family_size,
                has_bank_account,
                education_level,
                existing_loans,
            };
            client
                .post_as::<_, ContextualAdvice>("get-advice", &query)
                .await
                .map(|advice| client::render_contextual(&advice))
        }
    };

    match result {
        Ok(rendered) => {
            println!("{}", rendered);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Request to {} failed: {}", client.base_url(), e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
