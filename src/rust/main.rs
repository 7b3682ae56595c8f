use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use loanwise::dataset::{CHART_ROWS, HOME_TITLE, INCOME_COLUMN, LOAN_AMOUNT_COLUMN, PREVIEW_ROWS};
use loanwise::form::{prediction_form, PAGE_PROMPT, SIDEBAR_HEADER};
use loanwise::{
    encode, AppConfig, Dataset, Feedback, FormCollector, FormError, PredictionSession, PredictorAdapter,
    RawApplication,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log progress at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    page: Page,
}

#[derive(Subcommand)]
enum Page {
    /// Preview the loan dataset
    Home {
        /// Dataset CSV file
        #[arg(long)]
        dataset: Option<PathBuf>,
    },
    /// List the inputs of the prediction form
    Form,
    /// Predict whether the applicant gets the loan
    Predict(PredictArgs),
}

const FIELD_ARGS: [&str; 11] = [
    "applicant_income",
    "coapplicant_income",
    "loan_amount",
    "loan_term",
    "credit_history",
    "gender",
    "married",
    "self_employed",
    "dependents",
    "education",
    "property_area",
];

/// Omitted inputs keep the form's default value.
#[derive(Args)]
struct PredictArgs {
    #[arg(long)]
    applicant_income: Option<f64>,
    #[arg(long)]
    coapplicant_income: Option<f64>,
    /// Loan amount in K$
    #[arg(long)]
    loan_amount: Option<f64>,
    /// Loan term in months
    #[arg(long)]
    loan_term: Option<f64>,
    /// 1 if the credit history meets guidelines, else 0
    #[arg(long)]
    credit_history: Option<f64>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    married: Option<String>,
    #[arg(long)]
    self_employed: Option<String>,
    /// 0, 1, 2 or 3+
    #[arg(long)]
    dependents: Option<String>,
    #[arg(long)]
    education: Option<String>,
    /// Rural, Urban or Semiurban
    #[arg(long)]
    property_area: Option<String>,

    /// Read the whole application from a JSON file instead
    #[arg(long, conflicts_with_all = FIELD_ARGS)]
    application: Option<PathBuf>,

    /// Model artifact (JSON random forest)
    #[arg(long)]
    model: Option<PathBuf>,
    /// Expected SHA-256 of the model artifact
    #[arg(long)]
    model_sha256: Option<String>,
    #[arg(long)]
    approval_asset: Option<PathBuf>,
    #[arg(long)]
    rejection_asset: Option<PathBuf>,

    /// Print the encoded feature vector
    #[arg(long)]
    features: bool,
    /// Print the outcome image as an HTML <img> tag
    #[arg(long)]
    html: bool,
}

impl PredictArgs {
    fn collect(&self) -> Result<RawApplication, FormError> {
        let mut form = FormCollector::new();
        if let Some(value) = self.applicant_income {
            form = form.applicant_income(value)?;
        }
        if let Some(value) = self.coapplicant_income {
            form = form.coapplicant_income(value)?;
        }
        if let Some(value) = self.loan_amount {
            form = form.loan_amount(value)?;
        }
        if let Some(value) = self.loan_term {
            form = form.loan_term(value)?;
        }
        if let Some(value) = self.credit_history {
            form = form.credit_history(value)?;
        }
        if let Some(value) = &self.gender {
            form = form.gender(value.as_str());
        }
        if let Some(value) = &self.married {
            form = form.married(value.as_str());
        }
        if let Some(value) = &self.self_employed {
            form = form.self_employed(value.as_str());
        }
        if let Some(value) = &self.dependents {
            form = form.dependents(value.as_str());
        }
        if let Some(value) = &self.education {
            form = form.education(value.as_str());
        }
        if let Some(value) = &self.property_area {
            form = form.property_area(value.as_str());
        }
        Ok(form.collect())
    }

    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.model {
            config.model_path = path.clone();
        }
        if let Some(hash) = &self.model_sha256 {
            config.model_sha256 = Some(hash.clone());
        }
        if let Some(path) = &self.approval_asset {
            config.approval_asset = path.clone();
        }
        if let Some(path) = &self.rejection_asset {
            config.rejection_asset = path.clone();
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    loanwise::init_logger(cli.verbose);

    let config = AppConfig::from_env();
    match cli.page {
        Page::Home { dataset } => show_home(config, dataset),
        Page::Form => {
            show_form();
            Ok(ExitCode::SUCCESS)
        }
        Page::Predict(args) => predict(config, args),
    }
}

fn show_home(mut config: AppConfig, dataset: Option<PathBuf>) -> Result<ExitCode> {
    if let Some(path) = dataset {
        config.dataset_path = path;
    }
    let data = Dataset::load(&config.dataset_path)
        .context("Could not open the dataset for the home page")?;

    println!("{}\n", HOME_TITLE);
    println!("Dataset:");
    println!("{}\n", data.render_head(PREVIEW_ROWS));

    println!("Applicant Income VS Loan Amount");
    println!("{:<18}{}", INCOME_COLUMN, LOAN_AMOUNT_COLUMN);
    for (income, amount) in data.numeric_pairs(INCOME_COLUMN, LOAN_AMOUNT_COLUMN, CHART_ROWS)? {
        println!("{:<18}{}", format_cell(income), format_cell(amount));
    }
    Ok(ExitCode::SUCCESS)
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn show_form() {
    println!("{}\n", PAGE_PROMPT);
    println!("{}", SIDEBAR_HEADER);
    for field in prediction_form() {
        println!("  {}", field);
    }
}

fn predict(mut config: AppConfig, args: PredictArgs) -> Result<ExitCode> {
    args.apply_overrides(&mut config);

    let application = match &args.application {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read application file {:?}", path))?;
            serde_json::from_str::<RawApplication>(&text)
                .with_context(|| format!("Invalid application file {:?}", path))?
        }
        None => args.collect()?,
    };

    if args.features {
        for (name, value) in encode(&application).named() {
            println!("{:<24}{}", name, value);
        }
    }

    let mut session = PredictionSession::new(PredictorAdapter::new(config.predictor_config()));
    info!("Click to Predict");
    let feedback = session.submit(&application);

    match &feedback {
        Feedback::Outcome(outcome) => {
            println!("{}", outcome.message());
            if args.html {
                println!("{}", outcome.to_html());
            }
        }
        Feedback::Failure(err) => {
            eprintln!("{}", err);
            return Ok(ExitCode::FAILURE);
        }
        Feedback::Nothing => {}
    }
    Ok(ExitCode::SUCCESS)
}
