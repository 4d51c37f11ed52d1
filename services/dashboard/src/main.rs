use anyhow::Result;
use api::{ApiClient, Repositories};
use auth::Session;
use dashboard::{
    DashboardAggregator, DashboardConfig, DashboardView, RefreshOutcome, formatters::format_currency,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Loan Desk dashboard");

    let config = DashboardConfig::from_env()?;
    let repositories = Repositories::new(ApiClient::new(&config.api)?);
    info!("Using backend at {}", config.api.base_url);

    let mut session = Session::new();
    match &config.username {
        Some(username) => match repositories.users.find_by_username(username).await? {
            Some(user) => session.sign_in(user),
            None => warn!("User {} not found, continuing signed out", username),
        },
        None => warn!("LOAN_DESK_USERNAME is not set, continuing signed out"),
    }

    let aggregator = DashboardAggregator::new(repositories, config.fetches);
    let outcome = aggregator.refresh().await;

    let view = DashboardView::compose(
        &session,
        &aggregator.current_state(),
        aggregator.last_good(),
    );

    for tab in &view.tabs {
        info!(tab = tab.label, can_create = tab.can_create, "Tab available");
    }

    let snapshot = view.snapshot();
    info!(
        loans = snapshot.loans.len(),
        clients = snapshot.clients.len(),
        payments = snapshot.payments.len(),
        active_loans = snapshot.active_loans(),
        outstanding = %format_currency(snapshot.outstanding_balance()),
        "Dashboard ready"
    );

    if let RefreshOutcome::Failed(message) = outcome {
        anyhow::bail!(message);
    }

    Ok(())
}
