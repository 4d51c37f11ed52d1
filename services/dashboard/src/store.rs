//! Dashboard aggregation store
//!
//! [`DashboardAggregator`] runs a refresh cycle as one batch of concurrent
//! fetches and publishes the result through a `watch` channel. A cycle is
//! applied all-or-nothing: on any failure the previously published snapshot
//! stays in place and only the state changes to [`FetchState::Failed`].
//!
//! Every cycle takes the next generation number when it starts. Starting a
//! new cycle cancels any cycle still in flight, and a cycle only publishes if
//! its generation is still the latest, so the last cycle to start wins.

use std::{fmt, future::Future, sync::Arc};

use api::{ApiError, ApiResult};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::{config::OptionalFetches, snapshot::DashboardSnapshot, source::DashboardSource};

/// One fetch within a refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchPhase {
    Loans,
    Clients,
    Payments,
    InterestRates,
    PaymentPeriods,
    LoansThisWeek,
    LoanCount,
    LoanTotalAmount,
    MonthlyPaymentTotals,
}

impl FetchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchPhase::Loans => "loans",
            FetchPhase::Clients => "clients",
            FetchPhase::Payments => "payments",
            FetchPhase::InterestRates => "interest rates",
            FetchPhase::PaymentPeriods => "payment periods",
            FetchPhase::LoansThisWeek => "loans this week",
            FetchPhase::LoanCount => "loan count",
            FetchPhase::LoanTotalAmount => "loan total amount",
            FetchPhase::MonthlyPaymentTotals => "monthly payment totals",
        }
    }
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetch that failed during a refresh cycle
#[derive(Error, Debug)]
#[error("{phase}: {source}")]
pub struct PhaseError {
    pub phase: FetchPhase,
    #[source]
    pub source: ApiError,
}

/// Lifecycle of the dashboard data
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    /// No refresh has started yet
    #[default]
    Idle,
    Loading,
    Ready(Arc<DashboardSnapshot>),
    /// The latest cycle failed; the message names every failed fetch
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Failure message, if the latest cycle failed
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn is_settled(&self) -> bool {
        matches!(self, FetchState::Ready(_) | FetchState::Failed(_))
    }
}

/// How a call to [`DashboardAggregator::refresh`] ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The new snapshot was published
    Applied,
    /// At least one fetch failed; nothing from the cycle was applied
    Failed(String),
    /// A newer cycle started first; nothing from this cycle was published
    Superseded,
}

#[derive(Debug, Clone, Default)]
struct Published {
    generation: u64,
    state: FetchState,
    /// Last successfully loaded snapshot, kept across failed cycles
    snapshot: Option<Arc<DashboardSnapshot>>,
}

/// Fans out dashboard fetches and publishes one consistent snapshot
pub struct DashboardAggregator<S> {
    source: S,
    fetches: OptionalFetches,
    published: watch::Sender<Published>,
}

impl<S: DashboardSource> DashboardAggregator<S> {
    /// Create a new aggregator in the `Idle` state with an empty snapshot
    pub fn new(source: S, fetches: OptionalFetches) -> Self {
        let (published, _) = watch::channel(Published::default());
        Self {
            source,
            fetches,
            published,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn fetches(&self) -> OptionalFetches {
        self.fetches
    }

    /// Latest published state
    pub fn current_state(&self) -> FetchState {
        self.published.borrow().state.clone()
    }

    /// Last successfully loaded snapshot, or an empty one before the first success
    pub fn current_snapshot(&self) -> Arc<DashboardSnapshot> {
        self.published.borrow().snapshot.clone().unwrap_or_default()
    }

    /// Last successfully loaded snapshot, if any cycle has succeeded yet
    pub fn last_good(&self) -> Option<Arc<DashboardSnapshot>> {
        self.published.borrow().snapshot.clone()
    }

    /// Generation of the most recently started cycle
    pub fn generation(&self) -> u64 {
        self.published.borrow().generation
    }

    /// Observe state changes
    pub fn subscribe(&self) -> DashboardWatcher {
        DashboardWatcher {
            rx: self.published.subscribe(),
        }
    }

    /// Run one refresh cycle
    ///
    /// Never returns an error: failures are published as
    /// [`FetchState::Failed`] and reported in the outcome.
    pub async fn refresh(&self) -> RefreshOutcome {
        let mut generation = 0;
        self.published.send_modify(|published| {
            published.generation += 1;
            published.state = FetchState::Loading;
            generation = published.generation;
        });
        info!(generation, "Refreshing dashboard data");

        let fetched = tokio::select! {
            biased;
            _ = self.superseded(generation) => {
                info!(generation, "Refresh cancelled by a newer cycle");
                return RefreshOutcome::Superseded;
            }
            fetched = self.fetch_all() => fetched,
        };

        match fetched {
            Ok(snapshot) => self.apply(generation, snapshot),
            Err(errors) => self.fail(generation, &errors),
        }
    }

    /// Resolves once a cycle newer than `generation` has started
    async fn superseded(&self, generation: u64) {
        let mut rx = self.published.subscribe();
        loop {
            let latest = rx.borrow_and_update().generation;
            if latest != generation {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender lives in `self`, so this cannot happen while we run.
                std::future::pending::<()>().await;
            }
        }
    }

    async fn fetch_all(&self) -> Result<DashboardSnapshot, Vec<PhaseError>> {
        let source = &self.source;
        let fetches = self.fetches;

        let (
            loans,
            clients,
            payments,
            interest_rates,
            payment_periods,
            loans_this_week,
            loan_count,
            loan_total_amount,
            monthly_payment_totals,
        ) = tokio::join!(
            source.loans(),
            source.clients(),
            source.payments(),
            source.interest_rates(),
            source.payment_periods(),
            optional(fetches.loans_this_week, source.loans_this_week()),
            optional(fetches.loan_count, source.loan_count()),
            optional(fetches.loan_total_amount, source.loan_total_amount()),
            optional(
                fetches.monthly_payment_totals,
                source.monthly_payment_totals()
            ),
        );

        let mut errors = Vec::new();
        let snapshot = DashboardSnapshot {
            loans: collect(FetchPhase::Loans, loans, &mut errors),
            clients: collect(FetchPhase::Clients, clients, &mut errors),
            payments: collect(FetchPhase::Payments, payments, &mut errors),
            interest_rates: collect(FetchPhase::InterestRates, interest_rates, &mut errors),
            payment_periods: collect(FetchPhase::PaymentPeriods, payment_periods, &mut errors),
            loans_this_week: collect(FetchPhase::LoansThisWeek, loans_this_week, &mut errors),
            loan_count: collect(FetchPhase::LoanCount, loan_count, &mut errors),
            loan_total_amount: collect(FetchPhase::LoanTotalAmount, loan_total_amount, &mut errors),
            monthly_payment_totals: collect(
                FetchPhase::MonthlyPaymentTotals,
                monthly_payment_totals,
                &mut errors,
            ),
        };

        if errors.is_empty() {
            Ok(snapshot)
        } else {
            Err(errors)
        }
    }

    fn apply(&self, generation: u64, snapshot: DashboardSnapshot) -> RefreshOutcome {
        let snapshot = Arc::new(snapshot);
        let applied = self.published.send_if_modified(|published| {
            if published.generation != generation {
                return false;
            }
            published.state = FetchState::Ready(Arc::clone(&snapshot));
            published.snapshot = Some(Arc::clone(&snapshot));
            true
        });

        if !applied {
            debug!(generation, "Discarding results of a superseded cycle");
            return RefreshOutcome::Superseded;
        }

        info!(
            generation,
            loans = snapshot.loans.len(),
            clients = snapshot.clients.len(),
            payments = snapshot.payments.len(),
            "Dashboard data loaded"
        );
        RefreshOutcome::Applied
    }

    fn fail(&self, generation: u64, errors: &[PhaseError]) -> RefreshOutcome {
        let message = failure_message(errors);
        let applied = self.published.send_if_modified(|published| {
            if published.generation != generation {
                return false;
            }
            published.state = FetchState::Failed(message.clone());
            true
        });

        if !applied {
            debug!(generation, "Discarding failure of a superseded cycle");
            return RefreshOutcome::Superseded;
        }

        error!(generation, failed = errors.len(), "{}", message);
        RefreshOutcome::Failed(message)
    }
}

async fn optional<T>(
    enabled: bool,
    fetch: impl Future<Output = ApiResult<T>>,
) -> ApiResult<Option<T>> {
    if enabled {
        fetch.await.map(Some)
    } else {
        Ok(None)
    }
}

fn collect<T: Default>(phase: FetchPhase, result: ApiResult<T>, errors: &mut Vec<PhaseError>) -> T {
    result.unwrap_or_else(|source| {
        errors.push(PhaseError { phase, source });
        T::default()
    })
}

/// Build the user-facing message for a failed cycle
pub fn failure_message(errors: &[PhaseError]) -> String {
    let details = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("Error loading dashboard data: {details}")
}

/// Read side of the aggregator for views that react to changes
#[derive(Debug, Clone)]
pub struct DashboardWatcher {
    rx: watch::Receiver<Published>,
}

impl DashboardWatcher {
    /// Wait for the next published change; false once the aggregator is gone
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    pub fn state(&self) -> FetchState {
        self.rx.borrow().state.clone()
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.rx.borrow().snapshot.clone().unwrap_or_default()
    }

    pub fn last_good(&self) -> Option<Arc<DashboardSnapshot>> {
        self.rx.borrow().snapshot.clone()
    }

    /// Wait until the state is `Ready` or `Failed` and return it
    pub async fn wait_until_settled(&mut self) -> FetchState {
        loop {
            let state = self.rx.borrow_and_update().state.clone();
            if state.is_settled() || self.rx.changed().await.is_err() {
                return state;
            }
        }
    }
}
