//! Permission-gated view composition
//!
//! Turns the signed-in session, the aggregator state and the last good
//! snapshot into what the dashboard shows: which tabs are visible, which
//! create and row actions are offered, and the formatted table rows.
//! Hidden affordances are simply left out; nothing here reports a denial.

use std::sync::Arc;

use auth::{
    Session,
    models::{Action, Resource, Role},
};
use common::models::{Client, EntityId, Loan, LoanType};
use serde::Serialize;

use crate::{
    formatters::{format_currency, format_date, format_date_with_month_name},
    snapshot::DashboardSnapshot,
    store::FetchState,
};

/// Dashboard tabs in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabKind {
    Loans,
    Clients,
    Payments,
    Debts,
    Reports,
}

impl TabKind {
    pub const ALL: [TabKind; 5] = [
        TabKind::Loans,
        TabKind::Clients,
        TabKind::Payments,
        TabKind::Debts,
        TabKind::Reports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TabKind::Loans => "Loans",
            TabKind::Clients => "Clients",
            TabKind::Payments => "Payments",
            TabKind::Debts => "Debts",
            TabKind::Reports => "Reports",
        }
    }

    /// Resources the user must be able to read to see the tab
    fn required_reads(&self) -> &'static [Resource] {
        match self {
            TabKind::Loans => &[Resource::Loan],
            TabKind::Clients => &[Resource::Client],
            TabKind::Payments => &[Resource::Payment],
            TabKind::Debts => &[Resource::Debt],
            TabKind::Reports => &[Resource::Loan, Resource::Client],
        }
    }

    /// Resource behind the tab's create button, if it has one
    fn creates(&self) -> Option<Resource> {
        match self {
            TabKind::Loans => Some(Resource::Loan),
            TabKind::Clients => Some(Resource::Client),
            TabKind::Payments => Some(Resource::Payment),
            TabKind::Debts | TabKind::Reports => None,
        }
    }
}

/// A visible tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub kind: TabKind,
    pub label: &'static str,
    /// Whether the tab offers its create button
    pub can_create: bool,
}

/// Everything the dashboard page renders for the current user
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub user_name: Option<String>,
    pub role: Option<Role>,
    pub tabs: Vec<Tab>,
    pub loading: bool,
    /// Error banner text when the latest refresh failed
    pub error: Option<String>,
    /// True when the shown data is a last-good snapshot from before a failure
    pub stale: bool,
    snapshot: Arc<DashboardSnapshot>,
    can_update_client: bool,
    can_delete_client: bool,
}

impl DashboardView {
    /// Compose the view for `session` from the aggregator's state
    pub fn compose(
        session: &Session,
        state: &FetchState,
        last_good: Option<Arc<DashboardSnapshot>>,
    ) -> Self {
        let tabs = TabKind::ALL
            .into_iter()
            .filter(|kind| {
                kind.required_reads()
                    .iter()
                    .all(|&resource| session.can(Action::Read, resource))
            })
            .map(|kind| Tab {
                kind,
                label: kind.label(),
                can_create: kind
                    .creates()
                    .is_some_and(|resource| session.can(Action::Create, resource)),
            })
            .collect();

        let error = state.error().map(str::to_string);
        let stale = error.is_some() && last_good.is_some();

        Self {
            user_name: session.current_user().map(|user| user.name.clone()),
            role: session.role(),
            tabs,
            loading: state.is_loading(),
            error,
            stale,
            snapshot: last_good.unwrap_or_default(),
            can_update_client: session.can(Action::Update, Resource::Client),
            can_delete_client: session.can(Action::Delete, Resource::Client),
        }
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn tab(&self, kind: TabKind) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.kind == kind)
    }

    /// Rows of the loans table
    pub fn loan_rows(&self) -> Vec<LoanRow> {
        self.snapshot
            .loans
            .iter()
            .map(|loan| LoanRow::new(&self.snapshot, loan))
            .collect()
    }

    /// Rows of the loans issued this week whose client name matches `search`
    ///
    /// Loans whose client cannot be resolved are left out.
    pub fn weekly_loan_rows(&self, search: &str) -> Vec<LoanRow> {
        let Some(loans) = &self.snapshot.loans_this_week else {
            return Vec::new();
        };

        loans
            .iter()
            .filter(|loan| {
                self.snapshot
                    .client(&loan.client_id)
                    .is_some_and(|client| name_matches(client, search))
            })
            .map(|loan| LoanRow::new(&self.snapshot, loan))
            .collect()
    }

    /// Rows of the clients table whose name matches `search`
    pub fn client_rows(&self, search: &str) -> Vec<ClientRow> {
        self.snapshot
            .clients
            .iter()
            .filter(|client| name_matches(client, search))
            .map(|client| ClientRow {
                id: client.id.clone(),
                name: client.full_name.clone(),
                phone: client.phone.clone(),
                address: client.address.clone(),
                whatsapp: whatsapp_link(&client.phone),
                can_edit: self.can_update_client,
                can_delete: self.can_delete_client
                    && !self.snapshot.has_active_loans(&client.id),
            })
            .collect()
    }

    /// Rows of the payments table
    pub fn payment_rows(&self) -> Vec<PaymentRow> {
        self.snapshot
            .payments
            .iter()
            .map(|payment| PaymentRow {
                id: payment.id.clone(),
                client: self
                    .snapshot
                    .payment_client(payment)
                    .map_or_else(|| CLIENT_NOT_FOUND.to_string(), |c| c.full_name.clone()),
                amount: format_currency(payment.amount),
                date: format_date_with_month_name(payment.payment_date),
                interest: format_currency(payment.interest_pay),
                capital: format_currency(payment.capital_pay),
                remaining: format_currency(payment.remaining),
                notes: payment.notes.clone(),
            })
            .collect()
    }

    /// Headline figures for the reports tab
    pub fn report(&self) -> Report {
        let snapshot = &self.snapshot;
        Report {
            active_loans: snapshot.active_loans(),
            outstanding_balance: format_currency(snapshot.outstanding_balance()),
            payments_collected: format_currency(snapshot.payments_collected()),
            loan_count: snapshot.loan_count,
            loan_total_amount: snapshot.loan_total_amount.map(format_currency),
            monthly_payments: snapshot
                .monthly_payment_totals
                .iter()
                .flatten()
                .map(|total| (total.month.clone(), format_currency(total.total_amount)))
                .collect(),
        }
    }
}

const CLIENT_NOT_FOUND: &str = "Client not found";
const FREQUENCY_NOT_FOUND: &str = "Frequency not found";

fn name_matches(client: &Client, search: &str) -> bool {
    client
        .full_name
        .to_lowercase()
        .contains(&search.trim().to_lowercase())
}

/// WhatsApp chat link for a Colombian phone number
pub fn whatsapp_link(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!("https://wa.me/57{digits}"))
}

/// One row of a loans table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanRow {
    pub id: EntityId,
    pub client: String,
    pub amount: String,
    pub interest: String,
    pub installments: String,
    pub installment_amount: String,
    pub payment_type: &'static str,
    pub balance: String,
    pub start_date: String,
    pub end_date: String,
    pub status: &'static str,
    pub frequency: String,
}

impl LoanRow {
    fn new(snapshot: &DashboardSnapshot, loan: &Loan) -> Self {
        Self {
            id: loan.id.clone(),
            client: snapshot
                .client(&loan.client_id)
                .map_or_else(|| CLIENT_NOT_FOUND.to_string(), |c| c.full_name.clone()),
            amount: format_currency(loan.principal_amount),
            interest: snapshot
                .interest_rate(&loan.interest_rate_id)
                .map(|rate| format!("{}%", rate.percentage))
                .unwrap_or_default(),
            installments: match loan.num_cuotes {
                0 => "--".to_string(),
                n => n.to_string(),
            },
            installment_amount: format_currency(loan.cuote),
            payment_type: match loan.loan_type {
                LoanType::InterestOnly => "Interest",
                LoanType::FixedInstallment => "Interest + Principal",
            },
            balance: format_currency(loan.current_balance),
            start_date: format_date(loan.start_date),
            end_date: format_date(loan.end_date),
            status: loan.status.label(),
            frequency: snapshot
                .payment_period(&loan.payment_period_id)
                .map_or_else(|| FREQUENCY_NOT_FOUND.to_string(), |p| p.name.clone()),
        }
    }
}

/// One row of the clients table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRow {
    pub id: EntityId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub whatsapp: Option<String>,
    pub can_edit: bool,
    /// Only offered while the client has no active loans
    pub can_delete: bool,
}

/// One row of the payments table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRow {
    pub id: EntityId,
    pub client: String,
    pub amount: String,
    pub date: String,
    pub interest: String,
    pub capital: String,
    pub remaining: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub active_loans: usize,
    pub outstanding_balance: String,
    pub payments_collected: String,
    pub loan_count: Option<u64>,
    pub loan_total_amount: Option<String>,
    pub monthly_payments: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::models::User;
    use chrono::NaiveDate;
    use common::models::{InterestRate, LoanStatus, Payment, PaymentPeriod};

    fn session(role: Option<Role>) -> Session {
        let mut session = Session::new();
        session.sign_in(User {
            id: EntityId::from(1),
            name: "Diana".to_string(),
            username: "diana".to_string(),
            phone: None,
            role,
            created_at: None,
        });
        session
    }

    fn client(id: i64, name: &str, phone: &str) -> Client {
        Client {
            id: EntityId::from(id),
            full_name: name.to_string(),
            phone: phone.to_string(),
            address: "Cra 7 # 12-30".to_string(),
        }
    }

    fn loan(id: i64, client_id: i64, status: LoanStatus, num_cuotes: u64) -> Loan {
        Loan {
            id: EntityId::from(id),
            client_id: EntityId::from(client_id),
            user_id: EntityId::from(1),
            loan_type: LoanType::InterestOnly,
            principal_amount: 2_000_000.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            interest_rate_id: EntityId::from(1),
            payment_period_id: EntityId::from(9),
            cuote: 100_000.0,
            num_cuotes,
            current_balance: 1_250_000.0,
            status,
            created_at: None,
        }
    }

    fn snapshot() -> Arc<DashboardSnapshot> {
        Arc::new(DashboardSnapshot {
            loans: vec![
                loan(1, 1, LoanStatus::Active, 0),
                loan(2, 2, LoanStatus::Terminated, 6),
                loan(3, 99, LoanStatus::Active, 6),
            ],
            clients: vec![
                client(1, "Pedro Ramírez", "300 123-4567"),
                client(2, "Lucía Ramos", ""),
            ],
            payments: vec![Payment {
                id: EntityId::from(50),
                loan_id: EntityId::from(1),
                amount: 100_000.0,
                interest_pay: 100_000.0,
                capital_pay: 0.0,
                remaining: 2_000_000.0,
                payment_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
                notes: "Efectivo".to_string(),
                created_at: None,
            }],
            interest_rates: vec![InterestRate {
                id: EntityId::from(1),
                percentage: 5.0,
                description: "Standard".to_string(),
                is_active: true,
                created_at: None,
            }],
            payment_periods: vec![PaymentPeriod {
                id: EntityId::from(9),
                name: "Monthly".to_string(),
                days: 30,
                is_active: true,
                created_at: None,
            }],
            loans_this_week: Some(vec![loan(1, 1, LoanStatus::Active, 0), loan(3, 99, LoanStatus::Active, 6)]),
            ..Default::default()
        })
    }

    fn kinds(view: &DashboardView) -> Vec<TabKind> {
        view.tabs.iter().map(|tab| tab.kind).collect()
    }

    #[test]
    fn test_tabs_per_role() {
        let ready = FetchState::Ready(snapshot());

        let admin = DashboardView::compose(&session(Some(Role::Admin)), &ready, Some(snapshot()));
        assert_eq!(kinds(&admin), TabKind::ALL.to_vec());
        assert!(admin.tab(TabKind::Clients).unwrap().can_create);
        assert!(!admin.tab(TabKind::Debts).unwrap().can_create);

        let collector =
            DashboardView::compose(&session(Some(Role::Collector)), &ready, Some(snapshot()));
        assert_eq!(
            kinds(&collector),
            vec![TabKind::Loans, TabKind::Clients, TabKind::Payments, TabKind::Reports]
        );
        assert!(collector.tab(TabKind::Loans).unwrap().can_create);
        assert!(!collector.tab(TabKind::Clients).unwrap().can_create);

        let client = DashboardView::compose(&session(Some(Role::Client)), &ready, Some(snapshot()));
        assert_eq!(kinds(&client), vec![TabKind::Loans, TabKind::Payments]);
        assert!(!client.tab(TabKind::Payments).unwrap().can_create);
    }

    #[test]
    fn test_no_role_sees_nothing() {
        let view = DashboardView::compose(&session(None), &FetchState::Idle, None);
        assert!(view.tabs.is_empty());

        let view = DashboardView::compose(&Session::new(), &FetchState::Idle, None);
        assert!(view.tabs.is_empty());
        assert_eq!(view.user_name, None);
    }

    #[test]
    fn test_failed_state_marks_last_good_as_stale() {
        let failed = FetchState::Failed("Error loading dashboard data: payments: timeout".into());
        let admin = session(Some(Role::Admin));

        let view = DashboardView::compose(&admin, &failed, Some(snapshot()));
        assert!(view.stale);
        assert_eq!(view.error.as_deref(), Some("Error loading dashboard data: payments: timeout"));
        assert_eq!(view.snapshot().clients.len(), 2);

        let view = DashboardView::compose(&admin, &failed, None);
        assert!(!view.stale);
        assert!(view.error.is_some());

        let view = DashboardView::compose(&admin, &FetchState::Loading, Some(snapshot()));
        assert!(view.loading);
        assert!(!view.stale);
        assert_eq!(view.error, None);
    }

    #[test]
    fn test_loan_rows() {
        let view = DashboardView::compose(
            &session(Some(Role::Admin)),
            &FetchState::Ready(snapshot()),
            Some(snapshot()),
        );
        let rows = view.loan_rows();

        assert_eq!(rows[0].client, "Pedro Ramírez");
        assert_eq!(rows[0].amount, "$2.000.000");
        assert_eq!(rows[0].interest, "5%");
        assert_eq!(rows[0].installments, "--");
        assert_eq!(rows[0].payment_type, "Interest");
        assert_eq!(rows[0].start_date, "15-01-2024");
        assert_eq!(rows[0].frequency, "Monthly");
        assert_eq!(rows[1].installments, "6");
        assert_eq!(rows[1].status, "Inactive");
        assert_eq!(rows[2].client, "Client not found");
    }

    #[test]
    fn test_weekly_loan_rows_search_by_client_name() {
        let view = DashboardView::compose(
            &session(Some(Role::Collector)),
            &FetchState::Ready(snapshot()),
            Some(snapshot()),
        );

        assert_eq!(view.weekly_loan_rows("").len(), 1);
        assert_eq!(view.weekly_loan_rows("PEDRO").len(), 1);
        assert!(view.weekly_loan_rows("lucía").is_empty());
    }

    #[test]
    fn test_client_rows_actions_and_search() {
        let admin = DashboardView::compose(
            &session(Some(Role::Admin)),
            &FetchState::Ready(snapshot()),
            Some(snapshot()),
        );
        let rows = admin.client_rows("");

        assert_eq!(rows[0].whatsapp.as_deref(), Some("https://wa.me/573001234567"));
        assert!(rows[0].can_edit);
        assert!(!rows[0].can_delete, "client with an active loan");
        assert_eq!(rows[1].whatsapp, None);
        assert!(rows[1].can_delete);

        let found = admin.client_rows("  RAM");
        assert_eq!(found.len(), 2);
        let found = admin.client_rows("lucía");
        assert_eq!(found.len(), 1);

        let collector = DashboardView::compose(
            &session(Some(Role::Collector)),
            &FetchState::Ready(snapshot()),
            Some(snapshot()),
        );
        let rows = collector.client_rows("");
        assert!(rows.iter().all(|row| !row.can_edit && !row.can_delete));
    }

    #[test]
    fn test_payment_rows_resolve_client_through_loan() {
        let view = DashboardView::compose(
            &session(Some(Role::Admin)),
            &FetchState::Ready(snapshot()),
            Some(snapshot()),
        );
        let rows = view.payment_rows();

        assert_eq!(rows[0].client, "Pedro Ramírez");
        assert_eq!(rows[0].amount, "$100.000");
        assert_eq!(rows[0].date, "15-Feb-2024");
        assert_eq!(rows[0].capital, "$0");
    }

    #[test]
    fn test_report() {
        let view = DashboardView::compose(
            &session(Some(Role::Admin)),
            &FetchState::Ready(snapshot()),
            Some(snapshot()),
        );
        let report = view.report();

        assert_eq!(report.active_loans, 2);
        assert_eq!(report.outstanding_balance, "$2.500.000");
        assert_eq!(report.payments_collected, "$100.000");
        assert_eq!(report.loan_count, None);
        assert!(report.monthly_payments.is_empty());
    }
}
