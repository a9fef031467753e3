use shared::types::{Admin, AdminRole, Client, DashboardCounts, Exam, Principal, StatCard, StatKind};
use tracing::{info, warn};

use crate::api::Backend;
use crate::auth::AuthService;
use crate::pages::mount::Mount;

/// Stat cards for a principal. Superadmin-only slots are absent, not zeroed,
/// for everybody else.
pub fn compose_stats(principal: &Principal, counts: &DashboardCounts) -> Vec<StatCard> {
    let mut cards = vec![
        StatCard::count(StatKind::Exams, counts.exams),
        StatCard::count(StatKind::Users, counts.users),
    ];

    match principal {
        Principal::Admin {
            role: AdminRole::SuperAdmin,
        } => {
            cards.push(StatCard::count(StatKind::Clients, counts.clients));
            cards.push(StatCard::amount(StatKind::Balance, counts.total_balance));
        }
        Principal::Admin {
            role: AdminRole::Admin,
        }
        | Principal::Client => {}
    }

    cards
}

/// Fetch the numbers behind the stat cards. A failed sub-fetch leaves its
/// statistic at zero instead of failing the page. Admin accounts are only
/// listed for admins, client data only for superadmins.
pub async fn gather_counts<B: Backend>(
    backend: &B,
    token: &str,
    principal: &Principal,
) -> DashboardCounts {
    let mut counts = DashboardCounts::empty();

    match backend.list::<Exam>(token).await {
        Ok(exams) => counts.exams = exams.len() as u64,
        Err(e) => warn!("Exam count unavailable: {}", e),
    }

    // The admins collection is closed to client tokens; their Users card
    // stays at zero.
    if let Principal::Admin { .. } = principal {
        match backend.list::<Admin>(token).await {
            Ok(admins) => counts.users = admins.len() as u64,
            Err(e) => warn!("User count unavailable: {}", e),
        }
    }

    if let Principal::Admin {
        role: AdminRole::SuperAdmin,
    } = principal
    {
        match backend.list::<Client>(token).await {
            Ok(clients) => {
                counts.clients = clients.len() as u64;
                counts.total_balance = clients.iter().map(|c| c.balance).sum();
            }
            Err(e) => warn!("Client statistics unavailable: {}", e),
        }
    }

    counts
}

/// The landing page after login.
#[derive(Debug, Default)]
pub struct DashboardPage {
    pub mount: Mount,
    pub stats: Vec<StatCard>,
    pub loading: bool,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the guard, then load statistics if it let us through.
    pub async fn open<B: Backend>(&mut self, auth: &AuthService, backend: &B) {
        if self.loading {
            return;
        }

        self.mount = Mount::resolve(auth);
        let Some(principal) = self.mount.context().map(|ctx| ctx.principal) else {
            self.stats.clear();
            return;
        };
        let Some(token) = auth.token() else {
            return;
        };

        self.loading = true;
        let counts = gather_counts(backend, &token, &principal).await;
        self.stats = compose_stats(&principal, &counts);
        self.loading = false;

        info!("Dashboard ready with {} stat cards", self.stats.len());
    }
}
