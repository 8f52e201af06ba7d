//! ProfileDashboard - holds the latest view-model and the loading flag.
//!
//! Each refresh is a cycle with its own cancellation channel and generation
//! number. Starting a cycle cancels the one before it, and a cycle commits
//! only if its generation is still the newest, so a slow stale cycle can
//! never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex, RwLock};

use crate::domain::profile::{ProfileViewModel, ReportingPeriod};
use crate::ports::SessionProvider;

use super::aggregate_profile::{AggregationReport, ProfileAggregator};
use super::errors::{AggregationError, FieldDiagnostic, OutcomeKind};

/// What renderers see.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub view: ProfileViewModel,
    pub loading: bool,
    pub period: ReportingPeriod,
    pub last_outcome: Option<OutcomeKind>,
    pub last_error: Option<AggregationError>,
    pub diagnostics: Vec<FieldDiagnostic>,
    /// Generation of the cycle that last committed.
    pub generation: u64,
}

/// How a refresh ended from the dashboard's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleResult {
    Committed(OutcomeKind),
    /// A newer cycle started first; nothing was written.
    Superseded,
}

pub struct ProfileDashboard {
    aggregator: ProfileAggregator,
    session: Arc<dyn SessionProvider>,
    state: RwLock<DashboardState>,
    generation: AtomicU64,
    cancel: Mutex<Option<watch::Sender<bool>>>,
}

impl ProfileDashboard {
    pub fn new(aggregator: ProfileAggregator, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            aggregator,
            session,
            state: RwLock::new(DashboardState::default()),
            generation: AtomicU64::new(0),
            cancel: Mutex::new(None),
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Switches the reporting period and starts a new cycle for it.
    pub async fn select_period(&self, period: ReportingPeriod) -> CycleResult {
        self.state.write().await.period = period;
        self.refresh().await
    }

    /// Sign-in, sign-out, or account switch.
    pub async fn identity_changed(&self) -> CycleResult {
        self.refresh().await
    }

    /// Runs one cycle for the current period, cancelling any cycle in flight.
    pub async fn refresh(&self) -> CycleResult {
        let (generation, mut cancelled, period) = self.begin_cycle().await;

        let report = tokio::select! {
            report = self.aggregator.aggregate(self.session.as_ref(), period) => report,
            _ = wait_for_cancel(&mut cancelled) => {
                tracing::debug!(generation, "Profile cycle cancelled by a newer cycle");
                return CycleResult::Superseded;
            }
        };

        self.commit(generation, report).await
    }

    async fn begin_cycle(&self) -> (u64, watch::Receiver<bool>, ReportingPeriod) {
        let (tx, rx) = watch::channel(false);

        // Generation bump and `loading = true` share one critical section, so
        // a newer cycle cannot commit between them and leave loading stuck.
        let mut cancel = self.cancel.lock().await;
        let mut state = self.state.write().await;
        if let Some(previous) = cancel.replace(tx) {
            // The previous cycle may already have finished; nobody listening is fine.
            let _ = previous.send(true);
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        state.loading = true;
        (generation, rx, state.period)
    }

    async fn commit(&self, generation: u64, report: AggregationReport) -> CycleResult {
        let mut state = self.state.write().await;

        // Checked under the state lock so a newer cycle cannot slip in between.
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, cycle_id = %report.cycle_id, "Discarding superseded profile cycle");
            return CycleResult::Superseded;
        }

        let kind = report.outcome.kind();
        state.view = report.view;
        state.period = report.period;
        state.last_outcome = Some(kind);
        state.last_error = report.outcome.error().cloned();
        state.diagnostics = report.diagnostics;
        state.generation = generation;
        state.loading = false;

        tracing::debug!(generation, cycle_id = %report.cycle_id, outcome = ?kind, "Committed profile cycle");
        CycleResult::Committed(kind)
    }
}

async fn wait_for_cancel(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow() {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone without cancelling: never fires.
            std::future::pending::<()>().await;
        }
    }
}
