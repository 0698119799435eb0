//! The periodic-scrape engine.
//!
//! One [`MetricsExporter`] owns the gauge set and the two API facets. Its
//! [`start`](MetricsExporter::start) spawns one timer-driven task per
//! metric family; each task refreshes its gauge on every tick and logs
//! (never propagates) fetch failures. A failed tick leaves the gauge at
//! its last successfully observed value.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use brigade_sdk::{
    ApiError, EventsSelector, JobPhase, ListOptions, ProjectsSelector, ServiceAccountsSelector,
    UsersSelector, WorkerPhase,
};

use crate::api::{AuthnApi, CoreApi};
use crate::gauge::{Gauge, GaugeVec};

/// The five gauges the exporter publishes.
///
/// Created once at engine construction and shared with the serving layer;
/// each gauge is written by exactly one scrape routine.
pub struct ExporterGauges {
    pub projects_total: Gauge,
    pub users_total: Gauge,
    pub service_accounts_total: Gauge,
    pub events_by_worker_phase: GaugeVec,
    pub pending_jobs_total: Gauge,
}

impl ExporterGauges {
    fn new() -> Self {
        let events_by_worker_phase = GaugeVec::new(
            "brigade_events_by_worker_phase",
            "All workers separated by phase",
            "workerPhase",
        );
        // Pre-create every phase entry so the exposition is complete
        // before the first successful tick.
        for phase in WorkerPhase::all() {
            events_by_worker_phase.set(phase.as_str(), 0.0);
        }

        Self {
            projects_total: Gauge::new(
                "brigade_projects_total",
                "The total number of brigade projects",
            ),
            users_total: Gauge::new("brigade_users_total", "The total number of users"),
            service_accounts_total: Gauge::new(
                "brigade_service_accounts_total",
                "The total number of service accounts",
            ),
            events_by_worker_phase,
            pending_jobs_total: Gauge::new(
                "brigade_pending_jobs_total",
                "The total number of pending jobs",
            ),
        }
    }
}

/// Periodically scrapes aggregate counts from the Brigade API and
/// republishes them as gauges.
pub struct MetricsExporter<C, A> {
    core: Arc<C>,
    authn: Arc<A>,
    scrape_interval: Duration,
    gauges: Arc<ExporterGauges>,
}

impl<C, A> Clone for MetricsExporter<C, A> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            authn: self.authn.clone(),
            scrape_interval: self.scrape_interval,
            gauges: self.gauges.clone(),
        }
    }
}

impl<C: CoreApi, A: AuthnApi> MetricsExporter<C, A> {
    /// Create an exporter over the two API facets.
    ///
    /// Caller contract: `scrape_interval` is strictly positive.
    pub fn new(core: C, authn: A, scrape_interval: Duration) -> Self {
        Self {
            core: Arc::new(core),
            authn: Arc::new(authn),
            scrape_interval,
            gauges: Arc::new(ExporterGauges::new()),
        }
    }

    /// A shared handle to the gauge set, for the serving layer.
    pub fn gauges(&self) -> Arc<ExporterGauges> {
        self.gauges.clone()
    }

    /// Render the current gauge values in Prometheus text format.
    pub fn render(&self) -> String {
        crate::prometheus::render(&self.gauges)
    }

    /// Spawn one scrape task per metric family.
    ///
    /// Each task ticks on the shared scrape interval and exits promptly
    /// once `shutdown` flips. Returns the task handles so the caller can
    /// await them after requesting shutdown.
    pub fn start(&self, shutdown: &watch::Receiver<bool>) -> Vec<JoinHandle<()>> {
        info!(
            interval_secs = self.scrape_interval.as_secs(),
            "metrics exporter started"
        );

        vec![
            self.spawn_family("projects_total", shutdown.clone(), |this| async move {
                this.record_projects_total().await
            }),
            self.spawn_family("users_total", shutdown.clone(), |this| async move {
                this.record_users_total().await
            }),
            self.spawn_family(
                "service_accounts_total",
                shutdown.clone(),
                |this| async move { this.record_service_accounts_total().await },
            ),
            self.spawn_family(
                "events_by_worker_phase",
                shutdown.clone(),
                |this| async move { this.record_workers_by_phase().await },
            ),
            self.spawn_family("pending_jobs_total", shutdown.clone(), |this| async move {
                this.record_pending_jobs_total().await
            }),
        ]
    }

    fn spawn_family<F, Fut>(
        &self,
        family: &'static str,
        mut shutdown: watch::Receiver<bool>,
        fetch: F,
    ) -> JoinHandle<()>
    where
        F: Fn(Self) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        let this = self.clone();
        let interval = this.scrape_interval;
        tokio::spawn(async move {
            debug!(family, "scrape loop started");
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        if let Err(e) = fetch(this.clone()).await {
                            warn!(family, error = %e, "metric scrape failed");
                        }
                    }
                    _ = shutdown.changed() => {
                        debug!(family, "scrape loop shutting down");
                        break;
                    }
                }
            }
        })
    }

    /// Refresh `brigade_projects_total` from a single unpaginated listing.
    async fn record_projects_total(&self) -> Result<(), ApiError> {
        let projects = self
            .core
            .list_projects(&ProjectsSelector::default(), &ListOptions::default())
            .await?;
        self.gauges.projects_total.set(projects.total() as f64);
        Ok(())
    }

    /// Refresh `brigade_users_total`.
    async fn record_users_total(&self) -> Result<(), ApiError> {
        let users = self
            .authn
            .list_users(&UsersSelector::default(), &ListOptions::default())
            .await?;
        self.gauges.users_total.set(users.total() as f64);
        Ok(())
    }

    /// Refresh `brigade_service_accounts_total`.
    async fn record_service_accounts_total(&self) -> Result<(), ApiError> {
        let accounts = self
            .authn
            .list_service_accounts(&ServiceAccountsSelector::default(), &ListOptions::default())
            .await?;
        self.gauges
            .service_accounts_total
            .set(accounts.total() as f64);
        Ok(())
    }

    /// Refresh one `brigade_events_by_worker_phase` entry per phase.
    ///
    /// The first failed phase aborts the rest of the tick; entries already
    /// written stay as written until the next tick.
    async fn record_workers_by_phase(&self) -> Result<(), ApiError> {
        for phase in WorkerPhase::all() {
            let selector = EventsSelector {
                worker_phases: vec![*phase],
            };
            let events = self
                .core
                .list_events(&selector, &ListOptions::default())
                .await?;
            self.gauges
                .events_by_worker_phase
                .set(phase.as_str(), events.total() as f64);
        }
        Ok(())
    }

    /// Refresh `brigade_pending_jobs_total`.
    ///
    /// The API has no direct query for pending jobs, but only running
    /// workers can have them, so this enumerates every event in the
    /// running phase — following the continuation cursor across pages —
    /// and counts jobs in the pending phase. An error on any page aborts
    /// the tick without touching the gauge.
    async fn record_pending_jobs_total(&self) -> Result<(), ApiError> {
        let selector = EventsSelector {
            worker_phases: vec![WorkerPhase::Running],
        };
        let mut opts = ListOptions::default();
        let mut pending_jobs: u64 = 0;

        loop {
            let events = self.core.list_events(&selector, &opts).await?;
            for event in &events.items {
                for job in &event.worker.jobs {
                    if job.status.phase == JobPhase::Pending {
                        pending_jobs += 1;
                    }
                }
            }
            match events.continue_token() {
                Some(token) => opts.continue_token = Some(token.to_string()),
                None => break,
            }
        }

        self.gauges.pending_jobs_total.set(pending_jobs as f64);
        Ok(())
    }
}
