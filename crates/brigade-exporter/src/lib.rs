//! brigade-exporter — the periodic-scrape engine behind the metrics daemon.
//!
//! Polls a Brigade API server on a fixed interval and republishes aggregate
//! counts as last-known-value gauges.
//!
//! # Architecture
//!
//! ```text
//! MetricsExporter
//!   ├── owns ExporterGauges (four scalars + one workerPhase vector)
//!   ├── start() → five independent timer-driven scrape tasks
//!   │     each: fetch → set gauge, or log and wait for the next tick
//!   └── render() → Prometheus text for the /metrics endpoint
//! ```
//!
//! The engine is generic over the [`CoreApi`] and [`AuthnApi`] capabilities
//! so tests can substitute scripted clients; the real implementations live
//! on `brigade-sdk`'s client facets.

pub mod api;
pub mod exporter;
pub mod gauge;
pub mod prometheus;

pub use api::{AuthnApi, CoreApi};
pub use exporter::{ExporterGauges, MetricsExporter};
pub use gauge::{Gauge, GaugeVec};
pub use prometheus::render;
