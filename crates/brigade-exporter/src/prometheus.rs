//! Prometheus text exposition format.
//!
//! Renders the exporter's gauge set into the text format served at
//! `/metrics`. Rendering only reads gauge values; the scrape tasks keep
//! writing concurrently.

use crate::exporter::ExporterGauges;
use crate::gauge::{Gauge, GaugeVec};

/// Render the full gauge set into Prometheus text format.
pub fn render(gauges: &ExporterGauges) -> String {
    let mut out = String::new();
    render_gauge(&mut out, &gauges.projects_total);
    render_gauge(&mut out, &gauges.users_total);
    render_gauge(&mut out, &gauges.service_accounts_total);
    render_gauge_vec(&mut out, &gauges.events_by_worker_phase);
    render_gauge(&mut out, &gauges.pending_jobs_total);
    out
}

fn render_gauge(out: &mut String, gauge: &Gauge) {
    out.push_str(&format!("# HELP {} {}\n", gauge.name(), gauge.help()));
    out.push_str(&format!("# TYPE {} gauge\n", gauge.name()));
    out.push_str(&format!("{} {}\n", gauge.name(), gauge.get()));
}

fn render_gauge_vec(out: &mut String, vec: &GaugeVec) {
    out.push_str(&format!("# HELP {} {}\n", vec.name(), vec.help()));
    out.push_str(&format!("# TYPE {} gauge\n", vec.name()));
    for (label_value, value) in vec.snapshot() {
        out.push_str(&format!(
            "{}{{{}=\"{}\"}} {}\n",
            vec.name(),
            vec.label(),
            label_value,
            value
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gauges() -> ExporterGauges {
        ExporterGauges {
            projects_total: Gauge::new("brigade_projects_total", "The total number of projects"),
            users_total: Gauge::new("brigade_users_total", "The total number of users"),
            service_accounts_total: Gauge::new(
                "brigade_service_accounts_total",
                "The total number of service accounts",
            ),
            events_by_worker_phase: GaugeVec::new(
                "brigade_events_by_worker_phase",
                "All workers separated by phase",
                "workerPhase",
            ),
            pending_jobs_total: Gauge::new(
                "brigade_pending_jobs_total",
                "The total number of pending jobs",
            ),
        }
    }

    #[test]
    fn render_has_help_and_type_for_every_family() {
        let text = render(&test_gauges());
        for name in [
            "brigade_projects_total",
            "brigade_users_total",
            "brigade_service_accounts_total",
            "brigade_events_by_worker_phase",
            "brigade_pending_jobs_total",
        ] {
            assert!(text.contains(&format!("# HELP {name} ")), "missing HELP {name}");
            assert!(
                text.contains(&format!("# TYPE {name} gauge\n")),
                "missing TYPE {name}"
            );
        }
    }

    #[test]
    fn render_scalar_samples() {
        let gauges = test_gauges();
        gauges.projects_total.set(42.0);
        gauges.pending_jobs_total.set(3.0);

        let text = render(&gauges);
        assert!(text.contains("brigade_projects_total 42\n"));
        assert!(text.contains("brigade_pending_jobs_total 3\n"));
        assert!(text.contains("brigade_users_total 0\n"));
    }

    #[test]
    fn render_vector_samples_with_label() {
        let gauges = test_gauges();
        gauges.events_by_worker_phase.set("RUNNING", 5.0);
        gauges.events_by_worker_phase.set("FAILED", 1.0);

        let text = render(&gauges);
        assert!(text.contains("brigade_events_by_worker_phase{workerPhase=\"RUNNING\"} 5\n"));
        assert!(text.contains("brigade_events_by_worker_phase{workerPhase=\"FAILED\"} 1\n"));
    }

    #[test]
    fn render_sample_lines_are_well_formed() {
        let gauges = test_gauges();
        gauges.events_by_worker_phase.set("RUNNING", 5.0);

        for line in render(&gauges).lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, value) = line.rsplit_once(' ').expect("sample line has a value");
            assert!(name.starts_with("brigade_"), "unexpected metric: {line}");
            value.parse::<f64>().expect("sample value parses as f64");
        }
    }
}
