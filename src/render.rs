//! Render query reports as display text or the JSON exchange format.

use crate::models::report::QueryReport;
use crate::Result;

/// Format a report as human-readable text, one line per result row.
///
/// Used as the fallback presentation when no downstream response layer is
/// attached.
#[must_use]
pub fn format_report(report: &QueryReport) -> String {
    match report {
        QueryReport::Count {
            total, breakdown, ..
        } => {
            let mut out = format!("**Total Tickets**: {total}\n");
            if !breakdown.is_empty() {
                out.push_str("\n**Breakdown**:\n");
                for row in breakdown {
                    out.push_str(&format!(
                        "- {} ({}): {}\n",
                        row.status, row.priority, row.count
                    ));
                }
            }
            out
        }
        QueryReport::Trend { trend_data } => {
            let mut out = String::from("**Created Tickets**:\n");
            for point in trend_data {
                out.push_str(&format!(
                    "- {} {}: {}\n",
                    point.date, point.status, point.count
                ));
            }
            out
        }
        QueryReport::Average {
            avg_resolution_hours,
            total_resolved,
        } => {
            format!(
                "**Average Resolution Time**: {avg_resolution_hours:.1} hours \
                 ({total_resolved} resolved)\n"
            )
        }
        QueryReport::Sla { sla_metrics } => {
            let mut out = String::from("**SLA Metrics**:\n");
            for row in sla_metrics {
                let rate = percent(row.met_sla, row.total_tickets);
                out.push_str(&format!(
                    "- {}: {rate:.1}% met SLA ({}/{})\n",
                    row.priority, row.met_sla, row.total_tickets
                ));
            }
            out
        }
        QueryReport::Assignee { assignee_stats } => {
            let mut out = String::from("**Assignee Workload**:\n");
            for row in assignee_stats {
                out.push_str(&format!(
                    "- {}: {} total, {} open\n",
                    row.assignee, row.total_tickets, row.open_tickets
                ));
            }
            out
        }
        QueryReport::Performance {
            performance_metrics,
        } => {
            let mut out = String::from("**Performance (avg resolution hours)**:\n");
            for row in performance_metrics {
                out.push_str(&format!(
                    "- {} ({}): {:.1}h\n",
                    row.category, row.priority, row.avg_resolution_hours
                ));
            }
            out
        }
        QueryReport::General { summary } => {
            let mut out = String::from("**Ticket Summary**:\n");
            for row in summary {
                out.push_str(&format!(
                    "- {} ({}, {}): {}\n",
                    row.status, row.priority, row.category, row.count
                ));
            }
            out
        }
    }
}

/// Serialize a report to the pretty-printed JSON exchange format.
///
/// # Errors
///
/// Returns `AppError::Encode` if serialization fails.
pub fn to_json_string(report: &QueryReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[allow(clippy::cast_precision_loss)] // ticket counts sit far below 2^52
fn percent(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
