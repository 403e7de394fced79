//! # Dashboard data
//!
//! Four independent widgets, each fed by its own request so one failing
//! endpoint only empties its own widget:
//!
//! | Widget | Source | Derivation |
//! |--------|--------|------------|
//! | Summary stats | `GET /dashboard/summary` | none; any error shows zeros |
//! | Overdue controls | `GET /controls/activated` | [`overdue_controls`] |
//! | Recent activity | `GET /audit/logs?limit=10` | first [`RECENT_ACTIVITY_LIMIT`] |
//! | Compliance by standard | library + activated | [`standard_progress`] |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::SessionContext;

use crate::client::{Auth, GrcClient};
use crate::controls::{ActivatedControl, LibraryControl};
use crate::error::ApiError;
use crate::transport::HttpTransport;

pub const OVERDUE_LIMIT: usize = 5;
pub const STANDARD_PROGRESS_LIMIT: usize = 5;
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

const UNCATEGORISED_STANDARD: &str = "Other";

/// Summary counters. Every field is required; a body missing one is malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_controls: u64,
    pub activated_controls: u64,
    pub overdue_controls: u64,
    pub total_tickets: u64,
}

impl DashboardStats {
    /// Labelled values in display order.
    pub fn fields(&self) -> [(&'static str, u64); 4] {
        [
            ("Total Controls", self.total_controls),
            ("Activated Controls", self.activated_controls),
            ("Overdue Controls", self.overdue_controls),
            ("Total Tickets", self.total_tickets),
        ]
    }

    /// Collapse a fetch result into displayable stats, zeroed on any error.
    pub fn or_zeroed(result: &Result<Self, ApiError>) -> Self {
        match result {
            Ok(stats) => *stats,
            Err(e) => {
                tracing::warn!("Dashboard summary unavailable: {}", e);
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub action_type: String,
    #[serde(default)]
    pub target_entity_type: Option<String>,
    pub performed_at: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl AuditEvent {
    /// `CONTROL_ACTIVATED` → `CONTROL ACTIVATED`.
    pub fn action_label(&self) -> String {
        self.action_type.replace('_', " ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverdueControl {
    pub id: String,
    pub control_id: String,
    pub control_name: String,
    pub owner_name: Option<String>,
    pub days_overdue: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardProgress {
    pub standard: String,
    pub total_controls: u32,
    pub activated_controls: u32,
    pub compliant_controls: u32,
    pub percentage: f64,
}

/// Controls past their review date, most overdue first, at most [`OVERDUE_LIMIT`].
pub fn overdue_controls(controls: &[ActivatedControl], now: DateTime<Utc>) -> Vec<OverdueControl> {
    let mut overdue: Vec<OverdueControl> = controls
        .iter()
        .filter_map(|c| {
            let due = c.next_review_due_date?;
            (due < now).then(|| OverdueControl {
                id: c.id.clone(),
                control_id: c.control_id.clone(),
                control_name: c.control_name.clone(),
                owner_name: c.owner_name.clone(),
                days_overdue: (now - due).num_days(),
            })
        })
        .collect();

    overdue.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    overdue.truncate(OVERDUE_LIMIT);
    overdue
}

/// Missing and empty standards both group under [`UNCATEGORISED_STANDARD`].
fn standard_name(standard: Option<&str>) -> &str {
    standard
        .filter(|s| !s.is_empty())
        .unwrap_or(UNCATEGORISED_STANDARD)
}

/// Compliance per standard, best first, at most [`STANDARD_PROGRESS_LIMIT`].
///
/// Activated controls only count toward standards that exist in the library.
pub fn standard_progress(
    library: &[LibraryControl],
    activated: &[ActivatedControl],
) -> Vec<StandardProgress> {
    let mut progress: Vec<StandardProgress> = Vec::new();

    for control in library {
        let standard = standard_name(control.standard.as_deref());
        match progress.iter_mut().find(|p| p.standard == standard) {
            Some(entry) => entry.total_controls += 1,
            None => progress.push(StandardProgress {
                standard: standard.to_string(),
                total_controls: 1,
                activated_controls: 0,
                compliant_controls: 0,
                percentage: 0.0,
            }),
        }
    }

    for control in activated {
        let standard = standard_name(control.standard.as_deref());
        if let Some(entry) = progress.iter_mut().find(|p| p.standard == standard) {
            entry.activated_controls += 1;
            if control.is_compliant() {
                entry.compliant_controls += 1;
            }
        }
    }

    for entry in &mut progress {
        entry.percentage = if entry.total_controls > 0 {
            f64::from(entry.compliant_controls) / f64::from(entry.total_controls) * 100.0
        } else {
            0.0
        };
    }

    // Stable sort keeps library order among equal percentages.
    progress.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    progress.truncate(STANDARD_PROGRESS_LIMIT);
    progress
}

/// Relative time for activity feeds: "Just now", "5m ago", "3h ago", "2d ago".
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86_400)
    }
}

/// [`format_time_ago`] for a raw backend timestamp; unparseable input is echoed.
pub fn format_timestamp_ago(raw: &str, now: DateTime<Utc>) -> String {
    match crate::controls::parse_timestamp(raw) {
        Some(then) => format_time_ago(then, now),
        None => raw.to_string(),
    }
}

impl<T: HttpTransport> GrcClient<T> {
    pub async fn dashboard_summary(
        &self,
        session: &SessionContext,
    ) -> Result<DashboardStats, ApiError> {
        self.get("/dashboard/summary", Auth::Session(session)).await
    }

    pub async fn recent_activity(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<AuditEvent>, ApiError> {
        let mut events: Vec<AuditEvent> = self
            .get(
                &format!("/audit/logs?limit={RECENT_ACTIVITY_LIMIT}"),
                Auth::Session(session),
            )
            .await?;
        events.truncate(RECENT_ACTIVITY_LIMIT);
        Ok(events)
    }

    pub async fn overdue_controls(
        &self,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<Vec<OverdueControl>, ApiError> {
        let controls = self.activated_controls(session).await?;
        Ok(overdue_controls(&controls, now))
    }

    /// Needs both lists; either failing fails the widget.
    pub async fn standard_progress(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<StandardProgress>, ApiError> {
        let library = self.control_library(session).await?;
        let activated = self.activated_controls(session).await?;
        Ok(standard_progress(&library, &activated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, RecordingTransport};
    use chrono::{Duration, TimeZone};
    use store::{ClientConfig, Credential, Principal, Role};

    fn session() -> SessionContext {
        SessionContext::new(
            Credential::new("tok"),
            Some(Principal {
                id: "u-1".to_string(),
                email: String::new(),
                name: String::new(),
                role: Role::User,
                onboarding_completed: true,
            }),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_summary_values_shown_as_given() {
        let transport = RecordingTransport::new();
        transport.respond(
            Method::Get,
            "/dashboard/summary",
            200,
            r#"{"totalControls":25,"activatedControls":15,"overdueControls":3,"totalTickets":8}"#,
        );
        let client = GrcClient::new(transport, &ClientConfig::default());

        let result = client.dashboard_summary(&session()).await;
        let stats = DashboardStats::or_zeroed(&result);
        assert_eq!(
            stats.fields(),
            [
                ("Total Controls", 25),
                ("Activated Controls", 15),
                ("Overdue Controls", 3),
                ("Total Tickets", 8),
            ]
        );
    }

    #[tokio::test]
    async fn test_summary_server_error_shows_zeros() {
        let transport = RecordingTransport::new();
        transport.respond(
            Method::Get,
            "/dashboard/summary",
            500,
            r#"{"error":"Internal Server Error"}"#,
        );
        let client = GrcClient::new(transport, &ClientConfig::default());

        let result = client.dashboard_summary(&session()).await;
        assert_eq!(result, Err(ApiError::Status { status: 500 }));
        let stats = DashboardStats::or_zeroed(&result);
        assert!(stats.fields().iter().all(|(_, v)| *v == 0));
    }

    #[tokio::test]
    async fn test_summary_missing_field_is_malformed() {
        let transport = RecordingTransport::new();
        transport.respond(Method::Get, "/dashboard/summary", 200, r#"{"totalControls":25}"#);
        let client = GrcClient::new(transport, &ClientConfig::default());

        let result = client.dashboard_summary(&session()).await;
        assert!(result.as_ref().unwrap_err().is_malformed());
        assert_eq!(DashboardStats::or_zeroed(&result), DashboardStats::default());
    }

    fn activated(id: &str, standard: Option<&str>, status: &str, days_ago: i64) -> ActivatedControl {
        ActivatedControl {
            id: id.to_string(),
            control_id: format!("CTL-{id}"),
            control_name: format!("Control {id}"),
            standard: standard.map(str::to_string),
            status: status.to_string(),
            next_review_due_date: Some(now() - Duration::days(days_ago)),
            owner_name: None,
        }
    }

    #[test]
    fn test_overdue_sorted_and_limited() {
        let controls: Vec<ActivatedControl> = [3, -2, 10, 1, 7, 30, 2, 0]
            .iter()
            .enumerate()
            .map(|(i, d)| activated(&i.to_string(), None, "pending", *d))
            .collect();

        let overdue = overdue_controls(&controls, now());
        let days: Vec<i64> = overdue.iter().map(|c| c.days_overdue).collect();
        assert_eq!(days, vec![30, 10, 7, 3, 2]);
        assert_eq!(overdue[0].control_id, "CTL-5");
    }

    #[test]
    fn test_due_now_is_not_overdue() {
        let overdue = overdue_controls(&[activated("a", None, "pending", 0)], now());
        assert!(overdue.is_empty());
    }

    fn library(id: &str, standard: Option<&str>) -> LibraryControl {
        LibraryControl {
            id: id.to_string(),
            name: id.to_string(),
            standard: standard.map(str::to_string),
            family: None,
            description: None,
        }
    }

    #[test]
    fn test_standard_progress() {
        let lib = vec![
            library("1", Some("ISO 27001")),
            library("2", Some("ISO 27001")),
            library("3", Some("SOC 2")),
            library("4", None),
        ];
        let act = vec![
            activated("a", Some("ISO 27001"), "compliant", -5),
            activated("b", Some("ISO 27001"), "pending", -5),
            activated("c", Some("SOC 2"), "compliant", -5),
            activated("d", Some("HIPAA"), "compliant", -5),
        ];

        let progress = standard_progress(&lib, &act);
        assert_eq!(progress.len(), 3);
        assert_eq!(progress[0].standard, "SOC 2");
        assert_eq!(progress[0].percentage, 100.0);
        assert_eq!(progress[1].standard, "ISO 27001");
        assert_eq!(progress[1].activated_controls, 2);
        assert_eq!(progress[1].compliant_controls, 1);
        assert_eq!(progress[1].percentage, 50.0);
        assert_eq!(progress[2].standard, "Other");
        assert_eq!(progress[2].percentage, 0.0);
    }

    #[test]
    fn test_empty_standard_groups_under_other() {
        let lib = vec![library("1", Some("")), library("2", None)];
        let act = vec![activated("a", Some(""), "compliant", -5)];

        let progress = standard_progress(&lib, &act);
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].standard, "Other");
        assert_eq!(progress[0].total_controls, 2);
        assert_eq!(progress[0].compliant_controls, 1);
    }

    #[test]
    fn test_format_time_ago() {
        let n = now();
        assert_eq!(format_time_ago(n - Duration::seconds(30), n), "Just now");
        assert_eq!(format_time_ago(n - Duration::minutes(5), n), "5m ago");
        assert_eq!(format_time_ago(n - Duration::hours(3), n), "3h ago");
        assert_eq!(format_time_ago(n - Duration::days(2), n), "2d ago");
        assert_eq!(format_timestamp_ago("yesterday-ish", n), "yesterday-ish");
    }

    #[tokio::test]
    async fn test_recent_activity_capped() {
        let events: Vec<serde_json::Value> = (0..15)
            .map(|i| {
                serde_json::json!({
                    "id": i.to_string(),
                    "action_type": "LOGIN_SUCCESS",
                    "performed_at": "2024-06-15T11:00:00Z"
                })
            })
            .collect();
        let transport = RecordingTransport::new();
        transport.respond(
            Method::Get,
            "/audit/logs?limit=10",
            200,
            &serde_json::to_string(&events).unwrap(),
        );
        let client = GrcClient::new(transport, &ClientConfig::default());

        let recent = client.recent_activity(&session()).await.unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].action_label(), "LOGIN SUCCESS");
    }
}
