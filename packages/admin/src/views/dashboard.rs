use api::dashboard::format_timestamp_ago;
use api::{ApiError, DashboardStats};
use chrono::Utc;
use dioxus::prelude::*;
use ui::{make_client, use_session, StatCard};

#[component]
pub fn Dashboard() -> Element {
    let state = use_session();
    let summary = use_resource(move || async move {
        make_client().dashboard_summary(&state().session).await
    });
    let overdue = use_resource(move || async move {
        make_client()
            .overdue_controls(&state().session, Utc::now())
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Overdue controls unavailable: {}", e);
                Vec::new()
            })
    });
    let activity = use_resource(move || async move {
        make_client()
            .recent_activity(&state().session)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Recent activity unavailable: {}", e);
                Vec::new()
            })
    });
    let standards = use_resource(move || async move {
        make_client()
            .standard_progress(&state().session)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Standard progress unavailable: {}", e);
                Vec::new()
            })
    });

    let now = Utc::now();

    rsx! {
        div {
            class: "page-body",
            h1 { "Dashboard" }
            p { class: "page-subtitle", "Welcome to your GRC Platform" }

            SummaryStats { result: summary() }

            div {
                class: "dashboard-widgets",

                section {
                    class: "widget",
                    h2 { "Overdue Controls" }
                    match overdue() {
                        None => rsx! { p { class: "empty-state", "Loading..." } },
                        Some(list) if list.is_empty() => rsx! {
                            p { class: "empty-state", "No overdue controls!" }
                        },
                        Some(list) => rsx! {
                            ul {
                                class: "widget-list",
                                for control in list {
                                    li {
                                        key: "{control.id}",
                                        span { class: "widget-primary", "{control.control_id}: {control.control_name}" }
                                        if let Some(owner) = control.owner_name.clone() {
                                            span { class: "widget-secondary", "{owner}" }
                                        }
                                        span { class: "badge badge-red", "{control.days_overdue} days overdue" }
                                    }
                                }
                            }
                        },
                    }
                }

                section {
                    class: "widget",
                    h2 { "Recent Activity" }
                    p { class: "widget-description", "Latest system events" }
                    match activity() {
                        None => rsx! { p { class: "empty-state", "Loading..." } },
                        Some(events) if events.is_empty() => rsx! {
                            p { class: "empty-state", "No recent activity" }
                        },
                        Some(events) => rsx! {
                            ul {
                                class: "widget-list",
                                for event in events {
                                    li {
                                        key: "{event.id}",
                                        span { class: "widget-primary", "{event.action_label()}" }
                                        if let Some(target) = event.target_entity_type.clone() {
                                            span { class: "widget-secondary", "{target}" }
                                        }
                                        span {
                                            class: "widget-time",
                                            {format_timestamp_ago(&event.performed_at, now)}
                                        }
                                    }
                                }
                            }
                        },
                    }
                }

                section {
                    class: "widget",
                    h2 { "Compliance by Standard" }
                    match standards() {
                        None => rsx! { p { class: "empty-state", "Loading..." } },
                        Some(progress) if progress.is_empty() => rsx! {
                            p { class: "empty-state", "No standards yet" }
                        },
                        Some(progress) => rsx! {
                            ul {
                                class: "widget-list",
                                for entry in progress {
                                    li {
                                        key: "{entry.standard}",
                                        span { class: "widget-primary", "{entry.standard}" }
                                        span {
                                            class: "widget-secondary",
                                            "{entry.compliant_controls}/{entry.total_controls} compliant"
                                        }
                                        div {
                                            class: "progress-bar",
                                            div {
                                                class: "progress-fill",
                                                style: format!("width: {:.0}%", entry.percentage),
                                            }
                                        }
                                        span { class: "widget-time", {format!("{:.0}%", entry.percentage)} }
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}

/// The four summary counters. Zeros while loading and on any error.
#[component]
pub fn SummaryStats(result: Option<Result<DashboardStats, ApiError>>) -> Element {
    let stats = result
        .as_ref()
        .map(DashboardStats::or_zeroed)
        .unwrap_or_default();
    let malformed = matches!(&result, Some(Err(e)) if e.is_malformed());

    rsx! {
        if malformed {
            p { class: "notice", "Summary data could not be read. Showing zeros." }
        }

        div {
            class: "stat-grid",
            for (label, value) in stats.fields() {
                StatCard { key: "{label}", label: label.to_string(), value: value }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: Option<Result<DashboardStats, ApiError>>) -> String {
        let mut dom = VirtualDom::new_with_props(SummaryStats, SummaryStatsProps { result });
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    fn stat_values(html: &str) -> Vec<String> {
        html.split("<dd class=\"stat-value\">")
            .skip(1)
            .filter_map(|rest| rest.split("</dd>").next())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_summary_values_rendered_in_order() {
        let html = render(Some(Ok(DashboardStats {
            total_controls: 25,
            activated_controls: 15,
            overdue_controls: 3,
            total_tickets: 8,
        })));

        assert_eq!(stat_values(&html), ["25", "15", "3", "8"]);
        assert!(html.contains("Total Controls"));
        assert!(html.contains("Total Tickets"));
        assert!(!html.contains("notice"));
    }

    #[test]
    fn test_server_error_renders_zeros() {
        let html = render(Some(Err(ApiError::Status { status: 500 })));

        assert_eq!(stat_values(&html), ["0", "0", "0", "0"]);
        assert!(!html.contains("could not be read"));
    }

    #[test]
    fn test_malformed_summary_renders_zeros_with_notice() {
        let html = render(Some(Err(ApiError::Decode {
            endpoint: "/dashboard/summary".to_string(),
            message: "missing field `totalTickets`".to_string(),
        })));

        assert_eq!(stat_values(&html), ["0", "0", "0", "0"]);
        assert!(html.contains("could not be read"));
    }
}
