use api::controls::DEFAULT_REVIEW_INTERVAL_DAYS;
use api::{ActivatedControl, LibraryControl};
use dioxus::prelude::*;
use ui::{make_client, use_session};

/// Library controls not yet activated, in library order.
fn available_controls(
    library: &[LibraryControl],
    activated: &[ActivatedControl],
) -> Vec<LibraryControl> {
    library
        .iter()
        .filter(|c| !activated.iter().any(|a| a.control_id == c.id))
        .cloned()
        .collect()
}

#[component]
pub fn Controls() -> Element {
    let state = use_session();
    let is_admin = state().session.principal().is_some_and(|p| p.is_admin());
    let mut interval = use_signal(|| DEFAULT_REVIEW_INTERVAL_DAYS.to_string());
    let mut pending = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let mut controls = use_resource(move || async move {
        make_client()
            .activated_controls(&state().session)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Controls unavailable: {}", e);
                Vec::new()
            })
    });
    let library = use_resource(move || async move {
        make_client()
            .control_library(&state().session)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Control library unavailable: {}", e);
                Vec::new()
            })
    });

    let available = match (library(), controls()) {
        (Some(library), Some(activated)) => Some(available_controls(&library, &activated)),
        _ => None,
    };

    let activate = move |control_id: String| {
        let Ok(days) = interval().trim().parse::<u32>() else {
            error.set(Some("Review interval must be a number of days".to_string()));
            return;
        };
        pending.set(Some(control_id.clone()));
        error.set(None);

        spawn(async move {
            match make_client()
                .activate_control(&state().session, &control_id, days)
                .await
            {
                Ok(()) => controls.restart(),
                Err(e) => {
                    tracing::warn!("Activating control {} failed: {}", control_id, e);
                    error.set(Some(format!("Failed to activate control: {e}")));
                }
            }
            pending.set(None);
        });
    };

    rsx! {
        div {
            class: "page-body",
            h1 { "Controls" }
            p { class: "page-subtitle", "Manage your compliance controls" }

            match controls() {
                None => rsx! { p { class: "empty-state", "Loading..." } },
                Some(list) if list.is_empty() => rsx! {
                    p { class: "empty-state", "No controls activated yet." }
                },
                Some(list) => rsx! { ActivatedTable { controls: list } },
            }

            section {
                class: "control-library",
                h2 { "Control Library" }

                if is_admin {
                    div {
                        class: "form-field",
                        label { r#for: "review-interval", "Review interval (days)" }
                        input {
                            id: "review-interval",
                            r#type: "number",
                            min: "1",
                            value: "{interval}",
                            oninput: move |e| interval.set(e.value()),
                        }
                    }
                }

                if let Some(message) = error() {
                    div { class: "form-error", "{message}" }
                }

                match available {
                    None => rsx! { p { class: "empty-state", "Loading..." } },
                    Some(list) if list.is_empty() => rsx! {
                        p { class: "empty-state", "Every library control is active." }
                    },
                    Some(list) => rsx! {
                        LibraryTable {
                            controls: list,
                            pending: pending(),
                            on_activate: is_admin.then(|| EventHandler::new(activate)),
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn ActivatedTable(controls: Vec<ActivatedControl>) -> Element {
    rsx! {
        table {
            class: "data-table",
            thead {
                tr {
                    th { "Control" }
                    th { "Name" }
                    th { "Standard" }
                    th { "Status" }
                    th { "Next Review" }
                    th { "Owner" }
                }
            }
            tbody {
                for control in controls {
                    tr {
                        key: "{control.id}",
                        td { "{control.control_id}" }
                        td { "{control.control_name}" }
                        td { {control.standard.clone().unwrap_or_default()} }
                        td {
                            span {
                                class: if control.is_compliant() { "badge badge-green" } else { "badge badge-gray" },
                                "{control.status}"
                            }
                        }
                        td {
                            {control
                                .next_review_due_date
                                .map(|d| d.format("%Y-%m-%d").to_string())
                                .unwrap_or_else(|| "-".to_string())}
                        }
                        td { {control.owner_name.clone().unwrap_or_else(|| "Unassigned".to_string())} }
                    }
                }
            }
        }
    }
}

/// Library controls. Without `on_activate` the table is read-only.
#[component]
fn LibraryTable(
    controls: Vec<LibraryControl>,
    pending: Option<String>,
    on_activate: Option<EventHandler<String>>,
) -> Element {
    rsx! {
        table {
            class: "data-table",
            thead {
                tr {
                    th { "Name" }
                    th { "Standard" }
                    th { "Family" }
                    th { "Description" }
                    if on_activate.is_some() {
                        th {}
                    }
                }
            }
            tbody {
                for control in controls {
                    tr {
                        key: "{control.id}",
                        td { "{control.name}" }
                        td { {control.standard.clone().unwrap_or_default()} }
                        td { {control.family.clone().unwrap_or_default()} }
                        td { class: "widget-description", {control.description.clone().unwrap_or_default()} }
                        if let Some(handler) = on_activate {
                            td {
                                button {
                                    class: "btn",
                                    disabled: pending.is_some(),
                                    onclick: {
                                        let id = control.id.clone();
                                        move |_| handler.call(id.clone())
                                    },
                                    if pending.as_deref() == Some(control.id.as_str()) { "Activating..." } else { "Activate" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
