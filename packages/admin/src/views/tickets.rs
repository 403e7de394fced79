use api::tickets::TICKET_PAGE_SIZE;
use api::{NewComment, PageWindow, Ticket, TicketComment};
use dioxus::prelude::*;
use ui::{make_client, use_session, TicketStatusBadge};

#[component]
pub fn Tickets() -> Element {
    let state = use_session();
    let mut page = use_signal(|| 1usize);
    let mut selected = use_signal(|| None::<String>);

    let tickets = use_resource(move || async move {
        make_client()
            .tickets(&state().session)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Tickets unavailable: {}", e);
                Vec::new()
            })
    });

    rsx! {
        div {
            class: "page-body",
            h1 { "Tickets" }
            p { class: "page-subtitle", "Manage support tickets and requests" }

            match tickets() {
                None => rsx! { p { class: "empty-state", "Loading..." } },
                Some(list) if list.is_empty() => rsx! {
                    p { class: "empty-state", "No tickets found." }
                },
                Some(list) => {
                    let window = PageWindow::new(list.len(), page(), TICKET_PAGE_SIZE);
                    rsx! {
                        TicketTable {
                            tickets: list[window.start..window.end].to_vec(),
                            on_view: move |id: String| selected.set(Some(id)),
                        }
                        div {
                            class: "pager",
                            span { class: "widget-secondary", "{window.summary()}" }
                            button {
                                class: "btn btn-link",
                                disabled: !window.has_previous(),
                                onclick: move |_| page.set(window.page - 1),
                                "Previous"
                            }
                            button {
                                class: "btn btn-link",
                                disabled: !window.has_next(),
                                onclick: move |_| page.set(window.page + 1),
                                "Next"
                            }
                        }
                    }
                }
            }

            if let Some(ticket_id) = selected() {
                TicketDetailDialog {
                    ticket_id,
                    on_close: move |_| selected.set(None),
                }
            }
        }
    }
}

#[component]
fn TicketTable(tickets: Vec<Ticket>, on_view: EventHandler<String>) -> Element {
    rsx! {
        table {
            class: "data-table",
            thead {
                tr {
                    th { "#" }
                    th { "Title" }
                    th { "Type" }
                    th { "Status" }
                    th { "Created" }
                    th {}
                }
            }
            tbody {
                for ticket in tickets {
                    tr {
                        key: "{ticket.id}",
                        td { "{ticket.reference()}" }
                        td { "{ticket.title}" }
                        td { "{ticket.ticket_type}" }
                        td { TicketStatusBadge { status: ticket.status.clone() } }
                        td { "{ticket.created_at}" }
                        td {
                            button {
                                class: "btn btn-link",
                                onclick: {
                                    let id = ticket.id.clone();
                                    move |_| on_view.call(id.clone())
                                },
                                "View"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Ticket fields, the full comment thread and a form for replies and
/// internal notes.
#[component]
fn TicketDetailDialog(ticket_id: String, on_close: EventHandler<()>) -> Element {
    let state = use_session();
    let mut body = use_signal(String::new);
    let mut internal = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let mut detail = use_resource({
        let ticket_id = ticket_id.clone();
        use_reactive!(|(ticket_id,)| async move {
            make_client().ticket(&state().session, &ticket_id).await
        })
    });

    let onsubmit = {
        let ticket_id = ticket_id.clone();
        move |e: FormEvent| {
            e.prevent_default();
            let ticket_id = ticket_id.clone();
            spawn(async move {
                submitting.set(true);
                error.set(None);

                let comment = NewComment {
                    body: body(),
                    is_internal_note: internal(),
                };
                match make_client()
                    .add_ticket_comment(&state().session, &ticket_id, &comment)
                    .await
                {
                    Ok(()) => {
                        body.set(String::new());
                        internal.set(false);
                        detail.restart();
                    }
                    Err(e) => {
                        tracing::warn!("Comment on ticket {} failed: {}", ticket_id, e);
                        error.set(Some(format!("Failed to add comment: {e}")));
                    }
                }

                submitting.set(false);
            });
        }
    };

    rsx! {
        div {
            class: "dialog-overlay",
            div {
                class: "dialog dialog-wide",
                match detail() {
                    None => rsx! { p { class: "empty-state", "Loading..." } },
                    Some(Err(e)) => rsx! {
                        div {
                            class: "page-heading",
                            h2 { "Ticket" }
                            button { class: "btn btn-link", onclick: move |_| on_close.call(()), "Close" }
                        }
                        p { class: "form-error", "Ticket could not be loaded: {e}" }
                    },
                    Some(Ok(loaded)) => rsx! {
                        div {
                            class: "page-heading",
                            h2 { "{loaded.ticket.reference()} {loaded.ticket.title}" }
                            button { class: "btn btn-link", onclick: move |_| on_close.call(()), "Close" }
                        }
                        TicketFields { ticket: loaded.ticket.clone() }
                        h4 { "Comments" }
                        CommentThread { comments: loaded.comments.clone() }
                    },
                }

                form {
                    class: "comment-form",
                    onsubmit: onsubmit,

                    div {
                        class: "form-field",
                        label { r#for: "comment-body", "Add Comment" }
                        textarea {
                            id: "comment-body",
                            rows: "3",
                            value: "{body}",
                            oninput: move |e| body.set(e.value()),
                        }
                    }
                    label {
                        class: "checkbox-field",
                        input {
                            r#type: "checkbox",
                            checked: internal(),
                            onchange: move |e| internal.set(e.checked()),
                        }
                        "Internal note (not visible to customers)"
                    }

                    if let Some(message) = error() {
                        div { class: "form-error", "{message}" }
                    }

                    div {
                        class: "form-actions",
                        button {
                            class: "btn",
                            r#type: "submit",
                            disabled: submitting() || body().trim().is_empty(),
                            if submitting() { "Adding..." } else { "Add Comment" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TicketFields(ticket: Ticket) -> Element {
    rsx! {
        dl {
            class: "detail-list",
            dt { "Status:" }
            dd { TicketStatusBadge { status: ticket.status.clone() } }
            dt { "Type:" }
            dd { "{ticket.ticket_type}" }
            dt { "Created:" }
            dd { "{ticket.created_at}" }
            if let Some(updated) = ticket.updated_at.clone() {
                dt { "Updated:" }
                dd { "{updated}" }
            }
            if let Some(description) = ticket.description.clone() {
                dt { "Description:" }
                dd { "{description}" }
            }
            if let Some(category) = ticket.category.clone() {
                dt { "Category:" }
                dd { "{category}" }
            }
            if let Some(customer_ref) = ticket.external_customer_ref.clone() {
                dt { "Customer Reference:" }
                dd { "{customer_ref}" }
            }
        }
    }
}

#[component]
fn CommentThread(comments: Vec<TicketComment>) -> Element {
    if comments.is_empty() {
        return rsx! {
            p { class: "empty-state", "No comments yet" }
        };
    }

    rsx! {
        ul {
            class: "comment-list",
            for comment in comments {
                li {
                    key: "{comment.id}",
                    class: if comment.is_internal_note { "comment comment-internal" } else { "comment" },
                    if comment.is_internal_note {
                        span { class: "badge badge-yellow", "Internal Note" }
                    }
                    p { "{comment.body}" }
                    span { class: "widget-time", "{comment.created_at}" }
                }
            }
        }
    }
}
