//! Tickets filed under the stored customer reference.

use api::tickets::TICKET_CATEGORIES;
use api::{ExternalTicketRequest, Ticket};
use dioxus::prelude::*;
use store::CustomerRefStore;
use ui::{make_client, make_kv, TicketStatusBadge};

use crate::Route;

#[component]
pub fn Tickets() -> Element {
    let nav = use_navigator();
    let mut customer_ref = use_signal(|| None::<String>);
    let mut selected = use_signal(|| None::<Ticket>);

    use_effect(move || match CustomerRefStore::new(make_kv()).load() {
        Some(stored) => customer_ref.set(Some(stored)),
        None => {
            nav.push(Route::Home {});
        }
    });

    let mut tickets = use_resource(move || async move {
        let Some(customer_ref) = customer_ref() else {
            return None;
        };
        let list = make_client()
            .customer_tickets(&customer_ref)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Tickets for {} unavailable: {}", customer_ref, e);
                Vec::new()
            });
        Some(list)
    });

    let sign_out = move |_| {
        CustomerRefStore::new(make_kv()).clear();
        customer_ref.set(None);
        nav.push(Route::Home {});
    };

    let Some(reference) = customer_ref() else {
        return rsx! {
            p { class: "empty-state", "Loading..." }
        };
    };

    rsx! {
        div {
            class: "portal-page",
            header {
                class: "page-header",
                div {
                    h1 { class: "page-title", "Customer Portal" }
                    p { class: "page-subtitle", "Customer: {reference}" }
                }
                button { class: "btn btn-link", onclick: sign_out, "Sign out" }
            }

            div {
                class: "page-body portal-columns",

                section {
                    class: "portal-tickets",
                    h3 { "My Support Tickets" }
                    match tickets() {
                        None | Some(None) => rsx! { p { class: "empty-state", "Loading..." } },
                        Some(Some(list)) if list.is_empty() => rsx! {
                            p { class: "empty-state", "No tickets yet" }
                        },
                        Some(Some(list)) => rsx! {
                            ul {
                                class: "ticket-list",
                                for ticket in list {
                                    li {
                                        key: "{ticket.id}",
                                        class: "ticket-row",
                                        onclick: {
                                            let ticket = ticket.clone();
                                            move |_| selected.set(Some(ticket.clone()))
                                        },
                                        span { class: "ticket-ref", "{ticket.reference()}" }
                                        span { class: "ticket-title", "{ticket.title}" }
                                        TicketStatusBadge { status: ticket.status.clone() }
                                    }
                                }
                            }
                        },
                    }
                }

                NewTicketForm {
                    customer_ref: reference.clone(),
                    on_submitted: move |_| tickets.restart(),
                }
            }

            if let Some(ticket) = selected() {
                TicketDetail {
                    ticket: ticket,
                    on_close: move |_| selected.set(None),
                }
            }
        }
    }
}

#[component]
fn NewTicketForm(customer_ref: String, on_submitted: EventHandler<()>) -> Element {
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        let request = ExternalTicketRequest {
            title: title(),
            description: description(),
            category: category(),
            external_customer_ref: customer_ref.clone(),
        };
        spawn(async move {
            submitting.set(true);
            error.set(None);
            match make_client().submit_customer_ticket(&request).await {
                Ok(()) => {
                    title.set(String::new());
                    description.set(String::new());
                    category.set(String::new());
                    on_submitted.call(());
                }
                Err(e) => {
                    tracing::warn!("Ticket submission failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        section {
            class: "portal-new-ticket",
            h3 { "Submit New Ticket" }

            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }

            form {
                onsubmit: onsubmit,
                div {
                    class: "form-field",
                    label { r#for: "title", "Title" }
                    input {
                        id: "title",
                        value: "{title}",
                        oninput: move |e| title.set(e.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "description", "Description" }
                    textarea {
                        id: "description",
                        rows: 4,
                        value: "{description}",
                        oninput: move |e| description.set(e.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "category", "Category" }
                    select {
                        id: "category",
                        value: "{category}",
                        onchange: move |e| category.set(e.value()),
                        option { value: "", "Select a category" }
                        for name in TICKET_CATEGORIES {
                            option { value: name, "{name}" }
                        }
                    }
                }
                button {
                    class: "btn",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Submitting..." } else { "Submit Ticket" }
                }
            }
        }
    }
}

#[component]
fn TicketDetail(ticket: Ticket, on_close: EventHandler<()>) -> Element {
    let comments = use_resource({
        let ticket = ticket.clone();
        use_reactive!(|(ticket,)| async move {
            make_client()
                .customer_ticket_comments(&ticket.id)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!("Comments for ticket {} unavailable: {}", ticket.id, e);
                    Vec::new()
                })
        })
    });

    rsx! {
        div {
            class: "dialog-overlay",
            div {
                class: "dialog",
                div {
                    class: "page-heading",
                    h2 { "{ticket.reference()} {ticket.title}" }
                    button { class: "btn btn-link", onclick: move |_| on_close.call(()), "Close" }
                }

                dl {
                    class: "detail-list",
                    dt { "Status:" }
                    dd { TicketStatusBadge { status: ticket.status.clone() } }
                    dt { "Created:" }
                    dd { "{ticket.created_at}" }
                    if let Some(description) = ticket.description.clone() {
                        dt { "Description:" }
                        dd { "{description}" }
                    }
                    if let Some(category) = ticket.category.clone() {
                        dt { "Category:" }
                        dd { "{category}" }
                    }
                }

                h4 { "Comments:" }
                match comments() {
                    None => rsx! { p { class: "empty-state", "Loading..." } },
                    Some(list) if list.is_empty() => rsx! {
                        p { class: "empty-state", "No comments yet" }
                    },
                    Some(list) => rsx! {
                        ul {
                            class: "comment-list",
                            for comment in list {
                                li {
                                    key: "{comment.id}",
                                    p { "{comment.body}" }
                                    span { class: "widget-time", "{comment.created_at}" }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}
