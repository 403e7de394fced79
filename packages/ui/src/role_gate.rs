use dioxus::prelude::*;
use store::Role;

use crate::use_session;

/// Renders `children` only for principals holding `required`.
///
/// Anyone else is sent to `fallback` and nothing is rendered. This is a
/// client-side courtesy; the backend still enforces the role.
#[component]
pub fn RoleGate(required: Role, fallback: String, children: Element) -> Element {
    let state = use_session();
    let nav = use_navigator();
    let current = state();

    if current.loading {
        return rsx! {};
    }

    match api::gate::check_role(&current.session, required) {
        Ok(_) => rsx! {
            {children}
        },
        Err(denied) => {
            tracing::debug!(
                "Role gate: {} required, have {:?}; redirecting to {}",
                denied.required.as_str(),
                denied.actual,
                fallback
            );
            nav.replace(fallback.as_str());
            rsx! {}
        }
    }
}
