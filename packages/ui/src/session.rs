//! Session context and hooks for the UI.

use dioxus::prelude::*;
use store::{SessionContext, SessionStore, StoreError};

use crate::client::{clear_session_cookie, make_kv, write_session_cookie};

/// Session state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: SessionContext,
    /// True until the persisted session has been read on the client.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: SessionContext::Unauthenticated,
            loading: true,
        }
    }
}

/// Get the current session state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Provider component that loads the persisted session.
/// Wrap your app with this component to enable authenticated views.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut state = use_signal(SessionState::default);

    // Storage is only readable once mounted in the browser
    use_effect(move || {
        let session = SessionStore::new(make_kv()).load();
        state.set(SessionState {
            session,
            loading: false,
        });
    });

    use_context_provider(|| state);

    rsx! {
        {children}
    }
}

/// Persist a freshly issued session and publish it.
pub fn sign_in(state: &mut Signal<SessionState>, session: SessionContext) -> Result<(), StoreError> {
    if let SessionContext::Authenticated {
        credential,
        principal,
    } = &session
    {
        SessionStore::new(make_kv()).save(credential, principal)?;
        write_session_cookie(credential);
        tracing::info!("Signed in as {}", principal.display_name());
    }
    state.set(SessionState {
        session,
        loading: false,
    });
    Ok(())
}

/// Forget the session everywhere it is stored.
pub fn sign_out(state: &mut Signal<SessionState>) {
    SessionStore::new(make_kv()).clear();
    clear_session_cookie();
    state.set(SessionState {
        session: SessionContext::Unauthenticated,
        loading: false,
    });
}

/// Button to sign out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut state = use_session();

    let onclick = move |_| {
        sign_out(&mut state);
        // Full reload so the server-side gate sees the cleared cookie
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(api::gate::LOGIN_PATH);
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
