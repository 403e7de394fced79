use dioxus::prelude::*;

use api::gate;
use ui::{use_session, Header, Navigation, SessionProvider};
use views::{
    Controls, Dashboard, DocumentDetail, Documents, Login, NewDocument, Tickets, VendorDetail,
    Vendors,
};

#[cfg(feature = "server")]
mod server;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[layout(AdminLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/controls")]
        Controls {},
        #[route("/tickets")]
        Tickets {},
        #[route("/documents")]
        Documents {},
        #[route("/documents/new")]
        NewDocument {},
        #[route("/documents/:id")]
        DocumentDetail { id: String },
        #[route("/vendors")]
        Vendors {},
        #[route("/vendors/:id")]
        VendorDetail { id: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = server::GateState::from_config(&store::ClientConfig::from_build_env());

    // Session routes first, then the app, all behind the gate
    let router = server::session_routes(state.clone())
        .serve_dioxus_application(ServeConfig::new(), App);
    let router = server::gated(router, state);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Admin server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .unwrap();
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::UI_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/dashboard`; the gate takes it from there.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

/// Shell for every signed-in page.
///
/// Repeats the Session Gate decision on the client so in-app navigation
/// behaves like a full page load.
#[component]
fn AdminLayout() -> Element {
    let state = use_session();
    let nav = use_navigator();
    let route: Route = use_route();
    let path = route.to_string();
    let current = state();

    if current.loading {
        return rsx! {
            div { class: "loading", "Loading..." }
        };
    }

    let credential = current.session.credential().map(|c| c.as_str());
    if let Some(location) = gate::decide(&path, credential).location() {
        tracing::debug!("Client gate: {} -> {}", path, location);
        nav.replace(location);
        return rsx! {};
    }

    rsx! {
        div {
            class: "admin-shell",
            Header { title: "GRC Platform" }
            div {
                class: "admin-body",
                Navigation { active: path }
                main {
                    class: "admin-main",
                    Outlet::<Route> {}
                }
            }
        }
    }
}
