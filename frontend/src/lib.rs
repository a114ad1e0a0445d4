use leptos::*;
use leptos_meta::{provide_meta_context, Title};

pub mod api;
mod components;
pub mod config;
pub mod pages;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

use api::ApiClient;
use components::{layout::Layout, theme::ThemeProvider};
use pages::admin_leaves::AdminLeavesPage;
use state::{auth::AuthProvider, notifications::provide_notifications};

#[component]
fn Shell() -> impl IntoView {
    let client = ApiClient::new();
    provide_context(client.clone());
    let store = provide_notifications();

    #[cfg(target_arch = "wasm32")]
    {
        let (auth, _) = state::auth::use_auth();
        let user_id = auth.with_untracked(|s| s.user.as_ref().map(|u| u.id.clone()));
        match user_id {
            Some(user_id) => state::notifications::start_polling(
                std::rc::Rc::new(client),
                store,
                user_id,
                config::current().notification_poll_secs(),
            ),
            None => log::info!("no signed-in user; notification polling disabled"),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (client, store);

    view! {
        <Layout>
            <AdminLeavesPage />
        </Layout>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    view! {
        <Title text="휴가 승인 관리 | HR Desk" />
        <AuthProvider>
            <ThemeProvider>
                <Shell />
            </ThemeProvider>
        </AuthProvider>
    }
}

/// Browser entry point: logging, runtime config, then mount.
pub fn run() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", err).into());
    }
    log::set_max_level(log::LevelFilter::Info);
    let perf = utils::storage::window()
        .ok()
        .and_then(|w| w.performance());
    let started = perf.as_ref().map(|p| p.now());
    log::info!("starting HR Desk frontend");

    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        log::set_max_level(config::current().log_level().to_level_filter());
        match (perf.as_ref(), started) {
            (Some(p), Some(start)) => {
                log::info!("runtime config initialized ({:.0} ms)", p.now() - start)
            }
            _ => log::info!("runtime config initialized"),
        }
        mount_to_body(App);
    });
}
