use anyhow::Context;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use wasm_bindgen::JsValue;

use crate::utils::storage as storage_utils;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Seoul;
pub const DEFAULT_NOTIFICATION_POLL_SECS: u32 = 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub notification_poll_secs: Option<u32>,
}

impl RuntimeConfig {
    /// Fills every unset field of `self` from `fallback`.
    pub fn merged_with(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            time_zone: self.time_zone.or(fallback.time_zone),
            log_level: self.log_level.or(fallback.log_level),
            notification_poll_secs: self
                .notification_poll_secs
                .or(fallback.notification_poll_secs),
        }
    }

    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
            .as_deref()
            .and_then(|name| name.trim().parse::<Tz>().ok())
            .unwrap_or(DEFAULT_TIME_ZONE)
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level
            .as_deref()
            .and_then(|level| level.trim().parse::<log::Level>().ok())
            .unwrap_or(log::Level::Info)
    }

    pub fn notification_poll_secs(&self) -> u32 {
        self.notification_poll_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_NOTIFICATION_POLL_SECS)
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

fn read_global(object: &str, keys: &[&str]) -> Option<String> {
    let window = storage_utils::window().ok()?;
    let any = js_sys::Reflect::get(&window, &JsValue::from_str(object)).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(&any, &JsValue::from_str(key))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .and_then(|value| value.as_string().or_else(|| value.as_f64().map(|n| n.to_string())))
    })
}

fn snapshot_from_global(object: &str) -> RuntimeConfig {
    RuntimeConfig {
        api_base_url: read_global(object, &["API_BASE_URL", "api_base_url"]),
        time_zone: read_global(object, &["TIME_ZONE", "time_zone"]),
        log_level: read_global(object, &["LOG_LEVEL", "log_level"]),
        notification_poll_secs: read_global(
            object,
            &["NOTIFICATION_POLL_SECS", "notification_poll_secs"],
        )
        .and_then(|raw| raw.parse::<f64>().ok())
        .map(|secs| secs as u32),
    }
}

async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    let location = storage_utils::window()
        .ok()
        .and_then(|window| window.location().href().ok())
        .context("window location unavailable")?;
    let url = reqwest::Url::parse(&location)
        .and_then(|base| base.join("config.json"))
        .context("config.json url")?;
    let response = reqwest::get(url)
        .await
        .context("config.json request failed")?;
    anyhow::ensure!(
        response.status().is_success(),
        "config.json returned {}",
        response.status()
    );
    response
        .json::<RuntimeConfig>()
        .await
        .context("config.json is not valid runtime config")
}

async fn resolve() -> RuntimeConfig {
    // window.__HRDESK_ENV (env.js) wins over window.__HRDESK_CONFIG, which wins over config.json.
    let globals =
        snapshot_from_global("__HRDESK_ENV").merged_with(snapshot_from_global("__HRDESK_CONFIG"));
    if globals.api_base_url.is_some() || storage_utils::window().is_err() {
        return globals;
    }
    match fetch_runtime_config().await {
        Ok(file) => globals.merged_with(file),
        Err(err) => {
            log::warn!("runtime config fallback to defaults: {:#}", err);
            globals
        }
    }
}

pub fn current() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

pub async fn load() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    let resolved = resolve().await;
    RUNTIME_CONFIG.get_or_init(|| resolved).clone()
}

pub async fn await_api_base_url() -> String {
    load().await.api_base_url()
}

pub fn current_time_zone() -> Tz {
    current().time_zone()
}

pub async fn init() {
    let cfg = load().await;
    log::info!(
        "runtime config ready (api: {}, tz: {})",
        cfg.api_base_url(),
        cfg.time_zone()
    );
}
