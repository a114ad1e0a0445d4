use leptos::*;

use crate::utils::storage as storage_utils;

const THEME_KEY: &str = "hrdesk_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    HighContrast,
}

impl Theme {
    pub fn as_class(&self) -> &'static str {
        match self {
            Theme::Light => "",
            Theme::Dark => "dark",
            Theme::HighContrast => "contrast-high",
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::HighContrast => "contrast-high",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "contrast-high" => Some(Theme::HighContrast),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark | Theme::HighContrast => Theme::Light,
        }
    }
}

fn system_prefers_dark() -> bool {
    storage_utils::window()
        .ok()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}

fn initial_theme() -> Theme {
    let stored = storage_utils::read_string(THEME_KEY)
        .ok()
        .flatten()
        .and_then(|raw| Theme::from_key(&raw));
    stored.unwrap_or_else(|| {
        if system_prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    })
}

#[derive(Clone, Copy)]
pub struct ThemeState {
    theme: RwSignal<Theme>,
}

impl ThemeState {
    pub fn new(initial: Theme) -> Self {
        Self {
            theme: create_rw_signal(initial),
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        if let Err(err) = storage_utils::write_string(THEME_KEY, theme.as_key()) {
            log::debug!("theme not persisted: {}", err);
        }
        self.apply_to_dom();
    }

    pub fn toggle(&self) {
        self.set_theme(self.theme.get_untracked().toggled());
    }

    fn apply_to_dom(&self) {
        let root = storage_utils::window()
            .ok()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        if let Some(root) = root {
            let class_list = root.class_list();
            let _ = class_list.remove_2("dark", "contrast-high");
            let class = self.theme.get_untracked().as_class();
            if !class.is_empty() {
                let _ = class_list.add_1(class);
            }
        }
    }

    pub fn current(&self) -> Signal<Theme> {
        self.theme.into()
    }
}

pub fn use_theme() -> ThemeState {
    use_context::<ThemeState>().unwrap_or_else(|| ThemeState::new(Theme::default()))
}

pub fn provide_theme() -> ThemeState {
    let state = ThemeState::new(initial_theme());
    provide_context(state);
    state.apply_to_dom();
    state
}
