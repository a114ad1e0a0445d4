use std::rc::Rc;

use async_trait::async_trait;
use leptos::*;

use crate::api::{ApiClient, ApiError, NotificationItem};
use crate::utils::cancel::CancelToken;

#[async_trait(?Send)]
pub trait NotificationSource {
    async fn list(&self, user_id: &str) -> Result<Vec<NotificationItem>, ApiError>;
    async fn mark_read(&self, id: &str) -> Result<(), ApiError>;
    async fn mark_all_read(&self, user_id: &str) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
impl NotificationSource for ApiClient {
    async fn list(&self, user_id: &str) -> Result<Vec<NotificationItem>, ApiError> {
        self.list_notifications(user_id).await
    }

    async fn mark_read(&self, id: &str) -> Result<(), ApiError> {
        self.mark_notification_read(id).await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<(), ApiError> {
        self.mark_all_notifications_read(user_id).await
    }
}

/// Notification list shared through context instead of a global.
#[derive(Clone, Copy)]
pub struct NotificationStore {
    items: RwSignal<Vec<NotificationItem>>,
    last_error: RwSignal<Option<ApiError>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self {
            items: create_rw_signal(Vec::new()),
            last_error: create_rw_signal(None),
        }
    }

    pub fn items(&self) -> Signal<Vec<NotificationItem>> {
        self.items.into()
    }

    pub fn last_error(&self) -> Signal<Option<ApiError>> {
        self.last_error.into()
    }

    pub fn unread_count(&self) -> Signal<usize> {
        let items = self.items;
        Signal::derive(move || items.with(|list| list.iter().filter(|n| !n.is_read).count()))
    }

    pub fn replace(&self, items: Vec<NotificationItem>) {
        self.items.set(items);
        self.last_error.set(None);
    }

    pub fn record_error(&self, error: ApiError) {
        self.last_error.set(Some(error));
    }

    pub fn mark_read_local(&self, id: &str) {
        self.items.update(|list| {
            if let Some(item) = list.iter_mut().find(|n| n.id == id) {
                item.is_read = true;
            }
        });
    }

    pub fn mark_all_read_local(&self) {
        self.items
            .update(|list| list.iter_mut().for_each(|n| n.is_read = true));
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notifications() -> NotificationStore {
    let store = NotificationStore::new();
    provide_context(store);
    store
}

pub fn use_notifications() -> NotificationStore {
    use_context::<NotificationStore>().unwrap_or_else(NotificationStore::new)
}

/// One poll cycle; results are dropped once `cancel` has fired.
pub async fn refresh_notifications(
    source: &dyn NotificationSource,
    store: NotificationStore,
    user_id: &str,
    cancel: &CancelToken,
) {
    let result = source.list(user_id).await;
    if cancel.is_cancelled() {
        return;
    }
    match result {
        Ok(items) => store.replace(items),
        Err(err) => {
            log::warn!("notification refresh failed: {}", err);
            store.record_error(err);
        }
    }
}

pub async fn mark_read(
    source: &dyn NotificationSource,
    store: NotificationStore,
    id: &str,
) -> Result<(), ApiError> {
    source.mark_read(id).await?;
    store.mark_read_local(id);
    Ok(())
}

pub async fn mark_all_read(
    source: &dyn NotificationSource,
    store: NotificationStore,
    user_id: &str,
) -> Result<(), ApiError> {
    source.mark_all_read(user_id).await?;
    store.mark_all_read_local();
    Ok(())
}

/// Polls every `interval_secs` until the owning reactive scope is disposed.
pub fn start_polling(
    source: Rc<dyn NotificationSource>,
    store: NotificationStore,
    user_id: String,
    interval_secs: u32,
) {
    let cancel = CancelToken::new();
    let poll = {
        let cancel = cancel.clone();
        move || {
            let source = Rc::clone(&source);
            let user_id = user_id.clone();
            let cancel = cancel.clone();
            async move { refresh_notifications(source.as_ref(), store, &user_id, &cancel).await }
        }
    };
    spawn_local(poll());
    let interval = gloo_timers::callback::Interval::new(interval_secs.saturating_mul(1000), move || {
        spawn_local(poll())
    });
    // Dropping the interval clears the browser timer.
    let interval = store_value(Some(interval));
    on_cleanup(move || {
        cancel.cancel();
        interval.update_value(|slot| {
            slot.take();
        });
    });
}
