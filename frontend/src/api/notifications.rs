use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, NotificationItem},
};

fn notification_read_path(id: &str) -> String {
    format!(
        "/notifications/{}/read",
        utf8_percent_encode(id, NON_ALPHANUMERIC)
    )
}

impl ApiClient {
    pub async fn list_notifications(
        &self,
        user_id: &str,
    ) -> Result<Vec<NotificationItem>, ApiError> {
        self.get_json("/notifications", &[("userId", user_id.to_string())])
            .await
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ApiError> {
        self.put_json(&notification_read_path(id), &json!({})).await
    }

    pub async fn mark_all_notifications_read(&self, user_id: &str) -> Result<(), ApiError> {
        self.put_json("/notifications/read-all", &json!({ "userId": user_id }))
            .await
    }
}
