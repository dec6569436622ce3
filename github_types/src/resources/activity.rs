use serde::{Deserialize, Serialize};

use crate::{Repository, Timestamp};

/// A notification thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<NotificationSubject>,
    /// Why the user was notified, e.g. `mention` or `subscribed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_read_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSubject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_comment_url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

impl_stringify! {
    Notification { id, repository, subject, reason, unread, updated_at, last_read_at, url }
    NotificationSubject { title, url, latest_comment_url, type_ }
}

#[test]
fn unread_false_survives_round_trip_as_literal() {
    let notification: Notification =
        serde_json::from_str(r#"{"id": "1", "unread": false, "last_read_at": null}"#).unwrap();
    assert_eq!(notification.unread, Some(false));
    assert_eq!(notification.last_read_at, None);
    assert_eq!(
        serde_json::to_string(&notification).unwrap(),
        r#"{"id":"1","unread":false}"#
    );
}
