use serde::{Deserialize, Serialize};

use crate::optional::nullable;
use crate::{Timestamp, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::optional::null_default")]
    pub labels: Vec<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
}

/// Body for creating or editing an issue.
///
/// `assignee` and `milestone` can be cleared on edit by sending `null`, hence the nested option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub assignee: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub milestone: Option<Option<u64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_issues: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_issues: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<Timestamp>,
}

impl_stringify! {
    Issue {
        number, state, title, body, user, labels, assignee, comments, closed_at, created_at,
        updated_at, url, html_url, milestone,
    }
    IssueRequest { title, body, labels, assignee, state, milestone }
    Label { url, name, color }
    Milestone {
        url, number, state, title, description, creator, open_issues, closed_issues, created_at,
        due_on,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::optional;

    #[test]
    fn edit_can_clear_milestone_and_keep_assignee() {
        let edit = IssueRequest {
            state: optional::string("closed"),
            milestone: nullable::clear(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&edit).unwrap(),
            json!({"state": "closed", "milestone": null})
        );
    }

    #[test]
    fn empty_label_list_is_sent_when_set() {
        let edit = IssueRequest {
            labels: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&edit).unwrap(), json!({"labels": []}));
    }

    #[test]
    fn issue_with_labels_renders() {
        let issue: Issue = serde_json::from_str(
            r#"{"number": 1347, "title": "Found a bug", "labels": [{"name": "bug", "color": "f29513"}]}"#,
        )
        .unwrap();
        assert_eq!(
            issue.to_string(),
            r#"Issue{number:1347, title:"Found a bug", labels:[Label{name:"bug", color:"f29513"}]}"#
        );
    }

    #[test]
    fn null_labels_decode_as_empty() {
        let issue: Issue = serde_json::from_str(r#"{"number": 1, "labels": null, "closed_at": null}"#).unwrap();
        assert_eq!(issue.number, Some(1));
        assert!(issue.labels.is_empty());
        assert_eq!(issue.closed_at, None);
    }
}
