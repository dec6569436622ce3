use serde::{Deserialize, Serialize};

use crate::{Repository, Timestamp, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mergeable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_by: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_files: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<PullRequestBranch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<PullRequestBranch>,
}

/// One side (head or base) of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequestBranch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl_stringify! {
    PullRequest {
        number, state, title, body, created_at, updated_at, closed_at, merged_at, user, merged,
        mergeable, merged_by, comments, commits, additions, deletions, changed_files, url,
        html_url, head, base,
    }
    PullRequestBranch { label, ref_, sha, repo, user }
}

#[test]
fn branch_ref_keeps_wire_name() {
    let branch: PullRequestBranch = serde_json::from_str(r#"{"ref": "main", "sha": "6dcb09b"}"#).unwrap();
    assert_eq!(branch.ref_.as_deref(), Some("main"));
    assert_eq!(branch.to_string(), r#"PullRequestBranch{ref:"main", sha:"6dcb09b"}"#);
    assert_eq!(serde_json::to_string(&branch).unwrap(), r#"{"ref":"main","sha":"6dcb09b"}"#);
}
