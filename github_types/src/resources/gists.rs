use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Timestamp, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gist {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    /// Keyed by file name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "crate::optional::null_default")]
    pub files: BTreeMap<String, GistFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_pull_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_push_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GistFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl_stringify! {
    Gist {
        id, description, public, owner, files, comments, html_url, git_pull_url, git_push_url,
        created_at,
    }
    GistFile { size, filename, raw_url, content }
}

#[test]
fn gist_files_keyed_by_name() {
    let mut files = BTreeMap::new();
    files.insert(
        "hello.rs".to_string(),
        GistFile {
            content: Some("fn main() {}".to_string()),
            ..Default::default()
        },
    );
    let gist = Gist {
        public: Some(false),
        files,
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_string(&gist).unwrap(),
        r#"{"public":false,"files":{"hello.rs":{"content":"fn main() {}"}}}"#
    );
    assert_eq!(
        gist.to_string(),
        r#"Gist{public:false, files:map[hello.rs:GistFile{content:"fn main() {}"}]}"#
    );
}
