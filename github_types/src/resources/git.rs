use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<GitObject>,
}

/// The object a reference points to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitObject {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(rename = "tree", default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::optional::null_default")]
    pub entries: Vec<TreeEntry>,
}

/// A blob, a commit (submodule) or another tree inside a [`Tree`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl_stringify! {
    Reference { ref_, url, object }
    GitObject { type_, sha, url }
    Tree { sha, entries }
    TreeEntry { sha, path, mode, type_, size, content }
    Blob { content, encoding, sha, size, url }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_entries_use_wire_name() {
        let tree: Tree = serde_json::from_str(
            r#"{"sha": "9fb037999f264ba9a7fc6274d15fa3ae2ab98312", "tree": [{"path": "file.rb", "mode": "100644", "type": "blob", "size": 30}]}"#,
        )
        .unwrap();
        assert_eq!(tree.entries.len(), 1);
        assert_eq!(
            tree.to_string(),
            r#"Tree{sha:"9fb037999f264ba9a7fc6274d15fa3ae2ab98312", entries:[TreeEntry{path:"file.rb", mode:"100644", type:"blob", size:30}]}"#
        );
    }

    #[test]
    fn reference_nests_object() {
        let reference: Reference = serde_json::from_str(
            r#"{"ref": "refs/heads/main", "object": {"type": "commit", "sha": "aa218f56"}}"#,
        )
        .unwrap();
        assert_eq!(
            reference.to_string(),
            r#"Reference{ref:"refs/heads/main", object:GitObject{type:"commit", sha:"aa218f56"}}"#
        );
    }
}
