use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A GitHub user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hireable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_gists: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl_stringify! {
    User {
        login, id, avatar_url, html_url, gravatar_id, name, company, blog, location, email,
        hireable, bio, public_repos, public_gists, followers, following, created_at, type_,
        site_admin, url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_user_and_renders_it() {
        let user: User = serde_json::from_str(
            r#"{"login": "octocat", "id": 1, "type": "User", "site_admin": false, "email": null}"#,
        )
        .unwrap();
        assert_eq!(user.login.as_deref(), Some("octocat"));
        assert_eq!(user.email, None);
        assert_eq!(
            user.to_string(),
            r#"User{login:"octocat", id:1, type:"User", site_admin:false}"#
        );
    }

    #[test]
    fn encodes_only_set_fields() {
        let user = User {
            name: Some("Mona".to_string()),
            hireable: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"name":"Mona","hireable":false}"#
        );
    }
}
