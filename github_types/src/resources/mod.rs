//! Resource records mirroring the JSON bodies of the v3 API.
//!
//! These are declared, not computed: nothing here validates field contents.

mod activity;
mod gists;
mod git;
mod issues;
mod orgs;
mod pulls;
mod releases;
mod repos;
mod users;

pub use activity::{Notification, NotificationSubject};
pub use gists::{Gist, GistFile};
pub use git::{Blob, GitObject, Reference, Tree, TreeEntry};
pub use issues::{Issue, IssueRequest, Label, Milestone};
pub use orgs::Organization;
pub use pulls::{PullRequest, PullRequestBranch};
pub use releases::{ReleaseAsset, RepositoryRelease};
pub use repos::{Hook, Repository};
pub use users::User;
