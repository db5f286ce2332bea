//! Plain-text rendering of snapshots
//!
//! Everything here is a pure function of the data passed in.

use chrono::{DateTime, Utc};

use crate::commits::Commit;
use crate::issues::{Issue, IssueStatus};
use crate::repositories::Repository;
use crate::time;
use crate::users::{User, UserSummary};
use crate::views::ViewError;

const UNKNOWN_USER: &str = "Unknown";

/// "January 5, 2024"
pub fn format_date(value: &DateTime<Utc>) -> String {
    time::format_long(value)
}

/// "Jan 5, 2024"
pub fn format_date_short(value: &DateTime<Utc>) -> String {
    time::format_short(value)
}

/// Avatar fallback: the first two characters, upper-cased
pub fn initials(username: &str) -> String {
    username.chars().take(2).collect::<String>().to_uppercase()
}

/// Name shown for an embedded user that may be missing
pub fn display_name(user: Option<&UserSummary>) -> &str {
    user.map(|u| u.username.as_str()).unwrap_or(UNKNOWN_USER)
}

/// `Public` or `Private`
pub fn visibility_label(is_public: bool) -> &'static str {
    if is_public {
        "Public"
    } else {
        "Private"
    }
}

/// Badge text shown next to an issue title
pub fn status_badge(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::Open => "● Open",
        IssueStatus::Closed => "● Closed",
    }
}

/// Label of the button that toggles an issue's status
pub fn status_action_label(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::Open => "Close issue",
        IssueStatus::Closed => "Reopen issue",
    }
}

/// Label of the star button with the current count, e.g. `Starred 4`
pub fn star_button_label(starred: bool, count: u64) -> String {
    let label = if starred { "Starred" } else { "Star" };
    format!("{} {}", label, count)
}

/// Abbreviated commit hash
pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(7) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

pub fn open_issue_count(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter(|issue| issue.status == IssueStatus::Open)
        .count()
}

pub fn repository_card(repository: &Repository) -> Vec<String> {
    let mut lines = vec![format!(
        "{} / {}  [{}]",
        display_name(repository.owner.as_ref()),
        repository.name,
        visibility_label(repository.is_public)
    )];
    if let Some(description) = repository.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("  {}", description));
    }
    lines.push(format!(
        "  ★ {}  Updated {}",
        repository.stars_count,
        format_date_short(&repository.updated_at)
    ));
    lines
}

pub fn issue_card(issue: &Issue) -> Vec<String> {
    vec![
        format!("{}  {}", status_badge(issue.status), issue.title),
        format!(
            "  #{} opened {} by {}",
            issue.id,
            format_date_short(&issue.created_at),
            display_name(issue.creator.as_ref())
        ),
    ]
}

pub fn commit_card(commit: &Commit) -> Vec<String> {
    vec![
        format!("{}  {}", short_hash(&commit.hash), commit.message),
        format!(
            "  {} committed {}",
            display_name(commit.author.as_ref()),
            commit.created_at.format("%b %-d")
        ),
    ]
}

pub fn user_card(user: &User) -> Vec<String> {
    let mut lines = vec![format!("[{}] {}", initials(&user.username), user.username)];
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        lines.push(format!("  {}", bio));
    }
    lines.push(format!("  Joined {}", format_date(&user.created_at)));
    lines
}

/// Full-page error state with the retry hint
pub fn error_banner(err: &ViewError) -> String {
    format!("Error: {} (retry to reload)", err.message)
}
