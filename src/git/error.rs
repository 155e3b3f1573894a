//! Translate git2 errors into short messages for the user

use git2::{Error, ErrorClass};

/// Broad category of a failed remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    NotFound,
    Authentication,
    PermissionDenied,
    Network,
    Rejected,
    Certificate,
    Other,
}

type Matcher = fn(&str, ErrorClass) -> bool;

// Order matters: the first matching category wins
const CATEGORIES: &[(Matcher, Failure)] = &[
    (
        |msg, _| msg.contains("non-fast-forward") || msg.contains("rejected"),
        Failure::Rejected,
    ),
    (
        |msg, _| {
            msg.contains("not found")
                || msg.contains("404")
                || msg.contains("does not appear to be a git repository")
                || msg.contains("too many redirects")
        },
        Failure::NotFound,
    ),
    (
        |msg, _| msg.contains("authentication") || msg.contains("credentials"),
        Failure::Authentication,
    ),
    (
        |msg, _| msg.contains("permission denied") || msg.contains("access denied"),
        Failure::PermissionDenied,
    ),
    (
        |msg, _| {
            msg.contains("connection")
                || msg.contains("network")
                || msg.contains("timed out")
                || msg.contains("could not resolve host")
        },
        Failure::Network,
    ),
    (
        |msg, class| class == ErrorClass::Http && (msg.contains("certificate") || msg.contains("ssl")),
        Failure::Certificate,
    ),
];

fn categorize(err: &Error) -> Failure {
    let message = err.message().to_lowercase();
    CATEGORIES
        .iter()
        .find(|(matches, _)| matches(&message, err.class()))
        .map_or(Failure::Other, |(_, failure)| *failure)
}

/// Interpret a git2 error as a user-facing message.
///
/// The original libgit2 message is kept after the category so nothing is
/// lost when the category guess is wrong.
pub fn interpret_git_error(err: &Error) -> String {
    let prefix = match categorize(err) {
        Failure::NotFound => "repository not found",
        Failure::Authentication => "authentication failed",
        Failure::PermissionDenied => "permission denied",
        Failure::Network => "network error",
        Failure::Rejected => "rejected by remote",
        Failure::Certificate => "TLS certificate error",
        Failure::Other => match err.class() {
            ErrorClass::Ssh => "SSH error",
            ErrorClass::Http => "HTTP error",
            _ => return err.message().to_string(),
        },
    };
    format!("{prefix}: {}", err.message())
}
