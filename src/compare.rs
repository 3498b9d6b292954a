use crate::error::Result;
use crate::github::StarsApi;
use std::collections::HashSet;
use tracing::warn;

/// How a failed following fetch is treated during a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// The failing user contributes an empty list, which collapses the whole
    /// intersection to empty. Default, for compatibility.
    #[default]
    EmptyList,
    /// Propagate the first fetch error instead of collapsing.
    Fail,
}

/// Split a comma-separated list of usernames, trimming whitespace and
/// dropping empty entries.
pub fn parse_user_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|username| !username.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pairwise-fold intersection: result = lists[0], then result ∩ lists[i] for
/// each subsequent list. A login survives iff it appears in every input
/// list; output order is the first list's order filtered by membership in
/// the rest.
pub fn intersect(lists: &[Vec<String>]) -> Vec<String> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };

    rest.iter().fold(first.clone(), |acc, list| {
        let members: HashSet<&str> = list.iter().map(String::as_str).collect();
        acc.into_iter()
            .filter(|login| members.contains(login.as_str()))
            .collect()
    })
}

/// Fetch each user's following list (one unpaginated request per user,
/// sequential) and intersect the logins.
pub async fn compare_followings<A: StarsApi>(
    api: &A,
    usernames: &[String],
    on_failure: FailurePolicy,
) -> Result<Vec<String>> {
    let mut followings: Vec<Vec<String>> = Vec::with_capacity(usernames.len());

    for username in usernames {
        match api.following(username).await {
            Ok(users) => {
                followings.push(users.into_iter().map(|user| user.login).collect());
            }
            Err(err) => match on_failure {
                FailurePolicy::Fail => return Err(err),
                FailurePolicy::EmptyList => {
                    warn!(username = %username, error = %err, "following fetch failed, treating as empty");
                    followings.push(Vec::new());
                }
            },
        }
    }

    Ok(intersect(&followings))
}
