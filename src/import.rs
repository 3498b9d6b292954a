use crate::github::StarsApi;
use crate::types::RepoRef;
use tracing::{debug, warn};
use url::Url;

/// Aggregate outcome of one import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub starred: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Parse one line of an import list into an owner/name pair. Anything that
/// is not a github.com URL with at least owner and repository path segments
/// is rejected.
pub fn parse_repo_url(line: &str) -> Option<RepoRef> {
    let url = Url::parse(line.trim()).ok()?;
    if url.host_str() != Some("github.com") {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());
    let owner = segments.next()?.to_string();
    let name = segments.next()?.to_string();

    Some(RepoRef { owner, name })
}

/// Star every well-formed repository URL in `text`, one request at a time,
/// in line order. Malformed lines produce no request and are skipped
/// silently; a failed star request is counted and the loop moves on. There
/// is no rollback, so a failure partway through leaves a prefix starred.
pub async fn import_urls<A: StarsApi>(api: &A, text: &str) -> ImportReport {
    let mut report = ImportReport::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(repo) = parse_repo_url(line) else {
            debug!(line, "skipping line without an owner/repo path");
            report.skipped += 1;
            continue;
        };

        match api.star(&repo.owner, &repo.name).await {
            Ok(()) => report.starred += 1,
            Err(err) => {
                warn!(repo = %repo, error = %err, "star request failed");
                report.failed += 1;
            }
        }
    }

    report
}
