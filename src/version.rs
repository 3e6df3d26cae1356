// Resolves the requested version input to a concrete release tag.
//
// Only the sentinel `latest` triggers a network call; any other token is
// passed through untouched. A version that does not actually exist is not
// caught here; it surfaces later as a download failure, which keeps this
// step to at most one API request per run.

use crate::errors::SetupError;
use crate::{log_debug, log_info};
use colored::Colorize;

/// Sentinel version input meaning "whatever the newest published release is".
pub const LATEST: &str = "latest";

/// Narrow view of the upstream release index, so the resolver can be
/// exercised without the network. The real implementation is
/// `github::GitHubReleases`.
pub trait ReleaseIndex {
    /// Returns the tag of the most recent published release.
    fn latest_tag(&self) -> Result<String, SetupError>;
}

/// Turns the `version` input into the tag to install.
pub fn resolve(requested: &str, index: &impl ReleaseIndex) -> Result<String, SetupError> {
    let requested = requested.trim();
    if requested == LATEST {
        log_info!("[Version] Input is '{}', querying the release index...", LATEST.cyan());
        let tag = index.latest_tag()?;
        log_info!("[Version] Latest ds release is {}", tag.bold());
        Ok(tag)
    } else {
        log_debug!("[Version] Using requested version {} as-is", requested.bold());
        Ok(requested.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedIndex {
        tag: &'static str,
        calls: Cell<usize>,
    }

    impl ReleaseIndex for FixedIndex {
        fn latest_tag(&self) -> Result<String, SetupError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.tag.to_string())
        }
    }

    #[test]
    fn explicit_version_passes_through_without_lookup() {
        let index = FixedIndex { tag: "v9.9.9", calls: Cell::new(0) };
        let resolved = resolve("v1.2.3", &index).unwrap();
        assert_eq!(resolved, "v1.2.3");
        assert_eq!(index.calls.get(), 0, "no network call for an explicit version");
    }

    #[test]
    fn latest_sentinel_queries_the_index_once() {
        let index = FixedIndex { tag: "v2.0.1", calls: Cell::new(0) };
        let resolved = resolve("latest", &index).unwrap();
        assert_eq!(resolved, "v2.0.1");
        assert_eq!(index.calls.get(), 1);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let index = FixedIndex { tag: "v2.0.1", calls: Cell::new(0) };
        assert_eq!(resolve("  v1.0.0 ", &index).unwrap(), "v1.0.0");
        assert_eq!(resolve(" latest ", &index).unwrap(), "v2.0.1");
    }

    #[test]
    fn index_failure_propagates() {
        struct FailingIndex;
        impl ReleaseIndex for FailingIndex {
            fn latest_tag(&self) -> Result<String, SetupError> {
                Err(SetupError::ReleaseLookup("HTTP 403".to_string()))
            }
        }
        assert!(matches!(
            resolve("latest", &FailingIndex),
            Err(SetupError::ReleaseLookup(_))
        ));
    }
}
