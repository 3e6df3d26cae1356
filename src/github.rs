// GitHub-backed collaborators: the latest-release lookup and the asset
// download. These are the only two places the step touches the network,
// and both sit behind the narrow traits the orchestration code consumes
// (`version::ReleaseIndex`, `installer::ArtifactFetcher`).

use crate::errors::SetupError;
use crate::installer::ArtifactFetcher;
use crate::schema::Release;
use crate::version::ReleaseIndex;
use crate::log_debug;
use colored::Colorize;
use std::fs::File;
use std::path::Path;

/// Host serving release downloads.
pub const RELEASE_HOST: &str = "github.com";
/// Host serving the release-index API.
const API_HOST: &str = "api.github.com";
/// The upstream repository publishing ds releases, in `owner/repo` form.
pub const DS_REPO: &str = "ds-tools/ds";

const USER_AGENT: &str = "setup-ds";

/// GitHub release-index client. Carries the optional API token; unauthenticated
/// requests work too, just with a much lower rate limit.
pub struct GitHubReleases {
    agent: ureq::Agent,
    token: Option<String>,
}

impl GitHubReleases {
    pub fn new(token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
        GitHubReleases { agent, token }
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.token {
            Some(token) if !token.trim().is_empty() => {
                request.set("Authorization", &format!("Bearer {}", token.trim()))
            }
            _ => request,
        }
    }
}

impl ReleaseIndex for GitHubReleases {
    /// One GET against `/releases/latest`; the payload's `tag_name` is the
    /// resolved version.
    fn latest_tag(&self) -> Result<String, SetupError> {
        let url = format!("https://{API_HOST}/repos/{DS_REPO}/releases/latest");
        log_debug!("[GitHub] Fetching latest release metadata from {}", url.blue());

        let response = self
            .authorize(self.agent.get(&url))
            .call()
            .map_err(|e| SetupError::ReleaseLookup(e.to_string()))?;

        let release: Release = response
            .into_json()
            .map_err(|e| SetupError::ReleaseLookup(format!("invalid release JSON: {e}")))?;

        Ok(release.tag_name)
    }
}

/// Downloads a release asset over HTTPS and streams it to a local file.
pub struct HttpFetcher {
    agent: ureq::Agent,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
        HttpFetcher { agent, token }
    }
}

impl ArtifactFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), SetupError> {
        log_debug!("[GitHub] Downloading {} to {}", url.blue(), dest.display());

        let mut request = self.agent.get(url);
        if let Some(token) = &self.token {
            if !token.trim().is_empty() {
                request = request.set("Authorization", &format!("Bearer {}", token.trim()));
            }
        }

        let response = request.call().map_err(|e| SetupError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut reader = response.into_reader();
        let mut file = File::create(dest).map_err(|e| SetupError::DownloadFailed {
            url: url.to_string(),
            reason: format!("cannot create {}: {e}", dest.display()),
        })?;
        std::io::copy(&mut reader, &mut file).map_err(|e| SetupError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        log_debug!("[GitHub] Download finished: {}", dest.display());
        Ok(())
    }
}
