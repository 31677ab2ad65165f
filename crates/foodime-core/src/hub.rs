//! Access to the HuggingFace model hub
//!
//! [`HubClient`] is the seam the downloader talks through. [`HfHubClient`]
//! talks plain HTTP to the configured endpoint for both the repository
//! listing and single files, so files land at an exact local path instead of
//! the hub cache layout. Listings decode into hf-hub's [`RepoInfo`].

use hf_hub::api::RepoInfo;
use hf_hub::{Repo, RepoType};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ModelsConfig;
use crate::error::{Error, Result};

/// Blocking operations against a model hub
pub trait HubClient {
    /// List every file path in a repository
    fn list_files(&self, repo_id: &str) -> Result<Vec<String>>;

    /// Fetch one file from a repository into `dest`, creating parent directories
    fn fetch_file(&self, repo_id: &str, filename: &str, dest: &Path) -> Result<()>;
}

/// HuggingFace hub client authenticated with an access token
pub struct HfHubClient {
    http_client: Client,
    endpoint: String,
    revision: String,
    token: String,
}

impl HfHubClient {
    pub fn new(config: &ModelsConfig, token: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("foodime-models/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::HfHubError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.hub_endpoint.trim_end_matches('/').to_string(),
            revision: config.revision.clone(),
            token: token.to_string(),
        })
    }

    fn info_url(&self, repo_id: &str) -> String {
        let repo = Repo::with_revision(
            repo_id.to_string(),
            RepoType::Model,
            self.revision.clone(),
        );
        format!("{}/api/{}", self.endpoint, repo.api_url())
    }

    fn resolve_url(&self, repo_id: &str, filename: &str) -> String {
        format!(
            "{}/{}/resolve/{}/{}",
            self.endpoint, repo_id, self.revision, filename
        )
    }
}

impl HubClient for HfHubClient {
    fn list_files(&self, repo_id: &str) -> Result<Vec<String>> {
        let url = self.info_url(repo_id);
        debug!("Listing repository from URL: {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()?;

        if !response.status().is_success() {
            return Err(Error::HfHubError(format!(
                "HTTP {} for {}",
                response.status(),
                url
            )));
        }

        let info: RepoInfo = response.json()?;
        Ok(info.siblings.into_iter().map(|s| s.rfilename).collect())
    }

    fn fetch_file(&self, repo_id: &str, filename: &str, dest: &Path) -> Result<()> {
        let url = self.resolve_url(repo_id, filename);
        debug!("Downloading from URL: {}", url);

        let mut response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} for {}",
                response.status(),
                url
            )));
        }

        let written = write_via_part_file(&mut response, dest)?;
        debug!("Downloaded {} bytes to {:?}", written, dest);
        Ok(())
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Stream `body` into `<dest>.part` and rename it over `dest` once complete.
/// A failed copy removes the part file, so `dest` only ever holds whole files.
fn write_via_part_file<R: Read>(body: &mut R, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let part = part_path(dest);
    let copied = File::create(&part).and_then(|mut file| std::io::copy(body, &mut file));
    let written = match copied {
        Ok(written) => written,
        Err(e) => {
            if let Err(cleanup) = std::fs::remove_file(&part) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to remove partial download {:?}: {}", part, cleanup);
                }
            }
            return Err(Error::DownloadError(format!(
                "Interrupted writing {:?}: {}",
                dest, e
            )));
        }
    };

    std::fs::rename(&part, dest)?;
    Ok(written)
}
