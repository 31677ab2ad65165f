//! Model downloading from HuggingFace Hub

use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::catalog::{self, FetchStrategy, ModelDescriptor};
use crate::config::ModelsConfig;
use crate::error::Result;
use crate::hub::HubClient;

/// A file that was fetched, and the remote name it was found under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    pub file: String,
    pub remote: String,
}

/// Summary of one model download
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub model_id: String,
    pub local_dir: PathBuf,
    pub fetched: Vec<FetchedFile>,
    /// Files that could not be fetched under any candidate name
    pub missing: Vec<String>,
}

impl DownloadReport {
    fn new(model: &ModelDescriptor, local_dir: PathBuf) -> Self {
        Self {
            model_id: model.id.to_string(),
            local_dir,
            fetched: Vec::new(),
            missing: Vec::new(),
        }
    }
}

/// Result of trying a list of candidate names in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found { remote: String, local: PathBuf },
    NotFound,
}

/// Candidate remote names for a declared file: the exact name, then each prefix
pub fn probe_candidates(file: &str, prefixes: &[String]) -> Vec<String> {
    std::iter::once(file.to_string())
        .chain(
            prefixes
                .iter()
                .map(|prefix| format!("{}/{}", prefix.trim_end_matches('/'), file)),
        )
        .collect()
}

/// Downloads catalog models into the configured models directory
pub struct ModelDownloader<H> {
    hub: H,
    config: ModelsConfig,
    ignore: Vec<Pattern>,
}

impl<H: HubClient> ModelDownloader<H> {
    /// Create a new downloader
    pub fn new(hub: H, config: ModelsConfig) -> Result<Self> {
        let ignore = config
            .ignore_patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            hub,
            config,
            ignore,
        })
    }

    pub fn hub(&self) -> &H {
        &self.hub
    }

    /// Get the local path for a model
    pub fn model_path(&self, model: &ModelDescriptor) -> PathBuf {
        self.config.model_path(model.name())
    }

    /// Download one model. Individual file failures are logged and recorded in
    /// the report; only failures affecting the whole model return an error.
    pub fn download_model(&self, model: &ModelDescriptor) -> Result<DownloadReport> {
        let local_dir = self.model_path(model);
        std::fs::create_dir_all(&local_dir)?;
        info!("Downloading {} to {:?}", model.id, local_dir);

        let mut report = DownloadReport::new(model, local_dir);
        match model.fetch {
            FetchStrategy::Snapshot => self.download_snapshot(model, &mut report)?,
            FetchStrategy::PerFile => self.download_files(model, &mut report),
        }

        info!(
            "Downloaded {} ({} files, {} missing)",
            model.id,
            report.fetched.len(),
            report.missing.len()
        );
        Ok(report)
    }

    /// Download every catalog model in order
    pub fn download_all(&self) -> Vec<DownloadReport> {
        info!("Downloading all recommended TTS models");
        self.download_each(catalog::all())
    }

    /// Download a list of models, logging and skipping models that fail
    pub fn download_each(&self, models: &[ModelDescriptor]) -> Vec<DownloadReport> {
        models
            .iter()
            .filter_map(|model| match self.download_model(model) {
                Ok(report) => Some(report),
                Err(e) => {
                    error!("Error downloading {}: {}", model.id, e);
                    None
                }
            })
            .collect()
    }

    /// Try each candidate in order and stop at the first one the hub serves
    pub fn fetch_first(
        &self,
        repo_id: &str,
        candidates: &[String],
        local_dir: &Path,
    ) -> ProbeOutcome {
        for remote in candidates {
            let local = local_dir.join(remote);
            match self.hub.fetch_file(repo_id, remote, &local) {
                Ok(()) => {
                    return ProbeOutcome::Found {
                        remote: remote.clone(),
                        local,
                    }
                }
                Err(e) => debug!("{} not available as {}: {}", repo_id, remote, e),
            }
        }
        ProbeOutcome::NotFound
    }

    fn download_snapshot(
        &self,
        model: &ModelDescriptor,
        report: &mut DownloadReport,
    ) -> Result<()> {
        let files: Vec<String> = self
            .hub
            .list_files(model.id)?
            .into_iter()
            .filter(|f| !self.is_ignored(f))
            .collect();

        let pb = self.progress_bar(files.len(), model);
        for file in files {
            pb.set_message(file.clone());
            let dest = report.local_dir.join(&file);
            match self.hub.fetch_file(model.id, &file, &dest) {
                Ok(()) => report.fetched.push(FetchedFile {
                    remote: file.clone(),
                    file,
                }),
                Err(e) => {
                    warn!("Error downloading {}: {}", file, e);
                    report.missing.push(file);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(())
    }

    fn download_files(&self, model: &ModelDescriptor, report: &mut DownloadReport) {
        let pb = self.progress_bar(model.files.len(), model);
        for &file in model.files {
            pb.set_message(file.to_string());
            let dest = report.local_dir.join(file);
            match self.hub.fetch_file(model.id, file, &dest) {
                Ok(()) => report.fetched.push(FetchedFile {
                    file: file.to_string(),
                    remote: file.to_string(),
                }),
                Err(e) => {
                    warn!("Error downloading {}: {}", file, e);
                    let alternatives = probe_candidates(file, &self.config.alt_prefixes);
                    // index 0 is the exact name that just failed
                    match self.fetch_first(model.id, &alternatives[1..], &report.local_dir) {
                        ProbeOutcome::Found { remote, .. } => {
                            info!("Found {} at {}", file, remote);
                            report.fetched.push(FetchedFile {
                                file: file.to_string(),
                                remote,
                            });
                        }
                        ProbeOutcome::NotFound => {
                            warn!("Failed to find {} in alternative paths", file);
                            report.missing.push(file.to_string());
                        }
                    }
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
    }

    fn is_ignored(&self, file: &str) -> bool {
        self.ignore.iter().any(|p| p.matches(file))
    }

    fn progress_bar(&self, len: usize, model: &ModelDescriptor) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {prefix} {bar:30} {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_prefix(model.name());
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// In-memory hub that serves a fixed set of files and records every request
    struct FakeHub {
        files: HashSet<String>,
        listing: Option<Vec<String>>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeHub {
        fn serving(files: &[&str]) -> Self {
            Self {
                files: files.iter().map(|f| f.to_string()).collect(),
                listing: Some(files.iter().map(|f| f.to_string()).collect()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl HubClient for FakeHub {
        fn list_files(&self, _repo_id: &str) -> Result<Vec<String>> {
            self.listing
                .clone()
                .ok_or_else(|| Error::HfHubError("repository not found".into()))
        }

        fn fetch_file(&self, _repo_id: &str, filename: &str, dest: &Path) -> Result<()> {
            self.requests.borrow_mut().push(filename.to_string());
            if !self.files.contains(filename) {
                return Err(Error::DownloadError(format!("HTTP 404 for {}", filename)));
            }
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(dest, filename)?;
            Ok(())
        }
    }

    fn per_file_model(files: &'static [&'static str]) -> ModelDescriptor {
        ModelDescriptor {
            id: "test/per-file",
            description: "per-file test model",
            model_type: "transformer",
            size: "1MB",
            languages: &["en"],
            features: &[],
            quality: "Low",
            files,
            fetch: FetchStrategy::PerFile,
        }
    }

    fn downloader(hub: FakeHub, dir: &Path) -> ModelDownloader<FakeHub> {
        let config = ModelsConfig {
            models_dir: dir.to_path_buf(),
            show_progress: false,
            ..Default::default()
        };
        ModelDownloader::new(hub, config).unwrap()
    }

    #[test]
    fn test_probe_candidates_order() {
        let prefixes = ModelsConfig::default().alt_prefixes;
        assert_eq!(
            probe_candidates("codec", &prefixes),
            vec![
                "codec",
                "model/codec",
                "models/codec",
                "checkpoints/codec",
                "assets/codec",
                "base/codec",
            ]
        );
        assert_eq!(probe_candidates("codec", &[]), vec!["codec"]);
    }

    #[test]
    fn test_fetch_first_stops_at_first_hit() {
        let dir = tempfile::tempdir().unwrap();
        let hub = FakeHub::serving(&["models/codec", "assets/codec"]);
        let dl = downloader(hub, dir.path());
        let candidates = probe_candidates("codec", &dl.config.alt_prefixes);

        let outcome = dl.fetch_first("test/per-file", &candidates, dir.path());
        assert_eq!(
            outcome,
            ProbeOutcome::Found {
                remote: "models/codec".into(),
                local: dir.path().join("models/codec"),
            }
        );
        assert_eq!(
            *dl.hub().requests.borrow(),
            vec!["codec", "model/codec", "models/codec"]
        );
    }

    #[test]
    fn test_exhausted_probe_continues_with_next_file() {
        let dir = tempfile::tempdir().unwrap();
        let hub = FakeHub::serving(&["tokenizer", "checkpoints/codec"]);
        let dl = downloader(hub, dir.path());
        let model = per_file_model(&["bark", "tokenizer", "codec"]);

        let report = dl.download_model(&model).unwrap();

        assert_eq!(report.missing, vec!["bark"]);
        assert_eq!(
            report.fetched,
            vec![
                FetchedFile {
                    file: "tokenizer".into(),
                    remote: "tokenizer".into()
                },
                FetchedFile {
                    file: "codec".into(),
                    remote: "checkpoints/codec".into()
                },
            ]
        );
        // bark: exact name plus all five prefixes before giving up
        let requests = dl.hub().requests.borrow();
        assert_eq!(requests.iter().filter(|r| r.ends_with("bark")).count(), 6);
        assert!(report.local_dir.join("checkpoints/codec").exists());
        assert!(report.local_dir.join("tokenizer").exists());
    }

    #[test]
    fn test_snapshot_skips_ignored_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let hub = FakeHub::serving(&[
            ".gitattributes",
            "README.md",
            "config.json",
            "samples/hello.wav",
            "speaker_embeddings/en_speaker_0.npz",
            "pytorch_model.bin",
        ]);
        let dl = downloader(hub, dir.path());
        let bark = catalog::find("suno/bark-small").unwrap();

        let report = dl.download_model(bark).unwrap();

        let fetched: Vec<_> = report.fetched.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(
            fetched,
            vec![
                "config.json",
                "speaker_embeddings/en_speaker_0.npz",
                "pytorch_model.bin"
            ]
        );
        assert!(report.missing.is_empty());
        assert_eq!(report.local_dir, dir.path().join("bark-small"));
        assert!(dir
            .path()
            .join("bark-small/speaker_embeddings/en_speaker_0.npz")
            .exists());
        assert!(!dir.path().join("bark-small/README.md").exists());
    }

    #[test]
    fn test_download_each_skips_failed_models() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = FakeHub::serving(&["bark"]);
        hub.listing = None;
        let dl = downloader(hub, dir.path());
        let snapshot = catalog::find("suno/bark-small").unwrap().clone();
        let per_file = per_file_model(&["bark"]);

        let reports = dl.download_each(&[snapshot, per_file]);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].model_id, "test/per-file");
    }
}
