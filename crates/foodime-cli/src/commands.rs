//! Command dispatch
//!
//! Flags are checked in a fixed order: token, `--list`, `--create-info`,
//! `--download`, `--download-all`. Listing and info generation return
//! immediately; a single-model download is followed by `--download-all` when
//! both are given.

use foodime_core::{
    catalog, create_model_info, DownloadReport, HubClient, ModelDownloader, ModelsConfig,
    TOKEN_ENV_VAR,
};
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::Cli;

/// What a single invocation ended up doing
#[derive(Debug)]
pub enum Outcome {
    MissingToken,
    Listed,
    InfoCreated(Vec<PathBuf>),
    UnknownModel(String),
    Downloaded(Vec<DownloadReport>),
    NothingToDo,
}

/// Run the action selected by `cli`. `connect` builds the hub client and is
/// only called once a download is actually going to happen.
pub fn run<H, F>(cli: &Cli, config: ModelsConfig, connect: F) -> anyhow::Result<Outcome>
where
    H: HubClient,
    F: FnOnce(&ModelsConfig, &str) -> foodime_core::Result<H>,
{
    let Some(token) = cli.token.as_deref().filter(|t| !t.is_empty()) else {
        error!(
            "Hugging Face API token required. Set {} or use --token",
            TOKEN_ENV_VAR
        );
        return Ok(Outcome::MissingToken);
    };

    if cli.list {
        print!("{}", catalog::list_models());
        return Ok(Outcome::Listed);
    }

    if cli.create_info {
        let written = create_model_info(&config)?;
        return Ok(Outcome::InfoCreated(written));
    }

    let model = match cli.download.as_deref() {
        Some(id) => match catalog::find(id) {
            Some(model) => Some(model),
            None => {
                error!("Model {} not found in recommended models", id);
                return Ok(Outcome::UnknownModel(id.to_string()));
            }
        },
        None => None,
    };

    if model.is_none() && !cli.download_all {
        info!("Nothing to do; pass --list, --create-info, --download or --download-all");
        return Ok(Outcome::NothingToDo);
    }

    let hub = connect(&config, token)?;
    let downloader = ModelDownloader::new(hub, config)?;

    let mut reports = Vec::new();
    if let Some(model) = model {
        reports.extend(downloader.download_each(std::slice::from_ref(model)));
    }
    if cli.download_all {
        reports.extend(downloader.download_all());
    }
    Ok(Outcome::Downloaded(reports))
}

/// Print the user-facing summary of an invocation
pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::InfoCreated(written) => {
            println!("Created model info files:");
            for path in written {
                println!("  {}", path.display());
            }
        }
        Outcome::Downloaded(reports) => {
            for report in reports {
                println!(
                    "Successfully downloaded {} to {} ({} files)",
                    report.model_id,
                    report.local_dir.display(),
                    report.fetched.len()
                );
                if !report.missing.is_empty() {
                    println!("  missing: {}", report.missing.join(", "));
                }
            }
        }
        Outcome::UnknownModel(id) => {
            println!("Known models: {}", known_models().join(", "));
            debug!("rejected model id {}", id);
        }
        Outcome::MissingToken | Outcome::Listed | Outcome::NothingToDo => {}
    }
}

fn known_models() -> Vec<&'static str> {
    catalog::all().iter().map(|m| m.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodime_core::Error;
    use std::cell::Cell;
    use std::path::Path;

    struct StaticHub;

    impl HubClient for StaticHub {
        fn list_files(&self, _repo_id: &str) -> foodime_core::Result<Vec<String>> {
            Ok(vec!["config.json".to_string(), "README.md".to_string()])
        }

        fn fetch_file(
            &self,
            _repo_id: &str,
            filename: &str,
            dest: &Path,
        ) -> foodime_core::Result<()> {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(dest, filename)?;
            Ok(())
        }
    }

    fn config_in(dir: &Path) -> ModelsConfig {
        ModelsConfig {
            models_dir: dir.join("models/tts"),
            show_progress: false,
            ..Default::default()
        }
    }

    fn cli_with_token() -> Cli {
        Cli {
            token: Some("hf_test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_token_blocks_every_action() {
        let dir = tempfile::tempdir().unwrap();
        let connects = Cell::new(0);
        for token in [None, Some(String::new())] {
            let cli = Cli {
                token,
                list: true,
                create_info: true,
                download: Some("suno/bark-small".to_string()),
                download_all: true,
                ..Default::default()
            };

            let outcome = run(&cli, config_in(dir.path()), |_: &ModelsConfig, _: &str| {
                connects.set(connects.get() + 1);
                Ok(StaticHub)
            })
            .unwrap();

            assert!(matches!(outcome, Outcome::MissingToken));
        }
        assert_eq!(connects.get(), 0);
        assert!(!dir.path().join("models").exists());
    }

    #[test]
    fn test_unknown_model_aborts_before_connecting() {
        let dir = tempfile::tempdir().unwrap();
        let connects = Cell::new(0);
        let cli = Cli {
            download: Some("suno/bark-large".to_string()),
            download_all: true,
            ..cli_with_token()
        };

        let outcome = run(&cli, config_in(dir.path()), |_: &ModelsConfig, _: &str| {
            connects.set(connects.get() + 1);
            Ok(StaticHub)
        })
        .unwrap();

        assert!(matches!(outcome, Outcome::UnknownModel(ref id) if id == "suno/bark-large"));
        assert_eq!(connects.get(), 0);
        assert!(!dir.path().join("models").exists());
    }

    #[test]
    fn test_list_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            list: true,
            create_info: true,
            download_all: true,
            ..cli_with_token()
        };

        let outcome = run(&cli, config_in(dir.path()), |_: &ModelsConfig, _: &str| {
            Err::<StaticHub, _>(Error::HfHubError("should not connect".into()))
        })
        .unwrap();

        assert!(matches!(outcome, Outcome::Listed));
        assert!(!dir.path().join("models").exists());
    }

    #[test]
    fn test_create_info_returns_before_downloads() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            create_info: true,
            download_all: true,
            ..cli_with_token()
        };

        let outcome = run(&cli, config_in(dir.path()), |_: &ModelsConfig, _: &str| {
            Err::<StaticHub, _>(Error::HfHubError("should not connect".into()))
        })
        .unwrap();

        let written = match outcome {
            Outcome::InfoCreated(written) => written,
            other => panic!("expected info files, got {:?}", other),
        };
        assert!(written.iter().all(|p| p.exists()));
        assert!(dir.path().join("models/tts/configs/bark-small.toml").exists());
        assert!(!dir.path().join("models/tts/bark-small").exists());
    }

    #[test]
    fn test_download_then_download_all() {
        let dir = tempfile::tempdir().unwrap();
        let connects = Cell::new(0);
        let cli = Cli {
            download: Some("suno/bark-small".to_string()),
            download_all: true,
            ..cli_with_token()
        };

        let outcome = run(&cli, config_in(dir.path()), |_: &ModelsConfig, token: &str| {
            assert_eq!(token, "hf_test");
            connects.set(connects.get() + 1);
            Ok(StaticHub)
        })
        .unwrap();

        let reports = match outcome {
            Outcome::Downloaded(reports) => reports,
            other => panic!("expected downloads, got {:?}", other),
        };
        assert_eq!(connects.get(), 1);
        assert_eq!(reports.len(), 1 + catalog::all().len());
        assert!(dir.path().join("models/tts/bark-small/config.json").exists());
        assert!(!dir.path().join("models/tts/bark-small/README.md").exists());
    }

    #[test]
    fn test_no_action_flags() {
        let dir = tempfile::tempdir().unwrap();
        let connects = Cell::new(0);
        let cli = cli_with_token();

        let outcome = run(&cli, config_in(dir.path()), |_: &ModelsConfig, _: &str| {
            connects.set(connects.get() + 1);
            Ok(StaticHub)
        })
        .unwrap();

        assert!(matches!(outcome, Outcome::NothingToDo));
        assert_eq!(connects.get(), 0);
        assert!(!dir.path().join("models").exists());
    }
}
