//! Model downloads and generated model info

mod download;
mod info;

pub use download::{
    probe_candidates, DownloadReport, FetchedFile, ModelDownloader, ProbeOutcome,
};
pub use info::create_model_info;
