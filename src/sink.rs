//! Visualization sinks for the combined feature collection.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::Command;

use geojson::FeatureCollection;
use url::form_urlencoded;

use crate::error::Error;
use crate::traits::VisualizationSink;

const GEOJSON_IO: &str = "https://geojson.io/";

/// Longest URL handed to the opener. Linux rejects single arguments above
/// 128 KiB.
pub const MAX_URL_LEN: usize = 100_000;

/// Where a collection ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Opened on geojson.io through a data-URI link of this length.
    Browser { url_len: usize },
    /// Too large for a link; written to this file instead.
    File(PathBuf),
}

/// Opens the collection on geojson.io in the default browser.
///
/// Small collections travel inside the URL fragment as a data URI, so nothing
/// is uploaded. Larger ones are written to `fallback_dir` and reported.
#[derive(Debug, Clone)]
pub struct GeojsonIoSink {
    base_url: String,
    opener: Vec<String>,
    max_url_len: usize,
    fallback_dir: PathBuf,
}

impl Default for GeojsonIoSink {
    fn default() -> Self {
        Self {
            base_url: GEOJSON_IO.to_string(),
            opener: platform_opener(),
            max_url_len: MAX_URL_LEN,
            fallback_dir: std::env::temp_dir(),
        }
    }
}

impl GeojsonIoSink {
    /// Uses `opener` (program followed by its leading arguments) instead of
    /// the platform default.
    pub fn with_opener(opener: Vec<String>) -> Self {
        Self {
            opener,
            ..Self::default()
        }
    }

    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback_dir = dir.into();
        self
    }

    pub fn url_for(&self, collection: &FeatureCollection) -> Result<String, Error> {
        let json = serde_json::to_string(collection)?;
        // Data URIs want `%20`, not the form encoding's `+`.
        let encoded = form_urlencoded::byte_serialize(json.as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        Ok(format!(
            "{}#data=data:application/json,{}",
            self.base_url, encoded
        ))
    }

    pub fn deliver(&self, collection: &FeatureCollection) -> Result<Delivery, Error> {
        let url = self.url_for(collection)?;
        if url.len() > self.max_url_len {
            let path = self
                .fallback_dir
                .join(format!("profile-compare-{}.geojson", std::process::id()));
            FileSink::new(&path).display(collection)?;
            tracing::warn!(
                path = %path.display(),
                "collection too large for a geojson.io link ({} bytes); open the file on {}",
                url.len(),
                self.base_url
            );
            return Ok(Delivery::File(path));
        }

        self.open(&url)?;
        Ok(Delivery::Browser { url_len: url.len() })
    }

    fn open(&self, url: &str) -> Result<(), Error> {
        let (program, args) = self
            .opener
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no browser opener configured"))?;

        tracing::info!(program = %program, "opening geojson.io ({} bytes)", url.len());
        let status = Command::new(program).args(args).arg(url).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Sink(io::Error::other(format!(
                "{program} exited with status {status}"
            ))))
        }
    }
}

impl VisualizationSink for GeojsonIoSink {
    fn display(&self, collection: &FeatureCollection) -> Result<(), Error> {
        self.deliver(collection).map(|_| ())
    }
}

fn platform_opener() -> Vec<String> {
    let opener: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        &["cmd", "/C", "start", ""]
    } else {
        &["xdg-open"]
    };
    opener.iter().map(|part| part.to_string()).collect()
}

/// Writes the collection as pretty-printed GeoJSON.
#[derive(Debug, Clone)]
pub struct FileSink {
    pub path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VisualizationSink for FileSink {
    fn display(&self, collection: &FeatureCollection) -> Result<(), Error> {
        let tmp_path = self.path.with_extension("tmp");
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        serde_json::to_writer_pretty(&mut writer, collection)?;
        writer.flush()?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::info!(path = %self.path.display(), "feature collection written");
        Ok(())
    }
}
