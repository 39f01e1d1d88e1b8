//! Prepares per-profile OSRM datasets (download + preprocess) for the
//! container-backed tests.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct GeofabrikRegion {
    /// Geofabrik region path, e.g. "europe/germany/baden-wuerttemberg/stuttgart-regbez".
    pub path: String,
}

impl GeofabrikRegion {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn name(&self) -> String {
        self.path.rsplit('/').next().unwrap_or("region").to_string()
    }

    pub fn url(&self) -> String {
        format!("https://download.geofabrik.de/{}-latest.osm.pbf", self.path)
    }
}

/// Lua profile an extract is built with.
#[derive(Debug, Clone)]
pub enum VehicleProfile {
    /// One of the profiles shipped in the image under `/opt`.
    Bundled(&'static str),
    /// A custom `.lua` file on the host, copied into the dataset directory.
    Custom(PathBuf),
}

impl VehicleProfile {
    fn dir_name(&self) -> String {
        match self {
            VehicleProfile::Bundled(name) => (*name).to_string(),
            VehicleProfile::Custom(path) => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("custom")
                .to_string(),
        }
    }
}

#[derive(Debug)]
pub enum DatasetError {
    Io(io::Error),
    Http(reqwest::Error),
    ProcessFailure(String),
}

impl From<io::Error> for DatasetError {
    fn from(err: io::Error) -> Self {
        DatasetError::Io(err)
    }
}

impl From<reqwest::Error> for DatasetError {
    fn from(err: reqwest::Error) -> Self {
        DatasetError::Http(err)
    }
}

#[derive(Debug, Clone)]
pub struct ProfileDataset {
    pub data_dir: PathBuf,
    pub osrm_file: String,
}

impl ProfileDataset {
    /// Downloads the region once and builds an MLD dataset for `profile`
    /// under `<data_root>/<region>/<profile>/`.
    pub fn ensure(
        region: &GeofabrikRegion,
        profile: &VehicleProfile,
        data_root: impl AsRef<Path>,
    ) -> Result<Self, DatasetError> {
        let data_root = data_root.as_ref();
        let data_root = if data_root.is_absolute() {
            data_root.to_path_buf()
        } else {
            std::env::current_dir()?.join(data_root)
        };
        let region_dir = data_root.join(region.name());
        let data_dir = region_dir.join(profile.dir_name());
        fs::create_dir_all(&data_dir)?;

        let pbf_name = format!("{}-latest.osm.pbf", region.name());
        let shared_pbf = region_dir.join(&pbf_name);
        if !shared_pbf.exists() {
            download_pbf(&region.url(), &shared_pbf)?;
        }
        let pbf_path = data_dir.join(&pbf_name);
        if !pbf_path.exists() {
            fs::copy(&shared_pbf, &pbf_path)?;
        }

        let lua = match profile {
            VehicleProfile::Bundled(name) => format!("/opt/{name}.lua"),
            VehicleProfile::Custom(path) => {
                let file = file_name(path);
                fs::copy(path, data_dir.join(&file))?;
                format!("/data/{file}")
            }
        };

        let osrm_file = format!("{}-latest.osrm", region.name());
        let osrm_base = data_dir.join(&osrm_file);
        if !osrm_base.exists() {
            run_docker(&["osrm-extract", "-p", &lua, &format!("/data/{pbf_name}")], &data_dir)?;
        }
        if !mld_ready(&osrm_base) {
            run_docker(&["osrm-partition", &format!("/data/{osrm_file}")], &data_dir)?;
            run_docker(&["osrm-customize", &format!("/data/{osrm_file}")], &data_dir)?;
        }

        Ok(Self { data_dir, osrm_file })
    }
}

fn download_pbf(url: &str, dest: &Path) -> Result<(), DatasetError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let tmp_path = dest.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    writer.write_all(&response.bytes()?)?;
    writer.flush()?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

fn mld_ready(osrm_base: &Path) -> bool {
    ["osrm.partition", "osrm.mldgr", "osrm.cells"]
        .iter()
        .all(|ext| osrm_base.with_extension(ext).exists())
}

fn run_docker(args: &[&str], data_dir: &Path) -> Result<(), DatasetError> {
    let status = Command::new("docker")
        .arg("run")
        .arg("--rm")
        .arg("-t")
        .arg("-v")
        .arg(format!("{}:/data", data_dir.display()))
        .arg("osrm/osrm-backend")
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(DatasetError::ProcessFailure(format!(
            "docker exited with status {status}"
        )))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
