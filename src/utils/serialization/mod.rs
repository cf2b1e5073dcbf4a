use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;

pub trait Serializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<Vec<u8>>;
    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T>;

    fn serialize_to_string<T: Serialize>(&self, data: &T) -> Result<String> {
        let bytes = self.serialize(data)?;
        String::from_utf8(bytes).context("serializer produced invalid UTF-8")
    }
}

/// Compact JSON.
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(data).map_err(Into::into)
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_json::from_slice(data).map_err(Into::into)
    }
}

/// JSON indented with two spaces, the layout Elementor's own exports use.
pub struct PrettyJsonSerializer;

impl Serializer for PrettyJsonSerializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(Into::into)
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_json::from_slice(data).map_err(Into::into)
    }
}

pub struct FileUtils;

impl FileUtils {
    /// Write text to `path`, creating missing parent directories.
    pub fn write_text(path: &Path, text: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}
