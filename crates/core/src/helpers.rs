use anyhow::{Context, Error};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;

pub fn load_toml<T, P: AsRef<Path>>(path: P) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .with_context(|| format!("can't read file {}", path.display()))?;
    toml::from_str(&s)
        .with_context(|| format!("can't parse TOML content from {}", path.display()))
}

pub fn save_toml<T, P: AsRef<Path>>(data: &T, path: P) -> Result<(), Error>
where
    T: Serialize,
{
    let path = path.as_ref();
    let s = toml::to_string(data).context("can't convert to TOML format")?;
    fs::write(path, &s).with_context(|| format!("can't write to file {}", path.display()))
}
