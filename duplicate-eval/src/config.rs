//! A minimal `key = value` parameter-file reader.
//!
//! spec.md §1 places "game-parameter files" and the other abstraction/config
//! file formats out of scope as external collaborators; this module is the
//! smallest concrete stand-in that lets `Game::Initialize` and friends run
//! end to end against a real file on disk, the way `mc_node.cpp`'s `main`
//! reads `argv[1..]` through `Params::ReadFromFile`.

use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use crate::error::{
    Error,
    Result,
};

#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub fn read_from_file(path: &Path) -> Result<Params> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Params {
        let mut values = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Params {
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    pub fn get_u32(&self, key: &str, default: u32) -> Result<u32> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("{} is not an integer: {}", key, v))),
        }
    }

    pub fn get_i32(&self, key: &str, default: i32) -> Result<i32> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("{} is not an integer: {}", key, v))),
        }
    }
}
