//! Traits for writing and reading JSON strings and files.
//!
//! Implemented for every serde type, so rules files and run summaries share one code path.

use crate::error::Result;
use std::{fs, path::Path};

/// Trait for types that can be written out as JSON.
pub trait Serialize {
    /// Serialize this value to a JSON string.
    fn to_json(&self) -> Result<String>;

    /// Serialize this value to a JSON file at the given path.
    fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Trait for types that can be read back from JSON.
pub trait Deserialize: Sized {
    /// Deserialize this value from a JSON string.
    fn from_json(s: &str) -> Result<Self>;

    /// Deserialize this value from a JSON file at the given path.
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

impl<T> Serialize for T
where
    T: serde::Serialize,
{
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T> Deserialize for T
where
    T: for<'de> serde::Deserialize<'de>,
{
    fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
