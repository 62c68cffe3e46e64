//! Database configuration.
//!
//! Grounded on the teacher's `core/config.rs`: a small struct carrying what
//! `open`/`create` need. Unlike the teacher, there are no memory/cache
//! tuning knobs — bidex never streams or bounds its working set (spec.md
//! §5), so there is nothing to configure beyond where the database lives
//! and, at creation time, which attributes it will index.

use std::path::{Path, PathBuf};

use crate::types::MAX_ATTRS;
use crate::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    /// Attribute names, in registration order. Only consulted by `create`;
    /// `open` reads the frozen set back from the on-disk registry.
    pub attrs: Vec<String>,
}

impl Config {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Config {
            path: path.as_ref().to_path_buf(),
            attrs: Vec::new(),
        }
    }

    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.attrs = attrs.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.attrs.len() > MAX_ATTRS {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("at most {MAX_ATTRS} attributes are supported, got {}", self.attrs.len()),
            ));
        }
        Ok(())
    }
}
