//! Loading the library script and the handle commands operate on.

use crate::assemble::{self, AssembleError};
use crate::extract::{self, FunctionEntry};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while reading the library file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The path does not resolve to a file.
    #[error("library not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but its content could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An in-memory copy of the library script's text.
///
/// Loading is the only I/O the crate performs; everything else is a pure
/// scan over the owned text. The accessors recompute their result on each
/// call and borrow from the text, so nothing here ever rewrites the source.
///
/// Example
/// ```
/// use shell_fragments::Library;
/// let library = Library::from_text("# utils\nhello() {\n    echo hi\n}\n");
/// assert!(library.functions().contains_key("hello"));
/// ```
#[derive(Debug)]
pub struct Library {
    text: String,
}

impl Library {
    /// Read the library file at `path` in full.
    ///
    /// Either the whole text is returned or a [`SourceError`]; a truncated
    /// read is never observable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(path.to_path_buf())
            } else {
                SourceError::ReadFailure {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded library source");
        Ok(Self { text })
    }

    /// Build a library from text already in memory. No I/O involved.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The complete, verbatim source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The shared boilerplate block, if the library defines one.
    pub fn boilerplate(&self) -> Option<&str> {
        extract::extract_boilerplate(&self.text)
    }

    /// Every function definition in the library, indexed by name.
    pub fn functions(&self) -> HashMap<&str, FunctionEntry<'_>> {
        extract::extract_functions(&self.text)
    }

    /// The ordered fragments for `names`: boilerplate first, then bodies.
    pub fn assemble(&self, names: &[&str]) -> Result<Vec<&str>, AssembleError> {
        assemble::assemble(&self.text, names)
    }
}
