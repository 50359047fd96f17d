//! Recombination of extracted fragments into a standalone script.

use crate::extract::{extract_boilerplate, extract_functions};
use thiserror::Error;

/// Errors produced while assembling a set of fragments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// A requested name has no matching definition in the library.
    #[error("unknown function: {0}")]
    UnknownFunction(String),
}

/// Select fragments from `text` for the requested function names.
///
/// The result is the ordered list of fragments to emit: the boilerplate
/// block first when the text has one, then each requested function's body
/// in request order. Duplicate requests yield duplicate fragments.
///
/// The whole request is resolved before anything is returned, so a single
/// unknown name fails the assembly outright and no partial fragment list
/// escapes.
pub fn assemble<'src>(text: &'src str, names: &[&str]) -> Result<Vec<&'src str>, AssembleError> {
    let functions = extract_functions(text);

    let mut fragments = Vec::with_capacity(names.len() + 1);
    fragments.extend(extract_boilerplate(text));

    for &name in names {
        match functions.get(name) {
            Some(entry) => fragments.push(entry.body),
            None => return Err(AssembleError::UnknownFunction(name.to_string())),
        }
    }

    tracing::debug!(requested = names.len(), fragments = fragments.len(), "assembled fragments");
    Ok(fragments)
}
