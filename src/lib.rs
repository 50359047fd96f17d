//! Vendor-ready fragments from a monolithic shell library.
//!
//! This crate reads a single shell-script "library" file and makes two kinds
//! of unit addressable: a marker-delimited boilerplate preamble and every
//! top-level `name() { ... }` function definition, indexed by name. Consumers
//! ask for the functions they need and get back the boilerplate plus those
//! definitions, verbatim, ready to paste into their own scripts without a
//! runtime dependency on the full library.
//!
//! The main entry points are [`Library`], which loads and indexes the source
//! text, and [`Runner`], which dispatches the `extract`, `list` and `show`
//! commands by name. The public modules [`extract`] and [`assemble`] expose
//! the underlying pure text operations directly.

pub mod assemble;
pub mod command;
mod commands;
pub mod extract;
mod runner;
pub mod source;

pub use assemble::AssembleError;
pub use extract::FunctionEntry;
pub use runner::{DEFAULT_LIBRARY_PATH, LIBRARY_PATH_ENV, Runner, library_path};
pub use source::{Library, SourceError};
