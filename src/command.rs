use crate::source::Library;
use anyhow::Result;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and command-line tools.
pub type ExitCode = i32;

/// Object-safe trait for any command the tool can run.
///
/// Commands never touch the filesystem or the terminal directly: they read
/// from the already-loaded [`Library`] and write fragments to the provided
/// stream, which keeps them trivially testable against an in-memory buffer.
pub trait ExecutableCommand {
    /// Executes the command against the loaded library.
    fn execute(self: Box<Self>, library: &Library, stdout: &mut dyn Write) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`, letting the
/// runner fall through to the next factory in its list.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
