use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::runner::Factory;
use crate::source::Library;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;

/// Commands known to the tool at compile time.
///
/// Arguments are parsed with the [`argh`] crate (`FromArgs`), so each command
/// gets `--help` output and argument validation for free.
pub(crate) trait LibraryCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "extract" or "list".
    fn name() -> &'static str;

    /// Executes the command using the loaded library and output stream.
    ///
    /// Return value follows shell conventions: 0 for success, non-zero for error.
    fn execute(self, library: &Library, stdout: &mut dyn Write) -> Result<ExitCode>;
}

impl<T: LibraryCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, library: &Library, stdout: &mut dyn Write) -> Result<ExitCode> {
        T::execute(*self, library, stdout)
    }
}

/// Fallback command carrying `argh`'s own output for `--help` or bad usage.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, _library: &Library, stdout: &mut dyn Write) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: LibraryCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Print the boilerplate block followed by each named function, verbatim,
/// in the order the names are given.
pub struct Extract {
    #[argh(positional, greedy)]
    /// function names to extract; may repeat, may be empty for boilerplate only.
    pub names: Vec<String>,
}

impl LibraryCommand for Extract {
    fn name() -> &'static str {
        "extract"
    }

    fn execute(self, library: &Library, stdout: &mut dyn Write) -> Result<ExitCode> {
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        // Resolve the whole request before writing the first byte, so an
        // unknown name never leaves partial output behind.
        let fragments = library.assemble(&names)?;
        for fragment in fragments {
            writeln!(stdout, "{}", fragment)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the name of every function defined in the library, sorted, one per line.
pub struct List {}

impl LibraryCommand for List {
    fn name() -> &'static str {
        "list"
    }

    fn execute(self, library: &Library, stdout: &mut dyn Write) -> Result<ExitCode> {
        let mut names: Vec<&str> = library.functions().into_keys().collect();
        names.sort_unstable();
        for name in names {
            writeln!(stdout, "{}", name)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print a single function definition, without the boilerplate preamble.
pub struct Show {
    #[argh(positional)]
    /// name of the function to print.
    pub name: String,
}

impl LibraryCommand for Show {
    fn name() -> &'static str {
        "show"
    }

    fn execute(self, library: &Library, stdout: &mut dyn Write) -> Result<ExitCode> {
        let functions = library.functions();
        let entry = functions
            .get(self.name.as_str())
            .ok_or_else(|| crate::assemble::AssembleError::UnknownFunction(self.name.clone()))?;
        writeln!(stdout, "{}", entry.body)?;
        Ok(0)
    }
}
