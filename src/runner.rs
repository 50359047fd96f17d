use crate::command::{CommandFactory, ExitCode};
use crate::commands::{Extract, List, Show};
use crate::source::Library;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use std::path::PathBuf;

/// Well-known name of the library script, resolved against the working directory.
pub const DEFAULT_LIBRARY_PATH: &str = "lib.sh";

/// Environment variable that overrides [`DEFAULT_LIBRARY_PATH`].
pub const LIBRARY_PATH_ENV: &str = "SHELL_FRAGMENTS_LIB";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate via the LibraryCommand trait.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Resolve the library path for this invocation.
///
/// `SHELL_FRAGMENTS_LIB` wins when set and non-empty; otherwise the
/// well-known `lib.sh` in the working directory is used.
pub fn library_path() -> PathBuf {
    match std::env::var(LIBRARY_PATH_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_LIBRARY_PATH),
    }
}

/// Dispatches command invocations against a loaded library.
///
/// The runner owns the [`Library`] and a list of [`CommandFactory`] objects
/// that are queried in order to create commands by name. See
/// [`Runner::with_default_commands`] for the set included out of the box.
///
/// Example
/// ```
/// use shell_fragments::{Library, Runner};
/// let library = Library::from_text("# utils\nhello() {\n    echo hi\n}\n");
/// let runner = Runner::with_default_commands(library);
/// let mut out = Vec::new();
/// let code = runner.run_with_output("list", &[], &mut out).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(out, b"hello\n");
/// ```
pub struct Runner {
    library: Library,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Runner {
    /// Create a runner with a custom set of command factories.
    pub fn new(library: Library, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { library, commands }
    }

    /// Create a runner with the built-in commands: `extract`, `list`, `show`.
    pub fn with_default_commands(library: Library) -> Self {
        Self::new(
            library,
            vec![
                Box::new(Factory::<Extract>::default()),
                Box::new(Factory::<List>::default()),
                Box::new(Factory::<Show>::default()),
            ],
        )
    }

    /// Load the library from [`library_path`] and attach the built-in commands.
    pub fn from_env() -> Result<Self> {
        let library = Library::load(library_path())?;
        Ok(Self::with_default_commands(library))
    }

    /// Run a single command invocation by name, writing to standard output.
    pub fn run(&self, name: &str, args: &[&str]) -> Result<ExitCode> {
        self.run_with_output(name, args, &mut std::io::stdout().lock())
    }

    /// Run a single command invocation by name with an explicit output stream.
    ///
    /// Returns the command's exit code, or an error if the name matches no
    /// command or the command itself fails.
    pub fn run_with_output(
        &self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                return cmd.execute(&self.library, stdout);
            }
        }
        Err(anyhow::anyhow!("unknown command: {}", name))
    }

    /// Interactive read-dispatch loop over the same command set as the CLI.
    ///
    /// Each input line is split on whitespace into a command name and its
    /// arguments. Errors are reported and the loop continues; Ctrl-C or
    /// Ctrl-D ends the session.
    pub fn repl(&self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline("fragments> ") {
                Ok(line) => {
                    let mut words = line.split_whitespace();
                    let Some(name) = words.next() else {
                        continue;
                    };
                    rl.add_history_entry(line.as_str())?;

                    let args: Vec<&str> = words.collect();
                    if let Err(e) = self.run(name, &args) {
                        eprintln!("shell_fragments: {:#}", e);
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("shell_fragments: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }
}
