use shell_fragments::Runner;
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn run(args: &[String]) -> anyhow::Result<i32> {
    let runner = Runner::from_env()?;

    match args {
        [] => {
            runner.repl()?;
            Ok(0)
        }
        [name, rest @ ..] => {
            let arg_refs: Vec<&str> = rest.iter().map(String::as_str).collect();
            runner.run(name, &arg_refs)
        }
    }
}

fn main() {
    // Diagnostics go to stderr so stdout stays a clean fragment stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("shell_fragments: {:#}", e);
            exit(1);
        }
    }
}
