//! Prints deterministic example users for a named registry seed as JSON.
//!
//! This binary delegates to `example_data::users_cli` for parsing and
//! generation, keeping the CLI behaviour testable without spawning a process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use example_data::users_cli::{CliError, ParseOutcome, parse_args, render_users, run};

fn main() -> ExitCode {
    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            print_usage(io::stdout().lock());
            Ok(())
        }
        ParseOutcome::Options(options) => {
            let users = run(&options)?;
            let rendered = render_users(&users)?;
            write_output(&rendered);
            Ok(())
        }
    }
}

fn print_usage(mut out: impl Write) {
    let usage = concat!(
        "Usage: example-data-users --registry <path> [options]\n",
        "\n",
        "Options:\n",
        "  --registry <path>    Path to the seed registry JSON file\n",
        "  --seed <name>        Seed to generate (defaults to the first seed)\n",
        "  --count <n>          Override the seed's user count\n",
        "  --active-only        Omit inactive users\n",
        "  -h, --help           Print this help output\n",
    );
    if let Err(err) = out.write_all(usage.as_bytes()) {
        drop(err);
    }
}

fn write_output(rendered: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{rendered}") {
        drop(err);
    }
}
