use std::process::ExitCode;

fn main() -> ExitCode {
    prodcat_cli::run()
}
