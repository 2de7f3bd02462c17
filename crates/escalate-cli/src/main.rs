use escalate_cli::{build_cli, logging, run, Options};
use std::io::IsTerminal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let no_color = matches.get_flag("no-color") || std::env::var_os("NO_COLOR").is_some();
    logging::init(
        matches.get_count("verbose"),
        !no_color && std::io::stderr().is_terminal(),
    );

    let options = Options {
        color: !no_color && std::io::stdout().is_terminal(),
        interactive: std::io::stdin().is_terminal(),
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    match run(&matches, options, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
