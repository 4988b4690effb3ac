use std::process::ExitCode;

fn main() -> ExitCode {
    match npl_analysis::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(exit_code = err.exit_code(), "run aborted");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
