use std::process::ExitCode;

fn main() -> ExitCode {
    match twig::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            twig::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
