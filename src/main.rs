use std::process::ExitCode;

use gitmig::output as out;
use gitmig::GitMigError;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = gitmig::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<GitMigError>() {
            Some(GitMigError::Interrupted) => {
                out::print_warn("Migration interrupted.");
                ExitCode::from(130)
            }
            Some(gm) => {
                out::print_error(&gm.to_string());
                ExitCode::from(gm.code() as u8)
            }
            None => {
                out::print_error(&format!("{e:#}"));
                ExitCode::FAILURE
            }
        },
    }
}
