use std::process::ExitCode;

use fulfilmentd::hello;

fn main() -> ExitCode {
    match fulfilmentd::run_daemon(hello::register_hello_world) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(
                target: concat!(env!("CARGO_PKG_NAME"), "::main"),
                error = %error,
                "daemon exited with an error"
            );
            ExitCode::FAILURE
        }
    }
}
