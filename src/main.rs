use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match symptocheck_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("symptocheck: {e}");
            ExitCode::FAILURE
        }
    }
}
