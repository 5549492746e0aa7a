use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match clinic_intake::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("clinic-intake: {e}");
            ExitCode::FAILURE
        }
    }
}
