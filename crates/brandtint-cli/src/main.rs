#![forbid(unsafe_code)]

fn main() {
    brandtint_cli::util::init_tracing();
    if let Err(error) = brandtint_cli::run_from_env() {
        tracing::debug!(?error, "command failed");
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
