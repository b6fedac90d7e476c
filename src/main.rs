use repomirror::common::logging::init_logging;
use repomirror::presentation::cli::CliApp;

#[tokio::main]
async fn main() {
    let app = CliApp::new();

    // Initialize logging
    init_logging(app.verbose());

    // Run the CLI application
    let code = app.run().await;
    std::process::exit(code);
}
