//! Runs the filter as a CGI pre-handler.
//!
//! Reads the request from the process environment, writes the synthetic
//! response to stdout when the filter answers, and exits with status 1 when
//! the request should fall through to the host. Errors exit with status 2.
//!
//! ```text
//! REQUEST_URI=/favicon.ico HTTP_ACCEPT='image/*' cargo run --example cgi_filter
//! ```

use std::io;
use std::process::ExitCode;

use dot404::web::{ExtractContext, RequestAdapter};
use dot404::{Decision, Filter};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let filter = match Filter::builder().serve_robots_txt(true).build() {
        Ok(filter) => filter,
        Err(err) => {
            tracing::error!(error = %err, "filter construction failed");
            return ExitCode::from(2);
        }
    };

    let ctx = RequestAdapter::from_server_vars(std::env::vars()).extract_context();

    match filter.handle(&ctx) {
        Decision::Respond(response) => {
            let stdout = io::stdout();
            match response.write_cgi(&mut stdout.lock()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    tracing::error!(error = %err, "failed to write response");
                    ExitCode::from(2)
                }
            }
        }
        Decision::Defer => {
            tracing::info!("deferring to host");
            ExitCode::from(1)
        }
    }
}
