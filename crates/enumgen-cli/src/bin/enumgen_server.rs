use anyhow::Result;
use clap::Parser;

use enumgen_cli::args::{SERVER_LONG_FLAGS, ServerArgs, preprocess_args};

#[tokio::main]
async fn main() -> Result<()> {
    enumgen_cli::tracing_config::init_tracing(Some("info"));

    let args = ServerArgs::parse_from(preprocess_args(
        std::env::args_os().collect(),
        SERVER_LONG_FLAGS,
    ));
    enumgen_cli::server::serve(args.http).await
}
