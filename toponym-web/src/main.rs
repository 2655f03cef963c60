use std::net::SocketAddr;
use std::path::PathBuf;

use structopt::StructOpt;
use tracing::{error, info, warn};

use toponym_core::gazetteer::{Gazetteer, GazetteerSource};
use toponym_web::{app, init_logging};

#[derive(StructOpt)]
struct CliArgs {
    #[structopt(long = "log-level", case_insensitive = true, default_value = "INFO")]
    log_level: tracing::Level,
    /// Reference sheet of canonical names (.csv, .tsv or .json)
    #[structopt(long, parse(from_os_str), default_value = "data/ottoman_locations.csv")]
    data: PathBuf,
    #[structopt(long, default_value = "cleaned_location_name")]
    column: String,
    #[structopt(long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() {
    let args = CliArgs::from_args();
    init_logging(args.log_level);

    let source = GazetteerSource::new(args.data).with_column(args.column);
    match Gazetteer::load(&source) {
        Ok(gaz) => info!("Gazetteer ready: {} entries", gaz.len()),
        Err(err) => warn!("{err}, requests will retry the load"),
    }

    info!("Listening on {}", args.bind);
    let server = axum::Server::bind(&args.bind).serve(app(source).into_make_service());
    if let Err(err) = server.await {
        error!("Server error: {err}");
        std::process::exit(1);
    }
}
