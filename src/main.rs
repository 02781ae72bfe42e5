#[macro_use]
extern crate rocket;

mod config;
mod dice;
mod error;
mod graphql;
mod logging;
mod store;


use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::response::{content, Redirect};
use rocket::{Build, Rocket, State};
use serde::Serialize;

use crate::config::Config;
use crate::graphql::schema::{self, Schema};
use crate::graphql::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Serialize, Debug)]
#[clap(name = "Hello GraphQL Server", version = VERSION)]
struct Opts {
    /// Port to listen on.
    #[clap(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,

    /// Address to bind to.
    #[clap(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<IpAddr>,

    /// Configuration file to read instead of the per-user default.
    #[clap(short, long)]
    #[serde(skip)]
    config: Option<PathBuf>,

    /// Print the GraphQL schema and exit.
    #[clap(long)]
    #[serde(skip)]
    print_schema: bool,
}

#[get("/graphiql")]
fn graphiql() -> content::RawHtml<String> {
    juniper_rocket::graphiql_source("/graphql", None)
}

#[get("/graphql?<request..>")]
async fn get_graphql_handler(
    state: &State<AppState>,
    client_ip: Option<IpAddr>,
    request: juniper_rocket::GraphQLRequest,
    schema: &State<Schema>,
) -> juniper_rocket::GraphQLResponse {
    request.execute(schema, &state.context(client_ip)).await
}

#[post("/graphql", data = "<request>")]
async fn post_graphql_handler(
    state: &State<AppState>,
    client_ip: Option<IpAddr>,
    request: juniper_rocket::GraphQLRequest,
    schema: &State<Schema>,
) -> juniper_rocket::GraphQLResponse {
    request.execute(schema, &state.context(client_ip)).await
}

#[get("/")]
fn root_redirect() -> Redirect {
    Redirect::temporary("/graphiql")
}

#[get("/health")]
fn health() -> Status {
    Status::Ok
}

/// Assembles the server: schema, shared state, routes and the client address
/// logger. Listener settings come from `config`.
fn build_rocket(config: &Config, state: AppState) -> Rocket<Build> {
    let rocket_figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port));

    let mut rocket = rocket::custom(rocket_figment)
        .attach(AdHoc::on_request("Client address logger", |req, _| {
            Box::pin(async move {
                match req.client_ip() {
                    Some(ip) => log::info!("ip: {} {} {}", ip, req.method(), req.uri()),
                    None => log::info!("ip: unknown {} {}", req.method(), req.uri()),
                }
            })
        }))
        .manage(state)
        .manage(schema::new_schema())
        .mount(
            "/",
            routes![
                get_graphql_handler,
                post_graphql_handler,
                health
            ],
        );

    if config.graphiql {
        rocket = rocket.mount("/", routes![graphiql, root_redirect]);
    }

    rocket
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();

    if opts.print_schema {
        print!("{}", schema::schema_sdl());
        return Ok(());
    }

    let config_file = match &opts.config {
        Some(path) => path.clone(),
        None => {
            let file = Config::default_file()
                .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE_NAME));
            // If we don't have an existing config file, just write the defaults to it
            if let Err(e) = Config::write_default_if_missing(&file) {
                eprintln!("Unable to write default configuration to {:?}: {}", file, e);
            }
            file
        }
    };

    let config = Config::load(&config_file, &opts)
        .context("The provided configuration is invalid")?;

    logging::setup_logger(&config).context("Failed to initialize logging")?;

    log::info!("Hello GraphQL Server v{}", VERSION);
    log::info!("Using configuration {:?}", config_file);
    log::info!("Using log path {:?}", config.log_file_path);
    log::info!(
        "Running a GraphQL API server at http://{}:{}/graphql",
        config.address,
        config.port
    );

    build_rocket(&config, AppState::default())
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to launch the web server: {}", e))?;

    log::info!("Shutting down the server");
    Ok(())
}
