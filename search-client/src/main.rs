use serde_json::Value;
use tracing::{error, info};

use search_client::{telemetry, ClientError, Dependencies, Settings};
use search_client_repository::opensearch::queries;

const USAGE: &str = "usage: search-client <target> [size]";

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    telemetry::init_tracing(settings.json_logs);

    if let Err(e) = run(&settings).await {
        error!(error = %e, "Search failed");
        std::process::exit(1);
    }
}

async fn run(settings: &Settings) -> Result<(), ClientError> {
    let mut args = std::env::args().skip(1);
    let target = args.next().ok_or_else(|| ClientError::config(USAGE))?;
    let size = args
        .next()
        .map(|raw| raw.parse::<i64>())
        .transpose()
        .map_err(|e| ClientError::config(format!("invalid size: {}", e)))?;

    let dependencies = Dependencies::new(settings)?;
    let mut documents: Vec<Value> = Vec::new();

    let mut search = dependencies.client.search().with_target(target.as_str());
    search = match &settings.document_id {
        Some(id) => search.with_identifier(id.as_str()),
        None => search.with_query(&queries::match_all())?,
    };
    if let Some(size) = size {
        search = search.with_size(size);
    }

    let response = search.with_destination(&mut documents).execute().await?;

    if let Some(engine_error) = response.engine_error() {
        return Err(ClientError::config(format!(
            "engine rejected the request: {}",
            engine_error.reason()
        )));
    }
    if response.is_not_found() {
        info!(target = %target, "Document not found");
        return Ok(());
    }

    for document in &documents {
        println!("{}", document);
    }

    info!(
        target = %target,
        took_ms = ?response.took(),
        hits = documents.len(),
        "Search completed"
    );

    Ok(())
}
