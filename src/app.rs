use crate::client::PredictionClient;
use crate::config::Config;
use std::error::Error;

/// One demo pass over the backend: fetch the latest scan and the history
/// in parallel and log what came back, canned or not.
pub async fn start_app(config: Config) -> Result<(), Box<dyn Error>> {
    let client = match PredictionClient::new(&config.backend) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to initialize prediction client: {:?}", e);
            return Err(Box::new(e));
        }
    };

    let (last_inference, history) = tokio::join!(client.last_inference(), client.history());

    tracing::info!(
        source = ?last_inference.source,
        "Last scan: {} at {:.2}%",
        last_inference.value.prediction,
        last_inference.value.confidence
    );

    tracing::info!(
        source = ?history.source,
        "History holds {} scans",
        history.value.len()
    );

    for scan in &history.value {
        tracing::debug!(
            "Scan {:?}: {} at {:.2}% ({})",
            scan.id,
            scan.prediction,
            scan.confidence,
            scan.timestamp
        );
    }

    Ok(())
}
