//! Portfolio contact server - Main entry point
//!
//! Serves the portfolio contact form over the Model Context Protocol (MCP).
//! Emails go to a real email API when one is configured and are simulated
//! otherwise.

use anyhow::Result;
use portfolio_contact::domain::EmailAddress;
use portfolio_contact::pipeline::{ContactFormService, ContactFormServiceImpl};
use portfolio_contact::sender::{HttpMessageSender, MessageSender, SimulatedSender};
use portfolio_contact::{Config, ContactFormServer, SubmissionMetrics, SubmissionPipeline};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let recipient = EmailAddress::new(config.contact_recipient.as_str())?;
    let metrics = SubmissionMetrics::new();

    let sender: Arc<dyn MessageSender> = match &config.email_api_url {
        Some(url) => {
            info!("Delivering email through API at {}", url);
            Arc::new(HttpMessageSender::new(&config)?.with_metrics(metrics.clone()))
        }
        None => {
            info!("No EMAIL_API_URL set, simulating email delivery");
            Arc::new(SimulatedSender::new(
                Duration::from_millis(config.contact_send_delay_ms),
                Duration::from_millis(config.conversational_send_delay_ms),
            ))
        }
    };

    let pipeline = SubmissionPipeline::new(sender, recipient)
        .with_send_timeout(config.send_timeout())
        .with_metrics(metrics);

    let service = Arc::new(ContactFormServiceImpl::new(Arc::new(pipeline)))
        as Arc<dyn ContactFormService>;

    let server = ContactFormServer::new(service);

    info!(
        "Portfolio contact server initialized (send timeout: {:?})",
        config.send_timeout()
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    portfolio_contact::server::run_server(server).await?;

    info!("Portfolio contact server shutdown complete");
    Ok(())
}
