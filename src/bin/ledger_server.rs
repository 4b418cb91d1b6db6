use std::sync::Arc;

use tracing::info;

use ledger_service::config::{init_tracing, load_config};
use ledger_service::handlers;
use ledger_service::{InMemoryDocumentStore, LedgerService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = load_config()?;
    init_tracing(&cfg.log_level, cfg.log_json);

    let ledger = LedgerService::new(InMemoryDocumentStore::new());
    let service = Arc::new(handlers::service(ledger));

    let addr = cfg.bind_addr();
    info!(%addr, environment = %cfg.environment, commands = ?service.commands(), "ledger service listening");
    ledger_service::microsvc::serve(service, &addr).await?;
    Ok(())
}
