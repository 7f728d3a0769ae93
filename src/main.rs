use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;

use pivot_sniper::{
    BinanceCandleSource, Cli, MonitorConfig, Scheduler, TelegramNotifier, health,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A. Environment and logging
    dotenvy::dotenv().ok();
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // B. Parse and validate args
    let args = Cli::parse();
    let config = Arc::new(MonitorConfig::from_cli(&args)?);
    #[cfg(debug_assertions)]
    log::info!("Monitor config: {:?}", config);

    log::info!("🚀 Pivot Sniper starting");
    log::info!("Monitoring symbols: {}", config.symbols().join(", "));
    log::info!("Intervals: {}", config.intervals().join(", "));
    log::info!("Check interval: {} seconds", config.cadence.as_secs());

    // C. Collaborators. Binding the port is the only network step allowed to abort startup.
    let source = BinanceCandleSource::new()?;
    let notifier = TelegramNotifier::new(&config.telegram)?;
    let listener = health::bind(config.port).await?;

    // D. Tasks
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let health_rx = shutdown_rx.clone();
    let health_task = tokio::spawn(async move {
        if let Err(e) = health::serve(listener, health_rx).await {
            log::error!("{:#}", e);
        }
    });

    let scheduler = Scheduler::new(source, notifier, config.clone());
    let scheduler_task = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    // E. Wait for Ctrl+C, then let the current tick finish
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Received shutdown signal (Ctrl+C)"),
        Err(e) => log::error!("Unable to listen for shutdown signal: {}", e),
    }
    let _ = shutdown_tx.send(true);

    let (scheduler_result, health_result) = tokio::join!(scheduler_task, health_task);
    if let Err(e) = scheduler_result {
        log::error!("Scheduler task panicked: {:?}", e);
    }
    if let Err(e) = health_result {
        log::error!("Health task panicked: {:?}", e);
    }

    log::info!("Shut down cleanly.");
    Ok(())
}
