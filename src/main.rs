use std::sync::Arc;

use camera_watch::config::Config;
use camera_watch::frames::open_source;
use camera_watch::logging::{init_tracing, LogConfig};
use camera_watch::monitor::{Monitor, Pipeline, StopReason};
use camera_watch::notify::{Dispatcher, HttpTransport};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // 先安装订阅器，其余配置解析时的警告才有输出
    if let Err(e) = init_tracing(&LogConfig::from_env()) {
        eprintln!("FATAL: {e}");
        std::process::exit(1);
    }
    tracing::info!("Starting camera-watch");

    let config = Config::from_env();

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    }

    let pipeline = match Pipeline::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build detector pipeline");
            std::process::exit(1);
        }
    };

    let reader = match open_source(&config.frame_source).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open frame source");
            std::process::exit(1);
        }
    };

    let transport = Arc::new(HttpTransport::new());
    let dispatcher = Dispatcher::new(&config.notify, &config.server_url, transport);

    tracing::info!(
        detectors = ?pipeline.kinds(),
        server_url = %config.server_url,
        source = %config.frame_source,
        debug_overlay = config.debug_overlay,
        "Monitoring started"
    );

    let mut monitor = Monitor::new(pipeline, dispatcher, config.debug_overlay);
    let reason = monitor.run(reader, shutdown_signal()).await;

    let summary = monitor.summary();
    tracing::info!(
        ?reason,
        frames = summary.frames,
        malformed = summary.malformed_frames,
        emitted = summary.events_emitted,
        sent = summary.events_sent,
        suppressed = summary.events_suppressed,
        "Monitoring stopped"
    );

    if reason == StopReason::SourceError {
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler, using Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
