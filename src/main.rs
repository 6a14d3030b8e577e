use log::info;
use service::{config::Config, logging::Logger};
use std::time::Duration;
use watcher::{HttpPage, SseConnector, StreamWatcher};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let Some(stream_url) = config.stream_url() else {
        info!("No event stream URL configured (IOT_SSE_URL); live reload disabled");
        return;
    };

    let mut connector = SseConnector::new();
    let mut page = HttpPage::new(config.page_base_url(), config.watch_path());
    if let Some(cookie) = config.session_cookie() {
        connector = connector.with_session_cookie(cookie.clone());
        page = page.with_session_cookie(cookie);
    }

    info!(
        "Watching {} for changes published on {stream_url}",
        config.watch_path()
    );

    let watch = StreamWatcher::new(connector, page, stream_url)
        .with_reconnect_delay(Duration::from_millis(config.reconnect_delay_ms));

    tokio::select! {
        _ = watch.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }
}
