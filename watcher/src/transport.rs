use anyhow::Result;
use async_trait::async_trait;
use eventsource_client::{self as es, Client};
use futures_util::stream::{BoxStream, StreamExt};
use log::*;

/// One item observed on a live subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamItem {
    /// Data body of a default `message` event.
    Message(String),
    /// Keep-alive comment, or an event type the watcher does not consume.
    Comment,
}

/// A live, one-directional subscription to an event stream.
#[async_trait]
pub trait EventStream: Send {
    /// The next item on the stream.
    ///
    /// An `Err` signals a transport failure. A stream that ends is
    /// reported the same way, so the caller's reconnect policy applies
    /// uniformly to both.
    async fn next(&mut self) -> Result<StreamItem>;
}

/// Opens subscriptions against an event stream endpoint.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    type Stream: EventStream;

    /// Whether this transport is available in the current environment.
    ///
    /// When `false`, the watcher declines to start and never subscribes.
    fn supported(&self) -> bool {
        true
    }

    async fn connect(&self, endpoint: &str) -> Result<Self::Stream>;
}

/// Production connector backed by `eventsource-client`.
///
/// The library's own retry machinery is disabled; reconnect policy
/// belongs to [`StreamWatcher`](crate::watch::StreamWatcher).
#[derive(Debug, Clone, Default)]
pub struct SseConnector {
    session_cookie: Option<String>,
}

impl SseConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send the dashboard session cookie with the subscription request.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }
}

#[async_trait]
impl StreamConnector for SseConnector {
    type Stream = SseStream;

    async fn connect(&self, endpoint: &str) -> Result<SseStream> {
        let mut builder = es::ClientBuilder::for_url(endpoint)?
            .reconnect(es::ReconnectOptions::reconnect(false).build());

        if let Some(cookie) = &self.session_cookie {
            builder = builder.header("Cookie", &format!("session={cookie}"))?;
        }

        Ok(SseStream {
            inner: builder.build().stream(),
        })
    }
}

/// A live SSE subscription; replaced wholesale on reconnect.
pub struct SseStream {
    inner: BoxStream<'static, Result<es::SSE, es::Error>>,
}

#[async_trait]
impl EventStream for SseStream {
    async fn next(&mut self) -> Result<StreamItem> {
        match self.inner.next().await {
            Some(Ok(es::SSE::Event(event))) => {
                if event.event_type == "message" {
                    Ok(StreamItem::Message(event.data))
                } else {
                    trace!("Ignoring {} event", event.event_type);
                    Ok(StreamItem::Comment)
                }
            }
            Some(Ok(es::SSE::Comment(_))) => Ok(StreamItem::Comment),
            Some(Err(e)) => Err(e.into()),
            None => Err(anyhow::anyhow!("event stream closed by server")),
        }
    }
}
