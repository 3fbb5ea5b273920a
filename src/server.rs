use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{Extension, Router, routing::get};
use reqwest::Url;
use tokio::{
    net::TcpListener,
    sync::{Notify, oneshot},
    task::JoinHandle,
};

use crate::{api, error::AuthError, types::CallbackOutcome};

/// How long `stop` waits for in-flight connections before aborting the server.
const STOP_GRACE: Duration = Duration::from_secs(2);

/// State shared between the listener and the redirect handler for one
/// authorization attempt.
pub struct CallbackSession {
    outcome: Mutex<Option<oneshot::Sender<CallbackOutcome>>>,
    shutdown: Notify,
}

impl CallbackSession {
    fn new(tx: oneshot::Sender<CallbackOutcome>) -> Self {
        Self {
            outcome: Mutex::new(Some(tx)),
            shutdown: Notify::new(),
        }
    }

    /// Hands the outcome to the waiting flow and stops the server.
    ///
    /// Returns false when the session already completed.
    pub fn complete(&self, outcome: CallbackOutcome) -> bool {
        let sender = match self.outcome.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(sender) = sender else {
            return false;
        };

        let _ = sender.send(outcome);
        self.shutdown.notify_one();
        true
    }
}

/// Local HTTP endpoint receiving the OAuth redirect for one attempt.
///
/// Binds the port of the redirect uri on start and releases it on `stop`,
/// after the first callback, or when dropped.
pub struct CallbackListener {
    addr: SocketAddr,
    session: Arc<CallbackSession>,
    outcome_rx: Option<oneshot::Receiver<CallbackOutcome>>,
    task: Option<JoinHandle<()>>,
}

impl CallbackListener {
    pub async fn start(redirect_uri: &Url) -> Result<Self, AuthError> {
        let addr = bind_addr(redirect_uri)?;
        let (tx, rx) = oneshot::channel();
        let session = Arc::new(CallbackSession::new(tx));

        let app = Router::new()
            .route(redirect_uri.path(), get(api::callback))
            .layer(Extension(Arc::clone(&session)));

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AuthError::Listener(format!("cannot bind {addr}: {e}")))?;

        let shutdown = Arc::clone(&session);
        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.shutdown.notified().await })
                .await;
            if let Err(e) = served {
                tracing::warn!(error = %e, "callback listener stopped with an error");
            }
        });

        tracing::debug!(%addr, path = redirect_uri.path(), "callback listener started");

        Ok(Self {
            addr,
            session,
            outcome_rx: Some(rx),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Waits for the redirect, at most `timeout`.
    ///
    /// A provider error is reported as [`CallbackOutcome::Error`], not as an
    /// `Err`; the flow decides what it means.
    pub async fn await_result(&mut self, timeout: Duration) -> Result<CallbackOutcome, AuthError> {
        let rx = self
            .outcome_rx
            .as_mut()
            .ok_or_else(|| AuthError::Listener("result already consumed".to_string()))?;

        let result = tokio::time::timeout(timeout, rx).await;
        match result {
            Ok(Ok(outcome)) => {
                self.outcome_rx = None;
                Ok(outcome)
            }
            Ok(Err(_)) => {
                self.outcome_rx = None;
                Err(AuthError::Listener(
                    "session closed before a callback arrived".to_string(),
                ))
            }
            Err(_) => Err(AuthError::Timeout(timeout)),
        }
    }

    /// Shuts the server down and releases the port. Safe to call repeatedly.
    pub async fn stop(&mut self) {
        let Some(mut task) = self.task.take() else {
            return;
        };

        self.session.shutdown.notify_one();
        if tokio::time::timeout(STOP_GRACE, &mut task).await.is_err() {
            task.abort();
            let _ = task.await;
        }
        tracing::debug!(addr = %self.addr, "callback listener stopped");
    }
}

impl Drop for CallbackListener {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.session.shutdown.notify_one();
            task.abort();
        }
    }
}

/// Socket address to bind for a redirect uri such as `http://localhost:5000/callback`.
pub fn bind_addr(redirect_uri: &Url) -> Result<SocketAddr, AuthError> {
    let host = redirect_uri
        .host_str()
        .ok_or_else(|| AuthError::InvalidRedirect(redirect_uri.to_string()))?;
    let port = redirect_uri
        .port_or_known_default()
        .ok_or_else(|| AuthError::InvalidRedirect(redirect_uri.to_string()))?;

    let ip = if host.eq_ignore_ascii_case("localhost") {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    } else {
        host.trim_matches(|c| c == '[' || c == ']')
            .parse::<IpAddr>()
            .map_err(|_| AuthError::InvalidRedirect(redirect_uri.to_string()))?
    };

    Ok(SocketAddr::new(ip, port))
}
