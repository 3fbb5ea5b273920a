use std::{future::Future, time::Duration};

use reqwest::Url;

use crate::{
    config::{SCOPES, Settings},
    error::AuthError,
    server::CallbackListener,
    types::{CallbackOutcome, Credential},
    success, utils, warning,
};

/// Something that can obtain a fresh credential.
///
/// The coordinator serializes calls; implementations may assume a single
/// caller per invocation.
pub trait Authorize: Send + Sync + 'static {
    fn authorize(&self) -> impl Future<Output = Result<Credential, AuthError>> + Send;
}

/// Opens the authorization URL for the user.
pub trait Browser: Send + Sync + 'static {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// The system's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}

/// One implicit-grant login: build the URL, open the browser, wait for the
/// redirect on the local callback listener.
pub struct AuthorizationFlow<B = SystemBrowser> {
    client_id: String,
    auth_url: Url,
    redirect_uri: Url,
    timeout: Duration,
    browser: B,
}

impl AuthorizationFlow {
    pub fn new(settings: &Settings) -> Self {
        Self::with_browser(settings, SystemBrowser)
    }
}

impl<B: Browser> AuthorizationFlow<B> {
    pub fn with_browser(settings: &Settings, browser: B) -> Self {
        Self {
            client_id: settings.client_id.clone(),
            auth_url: settings.auth_url.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            timeout: settings.auth_timeout,
            browser,
        }
    }

    /// Provider authorization URL for an implicit grant carrying `state`.
    pub fn authorize_url(&self, state: &str) -> Url {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "token")
            .append_pair("redirect_uri", self.redirect_uri.as_str())
            .append_pair("scope", &SCOPES.join(" "))
            .append_pair("state", state);
        url
    }

    /// Runs a single attempt.
    ///
    /// The listener is stopped and its port released before this returns,
    /// whatever the outcome.
    pub async fn run_once(&self) -> Result<Credential, AuthError> {
        let state = utils::generate_state();
        let url = self.authorize_url(&state);

        let mut listener = CallbackListener::start(&self.redirect_uri).await?;
        tracing::info!(addr = %listener.local_addr(), "waiting for spotify authorization");

        if self.browser.open(url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            );
        }

        let outcome = listener.await_result(self.timeout).await;
        listener.stop().await;

        match outcome? {
            CallbackOutcome::Token {
                access_token,
                state: returned,
            } => {
                if returned.as_deref() != Some(state.as_str()) {
                    tracing::warn!("authorization callback state mismatch");
                    return Err(AuthError::StateMismatch);
                }
                success!("Spotify authorization granted");
                Ok(Credential::new(access_token))
            }
            CallbackOutcome::Error { error, state } => {
                tracing::warn!(%error, "spotify authorization denied");
                Err(AuthError::Denied { error, state })
            }
        }
    }
}

impl<B: Browser> Authorize for AuthorizationFlow<B> {
    fn authorize(&self) -> impl Future<Output = Result<Credential, AuthError>> + Send {
        self.run_once()
    }
}
