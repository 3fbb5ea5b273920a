use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};

use crate::{server::CallbackSession, types::CallbackOutcome};

const FRAGMENT_RELAY: &str = r#"<!DOCTYPE html>
<html>
<head><title>songpilot</title></head>
<body>
<h4>Finishing authorization...</h4>
<script>
  if (window.location.hash.length > 1) {
    window.location.replace(window.location.pathname + "?" + window.location.hash.substring(1));
  } else {
    document.body.innerHTML = "<h4>Missing access token.</h4>";
  }
</script>
</body>
</html>"#;

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(session): Extension<Arc<CallbackSession>>,
) -> (StatusCode, Html<&'static str>) {
    let state = params.get("state").cloned();

    let outcome = if let Some(error) = params.get("error") {
        CallbackOutcome::Error {
            error: error.clone(),
            state,
        }
    } else if let Some(token) = params.get("access_token") {
        CallbackOutcome::Token {
            access_token: token.clone(),
            state,
        }
    } else if params.is_empty() {
        return (StatusCode::OK, Html(FRAGMENT_RELAY));
    } else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Missing access token.</h4>"),
        );
    };

    let denied = matches!(outcome, CallbackOutcome::Error { .. });
    if !session.complete(outcome) {
        return (
            StatusCode::GONE,
            Html("<h4>Authorization already completed.</h4>"),
        );
    }

    if denied {
        (StatusCode::OK, Html("<h4>Login failed.</h4>"))
    } else {
        (
            StatusCode::OK,
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>"),
        )
    }
}
