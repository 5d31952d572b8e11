//! OIDC authorization-code flow against Okta.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use chrono::Utc;
use fedlens_core::jwt::{decode_unverified, get_mock_token};
use openidconnect::PkceCodeChallenge;
use serde::Deserialize;

use super::pretty_json;
use crate::{
    error::AppError,
    flows::{generate_state, PendingFlow},
    providers::OidcProviderClient,
    state::AppState,
    templates,
};

/// Query parameters for the OIDC callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// `true` when the login was short-circuited in mock mode.
    pub mock: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackQuery {
    fn is_mock(&self) -> bool {
        self.mock.as_deref() == Some("true")
    }
}

fn provider(state: &AppState) -> Result<&Arc<dyn OidcProviderClient>, AppError> {
    state.oidc.as_ref().ok_or_else(|| {
        let reason = if state.config.oidc.is_some() {
            "OIDC discovery failed at startup, check the server logs"
        } else {
            "OIDC client is not configured (set OKTA_DOMAIN and OKTA_CLIENT_ID)"
        };
        AppError::NotConfigured(reason.to_string())
    })
}

/// GET /oidc/login - Redirect to the IdP, or straight to the callback in mock mode.
pub async fn login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    if state.config.mock_mode {
        return Ok(Redirect::to("/oidc/callback?mock=true"));
    }

    let provider = provider(&state)?;

    let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
    let csrf_state = generate_state();

    let flow = PendingFlow {
        pkce_verifier: pkce_verifier.secret().to_string(),
        created_at: Utc::now(),
    };
    state.flows.store(&csrf_state, flow).await;

    let auth_url = provider
        .authorization_url(&csrf_state, pkce_challenge.as_str())
        .await?;

    tracing::info!("Redirecting to OIDC provider");
    Ok(Redirect::to(auth_url.as_str()))
}

/// GET /oidc/callback - Obtain the ID token and show its decoded parts.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackQuery>,
) -> Result<Html<String>, AppError> {
    if let Some(error) = params.error.as_deref() {
        let message = match params.error_description.as_deref() {
            Some(description) => format!("{error}: {description}"),
            None => error.to_string(),
        };
        return Err(AppError::IdpRejected(message));
    }

    let id_token = if params.is_mock() || state.config.mock_mode {
        get_mock_token()?
    } else {
        exchange(&state, &params).await?
    };

    let token = decode_unverified(&id_token)?;
    tracing::info!(alg = ?token.algorithm(), "Decoded ID token");

    Ok(Html(templates::oidc_results_page(
        &id_token,
        &pretty_json(&token.header),
        &pretty_json(&token.payload),
    )))
}

async fn exchange(state: &AppState, params: &CallbackQuery) -> Result<String, AppError> {
    let provider = provider(state)?;

    let (Some(code), Some(csrf_state)) = (params.code.as_deref(), params.state.as_deref()) else {
        return Err(AppError::MissingCallbackParams);
    };

    let flow = state
        .flows
        .take(csrf_state, Utc::now())
        .await
        .ok_or(AppError::InvalidState)?;

    provider.exchange_code(code, &flow.pkce_verifier).await
}
