use axum::{extract::State, response::Html};

use crate::{state::AppState, templates};

/// Handler for the index page (GET /).
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(templates::index_page(
        state.config.mock_mode,
        state.oidc_ready(),
        state.saml_ready(),
    ))
}
