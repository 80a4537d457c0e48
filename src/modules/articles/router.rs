use axum::{
    Router, middleware,
    routing::{delete, get, put},
};

use inkpost_auth::TokenAuthenticator;

use crate::middleware::auth::{require_admin, require_member};
use crate::state::AppState;

use super::controller::{
    create_article, delete_article, get_article, list_articles, update_article,
};

/// Article routes. Reading a single article is public; listing, creating and
/// updating need a member token and deleting needs an admin token.
pub fn init_articles_router(authenticator: TokenAuthenticator) -> Router<AppState> {
    let member = middleware::from_fn_with_state(authenticator.clone(), require_member);
    let admin = middleware::from_fn_with_state(authenticator, require_admin);

    Router::new()
        .route(
            "/",
            get(list_articles)
                .post(create_article)
                .route_layer(member.clone()),
        )
        .route(
            "/{slug}",
            get(get_article)
                .merge(put(update_article).route_layer(member))
                .merge(delete(delete_article).route_layer(admin)),
        )
}
