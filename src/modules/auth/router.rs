use axum::{
    Router, middleware,
    routing::{get, post},
};

use inkpost_auth::TokenAuthenticator;

use crate::middleware::auth::require_member;
use crate::state::AppState;

use super::controller::{check_token, get_profile, login_user, register_user};

pub fn init_auth_router(authenticator: TokenAuthenticator) -> Router<AppState> {
    let member = middleware::from_fn_with_state(authenticator, require_member);

    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/check", get(check_token).route_layer(member.clone()))
        .route("/profile", get(get_profile).route_layer(member))
}
