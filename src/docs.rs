use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use inkpost_auth::{Identity, Role};
use inkpost_core::ErrorResponse;
use inkpost_models::{
    Article, ArticleWithOwner, CreateArticleDto, LoginRequest, LoginResponse, MessageResponse,
    ProfileResponse, RegisterRequest, RegisterResponse, UpdateArticleDto, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::check_token,
        crate::modules::auth::controller::get_profile,
        crate::modules::articles::controller::list_articles,
        crate::modules::articles::controller::get_article,
        crate::modules::articles::controller::create_article,
        crate::modules::articles::controller::update_article,
        crate::modules::articles::controller::delete_article,
    ),
    components(
        schemas(
            Article,
            ArticleWithOwner,
            CreateArticleDto,
            UpdateArticleDto,
            User,
            Role,
            Identity,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            ProfileResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account and token endpoints"),
        (name = "Articles", description = "Article publishing endpoints")
    ),
    info(
        title = "Inkpost API",
        version = "0.1.0",
        description = "Article publishing API built with Rust, Axum, PostgreSQL and Redis.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_article_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/article"));
        assert!(doc.paths.paths.contains_key("/api/v1/article/{slug}"));
        assert!(doc.paths.paths.contains_key("/api/v1/auth/login"));
    }
}
