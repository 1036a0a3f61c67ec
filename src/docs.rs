use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use storefront_core::ErrorResponse;
use storefront_models::{
    AdminSignUpRequest, Category, CreateCategoryDto, CreateProductDto, Product,
    RefreshTokenRequest, SignInRequest, SignUpRequest, TokenPair, UserResponse, UserRole,
    VisibilityDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::sign_up,
        crate::modules::auth::controller::sign_in,
        crate::modules::auth::controller::refresh_tokens,
        crate::modules::auth::controller::create_admin,
        crate::modules::catalog::controller::add_category,
        crate::modules::catalog::controller::add_product,
        crate::modules::catalog::controller::change_visibility,
        crate::modules::catalog::controller::get_catalog,
        crate::modules::catalog::controller::search_catalog,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            SignUpRequest,
            AdminSignUpRequest,
            SignInRequest,
            RefreshTokenRequest,
            TokenPair,
            Category,
            CreateCategoryDto,
            CreateProductDto,
            Product,
            VisibilityDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Accounts and token issuance"),
        (name = "Catalog", description = "Categories, products and catalog search")
    ),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Product catalog guarded by JWT access tokens and store-confirmed admin roles.",
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
