use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::health,
        crate::api::auth::superadmin_login,
        crate::api::auth::business_login,
        crate::api::auth::individual_login,
        crate::api::products::list_products,
        crate::api::products::get_product
    ),
    components(schemas(crate::api::auth::LoginRequest)),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Authentication"),
        (name = "products", description = "Public catalog")
    )
)]
pub struct ApiDoc;
