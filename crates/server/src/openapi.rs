use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct InfoResponse { pub message: String }

#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

/// Full replacement field set; `id` is ignored if sent.
#[derive(ToSchema)]
pub struct ItemInputDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub status: u16,
    pub error: String,
    pub message: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::root,
        crate::routes::items::list,
        crate::routes::items::get,
        crate::routes::items::create,
        crate::routes::items::update,
        crate::routes::items::delete,
        crate::routes::items::search_by_name,
        crate::routes::items::search_by_max_price,
    ),
    components(
        schemas(
            HealthResponse,
            InfoResponse,
            ItemDoc,
            ItemInputDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;
