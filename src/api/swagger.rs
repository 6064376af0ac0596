use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "CRUD over a single users collection. Every user is a free-form JSON object keyed by a string `id`.\n\nSuccessful mutations answer `{\"Success\": \"...\"}` with status 200; unknown or duplicate ids answer `{\"Failure\": \"...\"}` with status 404."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::create_user,
        crate::api::users::get_all_users,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::users::get_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::Envelope,
        )
    ),
    tags(
        (name = "Health", description = "Service and store health."),
        (name = "Users", description = "Create, read, update and delete user documents."),
    )
)]
pub struct ApiDoc;
