use actix_web::{http::StatusCode, web, HttpResponse};

use crate::utils::pretty_json;
use crate::{
    models::{parse_user_document, Envelope},
    services::UserService,
    utils::AppError,
};

fn envelope_response(envelope: Envelope) -> HttpResponse {
    pretty_json(envelope.status(), &envelope)
}

/// POST /createUser - Cria usuário se o `id` ainda não existir
#[utoipa::path(
    post,
    path = "/createUser",
    tag = "Users",
    request_body = Object,
    responses(
        (status = 200, description = "User created", body = Envelope),
        (status = 404, description = "A user with this id already exists", body = Envelope),
        (status = 400, description = "Body is not a JSON object with a string id")
    )
)]
pub async fn create_user(
    service: web::Data<UserService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let user = parse_user_document(&body)?;

    log::info!("📝 POST /createUser");

    Ok(envelope_response(service.create(user).await?))
}

/// GET /getAllUsers - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/getAllUsers",
    tag = "Users",
    responses(
        (status = 200, description = "Every stored user", body = [Object])
    )
)]
pub async fn get_all_users(service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /getAllUsers");

    let users = service.list_all().await?;
    Ok(pretty_json(StatusCode::OK, &users))
}

/// PUT /updateUser - Mescla os campos enviados no usuário existente
#[utoipa::path(
    put,
    path = "/updateUser",
    tag = "Users",
    request_body = Object,
    responses(
        (status = 200, description = "User updated", body = Envelope),
        (status = 404, description = "No user with this id", body = Envelope),
        (status = 400, description = "Body is not a JSON object with a string id")
    )
)]
pub async fn update_user(
    service: web::Data<UserService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let fields = parse_user_document(&body)?;

    log::info!("🔧 PUT /updateUser");

    Ok(envelope_response(service.update(fields).await?))
}

/// DELETE /deleteUser/{id} - Remove usuário
#[utoipa::path(
    delete,
    path = "/deleteUser/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Application-level user id")),
    responses(
        (status = 200, description = "User deleted", body = Envelope),
        (status = 404, description = "No user with this id", body = Envelope)
    )
)]
pub async fn delete_user(
    service: web::Data<UserService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /deleteUser/{}", id);

    Ok(envelope_response(service.delete(&id).await?))
}

/// GET /getUser/{id} - Busca usuário específico
#[utoipa::path(
    get,
    path = "/getUser/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Application-level user id")),
    responses(
        (status = 200, description = "The stored user document", body = Object),
        (status = 404, description = "No user with this id", body = Envelope)
    )
)]
pub async fn get_user(
    service: web::Data<UserService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔍 GET /getUser/{}", id);

    match service.read(&id).await? {
        Ok(user) => Ok(pretty_json(StatusCode::OK, &user)),
        Err(envelope) => Ok(envelope_response(envelope)),
    }
}
