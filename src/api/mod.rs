pub mod health;
pub mod swagger;
pub mod users;

use actix_web::web;

/// Registers every route of the service on an `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Users
        .route("/createUser", web::post().to(users::create_user))
        .route("/getAllUsers", web::get().to(users::get_all_users))
        .route("/updateUser", web::put().to(users::update_user))
        .route("/deleteUser/{id}", web::delete().to(users::delete_user))
        .route("/getUser/{id}", web::get().to(users::get_user));
}
