use actix_web::{http::header::ContentType, http::StatusCode, HttpResponse};
use serde::Serialize;

/// Every body this service sends is indented JSON.
pub fn pretty_json<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    match serde_json::to_string_pretty(body) {
        Ok(json) => HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(json),
        Err(e) => {
            log::error!("❌ Failed to serialize response: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_body_is_indented_json() {
        let resp = pretty_json(StatusCode::NOT_FOUND, &serde_json::json!({"Failure": "x"}));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("content-type").unwrap(), "application/json");

        let body = resp.into_body().try_into_bytes().unwrap();
        assert_eq!(body, "{\n  \"Failure\": \"x\"\n}");
    }
}
