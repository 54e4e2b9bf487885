//! OpenAPI documentation for the user service.
//!
//! Served by Swagger UI at `/docs` in debug builds and printed by
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::users::{ReducedUserDetail, UserDetail, UserRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "CRUD access to registered users plus health probes. \
            Error responses are plain text."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserRequest, UserDetail, ReducedUserDetail)),
    tags(
        (name = "users", description = "User resource"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("UserDetail", &["userId", "email", "firstName", "lastName", "age", "aliases"])]
    #[case("ReducedUserDetail", &["userId", "firstName", "lastName"])]
    #[case("UserRequest", &["email", "firstName", "lastName", "age", "aliases"])]
    fn schemas_use_camel_case_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let mut fields = object_fields(name);
        fields.sort();
        let mut expected: Vec<String> = expected.iter().map(|f| (*f).to_owned()).collect();
        expected.sort();
        assert_eq!(fields, expected);
    }

    #[rstest]
    fn every_user_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/users"));
        assert!(paths.contains_key("/users/{userId}"));
        assert!(paths.contains_key("/health/ready"));
    }
}
