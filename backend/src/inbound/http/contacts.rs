//! Emergency contact handlers.
//!
//! ```text
//! GET /api/v1/contacts
//! POST /api/v1/contacts {"contactName":"Mom","contactNumber":"+15550001234"}
//! DELETE /api/v1/contacts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Contact, ContactName, NewContact, PhoneNumber};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_user_validation_error, parse_uuid};

const CONTACT_NAME: FieldName = FieldName::new("contactName");
const CONTACT_NUMBER: FieldName = FieldName::new("contactNumber");

/// Request body for adding a contact.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(example = "Mom")]
    pub contact_name: String,
    #[schema(example = "+15550001234")]
    pub contact_number: String,
}

impl ContactRequest {
    fn into_new_contact(self) -> ApiResult<NewContact> {
        let name = ContactName::new(&self.contact_name)
            .map_err(|err| map_user_validation_error(CONTACT_NAME, err))?;
        let number = PhoneNumber::new(&self.contact_number)
            .map_err(|err| map_user_validation_error(CONTACT_NUMBER, err))?;
        Ok(NewContact { name, number })
    }
}

/// Stored contact.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    #[schema(example = "6c1e5e0a-3f39-4d5e-9a51-5c9f1b8a2d10")]
    pub id: String,
    pub contact_name: String,
    pub contact_number: String,
    #[schema(example = "2026-01-12T09:00:00Z")]
    pub created_at: String,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id.to_string(),
            contact_name: value.name.into(),
            contact_number: value.number.into(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// List the signed-in user's contacts, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    responses(
        (status = 200, description = "Contacts", body = [ContactResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let user_id = session.require_user_id()?;
    let contacts = state.contacts.list(&user_id).await?;
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// Add a contact; at most ten per user.
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Contact added", body = ContactResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Contact limit reached", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "addContact"
)]
#[post("/contacts")]
pub async fn add_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let contact = payload.into_inner().into_new_contact()?;
    let stored = state.contacts_command.add(&user_id, contact).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(stored)))
}

/// Remove one of the signed-in user's contacts.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 204, description = "Contact removed"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Contact not found", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let contact_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    state.contacts_command.remove(&user_id, contact_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::domain::ports::{MockContactsCommand, MockContactsQuery};
    use crate::domain::{Error, UserId};
    use crate::inbound::http::test_utils::{
        FIXTURE_USER_ID, fixture_ports, fixture_state, session_cookie, test_app,
    };

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(list_contacts)
            .service(add_contact)
            .service(delete_contact);
    }

    fn contact(name: &str, number: &str) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            user_id: UserId::new(FIXTURE_USER_ID).expect("user id"),
            name: ContactName::new(name).expect("name"),
            number: PhoneNumber::new(number).expect("number"),
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn lists_contacts_in_port_order() {
        let mut query = MockContactsQuery::new();
        query.expect_list().return_once(|_| {
            Ok(vec![
                contact("Mom", "+15550001234"),
                contact("Dad", "+15550002345"),
            ])
        });
        let mut ports = fixture_ports();
        ports.contacts = Arc::new(query);
        let app = actix_test::init_service(test_app(HttpState::new(ports), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/contacts")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let names: Vec<&str> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|c| c["contactName"].as_str())
            .collect();
        assert_eq!(names, ["Mom", "Dad"]);
    }

    #[actix_web::test]
    async fn adds_contact() {
        let app = actix_test::init_service(test_app(fixture_state(), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/contacts")
                .cookie(cookie)
                .set_json(json!({"contactName": " Mom ", "contactNumber": "+15550001234"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["contactName"], "Mom");
        assert_eq!(body["contactNumber"], "+15550001234");
    }

    #[rstest]
    #[case(json!({"contactName": "M", "contactNumber": "+15550001234"}), "contactName")]
    #[case(json!({"contactName": "Mom", "contactNumber": "555-0001-234"}), "contactNumber")]
    #[actix_web::test]
    async fn rejects_invalid_contact_before_port(#[case] payload: Value, #[case] field: &str) {
        let mut command = MockContactsCommand::new();
        command.expect_add().never();
        let mut ports = fixture_ports();
        ports.contacts_command = Arc::new(command);
        let app = actix_test::init_service(test_app(HttpState::new(ports), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/contacts")
                .cookie(cookie)
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn eleventh_contact_is_conflict() {
        let mut command = MockContactsCommand::new();
        command
            .expect_add()
            .return_once(|_, _| Err(Error::conflict("Maximum of 10 emergency contacts allowed")));
        let mut ports = fixture_ports();
        ports.contacts_command = Arc::new(command);
        let app = actix_test::init_service(test_app(HttpState::new(ports), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/contacts")
                .cookie(cookie)
                .set_json(json!({"contactName": "Eleven", "contactNumber": "+15550001234"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[case("not-a-uuid", StatusCode::BAD_REQUEST)]
    #[case("6c1e5e0a-3f39-4d5e-9a51-5c9f1b8a2d10", StatusCode::NO_CONTENT)]
    #[actix_web::test]
    async fn delete_parses_id(#[case] id: &str, #[case] expected: StatusCode) {
        let mut command = MockContactsCommand::new();
        command.expect_remove().returning(|_, _| Ok(()));
        let mut ports = fixture_ports();
        ports.contacts_command = Arc::new(command);
        let app = actix_test::init_service(test_app(HttpState::new(ports), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/contacts/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn unknown_contact_is_not_found() {
        let app = actix_test::init_service(test_app(fixture_state(), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/contacts/6c1e5e0a-3f39-4d5e-9a51-5c9f1b8a2d10")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
