use serde_json::json;
use weft::prelude::*;

use crate::models::{CreateUserRequest, User};
use crate::services::UserService;

/// CRUD over the in-memory user store, mounted under `/users`.
pub struct UserModule {
    service: UserService,
}

impl UserModule {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

async fn list(State(service): State<UserService>) -> Json<Vec<User>> {
    Json(service.list().await)
}

async fn get_by_id(
    State(service): State<UserService>,
    Path(id): Path<u64>,
) -> Result<Json<User>, StatusCode> {
    service.get_by_id(id).await.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create(
    State(service): State<UserService>,
    Json(body): Json<CreateUserRequest>,
) -> (StatusCode, Json<User>) {
    let user = service.create(body.name, body.email).await;
    tracing::info!(id = user.id, "User created");
    (StatusCode::CREATED, Json(user))
}

async fn delete_user(State(service): State<UserService>, Path(id): Path<u64>) -> StatusCode {
    if service.delete(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

impl Module for UserModule {
    fn build(&self, router: Router) -> Router {
        let users = Router::new()
            .route("/users", get(list).post(create))
            .route("/users/{id}", get(get_by_id).delete(delete_user))
            .with_state(self.service.clone());
        router.merge(users)
    }

    fn build_swagger(&self, swagger: &mut DocumentBuilder) -> Result<(), DocumentError> {
        swagger.add_tag("users")?;
        swagger.add_model_for::<User>(false)?;
        swagger.add_model_for::<CreateUserRequest>(false)?;

        swagger.api(
            ApiOperation::get("/users")
                .tags("users")
                .description("List all users")
                .model(json!({ "type": "array", "items": { "$ref": "User" } })),
        )?;
        swagger.api(
            ApiOperation::post("/users")
                .tags("users")
                .description("Create a user")
                .security(true)
                .body("CreateUserRequest")
                .consumes("application/json")
                .model("User")
                .error(ErrorResponse::new(401, "Missing or invalid token")),
        )?;
        swagger.api(
            ApiOperation::get("/users/{id}")
                .tags("users")
                .description("Fetch one user")
                .param(Parameter::path("id", "integer"))
                .model("User")
                .error(ErrorResponse::new(404, "User not found")),
        )?;
        swagger.api(
            ApiOperation::delete("/users/{id}")
                .tags("users")
                .description("Delete a user")
                .security(true)
                .param(Parameter::path("id", "integer"))
                .error(ErrorResponse::new(401, "Missing or invalid token"))
                .error(ErrorResponse::new(404, "User not found")),
        )
    }

    fn name(&self) -> &'static str {
        "users"
    }
}
