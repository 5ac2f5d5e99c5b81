//! Product catalog HTTP routes.
//!
//! - `POST   /api/v1/products`                  create a product
//! - `GET    /api/v1/products?categoryId={id}`  list products of one category
//! - `GET    /api/v1/products/{product_id}`     fetch one product
//! - `PUT    /api/v1/products/{product_id}`     partial update, zero values keep the stored field
//! - `DELETE /api/v1/products/{product_id}`     hard delete, 204 on success

use std::future::Future;
use std::time::Duration;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use prodcat_core::{
    ApplicationError, CategoryId, CreateProduct, InterfaceError, ProductContent, ProductControllers,
    ProductId, ProductOutput, UpdateProduct,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiState {
    controllers: ProductControllers,
    request_timeout: Duration,
}

impl ApiState {
    pub fn new(controllers: ProductControllers, request_timeout: Duration) -> Self {
        Self { controllers, request_timeout }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub amount: Decimal,
}

/// Fields left out of the body, sent as `null`, or sent as `""`/`0`, keep
/// their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub amount: Option<Decimal>,
}

impl UpdateProductRequest {
    fn into_command(self, product_id: ProductId) -> UpdateProduct {
        UpdateProduct {
            product_id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category_id: CategoryId(self.category_id.unwrap_or_default()),
            amount: self.amount.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    pub category_id: i64,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub correlation_id: String,
}

#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = ErrorBody {
            error: self.0.user_message().to_string(),
            code: self.0.code().to_string(),
            detail: self.0.detail().map(str::to_string),
            correlation_id: self.0.correlation_id().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn status_for(error: &InterfaceError) -> StatusCode {
    match error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/products", get(find_by_category).post(create_product))
        .route(
            "/api/v1/products/{product_id}",
            get(find_one).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

pub async fn create_product(
    State(state): State<ApiState>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<ProductOutput>, ApiError> {
    let correlation_id = correlation_id();
    let Json(body) = body.map_err(|rejection| {
        bad_request("product.create", &correlation_id, rejection.body_text())
    })?;
    validate_create(&body).map_err(|message| bad_request("product.create", &correlation_id, message))?;

    let command = CreateProduct {
        name: body.name,
        description: body.description,
        category_id: CategoryId(body.category_id),
        amount: body.amount,
    };
    let output = with_deadline(
        &state,
        "product.create",
        &correlation_id,
        state.controllers.create.execute(command),
    )
    .await?;

    info!(
        event_name = "http.product.create",
        correlation_id = %correlation_id,
        product_id = %output.product_id,
        "product created"
    );
    Ok(Json(output))
}

pub async fn find_by_category(
    State(state): State<ApiState>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> Result<Json<ProductContent>, ApiError> {
    let correlation_id = correlation_id();
    let Query(query) = query.map_err(|rejection| {
        bad_request("product.find_by_category", &correlation_id, rejection.body_text())
    })?;

    let content = with_deadline(
        &state,
        "product.find_by_category",
        &correlation_id,
        state.controllers.find_by_category.execute(CategoryId(query.category_id)),
    )
    .await?;

    Ok(Json(content))
}

pub async fn find_one(
    State(state): State<ApiState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductOutput>, ApiError> {
    let correlation_id = correlation_id();
    let product_id = ProductId(product_id);

    let output = with_deadline(
        &state,
        "product.find_one",
        &correlation_id,
        state.controllers.find_one.execute(&product_id),
    )
    .await?;

    Ok(Json(output))
}

pub async fn update_product(
    State(state): State<ApiState>,
    Path(product_id): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductOutput>, ApiError> {
    let correlation_id = correlation_id();
    let Json(body) = body.map_err(|rejection| {
        bad_request("product.update", &correlation_id, rejection.body_text())
    })?;
    if body.amount.is_some_and(|amount| amount < Decimal::ZERO) {
        return Err(bad_request("product.update", &correlation_id, "amount must not be negative"));
    }

    let command = body.into_command(ProductId(product_id));
    let output = with_deadline(
        &state,
        "product.update",
        &correlation_id,
        state.controllers.update.execute(command),
    )
    .await?;

    info!(
        event_name = "http.product.update",
        correlation_id = %correlation_id,
        product_id = %output.product_id,
        "product updated"
    );
    Ok(Json(output))
}

pub async fn delete_product(
    State(state): State<ApiState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let correlation_id = correlation_id();
    let product_id = ProductId(product_id);

    let deleted = with_deadline(
        &state,
        "product.delete",
        &correlation_id,
        state.controllers.delete.execute(&product_id),
    )
    .await?;

    info!(
        event_name = "http.product.delete",
        correlation_id = %correlation_id,
        product_id = %deleted,
        "product deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

fn validate_create(body: &CreateProductRequest) -> Result<(), &'static str> {
    if body.name.trim().is_empty() {
        return Err("name is required");
    }
    if body.description.trim().is_empty() {
        return Err("description is required");
    }
    if body.category_id <= 0 {
        return Err("categoryId must be a positive integer");
    }
    if body.amount <= Decimal::ZERO {
        return Err("amount must be greater than zero");
    }
    Ok(())
}

/// Runs one controller call under the request deadline. Expiry drops the
/// in-flight future, which abandons any outstanding store call.
async fn with_deadline<T>(
    state: &ApiState,
    operation: &'static str,
    correlation_id: &str,
    call: impl Future<Output = Result<T, ApplicationError>>,
) -> Result<T, ApiError> {
    match tokio::time::timeout(state.request_timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(reject(operation, error.into_interface(correlation_id))),
        Err(_) => Err(reject(
            operation,
            InterfaceError::Timeout {
                message: format!(
                    "operation exceeded its {}ms deadline",
                    state.request_timeout.as_millis()
                ),
                correlation_id: correlation_id.to_string(),
            },
        )),
    }
}

fn bad_request(
    operation: &'static str,
    correlation_id: &str,
    message: impl Into<String>,
) -> ApiError {
    reject(
        operation,
        InterfaceError::BadRequest {
            message: message.into(),
            correlation_id: correlation_id.to_string(),
        },
    )
}

fn reject(operation: &'static str, error: InterfaceError) -> ApiError {
    if error.is_client_error() {
        warn!(
            event_name = "http.request.rejected",
            operation,
            correlation_id = %error.correlation_id(),
            code = error.code(),
            error = %error,
            "request rejected"
        );
    } else {
        error!(
            event_name = "http.request.failed",
            operation,
            correlation_id = %error.correlation_id(),
            code = error.code(),
            error = %error,
            "request failed"
        );
    }
    ApiError(error)
}

fn correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}
