//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use goldprice_types::{AppError, BrokerageGateway, ErrorBody, GoldPriceParams, QuoteError};

use crate::QuoteService;

/// Application state shared across handlers.
pub struct AppState<G: BrokerageGateway> {
    pub service: QuoteService<G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            AppError::BadRequest(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        error: msg,
                        detail: None,
                    },
                )
            }
            AppError::Internal { message, detail } => {
                tracing::error!("Gold price proxy error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: message,
                        detail,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Fetch the gold price, converted to KRW per troy ounce.
#[tracing::instrument(skip(state, params), fields(method = %method))]
pub async fn gold_price<G: BrokerageGateway>(
    State(state): State<Arc<AppState<G>>>,
    method: Method,
    params: Result<Query<GoldPriceParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let quote = state.service.gold_price(params.pdno.as_deref()).await?;
    Ok(Json(quote))
}
