// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP surface for the browser editor: the same stages as the CLI, one JSON route each.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::model::{FeatureModel, Graph};
use crate::pipeline::{DiagramView, Pipeline, PipelineError};
use crate::report::{ArchitectureReport, CimToPimReport, ContextMetrics};

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/xml/clean", post(clean_xml))
        .route("/transformations/cim-to-pim", post(cim_to_pim))
        .route("/transformations/pim-to-psm", post(pim_to_psm))
        .with_state(state)
}

struct ApiError(PipelineError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            PipelineError::Store(_) | PipelineError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PipelineError::Extract(_) | PipelineError::FeatureText(_) => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            tracing::error!(stage = self.0.stage(), error = %self.0, "request failed");
        } else {
            tracing::debug!(stage = self.0.stage(), error = %self.0, "request rejected");
        }
        let body = serde_json::json!({
            "stage": self.0.stage(),
            "detail": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

#[derive(Deserialize)]
struct CleanRequest {
    content: String,
}

#[derive(Deserialize)]
struct CimToPimRequest {
    xml_content: String,
}

#[derive(Serialize)]
struct CimToPimResponse {
    model: Graph,
    uvl: String,
    feature_model: FeatureModel,
    metrics: CimToPimReport,
}

#[derive(Deserialize)]
struct PimToPsmRequest {
    uvl_content: String,
    #[serde(default)]
    context_metrics: Option<ContextMetrics>,
    #[serde(default)]
    view: DiagramView,
}

#[derive(Serialize)]
struct PimToPsmResponse {
    diagram: String,
    encoded_diagram: String,
    diagram_url: String,
    view: DiagramView,
    metrics: ArchitectureReport,
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /xml/clean`: the normalized graph of a diagram.
async fn clean_xml(
    State(state): State<AppState>,
    Json(body): Json<CleanRequest>,
) -> Result<Json<Graph>, ApiError> {
    Ok(Json(state.pipeline.extract(&body.content)?))
}

/// `POST /transformations/cim-to-pim`
async fn cim_to_pim(
    State(state): State<AppState>,
    Json(body): Json<CimToPimRequest>,
) -> Result<Json<CimToPimResponse>, ApiError> {
    let output = state.pipeline.cim_to_pim(&body.xml_content)?;
    Ok(Json(CimToPimResponse {
        model: output.graph,
        uvl: output.text,
        feature_model: output.feature_model,
        metrics: output.report,
    }))
}

/// `POST /transformations/pim-to-psm`
async fn pim_to_psm(
    State(state): State<AppState>,
    Json(body): Json<PimToPsmRequest>,
) -> Result<Json<PimToPsmResponse>, ApiError> {
    let output = state.pipeline.pim_to_psm(
        &body.uvl_content,
        body.view,
        body.context_metrics.unwrap_or_default(),
    )?;
    Ok(Json(PimToPsmResponse {
        diagram: output.diagram,
        encoded_diagram: output.encoded_diagram,
        diagram_url: output.diagram_url,
        view: output.view,
        metrics: output.report,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::{router, AppState};
    use crate::model::fixtures::QUANTUM_SCHEDULER_XML;
    use crate::pipeline::Pipeline;

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = router(AppState::new(Pipeline::default()))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("collect body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let response = router(AppState::new(Pipeline::default()))
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn clean_returns_the_graph() {
        let (status, body) = post_json(
            "/xml/clean",
            serde_json::json!({ "content": QUANTUM_SCHEDULER_XML }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["nodes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cim_to_pim_then_pim_to_psm_round_trips_over_http() {
        let (status, body) = post_json(
            "/transformations/cim-to-pim",
            serde_json::json!({ "xml_content": QUANTUM_SCHEDULER_XML }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let uvl = body["uvl"].as_str().unwrap().to_owned();
        assert!(uvl.contains("constraints {"));
        assert_eq!(body["metrics"]["featureModel"]["features"], 7);

        let (status, body) = post_json(
            "/transformations/pim-to-psm",
            serde_json::json!({
                "uvl_content": uvl,
                "context_metrics": { "features_count": 7, "tasks_count": 4 },
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["diagram"].as_str().unwrap().starts_with("@startuml"));
        assert!(body["diagram_url"]
            .as_str()
            .unwrap()
            .ends_with(body["encoded_diagram"].as_str().unwrap()));
        assert_eq!(body["view"], "architecture");
    }

    #[tokio::test]
    async fn invalid_inputs_name_the_rejecting_stage() {
        let (status, body) = post_json(
            "/transformations/cim-to-pim",
            serde_json::json!({ "xml_content": "<mxfile>" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["stage"], "extract");

        let (status, body) = post_json(
            "/transformations/pim-to-psm",
            serde_json::json!({ "uvl_content": "   " }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["stage"], "feature-model");
    }
}
