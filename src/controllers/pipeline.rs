use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    domain::pipeline::{JobInput, JobOutput, JobRequest, PipelineService, PipelineServiceApi},
    error::{AppError, AppResult},
    infrastructure::{http::extract::ApiJson, middleware::RequestId},
};

pub struct PipelineController {
    pipeline_service: Arc<PipelineService>,
}

impl PipelineController {
    pub fn new(pipeline_service: Arc<PipelineService>) -> Self {
        Self { pipeline_service }
    }

    /// POST /run - Serverless job shape: `{ "input": { ... } }`
    pub async fn run_job(
        State(controller): State<Arc<PipelineController>>,
        Extension(request_id): Extension<RequestId>,
        ApiJson(request): ApiJson<JobRequest>,
    ) -> AppResult<Json<JobOutput>> {
        controller.execute(request_id, request.input).await
    }

    /// POST /api/translate - Bare job envelope
    pub async fn translate(
        State(controller): State<Arc<PipelineController>>,
        Extension(request_id): Extension<RequestId>,
        ApiJson(input): ApiJson<JobInput>,
    ) -> AppResult<Json<JobOutput>> {
        controller.execute(request_id, input).await
    }

    async fn execute(&self, request_id: RequestId, input: JobInput) -> AppResult<Json<JobOutput>> {
        tracing::info!(
            request_id = %request_id.0,
            has_audio = input.audio.is_some(),
            src_lang = input.src_lang.as_deref().unwrap_or("auto"),
            tgt_lang = input.tgt_lang.as_deref().unwrap_or("default"),
            "Pipeline request"
        );

        let result = self
            .pipeline_service
            .run(input)
            .await
            .map_err(AppError::from)?;

        Ok(Json(result.into()))
    }
}
