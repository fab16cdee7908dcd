//! Request-scoped try-on generation.
//!
//! Linear flow: credential check, prompt, stock model selection, staging,
//! one provider call, URL extraction. Nothing here is shared mutably between
//! requests; staged files are dropped when `run` returns, however it returns.
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::catalog::{ImageSource, StockModelCatalog};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::prompt::constructor::build_prompt;
use crate::replicate::{extract_image_url, InferenceProvider};
use crate::utils::encoding::image_mime;
use crate::utils::staging::StagedImage;

pub const DEFAULT_MODEL_TYPE: &str = "female";
pub const DEFAULT_POSE: &str = "standing";
pub const DEFAULT_BACKGROUND: &str = "studio_white";
pub const DEFAULT_STYLE: &str = "commercial";

/// Garment category sent to the try-on model.
const GARMENT_CATEGORY: &str = "upper_body";
const INFERENCE_STEPS: u32 = 30;
const SEED: u64 = 42;

#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub garment: Vec<u8>,
    pub garment_content_type: Option<String>,
    pub model_type: String,
    pub pose: String,
    pub background: String,
    pub style: String,
}

impl GenerationRequest {
    /// Request with the form defaults for every descriptor.
    pub fn new(garment: Vec<u8>) -> Self {
        GenerationRequest {
            garment,
            garment_content_type: None,
            model_type: DEFAULT_MODEL_TYPE.to_string(),
            pose: DEFAULT_POSE.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            style: DEFAULT_STYLE.to_string(),
        }
    }

    pub fn parameters(&self) -> GenerationParameters {
        GenerationParameters {
            model_type: self.model_type.clone(),
            pose: self.pose.clone(),
            background: self.background.clone(),
            style: self.style.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationParameters {
    pub model_type: String,
    pub pose: String,
    pub background: String,
    pub style: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct GenerationResult {
    pub success: bool,
    pub image_url: String,
    pub parameters: GenerationParameters,
    pub prompt: String,
    pub model_key: String,
}

#[derive(Clone)]
pub struct TryOnService {
    has_token: bool,
    model_id: String,
    staging_dir: PathBuf,
    catalog: Arc<StockModelCatalog>,
    provider: Arc<dyn InferenceProvider>,
    images: Arc<dyn ImageSource>,
}

impl TryOnService {
    pub fn new(
        config: &Config,
        catalog: Arc<StockModelCatalog>,
        provider: Arc<dyn InferenceProvider>,
        images: Arc<dyn ImageSource>,
    ) -> Self {
        TryOnService {
            has_token: config.has_token(),
            model_id: config.replicate_model.clone(),
            staging_dir: config.staging_dir.clone(),
            catalog,
            provider,
            images,
        }
    }

    pub fn catalog(&self) -> &StockModelCatalog {
        &self.catalog
    }

    pub async fn generate(&self, request: GenerationRequest) -> AppResult<GenerationResult> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("generate", %request_id);
        self.run(request, request_id).instrument(span).await
    }

    async fn run(&self, request: GenerationRequest, request_id: Uuid) -> AppResult<GenerationResult> {
        if !self.has_token {
            return Err(AppError::missing_token());
        }
        if request.garment.is_empty() {
            return Err(AppError::Input("garment image is empty".to_string()));
        }

        let prompt = build_prompt(&request.model_type, &request.pose, &request.background, &request.style);
        let selection = self.catalog.select(&request.model_type, &request.pose);
        tracing::info!(
            model_type = %request.model_type,
            pose = %request.pose,
            model_key = %selection.key,
            "Selected stock model"
        );

        let tag = request_id.simple().to_string();
        let garment_mime = image_mime(request.garment_content_type.as_deref());
        let garment = StagedImage::stage(
            &self.staging_dir,
            &format!("{}-garment", tag),
            &garment_mime,
            &request.garment,
        )
        .await?;

        let fetched = self.images.fetch(&selection.url).await?;
        let model_mime = image_mime(fetched.content_type.as_deref());
        let model = StagedImage::stage(
            &self.staging_dir,
            &format!("{}-model", tag),
            &model_mime,
            &fetched.bytes,
        )
        .await?;

        let inputs = json!({
            "garm_img": garment.to_data_uri().await?,
            "human_img": model.to_data_uri().await?,
            "garment_des": prompt,
            "category": GARMENT_CATEGORY,
            "crop": false,
            "steps": INFERENCE_STEPS,
            "seed": SEED,
        });
        tracing::debug!(
            garment = %garment.path().display(),
            model = %model.path().display(),
            "Calling {}",
            self.model_id
        );

        let output = self.provider.infer(&self.model_id, inputs).await?;
        let image_url = extract_image_url(&output)?;
        tracing::info!("Generated image at {}", image_url);

        Ok(GenerationResult {
            success: true,
            image_url,
            parameters: request.parameters(),
            prompt,
            model_key: selection.key,
        })
    }
}
