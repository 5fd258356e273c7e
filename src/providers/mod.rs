//! Generation providers
//!
//! Seams to the external image-generation and vision-classification
//! capabilities, plus OpenAI-compatible HTTP implementations of both.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use image::{DynamicImage, ImageFormat, RgbaImage};
use reqwest::Client;
use serde_json::json;
use std::io::Cursor;
use thiserror::Error;
use tracing::warn;

/// Decoded RGBA raster handed between the provider and the validators.
pub type Raster = RgbaImage;

/// Failure inside the image-generation capability. Fatal for the slot: the
/// orchestrator propagates these unmodified, never substitutes a fallback.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("image generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned no image payload")]
    EmptyResponse,
    #[error("image payload could not be decoded: {0}")]
    Decode(String),
    #[error("image generation failed: {0}")]
    Failed(String),
}

/// External image-generation capability.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Render one raster for the prompt at the requested pixel size.
    /// Reference images, when the provider supports them, steer the render.
    async fn invoke(
        &self,
        prompt: &str,
        size: (u32, u32),
        references: &[Raster],
    ) -> Result<Raster, GenerationError>;
}

/// Optional external vision capability used as the text-leak tie-breaker.
/// Errors and timeouts are treated as "no text" by the caller.
#[async_trait]
pub trait VisionTextClassifier: Send + Sync {
    async fn contains_text(&self, raster: &Raster) -> Result<bool>;
}

/// OpenAI-compatible image endpoint client.
pub struct OpenAiImageProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiImageProvider {
    pub fn new(base_url: String, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageProvider {
    async fn invoke(
        &self,
        prompt: &str,
        size: (u32, u32),
        references: &[Raster],
    ) -> Result<Raster, GenerationError> {
        if !references.is_empty() {
            // The generations endpoint takes no image inputs.
            warn!(
                count = references.len(),
                "reference images ignored by this provider"
            );
        }
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "size": format!("{}x{}", size.0, size.1),
            "response_format": "b64_json",
            "n": 1,
        });

        let mut request = self
            .client
            .post(format!(
                "{}/images/generations",
                self.base_url.trim_end_matches('/')
            ))
            .json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.send().await?.error_for_status()?;
        let payload: serde_json::Value = res.json().await?;
        let b64 = payload["data"][0]["b64_json"]
            .as_str()
            .ok_or(GenerationError::EmptyResponse)?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| GenerationError::Decode(e.to_string()))?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| GenerationError::Decode(e.to_string()))?;
        Ok(decoded.to_rgba8())
    }
}

/// Vision classifier backed by an OpenAI-compatible multimodal chat endpoint:
/// asks a yes/no question about rendered text and parses the reply leniently.
pub struct ChatVisionClassifier {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatVisionClassifier {
    pub fn new(base_url: String, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model: model.into(),
        }
    }

    fn encode_png(raster: &Raster) -> Result<String> {
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(raster.clone())
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .context("Failed to encode raster as PNG")?;
        Ok(base64::engine::general_purpose::STANDARD.encode(&buffer))
    }
}

#[async_trait]
impl VisionTextClassifier for ChatVisionClassifier {
    async fn contains_text(&self, raster: &Raster) -> Result<bool> {
        let b64 = Self::encode_png(raster)?;
        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    {
                        "type": "text",
                        "text": "Does this image contain any rendered text, letters, numbers, or typography? Answer only YES or NO."
                    },
                    {
                        "type": "image_url",
                        "image_url": { "url": format!("data:image/png;base64,{}", b64) }
                    }
                ]
            }],
            "temperature": 0.0,
        });

        let mut request = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.send().await?.error_for_status()?;
        let payload: serde_json::Value = res.json().await?;
        let answer = payload["choices"][0]["message"]["content"]
            .as_str()
            .context("Failed to parse content from classifier response")?;
        Ok(answer.trim().to_lowercase().starts_with("yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_roundtrip() {
        let raster = Raster::from_pixel(8, 8, image::Rgba([120, 30, 200, 255]));
        let b64 = ChatVisionClassifier::encode_png(&raster).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.get_pixel(3, 3), raster.get_pixel(3, 3));
    }

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::Failed("quota exceeded".to_string());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
