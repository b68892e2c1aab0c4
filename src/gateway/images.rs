//! Image URLs: generated renders, placeholders, uploads and the image-search escape hatch.

use base64::Engine as _;
use rand::Rng;
use url::Url;

use super::GatewayError;

/// Placeholder for articles waiting on an admin-supplied image.
pub const NEEDS_IMAGE_PLACEHOLDER: &str =
    "https://placehold.co/800x600/1e293b/FFF?text=Needs+Image";

/// Image used by manual entries submitted without one.
pub const DEFAULT_ARTICLE_IMAGE: &str =
    "https://image.pollinations.ai/prompt/gaming?width=800&height=600";

const IMAGE_SEARCH_BASE: &str = "https://www.google.com/search";

/// Public image-generation endpoint addressed by prompt.
#[derive(Debug, Clone)]
pub struct ImageEndpoint {
    base: Url,
}

impl ImageEndpoint {
    pub fn new(base: &str) -> Result<Self, GatewayError> {
        let base = Url::parse(base)
            .map_err(|e| GatewayError::NotConfigured(format!("Invalid image endpoint: {}", e)))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::NotConfigured(format!(
                "Image endpoint {} cannot take a prompt path",
                base
            )));
        }
        Ok(Self { base })
    }

    /// Render URL for `prompt` with a fixed seed.
    pub fn render_url(&self, prompt: &str, seed: u32) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(prompt);
        }
        url.query_pairs_mut()
            .append_pair("width", "800")
            .append_pair("height", "600")
            .append_pair("nologo", "true")
            .append_pair("seed", &seed.to_string());
        url.to_string()
    }

    /// Render URL with a random seed so repeated prompts vary.
    pub fn random_render_url(&self, prompt: &str) -> String {
        let seed = rand::thread_rng().gen_range(0..1000);
        self.render_url(prompt, seed)
    }
}

/// External image-search page for manually picking a picture.
pub fn image_search_url(query: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("tbm", "isch")
        .append_pair("q", &format!("{} gaming wallpaper", query.trim()))
        .finish();
    format!("{}?{}", IMAGE_SEARCH_BASE, query)
}

/// Inline an uploaded file as a `data:` URI. The bytes are not inspected.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
