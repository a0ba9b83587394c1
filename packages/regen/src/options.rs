use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegenOptions {
    pub wrapper_selector: String,
    pub button_selector: String,
    pub overlay_selector: String,
    pub image_selector: String,

    /// Class that shows the loading overlay
    pub active_class: String,

    /// Simulated processing time before the image is swapped
    pub processing_delay_ms: u64,

    /// Time after the swap at which the overlay is cleared regardless of load events
    pub fallback_delay_ms: u64,

    /// Query parameter carrying the cache-busting timestamp
    pub cache_bust_param: String,
}

impl Default for RegenOptions {
    fn default() -> Self {
        Self {
            wrapper_selector: ".minimal-img-wrapper".to_string(),
            button_selector: ".redesign-btn".to_string(),
            overlay_selector: ".generating-overlay".to_string(),
            image_selector: "img".to_string(),
            active_class: "active".to_string(),
            processing_delay_ms: 2000,
            fallback_delay_ms: 1000,
            cache_bust_param: "random".to_string(),
        }
    }
}
