//! Visual search over a fixed catalog.

use fashion_core::ui::UiStore;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Loading flag raised while a search runs.
pub const LOADING_KEY: &str = "visualSearch";

/// Simulated matching latency.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: u32,
    pub title: String,
    pub price: f64,
    pub image_url: String,
}

const CATALOG: &[(u32, &str, f64, &str)] = &[
    (1, "Silk Dress", 129.0, "https://images.unsplash.com/photo-1520975922139-6c7094844362?w=600&q=80"),
    (2, "Casual Tee", 29.0, "https://images.unsplash.com/photo-1512436991641-6745cdb1723f?w=600&q=80"),
    (3, "Denim Jacket", 89.0, "https://images.unsplash.com/photo-1520975693412-35ee4c1a4a6b?w=600&q=80"),
    (4, "Classic Heels", 79.0, "https://images.unsplash.com/photo-1514986888952-8cd320577b68?w=600&q=80"),
    (5, "Leather Bag", 159.0, "https://images.unsplash.com/photo-1548036328-c9fa89d128fa?w=600&q=80"),
    (6, "Sunglasses", 49.0, "https://images.unsplash.com/photo-1511497584788-876760111969?w=600&q=80"),
];

pub struct VisualSearch {
    ui: Arc<UiStore>,
    delay: Duration,
}

impl VisualSearch {
    pub fn new(ui: Arc<UiStore>) -> Self {
        Self {
            ui,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Finds items similar to the image at `image_ref`.
    ///
    /// The loading flag stays raised for the whole search. An empty
    /// reference returns no results and leaves the flag alone.
    pub async fn search(&self, image_ref: &str) -> Vec<SearchResult> {
        if image_ref.trim().is_empty() {
            return Vec::new();
        }

        self.ui.set_loading(LOADING_KEY, true);
        tokio::time::sleep(self.delay).await;
        let results: Vec<SearchResult> = CATALOG
            .iter()
            .map(|&(id, title, price, image_url)| SearchResult {
                id,
                title: title.to_string(),
                price,
                image_url: image_url.to_string(),
            })
            .collect();
        self.ui.set_loading(LOADING_KEY, false);

        info!(results = results.len(), "Visual search completed");
        results
    }
}
