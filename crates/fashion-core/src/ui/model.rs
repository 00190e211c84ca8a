//! Theme and navigation models.

use serde::{Deserialize, Serialize};

/// Feature names that always have a loading flag.
pub const DEFAULT_LOADING_KEYS: [&str; 4] = ["global", "aiStylist", "arTryOn", "vrShowroom"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Whether the navigation drawer is open. Never persisted.
    pub is_open: bool,
    pub current_page: String,
    pub breadcrumbs: Vec<String>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            is_open: false,
            current_page: "/".to_string(),
            breadcrumbs: Vec::new(),
        }
    }
}

/// Cumulative path prefixes of `page`: `/a/b` yields `["/a", "/a/b"]`.
pub fn breadcrumbs_for(page: &str) -> Vec<String> {
    let mut crumbs = Vec::new();
    let mut path = String::new();
    for segment in page.split('/').filter(|s| !s.is_empty()) {
        path.push('/');
        path.push_str(segment);
        crumbs.push(path.clone());
    }
    crumbs
}
