use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Export configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RenderOptions {
    // Page geometry
    pub paper_size: PaperSize,
    pub orientation: Orientation,

    // Diagnostics
    pub draw_zone_outlines: bool,
    pub outline_color: Color,

    // Metadata: replaces the book title in the document information
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            draw_zone_outlines: false,
            outline_color: Color::default(),
            title: None,
        }
    }
}

impl RenderOptions {
    /// The physical size every page is rendered at
    pub fn page_size(&self) -> PageSize {
        self.paper_size.page_size(self.orientation)
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PhotobookError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PhotobookError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.page_size().validate()?;

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(PhotobookError::Config(
                    "Title override must not be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}
