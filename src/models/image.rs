use serde::{Deserialize, Serialize};

/// Widget type recorded for file uploads that carry link metadata.
pub const IMAGE_LINKS_WIDGET: &str = "imagelinks";

/// Insurance card scan uploaded through the form.
///
/// Everything but `id` stays `None` when the form field was left empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub image_name: Option<String>,
    pub image_url: Option<String>,
    pub widget_type: Option<String>,
}

impl Image {
    pub fn empty(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}
