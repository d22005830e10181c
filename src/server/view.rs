//! View model mapping generation outcomes onto the two output regions.

use crate::templates;

/// Exactly one of the two output regions is populated per response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Image { filename: String },
    Text { message: String },
}

impl ResultView {
    pub fn image(filename: String) -> Self {
        Self::Image { filename }
    }

    pub fn text(message: String) -> Self {
        Self::Text { message }
    }

    /// Visibility flags for the (image, text) output regions.
    pub fn visibility(&self) -> (bool, bool) {
        match self {
            ResultView::Image { .. } => (true, false),
            ResultView::Text { .. } => (false, true),
        }
    }

    /// Render the populated region as an HTML fragment.
    pub fn render(&self) -> String {
        match self {
            ResultView::Image { filename } => templates::render(
                templates::RESULT_IMAGE,
                &[("filename", &templates::escape(filename))],
            ),
            ResultView::Text { message } => templates::render(
                templates::RESULT_TEXT,
                &[("text", &templates::escape(message))],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_region_is_visible() {
        let image = ResultView::image("a.png".to_string());
        let text = ResultView::text("hello".to_string());

        assert_eq!(image.visibility(), (true, false));
        assert_eq!(text.visibility(), (false, true));
    }

    #[test]
    fn test_image_render_references_download_route() {
        let html = ResultView::image("generated_image_1.png".to_string()).render();
        assert!(html.contains("/generated/generated_image_1.png"));
        assert!(html.contains("download"));
    }

    #[test]
    fn test_text_render_escapes_markup() {
        let html = ResultView::text("<b>bold</b> & more".to_string()).render();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(!html.contains("<b>bold</b>"));
    }
}
