use super::view::ResultView;
use super::SharedState;
use crate::models::{GenerationOutcome, SourceImage};
use crate::{templates, Error};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json};
use serde_json::{json, Value};
use tracing::{error, info, warn};

const EMPTY_RESULT: &str = r#"<p class="placeholder">Generated output will appear here.</p>"#;

pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn index() -> Html<String> {
    Html(render_page(EMPTY_RESULT, ""))
}

fn render_page(result_html: &str, prompt: &str) -> String {
    templates::render(
        templates::PAGE,
        &[("result", result_html), ("prompt", &templates::escape(prompt))],
    )
}

struct GenerateForm {
    prompt: String,
    image: Option<Vec<u8>>,
}

async fn read_form(mut multipart: Multipart) -> Result<GenerateForm, Error> {
    let mut prompt = String::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Invariant(format!("Malformed form upload: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("prompt") => {
                prompt = field
                    .text()
                    .await
                    .map_err(|e| Error::Invariant(format!("Malformed prompt field: {}", e)))?;
            }
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::Invariant(format!("Malformed image field: {}", e)))?;
                // Browsers submit an empty part when no file was chosen.
                if !bytes.is_empty() {
                    image = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    Ok(GenerateForm { prompt, image })
}

/// Submit handler. Always responds with the full page; failures land in
/// the text region instead of an error status, matching the one-page UI.
pub async fn generate(State(state): State<SharedState>, multipart: Multipart) -> Html<String> {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            return Html(render_page(&ResultView::text(e.to_string()).render(), ""));
        }
    };

    let view = run_generation(&state, &form).await;
    Html(render_page(&view.render(), &form.prompt))
}

async fn run_generation(state: &SharedState, form: &GenerateForm) -> ResultView {
    if form.prompt.trim().is_empty() {
        return ResultView::text(Error::EmptyPrompt.to_string());
    }

    let source = match &form.image {
        Some(bytes) => match SourceImage::from_bytes(bytes.clone()) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!("Rejected upload: {}", e);
                return ResultView::text(format!("Could not read the uploaded image: {}", e));
            }
        },
        None => None,
    };

    info!(
        "Dispatching generation (prompt: {} chars, image: {})",
        form.prompt.len(),
        source.is_some()
    );

    match state.generator.generate(&form.prompt, source.as_ref()).await {
        Ok(GenerationOutcome::Image(bytes)) => match state.images.save_png(&bytes).await {
            Ok(saved) => {
                info!("Saved generated image to {}", saved.path.display());
                ResultView::image(saved.filename)
            }
            Err(e) => {
                error!("Failed to save generated image: {}", e);
                ResultView::text(format!("An error occurred. Details: {}", e))
            }
        },
        Ok(GenerationOutcome::Text(text)) => ResultView::text(text),
        Err(e @ (Error::NoOutput | Error::EmptyPrompt)) => ResultView::text(e.to_string()),
        Err(e) => {
            error!("Generation failed: {}", e);
            ResultView::text(format!("An API error occurred. Details: {}", e))
        }
    }
}

/// Serves a previously generated image for display and download.
pub async fn generated_image(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return (StatusCode::BAD_REQUEST, "invalid filename").into_response();
    }

    let path = state.image_dir.join(&filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "image not found").into_response(),
    }
}
