use gemini_image_studio::ai::MockGenerationClient;
use gemini_image_studio::image::ImageProcessor;
use gemini_image_studio::server::{self, AppState};
use image::ImageFormat;
use std::sync::Arc;

async fn spawn_app(generator: MockGenerationClient) -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = Arc::new(AppState {
        generator: Box::new(generator),
        images: Box::new(ImageProcessor::new(dir.path()).unwrap()),
        image_dir: dir.path().to_path_buf(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        server::serve(listener, state).await.unwrap();
    });

    (format!("http://{}", addr), dir)
}

fn test_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 200, 100, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn prompt_form(prompt: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new().text("prompt", prompt.to_string())
}

async fn submit(base_url: &str, form: reqwest::multipart::Form) -> String {
    let response = reqwest::Client::new()
        .post(format!("{}/generate", base_url))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    response.text().await.unwrap()
}

#[tokio::test]
async fn test_index_serves_the_form() {
    let (base_url, _dir) = spawn_app(MockGenerationClient::new()).await;

    let body = reqwest::get(&base_url).await.unwrap().text().await.unwrap();

    assert!(body.contains("name=\"prompt\""));
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("multipart/form-data"));
}

#[tokio::test]
async fn test_healthz_reports_ok() {
    let (base_url, _dir) = spawn_app(MockGenerationClient::new()).await;

    let body: serde_json::Value = reqwest::get(format!("{}/healthz", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_text_response_shows_only_text_region() {
    let generator =
        MockGenerationClient::new().with_text_response("A quiet mountain lake.".to_string());
    let (base_url, _dir) = spawn_app(generator).await;

    let body = submit(&base_url, prompt_form("describe a lake")).await;

    assert!(body.contains("A quiet mountain lake."));
    assert!(body.contains("Model's Text Response"));
    assert!(!body.contains("/generated/"));
}

#[tokio::test]
async fn test_image_response_shows_image_region_and_round_trips() {
    let png = test_png();
    let generator = MockGenerationClient::new().with_image_response(png.clone());
    let (base_url, _dir) = spawn_app(generator).await;

    let body = submit(&base_url, prompt_form("draw a green square")).await;

    assert!(body.contains("/generated/"));
    assert!(body.contains("Download Image"));
    assert!(!body.contains("Model's Text Response"));

    // Fetch the image the page references and compare pixel content with
    // the inline data the mock returned.
    let filename = body
        .split("/generated/")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("page should reference a generated file");

    let served = reqwest::get(format!("{}/generated/{}", base_url, filename))
        .await
        .unwrap();
    assert_eq!(served.status(), 200);
    assert_eq!(
        served.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );

    let served_bytes = served.bytes().await.unwrap();
    let served_pixels = image::load_from_memory(&served_bytes).unwrap().to_rgba8();
    let original_pixels = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(served_pixels, original_pixels);
}

#[tokio::test]
async fn test_empty_prompt_is_rejected_without_dispatch() {
    let generator = MockGenerationClient::new();
    let probe = generator.clone();
    let (base_url, _dir) = spawn_app(generator).await;

    let body = submit(&base_url, prompt_form("   ")).await;

    assert!(body.contains("Please enter a prompt."));
    assert_eq!(probe.get_call_count(), 0);
}

#[tokio::test]
async fn test_undecodable_upload_is_rejected_without_dispatch() {
    let generator = MockGenerationClient::new();
    let probe = generator.clone();
    let (base_url, _dir) = spawn_app(generator).await;

    let form = prompt_form("edit this").part(
        "image",
        reqwest::multipart::Part::bytes(b"not pixels".to_vec())
            .file_name("input.png")
            .mime_str("image/png")
            .unwrap(),
    );
    let body = submit(&base_url, form).await;

    assert!(body.contains("Could not read the uploaded image"));
    assert_eq!(probe.get_call_count(), 0);
}

#[tokio::test]
async fn test_uploaded_image_is_forwarded_to_the_model() {
    let generator = MockGenerationClient::new().with_text_response("Edited.".to_string());
    let probe = generator.clone();
    let (base_url, _dir) = spawn_app(generator).await;

    let form = prompt_form("remove the background").part(
        "image",
        reqwest::multipart::Part::bytes(test_png())
            .file_name("input.png")
            .mime_str("image/png")
            .unwrap(),
    );
    submit(&base_url, form).await;

    assert_eq!(probe.get_call_count(), 1);
    assert!(probe.last_had_image());
    assert_eq!(probe.last_prompt(), Some("remove the background".to_string()));
}

#[tokio::test]
async fn test_empty_file_field_is_treated_as_no_image() {
    let generator = MockGenerationClient::new().with_text_response("Generated.".to_string());
    let probe = generator.clone();
    let (base_url, _dir) = spawn_app(generator).await;

    let form = prompt_form("a new image").part(
        "image",
        reqwest::multipart::Part::bytes(Vec::new()).file_name(""),
    );
    submit(&base_url, form).await;

    assert_eq!(probe.get_call_count(), 1);
    assert!(!probe.last_had_image());
}

#[tokio::test]
async fn test_model_failure_surfaces_in_text_region() {
    let generator = MockGenerationClient::new().with_api_error("auth failed".to_string());
    let (base_url, _dir) = spawn_app(generator).await;

    let body = submit(&base_url, prompt_form("draw")).await;

    assert!(body.contains("An API error occurred."));
    assert!(body.contains("auth failed"));
}

#[tokio::test]
async fn test_empty_model_response_surfaces_no_output_message() {
    let generator = MockGenerationClient::new().with_empty_response();
    let (base_url, _dir) = spawn_app(generator).await;

    let body = submit(&base_url, prompt_form("draw")).await;

    assert!(body.contains("The model did not return an image or text."));
}

#[tokio::test]
async fn test_missing_generated_image_is_not_found() {
    let (base_url, _dir) = spawn_app(MockGenerationClient::new()).await;

    let response = reqwest::get(format!("{}/generated/no-such.png", base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
