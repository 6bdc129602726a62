use mockito::Matcher;
use reqwest::Client;
use serde_json::{json, Value};
use thyroid_core::advice::{fallback_tips, BreakfastAdvice, Tip, TipCategory};
use thyroid_proxy::{router, ProxyConfig, ProxyState};

const MODEL_PATH: &str = "/v1beta/models/test-model:generateContent";

async fn spawn_proxy(upstream: &str, api_key: Option<&str>) -> String {
    let config = ProxyConfig {
        api_key: api_key.map(str::to_string),
        model: "test-model".into(),
        base_url: upstream.to_string(),
        port: 0,
        timeout_secs: 5,
    };
    let app = router(ProxyState::new(&config).expect("state"));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind proxy");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn candidate(text: &str) -> String {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
}

#[tokio::test]
async fn test_health() {
    let base = spawn_proxy("http://127.0.0.1:1", None).await;
    let body: Value = Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_breakfast_forwards_model_answer() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", MODEL_PATH)
        .match_header("x-goog-api-key", "secret")
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate(r#"{"minutes":60,"reason":"El café reduce la absorción."}"#))
        .create_async()
        .await;

    let base = spawn_proxy(&upstream.url(), Some("secret")).await;
    let resp = Client::new()
        .post(format!("{base}/api/breakfast"))
        .json(&json!({ "foodInput": "café con tostada" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let advice: BreakfastAdvice = resp.json().await.unwrap();

    mock.assert_async().await;
    assert_eq!(advice.minutes, 60.0);
    assert_eq!(advice.reason, "El café reduce la absorción.");
}

#[tokio::test]
async fn test_breakfast_upstream_failure_returns_fallback() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("POST", MODEL_PATH)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let base = spawn_proxy(&upstream.url(), Some("secret")).await;
    let resp = Client::new()
        .post(format!("{base}/api/breakfast"))
        .json(&json!({ "foodInput": "papaya" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let advice: BreakfastAdvice = resp.json().await.unwrap();
    assert_eq!(advice, BreakfastAdvice::fallback());
}

#[tokio::test]
async fn test_breakfast_rejects_non_positive_minutes() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body(candidate(r#"{"minutes":-10,"reason":"?"}"#))
        .create_async()
        .await;

    let base = spawn_proxy(&upstream.url(), Some("secret")).await;
    let advice: BreakfastAdvice = Client::new()
        .post(format!("{base}/api/breakfast"))
        .json(&json!({ "foodInput": "agua" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(advice, BreakfastAdvice::fallback());
}

#[tokio::test]
async fn test_missing_api_key_never_calls_upstream() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", MODEL_PATH)
        .expect(0)
        .create_async()
        .await;

    let base = spawn_proxy(&upstream.url(), None).await;
    let advice: BreakfastAdvice = Client::new()
        .post(format!("{base}/api/breakfast"))
        .json(&json!({ "foodInput": "manzana" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(advice, BreakfastAdvice::fallback());
}

#[tokio::test]
async fn test_garbage_body_returns_fallback() {
    let base = spawn_proxy("http://127.0.0.1:1", Some("secret")).await;
    let resp = Client::new()
        .post(format!("{base}/api/breakfast"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let advice: BreakfastAdvice = resp.json().await.unwrap();
    assert_eq!(advice, BreakfastAdvice::fallback());
}

#[tokio::test]
async fn test_tips_forwards_model_answer() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("POST", MODEL_PATH)
        .match_body(Matcher::Regex("Fatiga, Piel seca".into()))
        .with_status(200)
        .with_body(candidate(
            r#"[{"category":"Alimentación","content":"Selenio."},{"category":"Mente","content":"Respira."},{"category":"Información","content":"Constancia."}]"#,
        ))
        .create_async()
        .await;

    let base = spawn_proxy(&upstream.url(), Some("secret")).await;
    let tips: Vec<Tip> = Client::new()
        .post(format!("{base}/api/tips"))
        .json(&json!({ "symptoms": [["Fatiga", "Piel seca"]] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(tips.len(), 3);
    assert_eq!(tips[0].category, TipCategory::Nutrition);
    assert_eq!(tips[2].content, "Constancia.");
}

#[tokio::test]
async fn test_empty_tips_return_fallback() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body(candidate("[]"))
        .create_async()
        .await;

    let base = spawn_proxy(&upstream.url(), Some("secret")).await;
    let tips: Vec<Tip> = Client::new()
        .post(format!("{base}/api/tips"))
        .json(&json!({ "symptoms": [] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tips, fallback_tips());
}
