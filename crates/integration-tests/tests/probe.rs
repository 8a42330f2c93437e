//! Connectivity probe tests

mod harness;

use std::time::{Duration, Instant};

use harness::mock_backend::MockBackend;
use prism_config::{ProviderId, ProviderSettings};
use prism_llm::probe::{ProbeResult, probe};

fn settings(pairs: &[(&str, &str)]) -> ProviderSettings {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn failure_message(result: ProbeResult) -> String {
    match result {
        ProbeResult::Failed { message } => message,
        ProbeResult::Ok => panic!("expected probe failure"),
    }
}

#[tokio::test]
async fn gemini_probe_succeeds_without_settings() {
    assert!(probe(ProviderId::Gemini, None).await.is_ok());
}

#[tokio::test]
async fn openai_probe_succeeds_against_reachable_backend() {
    let mock = MockBackend::start().await.unwrap();
    let settings = settings(&[("base_url", &mock.base_url()), ("api_key", "sk-test")]);

    assert!(probe(ProviderId::OpenAi, Some(&settings)).await.is_ok());
}

#[tokio::test]
async fn anthropic_probe_sends_minimal_generation_request() {
    let mock = MockBackend::start().await.unwrap();
    let settings = settings(&[("base_url", &mock.base_url()), ("api_key", "sk-ant-test")]);

    assert!(probe(ProviderId::Anthropic, Some(&settings)).await.is_ok());

    let body = mock.last_request().unwrap();
    assert_eq!(body["max_tokens"], 1);
    assert_eq!(body["messages"][0]["content"], "test");
    assert_eq!(mock.messages_count(), 1);
}

#[tokio::test]
async fn ollama_probe_succeeds_against_reachable_backend() {
    let mock = MockBackend::start().await.unwrap();
    let settings = settings(&[("base_url", &mock.host())]);

    assert!(probe(ProviderId::Ollama, Some(&settings)).await.is_ok());
}

#[tokio::test]
async fn ollama_probe_reports_unreachable_service() {
    // Bind then drop to get a port with nothing listening on it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let settings = settings(&[("base_url", &host)]);
    let message = failure_message(probe(ProviderId::Ollama, Some(&settings)).await);

    assert_eq!(message, format!("Could not connect to Ollama at {host}. Is the Ollama service running?"));
}

#[tokio::test]
async fn probe_gives_up_after_five_seconds() {
    let mock = MockBackend::start_with_delay(Duration::from_secs(6)).await.unwrap();
    let settings = settings(&[("base_url", &mock.base_url())]);

    let started = Instant::now();
    let message = failure_message(probe(ProviderId::OpenAi, Some(&settings)).await);

    assert_eq!(message, "Connection timed out after 5 seconds");
    assert!(started.elapsed() < Duration::from_millis(5500));
}
