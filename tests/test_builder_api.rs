use chef_claude::{AiConfig, ChefError, LlmProvider, RequestState, Session};
use mockito::Server;
use std::time::Duration;

fn messages_body(text: &str) -> String {
    serde_json::json!({
        "model": "claude-3-haiku-20240307",
        "content": [{"type": "text", "text": text}],
        "usage": {"input_tokens": 10, "output_tokens": 5}
    })
    .to_string()
}

#[tokio::test]
async fn test_builder_anthropic_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "builder-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(messages_body("## Salt & Pepper Toast"))
        .create_async()
        .await;

    let mut session = Session::builder()
        .config(AiConfig::default())
        .provider(LlmProvider::Anthropic)
        .api_key("builder-key")
        .base_url(server.url())
        .timeout(Duration::from_secs(5))
        .ingredients(["salt", "pepper"])
        .build()
        .unwrap();

    assert_eq!(session.generator_name(), "anthropic");
    let recipe = session.request_recipe().await.unwrap();
    assert_eq!(recipe.as_str(), "## Salt & Pepper Toast");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_builder_server_error_surfaces_as_failed_state() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(529)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#)
        .create_async()
        .await;

    let mut session = Session::builder()
        .config(AiConfig::default())
        .api_key("builder-key")
        .base_url(server.url())
        .ingredients(["pasta"])
        .build()
        .unwrap();

    assert!(session.request_recipe().await.is_err());
    match session.request_state() {
        RequestState::Failed(reason) => assert!(reason.contains("Overloaded")),
        other => panic!("Expected failed state, got {:?}", other),
    }
    assert!(session.recipe().is_none());
}

#[tokio::test]
async fn test_builder_uses_configured_default_provider() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r##"{"choices": [{"message": {"content": "# Rice Bowl"}}]}"##)
        .create_async()
        .await;

    let config = AiConfig::from_toml_str(&format!(
        r#"
        default_provider = "ollama"

        [providers.ollama]
        model = "llama3"
        base_url = "{}"
        "#,
        server.url()
    ))
    .unwrap();

    let mut session = Session::builder()
        .config(config)
        .ingredients(["rice"])
        .build()
        .unwrap();

    assert_eq!(session.generator_name(), "ollama");
    session.request_recipe().await.unwrap();
    assert_eq!(session.recipe().unwrap().as_str(), "# Rice Bowl");
    mock.assert_async().await;
}

#[test]
fn test_builder_rejects_disabled_provider() {
    let config = AiConfig::from_toml_str(
        r#"
        [providers.openai]
        enabled = false
        model = "gpt-4o-mini"
        api_key = "sk-test"
        "#,
    )
    .unwrap();

    let result = Session::builder()
        .config(config)
        .provider(LlmProvider::OpenAI)
        .build();
    assert!(matches!(result, Err(ChefError::ProviderError(_))));
}

#[test]
fn test_builder_rejects_empty_seed_ingredient() {
    let result = Session::builder()
        .config(AiConfig::default())
        .provider(LlmProvider::Ollama)
        .ingredients(["pasta", ""])
        .build();
    assert!(matches!(result, Err(ChefError::EmptyIngredient)));
}

#[test]
fn test_builder_seeds_ingredients_in_order() {
    let session = Session::builder()
        .config(AiConfig::default())
        .provider(LlmProvider::Ollama)
        .ingredients(["all the main spices", "pasta"])
        .ingredients(["ground beef", "tomato paste"])
        .build()
        .unwrap();

    let names: Vec<&str> = session.ingredients().iter().map(|i| i.as_str()).collect();
    assert_eq!(
        names,
        vec!["all the main spices", "pasta", "ground beef", "tomato paste"]
    );
    assert_eq!(session.request_state(), &RequestState::NotStarted);
}

fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "chef-claude-builder-{}-{}.toml",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_builder_reports_unreadable_config() {
    let path = write_config(
        "bad-timeout",
        r#"
        default_provider = "ollama"
        timeout = "ninety"
        "#,
    );

    let result = Session::builder()
        .config_file(&path)
        .api_key("sk-x")
        .build();
    std::fs::remove_file(&path).unwrap();

    match result {
        Err(ChefError::ConfigError(e)) => assert!(e.to_string().contains("timeout")),
        Err(other) => panic!("Expected a configuration error, got {:?}", other),
        Ok(session) => panic!(
            "Expected a configuration error, built a '{}' session",
            session.generator_name()
        ),
    }
}

#[test]
fn test_builder_reads_config_file() {
    let path = write_config(
        "ollama",
        r#"
        default_provider = "ollama"

        [providers.ollama]
        model = "mistral"
        "#,
    );

    let session = Session::builder().config_file(&path).build();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(session.unwrap().generator_name(), "ollama");
}
