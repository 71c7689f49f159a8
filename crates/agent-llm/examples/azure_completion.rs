//! Send one prompt to the Azure OpenAI deployment named in the environment
//!
//! ```bash
//! export AZURE_OPENAI_ENDPOINT="https://my-resource.openai.azure.com"
//! export AZURE_OPENAI_DEPLOYMENT_NAME="gpt-4o"
//! export AZURE_OPENAI_API_KEY="..."
//! cargo run -p agent-llm --example azure_completion
//! ```

use agent_llm::providers::AzureOpenAIProvider;
use agent_llm::{CompletionRequest, LLMProvider, Message};
use agent_utils::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    agent_utils::init_tracing(false);

    let settings = Settings::from_env();
    if !settings.azure.is_complete() {
        eprintln!("Missing settings: {}", settings.azure.missing().join(", "));
    }

    let provider = AzureOpenAIProvider::from_settings(&settings.azure)?;
    println!("Endpoint: {}", provider.config().chat_completions_url()?);

    let request = CompletionRequest::builder(&settings.azure.deployment_name)
        .add_message(Message::user("Hello! Please respond with a brief greeting."))
        .max_tokens(100)
        .temperature(0.7)
        .build();

    let response = provider.complete(request).await?;
    println!("Response: {}", response.text());
    println!(
        "Tokens: {} in / {} out ({} total)",
        response.usage.input_tokens,
        response.usage.output_tokens,
        response.usage.total()
    );
    println!("Stop reason: {:?}", response.stop_reason);

    Ok(())
}
