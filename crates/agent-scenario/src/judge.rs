//! Judge agent and verdict parsing

use crate::config::ScenarioConfig;
use crate::error::{Result, ScenarioError};
use agent_core::{Agent, AgentInput, AgentReply, AgentRole, ConversationMessage};
use agent_llm::providers::provider_for_model;
use agent_llm::{CompletionRequest, LLMProvider, Message};
use agent_prompt::{JinjaTemplate, PromptBuilder};
use agent_utils::AzureOpenAISettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

const JUDGE_PROMPT: &str = r#"You are an evaluator watching a conversation between a simulated user and an AI agent.

<scenario>
{{ description }}
</scenario>

<criteria>
{% for criterion in criteria %}{{ loop.index }}. {{ criterion }}
{% else %}1. The agent helps the user with what the scenario describes.
{% endfor %}</criteria>

{% if final_judgment %}The conversation is over. Decide now: the verdict must be "success" or "failure".
{% else %}If it is too early to decide, use the verdict "continue".
{% endif %}
Reply with a single JSON object and nothing else:
{"verdict": "success" | "failure" | "continue", "reasoning": "<one or two sentences>", "passed_criteria": ["..."], "failed_criteria": ["..."]}"#;

/// Judge decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Scenario passed
    Success,
    /// Scenario failed
    Failure,
    /// Not enough conversation yet
    Continue,
}

/// A parsed judge reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    /// Decision on the conversation so far
    pub verdict: Verdict,

    /// The judge's explanation
    #[serde(default)]
    pub reasoning: String,

    /// Criteria the judge considers met
    #[serde(default)]
    pub passed_criteria: Vec<String>,

    /// Criteria the judge considers missed
    #[serde(default)]
    pub failed_criteria: Vec<String>,
}

impl Judgment {
    /// Parse a judge reply
    ///
    /// Accepts bare JSON or JSON embedded in surrounding text (for example
    /// a fenced code block followed by prose). The first `{` that starts a
    /// complete verdict object wins; anything after that object is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Judgment`] if no verdict object is found
    pub fn parse(text: &str) -> Result<Self> {
        let mut last_error = None;

        for (start, _) in text.match_indices('{') {
            let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Self>();
            match stream.next() {
                Some(Ok(judgment)) => return Ok(judgment),
                Some(Err(e)) => last_error = Some(e),
                None => {}
            }
        }

        Err(match last_error {
            Some(e) => ScenarioError::Judgment(format!("unreadable verdict: {e}")),
            None => ScenarioError::Judgment(format!("no JSON object in judge reply: {text:?}")),
        })
    }

    /// Whether the verdict ends the run
    pub fn is_final(&self) -> bool {
        self.verdict != Verdict::Continue
    }
}

#[derive(Serialize)]
struct JudgeContext<'a> {
    description: &'a str,
    criteria: &'a [String],
    final_judgment: bool,
}

/// Agent that reads the transcript and answers with a JSON [`Judgment`]
pub struct JudgeAgent {
    provider: Arc<dyn LLMProvider>,
    model: String,
    criteria: Vec<String>,
    template: JinjaTemplate,
}

impl JudgeAgent {
    /// Create a judge
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in prompt template fails to parse
    pub fn new<I, S>(provider: Arc<dyn LLMProvider>, model: impl Into<String>, criteria: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            provider,
            model: model.into(),
            criteria: criteria.into_iter().map(Into::into).collect(),
            template: JinjaTemplate::new("judge", JUDGE_PROMPT)?,
        })
    }

    /// Create a judge on the configuration's default model
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Configuration`] if the default model cannot
    /// be routed to a provider
    pub fn from_config<I, S>(config: &ScenarioConfig, settings: &AzureOpenAISettings, criteria: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = config.model_id()?;
        let provider = provider_for_model(&model, settings)?;
        Self::new(provider, model.name, criteria)
    }

    /// Criteria the judge checks
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    fn transcript(messages: &[ConversationMessage]) -> String {
        let lines = messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n");
        PromptBuilder::new().tagged("transcript", lines).build()
    }
}

#[async_trait]
impl Agent for JudgeAgent {
    async fn call(&self, input: AgentInput) -> agent_core::Result<AgentReply> {
        let system = self
            .template
            .render(&JudgeContext {
                description: &input.scenario_description,
                criteria: &self.criteria,
                final_judgment: input.judgment_request,
            })
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

        let request = CompletionRequest::builder(&self.model)
            .system(system)
            .add_message(Message::user(Self::transcript(&input.messages)))
            .temperature(0.0)
            .build();

        debug!(turn = input.turn, final_judgment = input.judgment_request, "Requesting verdict");
        let response = self.provider.complete(request).await?;

        Ok(AgentReply::assistant(response.message.content))
    }

    fn name(&self) -> &str {
        "judge"
    }

    fn role(&self) -> AgentRole {
        AgentRole::Judge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::providers::ScriptedProvider;

    #[test]
    fn test_parse_bare_json() {
        let judgment = Judgment::parse(
            r#"{"verdict":"success","reasoning":"gave a forecast","passed_criteria":["mentions weather"],"failed_criteria":[]}"#,
        )
        .unwrap();

        assert_eq!(judgment.verdict, Verdict::Success);
        assert_eq!(judgment.reasoning, "gave a forecast");
        assert_eq!(judgment.passed_criteria, vec!["mentions weather"]);
        assert!(judgment.is_final());
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "Here is my verdict:\n```json\n{\"verdict\": \"continue\"}\n```";
        let judgment = Judgment::parse(text).unwrap();
        assert_eq!(judgment.verdict, Verdict::Continue);
        assert!(judgment.reasoning.is_empty());
        assert!(!judgment.is_final());
    }

    #[test]
    fn test_parse_ignores_braces_after_verdict() {
        let text = "```json\n{\"verdict\": \"success\", \"reasoning\": \"ok\"}\n```\nCriteria {1} satisfied.";
        let judgment = Judgment::parse(text).unwrap();
        assert_eq!(judgment.verdict, Verdict::Success);
        assert_eq!(judgment.reasoning, "ok");
    }

    #[test]
    fn test_parse_skips_braces_before_verdict() {
        let text = "Checked {criterion 1}. Verdict: {\"verdict\": \"failure\", \"failed_criteria\": [\"no forecast\"]} {end}";
        let judgment = Judgment::parse(text).unwrap();
        assert_eq!(judgment.verdict, Verdict::Failure);
        assert_eq!(judgment.failed_criteria, vec!["no forecast"]);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            Judgment::parse("looks good to me"),
            Err(ScenarioError::Judgment(_))
        ));
        assert!(matches!(
            Judgment::parse(r#"{"verdict": "maybe"}"#),
            Err(ScenarioError::Judgment(_))
        ));
    }

    #[tokio::test]
    async fn test_judge_prompt() {
        let provider = Arc::new(ScriptedProvider::constant(r#"{"verdict":"failure"}"#));
        let judge = JudgeAgent::new(provider.clone(), "gpt-4o", ["mentions the temperature"]).unwrap();
        assert_eq!(judge.role(), AgentRole::Judge);

        let input = AgentInput::new("t")
            .with_description("User asks about weather in Paris.")
            .with_messages(vec![
                ConversationMessage::user("weather paris"),
                ConversationMessage::assistant("Rainy, 9C."),
            ])
            .with_judgment_request(true);

        let reply = judge.call(input).await.unwrap();
        assert_eq!(Judgment::parse(&reply.content).unwrap().verdict, Verdict::Failure);

        let request = &provider.requests()[0];
        let system = request.system.as_deref().unwrap();
        assert!(system.contains("User asks about weather in Paris."));
        assert!(system.contains("1. mentions the temperature"));
        assert!(system.contains("Decide now"));
        assert_eq!(
            request.messages[0].content,
            "<transcript>\nuser: weather paris\nassistant: Rainy, 9C.\n</transcript>\n"
        );
    }

    #[tokio::test]
    async fn test_judge_without_criteria_allows_continue() {
        let provider = Arc::new(ScriptedProvider::constant(r#"{"verdict":"continue"}"#));
        let judge = JudgeAgent::new(provider.clone(), "gpt-4o", Vec::<String>::new()).unwrap();

        judge.call(AgentInput::new("t")).await.unwrap();

        let system = provider.requests()[0].system.clone().unwrap();
        assert!(system.contains("1. The agent helps the user"));
        assert!(system.contains("\"continue\""));
    }
}
