//! Turn-bounded scenario execution

use crate::config::ScenarioConfig;
use crate::error::{Result, ScenarioError};
use crate::judge::{Judgment, Verdict};
use crate::result::ScenarioResult;
use crate::scenario::Scenario;
use agent_core::{Agent, AgentInput, AgentReply, ConversationMessage, Role};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Conversation state of one run
struct Conversation<'a> {
    thread_id: String,
    description: &'a str,
    messages: Vec<ConversationMessage>,
    // agent name -> message count when it last spoke
    seen: HashMap<String, usize>,
}

impl<'a> Conversation<'a> {
    fn new(description: &'a str) -> Self {
        Self {
            thread_id: Uuid::new_v4().to_string(),
            description,
            messages: Vec::new(),
            seen: HashMap::new(),
        }
    }

    fn input_for(&self, agent: &str, turn: usize, judgment_request: bool) -> AgentInput {
        let seen = self.seen.get(agent).copied().unwrap_or_default();
        AgentInput::new(&self.thread_id)
            .with_messages(self.messages.clone())
            .with_new_messages(self.messages[seen..].to_vec())
            .with_description(self.description)
            .with_turn(turn)
            .with_judgment_request(judgment_request)
    }
}

/// Runs scenarios: simulated user, then each agent under test, then the
/// judge, once per turn until a verdict or the turn limit
///
/// # Example
///
/// ```no_run
/// use agent_scenario::{Scenario, ScenarioConfig, ScenarioRunner};
///
/// # async fn example(scenario: Scenario) -> agent_scenario::Result<()> {
/// let runner = ScenarioRunner::new(ScenarioConfig::default());
/// let result = runner.run(&scenario).await?;
/// println!("success: {}", result.success);
/// # Ok(())
/// # }
/// ```
pub struct ScenarioRunner {
    config: ScenarioConfig,
}

impl ScenarioRunner {
    /// Create a runner
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// Get the run configuration
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Run `scenario` to completion
    ///
    /// Turns are strictly sequential. Agent failures abort the run; a judge
    /// reply that cannot be parsed ends it with `success = false` and the
    /// parse error in [`ScenarioResult::error`].
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Agent`] if any participant fails its turn
    pub async fn run(&self, scenario: &Scenario) -> Result<ScenarioResult> {
        let started = Instant::now();
        let max_turns = scenario.max_turns();
        let mut conversation = Conversation::new(scenario.description());
        let mut agent_time = Duration::ZERO;
        let mut turns = 0;
        let mut outcome = None;

        info!(
            scenario = scenario.name(),
            thread_id = %conversation.thread_id,
            max_turns,
            "Starting scenario"
        );

        for turn in 1..=max_turns {
            turns = turn;

            let reply = self
                .take_turn(scenario.user_simulator(), &mut conversation, turn, false)
                .await?;
            self.record(&mut conversation, scenario.user_simulator().name(), Role::User, reply);

            for agent in scenario.agents_under_test() {
                let agent_started = Instant::now();
                let reply = self.take_turn(agent, &mut conversation, turn, false).await?;
                agent_time += agent_started.elapsed();
                self.record(&mut conversation, agent.name(), Role::Assistant, reply);
            }

            if let Some(judge) = scenario.judge() {
                let reply = self.take_turn(judge, &mut conversation, turn, false).await?;
                match Judgment::parse(&reply.content) {
                    Ok(judgment) if judgment.is_final() => {
                        let success = judgment.verdict == Verdict::Success;
                        outcome = Some(ScenarioResult::from_judgment(judgment, success));
                        break;
                    }
                    Ok(_) => debug!(turn, "Judge wants more conversation"),
                    Err(e) => {
                        warn!(turn, error = %e, "Judge reply unreadable");
                        outcome = Some(ScenarioResult::errored(e.to_string()));
                        break;
                    }
                }
            }
        }

        let mut result = match outcome {
            Some(result) => result,
            None => self.conclude(scenario, &mut conversation, max_turns).await?,
        };

        result.messages = conversation.messages;
        result.turns = turns;
        result.total_time = started.elapsed();
        result.agent_time = agent_time;

        info!(
            scenario = scenario.name(),
            success = result.success,
            turns = result.turns,
            messages = result.messages.len(),
            "Scenario finished"
        );

        Ok(result)
    }

    /// Outcome once the turn limit is reached without a verdict
    async fn conclude(
        &self,
        scenario: &Scenario,
        conversation: &mut Conversation<'_>,
        max_turns: usize,
    ) -> Result<ScenarioResult> {
        let Some(judge) = scenario.judge() else {
            return Ok(ScenarioResult::failure(format!(
                "Reached maximum turns ({max_turns}) without conclusion"
            )));
        };

        let reply = self.take_turn(judge, conversation, max_turns, true).await?;
        Ok(match Judgment::parse(&reply.content) {
            // "continue" on a forced judgment counts as failure
            Ok(judgment) => {
                let success = judgment.verdict == Verdict::Success;
                ScenarioResult::from_judgment(judgment, success)
            }
            Err(e) => {
                warn!(error = %e, "Final judgment unreadable");
                ScenarioResult::errored(e.to_string())
            }
        })
    }

    async fn take_turn(
        &self,
        agent: &Arc<dyn Agent>,
        conversation: &mut Conversation<'_>,
        turn: usize,
        judgment_request: bool,
    ) -> Result<AgentReply> {
        let name = agent.name().to_string();
        let input = conversation.input_for(&name, turn, judgment_request);

        debug!(agent = %name, turn, "Calling agent");
        let reply = agent
            .call(input)
            .await
            .map_err(|e| ScenarioError::agent(&name, e))?;

        conversation.seen.insert(name, conversation.messages.len());
        Ok(reply)
    }

    /// Append a reply; its author has now seen everything up to it
    fn record(&self, conversation: &mut Conversation<'_>, agent: &str, role: Role, reply: AgentReply) {
        if self.config.verbose {
            info!(%role, content = %reply.content, "Message");
        } else {
            debug!(%role, content = %reply.content, "Message");
        }

        let message = ConversationMessage {
            role,
            content: reply.content,
        };
        conversation.messages.push(message);
        conversation
            .seen
            .insert(agent.to_string(), conversation.messages.len());
    }
}
