//! Shared setup for a suite of travel scenarios

use crate::agents::{CoordinatorAgent, TravelPlannerAgent, WeatherAgent};
use agent_core::Agent;
use agent_llm::LLMProvider;
use agent_llm::providers::provider_for_model;
use agent_runtime::{AzureConnector, ServiceConnector};
use agent_scenario::{
    CachedAgent, ResponseCache, ScenarioConfig, ScenarioError, ScenarioRunner, UserSimulatorAgent,
};
use agent_utils::Settings;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the scenarios need, built once and passed by reference
///
/// Agents are created per scenario, so each run gets fresh connections,
/// while every agent shares one [`ResponseCache`].
pub struct SuiteContext {
    config: ScenarioConfig,
    connector: Arc<dyn ServiceConnector>,
    simulator_provider: Arc<dyn LLMProvider>,
    simulator_model: String,
    cache: ResponseCache,
}

impl SuiteContext {
    /// Build a context for live Azure OpenAI runs
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Configuration`] if the default model cannot
    /// be routed to a provider
    pub fn from_settings(settings: &Settings, config: ScenarioConfig) -> Result<Self, ScenarioError> {
        let missing = settings.azure.missing();
        if !missing.is_empty() {
            warn!(?missing, "Azure OpenAI settings incomplete; calls will fail");
        }

        let model = config.model_id()?;
        let simulator_provider = provider_for_model(&model, &settings.azure)?;
        info!(model = %model, cache_key = %config.cache_key, "Suite configured");

        Ok(Self::new(
            config,
            Arc::new(AzureConnector::new(settings.azure.clone())),
            simulator_provider,
            model.name,
        ))
    }

    /// Build a context from explicit parts
    pub fn new(
        config: ScenarioConfig,
        connector: Arc<dyn ServiceConnector>,
        simulator_provider: Arc<dyn LLMProvider>,
        simulator_model: impl Into<String>,
    ) -> Self {
        let cache = config.response_cache();
        Self {
            config,
            connector,
            simulator_provider,
            simulator_model: simulator_model.into(),
            cache,
        }
    }

    /// Run configuration
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Reply cache shared by all agents of the suite
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// A runner for this suite
    pub fn runner(&self) -> ScenarioRunner {
        ScenarioRunner::new(self.config.clone())
    }

    fn cached<A: Agent + 'static>(&self, agent: A) -> Arc<dyn Agent> {
        Arc::new(CachedAgent::new(agent, self.cache.clone()))
    }

    /// A cached weather agent
    pub fn weather_agent(&self) -> agent_core::Result<Arc<dyn Agent>> {
        Ok(self.cached(WeatherAgent::new(self.connector.as_ref())?))
    }

    /// A cached travel planner agent
    pub fn travel_planner_agent(&self) -> agent_core::Result<Arc<dyn Agent>> {
        Ok(self.cached(TravelPlannerAgent::new(self.connector.as_ref())?))
    }

    /// A cached coordinator agent
    pub fn coordinator_agent(&self) -> agent_core::Result<Arc<dyn Agent>> {
        Ok(self.cached(CoordinatorAgent::new(self.connector.as_ref())?))
    }

    /// A cached user simulator on the default model
    pub fn user_simulator(&self) -> Result<Arc<dyn Agent>, ScenarioError> {
        let simulator = UserSimulatorAgent::new(self.simulator_provider.clone(), &self.simulator_model)?;
        Ok(self.cached(simulator))
    }
}
