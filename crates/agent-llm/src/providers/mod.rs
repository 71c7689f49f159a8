//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait and the
//! routing from a [`ModelId`] to a provider.

pub mod azure;

#[cfg(feature = "scripted")]
pub mod scripted;

pub use azure::{AzureOpenAIConfig, AzureOpenAIProvider};

#[cfg(feature = "scripted")]
pub use scripted::ScriptedProvider;

use crate::{LLMError, LLMProvider, ModelId, Result};
use agent_utils::AzureOpenAISettings;
use std::sync::Arc;

/// Build a provider for a provider-qualified model id
///
/// Only `azure/<deployment>` is routable; the deployment part overrides the
/// deployment in `settings`.
pub fn provider_for_model(
    model: &ModelId,
    settings: &AzureOpenAISettings,
) -> Result<Arc<dyn LLMProvider>> {
    match model.provider.as_str() {
        "azure" => {
            let config = AzureOpenAIConfig::from_settings(settings).with_deployment(&model.name);
            Ok(Arc::new(AzureOpenAIProvider::with_config(config)?))
        }
        other => Err(LLMError::UnsupportedProvider(other.to_string())),
    }
}
