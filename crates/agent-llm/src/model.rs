//! Provider-qualified model identifiers such as `azure/gpt-4o`

use crate::{LLMError, Result};
use std::fmt;
use std::str::FromStr;

/// A model id of the form `<provider>/<model>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId {
    /// Provider prefix, e.g. `azure`
    pub provider: String,
    /// Provider-specific model or deployment name
    pub name: String,
}

impl ModelId {
    /// Build an Azure model id for a deployment
    pub fn azure(deployment: impl Into<String>) -> Self {
        Self {
            provider: "azure".to_string(),
            name: deployment.into(),
        }
    }

    /// Parse `<provider>/<model>`
    ///
    /// The model part may itself contain slashes; only the first one splits.
    pub fn parse(id: &str) -> Result<Self> {
        let (provider, name) = id.split_once('/').ok_or_else(|| {
            LLMError::InvalidRequest(format!(
                "Model id '{id}' must look like '<provider>/<model>'"
            ))
        })?;

        if provider.is_empty() {
            return Err(LLMError::InvalidRequest(format!(
                "Model id '{id}' has an empty provider"
            )));
        }

        Ok(Self {
            provider: provider.to_string(),
            name: name.to_string(),
        })
    }
}

impl FromStr for ModelId {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.name)
    }
}
