//! Cache of agent replies keyed on the run's cache key
//!
//! Re-running a scenario under the same cache key replays earlier replies
//! instead of calling the model again. An empty cache key turns the cache
//! off: every call goes through.

use agent_core::{Agent, AgentInput, AgentReply, AgentRole, Result};
use async_trait::async_trait;
use cached::{Cached, UnboundCache};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Identity of one cached reply
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Run-level cache key
    pub namespace: String,
    /// Name of the agent that produced the reply
    pub agent: String,
    /// Serialised conversation the agent saw
    pub input: String,
}

#[derive(Serialize)]
struct KeyedInput<'a> {
    description: &'a str,
    messages: &'a [agent_core::ConversationMessage],
    judgment_request: bool,
}

impl CacheKey {
    /// Build the key for `agent` answering `input`
    ///
    /// Thread id and turn number are left out so that a re-run of the same
    /// conversation hits the cache.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the input cannot be encoded
    pub fn new(
        namespace: impl Into<String>,
        agent: impl Into<String>,
        input: &AgentInput,
    ) -> serde_json::Result<Self> {
        let keyed = KeyedInput {
            description: &input.scenario_description,
            messages: &input.messages,
            judgment_request: input.judgment_request,
        };
        Ok(Self {
            namespace: namespace.into(),
            agent: agent.into(),
            input: serde_json::to_string(&keyed)?,
        })
    }
}

/// Thread-safe reply cache shared by every agent of a run
pub struct ResponseCache {
    namespace: String,
    cache: Arc<RwLock<UnboundCache<CacheKey, AgentReply>>>,
}

impl ResponseCache {
    /// Create a cache for `namespace`; empty disables caching
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            cache: Arc::new(RwLock::new(UnboundCache::new())),
        }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self::new("")
    }

    /// Whether replies are stored
    pub fn is_enabled(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// The run-level cache key
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get a cached reply
    pub async fn get(&self, key: &CacheKey) -> Option<AgentReply> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Store a reply
    pub async fn insert(&self, key: CacheKey, reply: AgentReply) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, reply);
    }

    /// Return the cached reply for `agent`/`input`, or produce and store one
    ///
    /// Failed calls are not cached. An input that cannot be keyed bypasses
    /// the cache.
    pub async fn get_or_call<F, Fut>(&self, agent: &str, input: &AgentInput, call: F) -> Result<AgentReply>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AgentReply>>,
    {
        if !self.is_enabled() {
            return call().await;
        }

        let key = match CacheKey::new(&self.namespace, agent, input) {
            Ok(key) => key,
            Err(e) => {
                warn!(agent, error = %e, "Input not cacheable");
                return call().await;
            }
        };
        if let Some(reply) = self.get(&key).await {
            debug!(agent, "Cache hit");
            return Ok(reply);
        }

        debug!(agent, "Cache miss");
        let reply = call().await?;
        self.insert(key, reply.clone()).await;

        Ok(reply)
    }

    /// Clear all cached replies
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached replies
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for ResponseCache {
    fn clone(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

/// An agent whose replies go through a [`ResponseCache`]
pub struct CachedAgent<A> {
    inner: A,
    cache: ResponseCache,
}

impl<A: Agent> CachedAgent<A> {
    /// Wrap `inner` with `cache`
    pub fn new(inner: A, cache: ResponseCache) -> Self {
        Self { inner, cache }
    }

    /// The wrapped agent
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait]
impl<A: Agent> Agent for CachedAgent<A> {
    async fn call(&self, input: AgentInput) -> Result<AgentReply> {
        let name = self.inner.name();
        self.cache
            .get_or_call(name, &input, || self.inner.call(input.clone()))
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn role(&self) -> AgentRole {
        self.inner.role()
    }
}
