pub mod doh;
#[cfg(feature = "mock")]
pub mod mock;
pub mod policy;
pub mod prelude;

use crate::policy::{AggregateError, ErrorPolicy, FirstError, ResolveError};
use crate::prelude::{ClientFactory, QueryError, ResolveOptions};
use dohfan_proto::packet::{Record, RecordType};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Clone, Debug)]
pub enum ResolverBuilderError {
    MissingFactory,
}

pub struct ResolverBuilder {
    servers: Vec<String>,
    factory: Option<Arc<dyn ClientFactory>>,
    policy: Arc<dyn ErrorPolicy>,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            factory: None,
            policy: Arc::new(FirstError),
        }
    }
}

impl ResolverBuilder {
    pub fn add_server<S: Into<String>>(&mut self, value: S) {
        self.servers.push(value.into());
    }

    pub fn with_server<S: Into<String>>(mut self, value: S) -> Self {
        self.servers.push(value.into());
        self
    }

    pub fn with_servers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.servers.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_factory(mut self, value: Arc<dyn ClientFactory>) -> Self {
        self.factory = Some(value);
        self
    }

    pub fn with_error_policy(mut self, value: Arc<dyn ErrorPolicy>) -> Self {
        self.policy = value;
        self
    }

    pub fn build(self) -> Result<DohResolver, ResolverBuilderError> {
        let factory = self.factory.ok_or(ResolverBuilderError::MissingFactory)?;
        Ok(DohResolver {
            servers: RwLock::new(self.servers),
            factory,
            policy: self.policy,
        })
    }
}

/// Fans every resolution out to all configured servers at once and keeps
/// the first successful answer. Failures only surface when every server
/// failed, shaped by the configured [`ErrorPolicy`].
pub struct DohResolver {
    servers: RwLock<Vec<String>>,
    factory: Arc<dyn ClientFactory>,
    policy: Arc<dyn ErrorPolicy>,
}

impl DohResolver {
    /// Snapshot of the configured servers, never aliasing internal storage.
    pub fn servers(&self) -> Vec<String> {
        self.servers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Atomically replaces the server list. In-flight resolutions keep
    /// racing against the snapshot they took at call start.
    pub fn set_servers(&self, servers: Vec<String>) {
        *self
            .servers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = servers;
    }

    pub async fn resolve4(
        &self,
        domain: &str,
        options: &ResolveOptions,
    ) -> Result<Vec<Record>, ResolveError> {
        self.resolve(RecordType::A, domain, options).await
    }

    pub async fn resolve6(
        &self,
        domain: &str,
        options: &ResolveOptions,
    ) -> Result<Vec<Record>, ResolveError> {
        self.resolve(RecordType::AAAA, domain, options).await
    }

    async fn resolve(
        &self,
        rtype: RecordType,
        domain: &str,
        options: &ResolveOptions,
    ) -> Result<Vec<Record>, ResolveError> {
        let servers = self.servers();
        if servers.is_empty() {
            tracing::error!(domain, "no server configured");
            return Err(self.policy.handle(AggregateError::default()));
        }

        let mut tasks: FuturesUnordered<_> = servers
            .iter()
            .enumerate()
            .map(|(index, server)| {
                let client = self.factory.create(server);
                async move {
                    let started = Instant::now();
                    let result = client.query(domain, rtype, options).await.map(|answers| {
                        answers
                            .into_iter()
                            .filter(|record| record.rtype() == rtype)
                            .collect::<Vec<_>>()
                    });
                    let duration = started.elapsed().as_millis() as u64;
                    match &result {
                        Ok(answers) => tracing::debug!(
                            server = %server,
                            domain,
                            rtype = ?rtype,
                            duration,
                            answers = answers.len(),
                            "query succeeded"
                        ),
                        Err(error) => tracing::debug!(
                            server = %server,
                            domain,
                            rtype = ?rtype,
                            duration,
                            "query failed: {error}"
                        ),
                    };
                    (index, result)
                }
            })
            .collect();

        // Errors land in completion order but are recorded by configuration
        // index, so the aggregate stays deterministic.
        let mut errors: Vec<Option<QueryError>> = servers.iter().map(|_| None).collect();
        while let Some((index, result)) = tasks.next().await {
            match result {
                // First settled success wins, remaining tasks are dropped
                // with the stream. An empty answer list is still a success.
                Ok(answers) => return Ok(answers),
                Err(error) => {
                    tracing::error!(code = error.code(), "{error}");
                    errors[index] = Some(error);
                }
            }
        }

        let aggregate = AggregateError::new(errors.into_iter().flatten().collect());
        Err(self.policy.handle(aggregate))
    }
}
