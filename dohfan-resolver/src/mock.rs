use crate::prelude::{ClientFactory, QueryClient, QueryError, ResolveOptions, TransportError};
use dohfan_proto::packet::{Record, RecordType};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone, Debug)]
struct MockBehavior {
    delay: Duration,
    result: Result<Vec<Record>, QueryError>,
}

/// Client factory replaying scripted outcomes, keyed by server descriptor.
/// The outcome ignores the queried domain and record type: the coordinator
/// owns the filtering, the mock only drives the race.
#[derive(Debug, Default)]
pub struct MockClientFactory {
    behaviors: HashMap<String, MockBehavior>,
}

impl MockClientFactory {
    pub fn with_answers(self, server: &str, answers: Vec<Record>) -> Self {
        self.with_answers_after(server, Duration::ZERO, answers)
    }

    pub fn with_answers_after(
        mut self,
        server: &str,
        delay: Duration,
        answers: Vec<Record>,
    ) -> Self {
        self.behaviors.insert(
            server.to_string(),
            MockBehavior {
                delay,
                result: Ok(answers),
            },
        );
        self
    }

    pub fn with_failure(self, server: &str, error: QueryError) -> Self {
        self.with_failure_after(server, Duration::ZERO, error)
    }

    pub fn with_failure_after(mut self, server: &str, delay: Duration, error: QueryError) -> Self {
        self.behaviors.insert(
            server.to_string(),
            MockBehavior {
                delay,
                result: Err(error),
            },
        );
        self
    }
}

impl ClientFactory for MockClientFactory {
    fn create(&self, server: &str) -> Box<dyn QueryClient> {
        Box::new(MockClient {
            behavior: self.behaviors.get(server).cloned(),
        })
    }
}

pub struct MockClient {
    behavior: Option<MockBehavior>,
}

#[async_trait::async_trait]
impl QueryClient for MockClient {
    async fn query(
        &self,
        _domain: &str,
        _rtype: RecordType,
        _options: &ResolveOptions,
    ) -> Result<Vec<Record>, QueryError> {
        if let Some(found) = &self.behavior {
            if !found.delay.is_zero() {
                tokio::time::sleep(found.delay).await;
            }
            found.result.clone()
        } else {
            Err(QueryError::Transport(TransportError::Connection(
                String::from("no scripted behavior"),
            )))
        }
    }
}
