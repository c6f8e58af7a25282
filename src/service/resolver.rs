use dohfan_resolver::doh::{DohClientFactory, HttpsTransport};
use dohfan_resolver::{DohResolver, ResolverBuilder, ResolverBuilderError};
use std::sync::Arc;

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_servers")]
    pub servers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers: Self::default_servers(),
        }
    }
}

impl Config {
    pub fn default_servers() -> Vec<String> {
        vec![
            "https://1.1.1.1/dns-query".to_string(),
            "https://1.0.0.1/dns-query".to_string(),
        ]
    }

    pub fn build(self) -> Result<DohResolver, ResolverBuilderError> {
        let transport = Arc::new(HttpsTransport::default());
        ResolverBuilder::default()
            .with_servers(self.servers)
            .with_factory(Arc::new(DohClientFactory::new(transport)))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use similar_asserts::assert_eq;

    #[test]
    fn default_config_should_build() {
        let config = Config::default();
        let resolver = config.build().unwrap();
        assert_eq!(resolver.servers(), Config::default_servers());
    }
}
