use std::path::Path;

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: crate::service::resolver::Config,
}

impl Config {
    pub fn load(path: &Path) -> Self {
        let conf = ::config::Config::builder()
            .add_source(::config::File::from(path).required(true))
            .add_source(::config::Environment::default().separator("_"))
            .build()
            .expect("unable to locate configuration file");
        conf.try_deserialize()
            .expect("configuration format invalid")
    }
}
