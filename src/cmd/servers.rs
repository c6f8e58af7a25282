use clap::Args;

/// Prints the configured upstream servers in racing order
#[derive(Args, Debug)]
pub struct Command;

impl Command {
    pub async fn run(self, config: crate::config::Config) {
        for server in config.resolver.servers {
            println!("{server}");
        }
    }
}
