use clap::Args;
use dohfan_proto::packet::Record;
use dohfan_resolver::prelude::ResolveOptions;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum RecordKind {
    A,
    Aaaa,
}

/// Resolves a domain name against all the configured servers at once
#[derive(Args, Debug)]
pub struct Command {
    /// Domain name to resolve
    domain: String,
    /// Record type to request
    #[arg(short, long, value_enum, default_value = "a")]
    record: RecordKind,
    /// Ask the servers not to recurse
    #[arg(long)]
    no_recursion: bool,
}

impl Command {
    pub async fn run(self, config: crate::config::Config) {
        let resolver = config
            .resolver
            .build()
            .expect("unable to create the resolver");

        let options = ResolveOptions {
            recursion_desired: !self.no_recursion,
        };
        let result = match self.record {
            RecordKind::A => resolver.resolve4(&self.domain, &options).await,
            RecordKind::Aaaa => resolver.resolve6(&self.domain, &options).await,
        };

        match result {
            Ok(answers) if answers.is_empty() => {
                tracing::info!("no matching record for {}", self.domain);
            }
            Ok(answers) => {
                for record in answers {
                    print_record(record);
                }
            }
            Err(error) => {
                tracing::error!("unable to resolve {}: {error}", self.domain);
                std::process::exit(1);
            }
        }
    }
}

fn print_record(record: Record) {
    match record {
        Record::A { domain, addr, ttl } => println!("{domain}\t{ttl}\tA\t{addr}"),
        Record::AAAA { domain, addr, ttl } => println!("{domain}\t{ttl}\tAAAA\t{addr}"),
        Record::CNAME { domain, host, ttl } => println!("{domain}\t{ttl}\tCNAME\t{host}"),
        Record::Unknown {
            domain, qtype, ttl, ..
        } => println!("{domain}\t{ttl}\tTYPE{qtype}\t-"),
    }
}
