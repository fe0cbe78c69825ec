use clap::{Parser, Subcommand};
use clusterspec::{ClusterSpec, ParseOptions, Result, load_file, to_spec_string};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clusterspec")]
#[command(about = "Cluster spec parser and validator", long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args)]
struct SpecArgs {
    /// Path to the spec file.
    spec: String,

    /// Reject unknown section names.
    #[arg(long)]
    strict: bool,

    /// Allowed service tag (repeatable). Any tag is accepted when none are given.
    #[arg(long = "service", value_name = "TAG")]
    services: Vec<String>,

    /// Allow the stock Couchbase service tags.
    #[arg(long)]
    default_services: bool,
}

impl SpecArgs {
    fn options(&self) -> ParseOptions {
        let mut options = ParseOptions::default().with_services(self.services.iter().cloned());
        if self.strict {
            options = options.strict();
        }
        if self.default_services {
            options = options.with_default_services();
        }
        options
    }

    fn load(&self) -> Result<ClusterSpec> {
        load_file(&self.spec, &self.options())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a spec file and print a one-line summary.
    Check(SpecArgs),
    /// Print the parsed spec as JSON.
    Show(SpecArgs),
    /// Print the spec in canonical text form.
    Fmt(SpecArgs),
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.cmd {
        Commands::Check(args) => {
            let spec = args.load()?;
            println!(
                "{}: ok ({} clusters, {} servers, {} clients)",
                args.spec,
                spec.clusters().len(),
                spec.servers().count(),
                spec.client_hosts().len()
            );
        }
        Commands::Show(args) => {
            let spec = args.load()?;
            println!("{}", serde_json::to_string_pretty(&spec)?);
        }
        Commands::Fmt(args) => {
            let spec = args.load()?;
            print!("{}", to_spec_string(&spec));
        }
    }

    Ok(())
}
