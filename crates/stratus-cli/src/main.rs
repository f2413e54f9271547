use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use stratus_cloud::{
    CloudError, Instance, InstanceLifecycle, InstanceSpec, Reconciler, Resolver,
};
use stratus_cloudstack::CloudstackApi;

#[derive(Parser)]
#[command(name = "stratus")]
#[command(about = "Reconcile CloudStack virtual machines against a declared spec", version)]
struct Cli {
    /// cmk profile to use (defaults to the active cmk configuration)
    #[arg(long, global = true, env = "STRATUS_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an instance from zone/template/offering names
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        zone: String,
        #[arg(long)]
        template: String,
        #[arg(long = "offering")]
        service_offering: String,
    },
    /// Show the current remote state of an instance
    Read { id: String },
    /// Rename an instance and show the refreshed state
    Rename { id: String, new_name: String },
    /// List instances, optionally narrowed by a name filter
    List { filter: Option<String> },
    /// Delete an instance (unsupported by the management core)
    Delete { id: String },
    /// Resolve a name to its API id
    Resolve { kind: LookupKind, name: String },
    /// Check that cmk is installed and the credentials work
    AuthStatus,
}

#[derive(Clone, Copy, ValueEnum)]
enum LookupKind {
    Zone,
    Template,
    Offering,
}

fn print_instance(instance: &Instance) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(instance)?);
    Ok(())
}

fn unwrap_or_report<T>(result: Result<T, CloudError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            let diag = err.diagnostic();
            eprintln!("{} {}", "✗".red().bold(), diag.title.red().bold());
            eprintln!("  {}", diag.detail);
            std::process::exit(1);
        }
    }
}

/// Prior state as the CLI knows it: just the identifier. The full
/// record lives with whatever is orchestrating this binary.
fn prior(id: String) -> Instance {
    Instance {
        id,
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let api = CloudstackApi::new(cli.profile);

    match cli.command {
        Commands::Create {
            name,
            zone,
            template,
            service_offering,
        } => {
            let desired = InstanceSpec::new(name, zone, template, service_offering);
            let observed = unwrap_or_report(Reconciler::new(&api).create(&desired).await);
            println!("{} instance created: {}", "✓".green().bold(), observed.id.cyan());
            print_instance(&observed)?;
        }
        Commands::Read { id } => {
            let observed = unwrap_or_report(Reconciler::new(&api).read(&prior(id)).await);
            print_instance(&observed)?;
        }
        Commands::Rename { id, new_name } => {
            let desired = InstanceSpec {
                name: new_name,
                ..Default::default()
            };
            let observed = unwrap_or_report(
                Reconciler::new(&api).update(&prior(id), &desired).await,
            );
            println!("{} instance renamed", "✓".green().bold());
            print_instance(&observed)?;
        }
        Commands::List { filter } => {
            let instances = unwrap_or_report(
                InstanceLifecycle::new(&api)
                    .list_instances(filter.as_deref())
                    .await,
            );

            if instances.is_empty() {
                println!("no instances found");
            }
            for vm in instances {
                let state = vm.state.unwrap_or_else(|| "Unknown".to_string());
                let state = if state == "Running" {
                    state.green()
                } else {
                    state.yellow()
                };
                println!("{}  {}  {}  {}", vm.id, vm.name.cyan(), state, vm.zone_name);
            }
        }
        Commands::Delete { id } => {
            unwrap_or_report(Reconciler::new(&api).delete(&prior(id)).await);
        }
        Commands::Resolve { kind, name } => {
            let resolver = Resolver::new(&api);
            let id = match kind {
                LookupKind::Zone => resolver.resolve_zone(&name).await,
                LookupKind::Template => resolver.resolve_template(&name).await,
                LookupKind::Offering => resolver.resolve_service_offering(&name).await,
            };
            let id = unwrap_or_report(id);
            println!("{id}");
        }
        Commands::AuthStatus => match api.check_auth().await {
            Ok(()) => println!("{} cmk is installed and authenticated", "✓".green().bold()),
            Err(e) => {
                eprintln!("{} {}", "✗".red().bold(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
