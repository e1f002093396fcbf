use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

use expfile::topology::{DEFAULT_HOST, DEFAULT_MASTER_PORT, DEFAULT_PS_PORT, DEFAULT_WORKER_PORT};
use expfile::{Framework, LocalPorts, RawSpec, Resources, Specification, TaskType, TopologyDescriptor};

#[derive(Parser)]
#[command(name = "expfile")]
#[command(about = "Experiment specification resolver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a specification document into cluster and resource descriptors.
    Resolve {
        /// Path to the validated specification document (JSON).
        #[arg(long)]
        spec: String,

        /// Experiment identifier attached to the resolution.
        #[arg(long, default_value = "default")]
        experiment: String,

        /// Synthesize local host:port topology as well.
        #[arg(long)]
        local: bool,

        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        #[arg(long, default_value_t = DEFAULT_MASTER_PORT)]
        master_port: u16,

        #[arg(long, default_value_t = DEFAULT_WORKER_PORT)]
        worker_port: u16,

        #[arg(long, default_value_t = DEFAULT_PS_PORT)]
        ps_port: u16,

        /// Write the resolution here instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

/// What a downstream manifest generator consumes, in one JSON document.
#[derive(Serialize)]
struct Resolution<'a> {
    experiment: &'a str,
    project: Option<&'a str>,
    runnable: bool,
    framework: Option<Framework>,
    distributed: bool,
    cluster: &'a BTreeMap<TaskType, u32>,
    total_resources: Option<&'a Resources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topology: Option<TopologyDescriptor>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Resolve {
            spec,
            experiment,
            local,
            host,
            master_port,
            worker_port,
            ps_port,
            out,
        } => {
            // 1) Read + parse the document (the upstream validator's output).
            let text = std::fs::read_to_string(&spec)
                .with_context(|| format!("read spec file {}", spec))?;
            let raw: RawSpec = serde_json::from_str(&text)
                .with_context(|| format!("parse spec file {}", spec))?;

            // 2) Validate into a Specification.
            let specification = Specification::read(raw, experiment)?;

            // 3) Resolve cluster, resources and (optionally) local topology.
            let topology = local.then(|| {
                specification.local_topology(&LocalPorts {
                    host,
                    master_port,
                    worker_port,
                    ps_port,
                })
            });

            let cluster = specification.cluster_def();
            let resolution = Resolution {
                experiment: specification.experiment(),
                project: specification.project_name(),
                runnable: specification.is_runnable(),
                framework: specification.framework(),
                distributed: cluster.is_distributed(),
                cluster: cluster.counts(),
                total_resources: specification.total_resources(),
                topology,
            };

            // 4) Emit JSON.
            let json = serde_json::to_string_pretty(&resolution)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Wrote {}", path);
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

/// Installs a basic tracing subscriber honouring `RUST_LOG`, falling back to
/// `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
