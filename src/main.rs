//! IAMGuardian CLI - scan cloud IAM, store findings, report on risk

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use iamguardian::analyzer::{
    compute_compliance_score, compute_stats, get_high_priority_findings,
};
use iamguardian::models::{Cloud, Severity};
use iamguardian::report;
use iamguardian::scanner::{AwsScanner, AzureScanner, GcpScanner, Scanner};
use iamguardian::storage::{LocalStorage, Storage};

/// IAMGuardian - multi-cloud IAM audit and remediation tracking
#[derive(Parser)]
#[command(
    name = "iamguardian",
    version,
    about = "Audit cloud IAM configurations and track remediation",
    long_about = "IAMGuardian scans cloud identity-and-access-management configurations\n\
                  for security weaknesses, stores the findings locally, and scores them\n\
                  against ISO 27001, NIST CSF and SOC 2."
)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(short, long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Path to the findings store
    #[arg(long, default_value = "./data/findings.json", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Cloud provider selector for CLI arguments
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CloudArg {
    Aws,
    Azure,
    Gcp,
}

impl From<CloudArg> for Cloud {
    fn from(cloud: CloudArg) -> Self {
        match cloud {
            CloudArg::Aws => Cloud::Aws,
            CloudArg::Azure => Cloud::Azure,
            CloudArg::Gcp => Cloud::Gcp,
        }
    }
}

/// Severity selector for CLI arguments
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum SeverityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<SeverityArg> for Severity {
    fn from(severity: SeverityArg) -> Self {
        match severity {
            SeverityArg::Low => Severity::Low,
            SeverityArg::Medium => Severity::Medium,
            SeverityArg::High => Severity::High,
            SeverityArg::Critical => Severity::Critical,
        }
    }
}

/// Compliance framework selector; unknown names are rejected here so the
/// analyzer's lenient handling is never reachable from the CLI
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum FrameworkArg {
    Iso27001,
    NistCsf,
    Soc2,
}

impl FrameworkArg {
    fn as_str(&self) -> &'static str {
        match self {
            FrameworkArg::Iso27001 => "iso27001",
            FrameworkArg::NistCsf => "nist_csf",
            FrameworkArg::Soc2 => "soc2",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run an IAM scan for one cloud provider
    Scan {
        /// Provider to scan
        #[arg(value_enum)]
        cloud: CloudArg,

        /// Use simulated data (no cloud credentials needed)
        #[arg(long)]
        mock: bool,

        /// Save the findings to the store after scanning
        #[arg(long)]
        save: bool,
    },

    /// List stored findings
    List {
        /// Only findings from this cloud
        #[arg(long)]
        cloud: Option<CloudArg>,

        /// Only findings with exactly this severity
        #[arg(long)]
        severity: Option<SeverityArg>,
    },

    /// Aggregate statistics over the stored findings
    Stats,

    /// Compliance score for one framework
    Compliance {
        /// Framework to score against
        #[arg(value_enum)]
        framework: FrameworkArg,
    },

    /// Unremediated high and critical findings
    Priority,

    /// Mark a stored finding as remediated
    Remediate {
        /// Id of the finding to mark
        finding_id: String,
    },
}

fn init_logging(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbosity {
            0 => EnvFilter::new("iamguardian=info"),
            1 => EnvFilter::new("iamguardian=debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let storage = LocalStorage::open(&cli.store)?;
    debug!("using findings store at {}", storage.path().display());

    match cli.command {
        Commands::Scan { cloud, mock, save } => run_scan(&storage, cloud, mock, save, cli.format)?,
        Commands::List { cloud, severity } => run_list(&storage, cloud, severity, cli.format)?,
        Commands::Stats => run_stats(&storage, cli.format)?,
        Commands::Compliance { framework } => run_compliance(&storage, framework, cli.format)?,
        Commands::Priority => run_priority(&storage, cli.format)?,
        Commands::Remediate { finding_id } => run_remediate(&storage, &finding_id)?,
    }

    Ok(())
}

fn run_scan(
    storage: &LocalStorage,
    cloud: CloudArg,
    mock: bool,
    save: bool,
    format: OutputFormat,
) -> Result<()> {
    let scanner: Box<dyn Scanner> = match cloud {
        CloudArg::Aws => Box::new(AwsScanner::new(mock)),
        CloudArg::Azure => Box::new(AzureScanner::new()),
        CloudArg::Gcp => Box::new(GcpScanner::new()),
    };

    info!("starting {} IAM scan", scanner.cloud_name());
    let findings = scanner.scan()?;
    info!("scan finished: {} findings", findings.len());

    match format {
        OutputFormat::Text => {
            println!(
                "{} {} findings on {}",
                "Scan complete:".bold(),
                findings.len(),
                scanner.cloud_name()
            );
            println!();
            report::print_findings(&findings);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&findings)?),
    }

    if save {
        storage.save_findings(findings)?;
        println!(
            "Saved to {} ({} findings total)",
            storage.path().display(),
            storage.count()?
        );
    }

    Ok(())
}

fn run_list(
    storage: &LocalStorage,
    cloud: Option<CloudArg>,
    severity: Option<SeverityArg>,
    format: OutputFormat,
) -> Result<()> {
    let mut findings = storage.get_all_findings()?;
    if let Some(cloud) = cloud {
        let cloud = Cloud::from(cloud);
        findings.retain(|f| f.cloud == cloud);
    }
    if let Some(severity) = severity {
        let severity = Severity::from(severity);
        findings.retain(|f| f.severity == severity);
    }

    match format {
        OutputFormat::Text => report::print_findings(&findings),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&findings)?),
    }
    Ok(())
}

fn run_stats(storage: &LocalStorage, format: OutputFormat) -> Result<()> {
    let stats = compute_stats(&storage.get_all_findings()?);
    match format {
        OutputFormat::Text => stats.print_text(),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

fn run_compliance(
    storage: &LocalStorage,
    framework: FrameworkArg,
    format: OutputFormat,
) -> Result<()> {
    let findings = storage.get_all_findings()?;
    let report = compute_compliance_score(&findings, framework.as_str());
    match format {
        OutputFormat::Text => report.print_text(),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_priority(storage: &LocalStorage, format: OutputFormat) -> Result<()> {
    let priority = get_high_priority_findings(&storage.get_all_findings()?);
    match format {
        OutputFormat::Text => {
            println!("{}", "High-priority findings (unremediated high/critical)".bold());
            println!();
            report::print_findings(&priority);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&priority)?),
    }
    Ok(())
}

fn run_remediate(storage: &LocalStorage, finding_id: &str) -> Result<()> {
    if storage.mark_as_remediated(finding_id)? {
        println!("{} {}", "Remediated:".green().bold(), finding_id);
    } else {
        println!("{} no finding with id '{}'", "Not found:".yellow(), finding_id);
    }
    Ok(())
}
