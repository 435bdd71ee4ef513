use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

use vlsmcalc::ip::{allocate, AddressSpace, AllocationOrder, AllocationSummary};
use vlsmcalc::report::{log_summary, write_json_report, write_text_report, AllocationReport};
use vlsmcalc::request_loader::load_requests;
use vlsmcalc::VlsmError;

/// Output format for the allocation report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `<name> <size> <cidr>` line per subnet
    Text,
    /// A JSON document with the base network, utilization and subnets
    Json,
}

/// Variable Length Subnet Masking calculator for IPv4 networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base network in CIDR notation, e.g. 10.0.0.0/16
    base_cidr: String,

    /// Path to the request list (`<name> <count>` per line, or a YAML list)
    requests_file: PathBuf,

    /// Allocation order: `asc` fills from the network address upwards,
    /// `desc` from the top of the network downwards
    order: String,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments; usage errors exit with status 1 like every other failure
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => return Err(VlsmError::Usage(e.render().to_string()).into()),
    };

    // Logging stays quiet by default so stdout can be piped
    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    // Render into a buffer so a failure never leaves partial output on stdout
    let mut buffer = Vec::new();
    run(&args, &mut buffer)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(&buffer).wrap_err("Failed to write report to stdout")?;
    handle.flush().wrap_err("Failed to flush stdout")?;
    Ok(())
}

/// Run one allocation and write the report to `out`
fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let order: AllocationOrder = args.order.parse()?;

    let space = AddressSpace::parse(&args.base_cidr)
        .wrap_err_with(|| format!("Failed to parse base network '{}'", args.base_cidr))?;
    info!("Base network: {} ({} addresses)", space, space.capacity());

    let requests = load_requests(&args.requests_file)
        .wrap_err_with(|| format!("Failed to load requests from {}", args.requests_file.display()))?;

    let allocations = allocate(&space, requests, order)
        .wrap_err_with(|| format!("Failed to allocate subnets in {}", space))?;

    log_summary(&space, &AllocationSummary::new(&space, &allocations));

    match args.format {
        OutputFormat::Text => write_text_report(out, &allocations)?,
        OutputFormat::Json => {
            let report = AllocationReport::new(&space, order, &allocations);
            write_json_report(out, &report)?
        }
    }

    info!("Allocation completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn request_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(&["vlsmcalc", "10.0.0.0/16", "requests.txt", "asc"]);

        assert_eq!(args.base_cidr, "10.0.0.0/16");
        assert_eq!(args.requests_file, PathBuf::from("requests.txt"));
        assert_eq!(args.order, "asc");
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_cli_options() {
        let args = Args::parse_from(&["vlsmcalc", "-vv", "--format", "json", "10.0.0.0/16", "r.yaml", "desc"]);

        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_wrong_argument_count() {
        assert!(Args::try_parse_from(&["vlsmcalc", "10.0.0.0/16", "requests.txt"]).is_err());
        assert!(Args::try_parse_from(&["vlsmcalc", "10.0.0.0/16", "r.txt", "asc", "extra"]).is_err());
    }

    #[test]
    fn test_run_writes_text_report() {
        let file = request_file("A 50\nB 10\n");
        let args = Args::parse_from(&[
            "vlsmcalc",
            "192.168.0.0/24",
            file.path().to_str().unwrap(),
            "asc",
        ]);

        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "A 64 192.168.0.0/26\nB 16 192.168.0.64/28\n"
        );
    }

    #[test]
    fn test_run_rejects_bad_order_without_output() {
        let file = request_file("A 50\n");
        let args = Args::parse_from(&[
            "vlsmcalc",
            "192.168.0.0/24",
            file.path().to_str().unwrap(),
            "sideways",
        ]);

        let mut out = Vec::new();
        let err = run(&args, &mut out).unwrap_err();
        assert!(matches!(err.downcast_ref::<VlsmError>(), Some(VlsmError::InvalidOrder(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_insufficient_space_without_output() {
        let file = request_file("Z 10\n");
        let args = Args::parse_from(&[
            "vlsmcalc",
            "10.0.0.0/30",
            file.path().to_str().unwrap(),
            "asc",
        ]);

        let mut out = Vec::new();
        let err = run(&args, &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VlsmError>(),
            Some(VlsmError::InsufficientSpace { .. })
        ));
        assert!(out.is_empty());
    }
}
