//! sslcert: Command-line tool for inspecting and monitoring server certificates.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use rayon::prelude::*;
use sslcert_lib::{Certificate, Downloader, DEFAULT_PORT};
use std::io::{Read, Write};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sslcert",
    about = "Fetch and inspect X.509 server certificates",
    long_about = "sslcert reads a certificate from a live TLS endpoint, a PEM/DER file,\n\
                  or stdin, and answers monitoring questions about it: who issued it,\n\
                  which names it covers, and whether it is (still) valid.\n\n\
                  Exit codes: 0 = pass, 1 = check failed, 2 = error.",
    after_help = "EXAMPLES:\n\
                  \n  sslcert show example.com\
                  \n  sslcert show --json https://example.com:8443\
                  \n  sslcert field expires --file cert.pem\
                  \n  sslcert check expiry 30d example.com\
                  \n  sslcert check host www.example.com --file cert.pem\
                  \n  sslcert check valid - --file certs/ --recurse\
                  \n  cat cert.pem | sslcert export"
)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where the certificate comes from.
#[derive(Args, Clone, Debug)]
struct SourceArgs {
    /// Host, IP or URL to fetch the certificate from
    host: Option<String>,
    /// Certificate file (PEM or DER). Reads from stdin if neither HOST nor FILE is given.
    #[arg(short, long, conflicts_with = "host")]
    file: Option<PathBuf>,
    /// Port to connect to when HOST does not name one
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Connect and handshake timeout (e.g. 10s, 1m)
    #[arg(long, value_parser = parse_duration, default_value = "30s")]
    timeout: Duration,
    /// Do not validate the peer's chain
    #[arg(long)]
    no_verify: bool,
    /// Accept a certificate that does not name HOST
    #[arg(long)]
    no_verify_name: bool,
    /// Do not send Server Name Indication
    #[arg(long)]
    no_sni: bool,
    /// Connect to this address instead of resolving HOST
    #[arg(long, value_name = "ADDRESS")]
    ip: Option<IpAddr>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a certificate summary
    #[command(after_help = "EXAMPLES:\n\
                      \n  sslcert show example.com\
                      \n  sslcert show --chain example.com\
                      \n  sslcert show --json --file cert.pem")]
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Show every certificate the host sent, leaf first
        #[arg(long)]
        chain: bool,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Extract a single field from the certificate
    #[command(after_help = "FIELDS:\n\
                      \n  domain               Subject common name\
                      \n  domains              Every covered name (SAN entries and CN)\
                      \n  additional-domains   Subject Alternative Name entries\
                      \n  issuer               Issuer common name\
                      \n  organization         Issuer organization\
                      \n  serial               Serial number (colon-separated hex)\
                      \n  signature-algorithm  Signature algorithm short name\
                      \n  valid-from           Not Before date (ISO 8601)\
                      \n  expires              Not After date (ISO 8601)\
                      \n  days-left            Whole days until expiration\
                      \n  lifespan             Whole days of validity\
                      \n  fingerprint          SHA-1 fingerprint\
                      \n  fingerprint-sha256   SHA-256 fingerprint\
                      \n  public-key           Key algorithm and size\
                      \n  remote-address       Address the certificate was fetched from\
                      \n  hash                 Content hash of the decoded fields")]
    Field {
        /// Field to extract
        field: FieldName,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Check certificate properties (exit code 0 = pass, 1 = fail)
    #[command(after_help = "CHECKS:\n\
                      \n  expiry <DURATION>  Pass if valid now and still valid after DURATION\
                      \n  host <HOSTNAME>    Pass if the certificate covers HOSTNAME (or URL)\
                      \n  contains <DOMAIN>  Pass if DOMAIN is, or is below, a certificate name\
                      \n  valid <HOST|->     Pass if within the validity window and covers HOST\
                      \n                     (`-` checks the validity window only)\
                      \n\nDURATION FORMAT:\n\
                      \n  Plain numbers are treated as seconds. You can also use humantime\
                      \n  notation: s, m/min, h/hr, d/day, w/week, month, y/year.\
                      \n\nEXAMPLES:\n\
                      \n  sslcert check expiry 30d example.com\
                      \n  sslcert check host www.example.com --file cert.pem\
                      \n  sslcert check valid - --file certs/ --failures-only")]
    Check {
        /// Check to perform: expiry, host, contains, valid
        check: CheckType,
        /// Value to check (duration for expiry, hostname for the others)
        value: String,
        #[command(flatten)]
        source: SourceArgs,
        /// Only print failures (directory mode)
        #[arg(long)]
        failures_only: bool,
        /// Recurse into subdirectories (directory mode)
        #[arg(short, long)]
        recurse: bool,
    },
    /// Convert a certificate file between PEM and DER
    #[command(
        after_help = "If --output is given, the format is inferred from its extension\n\
                      (.pem or .der). Otherwise output goes to stdout and --to is required.\n\
                      \nEXAMPLES:\n\
                      \n  sslcert convert --file cert.pem -o cert.der\
                      \n  cat cert.der | sslcert convert --to pem"
    )]
    Convert {
        /// Input certificate file. Reads from stdin if omitted.
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Output file. Format is inferred from extension (.pem or .der).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format: pem, der (required when writing to stdout)
        #[arg(long, value_name = "FORMAT")]
        to: Option<OutputFormat>,
    },
    /// Print the certificate's property bag as JSON
    Export {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum FieldName {
    Domain,
    Domains,
    AdditionalDomains,
    Issuer,
    Organization,
    Serial,
    SignatureAlgorithm,
    ValidFrom,
    Expires,
    DaysLeft,
    Lifespan,
    Fingerprint,
    FingerprintSha256,
    PublicKey,
    RemoteAddress,
    Hash,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum CheckType {
    Expiry,
    Host,
    Contains,
    Valid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Pem,
    Der,
}

/// Maximum file size for certificate inputs (10 MiB).
const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            let meta = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat file: {}", path.display()))?;
            if meta.len() > MAX_INPUT_BYTES {
                anyhow::bail!(
                    "File too large ({} bytes, max {} bytes): {}",
                    meta.len(),
                    MAX_INPUT_BYTES,
                    path.display()
                );
            }
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .take(MAX_INPUT_BYTES)
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

impl SourceArgs {
    fn downloader(&self) -> Downloader {
        let mut downloader = Downloader::new()
            .using_port(self.port)
            .with_timeout(self.timeout)
            .with_verify_peer(!self.no_verify)
            .with_verify_peer_name(!self.no_verify_name)
            .using_sni(!self.no_sni);
        if let Some(ip) = self.ip {
            downloader = downloader.from_ip_address(ip);
        }
        downloader
    }

    fn load(&self) -> Result<Certificate> {
        match &self.host {
            Some(host) => self
                .downloader()
                .for_host(host)
                .with_context(|| format!("Failed to fetch certificate from {}", host)),
            None => {
                let input = read_input(self.file.as_ref())?;
                Certificate::from_bytes(&input).context("Failed to parse certificate")
            }
        }
    }

    fn load_chain(&self) -> Result<Vec<Certificate>> {
        match &self.host {
            Some(host) => self
                .downloader()
                .with_full_chain(true)
                .certificates(host)
                .with_context(|| format!("Failed to fetch certificates from {}", host)),
            None => Ok(vec![self.load()?]),
        }
    }
}

/// Infer output format from a file extension.
fn infer_format(path: &Path) -> Option<OutputFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pem") => Some(OutputFormat::Pem),
        Some(ext) if ext.eq_ignore_ascii_case("der") => Some(OutputFormat::Der),
        _ => None,
    }
}

/// Parse a duration string using humantime format.
///
/// Plain numbers (e.g. "3600") default to seconds. Otherwise, standard
/// humantime units are accepted: `s`, `m`, `h`, `d`, `w`, `months`, `y`, etc.
///
/// Examples: "30", "30s", "5m", "2h30m", "7d", "1w", "30days".
fn parse_duration(s: &str) -> Result<Duration> {
    // Plain integer: seconds
    if s.chars().all(|c| c.is_ascii_digit()) {
        let secs: u64 = s.parse().context("Invalid duration value")?;
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(s).with_context(|| format!("Invalid duration: '{s}'"))
}

/// Check if a path has a certificate file extension (.pem, .der, .crt, .cer).
fn is_cert_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("pem") || ext.eq_ignore_ascii_case("der")
            || ext.eq_ignore_ascii_case("crt") || ext.eq_ignore_ascii_case("cer")
    )
}

/// Find all certificate files (.pem, .der, .crt, .cer) in a directory.
fn find_cert_files(dir: &Path, recurse: bool) -> Vec<PathBuf> {
    let walker = if recurse {
        walkdir::WalkDir::new(dir)
    } else {
        walkdir::WalkDir::new(dir).max_depth(1)
    };
    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_cert_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// A single result from batch processing.
struct BatchResult {
    path: String,
    pass: bool,
    detail: String,
}

/// Process certificate files in parallel, printing `filename: result`.
///
/// Returns the number of failures.
fn run_batch<F>(files: &[PathBuf], failures_only: bool, op: F) -> usize
where
    F: Fn(&Path) -> BatchResult + Sync,
{
    let results: Vec<BatchResult> = files.par_iter().map(|f| op(f)).collect();

    let mut failures = 0;
    for r in &results {
        if !r.pass {
            failures += 1;
        }
        if failures_only && r.pass {
            continue;
        }
        if r.pass {
            println!("{}: {}", r.path, r.detail);
        } else {
            eprintln!("{}: {}", r.path, r.detail);
        }
    }
    failures
}

/// Evaluate one check against a certificate at `now`.
fn run_check(
    cert: &Certificate,
    check: &CheckType,
    value: &str,
    now: OffsetDateTime,
) -> Result<bool> {
    Ok(match check {
        CheckType::Expiry => {
            let duration = parse_duration(value)?;
            let threshold = time::Duration::try_from(duration)
                .ok()
                .and_then(|d| now.checked_add(d))
                .with_context(|| format!("Duration out of range: '{value}'"))?;
            cert.is_valid_until_at(threshold, None, now)
        }
        CheckType::Host => cert.applies_to_host(value),
        CheckType::Contains => cert.contains_domain(value),
        CheckType::Valid => {
            let host = (value != "-").then_some(value);
            cert.is_valid_at(host, now)
        }
    })
}

fn field_value(cert: &Certificate, field: &FieldName, now: OffsetDateTime) -> String {
    match field {
        FieldName::Domain => cert.domain().to_string(),
        FieldName::Domains => cert.domains().join("\n"),
        FieldName::AdditionalDomains => cert.additional_domains().join("\n"),
        FieldName::Issuer => cert.issuer().to_string(),
        FieldName::Organization => cert.organization().to_string(),
        FieldName::Serial => cert.serial_number().to_string(),
        FieldName::SignatureAlgorithm => cert.signature_algorithm().to_string(),
        FieldName::ValidFrom => cert.fields().valid_from.clone(),
        FieldName::Expires => cert.fields().valid_to.clone(),
        FieldName::DaysLeft => cert.days_until_expiration_at(now).to_string(),
        FieldName::Lifespan => cert.lifespan_in_days().to_string(),
        FieldName::Fingerprint => cert.fingerprint().to_string(),
        FieldName::FingerprintSha256 => cert.fingerprint_sha256().to_string(),
        FieldName::PublicKey => match cert.public_key_size() {
            0 => cert.public_key_algorithm().to_string(),
            bits => format!("{} {}", cert.public_key_algorithm(), bits),
        },
        FieldName::RemoteAddress => cert.remote_address().to_string(),
        FieldName::Hash => cert.hash(),
    }
}

/// Filter directive: a non-empty RUST_LOG wins over `-v`.
fn log_directive(verbose: u8, env: Option<String>) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
        .to_string(),
    }
}

fn init_tracing(verbose: u8) {
    let directive = log_directive(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let now = OffsetDateTime::now_utc();

    match &cli.command {
        Commands::Show {
            json,
            chain,
            source,
        } => {
            let certs = if *chain {
                source.load_chain()?
            } else {
                vec![source.load()?]
            };
            for (depth, cert) in certs.iter().enumerate() {
                if *json {
                    println!("{}", sslcert_lib::to_json(cert, now)?);
                } else {
                    if certs.len() > 1 {
                        println!("depth {}:", depth);
                    }
                    print!("{}", sslcert_lib::display_text(cert, now));
                }
            }
        }
        Commands::Field { field, source } => {
            let cert = source.load()?;
            println!("{}", field_value(&cert, field, now));
        }
        Commands::Check {
            check,
            value,
            source,
            failures_only,
            recurse,
        } => {
            // Directory mode: process all cert files in parallel
            if let Some(path) = source.file.as_ref().filter(|p| p.is_dir()) {
                let files = find_cert_files(path, *recurse);
                if files.is_empty() {
                    anyhow::bail!(
                        "No certificate files (.pem, .der, .crt, .cer) found in {}",
                        path.display()
                    );
                }
                if matches!(check, CheckType::Expiry) {
                    parse_duration(value)?;
                }
                let failures = run_batch(&files, *failures_only, |f| {
                    let label = f.display().to_string();
                    let outcome = Certificate::from_file(f)
                        .map_err(anyhow::Error::from)
                        .and_then(|cert| run_check(&cert, check, value, now));
                    match outcome {
                        Ok(pass) => BatchResult {
                            path: label,
                            pass,
                            detail: if pass { "PASS" } else { "FAIL" }.to_string(),
                        },
                        Err(e) => BatchResult {
                            path: label,
                            pass: false,
                            detail: format!("FAIL ({:#})", e),
                        },
                    }
                });
                tracing::debug!(files = files.len(), failures, "batch check finished");
                return Ok(if failures > 0 {
                    ExitCode::from(1)
                } else {
                    ExitCode::SUCCESS
                });
            }

            let cert = source.load()?;
            if !run_check(&cert, check, value, now)? {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Convert { file, output, to } => {
            let input = read_input(file.as_ref())?;

            // Explicit --to wins, then the output file extension.
            let format = match (to, output) {
                (Some(fmt), _) => *fmt,
                (None, Some(out_path)) => infer_format(out_path).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Cannot infer output format from '{}'. Use .pem/.der extension or --to.",
                        out_path.display()
                    )
                })?,
                (None, None) => anyhow::bail!(
                    "Output format required: use --to pem|der, or provide an output file with .pem/.der extension"
                ),
            };

            let der = if sslcert_lib::is_pem(&input) {
                sslcert_lib::pem_to_der(&input)?
            } else {
                input
            };
            // Reject garbage before writing anything.
            Certificate::from_bytes(&der).context("Input is not a certificate")?;

            let output_bytes = match format {
                OutputFormat::Der => der,
                OutputFormat::Pem => sslcert_lib::der_to_pem(&der).into_bytes(),
            };

            match output {
                Some(out_path) => std::fs::write(out_path, &output_bytes)
                    .with_context(|| format!("Failed to write {}", out_path.display()))?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&output_bytes)?;
                    stdout.flush()?;
                }
            }
        }
        Commands::Export { source } => {
            let cert = source.load()?;
            println!("{}", cert.to_properties().to_json()?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn certs_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/certs")
    }

    fn load(name: &str) -> Certificate {
        Certificate::from_file(certs_dir().join(name)).unwrap()
    }

    fn at(ts: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(ts).unwrap()
    }

    // ---- Log filter ----

    #[test]
    fn log_directive_from_verbosity() {
        assert_eq!(log_directive(0, None), "warn");
        assert_eq!(log_directive(1, None), "debug");
        assert_eq!(log_directive(3, None), "trace");
        assert_eq!(log_directive(2, Some("  ".into())), "trace");
    }

    #[test]
    fn rust_log_overrides_verbosity() {
        assert_eq!(
            log_directive(2, Some("sslcert_lib=info".into())),
            "sslcert_lib=info"
        );
        assert_eq!(log_directive(0, Some("debug".into())), "debug");
    }

    // ---- Positive cases: valid duration strings ----

    #[test]
    fn parse_plain_seconds() {
        assert_eq!(parse_duration("3600").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn parse_plain_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::from_secs(0));
    }

    #[test]
    fn parse_days() {
        assert_eq!(parse_duration("7d").unwrap(), Duration::from_secs(604800));
    }

    #[test]
    fn parse_weeks() {
        assert_eq!(
            parse_duration("1w").unwrap(),
            Duration::from_secs(7 * 86400)
        );
    }

    #[test]
    fn parse_combined_hours_minutes() {
        assert_eq!(
            parse_duration("2h30m").unwrap(),
            Duration::from_secs(2 * 3600 + 30 * 60)
        );
    }

    #[test]
    fn parse_with_spaces() {
        assert_eq!(parse_duration("1h 30m").unwrap(), Duration::from_secs(5400));
    }

    // ---- Negative cases: invalid duration strings ----

    #[test]
    fn reject_empty_string() {
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn reject_negative_number() {
        assert!(parse_duration("-30").is_err());
    }

    #[test]
    fn reject_unknown_unit() {
        assert!(parse_duration("30x").is_err());
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_duration("abc").is_err());
    }

    // ---- is_cert_file tests ----

    #[test]
    fn is_cert_file_accepts_known_extensions() {
        assert!(is_cert_file(Path::new("cert.pem")));
        assert!(is_cert_file(Path::new("cert.der")));
        assert!(is_cert_file(Path::new("cert.crt")));
        assert!(is_cert_file(Path::new("cert.cer")));
        assert!(is_cert_file(Path::new("cert.PEM")));
    }

    #[test]
    fn is_cert_file_rejects_non_cert() {
        assert!(!is_cert_file(Path::new("cert.txt")));
        assert!(!is_cert_file(Path::new("cert.key")));
        assert!(!is_cert_file(Path::new("cert")));
    }

    #[test]
    fn infer_format_from_extension() {
        assert_eq!(infer_format(Path::new("out.PEM")), Some(OutputFormat::Pem));
        assert_eq!(infer_format(Path::new("out.der")), Some(OutputFormat::Der));
        assert_eq!(infer_format(Path::new("out.crt")), None);
    }

    // ---- find_cert_files tests ----

    #[test]
    fn find_cert_files_finds_fixtures_sorted() {
        let files = find_cert_files(&certs_dir(), false);
        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["ca.pem", "example.der", "example.pem", "precert.pem", "wildcard.pem"]
        );
    }

    #[test]
    fn find_cert_files_empty_dir() {
        let tmp = std::env::temp_dir().join("sslcert_test_empty_dir");
        let _ = std::fs::create_dir(&tmp);
        let files = find_cert_files(&tmp, false);
        assert!(files.is_empty(), "empty dir should return no files");
        let _ = std::fs::remove_dir(&tmp);
    }

    // ---- run_check tests ----

    #[test]
    fn check_expiry_threshold() {
        let cert = load("example.pem");
        // 2025-06-01; expires 2026-01-01
        let now = at(1748736000);
        assert!(run_check(&cert, &CheckType::Expiry, "30d", now).unwrap());
        assert!(!run_check(&cert, &CheckType::Expiry, "365d", now).unwrap());
        assert!(run_check(&cert, &CheckType::Expiry, "bogus", now).is_err());
    }

    #[test]
    fn check_host_and_contains() {
        let cert = load("wildcard.pem");
        let now = at(1743465600);
        assert!(run_check(&cert, &CheckType::Host, "www.example.com", now).unwrap());
        assert!(!run_check(&cert, &CheckType::Host, "a.b.example.com", now).unwrap());
        assert!(run_check(&cert, &CheckType::Contains, "example.com", now).unwrap());
    }

    #[test]
    fn check_valid_with_and_without_host() {
        let cert = load("example.pem");
        let inside = at(1748736000);
        let after = at(1767225601);
        assert!(run_check(&cert, &CheckType::Valid, "-", inside).unwrap());
        assert!(run_check(&cert, &CheckType::Valid, "example.com", inside).unwrap());
        assert!(!run_check(&cert, &CheckType::Valid, "other.com", inside).unwrap());
        assert!(!run_check(&cert, &CheckType::Valid, "-", after).unwrap());
    }

    #[test]
    fn field_values() {
        let cert = load("example.pem");
        let now = at(1735689600);
        assert_eq!(field_value(&cert, &FieldName::Domain, now), "example.com");
        assert_eq!(field_value(&cert, &FieldName::Issuer, now), "ca.test");
        assert_eq!(field_value(&cert, &FieldName::PublicKey, now), "RSA 2048");
        assert_eq!(field_value(&cert, &FieldName::Lifespan, now), "365");
        assert_eq!(field_value(&cert, &FieldName::DaysLeft, now), "365");
        assert_eq!(
            field_value(&cert, &FieldName::Expires, now),
            "2026-01-01T00:00:00Z"
        );
    }

    #[test]
    fn cli_source_arguments() {
        let cli = Cli::try_parse_from([
            "sslcert", "check", "host", "www.example.com", "example.com", "--port", "8443",
            "--timeout", "5s", "--no-verify",
        ])
        .unwrap();
        let Commands::Check { source, .. } = cli.command else {
            unreachable!("parsed a check command");
        };
        assert_eq!(source.host.as_deref(), Some("example.com"));
        assert_eq!(source.port, 8443);
        assert_eq!(source.timeout, Duration::from_secs(5));
        assert!(source.no_verify);
        assert!(!source.no_sni);
    }

    #[test]
    fn cli_rejects_host_with_file() {
        assert!(Cli::try_parse_from(["sslcert", "show", "example.com", "--file", "x.pem"]).is_err());
    }
}
