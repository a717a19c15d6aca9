use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cleanslate::config::{AppConfig, OutputFormat};
use cleanslate::error::AppError;
use cleanslate::report::write_petitions_to_path;
use cleanslate::{telemetry, Analysis, AnalysisSummary, CRecord};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "cleanslate-screener",
    about = "Explain which parts of a Pennsylvania criminal record can be expunged or sealed",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every petition rule and explain each verdict
    Analyze(AnalyzeArgs),
    /// Print a short screening summary
    Summary(RecordArgs),
}

#[derive(Args, Debug)]
struct RecordArgs {
    /// Criminal record JSON file
    #[arg(long)]
    record: PathBuf,
    /// Evaluation date (YYYY-MM-DD, defaults to CLEANSLATE_AS_OF or today)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    record: RecordArgs,
    /// Output format (defaults to CLEANSLATE_OUTPUT or text)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Also write one CSV row per petitioned charge to this path
    #[arg(long)]
    petitions_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "cleanslate screener starting");

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Summary(args) => run_summary(args, &config),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Flag, then configuration, then the local date.
fn resolve_as_of(flag: Option<NaiveDate>, config: &AppConfig) -> NaiveDate {
    flag.or(config.screening.as_of)
        .unwrap_or_else(|| Local::now().date_naive())
}

fn load_analysis(args: &RecordArgs, config: &AppConfig) -> Result<Analysis, AppError> {
    let record = CRecord::from_path(&args.record)?;
    let as_of = resolve_as_of(args.as_of, config);
    Ok(Analysis::standard(record, as_of))
}

fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<(), AppError> {
    let analysis = load_analysis(&args.record, config)?;
    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.screening.output);

    match format {
        OutputFormat::Text => print!("{}", render_analysis(&analysis)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }

    if let Some(path) = args.petitions_csv {
        let rows = write_petitions_to_path(&path, analysis.petitions())?;
        info!(rows, path = %path.display(), "wrote petitions CSV");
    }
    Ok(())
}

fn run_summary(args: RecordArgs, config: &AppConfig) -> Result<(), AppError> {
    let analysis = load_analysis(&args, config)?;
    print!("{}", render_summary(&analysis.summary()));
    Ok(())
}

fn render_analysis(analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Record screening for {} (evaluated {})",
        analysis.record.person.full_name(),
        analysis.as_of
    );

    let petitions: Vec<_> = analysis.petitions().collect();
    if petitions.is_empty() {
        let _ = writeln!(out, "\nRecommended petitions: none");
    } else {
        let _ = writeln!(out, "\nRecommended petitions");
        for petition in petitions {
            let detail = match (petition.expungement_type(), petition.procedure()) {
                (Some(kind), Some(procedure)) => {
                    format!("{} ({})", kind.label(), procedure.label())
                }
                _ => petition.kind_label().to_string(),
            };
            for case in petition.cases() {
                let _ = writeln!(
                    out,
                    "- {detail}: {} ({}), {} charge(s)",
                    case.docket_number,
                    case.county,
                    case.charges.len()
                );
            }
        }
    }

    let _ = writeln!(out, "\nReasoning");
    out.push_str(&analysis.explain());

    let remaining: Vec<_> = analysis.remaining_record.charges().collect();
    if remaining.is_empty() {
        let _ = writeln!(out, "\nCharges not addressed: none");
    } else {
        let _ = writeln!(out, "\nCharges not addressed");
        for (case, charge) in remaining {
            let _ = writeln!(
                out,
                "- {} | {} | {} | {}",
                case.docket_number, charge.offense, charge.grade, charge.disposition
            );
        }
    }
    out
}

fn render_summary(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Screening summary for {} (evaluated {})",
        summary.client, summary.as_of
    );
    let counties: Vec<&str> = summary.counties.iter().map(String::as_str).collect();
    let _ = writeln!(out, "Counties: {}", counties.join(", "));
    let _ = writeln!(
        out,
        "Petitions: {} covering {} case(s) and {} charge(s); {} charge(s) remain",
        summary.petition_count,
        summary.cases_cleared,
        summary.charges_cleared,
        summary.remaining_charges
    );

    if !summary.sealable_but_for_fines.is_empty() {
        let _ = writeln!(out, "\nSealable once fines and costs are paid");
        for blocked in &summary.sealable_but_for_fines {
            let _ = writeln!(
                out,
                "- {}: {} (owed {:.2})",
                blocked.docket_number, blocked.offense, blocked.fines_owed
            );
        }
    }

    if !summary.waiting_period_notes.is_empty() {
        let _ = writeln!(out, "\nSealable after a waiting period");
        for note in &summary.waiting_period_notes {
            let _ = writeln!(out, "- {}: {}", note.docket_number, note.explanation);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanslate::crecord::{Case, Charge, Person};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid as-of date")
    }

    fn sample_analysis() -> Analysis {
        let record = CRecord::with_cases(
            Person::new("Jane", "Doe"),
            vec![Case::new("CP-51-CR-0000001-2015", "Philadelphia")
                .with_charge(Charge::new("Theft", "M1", "18 § 3921", "Guilty Plea"))
                .with_charge(Charge::new("Receiving", "M1", "18 § 3925", "Not Guilty"))],
        );
        Analysis::standard(record, as_of())
    }

    #[test]
    fn parses_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "cleanslate-screener",
            "analyze",
            "--record",
            "record.json",
            "--as-of",
            "2024-06-01",
            "--format",
            "json",
        ])
        .expect("arguments parse");

        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.record.as_of, Some(as_of()));
                assert_eq!(args.format, Some(FormatArg::Json));
                assert!(args.petitions_csv.is_none());
            }
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("06/01/2024").is_err());
        assert_eq!(parse_date(" 2024-06-01 "), Ok(as_of()));
    }

    #[test]
    fn text_rendering_lists_petitions_and_leftovers() {
        let text = render_analysis(&sample_analysis());
        assert!(text.contains("Record screening for Jane Doe (evaluated 2024-06-01)"));
        assert!(text.contains(
            "- Partial Expungement (§ 790): CP-51-CR-0000001-2015 (Philadelphia), 1 charge(s)"
        ));
        assert!(text.contains("- Expungements for nonconvictions. [1 petition(s)]"));
        assert!(text.contains("- CP-51-CR-0000001-2015 | Theft | M1 | Guilty Plea"));
    }

    #[test]
    fn summary_rendering_reports_counts() {
        let text = render_summary(&sample_analysis().summary());
        assert!(text.contains("Counties: philadelphia"));
        assert!(text.contains("Petitions: 1 covering 1 case(s) and 1 charge(s); 1 charge(s) remain"));
    }
}
