//! period-runner: headless analytics runner for one chapter period.
//!
//! Usage:
//!   period-runner --input period.json
//!   period-runner --input period.json --config analytics.json --json
//!   period-runner --input period.json --member "Jane Doe"
//!   period-runner --input period.json --member "Jane Doe" --mock-seed 7

use anyhow::{Context, Result};
use chapter_core::{
    config::AnalyticsConfig,
    engine::{AnalyticsEngine, PeriodAnalysis, PeriodInput},
    error::AnalyticsError,
    matrix::MatrixKind,
    mock::mock_profile,
    payload::{MatrixPayload, MemberAnalyticsPayload},
    quality::DataQualityReport,
    tyfcb::TyfcbSummary,
    warning::DataWarning,
};
use std::env;

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportEnvelope<'a> {
    run_id:             String,
    generated_at:       String,
    chapter_id:         &'a str,
    period:             &'a str,
    referral_matrix:    MatrixPayload,
    one_to_one_matrix:  MatrixPayload,
    combination_matrix: MatrixPayload,
    tyfcb:              &'a TyfcbSummary,
    members:            Vec<MemberAnalyticsPayload>,
    quality:            &'a DataQualityReport,
    warnings:           &'a [DataWarning],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input_path = string_arg(&args, "--input")
        .context("missing --input <period.json>")?;
    let config_path = string_arg(&args, "--config");
    let member = string_arg(&args, "--member");
    let mock_seed = mock_seed_arg(&args)?;
    let json = args.iter().any(|a| a == "--json");

    let config = match config_path {
        Some(path) => AnalyticsConfig::load(path)?,
        None => AnalyticsConfig::default(),
    };

    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("Cannot read {input_path}"))?;
    let input: PeriodInput = serde_json::from_str(&content)
        .with_context(|| format!("Cannot parse {input_path}"))?;

    let engine = AnalyticsEngine::new(config);
    let analysis = match engine.analyze(&input) {
        Ok(analysis) => analysis,
        Err(e) if e.is_no_data() => {
            println!("No data yet for chapter {} ({}).", input.chapter.name, input.period);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match (member, mock_seed) {
        (Some(name), Some(seed)) => print_mock(&analysis, name, seed)?,
        (Some(name), None) => {
            let payload = analysis.member_analytics_by_name(name)?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        (None, _) if json => print_envelope(&analysis)?,
        (None, _) => print_summary(&analysis),
    }

    Ok(())
}

fn print_envelope(analysis: &PeriodAnalysis) -> Result<()> {
    let envelope = ReportEnvelope {
        run_id:             uuid::Uuid::new_v4().to_string(),
        generated_at:       chrono::Utc::now().to_rfc3339(),
        chapter_id:         &analysis.chapter().id,
        period:             &analysis.period,
        referral_matrix:    analysis.matrix_payload(MatrixKind::Referral),
        one_to_one_matrix:  analysis.matrix_payload(MatrixKind::OneToOne),
        combination_matrix: analysis.matrix_payload(MatrixKind::Combination),
        tyfcb:              &analysis.tyfcb,
        members:            analysis.all_member_analytics(),
        quality:            &analysis.quality,
        warnings:           &analysis.warnings,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn print_mock(analysis: &PeriodAnalysis, name: &str, seed: u64) -> Result<()> {
    let index = analysis
        .roster
        .index_of_name(name)
        .ok_or_else(|| AnalyticsError::MemberNotFound { key: name.to_string() })?;
    let member = &analysis.roster.members()[index];
    log::warn!("printing MOCK profile for {}; numbers are placeholders", member.full_name);
    println!("{}", serde_json::to_string_pretty(&mock_profile(member, seed))?);
    Ok(())
}

fn print_summary(analysis: &PeriodAnalysis) {
    let chapter = analysis.chapter();
    let quality = &analysis.quality;

    println!("=== PERIOD SUMMARY ===");
    println!("  chapter:        {} ({})", chapter.name, chapter.id);
    println!("  period:         {}", analysis.period);
    println!("  members:        {}", chapter.members.len());
    println!("  records:        {}", quality.total_records);
    println!("  quality score:  {:.1}%", quality.overall_quality_score);
    println!("  warnings:       {}", analysis.warnings.len());

    println!();
    println!("=== TYFCB ===");
    println!("  within chapter:  {:.2}", analysis.tyfcb.total_within_chapter);
    println!("  outside chapter: {:.2}", analysis.tyfcb.total_outside_chapter);

    println!();
    println!("=== MEMBERS ===");
    for (profile, activity) in analysis.profiles.iter().zip(&analysis.activity) {
        println!(
            "  {:<28} | OTO {:>3}% | Given {:>3}% | Received {:>3}% | Score {:>3}",
            activity.full_name,
            profile.gaps.oto_completion_pct,
            profile.gaps.referral_given_coverage_pct,
            profile.gaps.referral_received_coverage_pct,
            activity.activity_score,
        );
    }

    if !analysis.warnings.is_empty() {
        println!();
        println!("=== DATA WARNINGS ===");
        for warning in &analysis.warnings {
            println!("  {warning}");
        }
    }
}

fn mock_seed_arg(args: &[String]) -> Result<Option<u64>> {
    string_arg(args, "--mock-seed")
        .map(|s| {
            s.parse::<u64>()
                .with_context(|| format!("--mock-seed expects an unsigned integer, got '{s}'"))
        })
        .transpose()
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mock_seed_parses_when_present() {
        let parsed = mock_seed_arg(&args(&["period-runner", "--mock-seed", "7"])).unwrap();
        assert_eq!(parsed, Some(7));
        assert_eq!(mock_seed_arg(&args(&["period-runner"])).unwrap(), None);
    }

    #[test]
    fn malformed_mock_seed_is_an_error() {
        let err = mock_seed_arg(&args(&["period-runner", "--mock-seed", "seven"])).unwrap_err();
        assert!(err.to_string().contains("--mock-seed"));
    }
}
