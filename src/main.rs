// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use workalign::utils::logging::{
    format_error, format_info, format_recommendation, format_score, format_step, format_success, format_warning,
};
use workalign::{
    AnalysisEngine, AnalysisResponse, AnalysisResult, BatchItem, BatchStats, Config, FileScanner, JsonExporter,
    ProgressTracker, Validator,
};

#[derive(Parser)]
#[command(name = "workalign")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Resume to job description skill matching and gap analysis", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one resume against one job description
    Analyze {
        #[arg(long, value_name = "FILE")]
        resume: PathBuf,

        #[arg(long, value_name = "FILE", conflicts_with = "jd_text", required_unless_present = "jd_text")]
        jd: Option<PathBuf>,

        /// Job description given inline instead of as a file
        #[arg(long, value_name = "TEXT")]
        jd_text: Option<String>,

        /// Also write the result and a manifest to this directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        /// Print the raw JSON response instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// List the skills extracted from a document
    Skills {
        file: PathBuf,
    },

    /// Estimate years of experience and seniority level of a document
    Seniority {
        file: PathBuf,
    },

    /// Analyze every resume in a directory against one job description
    Batch {
        #[arg(long, value_name = "DIR")]
        resumes: PathBuf,

        #[arg(long, value_name = "FILE")]
        jd: PathBuf,

        #[arg(short, long, default_value = "./workalign-results")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    workalign::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Analyze {
            resume,
            jd,
            jd_text,
            output,
            pretty,
            json,
        } => {
            cmd_analyze(config, &resume, jd.as_deref(), jd_text, output, pretty, json).await?;
        }
        Commands::Skills { file } => {
            cmd_skills(config, &file)?;
        }
        Commands::Seniority { file } => {
            cmd_seniority(config, &file)?;
        }
        Commands::Batch {
            resumes,
            jd,
            output,
            pretty,
            limit,
        } => {
            cmd_batch(config, &resumes, &jd, output, pretty, limit, cli.color).await?;
        }
    }

    Ok(())
}

fn build_engine(config: Config) -> Result<AnalysisEngine> {
    AnalysisEngine::from_config(config).context("Failed to initialize analysis engine")
}

async fn cmd_analyze(
    config: Config,
    resume: &Path,
    jd: Option<&Path>,
    jd_text: Option<String>,
    output: Option<PathBuf>,
    pretty: bool,
    json: bool,
) -> Result<()> {
    let engine = build_engine(config)?;

    let loaded = engine.load_document(resume).and_then(|resume_text| {
        let jd_text = match (jd, jd_text) {
            (Some(path), _) => engine.load_document(path)?,
            (None, Some(text)) => text,
            (None, None) => String::new(),
        };
        Ok((resume_text, jd_text))
    });

    let response = match loaded {
        Ok((resume_text, jd_text)) => engine.respond(&resume_text, &jd_text).await,
        Err(e) => AnalysisResponse::from(e),
    };

    if let Some(dir) = output {
        let exporter = JsonExporter::new(dir)?;
        let name = resume
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "result".to_string());
        let entry = exporter.export_result(&name, &response, pretty)?;
        exporter.write_manifest(vec![entry])?;
    }

    if json {
        let rendered = if pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        println!("{}", rendered);
    }

    match response {
        AnalysisResponse::Success(result) => {
            if !json {
                print_result(&result);
            }
            Ok(())
        }
        AnalysisResponse::Failure(report) => {
            eprintln!("{}", format_error(&report.error));
            if let Some(details) = &report.details {
                eprintln!("{}", format_info(details));
            }
            Err(anyhow::anyhow!("Analysis failed ({:?})", report.error_type))
        }
    }
}

fn print_result(result: &AnalysisResult) {
    let comp = &result.comp_details;

    println!();
    println!("Match score: {}", format_score(result.score));
    println!("{}", result.recommendations.summary);
    println!();

    println!("{}", format_step(1, 3, "Skills"));
    println!("  Matched ({}): {}", comp.matches.len(), comp.matches.join(", "));
    println!("  Missing ({}): {}", comp.gaps.len(), comp.gaps.join(", "));
    if !comp.similar.is_empty() {
        println!("  Close to a gap ({}): {}", comp.similar.len(), comp.similar.join(", "));
    }
    println!();

    println!("{}", format_step(2, 3, "Role fit"));
    for point in &result.role_fit_points {
        println!("  - {}", point);
    }
    println!();

    println!("{}", format_step(3, 3, "Recommendations"));
    for (index, item) in result.recommendations.items.iter().enumerate() {
        println!("{}", format_recommendation(index + 1, &item.text, item.is_critical()));
    }
    println!();
}

fn cmd_skills(config: Config, file: &Path) -> Result<()> {
    let engine = build_engine(config)?;
    let text = engine
        .load_document(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let skills = engine.extract_skills(&text)?;

    println!("{}", format_info(&format!("{} skills in {}", skills.len(), file.display())));
    for skill in skills.iter() {
        match &skill.canonical {
            Some(canonical) => println!("  {} -> {} [{}]", skill.label, canonical, skill.source.as_str()),
            None => println!("  {} [{}]", skill.label, skill.source.as_str()),
        }
    }

    Ok(())
}

fn cmd_seniority(config: Config, file: &Path) -> Result<()> {
    let engine = build_engine(config)?;
    let text = engine
        .load_document(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let profile = engine.extract_seniority(&text);

    println!("{}", format_info(&format!("Seniority of {}", file.display())));
    println!("  Years of experience: {}", profile.years);
    println!("  Average level: {:.1}", profile.level);
    println!("  Titles counted: {}", profile.level_count);

    Ok(())
}

async fn cmd_batch(
    config: Config,
    resumes: &Path,
    jd: &Path,
    output: PathBuf,
    pretty: bool,
    limit: Option<usize>,
    colored: bool,
) -> Result<()> {
    info!("Starting batch analysis");
    Validator::validate_worker_count(config.batch.parallel_workers)?;

    let scanner = FileScanner::new(config.batch.clone());
    let files = scanner
        .scan_directory(resumes)
        .context("Failed to scan resume directory")?;

    let files: Vec<_> = match limit {
        Some(limit) => files.into_iter().take(limit).collect(),
        None => files,
    };

    if files.is_empty() {
        println!("{}", format_warning("No resume files found"));
        return Ok(());
    }

    let engine = Arc::new(build_engine(config)?);
    let jd_text: Arc<str> = engine
        .load_document(jd)
        .with_context(|| format!("Failed to load job description {}", jd.display()))?
        .into();

    let progress = Arc::new(ProgressTracker::with_color(files.len(), colored));
    let items = engine.analyze_batch(files, jd_text, progress.clone()).await;
    progress.finish();
    let stats = progress.get_stats();

    let exporter = JsonExporter::new(&output)?;
    let entries = items
        .iter()
        .map(|item| exporter.export_result(&item.source.stem(), &item.response, pretty))
        .collect::<workalign::Result<Vec<_>>>()?;
    exporter.write_manifest(entries)?;

    print_batch_summary(&items, &stats);
    println!(
        "{}",
        format_success(&format!("Results written to {}", output.display()))
    );

    Ok(())
}

fn print_batch_summary(items: &[BatchItem], stats: &BatchStats) {
    info!("=== Batch Analysis Summary ===");
    info!("Duration: {:.2} seconds", stats.duration_ms as f64 / 1000.0);
    info!("Resumes analyzed: {}", stats.resumes_analyzed);
    info!("Resumes failed: {}", stats.resumes_failed);
    info!("Success rate: {:.2}%", stats.success_rate());
    info!("Average score: {:.1}", stats.average_score());
    info!("With critical alerts: {}", stats.critical_alerts);
    info!("Speed: {:.2} resumes/sec", stats.resumes_per_second());
    info!("==============================");

    println!();
    for item in items {
        match &item.response {
            AnalysisResponse::Success(result) => println!(
                "  {:<40} {}  {}",
                Validator::truncate_text(&item.source.relative_path, 40),
                format_score(result.score),
                Validator::truncate_text(&result.recommendations.summary, 60)
            ),
            AnalysisResponse::Failure(report) => println!(
                "  {:<40} {}",
                Validator::truncate_text(&item.source.relative_path, 40),
                format_error(&report.error)
            ),
        }
    }
    println!();
}
