use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api_client::ApiClient;
use crate::comparison::{classify, write_csv, CandidateStatus, EvaluationStatus};
use crate::loader::{load_candidate_statuses, load_comparison, ComparisonView};
use crate::models::{Job, JobTemplate};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "evalboard",
    version,
    about = "Compare interview candidates against a job's scoring criteria"
)]
pub struct Cli {
    /// Base URL of the evaluation API (overrides EVALBOARD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List job postings
    Jobs,

    /// List a job's candidates with their evaluation status
    Candidates { job_id: i64 },

    /// Rank a job's candidates by overall score
    Compare {
        job_id: i64,

        /// Write comparison_<job title>.csv into this directory
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },

    /// List job templates
    Templates {
        /// Only templates from this category
        #[arg(long)]
        category: Option<String>,
    },
}

pub async fn run(cli: Cli, client: &ApiClient) -> Result<()> {
    match cli.command {
        Command::Jobs => {
            let jobs = client.list_jobs().await.context("load jobs")?;
            print!("{}", render_jobs(&jobs));
        }
        Command::Candidates { job_id } => {
            let (job, statuses) = load_candidate_statuses(client, job_id)
                .await
                .with_context(|| format!("load candidates for job {job_id}"))?;
            print!("{}", render_candidates(&job, &statuses));
        }
        Command::Compare { job_id, csv_dir } => {
            let view = load_comparison(client, job_id)
                .await
                .with_context(|| format!("load comparison for job {job_id}"))?;
            print!("{}", render_comparison(&view));

            if let Some(dir) = csv_dir {
                if view.ranking.ranked.is_empty() {
                    println!("Nothing to export: no candidate has been evaluated yet.");
                } else {
                    let path = write_csv(
                        &dir,
                        &view.job.title,
                        &view.ranking.ranked_summaries(),
                        &view.criteria,
                    )?;
                    println!("Exported: {}", path.display());
                }
            }
        }
        Command::Templates { category } => {
            let templates = match category.as_deref() {
                Some(category) => client.templates_by_category(category).await,
                None => client.templates().await,
            }
            .context("load templates")?;
            print!("{}", render_templates(&templates));
        }
    }
    Ok(())
}

pub fn render_jobs(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return "No jobs yet.\n".to_string();
    }
    let mut out = String::new();
    for job in jobs {
        let criteria = job.criterion_names();
        let _ = writeln!(
            out,
            "#{:<4} {}  ({} criteria)",
            job.id,
            job.title,
            criteria.len()
        );
    }
    out
}

pub fn render_candidates(job: &Job, statuses: &[CandidateStatus]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Candidates for {} (#{})", job.title, job.id);
    if statuses.is_empty() {
        let _ = writeln!(out, "  none");
        return out;
    }
    for status in statuses {
        let detail = match (status.status, status.average_score) {
            (EvaluationStatus::Evaluated, Some(avg)) => format!(
                "{avg}/10 {} ({} scores)",
                classify(avg),
                status.evaluations_count
            ),
            _ => "not evaluated".to_string(),
        };
        let _ = writeln!(
            out,
            "  #{:<4} {:<24} {}",
            status.candidate.id, status.candidate.name, detail
        );
    }
    out
}

pub fn render_comparison(view: &ComparisonView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Comparison: {}", view.job.title);
    let _ = writeln!(
        out,
        "{} candidates, {} evaluated, {} criteria",
        view.stats.total_candidates, view.stats.evaluated, view.stats.criteria
    );

    if view.ranking.ranked.is_empty() {
        let _ = writeln!(out, "No candidate has been evaluated yet.");
    }

    for entry in &view.ranking.ranked {
        let summary = &entry.summary;
        let marker = if entry.is_leader { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker}{:>2}. {:<24} {:>2}/10  {}",
            entry.position,
            summary.candidate_name,
            summary.overall_score,
            classify(summary.overall_score)
        );
        for criterion in &view.criteria {
            let _ = writeln!(out, "      {:<22} {}", criterion, summary.score_for(criterion));
        }
        if !summary.notes.is_empty() {
            let _ = writeln!(out, "      notes: {}", summary.notes);
        }
    }

    if !view.ranking.not_evaluated.is_empty() {
        let names: Vec<&str> = view
            .ranking
            .not_evaluated
            .iter()
            .map(|s| s.candidate_name.as_str())
            .collect();
        let _ = writeln!(out, "Awaiting interview: {}", names.join(", "));
    }
    out
}

pub fn render_templates(templates: &[JobTemplate]) -> String {
    if templates.is_empty() {
        return "No templates.\n".to_string();
    }
    let mut out = String::new();
    for template in templates {
        let _ = writeln!(
            out,
            "{:<20} {} [{} / {}] {} criteria, {} questions",
            template.id,
            template.title,
            template.category,
            template.level,
            template.criteria.len(),
            template.question_count()
        );
    }
    out
}
