//! The generation pipeline: completion, repository creation, file upload,
//! and pages activation

use crate::prelude::{println, *};
use colored::Colorize;
use siteforge_core::github::{failed_uploads, repo_url, site_url, RepoCreation, UploadOutcome};
use siteforge_core::project::slugify;

use crate::github::{self, GithubConfig};
use crate::openrouter::{self, OpenRouterConfig};

#[derive(Debug, clap::Parser)]
#[command(name = "generate")]
#[command(about = "Generate a website from a prompt and publish it to GitHub Pages")]
pub struct App {
    /// What the website should contain (free text)
    pub prompt: String,

    /// Completion model identifier
    #[clap(long, env = "SITEFORGE_MODEL")]
    pub model: Option<String>,

    /// OpenRouter API key (overrides OPENROUTER_API_KEY)
    #[clap(long)]
    pub openrouter_key: Option<String>,

    /// GitHub token (overrides GITHUB_TOKEN)
    #[clap(long)]
    pub github_token: Option<String>,

    /// GitHub username owning the new repository (overrides GITHUB_USERNAME)
    #[clap(long)]
    pub username: Option<String>,

    /// Output as JSON
    #[clap(long)]
    pub json: bool,
}

/// Final result of a generation run
#[derive(Debug, serde::Serialize, Clone)]
pub struct GenerationReport {
    pub repo: String,
    pub url: String,
    pub github_url: String,
    pub repo_already_existed: bool,
    pub uploaded_files: Vec<String>,
    pub pages_enabled: bool,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let openrouter_config =
        OpenRouterConfig::from_env()?.with_overrides(app.openrouter_key, app.model);
    let github_config = GithubConfig::from_env()?.with_overrides(app.github_token, app.username);

    if global.verbose {
        println!("Model: {}", openrouter_config.model);
        println!("Publishing as: {}", github_config.username);
    }

    let report = generate_site_data(&openrouter_config, &github_config, &app.prompt).await?;

    if app.json {
        println!("{}", format_report_json(&report)?);
    } else {
        print!("{}", format_report_text(&report));
    }

    Ok(())
}

/// Run the full pipeline for one prompt
///
/// Stages run strictly sequentially; the first failure of the completion
/// call, the repository creation, or any file upload is terminal. Pages
/// activation failure degrades to a warning because the repository and its
/// files are already in place.
pub async fn generate_site_data(
    openrouter_config: &OpenRouterConfig,
    github_config: &GithubConfig,
    prompt: &str,
) -> Result<GenerationReport> {
    // Ask the completion service for a project description
    let project = openrouter::generate_project_data(openrouter_config, prompt).await?;

    let slug = slugify(&project.repo_name);

    let client = github::create_github_client(github_config)?;

    // Create the repository; an existing one under the same name is reused
    let creation = github::create_repository_data(&client, github_config, &slug).await?;
    let repo_already_existed = creation == RepoCreation::AlreadyExists;
    if repo_already_existed {
        std::eprintln!("Warning: repository {slug} already exists; uploading into it");
    }

    // Upload every generated file, collecting per-file outcomes
    let mut outcomes: Vec<UploadOutcome> = Vec::new();
    for (path, content) in &project.files {
        let outcome =
            github::upload_file_data(&client, github_config, &slug, path, content).await?;
        outcomes.push(outcome);
    }

    let failed = failed_uploads(&outcomes);
    if !failed.is_empty() {
        return Err(eyre!(
            "Upload failed for {} of {} files: {}",
            failed.len(),
            outcomes.len(),
            failed.join(", ")
        ));
    }

    let pages_enabled = match github::enable_pages_data(&client, github_config, &slug).await {
        Ok(()) => true,
        Err(e) => {
            std::eprintln!("Warning: files uploaded but pages activation failed: {e}");
            false
        }
    };

    Ok(GenerationReport {
        url: site_url(&github_config.username, &slug),
        github_url: repo_url(&github_config.username, &slug),
        repo: slug,
        repo_already_existed,
        uploaded_files: outcomes.into_iter().map(|outcome| outcome.path).collect(),
        pages_enabled,
    })
}

/// Convert a generation report to pretty JSON
fn format_report_json(report: &GenerationReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert a generation report to formatted text with colors
fn format_report_text(report: &GenerationReport) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n\n", "Project created".green().bold()));

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Repository".bold().cyan(),
        report.repo.bright_white().to_string()
    ]);
    table.add_row(prettytable::row![
        "GitHub".bold().cyan(),
        report.github_url.cyan().underline().to_string()
    ]);
    table.add_row(prettytable::row![
        "Site".bold().cyan(),
        report.url.cyan().underline().to_string()
    ]);
    result.push_str(&table.to_string());

    result.push_str(&format!(
        "\n{}: {}\n",
        "Uploaded".bold().cyan(),
        report.uploaded_files.join(", ").bright_green()
    ));

    if report.repo_already_existed {
        result.push_str(&format!(
            "{}\n",
            "Note: the repository already existed; files were committed into it.".yellow()
        ));
    }

    if !report.pages_enabled {
        result.push_str(&format!(
            "{}\n",
            "Note: pages activation failed; enable it in the repository settings.".yellow()
        ));
    }

    result.push('\n');
    result
}
