//! Implementation of the `nsgen add` command.
//!
//! Translates CLI arguments into [`AddNsOptions`], runs the augmentation
//! against the workspace on disk and reports the touched paths.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use nsgen_adapters::{LocalFilesystem, TemplateRuleExecutor};
use nsgen_core::{
    application::AugmentService,
    domain::{AddNsOptions, RulePlan, TreeDiff, registry::WORKSPACE_CONFIG_PATH},
};

use crate::{
    cli::{AddArgs, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `nsgen add` command.
///
/// 1. Check the directory holds an `angular.json`
/// 2. Merge flags over config defaults into [`AddNsOptions`]
/// 3. Confirm unless `--yes`, `--quiet` or `--dry-run`
/// 4. Augment the workspace (nothing written with `--dry-run`)
/// 5. Report created and updated paths, then next steps
#[instrument(skip_all, fields(project = %args.project, dir = %args.dir.display()))]
pub fn execute(
    args: AddArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    ensure_workspace(&args.dir)?;

    let options = build_options(&args, &config)?;
    debug!(options = %options, "Options resolved");

    if !global.quiet && !args.yes && !args.dry_run && output.format() != OutputFormat::Json {
        show_configuration(&options, &args.dir, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let service = AugmentService::new(
        Box::new(TemplateRuleExecutor::builtin()?),
        Box::new(LocalFilesystem::new()),
    );

    info!(project = %options.project(), dry_run = args.dry_run, "Augmentation started");
    let spinner = output.spinner(&format!("Adding NativeScript to '{}'...", options.project()));
    let result = service.augment_directory(&args.dir, &options, args.dry_run);
    spinner.finish_and_clear();
    let diff = result?;
    info!(changed = diff.len(), "Augmentation completed");

    if output.format() == OutputFormat::Json {
        output.json(&DiffReport::new(&diff, args.dry_run))?;
        return Ok(());
    }

    report_changes(&diff, args.dry_run, &output)?;

    if args.dry_run {
        output.info("Dry run: no files were written")?;
        return Ok(());
    }

    output.success(&format!(
        "NativeScript added to '{}' ({} created, {} updated)",
        options.project(),
        diff.created.len(),
        diff.updated.len(),
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", args.dir.display()))?;
        output.print("  npm install")?;
        output.print("  tns run android --bundle")?;
        output.print("  tns run ios --bundle")?;
    }

    Ok(())
}

// ── Option resolution ─────────────────────────────────────────────────────────

fn ensure_workspace(dir: &Path) -> CliResult<()> {
    if !dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not a directory", dir.display()),
            source: None,
        });
    }
    let config_file = dir.join(WORKSPACE_CONFIG_PATH.trim_start_matches('/'));
    if config_file.is_file() {
        Ok(())
    } else {
        Err(CliError::WorkspaceNotFound {
            path: dir.to_path_buf(),
        })
    }
}

/// Flags win over config; boolean flags can only switch a default on.
fn build_options(args: &AddArgs, config: &AppConfig) -> CliResult<AddNsOptions> {
    let defaults = &config.defaults;
    let ns_extension = args
        .ns_extension
        .clone()
        .unwrap_or_else(|| defaults.ns_extension.clone());
    let web_extension = args
        .web_extension
        .clone()
        .unwrap_or_else(|| defaults.web_extension.clone());

    AddNsOptions::builder(args.project.clone())
        .ns_extension(ns_extension)
        .web_extension(web_extension)
        .sample(args.sample || defaults.sample)
        .skip_auto_generated_component(
            args.skip_auto_generated_component || defaults.skip_auto_generated_component,
        )
        .build()
        .map_err(|e| CliError::Core(e.into()))
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiffReport {
    dry_run: bool,
    created: Vec<String>,
    updated: Vec<String>,
}

impl DiffReport {
    fn new(diff: &TreeDiff, dry_run: bool) -> Self {
        Self {
            dry_run,
            created: diff.created.iter().map(|p| p.to_string()).collect(),
            updated: diff.updated.iter().map(|p| p.to_string()).collect(),
        }
    }
}

fn report_changes(diff: &TreeDiff, dry_run: bool, out: &OutputManager) -> CliResult<()> {
    if out.is_quiet() {
        return Ok(());
    }
    out.header(if dry_run { "Would change:" } else { "Changes:" })?;
    for path in &diff.created {
        out.print(&format!("  + {path}"))?;
    }
    for path in &diff.updated {
        out.print(&format!("  ~ {path}"))?;
    }
    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(options: &AddNsOptions, dir: &Path, out: &OutputManager) -> CliResult<()> {
    let web = if options.web_extension().is_empty() {
        "(none)".to_string()
    } else {
        options.web_extension().to_string()
    };

    out.header("Configuration")?;
    out.print(&format!("  Project:       {}", options.project()))?;
    out.print(&format!("  Workspace:     {}", dir.display()))?;
    out.print(&format!("  NS extension:  {}", options.ns_extension()))?;
    out.print(&format!("  Web extension: {web}"))?;
    out.print("  Rules:")?;
    for rule in &RulePlan::for_options(options) {
        out.print(&format!("    - {rule}"))?;
    }
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
