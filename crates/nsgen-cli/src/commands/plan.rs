//! Implementation of the `nsgen plan` command.

use serde::Serialize;

use nsgen_core::domain::{Rule, RulePlan};

use crate::{
    cli::{OutputFormat, PlanArgs, PlanFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Print the rules `nsgen add` would run for the given flags.
pub fn execute(args: PlanArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let plan = RulePlan::for_flags(
        args.sample || config.defaults.sample,
        args.skip_auto_generated_component || config.defaults.skip_auto_generated_component,
    );

    let format = if output.format() == OutputFormat::Json {
        PlanFormat::Json
    } else {
        args.format
    };

    match format {
        PlanFormat::Table => {
            output.header("Rule plan:")?;
            for (i, rule) in plan.iter().enumerate() {
                output.print(&format!("  {:>2}. {:<30} {}", i + 1, rule, rule.description()))?;
            }
        }
        PlanFormat::List => {
            for rule in &plan {
                output.print(rule.name())?;
            }
        }
        PlanFormat::Json => {
            let entries: Vec<PlanEntry> = plan.iter().map(PlanEntry::from).collect();
            output.json(&entries)?;
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct PlanEntry {
    name: &'static str,
    description: &'static str,
}

impl From<Rule> for PlanEntry {
    fn from(rule: Rule) -> Self {
        Self {
            name: rule.name(),
            description: rule.description(),
        }
    }
}
