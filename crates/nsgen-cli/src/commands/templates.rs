//! Implementation of the `nsgen templates` command.

use nsgen_adapters::InMemoryStore;
use nsgen_core::application::{TemplateInfo, TemplateService};

use crate::{
    cli::{ListFormat, OutputFormat, TemplatesArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: TemplatesArgs, output: OutputManager) -> CliResult<()> {
    let service = TemplateService::new(Box::new(InMemoryStore::with_builtin()?));
    let templates = service.list_info()?;

    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for t in &templates {
                output.print(&format!(
                    "  {:<28} {:>2} files  {}",
                    t.id, t.files, t.description
                ))?;
            }
        }
        ListFormat::List => {
            for t in &templates {
                output.print(&t.id)?;
            }
        }
        // Bypasses quiet mode so pipes stay parseable.
        ListFormat::Json => output.json(&templates)?,
        ListFormat::Csv => {
            println!("id,name,files,tags");
            for t in &templates {
                println!("{}", csv_row(t));
            }
        }
    }

    Ok(())
}

fn csv_row(t: &TemplateInfo) -> String {
    format!(
        "{},{},{},{}",
        csv_field(&t.id),
        csv_field(&t.name),
        t.files,
        csv_field(&t.tags.join(";"))
    )
}

/// Quote fields that contain a separator or a quote.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
