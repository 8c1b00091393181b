mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use iul_core::{ContainerError, RenderError, SheetParseError, WorkbookError};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "iul")]
#[command(about = "Scan deliverable folders and render ИУЛ checksum reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Checksum every file in a folder")]
    Scan {
        #[arg(help = "Folder to scan")]
        dir: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
    #[command(about = "Extract the control and author tables from a workbook")]
    Extract {
        #[arg(help = "Path to the workbook (.xlsx)")]
        workbook: String,
        #[arg(long, help = "Control sheet name", default_value = iul_core::extract::DEFAULT_CONTROL_SHEET)]
        control_sheet: String,
        #[arg(long, help = "Author sheet name", default_value = iul_core::extract::DEFAULT_AUTHOR_SHEET)]
        author_sheet: String,
        #[arg(
            long,
            help = "Author ranges, comma-separated (e.g. D5:E23,F5:G23)",
            default_value = iul_core::extract::DEFAULT_AUTHOR_RANGES,
            conflicts_with = "authors_from"
        )]
        author_ranges: String,
        #[arg(long, help = "Read authors downward from this cell instead of fixed ranges")]
        authors_from: Option<String>,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
    #[command(about = "Render the report document for a folder")]
    Render {
        #[arg(help = "Folder to scan")]
        dir: String,
        #[arg(long, help = "Workbook path (found by folder name when omitted)")]
        workbook: Option<String>,
        #[arg(long, default_value = "template.docx", help = "Template document")]
        template: String,
        #[arg(long, default_value = "result.docx", help = "Output document")]
        output: String,
        #[arg(long, help = "Control sheet name", default_value = iul_core::extract::DEFAULT_CONTROL_SHEET)]
        control_sheet: String,
        #[arg(long, help = "Author sheet name", default_value = iul_core::extract::DEFAULT_AUTHOR_SHEET)]
        author_sheet: String,
        #[arg(
            long,
            help = "Author ranges, comma-separated (e.g. D5:E23,F5:G23)",
            default_value = iul_core::extract::DEFAULT_AUTHOR_RANGES
        )]
        author_ranges: String,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan { dir, format } => commands::scan::run(&dir, format),
        Commands::Extract {
            workbook,
            control_sheet,
            author_sheet,
            author_ranges,
            authors_from,
            format,
        } => commands::extract::run(
            &workbook,
            &control_sheet,
            &author_sheet,
            &author_ranges,
            authors_from.as_deref(),
            format,
        ),
        Commands::Render {
            dir,
            workbook,
            template,
            output,
            control_sheet,
            author_sheet,
            author_ranges,
        } => commands::render::run(
            &dir,
            workbook.as_deref(),
            &template,
            &output,
            &control_sheet,
            &author_sheet,
            &author_ranges,
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if is_internal_error(err) {
        ExitCode::from(3)
    } else {
        ExitCode::from(2)
    }
}

/// Malformed inputs we failed to parse exit 3; everything user-fixable
/// (missing files, bad arguments) exits 2.
fn is_internal_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(container_err) = cause.downcast_ref::<ContainerError>() {
            return !matches!(
                container_err,
                ContainerError::Io(_) | ContainerError::FileNotFound { .. }
            );
        }
        if let Some(render_err) = cause.downcast_ref::<RenderError>() {
            return matches!(render_err, RenderError::Zip(_));
        }
        if let Some(workbook_err) = cause.downcast_ref::<WorkbookError>() {
            return matches!(
                workbook_err,
                WorkbookError::WorkbookXmlMissing | WorkbookError::WorksheetXmlMissing { .. }
            );
        }
        cause.is::<SheetParseError>()
    })
}
