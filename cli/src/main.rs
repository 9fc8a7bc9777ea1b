//! resumark CLI - build résumés from Markdown and export them

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resumark::remote::{PdfClient, RemoteOptions, DEFAULT_TIMEOUT_SECS};
use resumark::{
    export, export_all, import_file, Document, Error, JsonFormat, OutputFormat, PageSize,
    RenderOptions,
};

#[derive(Parser)]
#[command(name = "resumark")]
#[command(version)]
#[command(about = "Build résumés from Markdown and export HTML, DOCX, PDF and JSON", long_about = None)]
struct Cli {
    /// Input résumé (.md, .markdown or .json)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Page and typography flags shared by the rendering commands.
#[derive(clap::Args, Clone)]
struct LayoutArgs {
    /// Page margin in inches (overrides the document's margin)
    #[arg(long, value_name = "INCHES")]
    margin: Option<f32>,

    /// Font family
    #[arg(long)]
    font: Option<String>,

    /// Body font size in points
    #[arg(long, value_name = "PT")]
    font_size: Option<f32>,

    /// Page size
    #[arg(long, value_enum, default_value = "letter")]
    page: PageArg,
}

impl LayoutArgs {
    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new().with_page(self.page.into());
        if let Some(margin) = self.margin {
            options = options.with_margin(margin);
        }
        if let Some(ref font) = self.font {
            options = options.with_font(font.clone());
        }
        if let Some(size) = self.font_size {
            options = options.with_font_size_pt(size);
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the starter résumé
    New {
        /// Output file (.md or .json)
        #[arg(value_name = "FILE", default_value = "resume.md")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Export to every local format (HTML, Markdown, DOCX, JSON, text)
    Convert {
        /// Input résumé
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Render to a standalone HTML page
    Html {
        /// Input résumé
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Export to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input résumé
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render to a Word document
    Docx {
        /// Input résumé
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the document's filename)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Save as a JSON project
    Json {
        /// Input résumé
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render to plain text
    Text {
        /// Input résumé
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render to PDF through the HTML rendering service
    Pdf {
        /// Input résumé
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the document's filename)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Rendering service endpoint
        #[arg(long, env = "RESUMARK_RENDER_URL", value_name = "URL")]
        service: String,

        /// Time limit in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document information
    Info {
        /// Input résumé
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageArg {
    /// US Letter
    Letter,
    /// ISO A4
    A4,
}

impl From<PageArg> for PageSize {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Letter => PageSize::Letter,
            PageArg::A4 => PageSize::A4,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::New { output, force }) => cmd_new(&output, force),
        Some(Commands::Convert {
            input,
            output,
            layout,
        }) => cmd_convert(&input, output.as_deref(), &layout.render_options()),
        Some(Commands::Html {
            input,
            output,
            layout,
        }) => cmd_single(&input, output.as_deref(), OutputFormat::Html, &layout.render_options()),
        Some(Commands::Markdown { input, output }) => cmd_single(
            &input,
            output.as_deref(),
            OutputFormat::Markdown,
            &RenderOptions::default(),
        ),
        Some(Commands::Docx {
            input,
            output,
            layout,
        }) => cmd_docx(&input, output.as_deref(), &layout.render_options()),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => {
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let options = RenderOptions::new().with_json_format(format);
            cmd_single(&input, output.as_deref(), OutputFormat::Json, &options)
        }
        Some(Commands::Text { input, output }) => cmd_single(
            &input,
            output.as_deref(),
            OutputFormat::Text,
            &RenderOptions::default(),
        ),
        Some(Commands::Pdf {
            input,
            output,
            service,
            timeout,
            layout,
        }) => cmd_pdf(
            &input,
            output.as_deref(),
            RemoteOptions::new(service).with_timeout(Duration::from_secs(timeout)),
            &layout.render_options(),
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &RenderOptions::default())
            } else {
                println!("{}", "Usage: resumark <FILE> [OUTPUT]".yellow());
                println!("       resumark --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        let message = match e.downcast_ref::<Error>() {
            Some(Error::RenderFault(fault)) => fault.user_message(),
            _ => e.to_string(),
        };
        eprintln!("{}: {}", "Error".red().bold(), message);
        std::process::exit(1);
    }
}

fn cmd_new(output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", output.display()).into());
    }

    let mut doc = Document::template();
    if let Some(stem) = output.file_stem().and_then(|s| s.to_str()) {
        doc.filename = stem.to_string();
    }

    let is_json = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let format = if is_json {
        OutputFormat::Json
    } else {
        OutputFormat::Markdown
    };
    let rendered = export(&doc, format, &RenderOptions::default())?;
    fs::write(output, &rendered.bytes)?;
    println!("{} {}", "Created".green(), output.display());

    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;
    log::debug!("Converting {} into {}", input.display(), output_dir.display());

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Importing...");
    let doc = import_file(input)?;
    pb.inc(1);

    pb.set_message("Rendering...");
    let exports = export_all(&doc, &OutputFormat::ALL, options)?;
    pb.inc(1);

    pb.set_message("Writing files...");
    for item in &exports {
        fs::write(output_dir.join(&item.file_name), &item.bytes)?;
    }
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, item) in exports.iter().enumerate() {
        let branch = if i + 1 == exports.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), item.file_name);
    }

    Ok(())
}

fn cmd_single(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = import_file(input)?;
    log::debug!("Rendering {} as {}", input.display(), format);
    let rendered = export(&doc, format, options)?;

    if let Some(path) = output {
        fs::write(path, &rendered.bytes)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", String::from_utf8_lossy(&rendered.bytes));
    }

    Ok(())
}

fn cmd_docx(
    input: &Path,
    output: Option<&Path>,
    options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = import_file(input)?;
    let rendered = export(&doc, OutputFormat::Docx, options)?;

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(&rendered.file_name));
    fs::write(&path, &rendered.bytes)?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_pdf(
    input: &Path,
    output: Option<&Path>,
    remote: RemoteOptions,
    options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = import_file(input)?;
    log::debug!(
        "Sending {} to {} (timeout {:?})",
        input.display(),
        remote.endpoint,
        remote.timeout
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Rendering PDF via {}...", remote.endpoint));
    pb.enable_steady_tick(Duration::from_millis(120));

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async {
        let client = PdfClient::new(remote)?;
        client.render_document(&doc, options).await
    });
    pb.finish_and_clear();
    let bytes = result?;

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(format!("{}.pdf", doc.filename)));
    fs::write(&path, &bytes)?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = import_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Name".bold(), doc.header.name);
    if !doc.header.title.is_empty() {
        println!("{}: {}", "Title".bold(), doc.header.title);
    }
    println!("{}: {}in", "Margin".bold(), doc.margin_inches);
    println!("{}: {}", "Filename".bold(), doc.filename);

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for section in &doc.sections {
        println!(
            "{} {} ({} entries)",
            section.display_title().bold(),
            format!("[{}]", section.kind()).dimmed(),
            section.content.entry_count()
        );
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = resumark::render::to_text(&doc)?;
    println!("{}: {}", "Sections".bold(), doc.section_count());
    println!("{}: {}", "Entries".bold(), doc.entry_count());
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "resumark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Résumé builder with Markdown import and HTML, DOCX and PDF export");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_flags() {
        let cli = Cli::try_parse_from([
            "resumark", "html", "cv.md", "--margin", "0.75", "--font", "Georgia", "--page", "a4",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Html { layout, .. }) => {
                let options = layout.render_options();
                assert_eq!(options.margin_override, Some(0.75));
                assert_eq!(options.font_family, "Georgia");
                assert_eq!(options.page, PageSize::A4);
            }
            _ => panic!("expected html command"),
        }
    }

    #[test]
    fn test_md_alias() {
        let cli = Cli::try_parse_from(["resumark", "md", "cv.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Markdown { .. })));
    }

    #[test]
    fn test_new_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cv.md");

        cmd_new(&path, false).unwrap();
        let doc = import_file(&path).unwrap();
        assert_eq!(doc.filename, "cv");
        assert!(cmd_new(&path, false).is_err());
        assert!(cmd_new(&path, true).is_ok());
    }

    #[test]
    fn test_convert_writes_every_format() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("jordan.json");
        cmd_new(&input, false).unwrap();

        let out = dir.path().join("out");
        cmd_convert(&input, Some(&out), &RenderOptions::default()).unwrap();
        for ext in ["html", "md", "docx", "json", "txt"] {
            assert!(out.join(format!("jordan.{}", ext)).is_file(), "missing {}", ext);
        }
    }

    #[test]
    fn test_docx_to_named_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cv.md");
        cmd_new(&input, false).unwrap();

        let output = dir.path().join("cv.docx");
        cmd_docx(&input, Some(&output), &RenderOptions::default()).unwrap();
        assert!(fs::read(&output).unwrap().starts_with(b"PK"));
    }
}
