//! notegen CLI - study note normalization tool
//!
//! A command-line tool for turning organizer output into canonical note
//! blocks, Markdown and plain text.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use notegen::{
    detect_format, render, CleanupOptions, NoteData, NoteInput, NoteMetadata, OrganizeMethod,
    ParseOptions, RenderOptions,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Study note normalization to JSON, Markdown and text
#[derive(Parser)]
#[command(
    name = "notegen",
    version,
    about = "Normalize organized study notes into canonical blocks",
    long_about = "notegen - study note normalization tool.\n\n\
                  Reads organizer output (Cornell JSON, wrong-answer notes, legacy\n\
                  marker text or Markdown) and writes canonical JSON, Markdown or text.\n\n\
                  Usage:\n  \
                  notegen <file>              Write all formats to an output directory\n  \
                  notegen <file> <output>     Write to the specified directory\n  \
                  notegen md <file>           Convert to Markdown only"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (for default conversion)
    input: Option<PathBuf>,

    /// Output directory (for default conversion)
    output: Option<PathBuf>,

    #[command(flatten)]
    note: NoteArgs,
}

/// Options shared by every parsing command.
#[derive(clap::Args, Clone, Default)]
struct NoteArgs {
    /// Organize method that produced the content
    #[arg(short, long, global = true)]
    method: Option<Method>,

    /// Fallback title (default: file name)
    #[arg(short, long, global = true)]
    title: Option<String>,

    /// Subject recorded in metadata
    #[arg(long, global = true)]
    subject: Option<String>,

    /// Date recorded in metadata
    #[arg(long, global = true)]
    date: Option<String>,

    /// Input cleanup preset
    #[arg(long, global = true)]
    cleanup: Option<CleanupMode>,

    /// Only use the wrong-answer extractor when --method asks for it
    #[arg(long, global = true)]
    hint_only: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a note (default command - writes all formats)
    Convert {
        /// Input file path
        input: PathBuf,

        /// Output directory (default: <filename>_output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a note to Markdown
    #[command(visible_alias = "md")]
    Markdown {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include YAML frontmatter with metadata
        #[arg(short, long)]
        frontmatter: bool,

        /// Render tips as emoji quotes instead of GitHub alerts
        #[arg(long)]
        plain_quotes: bool,
    },

    /// Convert a note to plain text
    Text {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a note to canonical JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show detected format and block statistics
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Convert many notes to JSON in parallel
    Batch {
        /// Input file paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Organize method
#[derive(Clone, Copy, ValueEnum)]
enum Method {
    /// Basic summary
    BasicSummary,
    /// Cornell notes
    Cornell,
    /// Wrong-answer note
    WrongAnswer,
    /// Vocabulary list
    Vocabulary,
}

impl From<Method> for OrganizeMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::BasicSummary => OrganizeMethod::BasicSummary,
            Method::Cornell => OrganizeMethod::Cornell,
            Method::WrongAnswer => OrganizeMethod::WrongAnswer,
            Method::Vocabulary => OrganizeMethod::Vocabulary,
        }
    }
}

/// Cleanup mode
#[derive(Clone, Copy, ValueEnum)]
enum CleanupMode {
    /// No cleanup
    None,
    /// Minimal cleanup
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup
    Aggressive,
}

impl NoteArgs {
    fn metadata(&self) -> Option<NoteMetadata> {
        if self.method.is_none() && self.subject.is_none() && self.date.is_none() {
            return None;
        }
        Some(NoteMetadata {
            subject: self.subject.clone(),
            date: self.date.clone(),
            organize_method: self.method.map(Into::into),
        })
    }

    fn parse_options(&self) -> ParseOptions {
        let mut options = match self.cleanup {
            None | Some(CleanupMode::Standard) => ParseOptions::default(),
            Some(CleanupMode::None) => ParseOptions::new().raw(),
            Some(CleanupMode::Minimal) => ParseOptions::new().with_cleanup(CleanupOptions::minimal()),
            Some(CleanupMode::Aggressive) => {
                ParseOptions::new().with_cleanup(CleanupOptions::aggressive())
            }
        };
        if self.hint_only {
            options = options.hint_only();
        }
        options
    }

    fn title_for(&self, input: &Path) -> String {
        self.title.clone().unwrap_or_else(|| {
            input
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string()
        })
    }

    fn read(&self, input: &Path) -> Result<NoteInput, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(input)?;
        let mut note = NoteInput::new(content, self.title_for(input));
        note.metadata = self.metadata();
        Ok(note)
    }

    fn parse(&self, input: &Path) -> Result<NoteData, Box<dyn std::error::Error>> {
        let note = self.read(input)?;
        Ok(notegen::parse_with_options(
            &note.content,
            &note.title,
            note.metadata.as_ref(),
            &self.parse_options(),
        ))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let args = cli.note;

    let Some(command) = cli.command else {
        // Default command (notegen <file> [output])
        if let Some(input) = cli.input {
            return run_convert(&args, &input, cli.output.as_ref());
        }
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Convert { input, output } => {
            run_convert(&args, &input, output.as_ref())?;
        }

        Commands::Markdown {
            input,
            output,
            frontmatter,
            plain_quotes,
        } => {
            let pb = create_spinner("Parsing note...");

            let note = args.parse(&input)?;
            pb.set_message("Rendering to Markdown...");

            let mut options = RenderOptions::default();
            if frontmatter {
                options = options.with_frontmatter();
            }
            if plain_quotes {
                options = options.plain_quotes();
            }
            let markdown = render::render_markdown(&note, &options);

            pb.finish_and_clear();
            write_output(output.as_ref(), &markdown)?;

            if let Some(path) = output {
                println!(
                    "{} Converted to Markdown: {}",
                    "✓".green().bold(),
                    path.display()
                );
            }
        }

        Commands::Text { input, output } => {
            let pb = create_spinner("Parsing note...");

            let note = args.parse(&input)?;
            let text = note.plain_text();

            pb.finish_and_clear();
            write_output(output.as_ref(), &text)?;

            if let Some(path) = output {
                println!("{} Converted to text: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let pb = create_spinner("Parsing note...");

            let note = args.parse(&input)?;
            pb.set_message("Rendering to JSON...");

            let json = if compact {
                note.to_json()?
            } else {
                note.to_json_pretty()?
            };

            pb.finish_and_clear();
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!("{} Converted to JSON: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing note...");

            let raw = args.read(&input)?;
            let method = raw.metadata.as_ref().and_then(|m| m.organize_method);
            let format = detect_format(&raw.content, method);
            let note = args.parse(&input)?;

            pb.finish_and_clear();

            println!("{}", "Note Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Format".bold(), format);
            println!("{}: {}", "Title".bold(), note.title);
            if let Some(method) = method {
                println!("{}: {}", "Method".bold(), method);
            }

            println!("\n{}", "Blocks".cyan().bold());
            println!("{}", "─".repeat(40));
            for (kind, count) in note.block_counts() {
                println!("{}: {}", kind.bold(), count);
            }

            let text = note.plain_text();
            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Words".bold(), text.split_whitespace().count());
            println!("{}: {}", "Characters".bold(), text.chars().count());
        }

        Commands::Batch { inputs, output } => {
            run_batch(&args, &inputs, output.as_ref())?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Run the default convert command - writes all formats to the output directory
fn run_convert(
    args: &NoteArgs,
    input: &Path,
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Parsing note...");

    let output_dir = match output {
        Some(p) => p.clone(),
        None => default_output_dir(input),
    };
    fs::create_dir_all(&output_dir)?;

    let note = args.parse(input)?;

    pb.set_message("Generating Markdown...");
    let options = RenderOptions::default().with_frontmatter();
    render::render_to_file(&note, output_dir.join("note.md"), &options)?;

    pb.set_message("Generating text...");
    let text = note.plain_text();
    fs::write(output_dir.join("note.txt"), &text)?;

    pb.set_message("Generating JSON...");
    fs::write(output_dir.join("note.json"), note.to_json_pretty()?)?;

    pb.finish_and_clear();

    println!("{}", "Conversion Complete".green().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Output".bold(), output_dir.display());
    println!("  {} note.md", "✓".green());
    println!("  {} note.txt", "✓".green());
    println!("  {} note.json", "✓".green());

    println!("\n{}", "Statistics".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Title".bold(), note.title);
    println!("{}: {}", "Blocks".bold(), note.blocks.len());
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());

    Ok(())
}

/// Parses every input on the rayon pool and writes one JSON file per note.
fn run_batch(
    args: &NoteArgs,
    inputs: &[PathBuf],
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    pb.set_message("Reading...");
    let mut notes = Vec::with_capacity(inputs.len());
    for input in inputs {
        notes.push(args.read(input)?);
        pb.inc(1);
    }

    pb.set_message("Parsing...");
    let parsed = notegen::parse_batch(&notes, &args.parse_options());

    pb.set_position(0);
    pb.set_message("Writing...");
    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }
    for (input, note) in inputs.iter().zip(&parsed) {
        let path = batch_output_path(input, output);
        fs::write(&path, note.to_json_pretty()?)?;
        log::debug!("wrote {}", path.display());
        pb.inc(1);
    }

    pb.finish_and_clear();
    println!(
        "{} Converted {} notes to JSON",
        "✓".green().bold(),
        parsed.len()
    );

    Ok(())
}

fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{}_output", stem))
}

fn batch_output_path(input: &Path, output: Option<&PathBuf>) -> PathBuf {
    let file_name = input.with_extension("json");
    let file_name = file_name.file_name().unwrap_or_default();
    match output {
        Some(dir) => dir.join(file_name),
        None => input.with_extension("json"),
    }
}

fn print_version() {
    println!("{} {}", "notegen".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Study note normalization to canonical blocks, Markdown and JSON");
    println!();
    println!("Supported inputs: Cornell JSON, wrong-answer notes, legacy markers, Markdown");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
