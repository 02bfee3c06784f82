//! bitext CLI - side-by-side bilingual wiki pages

mod http;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use bitext::fetch::scheme_of;
use bitext::language::LanguageResolver;
use bitext::parser::AlignmentHintParser;
use bitext::{
    Alignment, Bitext, BilingualView, BuiltinLanguages, Document, FetcherRegistry, JsonFormat,
};

use crate::http::HttpFetcher;

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "bitext")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render wiki pages side by side with their translations", long_about = None)]
struct Cli {
    /// HTTP timeout in seconds
    #[arg(long, global = true, env = "BITEXT_TIMEOUT", default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Align a page with its translation and render the two-column table
    Align {
        /// Local page (file path or http(s) URL)
        #[arg(value_name = "LOCAL")]
        local: String,

        /// Foreign page (file path or http(s) URL)
        #[arg(value_name = "FOREIGN")]
        foreign: String,

        /// Language code of the local page
        #[arg(long, env = "BITEXT_LOCAL_LANG")]
        local_lang: String,

        /// Language code of the foreign page
        #[arg(long, env = "BITEXT_FOREIGN_LANG")]
        foreign_lang: String,

        /// Canonical URL of the local page, linked from the header
        #[arg(long)]
        local_url: Option<String>,

        /// Canonical URL of the foreign page (defaults to FOREIGN if it is a URL)
        #[arg(long)]
        foreign_url: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output the alignment as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Omit the header row
        #[arg(long)]
        no_header: bool,
    },

    /// Serve a page the way a request with QUERY would see it
    View {
        /// Local page (file path or http(s) URL)
        #[arg(value_name = "LOCAL")]
        local: String,

        /// Query string of the request (e.g., "?match=de")
        #[arg(value_name = "QUERY")]
        query: String,

        /// Language code of the local page
        #[arg(long, env = "BITEXT_LOCAL_LANG")]
        local_lang: String,

        /// Location of the translation, with {lang} standing for its code
        #[arg(long, value_name = "PATTERN")]
        foreign_pattern: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the hints a page declares for a language
    Hints {
        /// Page file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Language code of the translation
        #[arg(long, env = "BITEXT_FOREIGN_LANG")]
        lang: String,
    },

    /// List the paragraph units of a page
    #[command(alias = "paras")]
    Paragraphs {
        /// Page file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Remove hint blocks from a page
    Strip {
        /// Page file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Align every page of a directory with its same-named translation
    Batch {
        /// Directory of local pages
        #[arg(value_name = "LOCAL_DIR")]
        local_dir: PathBuf,

        /// Directory of foreign pages
        #[arg(value_name = "FOREIGN_DIR")]
        foreign_dir: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Language code of the local pages
        #[arg(long, env = "BITEXT_LOCAL_LANG")]
        local_lang: String,

        /// Language code of the foreign pages
        #[arg(long, env = "BITEXT_FOREIGN_LANG")]
        foreign_lang: String,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout);

    let result = match cli.command {
        Some(Commands::Align {
            local,
            foreign,
            local_lang,
            foreign_lang,
            local_url,
            foreign_url,
            output,
            json,
            compact,
            no_header,
        }) => cmd_align(
            AlignArgs {
                local: &local,
                foreign: &foreign,
                local_lang: &local_lang,
                foreign_lang: &foreign_lang,
                local_url: local_url.as_deref(),
                foreign_url: foreign_url.as_deref(),
            },
            output.as_deref(),
            json.then_some(if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            }),
            no_header,
            timeout,
        ),
        Some(Commands::View {
            local,
            query,
            local_lang,
            foreign_pattern,
            output,
        }) => cmd_view(
            &local,
            &query,
            &local_lang,
            &foreign_pattern,
            output.as_deref(),
            timeout,
        ),
        Some(Commands::Hints { input, lang }) => cmd_hints(&input, &lang),
        Some(Commands::Paragraphs { input }) => cmd_paragraphs(&input),
        Some(Commands::Strip { input, output }) => cmd_strip(&input, output.as_deref()),
        Some(Commands::Batch {
            local_dir,
            foreign_dir,
            output,
            local_lang,
            foreign_lang,
        }) => cmd_batch(&local_dir, &foreign_dir, &output, &local_lang, &foreign_lang),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!(
                "{}",
                "Usage: bitext align <LOCAL> <FOREIGN> --local-lang <CODE> --foreign-lang <CODE>"
                    .yellow()
            );
            println!("       bitext --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Registry for local files and http(s) URLs.
fn registry(timeout: Duration) -> CliResult<FetcherRegistry> {
    let mut registry = FetcherRegistry::with_defaults();
    registry.register(Arc::new(HttpFetcher::new(timeout)?));
    Ok(registry)
}

fn is_url(location: &str) -> bool {
    matches!(scheme_of(location).as_str(), "http" | "https")
}

/// Build a document with language metadata from the built-in table.
fn document(html: String, code: &str, url: Option<&str>) -> Document {
    let language = BuiltinLanguages::new().resolve_for_page(code, &html);
    let doc = Document::new(html, code).with_language(&language);
    match url {
        Some(url) => doc.with_canonical_url(url),
        None => doc,
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

struct AlignArgs<'a> {
    local: &'a str,
    foreign: &'a str,
    local_lang: &'a str,
    foreign_lang: &'a str,
    local_url: Option<&'a str>,
    foreign_url: Option<&'a str>,
}

fn cmd_align(
    args: AlignArgs<'_>,
    output: Option<&Path>,
    json: Option<JsonFormat>,
    no_header: bool,
    timeout: Duration,
) -> CliResult {
    let registry = registry(timeout)?;

    let local_url = args
        .local_url
        .or_else(|| is_url(args.local).then_some(args.local));
    let foreign_url = args
        .foreign_url
        .or_else(|| is_url(args.foreign).then_some(args.foreign));

    let local = document(registry.fetch(args.local)?, args.local_lang, local_url);
    let foreign = document(registry.fetch(args.foreign)?, args.foreign_lang, foreign_url);

    let mut bitext = Bitext::new();
    if no_header {
        bitext = bitext.without_header();
    }
    let alignment = bitext.align(&local, &foreign);

    let content = match json {
        Some(format) => alignment.to_json(format)?,
        None => alignment.to_html(bitext.render_options()),
    };
    write_or_print(output, &content)?;

    if output.is_some() {
        print_summary(&alignment);
    }
    Ok(())
}

fn print_summary(alignment: &Alignment) {
    let stats = &alignment.stats;
    println!();
    println!("{}", "Alignment Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {} -> {}",
        "Languages".bold(),
        alignment.local.display_name,
        alignment.foreign.display_name
    );
    println!(
        "{}: {} of {} placed",
        "Hints".bold(),
        stats.marker_count,
        stats.hint_count
    );
    println!("{}: {}", "Chunks".bold(), stats.chunk_count);
    println!("{}: {}", "Rows".bold(), alignment.rows.len());
    if stats.fallback_count > 0 {
        println!(
            "{}: {} ({:.0}%)",
            "Whole-chunk rows".bold(),
            stats.fallback_count,
            stats.fallback_ratio() * 100.0
        );
    }
    if stats.merged_fragment_count > 0 {
        println!(
            "{}: {}",
            "Merged fragments".bold(),
            stats.merged_fragment_count
        );
    }
}

fn cmd_view(
    local: &str,
    query: &str,
    local_lang: &str,
    foreign_pattern: &str,
    output: Option<&Path>,
    timeout: Duration,
) -> CliResult {
    let registry = registry(timeout)?;
    let local_url = is_url(local).then_some(local);
    let local = document(registry.fetch(local)?, local_lang, local_url);

    let view = BilingualView::new(Bitext::new());
    let html = view.render(&local, query, &registry, |code| {
        Some(foreign_pattern.replace("{lang}", code))
    })?;
    write_or_print(output, &html)
}

fn cmd_hints(input: &Path, lang: &str) -> CliResult {
    let html = fs::read_to_string(input)?;
    let hinted = AlignmentHintParser::default().parse(&html, lang);

    println!(
        "{} {} {}",
        "Hints for".cyan().bold(),
        lang.cyan().bold(),
        format!("({})", input.display()).dimmed()
    );
    println!("{}", "─".repeat(40).dimmed());

    if hinted.hints.is_empty() {
        println!("{}", "No hint block for this language".yellow());
        return Ok(());
    }

    for hint in &hinted.hints {
        let placed = hinted
            .markers
            .iter()
            .filter(|m| m.anchor_text == hint.anchor_text)
            .count();
        let status = if placed > 0 {
            "found".green()
        } else {
            "missing".red()
        };
        println!(
            "{:>3}. {} = {} [{}]",
            hint.index + 1,
            hint.anchor_text.bold(),
            hint.title,
            status
        );
    }

    println!(
        "\n{} of {} hints placed",
        hinted.markers.len(),
        hinted.hints.len()
    );
    Ok(())
}

fn cmd_paragraphs(input: &Path) -> CliResult {
    let html = fs::read_to_string(input)?;
    let units = bitext::split_paragraphs(&html);

    for (i, unit) in units.iter().enumerate() {
        let text = unit.as_str().trim();
        let preview: String = text.chars().take(72).collect();
        let ellipsis = if text.chars().count() > 72 { "…" } else { "" };
        println!(
            "{} {}{}",
            format!("{:>4}", i + 1).dimmed(),
            preview.replace('\n', " "),
            ellipsis
        );
    }
    println!("\n{} paragraph units", units.len().to_string().bold());
    Ok(())
}

fn cmd_strip(input: &Path, output: Option<&Path>) -> CliResult {
    let html = fs::read_to_string(input)?;
    write_or_print(output, &bitext::strip_hints(&html))
}

fn cmd_batch(
    local_dir: &Path,
    foreign_dir: &Path,
    output: &Path,
    local_lang: &str,
    foreign_lang: &str,
) -> CliResult {
    let mut names: Vec<_> = fs::read_dir(local_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .filter_map(|path| path.file_name().map(|n| n.to_os_string()))
        .collect();
    names.sort();

    let mut pairs = Vec::with_capacity(names.len());
    let mut matched = Vec::with_capacity(names.len());
    for name in names {
        let foreign_path = foreign_dir.join(&name);
        if !foreign_path.is_file() {
            println!(
                "{} {}",
                "No translation for".yellow(),
                Path::new(&name).display()
            );
            continue;
        }
        let local = document(
            fs::read_to_string(local_dir.join(&name))?,
            local_lang,
            None,
        );
        let foreign = document(fs::read_to_string(&foreign_path)?, foreign_lang, None);
        pairs.push((local, foreign));
        matched.push(name);
    }

    if pairs.is_empty() {
        println!("{}", "Nothing to align".yellow());
        return Ok(());
    }

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(pairs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Aligning...");
    let bitext = Bitext::new();
    let alignments = bitext.align_batch(&pairs);

    let mut totals = bitext::AlignmentStats::new();
    for (name, alignment) in matched.iter().zip(&alignments) {
        pb.set_message(Path::new(name).display().to_string());
        fs::write(output.join(name), alignment.to_html(bitext.render_options()))?;
        totals.merge(&alignment.stats);
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} pages aligned, {} rows, {} whole-chunk fallbacks",
        "Done!".green().bold(),
        alignments.len(),
        totals.row_count,
        totals.fallback_count
    );
    println!("{} {}", "Output:".green(), output.display());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "bitext".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Side-by-side bilingual rendering of wiki pages");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/bitext".dimmed());
}
