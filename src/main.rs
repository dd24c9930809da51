//! lipi - Sanskrit transliteration and article rendering

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lipi::{
    ArticleRenderer, CitationIndex, ContentBlock, FileStore, MemoryStore, Script,
    ThemeStyleModel, TransliterationContext, Transliterator, generate_css,
};

#[derive(Parser)]
#[command(name = "lipi")]
#[command(version, about = "Sanskrit transliteration and article rendering", long_about = None)]
#[command(after_help = "EXAMPLES:
    lipi translit --to IAST नमस्ते           Transliterate text
    lipi set-script KANNADA                  Remember a script for later renders
    lipi css --book ys --scope reader        Print the default theme CSS
    lipi render blocks.json --page > ys.html Render a full page")]
struct Cli {
    /// Preference file holding the selected script
    #[arg(long, global = true, env = "LIPI_PREFS", default_value = ".lipi/preferences.json")]
    prefs: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported scripts
    Scripts,

    /// Transliterate Devanagari text (arguments or stdin)
    Translit {
        /// Target script id; defaults to the saved preference
        #[arg(long)]
        to: Option<Script>,

        #[arg(value_name = "TEXT")]
        text: Vec<String>,
    },

    /// Generate scoped theme CSS
    Css {
        /// Theme model JSON; the built-in theme is used when omitted
        #[arg(long, value_name = "FILE")]
        theme: Option<PathBuf>,

        /// Book id for the built-in theme
        #[arg(long, default_value = "default")]
        book: String,

        /// Id of the container the rules are scoped to
        #[arg(long, default_value = "lipi-article")]
        scope: String,

        /// Paragraph font size override, e.g. 18px
        #[arg(long)]
        font_size: Option<String>,

        /// Wrap the CSS in a <style> element
        #[arg(long)]
        style_tag: bool,
    },

    /// Print the built-in theme model as JSON
    Theme {
        #[arg(value_name = "BOOK_ID")]
        book: String,
    },

    /// Render content blocks (JSON array) to HTML
    Render {
        #[arg(value_name = "BLOCKS")]
        blocks: PathBuf,

        /// Script to render in; defaults to the saved preference
        #[arg(long)]
        script: Option<Script>,

        #[arg(long, default_value = "lipi-article")]
        scope: String,

        /// Emit a table of contents
        #[arg(long)]
        toc: bool,

        /// Citation index JSON; cards are resolved before output
        #[arg(long, value_name = "FILE")]
        citations: Option<PathBuf>,

        /// Theme model JSON for --page
        #[arg(long, value_name = "FILE")]
        theme: Option<PathBuf>,

        /// Paragraph font size override for --page
        #[arg(long)]
        font_size: Option<String>,

        /// Emit a complete HTML page with the theme stylesheet
        #[arg(long)]
        page: bool,
    },

    /// Save the script used by later commands
    SetScript {
        #[arg(value_name = "SCRIPT")]
        script: Script,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> lipi::Result<()> {
    match cli.command {
        Command::Scripts => {
            let current = saved_script(&cli.prefs);
            for script in Script::ALL {
                let marker = if script == current { "*" } else { " " };
                println!("{marker} {:<11} {}", script.id(), script.label());
            }
        }
        Command::Translit { to, text } => {
            let target = to.unwrap_or_else(|| saved_script(&cli.prefs));
            let input = if text.is_empty() {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                text.join(" ")
            };
            let output = Transliterator::new().transliterate(&input, target);
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
        Command::Css {
            theme,
            book,
            scope,
            font_size,
            style_tag,
        } => {
            let model = load_theme(theme.as_deref(), &book)?;
            let sheet = generate_css(&model, &scope, font_size.as_deref());
            if style_tag {
                println!("{}", sheet.to_style_tag());
            } else {
                print!("{}", sheet.css());
            }
        }
        Command::Theme { book } => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ThemeStyleModel::default_for(book))?
            );
        }
        Command::Render {
            blocks,
            script,
            scope,
            toc,
            citations,
            theme,
            font_size,
            page,
        } => {
            let blocks: Vec<ContentBlock> = serde_json::from_str(&fs::read_to_string(&blocks)?)?;
            let mut article = ArticleRenderer::new(scope.as_str())
                .with_toc(toc)
                .render(&blocks);

            if let Some(path) = citations {
                let index = CitationIndex::from_path(path)?;
                let fetched = article.show_all_citations(&index);
                tracing::debug!(fetched, "citations resolved");
            }

            let target = script.unwrap_or_else(|| saved_script(&cli.prefs));
            let mut ctx = TransliterationContext::new(MemoryStore::new());
            ctx.hydrate();
            ctx.set_target_script(target.id());

            if page {
                let model = load_theme(theme.as_deref(), "default")?;
                let sheet = generate_css(&model, &scope, font_size.as_deref());
                print!("{}", article.to_page(&sheet, &ctx));
            } else {
                println!("{}", article.to_html_in(&ctx));
            }
        }
        Command::SetScript { script } => {
            let mut ctx = TransliterationContext::new(FileStore::new(&cli.prefs));
            ctx.hydrate();
            ctx.set_target_script(script.id());
            println!("{} ({})", script.id(), script.label());
        }
    }
    Ok(())
}

/// The script saved in the preference file, Devanagari if none.
fn saved_script(prefs: &Path) -> Script {
    let mut ctx = TransliterationContext::new(FileStore::new(prefs));
    ctx.hydrate();
    ctx.target_script()
}

fn load_theme(path: Option<&Path>, book: &str) -> lipi::Result<ThemeStyleModel> {
    match path {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(ThemeStyleModel::default_for(book)),
    }
}
