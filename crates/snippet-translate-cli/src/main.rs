mod config;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use snippet_translate::{Language, Translator, ir};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Translate a code snippet between Python, JavaScript and Java.
#[derive(Parser)]
#[command(name = "snippet-translate", version)]
struct Cli {
    /// Input source file, use - for stdin
    input: PathBuf,

    /// Source language (required when using stdin, auto-detect from extension otherwise)
    #[arg(short, long)]
    from: Option<LanguageArg>,

    /// Target language
    #[arg(short, long, required_unless_present = "dump_ir")]
    to: Option<LanguageArg>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the IR as JSON instead of generated code
    #[arg(long)]
    dump_ir: bool,

    /// TOML file declaring external parser collaborators
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log reader/writer decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    /// Python
    #[value(name = "py", alias = "python")]
    Python,
    /// JavaScript
    #[value(name = "js", alias = "javascript")]
    JavaScript,
    /// Java
    Java,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Python => Language::Python,
            LanguageArg::JavaScript => Language::JavaScript,
            LanguageArg::Java => Language::Java,
        }
    }
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: restores the default disposition of SIGPIPE; no memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn detect_language(path: &Path) -> Result<Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
        .with_context(|| {
            format!(
                "cannot detect language of {} from its extension, use --from",
                path.display()
            )
        })
}

fn run(cli: Cli) -> Result<()> {
    let translator = match &cli.config {
        Some(path) => config::Config::load(path)?.translator()?,
        None => Translator::new(),
    };

    let is_stdin = cli.input.as_os_str() == "-";
    let source = if is_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(&cli.input)
            .with_context(|| format!("failed to read {}", cli.input.display()))?
    };

    let from = match cli.from {
        Some(lang) => lang.into(),
        None if is_stdin => bail!("--from is required when reading from stdin"),
        None => detect_language(&cli.input)?,
    };

    let ir = translator
        .parse(&source, from)
        .with_context(|| format!("failed to parse {} as {}", cli.input.display(), from.name()))?;

    let (text, target) = match cli.to.map(Language::from) {
        Some(to) if !cli.dump_ir => {
            let code = translator
                .generate(&ir, to)
                .with_context(|| format!("failed to generate {}", to.name()))?;
            (code, to.tag())
        }
        _ => {
            let mut json = ir::to_json(&ir).context("failed to encode IR")?;
            json.push('\n');
            (json, "ir")
        }
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Translated {} -> {} ({})",
                cli.input.display(),
                path.display(),
                target
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
