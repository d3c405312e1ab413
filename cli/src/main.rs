//! reportlens CLI - report viewer with AI summaries, Q&A, and quizzes

mod display;
mod repl;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use reportlens::render::{render_report, to_json};
use reportlens::session::QuizState;
use reportlens::{
    Document, GatewayConfig, JsonFormat, ReportFormat, ReportLens, SectionOptions, Viewer,
};

use display::{option_letter, parse_letter, print_quiz, print_section, spinner};

/// Report shown when no file is given.
const BUNDLED_REPORT: &str = include_str!("../assets/report.md");

#[derive(Parser)]
#[command(name = "reportlens")]
#[command(version)]
#[command(about = "Read a report with AI summaries, Q&A, and quizzes", long_about = None)]
struct Cli {
    /// Report file (Markdown); the bundled report if not specified
    #[arg(short, long, global = true, value_name = "FILE")]
    file: Option<PathBuf>,

    /// API key for the language model
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier
    #[arg(long, global = true, env = "REPORTLENS_MODEL")]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "60")]
    timeout: u64,

    /// Literal text that ends the abstract (defaults to the next heading)
    #[arg(long, global = true, value_name = "MARKER")]
    abstract_end: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the report's sections
    Sections {
        /// Print sections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the report, optionally filtered by a search term
    Show {
        /// Only show sections containing this term, with matches highlighted
        #[arg(short, long)]
        search: Option<String>,

        /// Print HTML fragments instead of terminal text
        #[arg(long)]
        html: bool,
    },

    /// Summarize one section
    Summarize {
        /// Section number (1-based) or title
        #[arg(value_name = "SECTION")]
        section: String,
    },

    /// Ask a question about the report
    Ask {
        /// The question
        #[arg(value_name = "QUESTION", num_args = 1.., required = true)]
        question: Vec<String>,
    },

    /// Generate a five-question quiz and take it
    Quiz {
        /// Print the questions with answers instead of asking them
        #[arg(long)]
        reveal: bool,
    },

    /// Show report information
    Info,

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match open_viewer(&cli) {
        Ok(viewer) => match cli.command {
            Some(Commands::Sections { json }) => cmd_sections(&viewer, json),
            Some(Commands::Show { search, html }) => cmd_show(viewer, search, html),
            Some(Commands::Summarize { section }) => cmd_summarize(viewer, &section),
            Some(Commands::Ask { question }) => cmd_ask(viewer, &question.join(" ")),
            Some(Commands::Quiz { reveal }) => cmd_quiz(viewer, reveal),
            Some(Commands::Info) => cmd_info(&viewer, cli.file.as_deref()),
            Some(Commands::Version) => {
                cmd_version();
                Ok(())
            }
            None => repl::run(viewer),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn open_viewer(cli: &Cli) -> Result<Viewer, Box<dyn std::error::Error>> {
    let document = match &cli.file {
        Some(path) => Document::from_file(path)?,
        None => Document::new(BUNDLED_REPORT),
    };

    let mut config = GatewayConfig::from_env().with_timeout(cli.timeout);
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key.as_str());
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model.as_str());
    }

    let mut options = SectionOptions::new();
    if let Some(marker) = &cli.abstract_end {
        options = options.with_abstract_end_marker(marker.as_str());
    }

    let viewer = ReportLens::new()
        .with_section_options(options)
        .with_gateway_config(config)
        .open(document)?;
    Ok(viewer)
}

fn runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

fn cmd_sections(viewer: &Viewer, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let sections = viewer.session().sections();

    if json {
        println!("{}", to_json(sections, JsonFormat::Pretty)?);
        return Ok(());
    }

    for (i, section) in sections.iter().enumerate() {
        let words = section.content.split_whitespace().count();
        println!(
            "{:>3}. {} {}",
            i + 1,
            section.title.bold(),
            format!("({} words)", words).dimmed()
        );
    }

    Ok(())
}

fn cmd_show(
    mut viewer: Viewer,
    search: Option<String>,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = viewer.session_mut();
    if let Some(term) = search {
        session.set_search(term);
    }

    let term = session.view().search().to_string();
    let sections = session.report_sections();

    if html {
        println!("{}", render_report(&sections, &term, ReportFormat::Html));
        return Ok(());
    }

    if sections.is_empty() {
        println!("{} {:?}", "No sections match".yellow(), term);
        return Ok(());
    }

    for section in sections {
        print_section(section, &term);
    }

    Ok(())
}

fn cmd_summarize(mut viewer: Viewer, section: &str) -> Result<(), Box<dyn std::error::Error>> {
    let index = resolve_section(viewer.session().sections(), section)
        .ok_or_else(|| format!("No section matches {:?}", section))?;

    let Some(request) = viewer.session_mut().go_to_section(index)? else {
        return Err("Section summary was already requested".into());
    };

    let pb = spinner(request.describe());
    runtime()?.block_on(viewer.resolve(request));
    pb.finish_and_clear();

    let store = viewer.session().summaries();
    if let (Some(section), Some(entry)) = (store.current(), store.current_entry()) {
        println!("{}", section.title.cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", entry.text);
    }

    Ok(())
}

/// Resolve a 1-based number or a case-insensitive title.
fn resolve_section(sections: &[reportlens::Section], query: &str) -> Option<usize> {
    let query = query.trim();
    if let Ok(n) = query.parse::<usize>() {
        return (1..=sections.len()).contains(&n).then(|| n - 1);
    }
    let lower = query.to_lowercase();
    sections
        .iter()
        .position(|s| s.title.to_lowercase() == lower)
        .or_else(|| {
            sections
                .iter()
                .position(|s| s.title.to_lowercase().contains(&lower))
        })
}

fn cmd_ask(mut viewer: Viewer, question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let request = viewer
        .session_mut()
        .ask(question)
        .ok_or("Question is empty")?;

    let pb = spinner(request.describe());
    runtime()?.block_on(viewer.resolve(request));
    pb.finish_and_clear();

    if let Some(exchange) = viewer.session().qna().exchange() {
        println!("{} {}", "Q:".bold(), exchange.question);
        println!("{} {}", "A:".bold(), exchange.answer);
    }

    Ok(())
}

fn cmd_quiz(mut viewer: Viewer, reveal: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(request) = viewer.session_mut().start_quiz() else {
        return Err("A quiz is already being generated".into());
    };

    let pb = spinner(request.describe());
    runtime()?.block_on(viewer.resolve(request));
    pb.finish_and_clear();

    let session = viewer.session_mut();
    if let Some(error) = session.quiz_mut().take_error() {
        return Err(error.into());
    }

    let count = match session.quiz().session() {
        Some(quiz) if reveal => {
            print_quiz(quiz, true);
            return Ok(());
        }
        Some(quiz) => quiz.questions.len(),
        None => return Err("No quiz was generated".into()),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for index in 0..count {
        loop {
            let Some(question) = session.quiz().session().and_then(|q| q.questions.get(index))
            else {
                break;
            };

            println!("{} {}", format!("{}.", index + 1).bold(), question.question);
            for (j, option) in question.options.iter().enumerate() {
                println!("   {}) {}", option_letter(j), option);
            }
            print!("{} ", "Answer:".bold());
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                return Err("Quiz aborted".into());
            };
            let line = line?;

            let option = parse_letter(&line).and_then(|j| question.options.get(j).cloned());
            match option {
                Some(option) => {
                    session.select_answer(index, &option)?;
                    println!();
                    break;
                }
                None => println!("{}", "Pick one of the option letters.".yellow()),
            }
        }
    }

    let score = session.submit_quiz()?;
    debug_assert_eq!(session.quiz().state(), QuizState::Submitted);

    if let Some(quiz) = session.quiz().session() {
        print_quiz(quiz, true);
        println!(
            "{} {}/{}",
            "Score:".green().bold(),
            score,
            quiz.questions.len()
        );
    }

    Ok(())
}

fn cmd_info(viewer: &Viewer, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let session = viewer.session();
    let metadata = session.document().metadata();

    println!("{}", "Report Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    match file {
        Some(path) => println!("{}: {}", "File".bold(), path.display()),
        None => println!("{}: (bundled)", "File".bold()),
    }
    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    println!("{}: {}", "Sections".bold(), session.sections().len());
    println!("{}: {}", "Headings".bold(), metadata.heading_count);
    println!("{}: {}", "Words".bold(), metadata.word_count);
    println!("{}: {}", "Characters".bold(), metadata.char_count);

    println!();
    println!("{}", "Language Model".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    match viewer.gateway().model_name() {
        Some(model) => {
            println!("{}: {}", "Model".bold(), model);
            println!("{}: {}", "AI features".bold(), "enabled".green());
        }
        None => {
            println!("{}: {}", "AI features".bold(), "disabled".yellow());
            println!("Set GEMINI_API_KEY or pass --api-key to enable them.");
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "reportlens".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Report viewer with AI summaries, Q&A, and quizzes");
    println!();
    println!("License: MIT");
}
