//! Interactive session loop.
//!
//! Gateway requests run as tasks on a current-thread runtime; their
//! completions come back over a channel while the loop keeps reading input.

use std::io::Write;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use reportlens::gateway::Gateway;
use reportlens::session::{Completion, Request, Session};
use reportlens::{Viewer, ViewMode};

use crate::display::{parse_letter, render_view};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View(ViewMode),
    Search(String),
    Next,
    Prev,
    Go(usize),
    Ask(String),
    NewQuiz,
    Pick { question: usize, option: usize },
    Submit,
    Help,
    Quit,
}

impl Command {
    /// Parse one line of input.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "report" | "summaries" | "summary" | "qa" | "q&a" | "qna" | "quiz" => word
                .parse::<ViewMode>()
                .map(Command::View)
                .map_err(|e| e.to_string()),
            "search" | "/" => Ok(Command::Search(rest.to_string())),
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "go" => rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(|n| Command::Go(n - 1))
                .ok_or_else(|| "Usage: go <section number>".to_string()),
            "ask" if !rest.is_empty() => Ok(Command::Ask(rest.to_string())),
            "ask" => Err("Usage: ask <question>".to_string()),
            "new" => Ok(Command::NewQuiz),
            "pick" => parse_pick(rest),
            "submit" => Ok(Command::Submit),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(String::new()),
            other => Err(format!("Unknown command: {} (type `help`)", other)),
        }
    }
}

fn parse_pick(args: &str) -> Result<Command, String> {
    let usage = || "Usage: pick <question number> <option letter>".to_string();
    let mut parts = args.split_whitespace();
    let question = parts
        .next()
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(usage)?;
    let option = parts.next().and_then(parse_letter).ok_or_else(usage)?;
    if parts.next().is_some() {
        return Err(usage());
    }
    Ok(Command::Pick {
        question: question - 1,
        option,
    })
}

/// Run the interactive loop until `quit` or end of input.
pub fn run(viewer: Viewer) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(viewer))
}

async fn run_loop(viewer: Viewer) -> Result<(), Box<dyn std::error::Error>> {
    let (mut session, gateway) = viewer.into_parts();
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !gateway.is_configured() {
        println!(
            "{}",
            "No API key configured; AI features will report an error.".yellow()
        );
    }
    print_help();
    render_view(&session);
    prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Some(request) = execute(&mut session, command) {
                            dispatch(request, &gateway, &tx);
                        }
                    }
                    Err(message) if message.is_empty() => {}
                    Err(message) => println!("{}", message.yellow()),
                }
                prompt()?;
            }
            Some(completion) = rx.recv() => {
                on_completion(&mut session, completion);
                prompt()?;
            }
        }
    }

    Ok(())
}

/// Apply a command; returns the gateway call it needs, if any.
fn execute(session: &mut Session, command: Command) -> Option<Request> {
    let request = match command {
        Command::View(mode) => session.navigate(mode),
        Command::Search(term) => {
            session.set_search(term);
            None
        }
        Command::Next | Command::Prev | Command::Go(_) => {
            if session.mode() != ViewMode::Summaries {
                if let Some(request) = session.navigate(ViewMode::Summaries) {
                    render_view(session);
                    return Some(request);
                }
            }
            if session.summaries().is_current_loading() {
                println!("{}", "Wait for the current summary to finish.".yellow());
                return None;
            }
            match command {
                Command::Next => session.next_section(),
                Command::Prev => session.prev_section(),
                Command::Go(index) => match session.go_to_section(index) {
                    Ok(request) => request,
                    Err(e) => {
                        println!("{}", e.to_string().yellow());
                        return None;
                    }
                },
                _ => None,
            }
        }
        Command::Ask(question) => {
            session.navigate(ViewMode::Qna);
            let request = session.ask(&question);
            if request.is_none() {
                println!("{}", "Wait for the current answer to finish.".yellow());
            }
            request
        }
        Command::NewQuiz => {
            session.navigate(ViewMode::Quiz);
            if !session.quiz().can_start() {
                println!("{}", "Wait for the current quiz to finish.".yellow());
                return None;
            }
            session.start_quiz()
        }
        Command::Pick { question, option } => {
            session.navigate(ViewMode::Quiz);
            let text = session
                .quiz()
                .session()
                .and_then(|q| q.questions.get(question))
                .and_then(|q| q.options.get(option))
                .cloned();
            let result = match text {
                Some(text) => session.select_answer(question, &text),
                None => Err(reportlens::Error::InvalidSelection(format!(
                    "no option {} for question {}",
                    crate::display::option_letter(option),
                    question + 1
                ))),
            };
            if let Err(e) = result {
                println!("{}", e.to_string().yellow());
                return None;
            }
            None
        }
        Command::Submit => {
            session.navigate(ViewMode::Quiz);
            if !session.quiz().can_submit() {
                println!("{}", "Answer every question before submitting.".yellow());
                return None;
            }
            if let Err(e) = session.submit_quiz() {
                println!("{}", e.to_string().yellow());
                return None;
            }
            None
        }
        Command::Help => {
            print_help();
            return None;
        }
        Command::Quit => return None,
    };

    render_view(session);
    request
}

fn dispatch(request: Request, gateway: &Gateway, tx: &mpsc::UnboundedSender<Completion>) {
    log::debug!("{}", request.describe());
    let gateway = gateway.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let completion = request.run(&gateway).await;
        if tx.send(completion).is_err() {
            log::debug!("Session closed before a request finished");
        }
    });
}

fn completion_view(completion: &Completion) -> ViewMode {
    match completion {
        Completion::Summary { .. } => ViewMode::Summaries,
        Completion::Answer { .. } => ViewMode::Qna,
        Completion::Quiz { .. } => ViewMode::Quiz,
    }
}

fn on_completion(session: &mut Session, completion: Completion) {
    let view = completion_view(&completion);
    if !session.apply(completion) {
        return;
    }

    if let Some(error) = session.quiz_mut().take_error() {
        println!();
        println!("{}: {}", "Error".red().bold(), error);
    }

    if session.mode() == view {
        render_view(session);
    } else {
        println!();
        println!("{} {}", view.label().cyan(), "is ready.".dimmed());
    }
}

fn prompt() -> std::io::Result<()> {
    print!("{} ", ">".green().bold());
    std::io::stdout().flush()
}

fn print_help() {
    println!("{}", "Commands".cyan().bold());
    println!("  report | summaries | qa | quiz   switch view");
    println!("  search <term>                    filter the report (empty clears)");
    println!("  next | prev | go <n>             move between summaries");
    println!("  ask <question>                   ask about the report");
    println!("  new                              generate a new quiz");
    println!("  pick <n> <letter>                answer quiz question n");
    println!("  submit                           score the quiz");
    println!("  help | quit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportlens::Document;

    const REPORT: &str = "## Abstract\nabs\n## I. X\nfoo\n## II. Y\nbar\n";

    #[test]
    fn test_parse_views() {
        assert_eq!(Command::parse("report"), Ok(Command::View(ViewMode::Report)));
        assert_eq!(Command::parse(" QA "), Ok(Command::View(ViewMode::Qna)));
        assert_eq!(Command::parse("quiz"), Ok(Command::View(ViewMode::Quiz)));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            Command::parse("search  solar power "),
            Ok(Command::Search("solar power".into()))
        );
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(
            Command::parse("ask why storage?"),
            Ok(Command::Ask("why storage?".into()))
        );
        assert!(Command::parse("ask   ").is_err());
        assert_eq!(Command::parse("go 2"), Ok(Command::Go(1)));
        assert!(Command::parse("go 0").is_err());
    }

    #[test]
    fn test_parse_pick() {
        assert_eq!(
            Command::parse("pick 3 c"),
            Ok(Command::Pick {
                question: 2,
                option: 2
            })
        );
        assert!(Command::parse("pick 0 a").is_err());
        assert!(Command::parse("pick 1").is_err());
        assert!(Command::parse("pick 1 a b").is_err());
    }

    #[test]
    fn test_parse_unknown_and_blank() {
        assert_eq!(Command::parse("   "), Err(String::new()));
        assert!(Command::parse("dance").unwrap_err().contains("Unknown command"));
    }

    #[test]
    fn test_execute_next_enters_summaries() {
        colored::control::set_override(false);
        let mut session = Session::new(Document::new(REPORT));

        // First visit requests the abstract instead of moving on
        let request = execute(&mut session, Command::Next);
        assert!(matches!(request, Some(Request::Summary { .. })));
        assert_eq!(session.mode(), ViewMode::Summaries);
        assert_eq!(session.summaries().cursor(), 0);

        // Moving is blocked while it loads
        assert!(execute(&mut session, Command::Next).is_none());
        assert_eq!(session.summaries().cursor(), 0);
    }

    #[test]
    fn test_execute_ask_switches_to_qna() {
        colored::control::set_override(false);
        let mut session = Session::new(Document::new(REPORT));
        let request = execute(&mut session, Command::Ask("what is foo?".into()));
        assert!(matches!(request, Some(Request::Answer { .. })));
        assert_eq!(session.mode(), ViewMode::Qna);
    }

    #[test]
    fn test_execute_new_quiz_while_generating() {
        colored::control::set_override(false);
        let mut session = Session::new(Document::new(REPORT));

        let request = execute(&mut session, Command::NewQuiz);
        assert!(matches!(request, Some(Request::Quiz { .. })));
        assert!(execute(&mut session, Command::NewQuiz).is_none());
        assert_eq!(session.mode(), ViewMode::Quiz);
    }
}
