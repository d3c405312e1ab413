//! Terminal rendering shared by the one-shot commands and the interactive loop.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use reportlens::render::match_ranges;
use reportlens::session::{QuizSession, QuizState, Session};
use reportlens::{Section, ViewMode};

/// Spinner shown while a gateway call is in flight.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Paint every case-insensitive match of `term` in `text`.
pub fn paint_matches(text: &str, term: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for range in match_ranges(text, term) {
        output.push_str(&text[last..range.start]);
        output.push_str(&text[range.clone()].black().on_yellow().to_string());
        last = range.end;
    }
    output.push_str(&text[last..]);
    output
}

/// Print one section of the Report view.
pub fn print_section(section: &Section, term: &str) {
    println!("{}", paint_matches(&section.title, term).cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", paint_matches(section.content.trim(), term));
    println!();
}

/// Letter label for an option index (`0 -> A`).
pub fn option_letter(index: usize) -> char {
    (b'A' + (index as u8 % 26)) as char
}

/// Option index for a letter label, case-insensitive.
pub fn parse_letter(s: &str) -> Option<usize> {
    let mut chars = s.trim().chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !c.is_ascii_uppercase() {
        return None;
    }
    Some((c as u8 - b'A') as usize)
}

/// Print a quiz. With `reveal`, mark correct answers and the picks.
pub fn print_quiz(quiz: &QuizSession, reveal: bool) {
    for (i, question) in quiz.questions.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).bold(), question.question);
        let picked = quiz.answer(i);
        for (j, option) in question.options.iter().enumerate() {
            let label = format!("   {}) {}", option_letter(j), option);
            let is_pick = picked == Some(option.as_str());
            let line = if reveal && question.is_correct(option) {
                label.green().bold().to_string()
            } else if reveal && is_pick {
                label.red().to_string()
            } else if is_pick {
                label.cyan().to_string()
            } else {
                label
            };
            println!("{}", line);
        }
        println!();
    }
}

/// Menu line with the active view highlighted.
pub fn print_menu(active: ViewMode) {
    let items: Vec<String> = ViewMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                format!("[{}]", mode.label()).cyan().bold().to_string()
            } else {
                mode.label().dimmed().to_string()
            }
        })
        .collect();
    println!("{}", items.join("  "));
}

/// Print whatever the active view shows.
pub fn render_view(session: &Session) {
    println!();
    print_menu(session.mode());
    println!();

    match session.mode() {
        ViewMode::Report => render_report(session),
        ViewMode::Summaries => render_summaries(session),
        ViewMode::Qna => render_qna(session),
        ViewMode::Quiz => render_quiz(session),
    }
}

fn render_report(session: &Session) {
    let term = session.view().search();
    let sections = session.report_sections();

    if !term.trim().is_empty() {
        println!(
            "{} {:?} ({} of {} sections)",
            "Search:".bold(),
            term,
            sections.len(),
            session.sections().len()
        );
        println!();
    }

    if sections.is_empty() {
        println!("{}", "No sections match the search term.".yellow());
        return;
    }

    for section in sections {
        print_section(section, term);
    }
}

fn render_summaries(session: &Session) {
    let store = session.summaries();
    let Some(section) = store.current() else {
        println!("{}", "The report has no sections.".yellow());
        return;
    };

    println!(
        "{} {}",
        format!("Section {}/{}:", store.cursor() + 1, store.len()).dimmed(),
        section.title.cyan().bold()
    );
    println!("{}", "─".repeat(40).dimmed());

    match store.current_entry() {
        Some(entry) if entry.loading => println!("{}", "Generating summary...".yellow()),
        Some(entry) => println!("{}", entry.text),
        None => println!("{}", "Not summarized yet.".dimmed()),
    }

    println!();
    let prev = if store.can_prev() { "prev".normal() } else { "prev".dimmed() };
    let next = if store.can_next() { "next".normal() } else { "next".dimmed() };
    println!("{} | {}", prev, next);
}

fn render_qna(session: &Session) {
    match session.qna().exchange() {
        None => println!("{}", "Ask a question about the report: ask <question>".dimmed()),
        Some(exchange) => {
            println!("{} {}", "Q:".bold(), exchange.question);
            if exchange.loading {
                println!("{} {}", "A:".bold(), "Thinking...".yellow());
            } else {
                println!("{} {}", "A:".bold(), exchange.answer);
            }
        }
    }
}

fn render_quiz(session: &Session) {
    let store = session.quiz();
    match store.state() {
        QuizState::Empty => {
            if let Some(error) = store.last_error() {
                println!("{}: {}", "Error".red().bold(), error);
            }
            println!("{}", "Type `new` to generate a quiz.".dimmed());
        }
        QuizState::Loading => println!("{}", "Generating quiz...".yellow()),
        QuizState::InProgress => {
            if let Some(quiz) = store.session() {
                print_quiz(quiz, false);
                println!(
                    "{} {}/{}",
                    "Answered:".bold(),
                    quiz.answers.len(),
                    quiz.questions.len()
                );
                if store.can_submit() {
                    println!("{}", "All questions answered. Type `submit`.".green());
                }
            }
        }
        QuizState::Submitted => {
            if let Some(quiz) = store.session() {
                print_quiz(quiz, true);
                println!(
                    "{} {}/{}",
                    "Score:".green().bold(),
                    quiz.correct_count(),
                    quiz.questions.len()
                );
            }
        }
    }
}
