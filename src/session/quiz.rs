//! Quiz store: question set, in-progress answers, scoring.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::QuizQuestion;

/// Lifecycle of the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// No quiz yet (or the last generation failed)
    Empty,
    /// Waiting for questions
    Loading,
    /// Questions shown, answers being picked
    InProgress,
    /// Answers locked in and scored
    Submitted,
}

/// One generated quiz and the answers picked so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    /// Questions in display order
    pub questions: Vec<QuizQuestion>,

    /// Picked option per question index
    pub answers: BTreeMap<usize, String>,

    /// Whether answers were submitted
    pub submitted: bool,
}

impl QuizSession {
    /// Start a session over freshly generated questions.
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            answers: BTreeMap::new(),
            submitted: false,
        }
    }

    /// Whether every question has an answer.
    pub fn is_complete(&self) -> bool {
        (0..self.questions.len()).all(|i| self.answers.contains_key(&i))
    }

    /// Answer picked for question `index`.
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Number of answers equal to the correct one.
    pub fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answer(*i).is_some_and(|a| q.is_correct(a)))
            .count()
    }
}

/// Permission to issue one quiz generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTicket {
    generation: u64,
}

/// Quiz store for the Quiz view.
#[derive(Debug, Clone, Default)]
pub struct QuizStore {
    session: Option<QuizSession>,
    loading: bool,
    generation: u64,
    last_error: Option<String>,
}

impl QuizStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle state.
    pub fn state(&self) -> QuizState {
        if self.loading {
            return QuizState::Loading;
        }
        match &self.session {
            None => QuizState::Empty,
            Some(s) if s.submitted => QuizState::Submitted,
            Some(_) => QuizState::InProgress,
        }
    }

    /// Current quiz, if one is loaded.
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Message from the last failed generation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Take the failure message so it is only shown once.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Whether a new quiz can be started (nothing in flight).
    pub fn can_start(&self) -> bool {
        !self.loading
    }

    /// Start a new quiz, discarding any previous one. Returns `None` while
    /// a generation is already in flight.
    pub fn start(&mut self) -> Option<QuizTicket> {
        if self.loading {
            log::debug!("Quiz generation {} still in flight", self.generation);
            return None;
        }
        self.generation += 1;
        self.session = None;
        self.loading = true;
        self.last_error = None;
        log::debug!("Quiz generation {} started", self.generation);
        Some(QuizTicket {
            generation: self.generation,
        })
    }

    /// Apply a generation result. Returns `false` if the ticket is not the
    /// one currently in flight.
    pub fn complete(&mut self, ticket: QuizTicket, result: Result<Vec<QuizQuestion>>) -> bool {
        if !self.loading || ticket.generation != self.generation {
            log::warn!("Discarding stale quiz (generation {})", ticket.generation);
            return false;
        }

        self.loading = false;
        match result {
            Ok(questions) => self.session = Some(QuizSession::new(questions)),
            Err(e) => self.last_error = Some(e.to_string()),
        }
        true
    }

    /// Record or overwrite the answer for question `index`.
    pub fn select(&mut self, index: usize, option: &str) -> Result<()> {
        if self.state() != QuizState::InProgress {
            return Err(Error::InvalidTransition(format!(
                "cannot answer while quiz is {:?}",
                self.state()
            )));
        }
        let Some(session) = self.session.as_mut() else {
            return Err(Error::InvalidTransition("no quiz loaded".into()));
        };

        let question = session.questions.get(index).ok_or_else(|| {
            Error::InvalidSelection(format!(
                "question {} does not exist (quiz has {})",
                index + 1,
                session.questions.len()
            ))
        })?;
        if !question.has_option(option) {
            return Err(Error::InvalidSelection(format!(
                "{:?} is not an option for question {}",
                option,
                index + 1
            )));
        }

        session.answers.insert(index, option.to_string());
        Ok(())
    }

    /// Whether every question has an answer and the quiz is in progress.
    pub fn can_submit(&self) -> bool {
        self.state() == QuizState::InProgress
            && self.session.as_ref().is_some_and(|s| s.is_complete())
    }

    /// Lock in the answers and return the score.
    pub fn submit(&mut self) -> Result<usize> {
        if !self.can_submit() {
            return Err(Error::InvalidTransition(
                "every question must be answered before submitting".into(),
            ));
        }
        let Some(session) = self.session.as_mut() else {
            return Err(Error::InvalidTransition("no quiz loaded".into()));
        };
        session.submitted = true;
        let score = session.correct_count();
        log::info!("Quiz submitted: {}/{}", score, session.questions.len());
        Ok(score)
    }

    /// Score, available once submitted.
    pub fn score(&self) -> Option<usize> {
        self.session
            .as_ref()
            .filter(|s| s.submitted)
            .map(QuizSession::correct_count)
    }
}
