//! Single-slot question/answer store.

/// Lifecycle of the Q&A slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QnaState {
    /// Nothing asked yet
    Idle,
    /// Waiting for an answer
    Loading,
    /// Answer available
    Answered,
}

/// The last question asked and its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QnaExchange {
    /// Question as submitted (trimmed)
    pub question: String,

    /// Answer text; empty while loading
    pub answer: String,

    /// Whether the request is still in flight
    pub loading: bool,
}

/// Permission to issue one answer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QnaTicket {
    generation: u64,
}

/// Q&A store. Only the latest exchange is retained.
#[derive(Debug, Clone, Default)]
pub struct QnaStore {
    exchange: Option<QnaExchange>,
    generation: u64,
}

impl QnaStore {
    /// Create an idle store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle state.
    pub fn state(&self) -> QnaState {
        match &self.exchange {
            None => QnaState::Idle,
            Some(e) if e.loading => QnaState::Loading,
            Some(_) => QnaState::Answered,
        }
    }

    /// Current exchange, if any.
    pub fn exchange(&self) -> Option<&QnaExchange> {
        self.exchange.as_ref()
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state() == QnaState::Loading
    }

    /// Whether `submit` would accept `question`.
    pub fn can_submit(&self, question: &str) -> bool {
        !question.trim().is_empty() && !self.is_loading()
    }

    /// Submit a question, replacing the previous exchange.
    ///
    /// Blank questions and submissions while loading are ignored.
    pub fn submit(&mut self, question: &str) -> Option<QnaTicket> {
        if !self.can_submit(question) {
            log::debug!("Ignoring question submission (blank or in flight)");
            return None;
        }

        self.generation += 1;
        self.exchange = Some(QnaExchange {
            question: question.trim().to_string(),
            answer: String::new(),
            loading: true,
        });
        Some(QnaTicket {
            generation: self.generation,
        })
    }

    /// Store the answer for a ticket. Returns `false` if it was stale.
    pub fn complete(&mut self, ticket: QnaTicket, answer: String) -> bool {
        match self.exchange.as_mut() {
            Some(e) if e.loading && ticket.generation == self.generation => {
                e.answer = answer;
                e.loading = false;
                true
            }
            _ => {
                log::warn!("Discarding stale answer");
                false
            }
        }
    }
}
