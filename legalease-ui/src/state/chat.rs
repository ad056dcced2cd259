//! Chat Transcript
//!
//! Questions are numbered on submission. An answer lands directly after its
//! own question, whatever order the responses come back in.

#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    Pending,
    Received(String),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub seq: u64,
    pub question: String,
    pub answer: Answer,
}

/// A rendered line of the conversation
#[derive(Clone, Debug, PartialEq)]
pub enum Turn {
    User(String),
    Assistant(String),
    NoAnswer,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatTranscript {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl ChatTranscript {
    /// Record a question; blank input is ignored
    pub fn begin(&mut self, input: &str) -> Option<(u64, String)> {
        let question = input.trim();
        if question.is_empty() {
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            seq,
            question: question.to_string(),
            answer: Answer::Pending,
        });
        Some((seq, question.to_string()))
    }

    pub fn complete(&mut self, seq: u64, answer: Answer) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.seq == seq) {
            entry.answer = answer;
        }
    }

    pub fn pending(&self) -> bool {
        self.entries.iter().any(|e| e.answer == Answer::Pending)
    }

    pub fn turns(&self) -> Vec<Turn> {
        let mut turns = Vec::new();
        for entry in &self.entries {
            turns.push(Turn::User(entry.question.clone()));
            match &entry.answer {
                Answer::Received(text) => turns.push(Turn::Assistant(text.clone())),
                Answer::Failed(_) => turns.push(Turn::NoAnswer),
                Answer::Pending => {}
            }
        }
        turns
    }
}
