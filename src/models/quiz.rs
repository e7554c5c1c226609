use serde::{Deserialize, Serialize};

/// Number of options on every quiz question
pub const OPTION_COUNT: usize = 4;

/// One multiple-choice question about a favorite movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub correct_option_id: u8,
}

impl QuizQuestion {
    /// Text of the option marked as correct
    pub fn correct_answer(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.id == self.correct_option_id)
            .map(|option| option.text.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizOption {
    /// 1-based position in the option list
    pub id: u8,
    pub text: String,
}
