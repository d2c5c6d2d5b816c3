pub mod question;
pub mod question_type;

pub use question::{ParsedQuestion, QuestionOption};
pub use question_type::QuestionType;
