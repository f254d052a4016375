use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use skillscan_core::model::{Difficulty, Question, QuestionId};

use crate::bank;
use crate::error::GeneratorError;

use super::client::AiClient;

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

/// What to generate: a topic, a difficulty, and how many questions.
#[derive(Clone, Debug)]
pub struct GenerateRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: usize,
    pub categories: Vec<String>,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(topic: impl Into<String>, difficulty: Difficulty, question_count: usize) -> Self {
        Self {
            topic: topic.into(),
            difficulty,
            question_count,
            categories: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Category assigned to questions that do not carry their own.
    pub(crate) fn default_category(&self) -> &str {
        self.categories
            .first()
            .map(String::as_str)
            .filter(|category| !category.trim().is_empty())
            .unwrap_or("General")
    }
}

//
// ─── GENERATION ────────────────────────────────────────────────────────────────
//

impl AiClient {
    /// Generate a quiz for the request.
    ///
    /// Falls back to the built-in placeholder templates when generative
    /// features are not configured, so this path works without a network.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` when the remote call fails or the reply does
    /// not contain a usable question list.
    pub async fn generate_quiz(
        &self,
        request: &GenerateRequest,
    ) -> Result<Vec<Question>, GeneratorError> {
        if !self.enabled() {
            debug!("generative features not configured, using placeholder quiz");
            return Ok(bank::placeholder_quiz(request));
        }

        let reply = self.generate_text(&generation_prompt(request), 0.7).await?;
        parse_questions(&reply, request)
    }
}

fn generation_prompt(request: &GenerateRequest) -> String {
    format!(
        "Generate {count} multiple choice questions about {topic} at {difficulty} difficulty \
         level. Format the response as a JSON array with objects containing: id, question, \
         options (array of 4 strings), correctAnswer (index 0-3), category, and difficulty. \
         Make questions engaging and educational.",
        count = request.question_count,
        topic = request.topic,
        difficulty = request.difficulty,
    )
}

/// Pulls the first JSON array out of the reply text and validates every entry.
///
/// Models wrap the payload in prose or code fences more often than not, so
/// the array is located positionally rather than parsed from the whole reply.
fn parse_questions(
    reply: &str,
    request: &GenerateRequest,
) -> Result<Vec<Question>, GeneratorError> {
    let (Some(start), Some(end)) = (reply.find('['), reply.rfind(']')) else {
        return Err(GeneratorError::MissingQuestionList);
    };
    if end < start {
        return Err(GeneratorError::MissingQuestionList);
    }

    let raw: Vec<QuestionDto> = serde_json::from_str(&reply[start..=end])?;
    if raw.is_empty() {
        return Err(GeneratorError::EmptyQuiz);
    }

    let mut questions = Vec::with_capacity(raw.len());
    for (position, dto) in raw.into_iter().enumerate() {
        questions.push(dto.into_question(position, request)?);
    }
    Ok(questions)
}

/// One question as the model wrote it; anything the model may omit is
/// optional and filled from the request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDto {
    #[serde(default)]
    id: Option<Value>,
    question: String,
    options: Vec<String>,
    #[serde(default)]
    correct_answer: Option<usize>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

impl QuestionDto {
    fn into_question(
        self,
        position: usize,
        request: &GenerateRequest,
    ) -> Result<Question, GeneratorError> {
        // Models emit ids as either strings or numbers; synthesize from the
        // position when neither is usable.
        let id = match self.id {
            Some(Value::String(text)) if !text.trim().is_empty() => text,
            Some(Value::Number(number)) => number.to_string(),
            _ => (position + 1).to_string(),
        };
        let category = self
            .category
            .filter(|category| !category.trim().is_empty())
            .unwrap_or_else(|| request.default_category().to_owned());

        let question = Question::new(
            QuestionId::new(id),
            self.question,
            self.options,
            self.correct_answer,
            category,
            self.difficulty.unwrap_or(request.difficulty),
        )?;
        Ok(question)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
