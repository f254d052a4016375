//! Built-in question sets.
//!
//! The career assessment ships with the crate so a quiz can always start,
//! even with generation disabled and no backend reachable. The placeholder
//! templates stand in for generated quizzes in the same situation.

use rand::Rng;
use rand::seq::SliceRandom;

use skillscan_core::model::{Difficulty, Question, QuestionId};

use crate::ai::GenerateRequest;

/// The five-question career assessment, one question per skill category.
#[must_use]
pub fn assessment_bank() -> Vec<Question> {
    vec![
        build(
            "1",
            "When faced with a complex problem, what's your first approach?",
            [
                "Break it down into smaller, manageable parts",
                "Research similar problems and solutions",
                "Brainstorm creative alternative approaches",
                "Gather a team to discuss different perspectives",
            ],
            Some(0),
            "analytical",
        ),
        build(
            "2",
            "Which activity energizes you the most?",
            [
                "Coding or working with technical systems",
                "Analyzing data and finding patterns",
                "Creating visual designs or content",
                "Leading meetings and motivating teams",
            ],
            Some(0),
            "technical",
        ),
        build(
            "3",
            "How do you prefer to learn new skills?",
            [
                "Hands-on practice and experimentation",
                "Reading comprehensive documentation",
                "Visual tutorials and examples",
                "Group discussions and peer learning",
            ],
            Some(0),
            "communication",
        ),
        build(
            "4",
            "What type of work environment motivates you most?",
            [
                "Quiet, focused individual work",
                "Collaborative team projects",
                "Dynamic, fast-paced challenges",
                "Structured, goal-oriented tasks",
            ],
            Some(1),
            "leadership",
        ),
        build(
            "5",
            "When presenting ideas, you typically:",
            [
                "Use data and logical arguments",
                "Tell stories and use analogies",
                "Create visual presentations",
                "Facilitate group discussions",
            ],
            Some(2),
            "creative",
        ),
    ]
}

/// Template questions standing in for a generated quiz.
///
/// Alternates two generic prompts around the requested topic, carrying the
/// request's difficulty and default category.
#[must_use]
pub fn placeholder_quiz(request: &GenerateRequest) -> Vec<Question> {
    let category = request.default_category();
    (0..request.question_count)
        .map(|index| {
            let id = (index + 1).to_string();
            let question = if index % 2 == 0 {
                Question::new(
                    QuestionId::new(id),
                    format!("What is a key concept in {}?", request.topic),
                    vec![
                        "Option A (Placeholder)".to_owned(),
                        "Option B (Placeholder)".to_owned(),
                        "Option C (Placeholder)".to_owned(),
                        "Option D (Placeholder)".to_owned(),
                    ],
                    Some(0),
                    category,
                    request.difficulty,
                )
            } else {
                Question::new(
                    QuestionId::new(id),
                    format!("Which of the following best describes {}?", request.topic),
                    vec![
                        "Description A (Placeholder)".to_owned(),
                        "Description B (Placeholder)".to_owned(),
                        "Description C (Placeholder)".to_owned(),
                        "Description D (Placeholder)".to_owned(),
                    ],
                    Some(1),
                    category,
                    request.difficulty,
                )
            };
            question.expect("placeholder question is valid")
        })
        .collect()
}

/// Draws up to `count` questions in random order.
///
/// Callers own the randomness; pass `&mut rand::rng()` for an ambient draw or
/// a seeded `StdRng` for a reproducible one.
#[must_use]
pub fn draw<R: Rng>(mut questions: Vec<Question>, count: usize, rng: &mut R) -> Vec<Question> {
    questions.as_mut_slice().shuffle(rng);
    questions.truncate(count);
    questions
}

fn build(
    id: &str,
    prompt: &str,
    options: [&str; 4],
    correct_option: Option<usize>,
    category: &str,
) -> Question {
    Question::new(
        QuestionId::new(id),
        prompt,
        options.iter().map(|&option| option.to_owned()).collect(),
        correct_option,
        category,
        Difficulty::Medium,
    )
    .expect("built-in question is valid")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
