use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// A value the API sends either as a JSON number or a string.
/// The received shape is kept so it is echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

pub type EvaluationId = Scalar;

/// Listing entry returned by `GET /evaluations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    #[serde(rename = "ID")]
    pub id: EvaluationId,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// One generated output under review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub model_name: String,
    pub parameters: Scalar,
    pub output: String,
}

impl ModelOutput {
    /// Heading shown above the output, e.g. `llama (7B)`
    pub fn heading(&self) -> String {
        format!("{} ({})", self.model_name, self.parameters)
    }
}

/// A level on the 1-5 ordinal scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Likert(u8);

impl Likert {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Likert {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Likert::new(value).ok_or_else(|| format!("Likert value must be between 1 and 5, got {}", value))
    }
}

impl From<Likert> for u8 {
    fn from(level: Likert) -> Self {
        level.0
    }
}

/// Agreement labels used for the four rating questions, highest first
pub const AGREEMENT_LABELS: [&str; 5] = [
    "Strongly Agree",
    "Agree",
    "Neutral",
    "Disagree",
    "Strongly Disagree",
];

/// Self-assessed experience with domain specific languages, highest first
pub const DSL_EXPERIENCE_LABELS: [&str; 5] = [
    "Expert: I am highly proficient, have in-depth knowledge, and use them frequently.",
    "Advanced: I have extensive experience and use them regularly.",
    "Intermediate: I have moderate experience; I understand key concepts and have used them in some projects.",
    "Beginner: I have some basic understanding or have used them a few times.",
    "No Experience: I have no experience with Domain Specific Languages.",
];

/// How often the reviewer uses LLMs, highest first
pub const LLM_USAGE_LABELS: [&str; 5] = [
    "Very Frequently: I use LLMs like ChatGPT daily or almost daily.",
    "Frequently: I use LLMs like ChatGPT several times a week.",
    "Occasionally: I use LLMs like ChatGPT monthly or a few times a month.",
    "Rarely: I use LLMs like ChatGPT a few times a year or less.",
    "Never: I never use LLMs like ChatGPT.",
];

/// Map a position in one of the label tables (highest first) to its level
pub fn level_for_label_index(index: usize) -> Option<Likert> {
    let value = u8::try_from(index).ok()?;
    Likert::MAX.checked_sub(value).and_then(Likert::new)
}

/// Position of a level in one of the label tables
pub fn label_index_for_level(level: Likert) -> usize {
    usize::from(Likert::MAX - level.value())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "18–25")]
    From18To25,
    #[serde(rename = "26–35")]
    From26To35,
    #[serde(rename = "36–45")]
    From36To45,
    #[serde(rename = "46–60")]
    From46To60,
    #[serde(rename = "60+")]
    Over60,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::From18To25,
        AgeGroup::From26To35,
        AgeGroup::From36To45,
        AgeGroup::From46To60,
        AgeGroup::Over60,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::From18To25 => "18–25",
            AgeGroup::From26To35 => "26–35",
            AgeGroup::From36To45 => "36–45",
            AgeGroup::From46To60 => "46–60",
            AgeGroup::Over60 => "60+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Other, Gender::PreferNotToSay];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }
}

/// Demographic and experience answers, stamped when the reviewer starts rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewerInfo {
    pub reviewer_id: Uuid,
    #[serde(rename = "age")]
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub dsl_experience: Likert,
    pub llm_usage: Likert,
    pub known_llms: BTreeSet<String>,
    pub timestamp: DateTime<Utc>,
}

/// The four rating questions asked for every model output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub semantic: Option<Likert>,
    pub concept: Option<Likert>,
    pub complete: Option<Likert>,
    pub advanced: Option<Likert>,
}

impl Ratings {
    /// Question labels paired with their wire keys, in display order
    pub const QUESTIONS: [(&'static str, &'static str); 4] = [
        ("Semantic Correctness", "semantic"),
        ("Concept Identification Quality", "concept"),
        ("Completeness of Model", "complete"),
        ("Use of Advanced Features", "advanced"),
    ];

    pub fn is_complete(&self) -> bool {
        self.semantic.is_some() && self.concept.is_some() && self.complete.is_some() && self.advanced.is_some()
    }

    pub fn get(&self, key: &str) -> Option<Likert> {
        match key {
            "semantic" => self.semantic,
            "concept" => self.concept,
            "complete" => self.complete,
            "advanced" => self.advanced,
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, level: Option<Likert>) {
        match key {
            "semantic" => self.semantic = level,
            "concept" => self.concept = level,
            "complete" => self.complete = level,
            "advanced" => self.advanced = level,
            _ => {}
        }
    }
}

/// One reviewer's rating of one model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub model_name: String,
    pub parameters: Scalar,
    #[serde(flatten)]
    pub ratings: Ratings,
    /// Sent as `null` when absent so every response carries the same keys
    #[serde(default)]
    pub general_comment: Option<String>,
}

impl Response {
    pub fn is_complete(&self) -> bool {
        self.ratings.is_complete()
    }

    /// Whether both responses rate the same (model_name, parameters) pair
    pub fn same_model(&self, other: &Response) -> bool {
        self.model_name == other.model_name && self.parameters == other.parameters
    }

    pub fn rates(&self, model: &ModelOutput) -> bool {
        self.model_name == model.model_name && self.parameters == model.parameters
    }
}

/// Keep only responses that carry all four ratings
pub fn complete_only(responses: &[Response]) -> Vec<Response> {
    responses.iter().filter(|r| r.is_complete()).cloned().collect()
}

/// In-progress feedback for one reviewer and one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub reviewer_info: ReviewerInfo,
    pub evaluation_id: EvaluationId,
    pub responses: Vec<Response>,
}

impl FeedbackDraft {
    pub fn new(reviewer_info: ReviewerInfo, evaluation_id: EvaluationId) -> Self {
        Self {
            reviewer_info,
            evaluation_id,
            responses: Vec::new(),
        }
    }

    /// Replace any earlier response for the same model, then append
    pub fn upsert(&mut self, response: Response) {
        self.responses.retain(|existing| !existing.same_model(&response));
        self.responses.push(response);
    }

    pub fn response_for(&self, model: &ModelOutput) -> Option<&Response> {
        self.responses.iter().find(|r| r.rates(model))
    }

    /// Payload for `POST /submit_feedback`, or `None` when nothing is complete
    pub fn submission(&self) -> Option<FeedbackPayload<'_>> {
        let responses = complete_only(&self.responses);
        if responses.is_empty() {
            return None;
        }
        Some(FeedbackPayload {
            evaluation_id: &self.evaluation_id,
            reviewer_info: &self.reviewer_info,
            responses,
        })
    }
}

/// Body of `POST /submit_feedback`
#[derive(Debug, Serialize)]
pub struct FeedbackPayload<'a> {
    pub evaluation_id: &'a EvaluationId,
    pub reviewer_info: &'a ReviewerInfo,
    pub responses: Vec<Response>,
}
