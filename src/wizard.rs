use crate::client::{EvaluationClient, SubmitStatus};
use crate::drafts::DraftStore;
use crate::error::{Result, SurveyError};
use crate::models::{
    AgeGroup, EvaluationId, EvaluationSummary, FeedbackDraft, Gender, Likert, ModelOutput, Ratings,
    Response, ReviewerInfo,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// The four survey steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    SelectEvaluation,
    ParticipantInfo,
    RateOutputs,
    ThankYou,
}

/// How many model outputs are shown per rating page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    Fixed(usize),
    /// Every model on one page
    All,
}

impl PageSize {
    pub const CHOICES: [PageSize; 6] = [
        PageSize::Fixed(5),
        PageSize::Fixed(10),
        PageSize::Fixed(20),
        PageSize::Fixed(50),
        PageSize::Fixed(100),
        PageSize::All,
    ];

    pub fn resolve(self, total: usize) -> usize {
        match self {
            PageSize::Fixed(n) => n,
            PageSize::All => total,
        }
    }

    pub fn label(self) -> String {
        match self {
            PageSize::Fixed(n) => n.to_string(),
            PageSize::All => "All".to_string(),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Fixed(5)
    }
}

/// Answers collected on the participant info step
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantAnswers {
    pub page_size: PageSize,
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub dsl_experience: Likert,
    pub llm_usage: Likert,
    pub known_llms: BTreeSet<String>,
}

/// What the reviewer entered for one model on a rating page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingInput {
    pub ratings: Ratings,
    pub general_comment: Option<String>,
}

/// Result of the submission protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No response had all four ratings; nothing was sent
    NothingToSubmit,
    Submitted,
    Rejected(String),
}

/// Everything the survey holds in memory for one reviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    step: Step,
    reviewer_id: Uuid,
    selected: Option<EvaluationSummary>,
    evaluation: Vec<ModelOutput>,
    page: usize,
    page_size: usize,
    completed: BTreeSet<usize>,
    draft: Option<FeedbackDraft>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session at the first step with a new reviewer id
    pub fn new() -> Self {
        Self {
            step: Step::SelectEvaluation,
            reviewer_id: Uuid::new_v4(),
            selected: None,
            evaluation: Vec::new(),
            page: 0,
            page_size: PageSize::default().resolve(0),
            completed: BTreeSet::new(),
            draft: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn reviewer_id(&self) -> Uuid {
        self.reviewer_id
    }

    pub fn selected(&self) -> Option<&EvaluationSummary> {
        self.selected.as_ref()
    }

    pub fn selected_evaluation_id(&self) -> Option<&EvaluationId> {
        self.selected.as_ref().map(|s| &s.id)
    }

    pub fn evaluation(&self) -> &[ModelOutput] {
        &self.evaluation
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of rating pages, at least one
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        self.evaluation.len().div_ceil(self.page_size).max(1)
    }

    pub fn draft(&self) -> Option<&FeedbackDraft> {
        self.draft.as_ref()
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    /// Distinct model names of the selected evaluation
    pub fn model_names(&self) -> BTreeSet<String> {
        self.evaluation.iter().map(|m| m.model_name.clone()).collect()
    }

    /// Indices of the models on the current page
    pub fn page_window(&self) -> Range<usize> {
        let total = self.evaluation.len();
        let start = self.page.saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    pub fn current_page(&self) -> &[ModelOutput] {
        &self.evaluation[self.page_window()]
    }

    pub fn can_go_previous(&self) -> bool {
        self.step == Step::RateOutputs && self.page > 0
    }

    pub fn can_go_next(&self) -> bool {
        let unclamped_end = self
            .page
            .saturating_mul(self.page_size)
            .saturating_add(self.page_size);
        self.step == Step::RateOutputs && unclamped_end < self.evaluation.len()
    }

    /// Move back one page; returns whether the page changed
    pub fn previous_page(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Move forward one page; returns whether the page changed
    pub fn next_page(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Leave the thank-you step with a brand new session
    pub fn return_home(&mut self) -> Result<()> {
        self.expect_step(Step::ThankYou)?;
        *self = Session::new();
        info!(reviewer_id = %self.reviewer_id, "session reset");
        Ok(())
    }

    fn expect_step(&self, expected: Step) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(SurveyError::InvalidStep {
                expected,
                actual: self.step,
            })
        }
    }
}

/// Drives the survey steps against the evaluation API and the draft store
pub struct Wizard {
    client: EvaluationClient,
    drafts: DraftStore,
}

impl Wizard {
    pub fn new(client: EvaluationClient, drafts: DraftStore) -> Self {
        Self { client, drafts }
    }

    /// Where the current session's draft lives, once an evaluation is selected
    pub fn draft_path(&self, session: &Session) -> Option<PathBuf> {
        session
            .selected_evaluation_id()
            .map(|id| self.drafts.path_for(id, &session.reviewer_id()))
    }

    /// Active evaluations to choose from on the first step
    pub async fn list_evaluations(&self, session: &Session) -> Result<Vec<EvaluationSummary>> {
        session.expect_step(Step::SelectEvaluation)?;
        self.client.list_active_evaluations().await
    }

    /// Fetch the evaluation's models for review before committing to it
    pub async fn preview_evaluation(
        &self,
        session: &Session,
        evaluation: &EvaluationSummary,
    ) -> Result<Vec<ModelOutput>> {
        session.expect_step(Step::SelectEvaluation)?;
        self.client.get_evaluation(&evaluation.id).await
    }

    /// Record the confirmed evaluation with its fetched models and move on
    pub fn select_evaluation(
        &self,
        session: &mut Session,
        evaluation: &EvaluationSummary,
        models: Vec<ModelOutput>,
    ) -> Result<usize> {
        session.expect_step(Step::SelectEvaluation)?;
        let count = models.len();

        session.selected = Some(evaluation.clone());
        session.evaluation = models;
        session.step = Step::ParticipantInfo;
        info!(evaluation_id = %evaluation.id, models = count, "evaluation selected");
        Ok(count)
    }

    /// Build and persist a fresh draft, then open the first rating page
    pub fn start_rating(&self, session: &mut Session, answers: ParticipantAnswers) -> Result<PathBuf> {
        session.expect_step(Step::ParticipantInfo)?;
        let evaluation_id = match session.selected_evaluation_id() {
            Some(id) => id.clone(),
            None => {
                return Err(SurveyError::InvalidStep {
                    expected: Step::SelectEvaluation,
                    actual: session.step,
                });
            }
        };

        let reviewer_info = ReviewerInfo {
            reviewer_id: session.reviewer_id,
            age_group: answers.age_group,
            gender: answers.gender,
            dsl_experience: answers.dsl_experience,
            llm_usage: answers.llm_usage,
            known_llms: answers.known_llms,
            timestamp: Utc::now(),
        };
        let draft = FeedbackDraft::new(reviewer_info, evaluation_id.clone());
        let path = self.drafts.save(&evaluation_id, &session.reviewer_id, &draft)?;

        session.page_size = answers.page_size.resolve(session.evaluation.len());
        session.page = 0;
        session.completed.clear();
        session.draft = Some(draft);
        session.step = Step::RateOutputs;
        info!(page_size = session.page_size, "rating started");
        Ok(path)
    }

    /// Record one input per model on the current page and persist the draft
    pub fn rate_page(&self, session: &mut Session, inputs: Vec<RatingInput>) -> Result<PathBuf> {
        session.expect_step(Step::RateOutputs)?;
        let window = session.page_window();
        if inputs.len() != window.len() {
            return Err(SurveyError::PageMismatch {
                expected: window.len(),
                got: inputs.len(),
            });
        }

        let step = session.step;
        let Some(draft) = session.draft.as_mut() else {
            return Err(SurveyError::InvalidStep {
                expected: Step::ParticipantInfo,
                actual: step,
            });
        };

        for (index, input) in window.zip(inputs) {
            let model = &session.evaluation[index];
            let complete = input.ratings.is_complete();
            draft.upsert(Response {
                model_name: model.model_name.clone(),
                parameters: model.parameters.clone(),
                ratings: input.ratings,
                general_comment: input.general_comment.filter(|c| !c.trim().is_empty()),
            });
            if complete {
                session.completed.insert(index);
            } else {
                session.completed.remove(&index);
            }
        }

        self.drafts
            .save(&draft.evaluation_id, &session.reviewer_id, draft)
    }

    /// Send every complete response; stays on the rating step unless the server accepts
    pub async fn submit(&self, session: &mut Session) -> Result<SubmitOutcome> {
        session.expect_step(Step::RateOutputs)?;

        let status = match session.draft.as_ref().and_then(FeedbackDraft::submission) {
            Some(payload) => {
                info!(responses = payload.responses.len(), "submitting feedback");
                self.client.submit_feedback(&payload).await
            }
            None => return Ok(SubmitOutcome::NothingToSubmit),
        };

        Ok(match status {
            SubmitStatus::Accepted => {
                session.step = Step::ThankYou;
                SubmitOutcome::Submitted
            }
            SubmitStatus::Rejected(message) => SubmitOutcome::Rejected(message),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Scalar;
    use crate::models::tests::ratings;
    use mockito::{Matcher, ServerGuard};
    use serde_json::json;
    use tempfile::{TempDir, tempdir};

    pub(crate) fn summary(id: &str) -> EvaluationSummary {
        EvaluationSummary {
            id: Scalar::Text(id.to_string()),
            title: format!("Evaluation {}", id),
            description: "Model an online shop".to_string(),
        }
    }

    pub(crate) fn models_body(count: usize) -> String {
        let models: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "model_name": format!("model-{}", i),
                    "parameters": "7B",
                    "output": format!("concept Thing{}", i)
                })
            })
            .collect();
        serde_json::Value::Array(models).to_string()
    }

    pub(crate) fn answers(page_size: PageSize) -> ParticipantAnswers {
        ParticipantAnswers {
            page_size,
            age_group: AgeGroup::From18To25,
            gender: Gender::Female,
            dsl_experience: Likert::new(2).unwrap(),
            llm_usage: Likert::new(4).unwrap(),
            known_llms: BTreeSet::from(["model-0".to_string()]),
        }
    }

    fn full(values: [u8; 4]) -> RatingInput {
        RatingInput {
            ratings: ratings(values.map(Some)),
            general_comment: None,
        }
    }

    fn read_draft(path: &std::path::Path) -> FeedbackDraft {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    async fn server_with_models(count: usize) -> ServerGuard {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/evaluation/e1")
            .with_status(200)
            .with_body(models_body(count))
            .create_async()
            .await;
        server
    }

    async fn choose(wizard: &Wizard, session: &mut Session) -> usize {
        let evaluation = summary("e1");
        let models = wizard.preview_evaluation(session, &evaluation).await.unwrap();
        wizard.select_evaluation(session, &evaluation, models).unwrap()
    }

    async fn rating_session(
        server: &ServerGuard,
        page_size: PageSize,
    ) -> (Wizard, Session, TempDir) {
        let temp_dir = tempdir().unwrap();
        let wizard = Wizard::new(
            EvaluationClient::new(server.url()),
            DraftStore::new(temp_dir.path()),
        );
        let mut session = Session::new();
        choose(&wizard, &mut session).await;
        wizard.start_rating(&mut session, answers(page_size)).unwrap();
        (wizard, session, temp_dir)
    }

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.step(), Step::SelectEvaluation);
        assert!(session.selected().is_none());
        assert!(session.draft().is_none());
        assert_ne!(session.reviewer_id(), Session::new().reviewer_id());
    }

    #[test]
    fn test_page_size_resolve() {
        assert_eq!(PageSize::Fixed(20).resolve(3), 20);
        assert_eq!(PageSize::All.resolve(37), 37);
        assert_eq!(PageSize::All.label(), "All");
    }

    #[tokio::test]
    async fn test_select_evaluation_moves_to_participant_info() {
        let server = server_with_models(3).await;
        let temp_dir = tempdir().unwrap();
        let wizard = Wizard::new(EvaluationClient::new(server.url()), DraftStore::new(temp_dir.path()));
        let mut session = Session::new();

        let evaluation = summary("e1");
        let models = wizard.preview_evaluation(&session, &evaluation).await.unwrap();
        assert_eq!(models.len(), 3);
        assert_eq!(session.step(), Step::SelectEvaluation);
        assert!(session.selected().is_none());

        let count = wizard.select_evaluation(&mut session, &evaluation, models).unwrap();

        assert_eq!(count, 3);
        assert_eq!(session.step(), Step::ParticipantInfo);
        assert_eq!(session.selected_evaluation_id(), Some(&Scalar::Text("e1".into())));
        assert_eq!(session.model_names().len(), 3);
    }

    #[tokio::test]
    async fn test_select_evaluation_failure_stays_on_first_step() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/evaluation/e1")
            .with_status(404)
            .with_body("no such evaluation")
            .create_async()
            .await;
        let temp_dir = tempdir().unwrap();
        let wizard = Wizard::new(EvaluationClient::new(server.url()), DraftStore::new(temp_dir.path()));
        let mut session = Session::new();
        let before = session.clone();

        let err = wizard.preview_evaluation(&session, &summary("e1")).await.unwrap_err();

        assert!(err.to_string().contains("no such evaluation"));
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn test_start_rating_persists_fresh_draft() {
        let server = server_with_models(4).await;
        let temp_dir = tempdir().unwrap();
        let wizard = Wizard::new(EvaluationClient::new(server.url()), DraftStore::new(temp_dir.path()));
        let mut session = Session::new();
        choose(&wizard, &mut session).await;

        let path = wizard.start_rating(&mut session, answers(PageSize::Fixed(10))).unwrap();

        assert_eq!(session.step(), Step::RateOutputs);
        assert_eq!(session.page(), 0);
        let draft = read_draft(&path);
        assert_eq!(&draft, session.draft().unwrap());
        assert_eq!(draft.reviewer_info.reviewer_id, session.reviewer_id());
        assert!(draft.responses.is_empty());
    }

    #[tokio::test]
    async fn test_start_rating_requires_participant_step() {
        let temp_dir = tempdir().unwrap();
        let wizard = Wizard::new(
            EvaluationClient::new("http://127.0.0.1:9"),
            DraftStore::new(temp_dir.path()),
        );
        let mut session = Session::new();
        let err = wizard
            .start_rating(&mut session, answers(PageSize::All))
            .unwrap_err();
        assert!(matches!(err, SurveyError::InvalidStep { .. }));
    }

    #[tokio::test]
    async fn test_pagination_twelve_models_page_size_five() {
        let server = server_with_models(12).await;
        let (_wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;

        assert_eq!(session.page_window(), 0..5);
        assert_eq!(session.page_count(), 3);
        assert!(!session.can_go_previous());
        assert!(session.next_page());
        assert_eq!(session.page_window(), 5..10);
        assert!(session.next_page());
        assert_eq!(session.page_window(), 10..12);
        assert_eq!(session.current_page().len(), 2);
        assert!(!session.can_go_next());
        assert!(!session.next_page());
        assert_eq!(session.page(), 2);
        assert!(session.previous_page());
        assert_eq!(session.page(), 1);
    }

    #[tokio::test]
    async fn test_page_size_all_covers_every_model() {
        let server = server_with_models(37).await;
        let (_wizard, session, _dir) = rating_session(&server, PageSize::All).await;

        let window = session.page_window();
        assert_eq!(window, 0..37);
        assert!(window.end >= session.evaluation().len());
        assert_eq!(session.page_count(), 1);
        assert!(!session.can_go_next());
    }

    #[tokio::test]
    async fn test_rate_page_persists_and_tracks_completion() {
        let server = server_with_models(3).await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;

        let mut partial = full([1, 1, 1, 1]);
        partial.ratings.advanced = None;
        let path = wizard
            .rate_page(&mut session, vec![full([5, 4, 3, 2]), partial, RatingInput::default()])
            .unwrap();

        assert_eq!(session.completed(), &BTreeSet::from([0]));
        let on_disk = read_draft(&path);
        assert_eq!(&on_disk, session.draft().unwrap());
        assert_eq!(on_disk.responses.len(), 3);
    }

    #[tokio::test]
    async fn test_rate_page_revisit_keeps_one_response_per_model() {
        let server = server_with_models(4).await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(2)).await;

        wizard
            .rate_page(&mut session, vec![full([1, 1, 1, 1]), full([2, 2, 2, 2])])
            .unwrap();
        session.next_page();
        wizard
            .rate_page(&mut session, vec![full([3, 3, 3, 3]), full([3, 3, 3, 3])])
            .unwrap();
        session.previous_page();
        let path = wizard
            .rate_page(&mut session, vec![full([5, 5, 5, 5]), full([4, 4, 4, 4])])
            .unwrap();

        let draft = read_draft(&path);
        assert_eq!(draft.responses.len(), 4);
        let first = draft
            .responses
            .iter()
            .filter(|r| r.model_name == "model-0")
            .collect::<Vec<_>>();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].ratings.semantic, Likert::new(5));
        assert_eq!(session.completed().len(), 4);
    }

    #[tokio::test]
    async fn test_rate_page_unsetting_rating_clears_completion() {
        let server = server_with_models(1).await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;

        wizard.rate_page(&mut session, vec![full([5, 5, 5, 5])]).unwrap();
        assert_eq!(session.completed().len(), 1);
        wizard.rate_page(&mut session, vec![RatingInput::default()]).unwrap();
        assert!(session.completed().is_empty());
    }

    #[tokio::test]
    async fn test_rate_page_rejects_wrong_input_count() {
        let server = server_with_models(3).await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;

        let err = wizard.rate_page(&mut session, vec![full([1, 1, 1, 1])]).unwrap_err();
        assert!(matches!(err, SurveyError::PageMismatch { expected: 3, got: 1 }));
        assert!(session.draft().unwrap().responses.is_empty());
    }

    #[tokio::test]
    async fn test_blank_comment_is_dropped() {
        let server = server_with_models(1).await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;

        let mut input = full([3, 3, 3, 3]);
        input.general_comment = Some("   ".to_string());
        wizard.rate_page(&mut session, vec![input]).unwrap();
        assert_eq!(session.draft().unwrap().responses[0].general_comment, None);
    }

    #[tokio::test]
    async fn test_submit_without_complete_responses_makes_no_request() {
        let mut server = server_with_models(2).await;
        let submit = server
            .mock("POST", "/submit_feedback")
            .expect(0)
            .create_async()
            .await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;
        let mut partial = full([1, 2, 3, 4]);
        partial.ratings.semantic = None;
        wizard
            .rate_page(&mut session, vec![partial, RatingInput::default()])
            .unwrap();
        let before = session.draft().cloned();

        let outcome = wizard.submit(&mut session).await.unwrap();

        submit.assert_async().await;
        assert_eq!(outcome, SubmitOutcome::NothingToSubmit);
        assert_eq!(session.step(), Step::RateOutputs);
        assert_eq!(session.draft().cloned(), before);
    }

    #[tokio::test]
    async fn test_submit_sends_exact_ratings() {
        let mut server = server_with_models(2).await;
        let submit = server
            .mock("POST", "/submit_feedback")
            .match_body(Matcher::PartialJson(json!({
                "evaluation_id": "e1",
                "responses": [{
                    "model_name": "model-0",
                    "parameters": "7B",
                    "semantic": 5,
                    "concept": 4,
                    "complete": 3,
                    "advanced": 2
                }]
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;
        wizard
            .rate_page(&mut session, vec![full([5, 4, 3, 2]), RatingInput::default()])
            .unwrap();

        let outcome = wizard.submit(&mut session).await.unwrap();

        submit.assert_async().await;
        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(session.step(), Step::ThankYou);
    }

    #[tokio::test]
    async fn test_submit_server_error_keeps_draft() {
        let mut server = server_with_models(2).await;
        server
            .mock("POST", "/submit_feedback")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;
        wizard
            .rate_page(&mut session, vec![full([5, 4, 3, 2]), full([1, 1, 1, 1])])
            .unwrap();

        let outcome = wizard.submit(&mut session).await.unwrap();

        match outcome {
            SubmitOutcome::Rejected(message) => assert!(message.contains("internal error")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(session.step(), Step::RateOutputs);
        assert_eq!(session.draft().unwrap().responses.len(), 2);
    }

    #[tokio::test]
    async fn test_return_home_resets_everything() {
        let mut server = server_with_models(1).await;
        server
            .mock("POST", "/submit_feedback")
            .with_status(200)
            .create_async()
            .await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(5)).await;
        wizard.rate_page(&mut session, vec![full([2, 2, 2, 2])]).unwrap();
        wizard.submit(&mut session).await.unwrap();
        let old_reviewer = session.reviewer_id();

        session.return_home().unwrap();

        assert_eq!(session.step(), Step::SelectEvaluation);
        assert!(session.selected().is_none());
        assert!(session.evaluation().is_empty());
        assert!(session.draft().is_none());
        assert!(session.completed().is_empty());
        assert_eq!(session.page(), 0);
        assert_ne!(session.reviewer_id(), old_reviewer);
    }

    #[test]
    fn test_return_home_only_from_thank_you() {
        let mut session = Session::new();
        assert!(session.return_home().is_err());
    }

    #[tokio::test]
    async fn test_session_is_serializable() {
        let server = server_with_models(2).await;
        let (wizard, mut session, _dir) = rating_session(&server, PageSize::Fixed(1)).await;
        wizard.rate_page(&mut session, vec![full([3, 3, 3, 3])]).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
