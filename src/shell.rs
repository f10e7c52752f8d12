use crate::concepts::extract_concepts;
use crate::models::{EvaluationSummary, ModelOutput, Response};
use crate::wizard::{ParticipantAnswers, RatingInput, Session, Step, SubmitOutcome, Wizard};
use anyhow::Result;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Inline message shown to the reviewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

/// One model output as shown on a rating page
#[derive(Debug)]
pub struct ModelCard<'a> {
    pub index: usize,
    pub model: &'a ModelOutput,
    pub concepts: BTreeSet<String>,
    /// Ratings entered the last time this page was shown
    pub previous: Option<&'a Response>,
}

/// Everything needed to render the current rating page
#[derive(Debug)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
    pub completed: usize,
    pub cards: Vec<ModelCard<'a>>,
}

impl<'a> PageView<'a> {
    pub fn build(session: &'a Session) -> Self {
        let draft = session.draft();
        let window = session.page_window();
        let cards = window
            .zip(session.current_page())
            .map(|(index, model)| ModelCard {
                index,
                model,
                concepts: extract_concepts(&model.output),
                previous: draft.and_then(|d| d.response_for(model)),
            })
            .collect();

        Self {
            title: session.selected().map_or("", |s| s.title.as_str()),
            page: session.page(),
            pages: session.page_count(),
            total: session.evaluation().len(),
            completed: session.completed().len(),
            cards,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Previous,
    Next,
    Submit,
    Quit,
}

/// Rendering and input surface the survey runs on
pub trait Surface {
    fn notify(&mut self, notice: Notice);

    /// Pick one of the listed evaluations; `None` quits
    fn choose_evaluation(&mut self, evaluations: &[EvaluationSummary]) -> Result<Option<usize>>;

    /// Shown after the picked evaluation's models are fetched; false goes back to the list
    fn confirm_selection(&mut self, evaluation: &EvaluationSummary, model_count: usize) -> Result<bool>;

    /// Asked after the evaluation list could not be shown; false quits
    fn retry(&mut self) -> Result<bool>;

    /// Page size and demographic questions; `None` quits
    fn participant_form(&mut self, model_names: &BTreeSet<String>) -> Result<Option<ParticipantAnswers>>;

    /// One input per card, in card order
    fn rating_page(&mut self, view: &PageView<'_>) -> Result<Vec<RatingInput>>;

    fn page_action(&mut self, can_previous: bool, can_next: bool) -> Result<PageAction>;

    /// Returns true to start over with a new session
    fn thank_you(&mut self) -> Result<bool>;
}

enum Flow {
    Continue,
    Quit,
}

/// Run the survey until the reviewer quits.
///
/// Wizard errors become notices and keep the current step; only surface
/// errors (a broken terminal) end the run with an error.
pub async fn run<S: Surface>(wizard: &Wizard, session: &mut Session, surface: &mut S) -> Result<()> {
    loop {
        debug!(step = ?session.step(), "rendering step");
        let flow = match session.step() {
            Step::SelectEvaluation => select_step(wizard, session, surface).await?,
            Step::ParticipantInfo => participant_step(wizard, session, surface)?,
            Step::RateOutputs => rating_step(wizard, session, surface).await?,
            Step::ThankYou => thank_you_step(session, surface)?,
        };
        if let Flow::Quit = flow {
            info!(step = ?session.step(), "survey closed");
            return Ok(());
        }
    }
}

async fn select_step<S: Surface>(wizard: &Wizard, session: &mut Session, surface: &mut S) -> Result<Flow> {
    let evaluations = match wizard.list_evaluations(session).await {
        Ok(evaluations) if evaluations.is_empty() => {
            surface.notify(Notice::Warning("No active evaluations.".to_string()));
            return retry_or_quit(surface);
        }
        Ok(evaluations) => evaluations,
        Err(e) => {
            surface.notify(Notice::Error(format!("Failed to fetch evaluations: {}", e)));
            return retry_or_quit(surface);
        }
    };

    let Some(choice) = surface.choose_evaluation(&evaluations)? else {
        return Ok(Flow::Quit);
    };
    let Some(selected) = evaluations.get(choice) else {
        return Ok(Flow::Continue);
    };

    let models = match wizard.preview_evaluation(session, selected).await {
        Ok(models) => models,
        Err(e) => {
            surface.notify(Notice::Error(format!("Failed to load evaluation data: {}", e)));
            return Ok(Flow::Continue);
        }
    };
    if surface.confirm_selection(selected, models.len())? {
        if let Err(e) = wizard.select_evaluation(session, selected, models) {
            surface.notify(Notice::Error(format!("Could not select the evaluation: {}", e)));
        }
    }
    Ok(Flow::Continue)
}

fn retry_or_quit<S: Surface>(surface: &mut S) -> Result<Flow> {
    if surface.retry()? {
        Ok(Flow::Continue)
    } else {
        Ok(Flow::Quit)
    }
}

fn participant_step<S: Surface>(wizard: &Wizard, session: &mut Session, surface: &mut S) -> Result<Flow> {
    let Some(answers) = surface.participant_form(&session.model_names())? else {
        return Ok(Flow::Quit);
    };
    if let Err(e) = wizard.start_rating(session, answers) {
        surface.notify(Notice::Error(format!("Could not start the evaluation: {}", e)));
    }
    Ok(Flow::Continue)
}

async fn rating_step<S: Surface>(wizard: &Wizard, session: &mut Session, surface: &mut S) -> Result<Flow> {
    let inputs = surface.rating_page(&PageView::build(session))?;
    if let Err(e) = wizard.rate_page(session, inputs) {
        surface.notify(Notice::Error(format!("Could not save your ratings: {}", e)));
    }

    match surface.page_action(session.can_go_previous(), session.can_go_next())? {
        PageAction::Previous => {
            session.previous_page();
        }
        PageAction::Next => {
            session.next_page();
        }
        PageAction::Submit => {
            let notice = match wizard.submit(session).await {
                Ok(SubmitOutcome::Submitted) => Notice::Success("Feedback submitted successfully!".to_string()),
                Ok(SubmitOutcome::NothingToSubmit) => {
                    Notice::Warning("No completed responses to submit.".to_string())
                }
                Ok(SubmitOutcome::Rejected(message)) => Notice::Error(message),
                Err(e) => Notice::Error(e.to_string()),
            };
            surface.notify(notice);
        }
        PageAction::Quit => {
            if let Some(path) = wizard.draft_path(session) {
                surface.notify(Notice::Info(format!(
                    "Your ratings so far are kept in {}",
                    path.display()
                )));
            }
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

fn thank_you_step<S: Surface>(session: &mut Session, surface: &mut S) -> Result<Flow> {
    if !surface.thank_you()? {
        return Ok(Flow::Quit);
    }
    session.return_home()?;
    Ok(Flow::Continue)
}
