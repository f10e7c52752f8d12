use crate::models::{
    AGREEMENT_LABELS, AgeGroup, DSL_EXPERIENCE_LABELS, EvaluationSummary, Gender, LLM_USAGE_LABELS,
    Likert, Ratings, label_index_for_level, level_for_label_index,
};
use crate::output::{concepts_line, indent, progress_line};
use crate::shell::{ModelCard, Notice, PageAction, PageView, Surface};
use crate::wizard::{PageSize, ParticipantAnswers, RatingInput};
use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::collections::BTreeSet;

const UNSET: &str = "Select...";

/// Interactive surface built on dialoguer prompts
pub struct TerminalSurface {
    theme: ColorfulTheme,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Select over fixed labels; `None` when the reviewer presses Esc
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()
            .with_context(|| format!("Failed to read answer for: {}", prompt))
    }

    fn select_level(&self, prompt: &str, labels: &[&str; 5]) -> Result<Option<Likert>> {
        match self.select(prompt, labels, 0)? {
            Some(index) => level_for_label_index(index)
                .map(Some)
                .context("choice outside the 1-5 scale"),
            None => Ok(None),
        }
    }

    fn rate_card(&self, card: &ModelCard<'_>) -> Result<RatingInput> {
        println!();
        println!("{}", "-".repeat(60));
        println!("#{} {}", card.index + 1, card.model.heading());
        println!("🔍 DSL Output:");
        print!("{}", indent(&card.model.output));
        if let Some(line) = concepts_line(&card.concepts) {
            println!("{}", line);
        }

        let previous = card.previous;
        let mut items = vec![UNSET];
        items.extend(AGREEMENT_LABELS);

        let mut ratings = Ratings::default();
        for (label, key) in Ratings::QUESTIONS {
            let default = previous
                .and_then(|r| r.ratings.get(key))
                .map_or(0, |level| label_index_for_level(level) + 1);
            let choice = self.select(label, &items, default)?.unwrap_or(default);
            let level = choice.checked_sub(1).and_then(level_for_label_index);
            ratings.set(key, level);
        }

        let earlier_comment = previous.and_then(|r| r.general_comment.clone());
        let add_comment = Confirm::with_theme(&self.theme)
            .with_prompt("➕ Add General Comment")
            .default(earlier_comment.is_some())
            .interact()
            .context("Failed to read comment toggle")?;

        let general_comment = if add_comment {
            let comment = Input::<String>::with_theme(&self.theme)
                .with_prompt("📝 General Comments")
                .with_initial_text(earlier_comment.unwrap_or_default())
                .allow_empty(true)
                .interact_text()
                .context("Failed to read comment")?;
            Some(comment)
        } else {
            None
        };

        Ok(RatingInput {
            ratings,
            general_comment,
        })
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Info(message) => println!("ℹ️  {}", message),
            Notice::Success(message) => println!("✅ {}", message),
            Notice::Warning(message) => eprintln!("⚠️  {}", message),
            Notice::Error(message) => eprintln!("❌ {}", message),
        }
    }

    fn choose_evaluation(&mut self, evaluations: &[EvaluationSummary]) -> Result<Option<usize>> {
        println!();
        println!("🧪 Select Evaluation");
        let titles: Vec<&str> = evaluations.iter().map(|e| e.title.as_str()).collect();
        self.select("Choose an Evaluation", &titles, 0)
    }

    fn confirm_selection(&mut self, evaluation: &EvaluationSummary, model_count: usize) -> Result<bool> {
        println!("Models in this evaluation: {}", model_count);
        if !evaluation.description.is_empty() {
            println!("Description: {}", evaluation.description);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Next ➡️")
            .default(true)
            .interact()
            .context("Failed to read selection answer")
    }

    fn retry(&mut self) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Try loading evaluations again?")
            .default(true)
            .interact()
            .context("Failed to read retry answer")
    }

    fn participant_form(&mut self, model_names: &BTreeSet<String>) -> Result<Option<ParticipantAnswers>> {
        println!();
        println!("👤 Participant Info");

        let page_labels: Vec<String> = PageSize::CHOICES.iter().map(|p| p.label()).collect();
        let page_items: Vec<&str> = page_labels.iter().map(String::as_str).collect();
        let Some(page_choice) = self.select("How many models to show per page?", &page_items, 0)? else {
            return Ok(None);
        };

        let age_items: Vec<&str> = AgeGroup::ALL.iter().map(|a| a.label()).collect();
        let Some(age_choice) = self.select("Age", &age_items, 0)? else {
            return Ok(None);
        };

        let gender_items: Vec<&str> = Gender::ALL.iter().map(|g| g.label()).collect();
        let Some(gender_choice) = self.select("Gender", &gender_items, 0)? else {
            return Ok(None);
        };

        let Some(dsl_experience) = self.select_level("Experience with DSLs", &DSL_EXPERIENCE_LABELS)? else {
            return Ok(None);
        };
        let Some(llm_usage) = self.select_level("LLM Usage Frequency", &LLM_USAGE_LABELS)? else {
            return Ok(None);
        };

        let names: Vec<&String> = model_names.iter().collect();
        let known: Vec<usize> = MultiSelect::with_theme(&self.theme)
            .with_prompt("Which of these LLMs have you heard of?")
            .items(&names)
            .interact()
            .context("Failed to read known LLMs")?;

        Ok(Some(ParticipantAnswers {
            page_size: PageSize::CHOICES[page_choice],
            age_group: AgeGroup::ALL[age_choice],
            gender: Gender::ALL[gender_choice],
            dsl_experience,
            llm_usage,
            known_llms: known.into_iter().map(|i| names[i].clone()).collect(),
        }))
    }

    fn rating_page(&mut self, view: &PageView<'_>) -> Result<Vec<RatingInput>> {
        println!();
        println!("📊 Evaluate LLM Outputs: {} (page {} of {})", view.title, view.page + 1, view.pages);
        println!("{}", progress_line(view.completed, view.total));

        view.cards.iter().map(|card| self.rate_card(card)).collect()
    }

    fn page_action(&mut self, can_previous: bool, can_next: bool) -> Result<PageAction> {
        let mut actions = Vec::new();
        if can_previous {
            actions.push((PageAction::Previous, "⬅️  Previous"));
        }
        if can_next {
            actions.push((PageAction::Next, "Next ➡️"));
        }
        actions.push((PageAction::Submit, "📤 Submit Feedback Now"));
        actions.push((PageAction::Quit, "Quit (keep draft)"));

        let labels: Vec<&str> = actions.iter().map(|(_, label)| *label).collect();
        let choice = self.select("What next?", &labels, 0)?;
        Ok(choice.map_or(PageAction::Quit, |i| actions[i].0))
    }

    fn thank_you(&mut self) -> Result<bool> {
        println!();
        println!("🎉 Thank you for your feedback!");
        Confirm::with_theme(&self.theme)
            .with_prompt("Return to home and review another evaluation?")
            .default(false)
            .interact()
            .context("Failed to read answer")
    }
}
