use anyhow::{bail, Context, Result};

use crate::cli::input;
use crate::domain::thought_record::THOUGHT_RATING_MAX;
use crate::domain::{Record, ThoughtRecord};
use crate::handlers::Page;
use crate::infrastructure::RecordStore;

const STEPS: usize = 4;

pub struct ThoughtRecordPage<'a> {
    store: &'a RecordStore,
}

impl<'a> ThoughtRecordPage<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    fn fill_form(&self, previous: &ThoughtRecord) -> Result<ThoughtRecord> {
        input::print_step(1, STEPS, "Situation & Initial Emotions");
        let date = input::prompt_date("Date", &previous.date)?;
        let situation = input::prompt_required(
            "What happened? (who, what, when, where)",
            &previous.situation,
        )?;
        let initial_emotions = input::prompt_emotions(&previous.initial_emotions)?;

        input::print_step(2, STEPS, "Automatic Thoughts");
        let automatic_thoughts = input::prompt_required(
            "What went through your mind?",
            &previous.automatic_thoughts,
        )?;
        let belief_in_automatic_thoughts = input::prompt_rating(
            "How much do you believe it",
            THOUGHT_RATING_MAX,
            previous.belief_in_automatic_thoughts,
        )?;

        input::print_step(3, STEPS, "Evidence");
        let evidence_for = input::prompt_text(
            "Evidence that supports the thought",
            &previous.evidence_for,
        )?;
        let evidence_against = input::prompt_text(
            "Evidence that does not support the thought",
            &previous.evidence_against,
        )?;

        input::print_step(4, STEPS, "Alternative Thought & Re-rating");
        let alternative_thought = input::prompt_required(
            "A more balanced way to see it",
            &previous.alternative_thought,
        )?;
        let belief_in_alternative_thought = input::prompt_rating(
            "How much do you believe the alternative",
            THOUGHT_RATING_MAX,
            previous.belief_in_alternative_thought,
        )?;
        let final_emotions =
            input::prompt_final_emotions(&initial_emotions, &previous.final_emotions)?;

        let thought = ThoughtRecord {
            date,
            situation,
            initial_emotions,
            automatic_thoughts,
            belief_in_automatic_thoughts,
            evidence_for,
            evidence_against,
            alternative_thought,
            belief_in_alternative_thought,
            final_emotions,
        };
        thought.validate()?;
        Ok(thought)
    }
}

impl Page for ThoughtRecordPage<'_> {
    fn show(&mut self) -> Result<()> {
        println!("\nThought Record");
        let thought = self.fill_form(&ThoughtRecord::default())?;
        let record = thought
            .to_record()
            .context("Failed to serialize thought record")?;

        let stored = self.store.thought_records().add(record);

        println!(
            "\n✓ Thought record saved (ID: {})",
            stored.identity().unwrap_or_default()
        );
        Ok(())
    }

    fn show_with(&mut self, context: Record) -> Result<()> {
        let identity = context
            .identity()
            .context("Thought record has no ID")?
            .to_string();
        let previous =
            ThoughtRecord::from_record(&context).context("Stored thought record is unreadable")?;

        println!("\nEditing thought record {}", identity);
        let thought = self.fill_form(&previous)?;
        let record = thought
            .to_record()
            .context("Failed to serialize thought record")?;

        if !self.store.thought_records().update(&identity, record) {
            bail!("Failed to update thought record '{}'", identity);
        }

        println!("\n✓ Thought record updated");
        Ok(())
    }
}
