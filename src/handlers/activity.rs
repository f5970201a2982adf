use anyhow::{bail, Context, Result};

use crate::cli::input;
use crate::domain::activity::ACTIVITY_RATING_MAX;
use crate::domain::{Activity, Record};
use crate::handlers::Page;
use crate::infrastructure::RecordStore;

pub struct ActivityPage<'a> {
    store: &'a RecordStore,
}

impl<'a> ActivityPage<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    fn fill_form(&self, previous: &Activity) -> Result<Activity> {
        input::print_step(1, 2, "Plan");
        let activity_date = input::prompt_date("Activity date", &previous.activity_date)?;
        let activity_name = input::prompt_required("Activity", &previous.activity_name)?;
        let predicted_pleasure = input::prompt_rating(
            "Predicted pleasure",
            ACTIVITY_RATING_MAX,
            previous.predicted_pleasure,
        )?;
        let predicted_mastery = input::prompt_rating(
            "Predicted mastery",
            ACTIVITY_RATING_MAX,
            previous.predicted_mastery,
        )?;

        let mut activity = Activity {
            activity_date,
            activity_name,
            predicted_pleasure,
            predicted_mastery,
            ..Default::default()
        };
        activity.validate_plan()?;

        input::print_step(2, 2, "Review");
        loop {
            activity.actual_pleasure = input::prompt_rating(
                "Actual pleasure",
                ACTIVITY_RATING_MAX,
                previous.actual_pleasure,
            )?;
            activity.actual_mastery = input::prompt_rating(
                "Actual mastery",
                ACTIVITY_RATING_MAX,
                previous.actual_mastery,
            )?;
            activity.notes = input::prompt_text("Notes", &previous.notes)?;

            match activity.validate_review() {
                Ok(()) => break,
                Err(e) => println!("⚠ {}", e),
            }
        }

        activity.validate()?;
        Ok(activity)
    }
}

impl Page for ActivityPage<'_> {
    fn show(&mut self) -> Result<()> {
        println!("\nBehavioral Activation");
        let activity = self.fill_form(&Activity::default())?;
        let record = activity.to_record().context("Failed to serialize activity")?;

        let stored = self.store.activities().add(record);

        println!(
            "\n✓ Activity saved (ID: {})",
            stored.identity().unwrap_or_default()
        );
        Ok(())
    }

    fn show_with(&mut self, context: Record) -> Result<()> {
        let identity = context
            .identity()
            .context("Activity has no ID")?
            .to_string();
        let previous = Activity::from_record(&context).context("Stored activity is unreadable")?;

        println!("\nEditing activity {}", identity);
        let activity = self.fill_form(&previous)?;
        let record = activity.to_record().context("Failed to serialize activity")?;

        if !self.store.activities().update(&identity, record) {
            bail!("Failed to update activity '{}'", identity);
        }

        println!("\n✓ Activity updated");
        Ok(())
    }
}
