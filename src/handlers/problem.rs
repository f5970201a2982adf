use anyhow::{bail, Context, Result};

use crate::cli::input;
use crate::domain::{ProblemRecord, Record};
use crate::handlers::Page;
use crate::infrastructure::RecordStore;

const STEPS: usize = 3;

pub struct ProblemSolvingPage<'a> {
    store: &'a RecordStore,
}

impl<'a> ProblemSolvingPage<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    fn fill_form(&self, previous: &ProblemRecord) -> Result<ProblemRecord> {
        input::print_step(1, STEPS, "Define the Problem");
        let date = input::prompt_date("Date", &previous.date)?;
        let problem_description =
            input::prompt_required("Describe the problem", &previous.problem_description)?;

        input::print_step(2, STEPS, "Brainstorm & Choose");
        let brainstormed_solutions = input::prompt_required(
            "List every possible solution",
            &previous.brainstormed_solutions,
        )?;
        let chosen_solution =
            input::prompt_required("Which one will you try?", &previous.chosen_solution)?;

        input::print_step(3, STEPS, "Action Plan & Review");
        let action_plan =
            input::prompt_required("Concrete steps to carry it out", &previous.action_plan)?;
        let outcome = input::prompt_required("How did it go?", &previous.outcome)?;
        let problem_status = input::prompt_status(previous.problem_status)?;

        let problem = ProblemRecord {
            date,
            problem_description,
            brainstormed_solutions,
            chosen_solution,
            action_plan,
            outcome,
            problem_status,
        };
        problem.validate()?;
        Ok(problem)
    }
}

impl Page for ProblemSolvingPage<'_> {
    fn show(&mut self) -> Result<()> {
        println!("\nProblem Solving");
        let problem = self.fill_form(&ProblemRecord::default())?;
        let record = problem
            .to_record()
            .context("Failed to serialize problem-solving record")?;

        let stored = self.store.problem_solving().add(record);

        println!(
            "\n✓ Problem-solving record saved (ID: {})",
            stored.identity().unwrap_or_default()
        );
        Ok(())
    }

    fn show_with(&mut self, context: Record) -> Result<()> {
        let identity = context
            .identity()
            .context("Problem-solving record has no ID")?
            .to_string();
        let previous = ProblemRecord::from_record(&context)
            .context("Stored problem-solving record is unreadable")?;

        println!("\nEditing problem-solving record {}", identity);
        let problem = self.fill_form(&previous)?;
        let record = problem
            .to_record()
            .context("Failed to serialize problem-solving record")?;

        if !self.store.problem_solving().update(&identity, record) {
            bail!("Failed to update problem-solving record '{}'", identity);
        }

        println!("\n✓ Problem-solving record updated");
        Ok(())
    }
}
