use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::domain::lesson::QuizQuestion;
use crate::domain::thought_record::{EmotionRatings, EMOTION_OPTIONS, THOUGHT_RATING_MAX};
use crate::domain::validate::{check_date, today};
use crate::domain::ProblemStatus;

pub fn print_step(step: usize, total: usize, title: &str) {
    println!("\n── Step {}/{}: {} ──", step, total, title);
}

pub fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt))?;

    Ok(value.trim().to_string())
}

pub fn prompt_required(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(initial)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("This field is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt))?;

    Ok(value.trim().to_string())
}

/// Defaults to today when there is no previous value.
pub fn prompt_date(prompt: &str, initial: &str) -> Result<String> {
    let initial = if initial.is_empty() {
        today()
    } else {
        initial.to_string()
    };

    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} (YYYY-MM-DD)", prompt))
        .with_initial_text(initial)
        .validate_with(|input: &String| -> Result<(), String> {
            check_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .context("Failed to read date")?;

    Ok(value.trim().to_string())
}

pub fn prompt_rating(prompt: &str, max: u8, initial: u8) -> Result<u8> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} (0-{})", prompt, max))
        .default(initial.min(max))
        .validate_with(|input: &u8| -> Result<(), String> {
            if *input > max {
                Err(format!("Enter a number between 0 and {}", max))
            } else {
                Ok(())
            }
        })
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt))
}

/// Asks which emotions were present, then how intense each one was.
pub fn prompt_emotions(previous: &EmotionRatings) -> Result<EmotionRatings> {
    let mut names: Vec<String> = EMOTION_OPTIONS.iter().map(|e| e.to_string()).collect();
    for custom in previous.keys() {
        if !names.contains(custom) {
            names.push(custom.clone());
        }
    }
    let defaults: Vec<bool> = names.iter().map(|n| previous.contains_key(n)).collect();

    let selected = loop {
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Which emotions did you feel? (space to select, enter to confirm)")
            .items(&names)
            .defaults(&defaults)
            .interact()
            .context("Failed to read emotions")?;

        if !selected.is_empty() {
            break selected;
        }
        println!("⚠ Please select at least one emotion.");
    };

    let mut ratings = EmotionRatings::new();
    for index in selected {
        let name = &names[index];
        let initial = previous.get(name).copied().unwrap_or(50);
        let rating = prompt_rating(&format!("{} intensity", name), THOUGHT_RATING_MAX, initial)?;
        ratings.insert(name.clone(), rating);
    }

    Ok(ratings)
}

/// Re-rates each initially selected emotion.
pub fn prompt_final_emotions(
    initial: &EmotionRatings,
    previous: &EmotionRatings,
) -> Result<EmotionRatings> {
    let mut ratings = EmotionRatings::new();
    for (name, &before) in initial {
        let start = previous.get(name).copied().unwrap_or(before);
        let rating = prompt_rating(
            &format!("Re-rate {} (was {}%)", name, before),
            THOUGHT_RATING_MAX,
            start,
        )?;
        ratings.insert(name.clone(), rating);
    }
    Ok(ratings)
}

pub fn prompt_status(current: ProblemStatus) -> Result<ProblemStatus> {
    let labels: Vec<&str> = ProblemStatus::ALL.iter().map(|s| s.as_str()).collect();
    let default = ProblemStatus::ALL
        .iter()
        .position(|&s| s == current)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Problem status")
        .items(&labels)
        .default(default)
        .interact()
        .context("Failed to read problem status")?;

    Ok(ProblemStatus::ALL[selection])
}

pub fn prompt_confirm_delete(summary: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {}? This cannot be undone", summary))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

pub fn prompt_quiz_answer(question: &QuizQuestion) -> Result<usize> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(question.question)
        .items(question.options)
        .default(0)
        .interact()
        .context("Failed to read quiz answer")
}
