use anyhow::{Context, Result};

use crate::cli::input;
use crate::domain::lesson::{lesson, LESSONS};

pub fn handle_learn(number: Option<usize>, quiz: bool) -> Result<()> {
    let Some(number) = number else {
        println!("\nLessons:");
        for (i, lesson) in LESSONS.iter().enumerate() {
            println!("  {}. {}", i + 1, lesson.name);
        }
        println!("\nRead one with 'mindsync learn <number>', add --quiz to test yourself.");
        return Ok(());
    };

    let lesson = lesson(number).with_context(|| {
        format!(
            "Lesson {} not found. Choose a number between 1 and {}",
            number,
            LESSONS.len()
        )
    })?;

    println!("\n{}", lesson.title);
    println!("{}\n", "=".repeat(lesson.title.chars().count()));
    println!("{}", lesson.text);

    if !quiz {
        return Ok(());
    }

    println!("\nQuiz: {}", lesson.name);
    let mut answers = Vec::with_capacity(lesson.quiz.len());
    for question in lesson.quiz {
        let answer = input::prompt_quiz_answer(question)?;
        if answer == question.answer {
            println!("✓ Correct!");
        } else {
            println!("✗ The answer is: {}", question.options[question.answer]);
        }
        answers.push(answer);
    }

    let score = lesson.grade(&answers);
    println!(
        "\nYou scored {}/{} ({}%)",
        score.correct,
        score.total,
        score.percent()
    );

    Ok(())
}
