use anyhow::Result;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::domain::breathing::{schedule, session_seconds, MAX_SESSION_MINUTES};

pub fn handle_relax(minutes: u64) -> Result<()> {
    let Some(total_seconds) = session_seconds(minutes) else {
        anyhow::bail!(
            "Session length must be between 1 and {} minutes",
            MAX_SESSION_MINUTES
        );
    };
    println!("\n4-7-8 Breathing ({} min)", minutes);
    println!("Sit comfortably. Press Ctrl+C to stop at any time.\n");

    let mut stdout = io::stdout();
    for step in schedule(total_seconds) {
        for elapsed in 0..step.seconds {
            let left = step.remaining - elapsed;
            print!(
                "\r{:<7} {:<38} {:>2}s  (time left {:02}:{:02}) ",
                step.phase.to_string(),
                step.phase.instruction(),
                step.seconds - elapsed,
                left / 60,
                left % 60
            );
            stdout.flush()?;
            thread::sleep(Duration::from_secs(1));
        }
    }

    println!("\r{:<80}", "");
    println!("✓ Session complete. Notice how you feel.");
    Ok(())
}
