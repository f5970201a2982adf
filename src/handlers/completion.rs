use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};
use std::io;

use crate::cli::commands::Cli;

const BIN_NAME: &str = "mindsync";

pub fn handle_completion(shell: &str) -> Result<()> {
    let mut cmd = Cli::command();

    match shell.to_lowercase().as_str() {
        "bash" => {
            generate(shells::Bash, &mut cmd, BIN_NAME, &mut io::stdout());
            println!();
            println!("# To enable completion, add the following to your shell config:");
            println!("#   eval \"$(mindsync completion bash)\"");
        }
        "zsh" => {
            generate(shells::Zsh, &mut cmd, BIN_NAME, &mut io::stdout());
            println!();
            println!("# To enable completion, add the following to your shell config:");
            println!("#   eval \"$(mindsync completion zsh)\"");
        }
        "fish" => {
            generate(shells::Fish, &mut cmd, BIN_NAME, &mut io::stdout());
            println!();
            println!("# To enable completion, save to ~/.config/fish/completions/mindsync.fish:");
            println!("#   mindsync completion fish > ~/.config/fish/completions/mindsync.fish");
        }
        _ => {
            return Err(anyhow::anyhow!(
                "Unsupported shell: {}. Supported shells: bash, zsh, fish",
                shell
            ));
        }
    }

    Ok(())
}
