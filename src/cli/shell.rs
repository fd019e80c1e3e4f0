//! Interactive session: one process, many commands, one debounced writer

use anyhow::{Result, bail};
use clap::Parser;
use colored::*;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::app::{Cli, Commands};
use super::commands;
use super::context::Session;
use super::ui;
use crate::config::Config;

const PROMPT: &str = "agri-erp> ";

pub async fn run(config: Config, actor: Option<String>) -> Result<()> {
    let mut session = Session::open(config, actor).await?;
    println!(
        "{} {} on {}. Type {} for commands, {} to leave.",
        "Agri ERP".bright_white().bold(),
        session.erp.actor().name().bright_yellow(),
        session.backend(),
        "help".bold(),
        "exit".bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", PROMPT);
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => {
                ui::failure(&e.to_string());
                continue;
            }
        };

        let args = std::iter::once("agri-erp".to_string()).chain(words);
        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };
        if cli.actor.is_some() {
            ui::warning("--as only applies when starting the shell");
        }
        if matches!(cli.command, Commands::Shell | Commands::Auth(_)) {
            ui::warning("Leave the shell to run this command");
            continue;
        }

        if let Err(e) = commands::execute(&mut session, cli.command) {
            log::warn!("Command failed: {:#}", e);
            ui::failure(&format!("{:#}", e));
        }
    }

    session.close().await
}

/// Splits a command line on whitespace, honouring single and double quotes
pub(crate) fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') => match chars.next() {
                Some(next) => current.push(next),
                None => bail!("Line ends with an escape"),
            },
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        bail!("Unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_honours_quotes() {
        let words = split_words(r#"sales enquiry --customer "SunDry Foods" --product 'Onion Flakes' --qty 10"#).unwrap();
        assert_eq!(
            words,
            vec!["sales", "enquiry", "--customer", "SunDry Foods", "--product", "Onion Flakes", "--qty", "10"]
        );
        assert_eq!(split_words(r#"note "" end"#).unwrap(), vec!["note", "", "end"]);
        assert_eq!(split_words(r#"say "a \"b\"""#).unwrap(), vec!["say", r#"a "b""#]);
        assert!(split_words("open 'quote").is_err());
    }

    #[test]
    fn test_shell_lines_parse_as_commands() {
        let words = split_words("inspection qc --batch B7 --moisture 9.5 --color Pale --status failed").unwrap();
        let cli = Cli::try_parse_from(std::iter::once("agri-erp".to_string()).chain(words)).unwrap();
        assert!(matches!(cli.command, Commands::Inspection(_)));
    }
}
