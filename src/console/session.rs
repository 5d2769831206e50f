//! Console session
//!
//! The interactive menu loop. Reads choices and arguments line by line,
//! runs each command on the blocking pool, and writes the outcome back.

use log::{info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::ManagerConfig;
use crate::console::commands::{Command, MENU, parse_choice};
use crate::console::handlers::{CommandStatus, handle_command};
use crate::error::ConsoleError;
use crate::storage::FileManager;

enum Input {
    Line(String),
    TooLong,
    NotUtf8,
    Eof,
}

async fn read_input<R>(reader: &mut R, max_len: usize) -> Result<Input, ConsoleError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(Input::Eof);
    }

    let Ok(line) = std::str::from_utf8(&buf) else {
        return Ok(Input::NotUtf8);
    };

    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.len() > max_len {
        return Ok(Input::TooLong);
    }

    Ok(Input::Line(trimmed.trim().to_string()))
}

async fn write_text<W>(writer: &mut W, text: &str) -> Result<(), ConsoleError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Runs the menu loop until the user exits or input ends.
///
/// Only terminal I/O failures end the session with an error; every
/// filesystem failure is reported and the loop continues.
pub async fn run_session<R, W>(
    engine: Arc<FileManager>,
    config: &ManagerConfig,
    mut reader: R,
    mut writer: W,
) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let max_len = config.max_input_length;

    'menu: loop {
        write_text(&mut writer, MENU).await?;
        write_text(&mut writer, &config.prompt).await?;

        let line = match read_input(&mut reader, max_len).await? {
            Input::Line(line) => line,
            Input::TooLong => {
                write_text(&mut writer, "Input too long.\n").await?;
                continue;
            }
            Input::NotUtf8 => {
                warn!("Discarded input line that is not valid UTF-8");
                write_text(&mut writer, "Input is not valid UTF-8.\n").await?;
                continue;
            }
            Input::Eof => break,
        };

        let (choice, mut args) = match parse_choice(&line) {
            Ok(parsed) => parsed,
            Err(raw) => {
                warn!("Invalid menu choice: {:?}", raw);
                write_text(
                    &mut writer,
                    "Invalid choice. Please enter a valid option.\n",
                )
                .await?;
                continue;
            }
        };

        for prompt in choice.prompts().iter().skip(args.len()) {
            write_text(&mut writer, prompt).await?;
            match read_input(&mut reader, max_len).await? {
                Input::Line(arg) => args.push(arg),
                Input::TooLong => {
                    write_text(&mut writer, "Input too long.\n").await?;
                    continue 'menu;
                }
                Input::NotUtf8 => {
                    write_text(&mut writer, "Input is not valid UTF-8.\n").await?;
                    continue 'menu;
                }
                Input::Eof => break 'menu,
            }
        }

        let Some(command) = Command::build(choice, args) else {
            write_text(&mut writer, "Invalid choice. Please enter a valid option.\n").await?;
            continue;
        };
        info!("Received command: {:?}", command);

        let engine = Arc::clone(&engine);
        let result = tokio::task::spawn_blocking(move || handle_command(&engine, &command)).await?;

        write_text(&mut writer, &result.message).await?;
        if result.status == CommandStatus::Exit {
            break;
        }
    }

    info!("Console session ended");
    Ok(())
}
