//! Menu commands
//!
//! Parses menu input into commands. A choice may carry its arguments on the
//! same line (`4 old new`); whatever is missing is prompted for.

pub const MENU: &str = "\
File Manager Menu:
1. Show Disk Content
2. Create Folder
3. Delete Folder/File
4. Rename Folder/File
5. Copy Folder/File
6. Get Size of Folder/File
7. Search Files by Mask
8. Exit
";

/// A menu choice before its arguments are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowContent,
    CreateFolder,
    Delete,
    Rename,
    Copy,
    Size,
    Search,
    Exit,
}

impl MenuChoice {
    /// Prompts for the arguments this choice needs, in order.
    pub fn prompts(self) -> &'static [&'static str] {
        match self {
            MenuChoice::ShowContent | MenuChoice::Exit => &[],
            MenuChoice::CreateFolder => &["Enter folder name to create: "],
            MenuChoice::Delete => &["Enter folder/file name to delete: "],
            MenuChoice::Rename => &["Enter old name: ", "Enter new name: "],
            MenuChoice::Copy => &["Enter source name: ", "Enter destination name: "],
            MenuChoice::Size => &["Enter folder/file name to get size: "],
            MenuChoice::Search => &["Enter file mask (e.g., .txt): "],
        }
    }
}

/// A complete command ready to run against the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    CreateFolder(String),
    Delete(String),
    Rename { from: String, to: String },
    Copy { from: String, to: String },
    Size(String),
    Search(String),
    Exit,
}

impl Command {
    /// Builds a command from a choice and exactly `choice.prompts().len()`
    /// arguments. Returns `None` if the count is wrong.
    pub fn build(choice: MenuChoice, mut args: Vec<String>) -> Option<Self> {
        if args.len() != choice.prompts().len() {
            return None;
        }

        let command = match choice {
            MenuChoice::ShowContent => Command::List,
            MenuChoice::Exit => Command::Exit,
            MenuChoice::CreateFolder => Command::CreateFolder(args.pop()?),
            MenuChoice::Delete => Command::Delete(args.pop()?),
            MenuChoice::Size => Command::Size(args.pop()?),
            MenuChoice::Search => Command::Search(args.pop()?),
            MenuChoice::Rename => {
                let to = args.pop()?;
                let from = args.pop()?;
                Command::Rename { from, to }
            }
            MenuChoice::Copy => {
                let to = args.pop()?;
                let from = args.pop()?;
                Command::Copy { from, to }
            }
        };

        Some(command)
    }
}

/// Parses a menu line into a choice plus any inline arguments.
///
/// Inline arguments beyond what the choice takes are dropped. Returns the
/// trimmed input as the error when the choice is not recognised.
pub fn parse_choice(raw: &str) -> Result<(MenuChoice, Vec<String>), String> {
    let trimmed = raw.trim();
    let mut parts = trimmed.split_whitespace();
    let token = parts.next().unwrap_or("").to_ascii_lowercase();

    let choice = match token.as_str() {
        "1" | "ls" | "list" => MenuChoice::ShowContent,
        "2" | "mkdir" => MenuChoice::CreateFolder,
        "3" | "rm" | "del" => MenuChoice::Delete,
        "4" | "mv" | "rename" => MenuChoice::Rename,
        "5" | "cp" | "copy" => MenuChoice::Copy,
        "6" | "size" => MenuChoice::Size,
        "7" | "find" | "search" => MenuChoice::Search,
        "8" | "q" | "quit" | "exit" => MenuChoice::Exit,
        _ => return Err(trimmed.to_string()),
    };

    let args = parts
        .take(choice.prompts().len())
        .map(str::to_string)
        .collect();

    Ok((choice, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_choices() {
        assert_eq!(parse_choice("1"), Ok((MenuChoice::ShowContent, vec![])));
        assert_eq!(parse_choice("8"), Ok((MenuChoice::Exit, vec![])));
        assert_eq!(parse_choice("Q"), Ok((MenuChoice::Exit, vec![])));
        assert_eq!(parse_choice("  7  "), Ok((MenuChoice::Search, vec![])));
    }

    #[test]
    fn test_parse_inline_arguments() {
        assert_eq!(
            parse_choice("4 old.txt new.txt"),
            Ok((
                MenuChoice::Rename,
                vec!["old.txt".to_string(), "new.txt".to_string()]
            ))
        );
        assert_eq!(
            parse_choice("2 docs extra"),
            Ok((MenuChoice::CreateFolder, vec!["docs".to_string()]))
        );
    }

    #[test]
    fn test_parse_unknown_choices() {
        assert_eq!(parse_choice("9"), Err("9".to_string()));
        assert_eq!(parse_choice(""), Err("".to_string()));
        assert_eq!(parse_choice("FOO bar"), Err("FOO bar".to_string()));
    }

    #[test]
    fn test_build_commands() {
        assert_eq!(
            Command::build(MenuChoice::Copy, vec!["a".into(), "b".into()]),
            Some(Command::Copy {
                from: "a".into(),
                to: "b".into()
            })
        );
        assert_eq!(Command::build(MenuChoice::ShowContent, vec![]), Some(Command::List));
        assert_eq!(Command::build(MenuChoice::Delete, vec![]), None);
    }
}
