/// One line of user input from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add the text as an ingredient
    Add(String),
    /// Ask for a recipe from the current list
    Recipe,
    /// Show the ingredient list and recipe again
    List,
    Help,
    Quit,
    /// A `/word` that is not a known command
    Unknown(String),
    /// Nothing was typed
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        match line.strip_prefix('/') {
            Some(name) => match name.to_ascii_lowercase().as_str() {
                "recipe" | "r" => Command::Recipe,
                "list" | "l" => Command::List,
                "help" | "h" | "?" => Command::Help,
                "quit" | "q" | "exit" => Command::Quit,
                _ => Command::Unknown(line.to_string()),
            },
            None => Command::Add(line.to_string()),
        }
    }
}

pub const HELP: &str = "\
Type an ingredient and press enter to add it (e.g. oregano).
Commands:
  /recipe   ask Chef Claude for a recipe
  /list     show your ingredients and the latest recipe
  /help     show this message
  /quit     leave";
