use chef_claude::command::{Command, HELP};
use chef_claude::{view, ChefError, CompletedRequest, Session};
use log::debug;
use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), ChefError> {
    env_logger::init();

    // Any arguments are ingredients to start with
    let seed: Vec<String> = env::args().skip(1).collect();
    let mut session = Session::builder().ingredients(seed).build()?;
    debug!("Using '{}' to generate recipes", session.generator_name());

    println!("{}", HELP);
    if session.can_request_recipe() {
        print!("\n{}", session.render());
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<CompletedRequest>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Command::Add(text) => match session.add_ingredient(text) {
                        Ok(()) => print!("{}", view::render_ingredients(session.ingredients())),
                        Err(e) => println!("{}", e),
                    },
                    Command::Recipe => match session.spawn_request(tx.clone()) {
                        Ok(_) => print!("{}", view::render_recipe(session.request_state(), None)),
                        Err(e) => println!("{}", e),
                    },
                    Command::List => print!("{}", session.render()),
                    Command::Help => println!("{}", HELP),
                    Command::Quit => break,
                    Command::Unknown(name) => {
                        println!("Unknown command {}. Type /help for the list.", name)
                    }
                    Command::Empty => {}
                }
            }
            Some(completed) = rx.recv() => {
                if let Some(recipe_area) = session.apply_completed(completed) {
                    print!("\n{}", recipe_area);
                }
            }
        }
    }

    Ok(())
}
