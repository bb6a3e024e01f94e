//! Terminal front end for the todo service.
//!
//! ```text
//! todo register <username> <email> <password>
//! todo login <email> <password>
//! todo logout
//! todo list
//! todo add <title> [description]
//! todo edit <id> <title> [description]
//! todo done <id>
//! todo show <id>
//! todo rm <id>
//! ```
//!
//! The session is kept under `TODO_SESSION_DIR` so it survives between runs.

use std::env;
use std::process::ExitCode;

use todo_core::{
    resolve, AuthService, ClientConfig, FileStore, LoginScreen, RegisterScreen, Route, Session,
    Todo, TodoPatch, TodoService, TodoWorkspace, UreqTransport,
};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "usage: todo <register|login|logout|list|add|edit|done|show|rm> [args...]";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = ClientConfig::load();
    let mut session = Session::load(FileStore::new(config.session_dir.clone()));
    let transport = UreqTransport::new();

    let Some((command, rest)) = args.split_first() else {
        return Err(USAGE.to_string());
    };

    match (command.as_str(), rest) {
        ("register", [username, email, password]) => {
            let auth = AuthService::new(&config.api_base_url, transport);
            let mut screen = RegisterScreen::default();
            screen.username = username.clone();
            screen.email = email.clone();
            screen.password = password.clone();
            screen.submit(&auth, &mut session);
            report(screen.error(), screen.notice())
        }
        ("login", [email, password]) => {
            let auth = AuthService::new(&config.api_base_url, transport);
            let mut screen = LoginScreen::default();
            screen.email = email.clone();
            screen.password = password.clone();
            screen.submit(&auth, &mut session);
            report(screen.error(), screen.notice())
        }
        ("logout", []) => {
            TodoWorkspace::new().logout(&mut session);
            println!("Logged out");
            Ok(())
        }
        ("register" | "login" | "logout", _) => Err(USAGE.to_string()),
        (command, rest) => {
            if resolve(Route::Todos.path(), &session) != Route::Todos {
                return Err("Not logged in; run `todo login <email> <password>`".to_string());
            }
            let todos = TodoService::new(&config.api_base_url, transport);
            let mut workspace = TodoWorkspace::new();
            workspace.enter(&todos, &session);
            if let Some(error) = workspace.error() {
                return Err(error.to_string());
            }
            workspace_command(&mut workspace, &todos, &session, command, rest)
        }
    }
}

fn workspace_command(
    workspace: &mut TodoWorkspace,
    todos: &TodoService<UreqTransport>,
    session: &Session<FileStore>,
    command: &str,
    args: &[String],
) -> Result<(), String> {
    let done = match (command, args) {
        ("list", []) => {
            workspace.todos().iter().for_each(print_todo);
            true
        }
        ("add", [title, description @ ..]) if description.len() <= 1 => {
            workspace.new_title = title.clone();
            workspace.new_description = description.first().cloned().unwrap_or_default();
            if workspace.new_title.trim().is_empty() {
                return Err("Title must not be empty".to_string());
            }
            match workspace.create(todos, session) {
                Some(todo) => {
                    print_todo(todo);
                    true
                }
                None => false,
            }
        }
        ("edit", [id, title, description @ ..]) if description.len() <= 1 => {
            let mut patch = TodoPatch::default().title(title.as_str());
            if let Some(description) = description.first() {
                patch = patch.description(description.as_str());
            }
            workspace.update(todos, session, id, patch)
        }
        ("done", [id]) => workspace.mark_done(todos, session, id),
        ("show", [id]) => match workspace.reload(todos, session, id) {
            Some(todo) => {
                print_todo(todo);
                true
            }
            None => false,
        },
        ("rm", [id]) => workspace.delete(todos, session, id),
        _ => return Err(USAGE.to_string()),
    };

    match workspace.error() {
        Some(error) if !done => Err(error.to_string()),
        _ => Ok(()),
    }
}

fn report(error: Option<&str>, notice: Option<&str>) -> Result<(), String> {
    if let Some(error) = error {
        return Err(error.to_string());
    }
    if let Some(notice) = notice {
        println!("{notice}");
    }
    Ok(())
}

fn print_todo(todo: &Todo) {
    let mark = if todo.completed { "x" } else { " " };
    match &todo.description {
        Some(description) => println!("[{mark}] {}  {} - {description}", todo.id, todo.title),
        None => println!("[{mark}] {}  {}", todo.id, todo.title),
    }
}
