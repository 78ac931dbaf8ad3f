//! Demo commands.
//!
//! A greeter, a counter, a calculator, a small todo list, a file inspector
//! and a reminder, enough to exercise every parameter kind from the prompt.

use std::cell::{Cell, RefCell};
use std::fs;
use std::rc::Rc;

use chrono::{Local, NaiveDateTime, TimeDelta};
use icl::{Command, Console, ConsoleConfig, ConsoleError, Parameter};

/// Autocompletion list holding the titles of open todos.
pub const TODO_LIST: &str = "todos";

/// Date-time format accepted by `remind --at`.
const REMINDER_FORMAT: &str = "%d-%m-%Y %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub title: String,
    pub priority: i32,
    pub due: Option<NaiveDateTime>,
    pub tags: Vec<String>,
}

/// State shared between the demo handlers and the read loop.
#[derive(Debug, Clone, Default)]
pub struct DemoState {
    todos: Rc<RefCell<Vec<Todo>>>,
    quit: Rc<Cell<bool>>,
}

impl DemoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Titles of the open todos, in insertion order.
    pub fn titles(&self) -> Vec<String> {
        self.todos.borrow().iter().map(|t| t.title.clone()).collect()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.todos.borrow().clone()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.get()
    }
}

/// Console with every demo command registered and the todo list published.
pub fn demo_console(config: ConsoleConfig, state: &DemoState) -> Result<Console, ConsoleError> {
    let mut console = Console::new(config);
    for command in demo_commands(state) {
        console.register(command)?;
    }
    console.set_completion_list(TODO_LIST, state.titles());
    Ok(console)
}

pub fn demo_commands(state: &DemoState) -> Vec<Command> {
    vec![
        greet(),
        count(),
        calc(),
        todo_add(state),
        todo_done(state),
        todo_list(state),
        stat(),
        remind(),
        quit(state),
    ]
}

fn greet() -> Command {
    Command::new("greet")
        .describe("Greets you by name")
        .example("greet John")
        .example("greet \"John Smith\"")
        .parameter(Parameter::text("name").describe("Your name").required().length(1, 64))
        .handler(|args| {
            println!("Hello {} and welcome to ICL!", args.text("name").unwrap_or_default());
            Ok(())
        })
}

fn count() -> Command {
    Command::new("count")
        .describe("Counts from 1 to your number")
        .example("count 10")
        .parameter(
            Parameter::integer("number", 1, 100)
                .describe("The number to count to")
                .required(),
        )
        .handler(|args| {
            let number = args.integer("number").ok_or("number not bound")?;
            let line: Vec<String> = (1..=number).map(|i| i.to_string()).collect();
            println!("{}", line.join(", "));
            Ok(())
        })
}

fn calc() -> Command {
    Command::new("calc")
        .describe("A simple calculator")
        .example("calc 1 + 2")
        .example("calc 6 / 2")
        .parameter(Parameter::long("left", i64::MIN, i64::MAX).describe("The left term").required())
        .parameter(Parameter::text("operation").describe("The operation").required().length(1, 1))
        .parameter(Parameter::long("right", i64::MIN, i64::MAX).describe("The right term").required())
        .handler(|args| {
            let left = args.long("left").ok_or("left term not bound")?;
            let right = args.long("right").ok_or("right term not bound")?;
            println!("{}", evaluate(left, args.text("operation").unwrap_or_default(), right)?);
            Ok(())
        })
}

/// Apply a single-character operator.
pub fn evaluate(left: i64, operation: &str, right: i64) -> Result<i64, String> {
    let result = match operation {
        "+" => left.checked_add(right),
        "-" => left.checked_sub(right),
        "*" => left.checked_mul(right),
        "/" | "%" if right == 0 => return Err("Division by zero".to_string()),
        "/" => left.checked_div(right),
        "%" => left.checked_rem(right),
        _ => return Err(format!("Operation '{}' not supported", operation)),
    };
    result.ok_or_else(|| "Result out of range".to_string())
}

fn todo_add(state: &DemoState) -> Command {
    let todos = Rc::clone(&state.todos);
    Command::new("todo-add")
        .describe("Adds an item to the todo list")
        .example("todo-add \"buy milk\"")
        .example("todo-add report -p 1 --due 24-12-2025 --tags work,q4")
        .parameter(
            Parameter::text("title")
                .describe("What needs doing")
                .required()
                .length(1, 60),
        )
        .parameter(Parameter::integer("p", 1, 5).describe("Priority, 1 is highest").default_value(3))
        .parameter(Parameter::datetime("due").describe("Due date"))
        .parameter(Parameter::text_array("tags", 0, 5).describe("Comma-separated tags"))
        .handler(move |args| {
            let title = args.text("title").unwrap_or_default().to_string();
            let mut todos = todos.borrow_mut();
            if todos.iter().any(|t| t.title == title) {
                return Err(format!("'{}' is already on the list", title).into());
            }
            todos.push(Todo {
                title,
                priority: args.integer("p").unwrap_or(3),
                due: args.datetime("due"),
                tags: args.text_array("tags").map(<[String]>::to_vec).unwrap_or_default(),
            });
            println!("{} open item(s)", todos.len());
            Ok(())
        })
}

fn todo_done(state: &DemoState) -> Command {
    let todos = Rc::clone(&state.todos);
    Command::new("todo-done")
        .describe("Removes an item from the todo list")
        .example("todo-done \"buy milk\"")
        .parameter(
            Parameter::text("title")
                .describe("The finished item")
                .required()
                .completion_list(TODO_LIST),
        )
        .handler(move |args| {
            let title = args.text("title").unwrap_or_default();
            let mut todos = todos.borrow_mut();
            let index = todos
                .iter()
                .position(|t| t.title == title)
                .ok_or_else(|| format!("No todo named '{}'", title))?;
            todos.remove(index);
            println!("Done: {}", title);
            Ok(())
        })
}

fn todo_list(state: &DemoState) -> Command {
    let todos = Rc::clone(&state.todos);
    Command::new("todo-list")
        .describe("Shows the todo list")
        .example("todo-list")
        .example("todo-list --sort priority")
        .parameter(
            Parameter::enumeration("sort", ["added", "priority", "due"])
                .describe("Sort order")
                .default_value("added"),
        )
        .handler(move |args| {
            let mut items = todos.borrow().clone();
            match args.choice("sort") {
                Some("priority") => items.sort_by_key(|t| t.priority),
                Some("due") => items.sort_by_key(|t| (t.due.is_none(), t.due)),
                _ => {}
            }
            if items.is_empty() {
                println!("Nothing to do");
            }
            for todo in items {
                let due = todo
                    .due
                    .map(|d| format!(" (due {})", d.format("%d-%m-%Y")))
                    .unwrap_or_default();
                let tags = if todo.tags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", todo.tags.join(", "))
                };
                println!("p{} {}{}{}", todo.priority, todo.title, due, tags);
            }
            Ok(())
        })
}

fn stat() -> Command {
    Command::new("stat")
        .describe("Shows the type and size of a file or folder")
        .example("stat Cargo.toml")
        .parameter(
            Parameter::file_or_folder("path")
                .describe("The file or folder to inspect")
                .required(),
        )
        .parameter(Parameter::boolean("l").describe("List folder entries"))
        .handler(|args| {
            let path = args.path("path").ok_or("path not bound")?;
            let metadata = fs::metadata(path)?;
            if metadata.is_dir() {
                let entries = fs::read_dir(path)?.count();
                println!("{}: folder, {} entries", path.display(), entries);
                if args.flag("l") {
                    for entry in fs::read_dir(path)?.flatten() {
                        println!("  {}", entry.file_name().to_string_lossy());
                    }
                }
            } else {
                println!("{}: file, {} bytes", path.display(), metadata.len());
            }
            Ok(())
        })
}

fn remind() -> Command {
    Command::new("remind")
        .describe("Tells you when a reminder would fire")
        .example("remind \"stand up\" --in 300")
        .example("remind lunch --at \"24-12-2025 12:30\"")
        .parameter(Parameter::text("message").describe("What to remember").required())
        .parameter(
            Parameter::datetime("at")
                .describe("Exact time")
                .format(REMINDER_FORMAT),
        )
        .parameter(
            Parameter::long("in", 1, 7 * 24 * 3600)
                .describe("Delay in seconds")
                .default_value(60i64),
        )
        .handler(|args| {
            let message = args.text("message").unwrap_or_default();
            let at = match args.datetime("at") {
                Some(at) => at,
                None => {
                    let seconds = args.long("in").ok_or("delay not bound")?;
                    let delay = TimeDelta::try_seconds(seconds).ok_or("delay out of range")?;
                    Local::now().naive_local() + delay
                }
            };
            println!("Reminder '{}' at {}", message, at.format(REMINDER_FORMAT));
            Ok(())
        })
}

fn quit(state: &DemoState) -> Command {
    let quit = Rc::clone(&state.quit);
    Command::new("quit")
        .describe("Quits the program")
        .example("quit")
        .handler(move |_| {
            quit.set(true);
            Ok(())
        })
}

// =============================================================================
// Tests
// =============================================================================
