//! Subcommands and their execution against the API client.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use todo_core::ApiClient;
use todo_core::domain::Task;
use todo_shared::dto::{LoginRequest, RegisterRequest, TaskCreate, TaskUpdate};

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Manage your todo list from the terminal")]
pub struct Cli {
    /// Print raw JSON instead of formatted text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and sign in with it.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Sign in and store the session tokens.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session tokens.
    Logout,
    /// Show whether a session is stored.
    Status,
    /// List all tasks.
    List,
    /// Create a task.
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Show one task.
    Show { id: i64 },
    /// Change fields of a task.
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Mark a task as completed or pending.
    Toggle {
        id: i64,
        #[arg(action = clap::ArgAction::Set)]
        completed: bool,
    },
    /// Delete a task.
    Delete { id: i64 },
    /// Show task counts.
    Stats,
}

/// Execute one command.
pub async fn run(client: &ApiClient, command: Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Register {
            email,
            password,
            name,
        } => {
            let tokens = client
                .register(&RegisterRequest {
                    email: email.clone(),
                    password,
                    name,
                })
                .await?;
            client
                .session()
                .persist(&tokens)
                .context("Registered, but the session could not be saved")?;
            println!("Registered and signed in as {email}");
        }
        Command::Login { email, password } => {
            let tokens = client
                .login(&LoginRequest {
                    email: email.clone(),
                    password,
                })
                .await?;
            client
                .session()
                .persist(&tokens)
                .context("Signed in, but the session could not be saved")?;
            println!("Signed in as {email}");
        }
        Command::Logout => {
            client.logout();
            println!("Signed out");
        }
        Command::Status => {
            if client.is_authenticated() {
                println!("Signed in ({})", client.base_url());
            } else {
                println!("Not signed in ({})", client.base_url());
            }
        }
        Command::List => {
            let tasks = client.list_tasks().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks yet");
            } else {
                for task in &tasks {
                    println!("{}", task_line(task));
                }
            }
        }
        Command::Add { title, description } => {
            let mut payload = TaskCreate::new(title);
            payload.description = description;
            let task = client.create_task(&payload).await?;
            print_task(&task, json)?;
        }
        Command::Show { id } => {
            let task = client.get_task(id).await?;
            print_task(&task, json)?;
        }
        Command::Edit {
            id,
            title,
            description,
            completed,
        } => {
            let update = TaskUpdate {
                title,
                description,
                completed,
            };
            if update.is_empty() {
                bail!("Nothing to change: pass --title, --description or --completed");
            }
            let task = client.update_task(id, &update).await?;
            print_task(&task, json)?;
        }
        Command::Toggle { id, completed } => {
            let task = client.toggle_task_completion(id, completed).await?;
            print_task(&task, json)?;
        }
        Command::Delete { id } => {
            client.delete_task(id).await?;
            println!("Deleted task {id}");
        }
        Command::Stats => {
            let stats = client.task_statistics().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "{} total, {} pending, {} completed",
                    stats.total, stats.pending, stats.completed
                );
            }
        }
    }

    Ok(())
}

fn task_line(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!("[{mark}] #{} {}", task.id, task.title)
}

fn print_task(task: &Task, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }
    println!("{}", task_line(task));
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!("    {description}");
    }
    match task.updated() {
        Some(ts) => println!("    updated {}", ts.format("%Y-%m-%d %H:%M UTC")),
        None => println!("    updated {}", task.updated_at),
    }
    Ok(())
}
