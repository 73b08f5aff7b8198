//! Taskboard demo
//!
//! Opens the board in `TASKBOARD_DATA_DIR` (default `.taskboard-data`), seeds
//! a few users and tasks on first run, and logs what the board holds.

use anyhow::Context;
use taskboard_core::task::{NewTask, TaskPriority};
use taskboard_core::user::NewUser;
use taskboard_core::{Board, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_demo=info,taskboard_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let board = Board::open_with_config(&config)
        .await
        .context("Failed to open board")?;

    let mut events = board.subscribe();
    let event_log = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::debug!("Board event: {:?}", event);
        }
    });

    if board.list_users().await.is_empty() {
        seed(&board).await?;
    } else {
        info!("Board already populated, skipping seed");
    }

    info!("All users:");
    for user in board.list_users().await {
        match user.age {
            Some(age) => info!("  #{} {} ({})", user.id, user.name, age),
            None => info!("  #{} {}", user.id, user.name),
        }
    }

    info!("All tasks:");
    for task in board.list_tasks().await {
        let assignee = match task.assigned_to {
            Some(user_id) => board
                .user(user_id)
                .await
                .map(|user| user.name)
                .unwrap_or_else(|| format!("unknown user #{}", user_id)),
            None => "unassigned".to_string(),
        };
        info!(
            "  #{} {} [{} / {}] {}",
            task.id, task.title, task.status, task.priority, assignee
        );
    }

    if let Some(first) = board.list_users().await.into_iter().next() {
        let titles: Vec<String> = board
            .tasks_for(first.id)
            .await
            .into_iter()
            .map(|task| task.title)
            .collect();
        info!("Tasks assigned to {}: {:?}", first.name, titles);
    }

    drop(board);
    event_log.await.context("Event logger panicked")?;
    Ok(())
}

async fn seed(board: &Board) -> anyhow::Result<()> {
    info!("Seeding sample data");

    let nick = board.create_user(NewUser::new("Nick").with_age(38)).await?;
    let john = board.create_user(NewUser::new("John").with_age(27)).await?;
    board.create_user(NewUser::new("Liz").with_age(22)).await?;
    board.create_user(NewUser::new("Mel").with_age(24)).await?;

    let website = board
        .create_task(NewTask::new("Finish website assignment").with_priority(TaskPriority::High))
        .await?;
    let audible = board.create_task("Be audible").await?;
    let rust = board
        .create_task(NewTask::new("Learn Rust").with_priority(TaskPriority::Low))
        .await?;
    board.create_task("Practice story-telling").await?;

    board.assign_task(website.id, nick.id).await?;
    board.assign_task(rust.id, nick.id).await?;
    board.assign_task(audible.id, john.id).await?;
    Ok(())
}
