//! CLI parser and the read-only inspection commands (stats, messages, bookings).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storage::{
    BookingRecord, BookingRepository, DailyCount, MessageQuery, MessageRecord, MessageRepository,
    MessageStats,
};

use super::config::{database_url_from_env, BotConfig};

const CONTENT_PREVIEW_LEN: usize = 60;

#[derive(Parser)]
#[command(name = "femida")]
#[command(about = "Femida support bot: run, stats, messages, bookings", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override MY_KEY).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print message totals and per-day counts from DATABASE_URL.
    Stats,
    /// List stored messages, newest first.
    Messages {
        #[arg(short, long, default_value = "20")]
        limit: i64,
        #[arg(long)]
        chat_id: Option<i64>,
    },
    /// List stored bookings, newest first.
    Bookings {
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides MY_KEY.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

pub async fn handle_stats() -> Result<()> {
    let database_url = database_url_from_env();
    let repo = MessageRepository::new(&database_url)
        .await
        .with_context(|| format!("Open message storage at {}", database_url))?;

    let stats = repo.get_stats().await.context("Query message statistics")?;
    let daily = repo.count_by_day().await.context("Query per-day counts")?;

    print!("{}", format_stats(&stats, &daily));
    Ok(())
}

pub async fn handle_messages(limit: i64, chat_id: Option<i64>) -> Result<()> {
    let database_url = database_url_from_env();
    let repo = MessageRepository::new(&database_url)
        .await
        .with_context(|| format!("Open message storage at {}", database_url))?;

    let query = MessageQuery {
        chat_id,
        limit: Some(limit),
        ..Default::default()
    };
    let messages = repo.get_messages(&query).await.context("Query messages")?;

    if messages.is_empty() {
        println!("No messages (database: {}).", database_url);
        return Ok(());
    }
    print!("{}", format_messages(&messages));
    Ok(())
}

pub async fn handle_bookings(limit: i64) -> Result<()> {
    let database_url = database_url_from_env();
    let repo = BookingRepository::new(&database_url)
        .await
        .with_context(|| format!("Open booking storage at {}", database_url))?;

    let bookings = repo.list_recent(limit).await.context("Query bookings")?;

    if bookings.is_empty() {
        println!("No bookings (database: {}).", database_url);
        return Ok(());
    }
    print!("{}", format_bookings(&bookings));
    Ok(())
}

pub fn format_stats(stats: &MessageStats, daily: &[DailyCount]) -> String {
    let when = |t: &Option<chrono::DateTime<chrono::Utc>>| {
        t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let mut out = String::new();
    out.push_str(&format!("Total messages:    {}\n", stats.total_messages));
    out.push_str(&format!("Received:          {}\n", stats.received_messages));
    out.push_str(&format!("Sent:              {}\n", stats.sent_messages));
    out.push_str(&format!("Unique users:      {}\n", stats.unique_users));
    out.push_str(&format!("Unique chats:      {}\n", stats.unique_chats));
    out.push_str(&format!("First message:     {}\n", when(&stats.first_message)));
    out.push_str(&format!("Last message:      {}\n", when(&stats.last_message)));

    if !daily.is_empty() {
        out.push_str(&format!("\n{:<12} {}\n", "Day", "Messages"));
        for count in daily {
            out.push_str(&format!("{:<12} {}\n", count.day, count.message_count));
        }
    }
    out
}

pub fn format_messages(messages: &[MessageRecord]) -> String {
    let mut out = format!(
        "{:<20} {:<12} {:<12} {:<9} {}\n",
        "Time", "Chat", "User", "Dir", "Content"
    );
    for m in messages {
        out.push_str(&format!(
            "{:<20} {:<12} {:<12} {:<9} {}\n",
            m.created_at.format("%Y-%m-%d %H:%M:%S"),
            m.chat_id,
            m.username.as_deref().unwrap_or("-"),
            m.direction,
            preview(&m.content)
        ));
    }
    out
}

pub fn format_bookings(bookings: &[BookingRecord]) -> String {
    let mut out = format!(
        "{:<6} {:<12} {:<16} {:<17} {}\n",
        "Id", "User id", "Username", "Session", "Booked at"
    );
    for b in bookings {
        out.push_str(&format!(
            "{:<6} {:<12} {:<16} {:<17} {}\n",
            b.id,
            b.user_id,
            b.username.as_deref().unwrap_or("-"),
            b.booking_time.format("%Y-%m-%d %H:%M"),
            b.created_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    out
}

fn preview(content: &str) -> String {
    let flat = content.replace('\n', " ");
    if flat.chars().count() <= CONTENT_PREVIEW_LEN {
        return flat;
    }
    let cut: String = flat.chars().take(CONTENT_PREVIEW_LEN).collect();
    format!("{}...", cut)
}
