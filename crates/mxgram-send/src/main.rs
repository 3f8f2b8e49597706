//! Telegram message sender.
//!
//! With a destination chat configured, posts the message file to it. Without
//! one, lists the chats currently visible to the bot so the user can pick a
//! chat id.

use mxgram_core::{
    config::SenderConfig,
    discovery,
    logging,
    messaging::{port::MessagingPort, types::ChatId},
    sender::{self, SendOutcome, TokioDelay},
};
use mxgram_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("mxgram_send")?;

    println!("{}", "=".repeat(60));
    println!("🤖 TELEGRAM MESSAGE SENDER");
    println!("{}", "=".repeat(60));

    let cfg = SenderConfig::load()?;
    let api = TelegramMessenger::from_token(&cfg.bot_token);

    match cfg.chat_id {
        Some(id) => run_send(&api, &cfg, ChatId(id)).await,
        None => {
            println!("\nTELEGRAM_CHAT_ID is not set; listing chats seen by the bot instead.");
            run_discovery(&api).await;
        }
    }

    Ok(())
}

async fn run_send(api: &dyn MessagingPort, cfg: &SenderConfig, chat_id: ChatId) {
    println!(
        "\n📤 Sending {} to chat {}...",
        cfg.message_file.display(),
        chat_id.0
    );

    match sender::send_from_file(api, &TokioDelay, cfg, chat_id).await {
        SendOutcome::Sent { chunks: 1, chars } => {
            println!("✅ Message sent ({chars} characters)");
        }
        SendOutcome::Sent { chunks, chars } => {
            println!("✅ Message sent in {chunks} chunks ({chars} characters)");
        }
        SendOutcome::FileMissing { path } => {
            println!("❌ File '{}' not found", path.display());
        }
        SendOutcome::FileUnreadable { path, message } => {
            println!("❌ Could not read '{}': {message}", path.display());
        }
        SendOutcome::FileEmpty { path } => {
            println!("❌ File '{}' is empty", path.display());
        }
        SendOutcome::TransportFailed {
            error,
            sent_chunks,
            total_chunks,
        } => {
            if total_chunks > 1 {
                println!(
                    "❌ Telegram API error after {sent_chunks}/{total_chunks} chunks: {}",
                    error.message
                );
            } else {
                println!("❌ Telegram API error: {}", error.message);
            }
            if let Some(hint) = error.kind.hint() {
                println!("   💡 {hint}");
            }
        }
    }
}

async fn run_discovery(api: &dyn MessagingPort) {
    let report = match discovery::discover_chats(api).await {
        Ok(report) => report,
        Err(e) => {
            println!("❌ Telegram API error: {}", e.message);
            if let Some(hint) = e.kind.hint() {
                println!("   💡 {hint}");
            }
            return;
        }
    };

    println!("\n🤖 Bot:");
    println!("   Name: {}", report.identity.first_name);
    println!("   Username: @{}", report.identity.username);
    println!("   ID: {}", report.identity.id);

    if report.chats.is_empty() {
        println!("\n❌ No pending updates.");
        println!("   1. Open @{} in Telegram", report.identity.username);
        println!("   2. Send /start");
        println!("   3. Run this program again");
        return;
    }

    println!("\n📋 Chats seen:");
    for chat in &report.chats {
        println!("\n💬 Chat ID: {}", chat.id.0);
        println!("   Type: {}", chat.kind);
        if let Some(username) = &chat.username {
            println!("   Username: @{username}");
        }
        if let Some(first_name) = &chat.first_name {
            println!("   Name: {first_name}");
        }
        if let Some(title) = &chat.title {
            println!("   Title: {title}");
        }
    }

    println!(
        "\n✅ Found {} chat(s); set TELEGRAM_CHAT_ID to the one you want.",
        report.chats.len()
    );
}
