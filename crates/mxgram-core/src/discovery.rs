//! Chat id discovery from pending bot updates.

use std::collections::HashSet;

use crate::messaging::{
    port::MessagingPort,
    types::{BotIdentity, ChatCandidate, SendError},
};

/// Identity plus the distinct chats seen in the pending update batch.
#[derive(Clone, Debug)]
pub struct DiscoveryReport {
    pub identity: BotIdentity,
    pub chats: Vec<ChatCandidate>,
}

/// Fetch the bot identity and the distinct chats from pending updates.
///
/// Purely observational: update offsets are never acknowledged, so repeated
/// runs see the same batch. Duplicate chat ids collapse to the first
/// occurrence, preserving order.
pub async fn discover_chats(api: &dyn MessagingPort) -> Result<DiscoveryReport, SendError> {
    let identity = api.identity().await?;

    let mut seen = HashSet::new();
    let mut chats = Vec::new();
    for candidate in api.pending_chats().await? {
        if seen.insert(candidate.id) {
            chats.push(candidate);
        }
    }

    Ok(DiscoveryReport { identity, chats })
}
