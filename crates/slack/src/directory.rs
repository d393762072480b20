//! Local snapshot of the workspace's channels.

use std::collections::HashMap;

/// One channel known to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// Channel lookup by id, `#name`, or bare name.
///
/// Populated once during the handshake; outbound messages whose destination
/// does not resolve here are dropped at flush time.
#[derive(Debug, Default)]
pub struct ChannelDirectory {
    by_id: HashMap<String, Channel>,
}

impl ChannelDirectory {
    pub fn new(channels: impl IntoIterator<Item = Channel>) -> Self {
        let by_id = channels.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self { by_id }
    }

    /// Resolve a destination to a known channel.
    pub fn resolve(&self, destination: &str) -> Option<&Channel> {
        if let Some(channel) = self.by_id.get(destination) {
            return Some(channel);
        }
        let name = destination.strip_prefix('#').unwrap_or(destination);
        self.by_id.values().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> ChannelDirectory {
        ChannelDirectory::new([
            Channel {
                id: "C024BE91L".into(),
                name: "general".into(),
            },
            Channel {
                id: "C1HQQ5UFG".into(),
                name: "random".into(),
            },
        ])
    }

    #[test]
    fn resolves_by_id() {
        let dir = directory();
        assert_eq!(dir.resolve("C024BE91L").map(|c| c.name.as_str()), Some("general"));
    }

    #[test]
    fn resolves_by_hash_name_and_bare_name() {
        let dir = directory();
        assert_eq!(dir.resolve("#random").map(|c| c.id.as_str()), Some("C1HQQ5UFG"));
        assert_eq!(dir.resolve("random").map(|c| c.id.as_str()), Some("C1HQQ5UFG"));
    }

    #[test]
    fn unknown_destination_is_none() {
        let dir = directory();
        assert!(dir.resolve("#nope").is_none());
        assert!(dir.resolve("C0UNKNOWN").is_none());
    }
}
