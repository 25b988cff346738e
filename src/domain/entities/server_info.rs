/// Server-side statistics of the cache backend, as reported by the
/// monitoring endpoint. Values arrive as strings straight from the
/// server's INFO output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheServerInfo {
    pub version: String,
    pub uptime_seconds: String,
    pub connected_clients: String,
    pub used_memory: String,
    pub total_commands_processed: String,
    pub keyspace_hits: String,
    pub keyspace_misses: String,
}

impl CacheServerInfo {
    /// Keyspace hit rate in percent, if both counters parse.
    #[must_use]
    pub fn hit_rate(&self) -> Option<f64> {
        let hits: u64 = self.keyspace_hits.parse().ok()?;
        let misses: u64 = self.keyspace_misses.parse().ok()?;
        let total = hits.checked_add(misses)?;
        if total == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some(hits as f64 * 100.0 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let info = CacheServerInfo {
            keyspace_hits: "75".to_string(),
            keyspace_misses: "25".to_string(),
            ..CacheServerInfo::default()
        };
        assert_eq!(info.hit_rate(), Some(75.0));
    }

    #[test]
    fn test_hit_rate_without_traffic() {
        let info = CacheServerInfo {
            keyspace_hits: "0".to_string(),
            keyspace_misses: "0".to_string(),
            ..CacheServerInfo::default()
        };
        assert_eq!(info.hit_rate(), None);
    }

    #[test]
    fn test_hit_rate_with_unparseable_counters() {
        let info = CacheServerInfo {
            keyspace_hits: "unknown".to_string(),
            keyspace_misses: "25".to_string(),
            ..CacheServerInfo::default()
        };
        assert_eq!(info.hit_rate(), None);
    }
}
