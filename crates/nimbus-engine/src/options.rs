use serde::{Deserialize, Serialize};

/// Storage partition for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// Shared, persisted partition (cookies, local storage survive).
    Persistent,
    /// Isolated, throwaway partition.
    Incognito,
}

/// Configuration for creating a new view.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub partition: Partition,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    pub transparent: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            partition: Partition::Persistent,
            user_agent: Some("Nimbus/0.1".to_string()),
            transparent: false,
        }
    }
}

impl ViewOptions {
    pub fn with_partition(partition: Partition) -> Self {
        Self {
            partition,
            ..Default::default()
        }
    }

    pub fn incognito(incognito: bool) -> Self {
        Self::with_partition(if incognito {
            Partition::Incognito
        } else {
            Partition::Persistent
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_partition_is_persistent() {
        assert_eq!(ViewOptions::default().partition, Partition::Persistent);
    }

    #[test]
    fn incognito_flag_selects_partition() {
        assert_eq!(ViewOptions::incognito(true).partition, Partition::Incognito);
        assert_eq!(
            ViewOptions::incognito(false).partition,
            Partition::Persistent
        );
    }
}
