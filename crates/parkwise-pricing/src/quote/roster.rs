//! Subscriber roster
//!
//! Plates holding a subscription, loaded from a newline-separated file.
//! Lookups are case-insensitive since every entry is a normalized [`Plate`].

use parkwise_common::{ParkwiseError, Plate, Result};
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Set of subscribed plates
#[derive(Debug, Clone, Default)]
pub struct SubscriberRoster {
    plates: HashSet<Plate>,
}

impl SubscriberRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse roster text; blank lines are skipped
    pub fn parse(text: &str) -> Self {
        text.lines().filter_map(|line| Plate::parse(line).ok()).collect()
    }

    /// Read a roster line by line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut roster = Self::new();
        for line in reader.lines() {
            if let Ok(plate) = Plate::parse(&line?) {
                roster.insert(plate);
            }
        }
        Ok(roster)
    }

    /// Load a roster file
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            ParkwiseError::Storage(format!("Failed to open roster {}: {}", path.display(), e))
        })?;
        let roster = Self::from_reader(std::io::BufReader::new(file))?;
        info!(plates = roster.len(), "Loaded subscriber roster");
        Ok(roster)
    }

    pub fn insert(&mut self, plate: Plate) -> bool {
        self.plates.insert(plate)
    }

    pub fn contains(&self, plate: &Plate) -> bool {
        let found = self.plates.contains(plate);
        debug!(%plate, found, "Roster lookup");
        found
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }
}

impl FromIterator<Plate> for SubscriberRoster {
    fn from_iter<I: IntoIterator<Item = Plate>>(iter: I) -> Self {
        Self {
            plates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let roster = SubscriberRoster::parse("abc-1234\n\n  xyz 9 \n   \n");
        assert_eq!(roster.len(), 2);
        assert!(roster.contains(&Plate::parse("ABC-1234").unwrap()));
        assert!(roster.contains(&Plate::parse("xyz 9").unwrap()));
    }

    #[test]
    fn test_from_reader() {
        let roster = SubscriberRoster::from_reader(std::io::Cursor::new("KL-77\r\nmn-01\n")).unwrap();
        assert!(roster.contains(&Plate::parse("kl-77").unwrap()));
        assert!(!roster.contains(&Plate::parse("KL-78").unwrap()));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SubscriberRoster::load(Path::new("/nonexistent/parkwise/subscribers.txt"));
        assert!(matches!(err, Err(ParkwiseError::Storage(_))));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("parkwise-roster-{}.txt", std::process::id()));
        std::fs::write(&path, "aa-11\nbb-22\n").unwrap();

        let roster = SubscriberRoster::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(roster.len(), 2);
        assert!(roster.contains(&Plate::parse("BB-22").unwrap()));
    }
}
