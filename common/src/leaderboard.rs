use serde::{Deserialize, Serialize};

/// The remote service keeps the top 10; everything past that never qualifies.
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: i64,
}

/// High scores exactly as the server returned them: sorted descending and
/// capped server-side. Never mutated locally, only replaced by a re-fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<HighScoreEntry>,
}

impl Leaderboard {
    pub fn new(entries: Vec<HighScoreEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// A score makes the board when it is not full yet, or beats the lowest
    /// retained entry.
    pub fn qualifies(&self, score: i64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        let lowest = self.entries.last().map_or(0, |entry| entry.score);
        score > lowest
    }

    /// Parses the `{"highScores": [...]}` payload, repairing entries with
    /// missing or malformed fields instead of rejecting them.
    pub fn parse_response(body: &str) -> Result<Self, String> {
        let response: HighScoresResponse = serde_json::from_str(body)
            .map_err(|e| format!("Malformed high scores payload: {}", e))?;
        let entries = response
            .high_scores
            .into_iter()
            .map(RawHighScoreEntry::repair)
            .collect();
        Ok(Self::new(entries))
    }
}

#[derive(Deserialize)]
struct HighScoresResponse {
    #[serde(rename = "highScores")]
    high_scores: Vec<RawHighScoreEntry>,
}

/// One entry as the server sends it; field names and the score type have
/// drifted between service revisions, so everything is optional here.
#[derive(Deserialize)]
struct RawHighScoreEntry {
    #[serde(rename = "playerName", alias = "name")]
    player_name: Option<String>,
    #[serde(alias = "Score")]
    score: Option<serde_json::Value>,
}

impl RawHighScoreEntry {
    fn repair(self) -> HighScoreEntry {
        let name = self
            .player_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let score = match self.score {
            Some(serde_json::Value::Number(number)) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(serde_json::Value::String(text)) => text.trim().parse().unwrap_or(0),
            _ => 0,
        };
        HighScoreEntry { name, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: i64) -> HighScoreEntry {
        HighScoreEntry {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_parse_well_formed_response() {
        let body = r#"{"highScores": [
            {"playerName": "Alice", "score": 20},
            {"playerName": "Bob", "score": 8}
        ]}"#;
        let board = Leaderboard::parse_response(body).unwrap();
        assert_eq!(board.entries(), &[entry("Alice", 20), entry("Bob", 8)]);
    }

    #[test]
    fn test_parse_repairs_missing_and_malformed_fields() {
        let body = r#"{"highScores": [
            {"name": "Carol", "Score": "15"},
            {"score": 3},
            {"playerName": "  ", "score": true}
        ]}"#;
        let board = Leaderboard::parse_response(body).unwrap();
        assert_eq!(
            board.entries(),
            &[entry("Carol", 15), entry("Unknown", 3), entry("Unknown", 0)]
        );
    }

    #[test]
    fn test_parse_rejects_payload_without_high_scores() {
        assert!(Leaderboard::parse_response(r#"{"message": "oops"}"#).is_err());
        assert!(Leaderboard::parse_response("not json").is_err());
    }

    #[test]
    fn test_qualifies_when_board_not_full() {
        let board = Leaderboard::new(vec![entry("Alice", 20)]);
        assert!(board.qualifies(0));
        assert!(Leaderboard::default().qualifies(0));
    }

    #[test]
    fn test_qualifies_only_above_lowest_when_full() {
        let entries: Vec<_> = (0..MAX_HIGH_SCORES)
            .map(|i| entry("P", 20 - i as i64))
            .collect();
        let board = Leaderboard::new(entries);
        // Lowest retained score is 11.
        assert!(board.qualifies(12));
        assert!(!board.qualifies(11));
        assert!(!board.qualifies(8));
    }
}
