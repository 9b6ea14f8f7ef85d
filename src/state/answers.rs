//! Passphrase answer resolution and comparison. An answer is either a
//! literal string or a reference to a named field on a player's record; a
//! dangling reference makes the tag unsolvable until the data is fixed.

use crate::dao::models::{PlayersDocument, TagAnswer};

/// Resolve the expected answer for a content variant, if one exists.
pub fn resolve_answer<'a>(
    answer: Option<&'a TagAnswer>,
    players: &'a PlayersDocument,
) -> Option<&'a str> {
    match answer? {
        TagAnswer::Literal(value) => Some(value.as_str()),
        TagAnswer::PlayerField { player_id, field } => players
            .player(*player_id)?
            .fields
            .get(field)
            .map(String::as_str),
    }
}

/// Compare a submission against the expected answer, ignoring case and
/// surrounding whitespace.
pub fn passphrase_matches(expected: &str, submitted: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(submitted.trim())
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::dao::models::PlayerRecord;

    use super::*;

    fn roster_with_field(field: &str, value: &str) -> (PlayersDocument, uuid::Uuid) {
        let mut player = PlayerRecord::new("Edda Marsh".into(), None);
        player.fields = IndexMap::from([(field.to_string(), value.to_string())]);
        let id = player.id;
        (
            PlayersDocument {
                players: vec![player],
            },
            id,
        )
    }

    #[test]
    fn literal_answers_resolve_verbatim() {
        let players = PlayersDocument::default();
        let answer = TagAnswer::Literal("blue route".into());
        assert_eq!(resolve_answer(Some(&answer), &players), Some("blue route"));
    }

    #[test]
    fn player_field_answers_read_the_referenced_record() {
        let (players, id) = roster_with_field("alibi", "the greenhouse");
        let answer = TagAnswer::PlayerField {
            player_id: id,
            field: "alibi".into(),
        };
        assert_eq!(
            resolve_answer(Some(&answer), &players),
            Some("the greenhouse")
        );
    }

    #[test]
    fn dangling_references_make_the_tag_unsolvable() {
        let (players, id) = roster_with_field("alibi", "the greenhouse");

        let missing_field = TagAnswer::PlayerField {
            player_id: id,
            field: "motive".into(),
        };
        assert_eq!(resolve_answer(Some(&missing_field), &players), None);

        let missing_player = TagAnswer::PlayerField {
            player_id: uuid::Uuid::new_v4(),
            field: "alibi".into(),
        };
        assert_eq!(resolve_answer(Some(&missing_player), &players), None);

        assert_eq!(resolve_answer(None, &players), None);
    }

    #[test]
    fn comparison_ignores_case_and_surrounding_whitespace() {
        assert!(passphrase_matches("blue route", " Blue Route "));
        assert!(passphrase_matches(" GOLD ROUTE", "gold route"));
        assert!(!passphrase_matches("blue route", "blue rout"));
    }
}
