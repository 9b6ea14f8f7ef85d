//! Cooldown and eligibility guards. Each guard is a pure decision over the
//! current documents plus one `now` reading; the caller uses the same `now`
//! for any timestamp it writes afterwards.
//!
//! Cooldown comparisons reject on strict `<`, so an action attempted exactly
//! at the boundary instant succeeds.

use thiserror::Error;
use uuid::Uuid;

use crate::{
    dao::models::{GameDocument, PlayerRecord, TagStatus},
    state::clock::{Act, minutes_ms},
};

/// Most distinct tags a single killer may hold poison on.
pub const POISON_TAG_LIMIT: usize = 3;
/// Minutes a poison window stays active.
pub const POISON_WINDOW_MINUTES: u64 = 5;

/// Why a requested action is not currently allowed. The display strings are
/// the wire-level reason codes clients match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// Actor lacks the killer flag.
    #[error("not killer")]
    NotKiller,
    /// Actor lacks the detective flag.
    #[error("not detective")]
    NotDetective,
    /// Target tag is inside an active safe window.
    #[error("tag is SAFE")]
    TagSafe,
    /// Actor already holds an active poison on this tag.
    #[error("no re-poison same tag twice")]
    RepeatPoison,
    /// Actor has poison on the maximum number of distinct tags.
    #[error("poison limit reached")]
    PoisonLimit,
    /// The ability's cooldown has not elapsed.
    #[error("cooldown")]
    Cooldown,
    /// The team has spent every safe mark.
    #[error("no safe marks left")]
    NoSafeMarksLeft,
    /// Actor already revived someone during the current act.
    #[error("act revive used")]
    ActReviveUsed,
}

impl RuleViolation {
    /// Whether the violation is a wrong-role failure (HTTP 403) rather than a
    /// precondition failure (HTTP 400).
    pub fn is_role_failure(self) -> bool {
        matches!(self, RuleViolation::NotKiller | RuleViolation::NotDetective)
    }
}

/// May `killer` poison the tag `nfc_id` right now?
///
/// The distinct-tag cap only blocks tags with no prior poison record: a tag
/// the killer poisoned earlier keeps its record when the window lapses, so
/// re-poisoning it is allowed at the cap and is not double-counted.
pub fn check_poison(
    killer: &PlayerRecord,
    game: &GameDocument,
    nfc_id: &str,
    now: u64,
) -> Result<(), RuleViolation> {
    if !killer.is_killer {
        return Err(RuleViolation::NotKiller);
    }

    let blank = TagStatus::default();
    let status = game.nfc_state.get(nfc_id).unwrap_or(&blank);

    if status.safe_until > now {
        return Err(RuleViolation::TagSafe);
    }
    if status.last_poisoned_by == Some(killer.id) && status.poisoned_until > now {
        return Err(RuleViolation::RepeatPoison);
    }
    if game.distinct_poisoned_by(killer.id) >= POISON_TAG_LIMIT && status.poisoned_until == 0 {
        return Err(RuleViolation::PoisonLimit);
    }

    Ok(())
}

/// May `detective` clear a poison right now?
pub fn check_unpoison(
    detective: &PlayerRecord,
    cooldown_minutes: u64,
    now: u64,
) -> Result<(), RuleViolation> {
    if !detective.is_detective {
        return Err(RuleViolation::NotDetective);
    }
    if now.saturating_sub(detective.abilities.unpoison_last_at) < minutes_ms(cooldown_minutes) {
        return Err(RuleViolation::Cooldown);
    }
    Ok(())
}

/// May the team place another safe mark?
pub fn check_safe_mark(game: &GameDocument) -> Result<(), RuleViolation> {
    if game.safe_marks_left == 0 {
        return Err(RuleViolation::NoSafeMarksLeft);
    }
    Ok(())
}

/// May `killer` strike again right now?
pub fn check_kill(
    killer: &PlayerRecord,
    cooldown_minutes: u64,
    now: u64,
) -> Result<(), RuleViolation> {
    if !killer.is_killer {
        return Err(RuleViolation::NotKiller);
    }
    if now.saturating_sub(killer.last_kill_at) < minutes_ms(cooldown_minutes) {
        return Err(RuleViolation::Cooldown);
    }
    Ok(())
}

/// May `detective` revive someone during `act`?
pub fn check_revive(detective: &PlayerRecord, act: Act) -> Result<(), RuleViolation> {
    if !detective.is_detective {
        return Err(RuleViolation::NotDetective);
    }
    if detective.abilities.revives.used(act) >= 1 {
        return Err(RuleViolation::ActReviveUsed);
    }
    Ok(())
}

/// Stamp a poison placed by `by` onto `status`.
pub fn apply_poison(status: &mut TagStatus, by: Uuid, now: u64) {
    status.poisoned_until = now + minutes_ms(POISON_WINDOW_MINUTES);
    status.last_poisoned_by = Some(by);
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;

    use super::*;

    const NOW: u64 = 1_700_000_000_000;

    fn killer() -> PlayerRecord {
        let mut player = PlayerRecord::new("Mara Vane".into(), None);
        player.is_killer = true;
        player
    }

    fn detective() -> PlayerRecord {
        let mut player = PlayerRecord::new("Ira Voss".into(), None);
        player.is_detective = true;
        player
    }

    fn game() -> GameDocument {
        GameDocument::fresh(&AppConfig::default())
    }

    #[test]
    fn poison_requires_killer_flag() {
        let bystander = PlayerRecord::new("Quiet Guest".into(), None);
        assert_eq!(
            check_poison(&bystander, &game(), "tag-01", NOW),
            Err(RuleViolation::NotKiller)
        );
    }

    #[test]
    fn safe_marked_tag_rejects_poison_regardless_of_cooldown() {
        let killer = killer();
        let mut game = game();
        game.tag_status_mut("tag-01").safe_until = NOW + minutes_ms(3);

        assert_eq!(
            check_poison(&killer, &game, "tag-01", NOW),
            Err(RuleViolation::TagSafe)
        );
    }

    #[test]
    fn same_killer_cannot_repoison_active_tag() {
        let killer = killer();
        let mut game = game();
        apply_poison(game.tag_status_mut("tag-01"), killer.id, NOW);

        assert_eq!(
            check_poison(&killer, &game, "tag-01", NOW + 1),
            Err(RuleViolation::RepeatPoison)
        );
    }

    #[test]
    fn another_killer_may_poison_the_same_tag() {
        let first = killer();
        let second = killer();
        let mut game = game();
        apply_poison(game.tag_status_mut("tag-01"), first.id, NOW);

        assert!(check_poison(&second, &game, "tag-01", NOW + 1).is_ok());
    }

    #[test]
    fn fourth_distinct_tag_hits_the_cap() {
        let killer = killer();
        let mut game = game();
        for id in ["tag-01", "tag-02", "tag-03"] {
            apply_poison(game.tag_status_mut(id), killer.id, NOW);
        }

        assert_eq!(
            check_poison(&killer, &game, "tag-04", NOW),
            Err(RuleViolation::PoisonLimit)
        );
    }

    #[test]
    fn lapsed_tag_may_be_repoisoned_at_the_cap() {
        let killer = killer();
        let mut game = game();
        for id in ["tag-01", "tag-02", "tag-03"] {
            apply_poison(game.tag_status_mut(id), killer.id, NOW);
        }

        // tag-01's window lapses; its record keeps the killer attributed, so
        // the cap does not block a fresh poison on it.
        let later = NOW + minutes_ms(POISON_WINDOW_MINUTES) + 1;
        assert!(check_poison(&killer, &game, "tag-01", later).is_ok());
        // A brand-new tag is still capped.
        assert_eq!(
            check_poison(&killer, &game, "tag-04", later),
            Err(RuleViolation::PoisonLimit)
        );
    }

    #[test]
    fn unpoison_cooldown_scenario() {
        let mut detective = detective();
        // First use ever succeeds immediately.
        assert!(check_unpoison(&detective, 8, NOW).is_ok());

        detective.abilities.unpoison_last_at = NOW;
        assert_eq!(
            check_unpoison(&detective, 8, NOW + minutes_ms(1)),
            Err(RuleViolation::Cooldown)
        );
        assert!(check_unpoison(&detective, 8, NOW + minutes_ms(9)).is_ok());
    }

    #[test]
    fn kill_succeeds_exactly_at_the_cooldown_boundary() {
        let mut killer = killer();
        killer.last_kill_at = NOW;

        assert_eq!(
            check_kill(&killer, 8, NOW + minutes_ms(8) - 1),
            Err(RuleViolation::Cooldown)
        );
        assert!(check_kill(&killer, 8, NOW + minutes_ms(8)).is_ok());
    }

    #[test]
    fn revive_is_once_per_act_regardless_of_target() {
        let mut detective = detective();
        assert!(check_revive(&detective, Act::I).is_ok());

        detective.abilities.revives.record(Act::I);
        assert_eq!(
            check_revive(&detective, Act::I),
            Err(RuleViolation::ActReviveUsed)
        );
        // A later act opens a fresh budget.
        assert!(check_revive(&detective, Act::II).is_ok());
    }

    #[test]
    fn safe_marks_cannot_go_negative() {
        let mut game = game();
        game.safe_marks_left = 0;
        assert_eq!(check_safe_mark(&game), Err(RuleViolation::NoSafeMarksLeft));
    }
}
