//! Parsing typed commands into combat actions.
//!
//! Commands are an action name (any alias [`ActionTag`] accepts) followed by
//! optional arguments: a target given as a menu number or a name prefix, an
//! item for `use`, or a spell name plus a target or `all` for `cast`.
//! Anything that cannot be understood becomes a plain attack.

use combat_core::{ActionTag, CombatAction, CombatantId, ItemKind, SessionView, SpellId};

/// Longest action alias, in words ("fight to the death").
const MAX_TAG_WORDS: usize = 4;

pub fn parse_command(input: &str, view: &SessionView) -> CombatAction {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        return CombatAction::attack();
    }
    // A bare menu number attacks that monster.
    if let [only] = words.as_slice()
        && only.parse::<usize>().is_ok()
    {
        return match target_at(only, view) {
            Some(target) => CombatAction::attack_target(target),
            None => CombatAction::attack(),
        };
    }

    match split_tag(&words) {
        Some((tag, rest)) => build(tag, rest, view),
        None => CombatAction::attack(),
    }
}

fn split_tag<'w>(words: &'w [&'w str]) -> Option<(ActionTag, &'w [&'w str])> {
    (1..=words.len().min(MAX_TAG_WORDS)).rev().find_map(|n| {
        words[..n]
            .join(" ")
            .parse::<ActionTag>()
            .ok()
            .map(|tag| (tag, &words[n..]))
    })
}

/// Resolves a menu number (1-based) or a name prefix to a living monster.
fn target_at(word: &str, view: &SessionView) -> Option<CombatantId> {
    if let Ok(n) = word.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|index| view.nth_living_monster(index))
            .map(|monster| monster.id);
    }
    let word = word.to_ascii_lowercase();
    view.living_monsters()
        .find(|monster| monster.name.to_ascii_lowercase().starts_with(&word))
        .map(|monster| monster.id)
}

fn build(tag: ActionTag, rest: &[&str], view: &SessionView) -> CombatAction {
    let target = rest.first().and_then(|word| target_at(word, view));

    match tag {
        ActionTag::Attack => CombatAction::Attack { target },
        ActionTag::PowerAttack => CombatAction::PowerAttack { target },
        ActionTag::PreciseStrike => CombatAction::PreciseStrike { target },
        ActionTag::RangedAttack => CombatAction::RangedAttack { target },
        ActionTag::Backstab => CombatAction::Backstab { target },
        ActionTag::SoulStrike => CombatAction::SoulStrike { target },
        ActionTag::Smite => CombatAction::Smite { target },
        ActionTag::Disarm => CombatAction::Disarm { target },
        ActionTag::Taunt => CombatAction::Taunt { target },
        ActionTag::Hide => CombatAction::Hide,
        ActionTag::Rage => CombatAction::Rage,
        ActionTag::Defend => CombatAction::Defend,
        ActionTag::Heal => CombatAction::Heal,
        ActionTag::QuickHeal => CombatAction::QuickHeal,
        ActionTag::UseItem => CombatAction::UseItem {
            item: rest.join(" ").parse().unwrap_or(ItemKind::HealingPotion),
        },
        ActionTag::CastSpell => cast(rest, view),
        ActionTag::Retreat => CombatAction::Retreat,
        ActionTag::BegForMercy => CombatAction::BegForMercy,
        ActionTag::FightToDeath => CombatAction::FightToDeath,
        ActionTag::Status => CombatAction::Status,
    }
}

/// `cast <spell words> [all | <target>]`. The spell name may be empty, in
/// which case the caller asks for it.
fn cast(rest: &[&str], view: &SessionView) -> CombatAction {
    let (mut name, mut target, mut affect_all) = (rest, None, false);

    if let Some((last, init)) = rest.split_last() {
        if last.eq_ignore_ascii_case("all") {
            affect_all = true;
            name = init;
        } else if last.parse::<usize>().is_ok() {
            target = target_at(last, view);
            name = init;
        }
    }

    CombatAction::CastSpell {
        spell: SpellId::new(name.join(" ")),
        target,
        affect_all,
    }
}

/// Menu shown before the player's choice: the living monsters, numbered
/// as [`parse_command`] expects, and the command list.
pub fn menu_lines(view: &SessionView) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: HP {}/{}  mana {}/{}",
        view.player.name, view.player.hp, view.player.max_hp, view.player.mana, view.player.max_mana
    )];
    for teammate in view.teammates.iter().filter(|t| t.is_alive()) {
        lines.push(format!(
            "  ally {}: HP {}/{}",
            teammate.name, teammate.hp, teammate.max_hp
        ));
    }
    for (n, monster) in view.living_monsters().enumerate() {
        lines.push(format!(
            "  [{}] {} (level {}) HP {}/{}",
            n + 1,
            monster.name,
            monster.level,
            monster.hp,
            monster.max_hp
        ));
    }
    lines.push(
        "Commands: attack, power, precise, ranged, backstab, soul, smite, disarm, taunt, hide, \
         rage, defend, heal, quick heal, use <item>, cast <spell> [n|all], retreat, beg, fight, status"
            .to_owned(),
    );
    lines
}
