//! Effect ordering, validation and dispatch.

use crate::card::{CardEffect, EffectKind};
use crate::character::{Character, TurnEffect};

use super::result::recipient_side;
use super::{
    AppliedEffect, AppliedValue, CardExecutionContext, CardResolution, RejectionReason,
    ResolveError, ValidationRejection,
};

// ============================================================================
// Pipeline Orchestration
// ============================================================================

/// Resolves every effect of `ctx.card` against the bound characters.
///
/// Effects run in `order`, ties in declaration order. Each effect is validated
/// right before it applies. A missing or dead target fails validation for
/// every effect, self-targeted ones included, so an earlier effect that kills
/// the target stops the rest of the card. Effects already applied stay
/// applied.
pub fn resolve_card(ctx: &mut CardExecutionContext<'_>) -> Result<CardResolution, ResolveError> {
    let card = ctx.card;
    let definition = card.definition();
    let owner = card.owner();

    let mut resolution = CardResolution {
        card: card.id(),
        card_id: card.card_id(),
        owner,
        applied: Vec::with_capacity(definition.effects.len()),
        rejection: None,
    };

    for (effect_index, effect) in definition.ordered_effects() {
        let recipient = effect.kind.recipient();
        if let Err(reason) = validate(ctx) {
            resolution.rejection = Some(ValidationRejection {
                effect_index,
                reason,
            });
            break;
        }

        let power = card.effect_power(effect);
        let value = apply_effect(ctx, effect, power)?;
        resolution.applied.push(AppliedEffect {
            effect_index,
            kind: effect.kind,
            recipient: recipient_side(owner, recipient),
            power,
            value,
        });
    }

    Ok(resolution)
}

// ============================================================================
// Validation
// ============================================================================

fn validate(ctx: &CardExecutionContext<'_>) -> Result<(), RejectionReason> {
    if ctx.source.is_dead() {
        return Err(RejectionReason::SourceDead);
    }
    let target = ctx.target.as_deref().ok_or(RejectionReason::TargetMissing)?;
    if target.is_dead() {
        return Err(RejectionReason::TargetDead);
    }
    Ok(())
}

// ============================================================================
// Effect Dispatcher
// ============================================================================

fn apply_effect(
    ctx: &mut CardExecutionContext<'_>,
    effect: &CardEffect,
    power: u32,
) -> Result<AppliedValue, ResolveError> {
    let source_card = ctx.card.card_id();
    let max_turn_effects = ctx.max_turn_effects;
    let owner = ctx.card.owner();
    let Some(recipient) = ctx.recipient_mut(effect.kind.recipient()) else {
        // validate() already rejected a missing target
        return Err(ResolveError::CasterMissing(owner.opponent()));
    };

    let value = match effect.kind {
        EffectKind::Damage { .. } | EffectKind::Heal if power == 0 => AppliedValue::NoEffect,
        EffectKind::Damage { ignore_guard: false } => {
            AppliedValue::Damage(recipient.take_damage(power)?)
        }
        EffectKind::Damage { ignore_guard: true } => {
            AppliedValue::Damage(recipient.take_damage_ignoring_guard(power)?)
        }
        EffectKind::Heal => AppliedValue::Heal(recipient.heal(power)?),
        EffectKind::Guard => AppliedValue::Guard {
            flipped: recipient.set_guarded(true),
        },
        EffectKind::TurnEffect { kind, duration, .. } => {
            let turn_effect = TurnEffect::new(kind, power, duration).with_source(source_card);
            register(recipient, turn_effect, max_turn_effects)?
        }
    };
    Ok(value)
}

fn register(
    recipient: &mut Character,
    effect: TurnEffect,
    max_turn_effects: usize,
) -> Result<AppliedValue, ResolveError> {
    if recipient.turn_effects().len() >= max_turn_effects {
        return Ok(AppliedValue::TurnEffectCapped);
    }
    if effect.power == 0 && effect.kind != crate::character::TurnEffectKind::Guard {
        return Ok(AppliedValue::NoEffect);
    }
    recipient.register_turn_effect(effect)?;
    Ok(AppliedValue::TurnEffectRegistered(effect))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::card::{CardDefinition, CardId, CardInstance, CardInstanceId, Recipient};
    use crate::character::{CharacterId, Side, Stats, TurnEffectKind};

    fn character(id: u32, side: Side, hp: u32) -> Character {
        Character::new(CharacterId(id), "c", side, Stats::new(hp).unwrap())
    }

    fn card(definition: CardDefinition, owner: Side) -> CardInstance {
        CardInstance::new(CardInstanceId(1), Arc::new(definition), owner)
    }

    #[test]
    fn damage_lands_on_target_heal_on_source() {
        let def = CardDefinition::new(CardId(1), "drain")
            .with_effect(CardEffect::damage(4))
            .with_effect(CardEffect::heal(2));
        let card = card(def, Side::Player);
        let mut hero = character(0, Side::Player, 10);
        hero.take_damage(5).unwrap();
        let mut foe = character(1, Side::Enemy, 10);

        let mut ctx = CardExecutionContext::new(&card, &mut hero, Some(&mut foe));
        let resolution = resolve_card(&mut ctx).unwrap();

        assert!(resolution.is_complete());
        assert_eq!(resolution.applied.len(), 2);
        assert_eq!(resolution.applied[0].recipient, Side::Enemy);
        assert_eq!(resolution.applied[1].recipient, Side::Player);
        assert_eq!(foe.current_health(), 6);
        assert_eq!(hero.current_health(), 7);
    }

    #[test]
    fn killing_blow_rejects_following_target_effects() {
        let def = CardDefinition::new(CardId(1), "double")
            .with_effect(CardEffect::damage(5))
            .with_effect(CardEffect::damage(5))
            .with_effect(CardEffect::guard());
        let card = card(def, Side::Enemy);
        let mut foe = character(1, Side::Enemy, 10);
        let mut hero = character(0, Side::Player, 5);

        let mut ctx = CardExecutionContext::new(&card, &mut foe, Some(&mut hero));
        let resolution = resolve_card(&mut ctx).unwrap();

        assert_eq!(resolution.applied.len(), 1);
        assert!(resolution.applied[0].caused_death());
        assert_eq!(resolution.deaths().collect::<Vec<_>>(), vec![Side::Player]);
        assert_eq!(
            resolution.rejection,
            Some(ValidationRejection {
                effect_index: 1,
                reason: RejectionReason::TargetDead
            })
        );
        // the guard after the rejection never ran
        assert!(!foe.is_guarded());
    }

    #[test]
    fn killing_blow_stops_self_effects_too() {
        let def = CardDefinition::new(CardId(1), "drain")
            .with_effect(CardEffect::damage(5))
            .with_effect(CardEffect::heal(3));
        let card = card(def, Side::Player);
        let mut hero = character(0, Side::Player, 10);
        hero.take_damage(5).unwrap();
        let mut foe = character(1, Side::Enemy, 5);

        let mut ctx = CardExecutionContext::new(&card, &mut hero, Some(&mut foe));
        let resolution = resolve_card(&mut ctx).unwrap();

        assert_eq!(resolution.applied.len(), 1);
        assert_eq!(
            resolution.rejection,
            Some(ValidationRejection {
                effect_index: 1,
                reason: RejectionReason::TargetDead
            })
        );
        assert_eq!(foe.current_health(), 0);
        assert_eq!(hero.current_health(), 5);
    }

    #[test]
    fn self_only_card_needs_an_opponent() {
        let def = CardDefinition::new(CardId(2), "brace").with_effect(CardEffect::guard());
        let card = card(def, Side::Player);
        let mut hero = character(0, Side::Player, 10);

        let mut ctx = CardExecutionContext::new(&card, &mut hero, None);
        let resolution = resolve_card(&mut ctx).unwrap();
        assert!(resolution.applied.is_empty());
        assert_eq!(
            resolution.rejection.map(|r| r.reason),
            Some(RejectionReason::TargetMissing)
        );
        assert!(!hero.is_guarded());
    }

    #[test]
    fn missing_target_is_a_rejection_not_an_error() {
        let def = CardDefinition::new(CardId(1), "strike").with_effect(CardEffect::damage(2));
        let card = card(def, Side::Player);
        let mut hero = character(0, Side::Player, 10);

        let mut ctx = CardExecutionContext::new(&card, &mut hero, None);
        let resolution = resolve_card(&mut ctx).unwrap();
        assert!(resolution.applied.is_empty());
        assert_eq!(
            resolution.rejection.map(|r| r.reason),
            Some(RejectionReason::TargetMissing)
        );
    }

    #[test]
    fn effects_follow_order_field() {
        let def = CardDefinition::new(CardId(1), "shield bash")
            .with_effect(CardEffect::damage(3).with_order(1))
            .with_effect(CardEffect::guard().with_order(0));
        let card = card(def, Side::Player);
        let mut hero = character(0, Side::Player, 10);
        let mut foe = character(1, Side::Enemy, 10);

        let mut ctx = CardExecutionContext::new(&card, &mut hero, Some(&mut foe));
        let resolution = resolve_card(&mut ctx).unwrap();
        let order: Vec<_> = resolution.applied.iter().map(|a| a.effect_index).collect();
        assert_eq!(order, vec![1, 0]);
        assert!(hero.is_guarded());
    }

    #[test]
    fn guard_on_target_absorbs_card_damage() {
        let def = CardDefinition::new(CardId(1), "strike").with_effect(CardEffect::damage(5));
        let card = card(def, Side::Player);
        let mut hero = character(0, Side::Player, 10);
        let mut foe = character(1, Side::Enemy, 10);
        foe.set_guarded(true);

        let mut ctx = CardExecutionContext::new(&card, &mut hero, Some(&mut foe));
        let resolution = resolve_card(&mut ctx).unwrap();
        match resolution.applied[0].value {
            AppliedValue::Damage(outcome) => assert!(outcome.blocked),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(foe.current_health(), 10);
        assert!(!foe.is_guarded());
    }

    #[test]
    fn negative_bonus_turns_damage_into_no_effect() {
        let def = CardDefinition::new(CardId(1), "weak").with_effect(CardEffect::damage(2));
        let card = card(def, Side::Player).with_power_bonus(-5);
        let mut hero = character(0, Side::Player, 10);
        let mut foe = character(1, Side::Enemy, 10);

        let mut ctx = CardExecutionContext::new(&card, &mut hero, Some(&mut foe));
        let resolution = resolve_card(&mut ctx).unwrap();
        assert_eq!(resolution.applied[0].value, AppliedValue::NoEffect);
        assert_eq!(foe.current_health(), 10);
    }

    #[test]
    fn turn_effects_register_on_recipient_until_capped() {
        let def = CardDefinition::new(CardId(3), "poison").with_effect(CardEffect::turn_effect(
            TurnEffectKind::Damage,
            2,
            3,
            Recipient::Target,
        ));
        let card = card(def, Side::Player);
        let mut hero = character(0, Side::Player, 10);
        let mut foe = character(1, Side::Enemy, 10);

        for expected_registered in [true, false] {
            let mut ctx = CardExecutionContext::new(&card, &mut hero, Some(&mut foe))
                .with_max_turn_effects(1);
            let resolution = resolve_card(&mut ctx).unwrap();
            let registered = matches!(
                resolution.applied[0].value,
                AppliedValue::TurnEffectRegistered(effect) if effect.source == Some(CardId(3))
            );
            assert_eq!(registered, expected_registered);
        }
        assert_eq!(foe.turn_effects().len(), 1);
        assert!(hero.turn_effects().is_empty());
    }
}
