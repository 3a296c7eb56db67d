//! The battle state machine.
//!
//! A session owns the player's roster of combatants, the wild opponent, the
//! event log and the random source for its whole lifetime. Player actions
//! resolve a full exchange synchronously: the player's action, the wild
//! reply, residual status damage and faint handling all happen before the
//! call returns. Presentation pacing is the caller's problem.

use crate::battle::ai::choose_move;
use crate::battle::calculator::calculate_damage;
use crate::battle::capture::{attempt_capture, capture_chance};
use crate::battle::combatant::{Combatant, StatusCondition};
use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, BattleRng, EventBus};
use crate::errors::{ActionError, ActionResult, BattleStateError};
use crate::moves::{resolve_move, EffectTarget, MoveData, MoveEffect, StatusKind};

/// Basis-point threshold for paralysis blocking the turn (25%).
const PARALYSIS_BLOCK: u16 = 2500;
/// Basis-point threshold for staying frozen (80%).
const FREEZE_STAY: u16 = 8000;
/// Basis-point threshold for a successful flee (50%).
const FLEE_SUCCESS: u16 = 5000;

enum MoveChoice {
    Slot(usize),
    /// Out of uses everywhere; a generic attack that costs nothing
    Improvised,
}

pub struct BattleSession {
    roster: Vec<Combatant>,
    active_index: usize,
    wild: Combatant,
    phase: BattlePhase,
    outcome: Option<BattleOutcome>,
    events: EventBus,
    rng: BattleRng,
    floor: u32,
    exchange: u32,
}

impl BattleSession {
    /// Start a session against an already-generated opponent. The first
    /// living roster member becomes active.
    pub fn new(
        roster: Vec<Combatant>,
        wild: Combatant,
        floor: u32,
        rng: BattleRng,
    ) -> Result<Self, BattleStateError> {
        if roster.is_empty() {
            return Err(BattleStateError::EmptyRoster);
        }
        let active_index = roster
            .iter()
            .position(|c| !c.is_fainted())
            .ok_or(BattleStateError::NoActiveCombatant)?;

        let mut events = EventBus::new();
        events.push(BattleEvent::BattleStarted {
            player: roster[active_index].name.clone(),
            wild: wild.name.clone(),
            floor,
        });
        events.push(BattleEvent::WildAppeared {
            name: wild.name.clone(),
            rarity: wild.rarity.label().to_string(),
            is_shiny: wild.is_shiny,
        });

        Ok(BattleSession {
            roster,
            active_index,
            wild,
            phase: BattlePhase::Intro,
            outcome: None,
            events,
            rng,
            floor,
            exchange: 0,
        })
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Defeat | BattlePhase::Ended)
    }

    pub fn events(&self) -> &[BattleEvent] {
        self.events.events()
    }

    pub fn narration(&self) -> Vec<String> {
        self.events.narration()
    }

    pub fn active(&self) -> &Combatant {
        &self.roster[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn wild(&self) -> &Combatant {
        &self.wild
    }

    pub fn roster(&self) -> &[Combatant] {
        &self.roster
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// Capture odds the caller can display during the victory phase.
    pub fn capture_chance(&self) -> u8 {
        capture_chance(&self.wild)
    }

    /// Tear down the session, handing the roster and random source back to
    /// the orchestrator along with the wild opponent for capture conversion.
    pub fn into_parts(self) -> (Vec<Combatant>, Combatant, EventBus, BattleRng) {
        (self.roster, self.wild, self.events, self.rng)
    }

    /// Leave the intro phase: every roster member recovers a fifth of max
    /// HP, then the session starts accepting actions.
    pub fn advance_intro(&mut self) -> ActionResult<()> {
        self.require_phase(BattlePhase::Intro)?;
        for combatant in &mut self.roster {
            let healed = combatant.apply_intro_heal();
            if healed > 0 {
                self.events.push(BattleEvent::IntroHealed {
                    name: combatant.name.clone(),
                    amount: healed,
                });
            }
        }
        self.phase = BattlePhase::Battle;
        Ok(())
    }

    /// Play the active combatant's move at `index` and resolve the full
    /// exchange. Rejected without consuming the turn if the slot is out of
    /// uses or the index is bad.
    pub fn select_move(&mut self, index: usize) -> ActionResult<()> {
        self.require_phase(BattlePhase::Battle)?;
        let active = &self.roster[self.active_index];
        let slot = active
            .moves
            .get(index)
            .ok_or(ActionError::InvalidMoveIndex(index))?;
        if slot.pp == 0 {
            return Err(ActionError::NoUsesRemaining(slot.name.clone()));
        }

        self.begin_exchange();
        act(
            &mut self.roster[self.active_index],
            &mut self.wild,
            MoveChoice::Slot(index),
            &mut self.rng,
            &mut self.events,
        );
        if self.wild.is_fainted() {
            self.handle_wild_faint();
            return Ok(());
        }

        self.wild_reply();
        self.settle_exchange();
        Ok(())
    }

    /// Bring a bench combatant in. Switching consumes the player's action,
    /// so the wild opponent replies immediately.
    pub fn switch_to(&mut self, roster_index: usize) -> ActionResult<()> {
        self.require_phase(BattlePhase::Battle)?;
        let target = self
            .roster
            .get(roster_index)
            .ok_or(ActionError::InvalidRosterIndex(roster_index))?;
        if roster_index == self.active_index {
            return Err(ActionError::AlreadyActive(roster_index));
        }
        if target.is_fainted() {
            return Err(ActionError::FaintedSwitchTarget(roster_index));
        }

        self.begin_exchange();
        self.events.push(BattleEvent::SwitchedOut {
            name: self.roster[self.active_index].name.clone(),
        });
        self.active_index = roster_index;
        self.roster[roster_index].reset_on_switch_in();
        self.events.push(BattleEvent::SwitchedIn {
            name: self.roster[roster_index].name.clone(),
        });

        self.wild_reply();
        self.settle_exchange();
        Ok(())
    }

    /// Try to run. Succeeds half the time and ends the session with no
    /// victory or defeat recorded; on failure the opponent acts as if the
    /// player had passed.
    pub fn attempt_flee(&mut self) -> ActionResult<bool> {
        self.require_phase(BattlePhase::Battle)?;
        self.begin_exchange();

        let success = self.rng.next_outcome("flee attempt") <= FLEE_SUCCESS;
        self.events.push(BattleEvent::FleeAttempted {
            name: self.roster[self.active_index].name.clone(),
            success,
        });
        if success {
            self.finish(BattleOutcome::Fled);
            return Ok(true);
        }

        self.wild_reply();
        self.settle_exchange();
        Ok(false)
    }

    /// Roll one capture attempt during the victory phase. Failure returns
    /// to the victory phase; the opponent is not harmed further and another
    /// attempt may follow.
    pub fn attempt_capture(&mut self) -> ActionResult<bool> {
        self.require_phase(BattlePhase::Victory)?;
        self.phase = BattlePhase::Capture;

        let chance = capture_chance(&self.wild);
        let success = attempt_capture(&self.wild, &mut self.rng);
        self.events.push(BattleEvent::CaptureAttempted { chance, success });

        if success {
            self.events.push(BattleEvent::Captured {
                name: self.wild.name.clone(),
            });
            self.finish(BattleOutcome::Captured);
        } else {
            self.events.push(BattleEvent::CaptureFailed {
                name: self.wild.name.clone(),
            });
            self.phase = BattlePhase::Victory;
        }
        Ok(success)
    }

    /// Decline to capture and close out the victory.
    pub fn continue_without_capture(&mut self) -> ActionResult<()> {
        self.require_phase(BattlePhase::Victory)?;
        self.finish(BattleOutcome::Victory);
        Ok(())
    }

    fn require_phase(&self, expected: BattlePhase) -> ActionResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ActionError::WrongPhase(phase_label(self.phase).to_string()))
        }
    }

    fn begin_exchange(&mut self) {
        self.exchange += 1;
        self.events.push(BattleEvent::ExchangeStarted {
            number: self.exchange,
        });
    }

    fn wild_reply(&mut self) {
        let choice = match choose_move(&self.wild, &self.roster[self.active_index], &mut self.rng)
        {
            Some(index) => MoveChoice::Slot(index),
            None => MoveChoice::Improvised,
        };
        act(
            &mut self.wild,
            &mut self.roster[self.active_index],
            choice,
            &mut self.rng,
            &mut self.events,
        );
    }

    /// End-of-exchange residual damage and faint resolution, both sides.
    fn settle_exchange(&mut self) {
        apply_residual(&mut self.roster[self.active_index], &mut self.events);
        apply_residual(&mut self.wild, &mut self.events);

        if self.wild.is_fainted() {
            self.handle_wild_faint();
            return;
        }
        if self.roster[self.active_index].is_fainted() {
            self.handle_player_faint();
        }
    }

    fn handle_wild_faint(&mut self) {
        self.events.push(BattleEvent::Fainted {
            name: self.wild.name.clone(),
        });

        let exp = self.floor * 100;
        let active = &mut self.roster[self.active_index];
        self.events.push(BattleEvent::ExperienceGained {
            name: active.name.clone(),
            amount: exp,
        });
        if let Some(level) = active.grant_exp(exp) {
            self.events.push(BattleEvent::LeveledUp {
                name: active.name.clone(),
                level,
            });
        }

        self.phase = BattlePhase::Victory;
    }

    fn handle_player_faint(&mut self) {
        self.events.push(BattleEvent::Fainted {
            name: self.roster[self.active_index].name.clone(),
        });

        // first living bench member in original roster order steps in
        match self.roster.iter().position(|c| !c.is_fainted()) {
            Some(index) => {
                self.active_index = index;
                self.roster[index].reset_on_switch_in();
                self.events.push(BattleEvent::SwitchedIn {
                    name: self.roster[index].name.clone(),
                });
            }
            None => self.finish(BattleOutcome::Defeat),
        }
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        self.outcome = Some(outcome);
        self.phase = match outcome {
            BattleOutcome::Defeat => BattlePhase::Defeat,
            _ => BattlePhase::Ended,
        };
        self.events.push(BattleEvent::BattleEnded { outcome });
    }
}

fn phase_label(phase: BattlePhase) -> &'static str {
    match phase {
        BattlePhase::Intro => "intro",
        BattlePhase::Battle => "battle",
        BattlePhase::Victory => "victory",
        BattlePhase::Capture => "capture",
        BattlePhase::Defeat => "defeat",
        BattlePhase::Ended => "ended",
    }
}

/// One combatant's action within an exchange: status gating, accuracy, then
/// either stat-stage application or damage plus secondary effect.
fn act(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    choice: MoveChoice,
    rng: &mut BattleRng,
    events: &mut EventBus,
) {
    if !status_allows_action(attacker, rng, events) {
        return;
    }

    let (data, name) = match choice {
        MoveChoice::Slot(index) => {
            let slot = &mut attacker.moves[index];
            slot.pp -= 1;
            let name = slot.name.clone();
            let (data, fallback) = resolve_move(&name, attacker.primary_element());
            if fallback {
                events.push(BattleEvent::UnknownMoveSubstituted {
                    attacker: attacker.name.clone(),
                    move_name: name.clone(),
                });
            }
            (data, name)
        }
        MoveChoice::Improvised => {
            let name = "struggle".to_string();
            let (data, _) = resolve_move(&name, attacker.primary_element());
            (data, name)
        }
    };

    events.push(BattleEvent::MoveUsed {
        attacker: attacker.name.clone(),
        move_name: name.clone(),
    });

    if !accuracy_check(&data, rng) {
        events.push(BattleEvent::MoveMissed {
            attacker: attacker.name.clone(),
            move_name: name,
        });
        return;
    }

    if !data.is_damaging() {
        if let Some(effect) = data.effect {
            apply_effect(effect, attacker, defender, rng, events);
        }
        return;
    }

    let outcome = calculate_damage(attacker, defender, &data, rng);
    if outcome.type_multiplier == 0.0 {
        events.push(BattleEvent::NoEffect {
            target: defender.name.clone(),
        });
        return;
    }

    defender.take_damage(outcome.damage);
    events.push(BattleEvent::DamageDealt {
        target: defender.name.clone(),
        amount: outcome.damage,
        effectiveness: outcome.type_multiplier,
        critical: outcome.is_critical,
    });

    if !defender.is_fainted() {
        if let Some(effect) = data.effect {
            apply_effect(effect, attacker, defender, rng, events);
        }
    }
}

/// Pre-move status gate. Sleep skips and ticks down, paralysis blocks a
/// quarter of the time, freeze holds at 80% and thaws otherwise.
fn status_allows_action(
    attacker: &mut Combatant,
    rng: &mut BattleRng,
    events: &mut EventBus,
) -> bool {
    match attacker.status {
        Some(StatusCondition::Sleep(turns)) => {
            events.push(BattleEvent::Asleep {
                name: attacker.name.clone(),
            });
            let remaining = turns.saturating_sub(1);
            if remaining == 0 {
                attacker.status = None;
                events.push(BattleEvent::WokeUp {
                    name: attacker.name.clone(),
                });
            } else {
                attacker.status = Some(StatusCondition::Sleep(remaining));
            }
            false
        }
        Some(StatusCondition::Paralysis) => {
            if rng.next_outcome("paralysis check") <= PARALYSIS_BLOCK {
                events.push(BattleEvent::FullyParalyzed {
                    name: attacker.name.clone(),
                });
                false
            } else {
                true
            }
        }
        Some(StatusCondition::Freeze) => {
            if rng.next_outcome("freeze check") <= FREEZE_STAY {
                events.push(BattleEvent::Frozen {
                    name: attacker.name.clone(),
                });
                false
            } else {
                attacker.status = None;
                events.push(BattleEvent::Thawed {
                    name: attacker.name.clone(),
                });
                true
            }
        }
        _ => true,
    }
}

fn accuracy_check(data: &MoveData, rng: &mut BattleRng) -> bool {
    rng.next_outcome("accuracy check") <= data.accuracy as u16 * 100
}

fn apply_effect(
    effect: MoveEffect,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    rng: &mut BattleRng,
    events: &mut EventBus,
) {
    let chance = match effect {
        MoveEffect::StatChange { chance, .. } | MoveEffect::InflictStatus { chance, .. } => chance,
    };
    if chance < 100 && !rng.percent_check(chance, "secondary effect chance") {
        return;
    }

    match effect {
        MoveEffect::StatChange {
            target, stat, delta, ..
        } => {
            let recipient = match target {
                EffectTarget::User => attacker,
                EffectTarget::Target => defender,
            };
            let before = recipient.stages.get(stat);
            let new_stage = recipient.stages.modify(stat, delta);
            if new_stage == before {
                events.push(BattleEvent::StatLimitReached {
                    target: recipient.name.clone(),
                    stat,
                    delta,
                });
            } else {
                events.push(BattleEvent::StatChanged {
                    target: recipient.name.clone(),
                    stat,
                    delta,
                    new_stage,
                });
            }
        }
        MoveEffect::InflictStatus { status, .. } => {
            if defender.status.is_some() {
                events.push(BattleEvent::StatusRefused {
                    target: defender.name.clone(),
                });
                return;
            }
            let condition = match status {
                StatusKind::Sleep => {
                    StatusCondition::Sleep(1 + rng.next_index(3, "sleep duration") as u8)
                }
                StatusKind::Paralysis => StatusCondition::Paralysis,
                StatusKind::Freeze => StatusCondition::Freeze,
                StatusKind::Burn => StatusCondition::Burn,
                StatusKind::Poison => StatusCondition::Poison,
            };
            defender.status = Some(condition);
            events.push(BattleEvent::StatusInflicted {
                target: defender.name.clone(),
                status: condition,
            });
        }
    }
}

fn apply_residual(combatant: &mut Combatant, events: &mut EventBus) {
    let (status, amount) = match combatant.status {
        Some(StatusCondition::Burn) => (StatusCondition::Burn, combatant.burn_damage()),
        Some(StatusCondition::Poison) => (StatusCondition::Poison, combatant.poison_damage()),
        _ => return,
    };
    if combatant.is_fainted() || amount == 0 {
        return;
    }
    combatant.take_damage(amount);
    events.push(BattleEvent::ResidualDamage {
        name: combatant.name.clone(),
        status,
        amount,
    });
}
