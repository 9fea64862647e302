//! Cloneable façades for issuing commands to entity workers.
//!
//! Handles hide channel plumbing and offer async helpers mirroring the
//! rules operations. Every call is queued behind earlier calls on the same
//! entity.
use tokio::sync::{broadcast, mpsc, oneshot};

use hunt_core::{
    ActorId, Combatant, CombatSequencer, CombatantId, EncounterId, Hit, HitOutcome, MonsterActor,
    PartId, PartTemplate, Rewind, RoundAdvance, RoundTick, TurnAdvance,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{EncounterCommand, MonsterAttack, MonsterCommand};

async fn request<C, T>(
    command_tx: &mpsc::Sender<C>,
    make: impl FnOnce(oneshot::Sender<Result<T>>) -> C,
) -> Result<T> {
    let (reply_tx, reply_rx) = oneshot::channel();

    command_tx
        .send(make(reply_tx))
        .await
        .map_err(|_| RuntimeError::CommandChannelClosed)?;

    reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
}

async fn query<C, T>(
    command_tx: &mpsc::Sender<C>,
    make: impl FnOnce(oneshot::Sender<T>) -> C,
) -> Result<T> {
    let (reply_tx, reply_rx) = oneshot::channel();

    command_tx
        .send(make(reply_tx))
        .await
        .map_err(|_| RuntimeError::CommandChannelClosed)?;

    reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
}

/// Client-facing handle to one encounter.
#[derive(Clone)]
pub struct EncounterHandle {
    id: EncounterId,
    command_tx: mpsc::Sender<EncounterCommand>,
    event_bus: EventBus,
}

impl EncounterHandle {
    pub(crate) fn new(
        id: EncounterId,
        command_tx: mpsc::Sender<EncounterCommand>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> &EncounterId {
        &self.id
    }

    pub async fn start(&self) -> Result<()> {
        request(&self.command_tx, |reply| EncounterCommand::Start { reply }).await
    }

    pub async fn end(&self) -> Result<()> {
        request(&self.command_tx, |reply| EncounterCommand::End { reply }).await
    }

    /// Ends the active combatant's turn, reading its clock from the store.
    pub async fn advance_turn(&self) -> Result<TurnAdvance> {
        request(&self.command_tx, |reply| EncounterCommand::AdvanceTurn {
            reply,
        })
        .await
    }

    pub async fn advance_round(&self) -> Result<RoundAdvance> {
        request(&self.command_tx, |reply| EncounterCommand::AdvanceRound {
            reply,
        })
        .await
    }

    pub async fn retreat_turn(&self) -> Result<Rewind> {
        request(&self.command_tx, |reply| EncounterCommand::RetreatTurn {
            reply,
        })
        .await
    }

    pub async fn retreat_round(&self) -> Result<Rewind> {
        request(&self.command_tx, |reply| EncounterCommand::RetreatRound {
            reply,
        })
        .await
    }

    pub async fn add_combatant(&self, combatant: Combatant) -> Result<()> {
        request(&self.command_tx, |reply| EncounterCommand::AddCombatant {
            combatant,
            reply,
        })
        .await
    }

    pub async fn remove_combatant(&self, combatant: CombatantId) -> Result<Combatant> {
        request(&self.command_tx, |reply| EncounterCommand::RemoveCombatant {
            combatant,
            reply,
        })
        .await
    }

    pub async fn set_defeated(&self, combatant: CombatantId, defeated: bool) -> Result<()> {
        request(&self.command_tx, |reply| EncounterCommand::SetDefeated {
            combatant,
            defeated,
            reply,
        })
        .await
    }

    pub async fn set_hidden(&self, combatant: CombatantId, hidden: bool) -> Result<()> {
        request(&self.command_tx, |reply| EncounterCommand::SetHidden {
            combatant,
            hidden,
            reply,
        })
        .await
    }

    /// Query the current sequencer (read-only snapshot)
    pub async fn query(&self) -> Result<CombatSequencer> {
        query(&self.command_tx, |reply| EncounterCommand::Query { reply }).await
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}

/// Client-facing handle to one monster sheet.
#[derive(Clone)]
pub struct MonsterHandle {
    id: ActorId,
    command_tx: mpsc::Sender<MonsterCommand>,
    event_bus: EventBus,
}

impl MonsterHandle {
    pub(crate) fn new(
        id: ActorId,
        command_tx: mpsc::Sender<MonsterCommand>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    pub async fn take_hit(&self, hit: Hit) -> Result<HitOutcome> {
        request(&self.command_tx, |reply| MonsterCommand::TakeHit { hit, reply }).await
    }

    /// Once-per-round upkeep: status decay, clock countdown, stamina recovery.
    pub async fn tick_round(&self) -> Result<RoundTick> {
        request(&self.command_tx, |reply| MonsterCommand::TickRound { reply }).await
    }

    /// Books an attack: damage with enrage applied, new clock, stamina spent.
    pub async fn attack(
        &self,
        base_damage: f64,
        clock: f64,
        stamina_cost: u32,
    ) -> Result<MonsterAttack> {
        request(&self.command_tx, |reply| MonsterCommand::Attack {
            base_damage,
            clock,
            stamina_cost,
            reply,
        })
        .await
    }

    pub async fn add_part(&self, template: PartTemplate) -> Result<PartId> {
        request(&self.command_tx, |reply| MonsterCommand::AddPart {
            template,
            reply,
        })
        .await
    }

    /// Query the current sheet (read-only snapshot)
    pub async fn query(&self) -> Result<MonsterActor> {
        query(&self.command_tx, |reply| MonsterCommand::Query { reply }).await
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
