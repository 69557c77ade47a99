/// Collision-response dispatch.
///
/// The physics layer reports a contact as an ordered pair (body A, body B).
/// Only one side ever responds: A if it has a responder, otherwise B,
/// otherwise nobody.  Responders do not touch the scene directly; they
/// return `ContactEffect`s for the scene to apply.

use crate::entities::{Entity, EntityId, EntityKind};

/// Something the scene must do as a result of a contact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactEffect {
    /// Kill the entity and take it out of play.
    Destroy(EntityId),
    /// The player was struck.
    PlayerDown(EntityId),
    /// Add points to the score.
    Award(u32),
}

/// The collision-response capability an entity may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Responder {
    Enemy,
    Projectile,
}

impl Responder {
    /// React to `me` touching `other`.
    pub fn handle_contact_with(self, me: &Entity, other: &Entity) -> Vec<ContactEffect> {
        // A body already killed this frame can't be killed again.
        if !me.alive || !other.alive {
            return Vec::new();
        }
        match (self, other.kind) {
            (Responder::Enemy, EntityKind::Projectile) => vec![
                ContactEffect::Destroy(me.id),
                ContactEffect::Destroy(other.id),
                ContactEffect::Award(me.bounty()),
            ],
            (Responder::Enemy, EntityKind::Player) => vec![
                ContactEffect::PlayerDown(other.id),
                ContactEffect::Destroy(me.id),
            ],
            (Responder::Projectile, EntityKind::Enemy) => vec![
                ContactEffect::Destroy(other.id),
                ContactEffect::Destroy(me.id),
                ContactEffect::Award(other.bounty()),
            ],
            _ => Vec::new(),
        }
    }
}

/// Outcome of a dispatched contact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    /// The entity whose responder ran.
    pub responder: EntityId,
    pub other: EntityId,
    pub effects: Vec<ContactEffect>,
}

/// Route a contact between `a` and `b`.  Missing bodies and pairs where
/// neither side can respond are ignored.
pub fn dispatch(a: Option<&Entity>, b: Option<&Entity>) -> Option<Contact> {
    let (a, b) = (a?, b?);

    if let Some(responder) = a.responder() {
        return Some(Contact {
            responder: a.id,
            other: b.id,
            effects: responder.handle_contact_with(a, b),
        });
    }
    if let Some(responder) = b.responder() {
        return Some(Contact {
            responder: b.id,
            other: a.id,
            effects: responder.handle_contact_with(b, a),
        });
    }
    None
}
