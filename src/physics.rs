/// A deliberately small physics world for the terminal host: it moves
/// bodies by their velocity and reports overlapping boxes as contacts.
/// The scene decides what a contact means.

use std::time::Duration;

use crate::entities::{Entity, EntityId, EntityKind};

/// Move every body that isn't under a move-to action by its velocity.
pub fn integrate<'a>(bodies: impl Iterator<Item = &'a mut Entity>, dt: Duration) {
    let secs = dt.as_secs_f32();
    for body in bodies {
        if body.motion.is_none() && !body.removed {
            body.y += body.vy * secs;
        }
    }
}

/// Whether contacts between these two kinds are reported at all.
fn reports_contact(a: EntityKind, b: EntityKind) -> bool {
    use EntityKind::*;
    matches!(
        (a, b),
        (Enemy, Projectile) | (Projectile, Enemy) | (Enemy, Player) | (Player, Enemy)
    )
}

fn overlaps(a: &Entity, b: &Entity) -> bool {
    let (aw, ah) = a.kind.half_extents();
    let (bw, bh) = b.kind.half_extents();
    (a.x - b.x).abs() < aw + bw && (a.y - b.y).abs() < ah + bh
}

/// Every touching pair, as (body A, body B) with A the earlier body in
/// iteration order.  Bodies that are dead or leaving play are skipped.
pub fn detect_contacts<'a>(bodies: impl Iterator<Item = &'a Entity>) -> Vec<(EntityId, EntityId)> {
    let active: Vec<&Entity> = bodies.filter(|b| b.alive && !b.removed).collect();
    let mut contacts = Vec::new();

    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if reports_contact(a.kind, b.kind) && overlaps(a, b) {
                contacts.push((a.id, b.id));
            }
        }
    }
    contacts
}
