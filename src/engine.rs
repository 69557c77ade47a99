/// One host frame, in the order a scene-graph engine runs it: update hooks,
/// actions, physics, contact callbacks, then cleanup.

use std::time::Duration;

use rand::Rng;

use crate::physics;
use crate::scene::{GameScene, SceneTransition};

/// Run a single frame of `dt` against `scene`.  Returns the title hand-off
/// if it came due during this frame.
pub fn step(scene: &mut GameScene, dt: Duration, rng: &mut impl Rng) -> Option<SceneTransition> {
    scene.update();
    let transition = scene.evaluate_actions(dt, rng);

    physics::integrate(scene.entities_mut(), dt);
    let contacts = physics::detect_contacts(scene.entities());
    for (a, b) in contacts {
        scene.did_begin_contact(a, b);
    }

    scene.sweep();
    transition
}
