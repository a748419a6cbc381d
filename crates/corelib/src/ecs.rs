//! Tiny ECS: World, Entity, components: Transform + tween.

use crate::error::{CoreError, CoreResult};
use crate::time::GameTime;
use crate::transform::{Transform, TransformChannel};
use crate::tween::{TweenPosition, TweenStatus, Tweener};

/// Entity id (dense, index into component arrays).
pub type Entity = u32;

/// Tween attached to an entity. The target is always the owner's transform,
/// looked up by entity id on every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenComponent {
    /// Drives one float of the transform.
    Scalar {
        tweener: Tweener,
        channel: TransformChannel,
    },
    /// Drives the translation.
    Position(TweenPosition),
}

impl TweenComponent {
    pub fn scalar(tweener: Tweener, channel: TransformChannel) -> Self {
        Self::Scalar { tweener, channel }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Scalar { tweener, .. } => tweener.is_active(),
            Self::Position(tw) => tw.is_active(),
        }
    }

    fn start(&mut self, time: &GameTime) {
        match self {
            Self::Scalar { tweener, .. } => tweener.start(time),
            Self::Position(tw) => tw.start(time),
        }
    }

    fn update(&mut self, time: &GameTime, transform: &mut Transform) -> TweenStatus {
        match self {
            Self::Scalar { tweener, channel } => tweener.update(time, transform.channel_mut(*channel)),
            Self::Position(tw) => tw.update(time, &mut transform.translation),
        }
    }
}

/// Very small ECS world with dense parallel arrays.
/// No allocations per-frame; spawn may allocate to grow capacity.
#[derive(Default)]
pub struct World {
    transforms: Vec<Transform>,
    tweens: Vec<Option<TweenComponent>>,
    alive: Vec<bool>,
    len: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn entity with a Transform.
    pub fn spawn(&mut self, t: Transform) -> Entity {
        let id = self.len;
        let idx = id as usize;
        self.len += 1;

        if idx >= self.transforms.len() {
            // grow all arrays equally
            let new_len = (idx + 1).next_power_of_two().max(8);
            self.transforms.resize(new_len, Transform::identity());
            self.tweens.resize(new_len, None);
            self.alive.resize(new_len, false);
        }

        self.transforms[idx] = t;
        self.tweens[idx] = None;
        self.alive[idx] = true;
        id
    }

    /// Kill an entity; its components go with it. Ids are not reused.
    pub fn despawn(&mut self, e: Entity) -> bool {
        if !self.is_alive(e) {
            return false;
        }
        let i = e as usize;
        self.alive[i] = false;
        self.tweens[i] = None;
        true
    }

    #[inline]
    pub fn is_alive(&self, e: Entity) -> bool {
        let i = e as usize;
        i < self.alive.len() && self.alive[i]
    }

    #[inline]
    pub fn transform(&self, e: Entity) -> Option<&Transform> {
        self.is_alive(e).then(|| &self.transforms[e as usize])
    }

    /// Attach (or replace) the tween component of `e`.
    pub fn attach_tween(&mut self, e: Entity, tween: TweenComponent) -> CoreResult<()> {
        if !self.is_alive(e) {
            return Err(CoreError::DeadEntity(e));
        }
        self.tweens[e as usize] = Some(tween);
        Ok(())
    }

    pub fn tween(&self, e: Entity) -> Option<&TweenComponent> {
        if self.is_alive(e) {
            self.tweens[e as usize].as_ref()
        } else {
            None
        }
    }

    pub fn tween_mut(&mut self, e: Entity) -> Option<&mut TweenComponent> {
        if self.is_alive(e) {
            self.tweens[e as usize].as_mut()
        } else {
            None
        }
    }

    /// Arm the tween on `e`. Dead entities and entities without a tween are
    /// ignored; returns whether a tween was started.
    pub fn start_tween(&mut self, e: Entity, time: &GameTime) -> bool {
        match self.tween_mut(e) {
            Some(tween) => {
                tween.start(time);
                true
            }
            None => {
                log::debug!("start_tween ignored: entity {} has no live tween", e);
                false
            }
        }
    }

    /// System: advance every running tween against its own transform.
    /// Returns how many tweens completed on this tick.
    pub fn system_tweens(&mut self, time: &GameTime) -> usize {
        let mut completed = 0;
        for i in 0..(self.len as usize) {
            if !self.alive[i] {
                continue;
            }
            if let Some(tween) = self.tweens[i].as_mut() {
                if tween.update(time, &mut self.transforms[i]) == TweenStatus::Completed {
                    completed += 1;
                }
            }
        }
        completed
    }

    /// Iterate over live entities and their transforms.
    pub fn iter_transforms(&self) -> impl Iterator<Item = (Entity, &Transform)> {
        (0..self.len as usize).filter_map(move |i| {
            if self.alive.get(i).copied().unwrap_or(false) {
                Some((i as Entity, &self.transforms[i]))
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::{TweenMethod, TweenState};
    use crate::{Vec3, vec3};

    #[test]
    fn position_tween_moves_owner_only() {
        let mut world = World::new();
        let mover = world.spawn(Transform::identity());
        let bystander = world.spawn(Transform::from_translation(vec3(7.0, 7.0, 7.0)));

        let tween = TweenPosition::new(TweenMethod::Linear, Vec3::ZERO, vec3(10.0, 0.0, 0.0), 1.0);
        world.attach_tween(mover, TweenComponent::Position(tween)).unwrap();
        assert!(world.start_tween(mover, &GameTime::at(0.0)));

        assert_eq!(world.system_tweens(&GameTime::at(0.5)), 0);
        assert_eq!(world.transform(mover).unwrap().translation, vec3(5.0, 0.0, 0.0));
        assert_eq!(world.transform(bystander).unwrap().translation, vec3(7.0, 7.0, 7.0));

        assert_eq!(world.system_tweens(&GameTime::at(1.0)), 1);
        assert_eq!(world.transform(mover).unwrap().translation, vec3(10.0, 0.0, 0.0));
        assert_eq!(world.system_tweens(&GameTime::at(2.0)), 0);
    }

    #[test]
    fn scalar_tween_writes_its_channel() {
        let mut world = World::new();
        let e = world.spawn(Transform::identity());
        let tweener = Tweener::new(TweenMethod::Linear, 1.0, 3.0, 2.0);
        world
            .attach_tween(e, TweenComponent::scalar(tweener, TransformChannel::ScaleY))
            .unwrap();
        world.start_tween(e, &GameTime::at(0.0));
        world.system_tweens(&GameTime::at(1.0));

        let t = world.transform(e).unwrap();
        assert_eq!(t.scale, vec3(1.0, 2.0, 1.0));
        assert_eq!(t.channel(TransformChannel::ScaleY), 2.0);
    }

    #[test]
    fn start_on_dead_or_bare_entity_is_ignored() {
        let mut world = World::new();
        let bare = world.spawn(Transform::identity());
        assert!(!world.start_tween(bare, &GameTime::at(0.0)));
        assert!(!world.start_tween(1234, &GameTime::at(0.0)));
    }

    #[test]
    fn attach_to_dead_entity_fails() {
        let mut world = World::new();
        let e = world.spawn(Transform::identity());
        assert!(world.despawn(e));
        let res = world.attach_tween(e, TweenComponent::Position(TweenPosition::default()));
        assert_eq!(res, Err(CoreError::DeadEntity(e)));
    }

    #[test]
    fn despawn_drops_tween() {
        let mut world = World::new();
        let e = world.spawn(Transform::identity());
        world
            .attach_tween(e, TweenComponent::Position(TweenPosition::default()))
            .unwrap();
        world.start_tween(e, &GameTime::at(0.0));
        world.despawn(e);

        assert!(world.tween(e).is_none());
        assert_eq!(world.system_tweens(&GameTime::at(5.0)), 0);
        assert_eq!(world.iter_transforms().count(), 0);
    }

    #[test]
    fn restart_through_world() {
        let mut world = World::new();
        let e = world.spawn(Transform::identity());
        let tweener = Tweener::new(TweenMethod::Linear, 0.0, 1.0, 1.0);
        world
            .attach_tween(e, TweenComponent::scalar(tweener, TransformChannel::RotationZ))
            .unwrap();
        world.start_tween(e, &GameTime::at(0.0));
        world.system_tweens(&GameTime::at(1.0));

        match world.tween(e) {
            Some(TweenComponent::Scalar { tweener, .. }) => {
                assert_eq!(tweener.state(), TweenState::Finished)
            }
            other => panic!("unexpected tween {other:?}"),
        }
        assert!(world.start_tween(e, &GameTime::at(3.0)));
        assert!(world.tween(e).is_some_and(TweenComponent::is_active));
    }
}
