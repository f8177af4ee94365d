// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Lifespan expiry

use crate::ecs::components::LifeSpan;
use crate::ecs::System;
use crate::error::SimResult;
use crate::world::World;
use log::trace;

/// Flags entities whose [`LifeSpan`] has run out
#[derive(Debug, Default)]
pub struct LifespanSystem;

impl System for LifespanSystem {
    fn run(&mut self, world: &mut World) -> SimResult<()> {
        let now = world.clock.now_ms();
        for entity in world.store.entities() {
            let expired = world
                .store
                .get::<LifeSpan>(entity)
                .is_some_and(|l| l.is_expired(now));
            if expired && world.store.destroy(entity) {
                trace!("{} expired at {}ms", entity, now);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "lifespan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_world;
    use crate::world::SimClock;

    #[test]
    fn test_expiry_boundary() {
        let mut world = empty_world();
        let entity = world.store.add_entity("sword");
        world.store.insert(entity, LifeSpan::new(150, 0));
        world.store.update();

        world.clock = SimClock::starting_at(149);
        LifespanSystem.run(&mut world).unwrap();
        assert!(world.store.is_alive(entity));

        world.clock = SimClock::starting_at(150);
        LifespanSystem.run(&mut world).unwrap();
        assert!(!world.store.is_alive(entity));
    }

    #[test]
    fn test_entities_without_lifespan_untouched() {
        let mut world = empty_world();
        world.store.update();
        world.clock = SimClock::starting_at(u64::MAX);
        LifespanSystem.run(&mut world).unwrap();
        assert!(world.store.is_alive(world.player()));
    }
}
