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
//! Full-frame throughput
//!
//! Builds a room packed with walls and patrolling and following NPCs, then
//! measures one `advance_frame` with the player walking around.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write;
use std::sync::Arc;
use tilequest::animation::{names, AnimationClip, AnimationLibrary};
use tilequest::config::GameConfig;
use tilequest::ecs::components::InputState;
use tilequest::level::LevelDescription;
use tilequest::math::Vec2;
use tilequest::simulation::Simulation;

fn library() -> AnimationLibrary {
    let mut library = AnimationLibrary::new();
    for name in names::REQUIRED.iter().chain(["Wall", "Npc"].iter()) {
        library.insert(AnimationClip::new(name, 2, 4, Vec2::new(64.0, 64.0)));
    }
    library
}

fn level(npc_count: usize) -> LevelDescription {
    let mut text = String::from("Player 640 384 24 24 5\n");
    for x in 0..20 {
        let _ = writeln!(text, "Tile Wall 0 0 {} 0 1 1", x);
        let _ = writeln!(text, "Tile Wall 0 0 {} 11 1 1", x);
    }
    for i in 0..npc_count {
        let x = 1 + i % 18;
        let y = 1 + (i / 18) % 10;
        if i % 2 == 0 {
            let _ = writeln!(text, "NPC Npc 0 0 {} {} 1 0 Patrol 2 2 {} {} {} {}", x, y, x, y, 18 - x, y);
        } else {
            let _ = writeln!(text, "NPC Npc 0 0 {} {} 1 0 Follow 1.5", x, y);
        }
    }
    LevelDescription::parse(&text).expect("benchmark level parses")
}

fn bench_advance_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_frame");
    let animations = Arc::new(library());
    let config = GameConfig::new();

    for npc_count in [10, 50, 200].iter() {
        group.throughput(Throughput::Elements(*npc_count as u64));
        let description = level(*npc_count);

        group.bench_with_input(
            BenchmarkId::new("npcs", npc_count),
            npc_count,
            |b, _| {
                b.iter_batched(
                    || {
                        Simulation::create_level(&description, Arc::clone(&animations), &config)
                            .expect("benchmark level builds")
                    },
                    |mut sim| {
                        let input = InputState {
                            right: true,
                            ..InputState::default()
                        };
                        for _ in 0..10 {
                            sim.advance_frame(&input, false).expect("frame runs");
                        }
                        black_box(sim.frame());
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_advance_frame);
criterion_main!(benches);
