//! Behavioural properties of the flock step.

use boids3d::physics::{bounded_distance, FAR_DISTANCE};
use boids3d::{Agent, BoundsProvider, Flock, FrustumBounds, SimulationParams, Vec3};

const TOLERANCE: f32 = 1e-5;

// Far-away boundary, every rule off
fn quiet_params() -> SimulationParams {
    SimulationParams {
        vision_range: 2.0,
        collision_range: 1.0,
        speed_limit: 100.0,
        cohesion_weight: 0.0,
        separation_weight: 0.0,
        alignment_weight: 0.0,
        boundary: Vec3::splat(1.0e6),
        ..SimulationParams::default()
    }
}

fn busy_params() -> SimulationParams {
    SimulationParams {
        num_agents: 120,
        vision_range: 3.0,
        collision_range: 1.0,
        speed_limit: 0.2,
        cohesion_weight: 0.05,
        separation_weight: 0.1,
        alignment_weight: 0.05,
        spawn_extent: Vec3::new(12.0, 12.0, 6.0),
        initial_speed: 0.3,
        boundary: Vec3::new(5.0, 5.0, 2.0),
        ..SimulationParams::default()
    }
}

// ─── Invariants ───────────────────────────────────────────────

#[test]
fn speed_never_exceeds_limit() {
    let params = busy_params();
    let mut flock = Flock::seeded(params.num_agents, &params, 1234);

    for _ in 0..200 {
        flock.advance(&params);
        for agent in flock.agents() {
            assert!(
                agent.speed() <= params.speed_limit + TOLERANCE,
                "frame {}: speed {} over limit {}",
                flock.frame(),
                agent.speed(),
                params.speed_limit
            );
        }
    }
}

#[test]
fn population_is_constant() {
    let params = busy_params();
    for seed in 0..5 {
        let mut flock = Flock::seeded(37, &params, seed);
        assert_eq!(flock.len(), 37);
        for _ in 0..20 {
            flock.advance(&params);
        }
        assert_eq!(flock.len(), 37);
    }
}

#[test]
fn outward_velocity_flips_on_every_axis_out_of_bounds() {
    let params = busy_params();
    let mut flock = Flock::seeded(params.num_agents, &params, 77);

    for _ in 0..100 {
        let before = flock.agents().to_vec();
        flock.advance(&params);

        for (old, new) in before.iter().zip(flock.agents()) {
            let axes = [
                (old.position.x, old.velocity.x, new.velocity.x, params.boundary.x),
                (old.position.y, old.velocity.y, new.velocity.y, params.boundary.y),
                (old.position.z, old.velocity.z, new.velocity.z, params.boundary.z),
            ];
            for (position, old_v, new_v, half) in axes {
                if position > half && old_v > 0.0 {
                    assert!(new_v <= 0.0, "still heading out: pos {position}, v {old_v} -> {new_v}");
                }
                if position < -half && old_v < 0.0 {
                    assert!(new_v >= 0.0, "still heading out: pos {position}, v {old_v} -> {new_v}");
                }
            }
        }
    }
}

// ─── Neighbor pre-filter ──────────────────────────────────────

#[test]
fn prefilter_has_no_false_negatives() {
    let vision = 2.2;
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let mut next = || {
        // xorshift, enough for a sweep of offsets in [-3, 3)
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 6000) as f32 / 1000.0 - 3.0
    };

    for _ in 0..10_000 {
        let a = Vec3::new(next(), next(), next());
        let b = Vec3::new(next(), next(), next());
        let d = bounded_distance(a, b, vision);
        let true_distance = (a - b).length();

        if true_distance < vision {
            assert!((d - true_distance).abs() < 1e-6);
        }
        let delta = a - b;
        if delta.x.abs() > vision || delta.y.abs() > vision || delta.z.abs() > vision {
            assert_eq!(d, FAR_DISTANCE);
        }
    }
}

// ─── Determinism and order independence ───────────────────────

#[test]
fn identical_inputs_give_identical_outputs() {
    let params = busy_params();
    let mut a = Flock::seeded(params.num_agents, &params, 9);
    let mut b = Flock::seeded(params.num_agents, &params, 9);

    for _ in 0..50 {
        a.advance(&params);
        b.advance(&params);
    }
    assert_eq!(a.agents(), b.agents());
}

#[test]
fn parallel_and_grid_match_the_full_scan_exactly() {
    let base = busy_params();
    let start = Flock::seeded(base.num_agents, &base, 2024);

    let variants = [(true, false), (false, true), (true, true)];
    let mut reference = start.clone();
    let mut others: Vec<(SimulationParams, Flock)> = variants
        .iter()
        .map(|&(parallel, grid)| {
            let params = SimulationParams {
                enable_parallel: parallel,
                enable_spatial_grid: grid,
                ..base.clone()
            };
            (params, start.clone())
        })
        .collect();

    for _ in 0..60 {
        reference.advance(&base);
        for (params, flock) in &mut others {
            flock.advance(params);
            assert_eq!(
                flock.agents(),
                reference.agents(),
                "parallel={} grid={} diverged at frame {}",
                params.enable_parallel,
                params.enable_spatial_grid,
                flock.frame()
            );
        }
    }
}

#[test]
fn permuting_agents_permutes_results() {
    let params = busy_params();
    let start = Flock::seeded(40, &params, 31);

    let reversed: Vec<Agent> = start.agents().iter().rev().copied().collect();
    let mut forward = start.clone();
    let mut backward = Flock::from_agents(reversed);

    forward.advance(&params);
    backward.advance(&params);

    let mut backward_agents = backward.agents().to_vec();
    backward_agents.reverse();

    // Summation order differs, so compare within tolerance
    for (f, b) in forward.agents().iter().zip(&backward_agents) {
        assert!((f.position - b.position).length() < TOLERANCE);
        assert!((f.velocity - b.velocity).length() < TOLERANCE);
    }
}

// Updating agents in place while scanning leaks post-step state of earlier
// agents into later ones. The snapshot step must not reproduce that.
#[test]
fn snapshot_step_differs_from_in_place_update() {
    let params = SimulationParams {
        separation_weight: 0.5,
        ..quiet_params()
    };
    let positions = vec![Vec3::ZERO, Vec3::new(0.8, 0.0, 0.0)];
    let velocities = vec![Vec3::ZERO, Vec3::ZERO];

    let mut flock = Flock::from_parts(positions.clone(), velocities.clone()).unwrap();
    flock.advance(&params);

    let in_place = advance_in_place(&positions, &velocities, &params);

    // Both agents push apart symmetrically with the snapshot
    let snapshot = flock.agents();
    assert!((snapshot[0].velocity + snapshot[1].velocity).length() < TOLERANCE);
    assert!((snapshot[0].velocity - Vec3::new(-0.4, 0.0, 0.0)).length() < TOLERANCE);

    // In place, agent 1 sees agent 0 after it already moved away
    assert!((in_place[1].velocity - snapshot[1].velocity).length() > 0.1);
}

fn advance_in_place(positions: &[Vec3], velocities: &[Vec3], params: &SimulationParams) -> Vec<Agent> {
    let mut agents: Vec<Agent> = positions
        .iter()
        .zip(velocities)
        .map(|(&p, &v)| Agent::new(p, v))
        .collect();

    for i in 0..agents.len() {
        let mut separation = Vec3::ZERO;
        for j in 0..agents.len() {
            if i == j {
                continue;
            }
            let d = bounded_distance(agents[i].position, agents[j].position, params.vision_range);
            if d <= params.collision_range {
                separation += agents[i].position - agents[j].position;
            }
        }
        let delta = agents[i].velocity + separation * params.separation_weight;
        agents[i] = Agent::new(agents[i].position + delta, delta);
    }
    agents
}

// ─── Scenarios ────────────────────────────────────────────────

#[test]
fn agents_at_collision_range_push_straight_apart() {
    let params = SimulationParams {
        separation_weight: 0.25,
        ..quiet_params()
    };
    let range = params.collision_range;
    let mut flock = Flock::from_parts(
        vec![Vec3::ZERO, Vec3::new(range, 0.0, 0.0)],
        vec![Vec3::ZERO, Vec3::ZERO],
    )
    .unwrap();

    flock.advance(&params);

    let expected = params.separation_weight * range;
    let agents = flock.agents();
    assert!((agents[0].velocity - Vec3::new(-expected, 0.0, 0.0)).length() < TOLERANCE);
    assert!((agents[1].velocity - Vec3::new(expected, 0.0, 0.0)).length() < TOLERANCE);
}

#[test]
fn isolated_agent_only_feels_clamp_and_bounds() {
    let params = SimulationParams {
        cohesion_weight: 0.5,
        separation_weight: 0.5,
        alignment_weight: 0.5,
        ..quiet_params()
    };
    let velocity = Vec3::new(0.3, -0.2, 0.1);
    let mut flock = Flock::from_parts(
        vec![Vec3::ZERO, Vec3::new(50.0, 50.0, 50.0)],
        vec![velocity, Vec3::new(1.0, 1.0, 1.0)],
    )
    .unwrap();

    flock.advance(&params);

    assert_eq!(flock.agents()[0].velocity, velocity);
    assert_eq!(flock.agents()[0].position, velocity);

    // Same agent, but now over the speed limit
    let slow = SimulationParams {
        speed_limit: 0.1,
        ..params
    };
    let mut flock = Flock::from_parts(vec![Vec3::ZERO], vec![velocity]).unwrap();
    flock.advance(&slow);
    let v = flock.agents()[0].velocity;
    assert!((v.length() - 0.1).abs() < TOLERANCE);
    assert!((v / v.length() - velocity / velocity.length()).length() < TOLERANCE);
}

#[test]
fn agent_outside_on_x_turns_back_on_x_only() {
    let params = SimulationParams {
        boundary: Vec3::new(15.0, 10.0, 3.0),
        ..quiet_params()
    };
    let mut flock = Flock::from_parts(
        vec![Vec3::new(40.0, 1.0, -1.0)],
        vec![Vec3::new(0.05, 0.02, -0.01)],
    )
    .unwrap();

    flock.advance(&params);

    let agent = flock.agents()[0];
    assert_eq!(agent.velocity, Vec3::new(-0.05, 0.02, -0.01));
    assert!((agent.position - Vec3::new(39.95, 1.02, -1.01)).length() < TOLERANCE);
}

#[test]
fn frustum_bounds_contain_agents_near_the_camera() {
    let params = quiet_params();
    let bounds = FrustumBounds {
        fov_y: 75f32.to_radians(),
        aspect: 16.0 / 9.0,
        camera_distance: 10.0,
        z_half_extent: 3.0,
    };
    let position = Vec3::new(0.0, 9.0, 0.0);
    assert!(position.y > bounds.half_extents_at(position).y);

    let mut flock = Flock::from_parts(vec![position], vec![Vec3::new(0.0, 0.05, 0.0)]).unwrap();
    flock.advance_with_bounds(&params, &bounds);
    assert_eq!(flock.agents()[0].velocity, Vec3::new(0.0, -0.05, 0.0));
}

#[test]
fn states_are_reported_in_agent_order() {
    let positions = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)];
    let velocities = vec![Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)];
    let flock = Flock::from_parts(positions.clone(), velocities.clone()).unwrap();

    let states: Vec<(Vec3, Vec3)> = flock.states().collect();
    let expected: Vec<(Vec3, Vec3)> = positions.into_iter().zip(velocities).collect();
    assert_eq!(states, expected);
}
