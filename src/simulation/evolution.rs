//! Generational replacement.
//!
//! Once a generation is over, every member of the dead pool receives a fitness equal to
//! its share of the pool's total score. The next population is bred by picking two
//! parents per child with roulette-wheel selection, crossing their controllers over and
//! mutating the result.

use rand::Rng;

use super::agent::Agent;
use super::params::Params;

/// Sets each agent's fitness to `score / total_score`.
///
/// When nobody scored, every agent gets the same fitness `1 / n` so that selection is
/// uniform instead of dividing by zero.
///
/// # Panics
///
/// Panics if `pool` is empty.
pub fn assign_fitness(pool: &mut [Agent]) {
    assert!(!pool.is_empty(), "fitness requested for an empty dead pool");

    let total: u64 = pool.iter().map(|agent| u64::from(agent.score)).sum();

    if total == 0 {
        tracing::warn!(
            pool = pool.len(),
            "every agent scored zero, falling back to uniform fitness"
        );
        let uniform = 1.0 / pool.len() as f32;
        for agent in pool.iter_mut() {
            agent.fitness = uniform;
        }
        return;
    }

    for agent in pool.iter_mut() {
        agent.fitness = (f64::from(agent.score) / total as f64) as f32;
    }
}

/// Roulette-wheel selection over a pool with assigned fitness.
///
/// Draws `r` in `[0, 1)` and walks the pool in order, subtracting each fitness until
/// `r` is no longer positive. Rounding leftovers select the last agent.
///
/// # Panics
///
/// Panics if `pool` is empty.
pub fn pick_parent<'a, R: Rng + ?Sized>(pool: &'a [Agent], rng: &mut R) -> &'a Agent {
    assert!(!pool.is_empty(), "parent requested from an empty dead pool");

    let mut r: f32 = rng.random();
    for agent in pool {
        r -= agent.fitness;
        if r <= 0.0 {
            return agent;
        }
    }

    &pool[pool.len() - 1]
}

/// Breeds one child from two independently selected parents.
///
/// The same parent may be selected twice.
pub fn reproduce<R: Rng + ?Sized>(pool: &[Agent], params: &Params, rng: &mut R) -> Agent {
    let parent_1 = pick_parent(pool, rng);
    let parent_2 = pick_parent(pool, rng);

    let mut controller = parent_1.controller.crossover(&parent_2.controller, rng);
    controller.mutate(params.mutation_rate, params.mutation_strength, rng);

    Agent::new(params.spawn_point(), controller, params)
}

/// Assigns fitness to `pool` and breeds a full population from it.
pub fn next_generation<R: Rng + ?Sized>(
    pool: &mut [Agent],
    params: &Params,
    rng: &mut R,
) -> Vec<Agent> {
    assign_fitness(pool);

    (0..params.population_size)
        .map(|_| reproduce(pool, params, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool_with_scores(scores: &[u32], rng: &mut StdRng) -> Vec<Agent> {
        let params = Params::default();
        scores
            .iter()
            .map(|&score| {
                let mut agent = Agent::new_random(&params, rng);
                agent.score = score;
                agent.alive = false;
                agent
            })
            .collect()
    }

    #[test]
    fn zero_fitness_agents_are_never_picked() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pool = pool_with_scores(&[0, 50, 0], &mut rng);
        assign_fitness(&mut pool);

        for _ in 0..200 {
            let parent = pick_parent(&pool, &mut rng);
            assert_eq!(parent.score, 50);
        }
    }

    #[test]
    #[should_panic(expected = "empty dead pool")]
    fn empty_pool_panics() {
        assign_fitness(&mut []);
    }
}
