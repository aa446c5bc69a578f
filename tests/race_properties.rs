//! Race simulator property tests.
//!
//! Each test states a hypothesis about the estimator and tries to falsify
//! it. All runs are seeded, so the tests are deterministic.

use proptest::prelude::*;
use racesim::prelude::*;

fn config(n: usize) -> SimulationConfig {
    SimulationConfig::builder().num_simulations(n).build().unwrap()
}

fn deterministic(n: usize) -> SimulationConfig {
    SimulationConfig::builder()
        .num_simulations(n)
        .lap_time_std_dev(0.0)
        .safety_car_chance(0.0)
        .build()
        .unwrap()
}

fn mean(times: &[f64]) -> f64 {
    times.iter().sum::<f64>() / times.len() as f64
}

/// Closed form of the deterministic reference race: base pace, linear tyre
/// wear over laps 1..=50, three scheduled stops and the fuel penalty summed
/// over the four stints (fuel at lap start 100..72, 98..70, 98..70, 98..90).
fn reference_total() -> f64 {
    let base = 50.0 * 90.0;
    let wear = 0.02 * (1..=50).map(f64::from).sum::<f64>();
    let pits = 3.0 * 20.0;

    let penalty = |fuel: f64| (1.0 - fuel / 100.0) * 0.5;
    let first: f64 = (0..15).map(|j| penalty(100.0 - 2.0 * f64::from(j))).sum();
    let middle: f64 = (0..15).map(|j| penalty(98.0 - 2.0 * f64::from(j))).sum();
    let last: f64 = (0..5).map(|j| penalty(98.0 - 2.0 * f64::from(j))).sum();

    base + wear + pits + first + 2.0 * middle + last
}

// H0: the batch can return a different number of results than requested
#[test]
fn h0_1_returns_exactly_num_simulations() {
    for n in [1, 2, 17, 1000] {
        let times = RaceSimulator::new(config(n), 42)
            .unwrap()
            .run_simulation()
            .unwrap();
        assert_eq!(times.len(), n);
    }
}

// H0: totals can be non-finite or negative under the default parameters
#[test]
fn h0_2_totals_finite_and_positive() {
    let times = RaceSimulator::new(config(2000), 7)
        .unwrap()
        .run_parallel(0)
        .unwrap();
    assert!(times.iter().all(|t| t.is_finite()));
    assert!(times.iter().all(|t| *t > 0.0));
}

// H0: a noise-free race does not match the closed form
#[test]
fn h0_3_deterministic_race_matches_closed_form() {
    let expected = reference_total();
    assert!((expected - 4589.1).abs() < 1e-9);

    let times = RaceSimulator::new(deterministic(25), 1)
        .unwrap()
        .run_simulation()
        .unwrap();
    for t in &times {
        assert!((t - expected).abs() < 1e-6, "got {t}, expected {expected}");
    }
}

// H0: the noise-free race pits somewhere other than laps 15, 30, 45
#[test]
fn h0_4_pit_laps_are_every_fifteenth() {
    let sim = RaceSimulator::new(deterministic(1), 1).unwrap();
    let trace = sim.trace_trial(0).unwrap();
    assert_eq!(trace.pit_laps(), vec![15, 30, 45]);

    // Lap 15 starts on 72% fuel, well above the low-fuel threshold
    assert!((trace.laps[14].fuel_at_start - 72.0).abs() < 1e-9);
    assert_eq!(trace.laps[14].pit_stop, Some(PitStopReason::Scheduled));
}

// H0: more tyre wear can lower the mean race time
#[test]
fn h0_5_degradation_is_monotone() {
    let mut previous: Option<Vec<f64>> = None;
    for degradation in [0.0, 0.02, 0.05, 0.1] {
        let config = SimulationConfig::builder()
            .num_simulations(300)
            .tyre_degradation(degradation)
            .build()
            .unwrap();
        let times = RaceSimulator::new(config, 11)
            .unwrap()
            .run_simulation()
            .unwrap();

        if let Some(prev) = &previous {
            // Same seed, same draws: every trial slows down, so the mean does too
            assert!(times.iter().zip(prev).all(|(t, p)| t > p));
            assert!(mean(&times) > mean(prev));
        }
        previous = Some(times);
    }
}

// H0: the mean drifts as the batch grows beyond sampling error
#[test]
fn h0_6_mean_converges_across_batch_sizes() {
    let reference = RaceSimulator::new(config(20_000), 1000)
        .unwrap()
        .run_parallel(0)
        .unwrap();
    let reference_stats = RaceStatistics::from_times(&reference).unwrap();

    for seed in [1, 2, 3] {
        let times = RaceSimulator::new(config(2000), seed)
            .unwrap()
            .run_simulation()
            .unwrap();
        let stats = RaceStatistics::from_times(&times).unwrap();
        let tolerance = 4.0 * (stats.std_error + reference_stats.std_error);
        assert!(
            (stats.mean_time - reference_stats.mean_time).abs() < tolerance,
            "seed {seed}: mean {} vs {} (tolerance {tolerance})",
            stats.mean_time,
            reference_stats.mean_time
        );
    }
}

// H0: the analytic expectation is outside the sampling error of the mean
#[test]
fn h0_7_mean_matches_expectation() {
    // Each lap adds 0.1 × 30 s of safety car on average; noise has mean zero
    let expected = reference_total() + 50.0 * 0.1 * 30.0;
    let times = RaceSimulator::new(config(20_000), 5)
        .unwrap()
        .run_parallel(4)
        .unwrap();
    let stats = RaceStatistics::from_times(&times).unwrap();
    assert!(
        (stats.mean_time - expected).abs() < 4.0 * stats.std_error,
        "mean {} vs expected {expected}",
        stats.mean_time
    );
}

// H0: a one-lap race is more than one lap
#[test]
fn h0_8_single_lap_race() {
    let config = SimulationConfig::builder()
        .race_distance(1)
        .num_simulations(100)
        .build()
        .unwrap();
    let sim = RaceSimulator::new(config, 3).unwrap();
    for trial in 0..100 {
        let trace = sim.trace_trial(trial).unwrap();
        assert_eq!(trace.laps.len(), 1);
        assert!(trace.pit_laps().is_empty());
        assert!((trace.total_time - trace.laps[0].lap_time).abs() < f64::EPSILON);
    }
}

// H0: thread count changes the results
#[test]
fn h0_9_thread_count_does_not_change_results() {
    let sim = RaceSimulator::new(config(500), 2024).unwrap();
    let baseline = sim.run_simulation().unwrap();
    for workers in [2, 3, 8] {
        assert_eq!(sim.run_parallel(workers).unwrap(), baseline);
    }
}

// H0: an invalid configuration can reach the simulation loop
#[test]
fn h0_10_invalid_configuration_fails_fast() {
    let with = |edit: fn(&mut SimulationConfig)| {
        let mut config = SimulationConfig::default();
        edit(&mut config);
        config
    };
    let cases = [
        ("race_distance", with(|c| c.race_distance = 0)),
        ("num_simulations", with(|c| c.num_simulations = 0)),
        ("lap_time_std_dev", with(|c| c.lap_time_std_dev = -1.0)),
        ("pit_stop_time", with(|c| c.pit_stop_time = -1.0)),
        ("tyre_degradation", with(|c| c.tyre_degradation = -0.1)),
        ("safety_car_duration", with(|c| c.safety_car_duration = -5.0)),
        ("safety_car_chance", with(|c| c.safety_car_chance = 2.0)),
        ("tyre_degradation", with(|c| c.tyre_degradation = 1e307)),
    ];

    for (field, config) in cases {
        let err = RaceSimulator::new(config, 0).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains(field), "{err} should name {field}");
    }
}

// H0: safety car laps are correlated from one lap to the next
#[test]
fn h0_11_safety_car_has_no_memory() {
    let config = SimulationConfig::builder()
        .race_distance(5000)
        .num_simulations(1)
        .safety_car_chance(0.3)
        .build()
        .unwrap();
    let trace = RaceSimulator::new(config, 8).unwrap().trace_trial(0).unwrap();

    let after_caution: Vec<bool> = trace
        .laps
        .windows(2)
        .filter(|w| w[0].safety_car)
        .map(|w| w[1].safety_car)
        .collect();
    let freq = after_caution.iter().filter(|b| **b).count() as f64 / after_caution.len() as f64;
    assert!((freq - 0.3).abs() < 0.05, "P(sc | sc previous lap) = {freq}");
}

fn valid_strategy() -> impl Strategy<Value = StrategyConfig> {
    (1u32..40, 0.0f64..100.0, 0.0f64..10.0, 1.0f64..200.0, 0.0f64..5.0).prop_map(
        |(pit_interval, low_fuel_threshold, fuel_per_lap, fuel_capacity, max_fuel_penalty)| {
            StrategyConfig {
                pit_interval,
                low_fuel_threshold,
                fuel_per_lap,
                fuel_capacity,
                max_fuel_penalty,
            }
        },
    )
}

fn valid_config() -> impl Strategy<Value = SimulationConfig> {
    (
        1u32..150,
        -50.0f64..300.0,
        0.0f64..30.0,
        0.0f64..60.0,
        0.0f64..2.0,
        1usize..8,
        0.0f64..=1.0,
        0.0f64..120.0,
        valid_strategy(),
    )
        .prop_map(
            |(race_distance, mean, std_dev, pit, degradation, n, chance, duration, strategy)| {
                SimulationConfig {
                    race_distance,
                    lap_time_mean: mean,
                    lap_time_std_dev: std_dev,
                    pit_stop_time: pit,
                    tyre_degradation: degradation,
                    num_simulations: n,
                    safety_car_chance: chance,
                    safety_car_duration: duration,
                    strategy,
                }
            },
        )
}

/// Magnitudes from 1e-3 up to 1e300.
fn magnitude() -> impl Strategy<Value = f64> {
    (-3.0f64..300.0).prop_map(|e| 10f64.powf(e))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // H0: some valid configuration yields the wrong count or a non-finite total
    #[test]
    fn prop_valid_config_yields_finite_batch(config in valid_config(), seed in any::<u64>()) {
        let n = config.num_simulations;
        let times = RaceSimulator::new(config, seed).unwrap().run_simulation().unwrap();
        prop_assert_eq!(times.len(), n);
        prop_assert!(times.iter().all(|t| t.is_finite()));
    }

    // H0: an accepted configuration can still stop the line mid-batch
    #[test]
    fn prop_accepted_config_never_fails_at_runtime(
        race_distance in 1u32..500,
        mean in magnitude(),
        std_dev in magnitude(),
        degradation in magnitude(),
        pit in magnitude(),
        duration in magnitude(),
        fuel_per_lap in magnitude(),
        max_fuel_penalty in magnitude(),
        seed in any::<u64>(),
    ) {
        let config = SimulationConfig {
            race_distance,
            lap_time_mean: mean,
            lap_time_std_dev: std_dev,
            pit_stop_time: pit,
            tyre_degradation: degradation,
            num_simulations: 2,
            safety_car_chance: 0.5,
            safety_car_duration: duration,
            strategy: StrategyConfig {
                fuel_per_lap,
                max_fuel_penalty,
                ..StrategyConfig::default()
            },
        };

        match RaceSimulator::new(config, seed) {
            Ok(sim) => {
                let times = sim.run_simulation().unwrap();
                prop_assert_eq!(times.len(), 2);
                prop_assert!(times.iter().all(|t| t.is_finite()));
            }
            Err(err) => prop_assert!(err.is_config_error()),
        }
    }
}
