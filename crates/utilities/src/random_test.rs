use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::test_logger;

/// Runs the given test function `iterations` times with a seeded random number
/// generator. The seed is printed so that a failing run can be reproduced by
/// setting the `REFA_SEED` environment variable.
pub fn random_test<F>(iterations: usize, test_function: F)
where
    F: FnMut(&mut StdRng),
{
    if let Ok(seed_str) = std::env::var("REFA_SEED") {
        let seed = seed_str.parse::<u64>().expect("REFA_SEED must be a valid u64");
        println!("seed: {seed} (fixed by REFA_SEED)");
        random_test_seeded(seed, iterations, test_function);
        return;
    }

    let seed: u64 = rand::random();
    println!("random seed: {seed} (use REFA_SEED=<seed> to set fixed seed)");
    random_test_seeded(seed, iterations, test_function);
}

/// Same as [random_test], but with a fixed seed.
pub fn random_test_seeded<F>(seed: u64, iterations: usize, mut test_function: F)
where
    F: FnMut(&mut StdRng),
{
    test_logger();

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..iterations {
        test_function(&mut rng);
    }
}
