/// Initialises the logger for tests, output is captured by the test harness.
///
/// Can safely be called from every test since tests run in parallel and only
/// the first initialisation takes effect.
pub fn test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
