use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::debug;
use log::warn;

/// Collects the running times of the named stages of a computation, for
/// example the individual stages of compiling a regular expression.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, f32)>>>,
}

/// Measures the time between its creation and the call to `finish()`.
///
/// Must be finished explicitly, a timer that is dropped before being finished
/// is reported as a warning since it would otherwise be measured as zero.
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, f32)>>>,
    registered: bool,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer for the stage with the given name.
    pub fn start(&mut self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
            registered: false,
        }
    }

    /// Returns the names and times (in seconds) of all finished timers, in the order they finished.
    pub fn results(&self) -> Vec<(String, f32)> {
        self.results.borrow().clone()
    }

    /// Prints all the finished timers to stderr.
    pub fn print(&self) {
        for (name, time) in self.results.borrow().iter() {
            eprintln!("Time {name}: {time:.3}s");
        }
    }
}

impl Timer {
    /// Finishes the timer and registers the result.
    pub fn finish(&mut self) {
        let time = self.start.elapsed().as_secs_f64();
        debug!("Time {}: {:.3}s", self.name, time);

        self.results.borrow_mut().push((self.name.clone(), time as f32));
        self.registered = true;
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.registered {
            warn!("Timer {} was dropped before 'finish()'", self.name);
        }
    }
}
