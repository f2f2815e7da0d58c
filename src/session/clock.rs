use std::{
  sync::{Arc, atomic::{AtomicBool, Ordering}},
  time::Duration
};

/// Paces a session and tells it when to stop.
///
/// [`should_stop`](FrameClock::should_stop) is consulted once before every iteration, never in the
/// middle of one.
pub trait FrameClock {
  /// Wait between two frames.
  fn pause(&mut self);
  fn should_stop(&mut self) -> bool;

  /// Additionally stop as soon as `predicate` returns `true`.
  fn cancel_with<F>(self, predicate: F) -> CancelWith<Self, F>
    where Self: Sized, F: FnMut() -> bool {
    CancelWith { clock: self, predicate }
  }
}

/// No pause, never stops on its own.
#[derive(Debug, Copy, Clone, Default)]
pub struct Immediate;

impl FrameClock for Immediate {
  fn pause(&mut self) {}
  fn should_stop(&mut self) -> bool { false }
}

/// Sleeps the calling thread between frames. Can be stopped from another thread through a
/// [`StopHandle`].
#[derive(Debug, Clone)]
pub struct SleepClock {
  delay: Duration,
  stop: Arc<AtomicBool>
}

#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
  pub fn stop(&self) {
    self.0.store(true, Ordering::Relaxed)
  }
}

impl SleepClock {
  pub fn new(delay: Duration) -> Self {
    Self { delay, stop: Arc::new(AtomicBool::new(false)) }
  }

  pub fn stop_handle(&self) -> StopHandle {
    StopHandle(self.stop.clone())
  }
}

impl FrameClock for SleepClock {
  fn pause(&mut self) {
    if !self.delay.is_zero() {
      std::thread::sleep(self.delay);
    }
  }

  fn should_stop(&mut self) -> bool {
    self.stop.load(Ordering::Relaxed)
  }
}

#[derive(Debug, Clone)]
pub struct CancelWith<C, F> {
  pub clock: C,
  pub predicate: F
}

impl <C, F> FrameClock for CancelWith<C, F>
  where C: FrameClock,
        F: FnMut() -> bool {
  fn pause(&mut self) {
    self.clock.pause()
  }

  fn should_stop(&mut self) -> bool {
    self.clock.should_stop() || (self.predicate)()
  }
}
