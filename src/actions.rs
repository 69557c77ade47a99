/// Frame-clock driven actions.
///
/// `Scheduler` is a queue of wait-then-run timers, either repeating forever
/// or firing once.  `Tween` interpolates a single value over a duration and
/// backs both move-to and fade actions.  Nothing here reads a wall clock:
/// callers feed elapsed time in explicitly, one frame at a time.

use std::time::Duration;

/// Shortest period a repeating timer may have.  A zero period would fire
/// forever within a single frame.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Once,
}

#[derive(Clone, Debug)]
struct Timer<T> {
    task: T,
    period: Duration,
    /// Time left until the next firing.
    remaining: Duration,
    repeat: Repeat,
    seq: u64,
    done: bool,
}

/// A queue of pending timed tasks.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    timers: Vec<Timer<T>>,
    next_seq: u64,
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_seq: 0,
        }
    }

    /// Wait `period`, run `task`, repeat indefinitely.
    pub fn repeat_forever(&mut self, period: Duration, task: T) {
        let period = if period < MIN_PERIOD {
            log::warn!("timer period {:?} too short, clamping to {:?}", period, MIN_PERIOD);
            MIN_PERIOD
        } else {
            period
        };
        self.push(period, task, Repeat::Forever);
    }

    /// Wait `delay`, run `task` once.
    pub fn run_once_after(&mut self, delay: Duration, task: T) {
        self.push(delay, task, Repeat::Once);
    }

    fn push(&mut self, period: Duration, task: T, repeat: Repeat) {
        self.timers.push(Timer {
            task,
            period,
            remaining: period,
            repeat,
            seq: self.next_seq,
            done: false,
        });
        self.next_seq += 1;
    }

    /// Advance every timer by `dt` and return the tasks that came due, in
    /// due-time order (ties broken by scheduling order).  A repeating timer
    /// whose period fits several times into `dt` fires once per period.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.advance_timed(dt)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }

    /// Like `advance`, but each task comes with how far into `dt` it was due.
    pub fn advance_timed(&mut self, dt: Duration) -> Vec<(Duration, T)> {
        let mut fired: Vec<(Duration, u64, T)> = Vec::new();

        for timer in &mut self.timers {
            let mut offset = Duration::ZERO;
            let mut budget = dt;
            while budget >= timer.remaining {
                offset += timer.remaining;
                budget -= timer.remaining;
                fired.push((offset, timer.seq, timer.task.clone()));
                match timer.repeat {
                    Repeat::Forever => timer.remaining = timer.period,
                    Repeat::Once => {
                        timer.done = true;
                        break;
                    }
                }
            }
            if !timer.done {
                timer.remaining -= budget;
            }
        }

        self.timers.retain(|t| !t.done);
        fired.sort_by_key(|(at, seq, _)| (*at, *seq));
        fired.into_iter().map(|(at, _, task)| (at, task)).collect()
    }

    /// Drop every pending timer.
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

// ── Tween ─────────────────────────────────────────────────────────────────────

/// Linear interpolation of one value from `from` to `to` over `duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    pub elapsed: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by `dt` and return the new value.  Never overshoots `to`.
    pub fn step(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t as f32
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
