// Round countdown. The browser interval only delivers ticks; all timing state lives here.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Not running; the tick was ignored.
    Idle,
    /// Still counting down; carries the remaining budget in percent.
    Running(f64),
    /// Deactivated from outside: forced to 0 % without reporting expiry.
    Cancelled,
    /// The full duration elapsed. Reported once per `start()`.
    Expired,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    pub total_ms: u32,
    /// Whole milliseconds, as `setInterval` runs it.
    pub interval_ms: u32,
    /// Ticks until `elapsed_ms` reaches `total_ms`.
    pub total_ticks: u32,
    pub ticks: u32,
    /// Percent of the bar left, 0..=100.
    pub remaining: f64,
    pub decrement: f64,
    pub elapsed_ms: u32,
    pub active: bool,
    pub status: TimerStatus,
    /// Incremented by every `start()`; ticks from older generations are stale.
    pub generation: u64,
}

impl Countdown {
    pub fn new(total_ms: u32) -> Self {
        let interval_ms = ((f64::from(total_ms) / 1000.0).round() as u32).max(1);
        let total_ticks = total_ms.div_ceil(interval_ms).max(1);
        Self {
            total_ms,
            interval_ms,
            total_ticks,
            ticks: 0,
            remaining: 100.0,
            decrement: 100.0 / f64::from(total_ticks),
            elapsed_ms: 0,
            active: false,
            status: TimerStatus::Idle,
            generation: 0,
        }
    }

    pub fn start(&mut self) -> u64 {
        self.remaining = 100.0;
        self.ticks = 0;
        self.elapsed_ms = 0;
        self.active = true;
        self.status = TimerStatus::Running;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Deactivates the countdown. The next tick winds it down without reporting expiry.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.status != TimerStatus::Running {
            return TickOutcome::Idle;
        }
        if !self.active {
            self.remaining = 0.0;
            self.status = TimerStatus::Expired;
            return TickOutcome::Cancelled;
        }
        self.ticks += 1;
        self.elapsed_ms = self.ticks.saturating_mul(self.interval_ms);
        self.remaining = (100.0 - self.decrement * f64::from(self.ticks)).max(0.0);
        if self.elapsed_ms >= self.total_ms {
            self.remaining = 0.0;
            self.active = false;
            self.status = TimerStatus::Expired;
            return TickOutcome::Expired;
        }
        TickOutcome::Running(self.remaining)
    }

    /// Interval for `setInterval`, at least 1 ms.
    pub fn interval_millis(&self) -> i32 {
        i32::try_from(self.interval_ms).unwrap_or(i32::MAX)
    }
}
