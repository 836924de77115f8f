//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  `WorldClock` maps it
//! onto in-game days:
//!
//!   day         = tick / ticks_per_day
//!   time_of_day = tick % ticks_per_day
//!
//! The first `daylight_ticks` of every day are daytime.  Quotas and other
//! per-day bookkeeping key off `WorldClock::day()`.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── WorldClock ────────────────────────────────────────────────────────────────

/// The world/time service: current tick, current day, and day/night state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldClock {
    /// Length of one in-game day in ticks.  Never zero.
    pub ticks_per_day: u64,
    /// How many ticks at the start of each day count as daylight.
    pub daylight_ticks: u64,
    /// The current tick, advanced by `WorldClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl WorldClock {
    pub fn new(ticks_per_day: u64, daylight_ticks: u64) -> Self {
        let ticks_per_day = ticks_per_day.max(1);
        Self {
            ticks_per_day,
            daylight_ticks: daylight_ticks.min(ticks_per_day),
            current_tick: Tick::ZERO,
        }
    }

    /// Clock positioned at `tick`.
    pub fn at(ticks_per_day: u64, daylight_ticks: u64, tick: Tick) -> Self {
        let mut clock = Self::new(ticks_per_day, daylight_ticks);
        clock.current_tick = tick;
        clock
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.current_tick
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// Zero-based in-game day counter.
    #[inline]
    pub fn day(&self) -> u64 {
        self.current_tick.0 / self.ticks_per_day
    }

    /// Ticks elapsed since the start of the current day.
    #[inline]
    pub fn time_of_day(&self) -> u64 {
        self.current_tick.0 % self.ticks_per_day
    }

    #[inline]
    pub fn is_day(&self) -> bool {
        self.time_of_day() < self.daylight_ticks
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        !self.is_day()
    }
}

impl fmt::Display for WorldClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = if self.is_day() { "day" } else { "night" };
        write!(f, "{} (day {} +{}, {phase})", self.current_tick, self.day(), self.time_of_day())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Usually loaded from TOML by `cl-sim` and passed to the simulation runner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Length of an in-game day.  Default: 24 000 ticks.
    pub ticks_per_day: u64,

    /// Daylight portion of each day.  Default: 12 000 ticks.
    pub daylight_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Invoke `SimObserver::on_report` every N ticks.  0 disables reports.
    pub report_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:           24_000,
            ticks_per_day:         24_000,
            daylight_ticks:        12_000,
            seed:                  0,
            report_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `WorldClock` pre-configured for this run.
    pub fn make_clock(&self) -> WorldClock {
        WorldClock::new(self.ticks_per_day, self.daylight_ticks)
    }
}
