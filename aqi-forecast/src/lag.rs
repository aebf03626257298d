//! Lag and rolling-average state carried between forecast days.

use crate::config::{ForecastConfig, RollingWindow};
use aqi_core::{AqiError, PmLags, Readings, Result};
use log::warn;

/// Number of daily PM2.5 values a full-history window holds.
pub const HISTORY_DAYS: usize = 7;

/// State that yields the five PM2.5 lag features and absorbs a newly
/// predicted day.
pub trait LagTracker {
    fn lags(&self) -> PmLags;

    /// Shift in the PM2.5 value synthesized for the day just forecast.
    fn push(&mut self, pm: f64);
}

/// Three-slot shift register of the most recent PM2.5 values.
///
/// Slots are `[lag1, lag3, lag7]` as entered by the user; after each push
/// they hold the last three synthesized values, most recent first. Both
/// rolling means are recomputed as the mean of the three slots, so the
/// "7-day" mean is an approximation.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct LagState {
    slots: [f64; 3],
    roll3: f64,
    roll7: f64,
}

impl LagState {
    pub fn new(initial: PmLags) -> Self {
        LagState {
            slots: [initial.lag1, initial.lag3, initial.lag7],
            roll3: initial.roll3,
            roll7: initial.roll7,
        }
    }

    pub fn slots(&self) -> [f64; 3] {
        self.slots
    }
}

impl LagTracker for LagState {
    fn lags(&self) -> PmLags {
        PmLags {
            lag1: self.slots[0],
            lag3: self.slots[1],
            lag7: self.slots[2],
            roll3: self.roll3,
            roll7: self.roll7,
        }
    }

    fn push(&mut self, pm: f64) {
        self.slots = [pm, self.slots[0], self.slots[1]];
        let mean = self.slots.iter().sum::<f64>() / self.slots.len() as f64;
        self.roll3 = mean;
        self.roll7 = mean;
    }
}

/// True 7-day window of daily PM2.5 values, most recent first.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DailyHistory {
    days: [f64; HISTORY_DAYS],
}

impl DailyHistory {
    /// Takes exactly [`HISTORY_DAYS`] values, most recent first.
    pub fn new(values: &[f64]) -> Result<Self> {
        if values.len() != HISTORY_DAYS {
            return Err(AqiError::MissingHistory {
                needed: HISTORY_DAYS,
                found: values.len(),
            });
        }
        let mut days = [0.0; HISTORY_DAYS];
        for (dst, &v) in days.iter_mut().zip(values) {
            if !v.is_finite() || v < 0.0 {
                return Err(AqiError::InvalidReading {
                    field: "pm2_5_history",
                    value: v,
                });
            }
            *dst = v;
        }
        Ok(DailyHistory { days })
    }

    pub fn days(&self) -> &[f64; HISTORY_DAYS] {
        &self.days
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl LagTracker for DailyHistory {
    fn lags(&self) -> PmLags {
        PmLags {
            lag1: self.days[0],
            lag3: self.days[2],
            lag7: self.days[6],
            roll3: DailyHistory::mean(&self.days[..3]),
            roll7: DailyHistory::mean(&self.days),
        }
    }

    fn push(&mut self, pm: f64) {
        self.days.rotate_right(1);
        self.days[0] = pm;
    }
}

/// Lag state selected by [`ForecastConfig::rolling_window`].
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LagWindow {
    ShiftRegister(LagState),
    FullHistory(DailyHistory),
}

impl LagWindow {
    /// Build the initial window for one run.
    ///
    /// In full-history mode the daily history replaces the entered lag and
    /// rolling values; in shift-register mode any history is ignored.
    pub fn from_config(readings: &Readings, history: Option<&[f64]>, config: &ForecastConfig) -> Result<Self> {
        match config.rolling_window {
            RollingWindow::ShiftRegister => {
                if history.is_some() {
                    warn!(
                        "[AQI Debug] lag: shift register mode ignores the supplied daily history; \
                         set rolling_window to full_history to use it"
                    );
                }
                Ok(LagWindow::ShiftRegister(LagState::new(readings.lags)))
            }
            RollingWindow::FullHistory => {
                let values = history.ok_or(AqiError::MissingHistory {
                    needed: HISTORY_DAYS,
                    found: 0,
                })?;
                Ok(LagWindow::FullHistory(DailyHistory::new(values)?))
            }
        }
    }
}

impl LagTracker for LagWindow {
    fn lags(&self) -> PmLags {
        match self {
            LagWindow::ShiftRegister(state) => state.lags(),
            LagWindow::FullHistory(history) => history.lags(),
        }
    }

    fn push(&mut self, pm: f64) {
        match self {
            LagWindow::ShiftRegister(state) => state.push(pm),
            LagWindow::FullHistory(history) => history.push(pm),
        }
    }
}
