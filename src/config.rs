use core::time::Duration;

/// Compile-time tunables for the clock and its producers.
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    /// Widget size in cells, border included
    pub width: u16,
    pub height: u16,

    /// Motion delay at startup and its bounds
    pub initial_delay: Duration,
    pub min_delay: Duration,
    pub max_delay: Duration,

    /// How often the displayed time is refreshed
    pub tick_interval: Duration,

    /// Channel capacities
    pub redraw_capacity: usize,
    pub input_capacity: usize,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            width: 10,
            height: 3,

            initial_delay: Duration::from_millis(800),
            min_delay: Duration::from_millis(10),
            max_delay: Duration::from_secs(10),

            tick_interval: Duration::from_secs(1),

            redraw_capacity: 4,
            input_capacity: 16,
        }
    }
}
