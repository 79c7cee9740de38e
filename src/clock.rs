use chrono::{Datelike, Local, Weekday};

/// Source of the current weekday for business-hours rules
pub trait Clock: Send + Sync {
    fn weekday(&self) -> Weekday;

    fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// Server-local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn weekday(&self) -> Weekday {
        Local::now().weekday()
    }
}

/// Clock pinned to one weekday
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Weekday);

impl Clock for FixedClock {
    fn weekday(&self) -> Weekday {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_days() {
        let weekend: Vec<Weekday> = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|day| FixedClock(*day).is_weekend())
        .collect();

        assert_eq!(weekend, vec![Weekday::Sat, Weekday::Sun]);
    }
}
