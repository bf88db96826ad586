//! Tariff tier selection.
//!
//! The regulated schedule assigns one of three tiers to every minute of the
//! week. Each weekday has a list of windows; a minute outside every window
//! is charged at the night tier.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::models::TariffTier;

/// An inclusive range of minutes since midnight mapped to a tier.
#[derive(Debug, Clone, Copy)]
struct TierWindow {
    first_minute: u32,
    last_minute: u32,
    tier: TariffTier,
}

const fn window(first_minute: u32, last_minute: u32, tier: TariffTier) -> TierWindow {
    TierWindow {
        first_minute,
        last_minute,
        tier,
    }
}

/// Sunday through Wednesday: 06:00-21:00 standard.
const REGULAR_DAY: &[TierWindow] = &[window(360, 1260, TariffTier::Standard)];

/// Thursday: 06:00-21:00 standard, 21:01-23:00 weekend.
const THURSDAY: &[TierWindow] = &[
    window(360, 1260, TariffTier::Standard),
    window(1261, 1380, TariffTier::Weekend),
];

/// Friday and holiday eves: 06:00-16:00 standard, 16:01-21:00 weekend.
const FRIDAY: &[TierWindow] = &[
    window(360, 960, TariffTier::Standard),
    window(961, 1260, TariffTier::Weekend),
];

/// Saturday and holidays: 06:00-19:00 weekend.
const SATURDAY: &[TierWindow] = &[window(360, 1140, TariffTier::Weekend)];

fn schedule_for(weekday: Weekday) -> &'static [TierWindow] {
    match weekday {
        Weekday::Sun | Weekday::Mon | Weekday::Tue | Weekday::Wed => REGULAR_DAY,
        Weekday::Thu => THURSDAY,
        Weekday::Fri => FRIDAY,
        Weekday::Sat => SATURDAY,
    }
}

/// Minutes outside every window of a schedule are night minutes.
fn tier_in(schedule: &[TierWindow], now: NaiveDateTime) -> TariffTier {
    let minute = now.hour() * 60 + now.minute();
    schedule
        .iter()
        .find(|w| minute >= w.first_minute && minute <= w.last_minute)
        .map(|w| w.tier)
        .unwrap_or(TariffTier::Night)
}

/// Selects the tariff tier in force at a local wall-clock instant.
///
/// The instant is an explicit input so the function stays pure; a fare that
/// spans a tier boundary is priced with the tier at calculation time.
/// Seconds are ignored, so 21:00:59 is still minute 1260.
///
/// # Example
///
/// ```
/// use taxi_engine::calculation::select_tariff_tier;
/// use taxi_engine::models::TariffTier;
/// use chrono::NaiveDateTime;
///
/// // 2026-01-15 is a Thursday
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// assert_eq!(select_tariff_tier(at("2026-01-15 21:00")), TariffTier::Standard);
/// assert_eq!(select_tariff_tier(at("2026-01-15 21:01")), TariffTier::Weekend);
/// assert_eq!(select_tariff_tier(at("2026-01-15 23:01")), TariffTier::Night);
/// ```
pub fn select_tariff_tier(now: NaiveDateTime) -> TariffTier {
    tier_in(schedule_for(now.weekday()), now)
}

/// Selects the tariff tier, treating listed dates as public holidays.
///
/// A holiday follows the Saturday schedule. The day before a holiday follows
/// the Friday schedule unless it is itself a holiday or a Saturday.
///
/// # Example
///
/// ```
/// use taxi_engine::calculation::select_tariff_tier_with_holidays;
/// use taxi_engine::models::TariffTier;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// // Tuesday 2026-09-22 is the eve of a Wednesday holiday
/// let holidays = [NaiveDate::from_ymd_opt(2026, 9, 23).unwrap()];
/// let eve = NaiveDateTime::parse_from_str("2026-09-22 17:00", "%Y-%m-%d %H:%M").unwrap();
/// assert_eq!(select_tariff_tier_with_holidays(eve, &holidays), TariffTier::Weekend);
/// ```
pub fn select_tariff_tier_with_holidays(now: NaiveDateTime, holidays: &[NaiveDate]) -> TariffTier {
    let today = now.date();
    let schedule = if holidays.contains(&today) {
        SATURDAY
    } else if holidays.contains(&(today + Duration::days(1))) && today.weekday() != Weekday::Sat {
        FRIDAY
    } else {
        schedule_for(today.weekday())
    };
    tier_in(schedule, now)
}
