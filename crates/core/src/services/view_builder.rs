use crate::models::chart::ChartPoint;
use crate::models::price::{PriceRow, Stats};
use crate::models::settings::{NumberLocale, Settings};
use crate::models::view::{PriceTableRow, StatCard};

/// Shown wherever a number is missing or not finite.
pub const PLACEHOLDER: &str = "-";

/// Map price rows to chart points, rounding each close to 2 decimals.
/// Missing closes stay `None`. Never fails; empty in, empty out.
#[must_use]
pub fn to_chart_points(rows: &[PriceRow]) -> Vec<ChartPoint> {
    rows.iter()
        .map(|row| ChartPoint {
            date: row.date.clone(),
            close_rounded: row.close.map(round_2dp),
        })
        .collect()
}

/// Format a number with `locale` grouping and at most 2 fraction digits
/// (trailing zeros dropped). Missing or non-finite input gives `"-"`.
#[must_use]
pub fn format_number(value: Option<f64>, locale: NumberLocale) -> String {
    match value {
        Some(n) if n.is_finite() => format_finite(n, locale),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Round to 2 decimals, exact ties away from zero.
fn round_2dp(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let magnitude: f64 = fixed_2dp(x.abs()).parse().unwrap_or(x.abs());
    if x.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// `magnitude` (non-negative, finite) as a fixed 2-decimal string.
///
/// `{:.2}` rounds the exact binary value, but settles exact ties to even.
/// A tie at the third decimal is only representable as an odd multiple of
/// 1/8 (`.125`, `.375`, `.625`, `.875`); those round up here.
fn fixed_2dp(magnitude: f64) -> String {
    let eighths = magnitude * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 == 1.0;
    if !is_tie {
        return format!("{magnitude:.2}");
    }

    // Exact at 3 places, so the last digit is the 5 and the one before is 2 or 7
    let mut fixed = format!("{magnitude:.3}");
    fixed.pop();
    match fixed.pop().and_then(|c| c.to_digit(10)) {
        Some(d) if d < 9 => fixed.push(char::from(b'0' + d as u8 + 1)),
        _ => return format!("{magnitude:.2}"),
    }
    fixed
}

fn format_finite(n: f64, locale: NumberLocale) -> String {
    let fixed = fixed_2dp(n.abs());
    let (int_digits, frac_digits) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_digits = frac_digits.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 2 + 1);
    // "-0" is not a thing once rounded
    if n.is_sign_negative() && (int_digits != "0" || !frac_digits.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_digits, locale));
    if !frac_digits.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(frac_digits);
    }
    out
}

/// Insert group separators into a run of ASCII digits.
fn group_digits(digits: &str, locale: NumberLocale) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let size = if locale.uses_indian_grouping() { 2 } else { 3 };

    let mut groups = Vec::with_capacity(head.len() / size + 2);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);

    let separator = locale.group_separator().to_string();
    groups.join(separator.as_str())
}

/// Turns a Selection's raw data into display-ready values for the
/// configured locale and currency. Nothing here mutates its input; every
/// call recomputes from scratch.
#[derive(Debug, Clone)]
pub struct DerivedViewBuilder {
    locale: NumberLocale,
    currency_symbol: String,
}

impl DerivedViewBuilder {
    pub fn new(locale: NumberLocale, currency_symbol: impl Into<String>) -> Self {
        Self {
            locale,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.locale, settings.currency_symbol.clone())
    }

    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    pub fn chart_points(&self, rows: &[PriceRow]) -> Vec<ChartPoint> {
        to_chart_points(rows)
    }

    pub fn format(&self, value: Option<f64>) -> String {
        format_number(value, self.locale)
    }

    /// Chart tooltip heading for a point.
    pub fn tooltip_label(&self, date: &str) -> String {
        format!("Date: {date}")
    }

    /// Rows for the price table, dates untouched, OHLC formatted.
    pub fn price_table(&self, rows: &[PriceRow]) -> Vec<PriceTableRow> {
        rows.iter()
            .map(|row| PriceTableRow {
                date: row.date.clone(),
                open: self.format(row.open),
                high: self.format(row.high),
                low: self.format(row.low),
                close: self.format(row.close),
            })
            .collect()
    }

    /// The four 52-week stat tiles. Price-valued tiles carry the currency
    /// symbol; average volume does not.
    pub fn stat_cards(&self, stats: &Stats) -> Vec<StatCard> {
        vec![
            self.card("Latest Close", self.price(stats.latest_close)),
            self.card("52-Week High", self.price(stats.high_52_week)),
            self.card("52-Week Low", self.price(stats.low_52_week)),
            self.card("Average Volume", self.format(stats.avg_volume)),
        ]
    }

    fn price(&self, value: Option<f64>) -> String {
        format!("{} {}", self.currency_symbol, self.format(value))
    }

    fn card(&self, label: &str, value: String) -> StatCard {
        StatCard {
            label: label.to_string(),
            value,
        }
    }
}

impl Default for DerivedViewBuilder {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
