//! Wall-clock date and time in one of 32 layouts.
//!
//! A layout is a date-field order, a month style and a sub-second
//! precision. Numeric months join the date with `-` (`2024-03-07`), named
//! months with spaces (`2024 March 07`); the time is always `HH:MM:SS`
//! followed by the requested fraction.

use chrono::{Local, NaiveDateTime};
use rowcast_core::Component;
use serde::{Deserialize, Serialize};

use crate::style::Styling;
use crate::timestamp::Precision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    #[default]
    Ymd,
    Ydm,
    Dmy,
    Mdy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthStyle {
    #[default]
    Number,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatetimeLayout {
    pub order: DateOrder,
    pub month: MonthStyle,
    pub precision: Precision,
}

impl DatetimeLayout {
    pub const fn new(order: DateOrder, month: MonthStyle, precision: Precision) -> Self {
        Self {
            order,
            month,
            precision,
        }
    }

    /// Every supported layout.
    pub fn all() -> impl Iterator<Item = DatetimeLayout> {
        const ORDERS: [DateOrder; 4] = [DateOrder::Ymd, DateOrder::Ydm, DateOrder::Dmy, DateOrder::Mdy];
        const MONTHS: [MonthStyle; 2] = [MonthStyle::Number, MonthStyle::Name];
        const PRECISIONS: [Precision; 4] = [
            Precision::Second,
            Precision::Milli,
            Precision::Micro,
            Precision::Nano,
        ];
        MONTHS.into_iter().flat_map(|month| {
            ORDERS.into_iter().flat_map(move |order| {
                PRECISIONS
                    .into_iter()
                    .map(move |precision| DatetimeLayout::new(order, month, precision))
            })
        })
    }

    /// The `chrono` format string for this layout.
    pub fn pattern(&self) -> String {
        let date = match (self.month, self.order) {
            (MonthStyle::Number, DateOrder::Ymd) => "%Y-%m-%d",
            (MonthStyle::Number, DateOrder::Ydm) => "%Y-%d-%m",
            (MonthStyle::Number, DateOrder::Dmy) => "%d-%m-%Y",
            (MonthStyle::Number, DateOrder::Mdy) => "%m-%d-%Y",
            (MonthStyle::Name, DateOrder::Ymd) => "%Y %B %d",
            (MonthStyle::Name, DateOrder::Ydm) => "%Y %d %B",
            (MonthStyle::Name, DateOrder::Dmy) => "%d %B %Y",
            (MonthStyle::Name, DateOrder::Mdy) => "%B %d %Y",
        };
        let fraction = match self.precision {
            Precision::Second => "",
            Precision::Milli => "%.3f",
            Precision::Micro => "%.6f",
            Precision::Nano => "%.9f",
        };
        format!("{date} %H:%M:%S{fraction}")
    }
}

/// The current local date and time.
pub struct Datetime {
    pattern: String,
    style: Styling,
}

impl Datetime {
    pub fn new(layout: DatetimeLayout, style: Styling) -> Self {
        Self {
            pattern: layout.pattern(),
            style,
        }
    }

    /// Unstyled text for a given moment.
    pub fn format_at(&self, at: &NaiveDateTime) -> String {
        at.format(&self.pattern).to_string()
    }
}

impl Component for Datetime {
    fn render(&self) -> Option<String> {
        Some(self.style.apply(&self.format_at(&Local::now().naive_local())))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;

    use super::*;

    fn moment() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_nano_opt(9, 5, 1, 123_456_789)
            .unwrap()
    }

    fn render(order: DateOrder, month: MonthStyle, precision: Precision) -> String {
        Datetime::new(DatetimeLayout::new(order, month, precision), Styling::new())
            .format_at(&moment())
    }

    #[test]
    fn numeric_orders() {
        let p = Precision::Second;
        assert_eq!(render(DateOrder::Ymd, MonthStyle::Number, p), "2024-03-07 09:05:01");
        assert_eq!(render(DateOrder::Ydm, MonthStyle::Number, p), "2024-07-03 09:05:01");
        assert_eq!(render(DateOrder::Dmy, MonthStyle::Number, p), "07-03-2024 09:05:01");
        assert_eq!(render(DateOrder::Mdy, MonthStyle::Number, p), "03-07-2024 09:05:01");
    }

    #[test]
    fn named_months() {
        let p = Precision::Second;
        assert_eq!(render(DateOrder::Ymd, MonthStyle::Name, p), "2024 March 07 09:05:01");
        assert_eq!(render(DateOrder::Ydm, MonthStyle::Name, p), "2024 07 March 09:05:01");
        assert_eq!(render(DateOrder::Dmy, MonthStyle::Name, p), "07 March 2024 09:05:01");
        assert_eq!(render(DateOrder::Mdy, MonthStyle::Name, p), "March 07 2024 09:05:01");
    }

    #[test]
    fn sub_second_precisions() {
        let (o, m) = (DateOrder::Ymd, MonthStyle::Number);
        assert_eq!(render(o, m, Precision::Milli), "2024-03-07 09:05:01.123");
        assert_eq!(render(o, m, Precision::Micro), "2024-03-07 09:05:01.123456");
        assert_eq!(render(o, m, Precision::Nano), "2024-03-07 09:05:01.123456789");
    }

    #[test]
    fn there_are_32_distinct_layouts() {
        let patterns: HashSet<String> = DatetimeLayout::all().map(|l| l.pattern()).collect();
        assert_eq!(patterns.len(), 32);
    }

    #[test]
    fn layout_deserializes_from_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            datetime: DatetimeLayout,
        }
        let parsed: Wrapper = toml::from_str(
            "[datetime]\norder = \"dmy\"\nmonth = \"name\"\nprecision = \"milli\"\n",
        )
        .unwrap();
        assert_eq!(
            parsed.datetime,
            DatetimeLayout::new(DateOrder::Dmy, MonthStyle::Name, Precision::Milli)
        );
    }
}
