//! Calendar domain logic for the expense tracker.
//!
//! This module contains all business logic related to calendar operations,
//! date calculations, and transaction organization by date: month grid
//! metadata, per-day transaction grouping, and daily spent/received totals.
//! Callers fetch the month's transactions first and hand them in; generation
//! itself is pure.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use shared::{CalendarDay, CalendarDayType, CalendarMonth, Transaction, TransactionType};

/// Calendar service that handles all calendar-related business logic
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Generate a calendar month view from the month's transactions.
    ///
    /// The day list starts with padding cells so the first of the month
    /// lands on its weekday column, followed by one cell per day carrying
    /// that day's transactions and totals.
    pub fn generate_calendar_month(
        &self,
        month: u32,
        year: i32,
        transactions: Vec<Transaction>,
    ) -> CalendarMonth {
        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);

        let mut transactions_by_day = self.group_transactions_by_day(month, year, transactions);

        let mut calendar_days = Vec::new();

        for _ in 0..first_day {
            calendar_days.push(CalendarDay {
                day: 0,
                day_type: CalendarDayType::PaddingBefore,
                transactions: Vec::new(),
                spent: 0.0,
                received: 0.0,
            });
        }

        for day in 1..=days_in_month {
            let day_transactions = transactions_by_day.remove(&day).unwrap_or_default();
            let spent = day_transactions
                .iter()
                .filter(|t| t.transaction_type == TransactionType::Expense)
                .map(|t| t.amount)
                .sum();
            let received = day_transactions
                .iter()
                .filter(|t| t.transaction_type == TransactionType::Income)
                .map(|t| t.amount)
                .sum();

            calendar_days.push(CalendarDay {
                day,
                day_type: CalendarDayType::MonthDay,
                transactions: day_transactions,
                spent,
                received,
            });
        }

        CalendarMonth {
            month,
            year,
            days: calendar_days,
            first_day_of_week: first_day,
        }
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
            date.weekday().num_days_from_sunday()
        } else {
            // Invalid date, fallback to 0 (Sunday)
            0
        }
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Inclusive first and last date of a month, used as the fetch range
    pub fn month_bounds(&self, month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = NaiveDate::from_ymd_opt(year, month, self.days_in_month(month, year))?;
        Some((first, last))
    }

    /// Group transactions by day-of-month, dropping any outside the month
    fn group_transactions_by_day(
        &self,
        month: u32,
        year: i32,
        transactions: Vec<Transaction>,
    ) -> HashMap<u32, Vec<Transaction>> {
        let mut transactions_by_day: HashMap<u32, Vec<Transaction>> = HashMap::new();

        for transaction in transactions {
            if transaction.date.month() == month && transaction.date.year() == year {
                transactions_by_day
                    .entry(transaction.date.day())
                    .or_default()
                    .push(transaction);
            }
        }

        transactions_by_day
    }

    /// Navigate to the previous month
    pub fn previous_month(&self, current_month: u32, current_year: i32) -> (u32, i32) {
        if current_month == 1 {
            (12, current_year - 1)
        } else {
            (current_month - 1, current_year)
        }
    }

    /// Navigate to the next month
    pub fn next_month(&self, current_month: u32, current_year: i32) -> (u32, i32) {
        if current_month == 12 {
            (1, current_year + 1)
        } else {
            (current_month + 1, current_year)
        }
    }
}
