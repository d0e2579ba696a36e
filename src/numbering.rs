//! Financial-year document numbering and output filenames.
//!
//! Document numbers are never stored as a running counter: the next number is
//! derived fresh by scanning the issued numbers that match the prefix and
//! year window. This survives out-of-order deletes, but two callers asking
//! for "next number" against the same document set at the same time can
//! derive the same value — serializing issuance is the caller's job.

use chrono::{Datelike, NaiveDate};

/// Indian trade financial year: April 1 through March 31.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    /// The window containing `date`. January–March belong to the window that
    /// started the previous April.
    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };
        FinancialYear { start_year }
    }

    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, 4, 1).expect("valid April 1")
    }

    pub fn end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year + 1, 3, 31).expect("valid March 31")
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// Two-digit straddling label, e.g. "24-25".
    pub fn label(&self) -> String {
        format!(
            "{:02}-{:02}",
            self.start_year % 100,
            (self.start_year + 1) % 100
        )
    }
}

/// Trailing numeric suffix of an issued number ("EXP/24-25/17" → 17).
fn trailing_suffix(number: &str) -> Option<u32> {
    let digits: String = number
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Next sequence number for `prefix` within `fy`, derived from the full set
/// of existing non-deleted numbers. Returns 1 when nothing matches.
pub fn next_number(prefix: &str, fy: &FinancialYear, existing: &[String]) -> u32 {
    let label = fy.label();
    existing
        .iter()
        .filter(|n| n.starts_with(prefix) && n.contains(&label))
        .filter_map(|n| trailing_suffix(n))
        .max()
        .map_or(1, |max| max + 1)
}

/// Invoice numbers carry the bare sequence: "EXP/24-25/7".
pub fn format_invoice_number(prefix: &str, fy: &FinancialYear, seq: u32) -> String {
    format!("{}/{}/{}", prefix, fy.label(), seq)
}

/// Purchase-order numbers zero-pad the sequence to three digits:
/// "PO/24-25/007".
pub fn format_po_number(prefix: &str, fy: &FinancialYear, seq: u32) -> String {
    format!("{}/{}/{:03}", prefix, fy.label(), seq)
}

/// Output filename derived from the document number, with path-unsafe
/// characters replaced.
pub fn pdf_filename(number: &str) -> String {
    let safe: String = number
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    format!("{safe}.pdf")
}
