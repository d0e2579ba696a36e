//! Amount-to-words conversion for the legally worded total line
//! ("USD ONE THOUSAND TWO HUNDRED DOLLARS AND FIFTY CENTS ONLY").

use crate::model::Currency;

const UNITS: [&str; 20] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    "ELEVEN", "TWELVE", "THIRTEEN", "FOURTEEN", "FIFTEEN", "SIXTEEN", "SEVENTEEN", "EIGHTEEN",
    "NINETEEN",
];

const TENS: [&str; 10] = [
    "", "", "TWENTY", "THIRTY", "FORTY", "FIFTY", "SIXTY", "SEVENTY", "EIGHTY", "NINETY",
];

const SCALES: [&str; 4] = ["", "THOUSAND", "MILLION", "BILLION"];

/// Words for 1..=999.
fn chunk_words(n: u64, out: &mut Vec<String>) {
    debug_assert!((1..=999).contains(&n));
    if n >= 100 {
        out.push(UNITS[(n / 100) as usize].to_string());
        out.push("HUNDRED".to_string());
    }
    let rem = n % 100;
    if rem == 0 {
        return;
    }
    if rem < 20 {
        out.push(UNITS[rem as usize].to_string());
    } else {
        out.push(TENS[(rem / 10) as usize].to_string());
        if rem % 10 != 0 {
            out.push(UNITS[(rem % 10) as usize].to_string());
        }
    }
}

/// Base-1000 decomposition with per-chunk scale words. Zero chunks
/// contribute neither digits nor a scale word.
fn integer_words(mut n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }
    let mut chunks: Vec<u64> = Vec::new();
    while n > 0 {
        chunks.push(n % 1000);
        n /= 1000;
    }
    let mut words: Vec<String> = Vec::new();
    for (idx, &chunk) in chunks.iter().enumerate().rev() {
        if chunk == 0 {
            continue;
        }
        chunk_words(chunk, &mut words);
        if idx > 0 {
            words.push(SCALES[idx.min(SCALES.len() - 1)].to_string());
        }
    }
    words.join(" ")
}

/// Unit names like PAISA already read as plurals; everything else takes an S.
fn pluralize(name: &str, n: u64) -> String {
    if n == 1 || name.ends_with('A') {
        name.to_string()
    } else {
        format!("{name}S")
    }
}

/// Convert a non-negative amount to uppercase words terminated by "ONLY".
///
/// The fractional part is rounded to two minor-unit digits. A fraction that
/// rounds up to a full major unit (e.g. 0.995) carries into the integer part
/// instead of producing a "ONE HUNDRED CENTS" clause.
pub fn amount_in_words(amount: f64, currency: &Currency) -> String {
    let total_minor = (amount.max(0.0) * 100.0).round() as u64;
    let major = total_minor / 100;
    let minor = total_minor % 100;

    if total_minor == 0 {
        return format!("{} ZERO ONLY", currency.code);
    }

    let mut out = String::new();
    out.push_str(&currency.code);
    if major > 0 {
        out.push(' ');
        out.push_str(&integer_words(major));
        out.push(' ');
        out.push_str(&pluralize(&currency.major, major));
    }
    if minor > 0 {
        if major > 0 {
            out.push_str(" AND");
        }
        out.push(' ');
        out.push_str(&integer_words(minor));
        out.push(' ');
        out.push_str(&pluralize(&currency.minor, minor));
    }
    out.push_str(" ONLY");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Currency;

    #[test]
    fn zero_amount_short_circuits() {
        assert_eq!(amount_in_words(0.0, &Currency::usd()), "USD ZERO ONLY");
    }

    #[test]
    fn singular_major_without_fraction() {
        assert_eq!(amount_in_words(1.0, &Currency::usd()), "USD ONE DOLLAR ONLY");
    }

    #[test]
    fn plural_major_and_minor() {
        assert_eq!(
            amount_in_words(2.05, &Currency::usd()),
            "USD TWO DOLLARS AND FIVE CENTS ONLY"
        );
    }

    #[test]
    fn zero_fraction_omits_and_clause() {
        assert_eq!(
            amount_in_words(1200.0, &Currency::usd()),
            "USD ONE THOUSAND TWO HUNDRED DOLLARS ONLY"
        );
    }

    #[test]
    fn crosses_million_scale_with_paisa_clause() {
        assert_eq!(
            amount_in_words(1_234_567.89, &Currency::inr()),
            "INR ONE MILLION TWO HUNDRED THIRTY FOUR THOUSAND \
             FIVE HUNDRED SIXTY SEVEN RUPEES AND EIGHTY NINE PAISA ONLY"
        );
    }

    #[test]
    fn zero_chunk_contributes_no_scale_word() {
        assert_eq!(
            amount_in_words(1_000_001.0, &Currency::usd()),
            "USD ONE MILLION ONE DOLLARS ONLY"
        );
    }

    #[test]
    fn billions() {
        assert_eq!(
            amount_in_words(2_000_000_000.0, &Currency::usd()),
            "USD TWO BILLION DOLLARS ONLY"
        );
    }

    #[test]
    fn fraction_rounding_carries_into_major() {
        // 0.995 rounds to 100 minor units: one full dollar, no cents clause.
        assert_eq!(amount_in_words(0.995, &Currency::usd()), "USD ONE DOLLAR ONLY");
        assert_eq!(
            amount_in_words(1.999, &Currency::usd()),
            "USD TWO DOLLARS ONLY"
        );
    }

    #[test]
    fn teens_and_tens() {
        assert_eq!(
            amount_in_words(0.17, &Currency::usd()),
            "USD SEVENTEEN CENTS ONLY"
        );
        assert_eq!(
            amount_in_words(90.0, &Currency::usd()),
            "USD NINETY DOLLARS ONLY"
        );
    }
}
