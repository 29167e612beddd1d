//! Fixed-width record encoding
//!
//! Every dataset record is exactly 75 characters, five left-aligned fields
//! separated by single blanks:
//!
//! ```text
//! 0000000003 nYLEKeZtqNSCAhMNKTFpFgZcnvf1DbFiSu rent       -00000100.50000000
//! ^key (10)  ^address (34)                      ^label (10) ^sign + amount (18)
//! ```
//!
//! Overlong fields are truncated and short fields blank-padded, so the
//! length invariant holds regardless of input. The amount column is an
//! unsigned fixed-point value, 8 integer digits, a dot and 8 fraction
//! digits, with the arithmetic sign carried by the separate sign column.

use crate::types::record::{BalanceSlot, DatasetRecord, CONTROL_KEY};
use rust_decimal::Decimal;

const KEY_WIDTH: usize = 10;
const ADDRESS_WIDTH: usize = 34;
const LABEL_WIDTH: usize = 10;
const AMOUNT_WIDTH: usize = 17;

/// Truncate or blank-pad a field to its column width
fn fit(value: &str, width: usize) -> String {
    let mut field: String = value.chars().take(width).collect();
    while field.chars().count() < width {
        field.push(' ');
    }
    field
}

/// Format the magnitude column: 8 integer digits, dot, 8 fraction digits
///
/// Values whose integer part exceeds 8 digits are truncated on the right to
/// keep the column width; the dataset side treats the column as opaque text.
fn format_amount(magnitude: Decimal) -> String {
    let text = format!("{:.8}", magnitude);
    if text.len() >= AMOUNT_WIDTH {
        text.chars().take(AMOUNT_WIDTH).collect()
    } else {
        format!("{:0>width$}", text, width = AMOUNT_WIDTH)
    }
}

/// Sign column character for a signed amount
fn sign_of(amount: Decimal) -> char {
    if amount.is_sign_negative() {
        '-'
    } else {
        '+'
    }
}

/// Assemble the five columns into one 75-character record
fn assemble(key: &str, address: &str, label: &str, amount: Decimal) -> DatasetRecord {
    let line = format!(
        "{} {} {} {}{}",
        fit(key, KEY_WIDTH),
        fit(address, ADDRESS_WIDTH),
        fit(label, LABEL_WIDTH),
        sign_of(amount),
        format_amount(amount.abs()),
    );
    DatasetRecord::from_line(line)
}

/// Encode a balance record for one of the two reserved slots
///
/// The Available slot always occupies key `0000000001` and the Pending slot
/// key `0000000002`; the address column carries the literal `0`.
pub fn encode_balance(amount: Decimal, slot: BalanceSlot) -> DatasetRecord {
    assemble(slot.key(), "0", slot.label(), amount)
}

/// Encode a wallet transaction record
///
/// The key is the zero-padded sequence number; a negative amount marks an
/// outbound payment and yields a `-` sign column.
pub fn encode_transaction(
    sequence: u64,
    address: &str,
    label: &str,
    amount: Decimal,
) -> DatasetRecord {
    assemble(&format!("{:010}", sequence), address, label, amount)
}

/// Encode the control record marking end-of-data
///
/// Fixed content: key `9999999999`, address `0`, label `Control Re`
/// (the column-width truncation of "Control Record"), amount zero.
pub fn encode_control() -> DatasetRecord {
    assemble(CONTROL_KEY, "0", "Control Record", Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RECORD_LEN;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case::zero("0")]
    #[case::small("0.00000001")]
    #[case::typical("1234.5")]
    #[case::negative("-500.25")]
    #[case::large("99999999.99999999")]
    fn test_balance_record_is_exactly_75_chars(#[case] amount: &str) {
        for slot in [BalanceSlot::Available, BalanceSlot::Pending] {
            let record = encode_balance(dec(amount), slot);
            assert_eq!(record.as_str().chars().count(), RECORD_LEN);
        }
    }

    #[test]
    fn test_available_balance_layout() {
        let record = encode_balance(dec("1000"), BalanceSlot::Available);
        let text = record.as_str();
        assert_eq!(&text[..10], "0000000001");
        assert_eq!(&text[11..45], format!("{:<34}", "0"));
        assert_eq!(&text[46..56], "Available ");
        assert_eq!(&text[57..58], "+");
        assert_eq!(&text[58..], "00001000.00000000");
    }

    #[test]
    fn test_pending_balance_uses_second_slot() {
        let record = encode_balance(dec("50"), BalanceSlot::Pending);
        assert_eq!(record.key(), "0000000002");
        assert!(record.as_str().contains("Pending   "));
    }

    #[test]
    fn test_negative_balance_carries_minus_sign_with_absolute_magnitude() {
        let record = encode_balance(dec("-12.5"), BalanceSlot::Available);
        let text = record.as_str();
        assert_eq!(&text[57..58], "-");
        assert_eq!(&text[58..], "00000012.50000000");
    }

    #[test]
    fn test_transaction_record_layout() {
        let record = encode_transaction(
            3,
            "nYLEKeZtqNSCAhMNKTFpFgZcnvf1DbFiSu",
            "rent",
            dec("-100.5"),
        );
        let text = record.as_str();
        assert_eq!(text.chars().count(), RECORD_LEN);
        assert_eq!(&text[..10], "0000000003");
        assert_eq!(&text[11..45], "nYLEKeZtqNSCAhMNKTFpFgZcnvf1DbFiSu");
        assert_eq!(&text[46..56], "rent      ");
        assert_eq!(&text[57..], "-00000100.50000000");
    }

    #[rstest]
    #[case::long_address(
        "nYLEKeZtqNSCAhMNKTFpFgZcnvf1DbFiSuEXTRA",
        "rent"
    )]
    #[case::long_label("nABC", "a label much longer than ten characters")]
    fn test_overlong_fields_are_truncated_to_75(#[case] address: &str, #[case] label: &str) {
        let record = encode_transaction(7, address, label, dec("1"));
        assert_eq!(record.as_str().chars().count(), RECORD_LEN);
    }

    #[test]
    fn test_oversized_amount_keeps_record_width() {
        let record = encode_transaction(4, "nABC", "", dec("123456789.5"));
        assert_eq!(record.as_str().chars().count(), RECORD_LEN);
    }

    #[test]
    fn test_sequence_number_is_zero_padded() {
        let record = encode_transaction(42, "nABC", "", dec("1"));
        assert_eq!(record.key(), "0000000042");
    }

    #[test]
    fn test_control_record_fixed_content() {
        let record = encode_control();
        assert_eq!(
            record.as_str(),
            "9999999999 0                                  Control Re +00000000.00000000"
        );
        assert!(record.is_control());
        assert_eq!(record.as_str().chars().count(), RECORD_LEN);
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("", 3), "   ");
    }
}
