//! Parser for physical lengths such as `10`, `2.5mm` or `0.1 inch`.
//!
//! Grammar (whitespace around each part is ignored):
//!
//! ```text
//! length := number unit?
//! number := [+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?
//! unit   := inches | inch | in | mils | mil | mm | cm | m
//! ```
//!
//! A length without a unit takes the caller's default unit.

use std::ops::Range;

use log::trace;
use winnow::{
    Parser as _,
    ascii::{digit0, digit1, multispace0},
    combinator::{alt, opt, preceded},
    error::{ContextError, ErrMode},
    stream::LocatingSlice,
    token::{one_of, rest, take_till},
};

use icrom_core::units::{Length, LengthUnit};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

type Input<'s> = LocatingSlice<&'s str>;
type IResult<O> = Result<O, ErrMode<ContextError>>;

const UNIT_HELP: &str = "use one of: inch, inches, in, mil, mils, mm, cm, m";

/// The three whitespace-separated parts of a length with their byte spans.
struct Parts<'s> {
    number: (&'s str, Range<usize>),
    unit: (&'s str, Range<usize>),
    trailing: (&'s str, Range<usize>),
}

/// Parses a length string.
///
/// # Errors
///
/// Returns a [`ParseError`] with a single diagnostic:
/// - `E001` when the input is empty or does not start with a valid number
/// - `E002` when the unit is unknown or text follows the unit
///
/// # Example
///
/// ```
/// # use icrom_core::units::LengthUnit;
/// # use icrom_parser::parse_length;
/// let pitch = parse_length("1.27mm", LengthUnit::Mil).unwrap();
/// assert_eq!(pitch.unit(), LengthUnit::Mm);
///
/// let trace = parse_length("10", LengthUnit::Mil).unwrap();
/// assert!((trace.mm() - 0.254).abs() < 1e-12);
///
/// let err = parse_length("37ug", LengthUnit::Mil).unwrap_err();
/// assert_eq!(err.to_string(), "error[E002]: unknown unit `ug`");
/// ```
pub fn parse_length(source: &str, default_unit: LengthUnit) -> Result<Length, ParseError> {
    let mut input = LocatingSlice::new(source);
    let parts = length_parts(&mut input).map_err(|_| invalid_number(source))?;

    let (number, number_span) = parts.number;
    let (unit, unit_span) = parts.unit;

    let unit = if unit.is_empty() {
        default_unit
    } else if unit.starts_with(|c: char| !c.is_alphabetic()) {
        // "1.2.3" or "5,5": the number runs on into the unit
        return Err(Diagnostic::error(format!(
            "invalid number `{}`",
            &source[number_span.start..unit_span.end]
        ))
        .with_code(ErrorCode::E001)
        .with_label(
            Span::new(number_span.start..unit_span.end),
            "expected a decimal number",
        )
        .with_help("write lengths like `10`, `2.5mm` or `0.1 inch`")
        .into());
    } else {
        unit.parse::<LengthUnit>().map_err(|_| {
            Diagnostic::error(format!("unknown unit `{unit}`"))
                .with_code(ErrorCode::E002)
                .with_secondary_label(Span::new(number_span.clone()), "value")
                .with_label(Span::new(unit_span.clone()), "not a length unit")
                .with_help(UNIT_HELP)
        })?
    };

    let (trailing, trailing_span) = parts.trailing;
    let trailing = trailing.trim_end();
    if !trailing.is_empty() {
        let span = Span::new(trailing_span.start..trailing_span.start + trailing.len());
        return Err(Diagnostic::error(format!("unexpected `{trailing}` after length"))
            .with_code(ErrorCode::E002)
            .with_label(span, "a length is a number followed by at most one unit")
            .with_help(UNIT_HELP)
            .into());
    }

    let value = number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            Diagnostic::error(format!("number `{number}` is out of range"))
                .with_code(ErrorCode::E001)
                .with_label(Span::new(number_span), "not a finite number")
        })?;

    let length = Length::new(value, unit);
    trace!(source = source, value = value, unit = unit.name(); "Parsed length");
    Ok(length)
}

fn length_parts<'s>(input: &mut Input<'s>) -> IResult<Parts<'s>> {
    (
        preceded(multispace0, number.with_span()),
        preceded(
            multispace0,
            take_till(0.., |c: char| c.is_whitespace()).with_span(),
        ),
        preceded(multispace0, rest.with_span()),
    )
        .map(|(number, unit, trailing)| Parts {
            number,
            unit,
            trailing,
        })
        .parse_next(input)
}

fn number<'s>(input: &mut Input<'s>) -> IResult<&'s str> {
    (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)
}

/// Builds the `E001` diagnostic for input that does not start with a number,
/// labelling the first whitespace-separated token.
fn invalid_number(source: &str) -> ParseError {
    let trimmed = source.trim_start();
    let start = source.len() - trimmed.len();
    let token = trimmed.split_whitespace().next().unwrap_or_default();

    if token.is_empty() {
        return Diagnostic::error("empty length")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(0..source.len()), "expected a number")
            .with_help("write lengths like `10`, `2.5mm` or `0.1 inch`")
            .into();
    }

    Diagnostic::error(format!("invalid number `{token}`"))
        .with_code(ErrorCode::E001)
        .with_label(
            Span::new(start..start + token.len()),
            "expected a decimal number",
        )
        .with_help("write lengths like `10`, `2.5mm` or `0.1 inch`")
        .into()
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn unit_strategy() -> impl Strategy<Value = LengthUnit> {
        prop::sample::select(
            LengthUnit::NAMES
                .iter()
                .map(|(_, unit)| *unit)
                .collect::<Vec<_>>(),
        )
    }

    fn check_display_round_trip(value: f64, unit: LengthUnit) -> Result<(), TestCaseError> {
        let original = Length::new(value, unit);
        let parsed = parse_length(&original.to_string(), LengthUnit::Mm)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(parsed.unit(), unit);
        prop_assert!(approx_eq!(f64, parsed.value(), value, ulps = 2));
        prop_assert!(parsed.approx_eq(original, 1e-9));
        Ok(())
    }

    fn check_alias_spelling(value: f64, index: usize) -> Result<(), TestCaseError> {
        let (name, unit) = LengthUnit::NAMES[index % LengthUnit::NAMES.len()];
        let parsed = parse_length(&format!("{value}{name}"), LengthUnit::Mil)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(parsed.unit(), unit);
        prop_assert!(approx_eq!(f64, parsed.value(), value, ulps = 2));
        Ok(())
    }

    proptest! {
        #[test]
        fn display_round_trip(value in -1.0e6f64..1.0e6, unit in unit_strategy()) {
            check_display_round_trip(value, unit)?;
        }

        #[test]
        fn alias_spelling(value in 0.0f64..1.0e4, index in 0usize..8) {
            check_alias_spelling(value, index)?;
        }

        #[test]
        fn garbage_suffix_is_rejected(value in 0.0f64..1.0e4, suffix in "[a-z]{1,4}") {
            prop_assume!(suffix.parse::<LengthUnit>().is_err());
            let result = parse_length(&format!("{value}{suffix}"), LengthUnit::Mil);
            prop_assert!(result.is_err());
        }
    }
}
