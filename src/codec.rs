//! Fixed-width binary layout for reservation records.
//!
//! Each record is exactly [`RECORD_SIZE`] bytes with no header or separator:
//!
//! ```text
//! ┌──────┬─────────────┬─────────┬──────┬─────────────┬──────────┬────────┐
//! │ code │ flight code │ airline │ name │ citizenship │ cost f64 │ active │
//! │  7   │      7      │   30    │  50  │     50      │  8 (BE)  │   1    │
//! └──────┴─────────────┴─────────┴──────┴─────────────┴──────────┴────────┘
//! ```
//!
//! Text fields hold UTF-8 truncated on a character boundary and right-padded
//! with spaces, so the stride stays exact for any content.

use crate::reservation::{Reservation, ReservationError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

pub const CODE_WIDTH: usize = 7;
pub const FLIGHT_CODE_WIDTH: usize = 7;
pub const AIRLINE_WIDTH: usize = 30;
pub const NAME_WIDTH: usize = 50;
pub const CITIZENSHIP_WIDTH: usize = 50;

pub const RECORD_SIZE: usize =
    CODE_WIDTH + FLIGHT_CODE_WIDTH + AIRLINE_WIDTH + NAME_WIDTH + CITIZENSHIP_WIDTH + 8 + 1;

const PAD: u8 = b' ';

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Field {field} is not valid UTF-8")]
    InvalidText { field: &'static str },

    #[error("Invalid active flag byte {0:#04x}")]
    InvalidFlag(u8),

    #[error("Truncated record of {0} bytes")]
    Truncated(usize),

    #[error(transparent)]
    Invalid(#[from] ReservationError),
}

// Longest prefix of `text` that fits in `width` bytes without splitting a char
fn fit_to_width(text: &str, width: usize) -> &str {
    if text.len() <= width {
        return text;
    }
    let mut end = width;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn put_text(buf: &mut BytesMut, text: &str, width: usize) {
    let fitted = fit_to_width(text, width);
    buf.put_slice(fitted.as_bytes());
    buf.put_bytes(PAD, width - fitted.len());
}

fn get_text(buf: &mut Bytes, width: usize, field: &'static str) -> Result<String, DecodeError> {
    let raw = buf.split_to(width);
    let text = std::str::from_utf8(&raw).map_err(|_| DecodeError::InvalidText { field })?;
    Ok(text.trim_end_matches(PAD as char).to_string())
}

pub fn encode(reservation: &Reservation, buf: &mut BytesMut) {
    buf.reserve(RECORD_SIZE);
    put_text(buf, reservation.code(), CODE_WIDTH);
    put_text(buf, reservation.flight_code(), FLIGHT_CODE_WIDTH);
    put_text(buf, reservation.airline(), AIRLINE_WIDTH);
    put_text(buf, reservation.name(), NAME_WIDTH);
    put_text(buf, reservation.citizenship(), CITIZENSHIP_WIDTH);
    buf.put_f64(reservation.cost());
    buf.put_u8(reservation.is_active() as u8);
}

pub fn encode_all<'a>(reservations: impl IntoIterator<Item = &'a Reservation>) -> Bytes {
    let mut buf = BytesMut::new();
    for reservation in reservations {
        encode(reservation, &mut buf);
    }
    buf.freeze()
}

/// Decode one record. `record` must be exactly [`RECORD_SIZE`] bytes.
pub fn decode(mut record: Bytes) -> Result<Reservation, DecodeError> {
    if record.len() != RECORD_SIZE {
        return Err(DecodeError::Truncated(record.len()));
    }

    let code = get_text(&mut record, CODE_WIDTH, "code")?;
    let flight_code = get_text(&mut record, FLIGHT_CODE_WIDTH, "flight code")?;
    let airline = get_text(&mut record, AIRLINE_WIDTH, "airline")?;
    let name = get_text(&mut record, NAME_WIDTH, "name")?;
    let citizenship = get_text(&mut record, CITIZENSHIP_WIDTH, "citizenship")?;
    let cost = record.get_f64();
    let active = match record.get_u8() {
        0 => false,
        1 => true,
        other => return Err(DecodeError::InvalidFlag(other)),
    };

    Ok(Reservation::new(
        &code,
        &flight_code,
        &airline,
        &name,
        &citizenship,
        cost,
        active,
    )?)
}

/// Split a whole file image into records and decode each one.
///
/// Results are returned per record so one bad record never hides the rest.
/// A trailing partial record yields a final `Truncated` error.
pub fn decode_all(mut data: Bytes) -> Vec<Result<Reservation, DecodeError>> {
    let mut records = Vec::with_capacity(data.len() / RECORD_SIZE + 1);
    while data.len() >= RECORD_SIZE {
        records.push(decode(data.split_to(RECORD_SIZE)));
    }
    if !data.is_empty() {
        records.push(Err(DecodeError::Truncated(data.len())));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> Reservation {
        Reservation::new("D1234", "OA101", "Otto Airlines", name, "Canada", 150.25, true).unwrap()
    }

    #[test]
    fn test_record_size_is_fixed() {
        assert_eq!(RECORD_SIZE, 153);

        let mut buf = BytesMut::new();
        encode(&sample("Ada"), &mut buf);
        assert_eq!(buf.len(), RECORD_SIZE);

        // Multi-byte text must not stretch the record
        let mut buf = BytesMut::new();
        encode(&sample(&"É".repeat(40)), &mut buf);
        assert_eq!(buf.len(), RECORD_SIZE);
    }

    #[test]
    fn test_text_is_padded_with_spaces() {
        let mut buf = BytesMut::new();
        encode(&sample("Ada"), &mut buf);
        assert_eq!(&buf[..CODE_WIDTH], b"D1234  ");
        assert_eq!(buf[RECORD_SIZE - 1], 1);
    }

    #[test]
    fn test_decode_restores_fields() {
        let original = sample("Ada Lovelace");
        let mut buf = BytesMut::new();
        encode(&original, &mut buf);

        let decoded = decode(buf.freeze()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_trailing_whitespace_survives_decode() {
        let original =
            Reservation::new("D1234", "OA101", "Otto Airlines", "Ada ", "Canada\t", 150.25, true)
                .unwrap();
        let mut buf = BytesMut::new();
        encode(&original, &mut buf);

        assert_eq!(decode(buf.freeze()).unwrap(), original);
    }

    #[test]
    fn test_long_multibyte_text_truncates_on_char_boundary() {
        // 26 two-byte chars = 52 bytes, only 25 fit in the name field
        let name = "é".repeat(26);
        let mut buf = BytesMut::new();
        encode(&sample(&name), &mut buf);

        let decoded = decode(buf.freeze()).unwrap();
        assert_eq!(decoded.name(), "é".repeat(25));
    }

    #[test]
    fn test_decode_rejects_blank_name() {
        let mut buf = BytesMut::new();
        encode(&sample("Ada"), &mut buf);
        let name_start = CODE_WIDTH + FLIGHT_CODE_WIDTH + AIRLINE_WIDTH;
        buf[name_start..name_start + NAME_WIDTH].fill(PAD);

        assert_eq!(
            decode(buf.freeze()).unwrap_err(),
            DecodeError::Invalid(ReservationError::InvalidName)
        );
    }

    #[test]
    fn test_decode_rejects_bad_flag_and_bad_utf8() {
        let mut buf = BytesMut::new();
        encode(&sample("Ada"), &mut buf);
        let mut bad_flag = buf.clone();
        bad_flag[RECORD_SIZE - 1] = 7;
        assert_eq!(
            decode(bad_flag.freeze()).unwrap_err(),
            DecodeError::InvalidFlag(7)
        );

        buf[0] = 0xFF;
        assert_eq!(
            decode(buf.freeze()).unwrap_err(),
            DecodeError::InvalidText { field: "code" }
        );
    }

    #[test]
    fn test_decode_all_reports_trailing_bytes() {
        let first = sample("Ada");
        let second = sample("Grace");
        let mut data = BytesMut::from(&encode_all([&first, &second])[..]);
        data.put_slice(b"junk");

        let results = decode_all(data.freeze());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &first);
        assert_eq!(results[1].as_ref().unwrap(), &second);
        assert_eq!(results[2], Err(DecodeError::Truncated(4)));
    }
}
