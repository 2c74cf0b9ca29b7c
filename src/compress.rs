//! ZPL run-length compression of hexadecimal rows.
//!
//! Repeat counts are written as letters in front of the repeated character:
//!
//! | Letters | Count |
//! |---------|-------|
//! | `G`..`Y` | 1..19 |
//! | `g`..`z` | 20, 40, .. 400 |
//!
//! A count is a lowercase letter for the multiples of 20 followed by an
//! uppercase letter for the remainder, so a single token covers at most 419.
//! A row made only of `0` is written as `,` and a row made only of `F` as `!`.
//! Between rows, `:` repeats the previous row.

use log::trace;

use crate::Error;

/// Largest count a single token can express (`zY`).
pub const MAX_REPEAT: usize = 419;

/// Runs up to this length are cheaper written out.
const MIN_RUN: usize = 4;

const LOW: &[u8; 20] = b" GHIJKLMNOPQRSTUVWXY";
const HIGH: &[u8; 21] = b" ghijklmnopqrstuvwxyz";

/// Row of `0` only.
pub const WHITE_ROW: char = ',';
/// Row of `F` only.
pub const BLACK_ROW: char = '!';
/// Same as the previous row.
pub const REPEAT_ROW: char = ':';

fn push_token(out: &mut String, count: usize, ch: char) {
    let high = count / 20;
    let low = count % 20;

    if high > 0 {
        out.push(char::from(HIGH[high]));
    }
    if low > 0 {
        out.push(char::from(LOW[low]));
    }
    out.push(ch);
}

/// Append the repeat code for `count` copies of `ch` to `out`.
///
/// Counts above [`MAX_REPEAT`] are split into several tokens; the leftover
/// comes first, followed by full tokens of `MAX_REPEAT`.
pub fn repeat_code(out: &mut String, count: usize, ch: char) {
    let mut rest = count;
    let mut full = 0;
    while rest > MAX_REPEAT {
        rest -= MAX_REPEAT;
        full += 1;
    }

    if rest > 0 {
        push_token(out, rest, ch);
    }
    for _ in 0..full {
        push_token(out, MAX_REPEAT, ch);
    }
}

fn flush_run(out: &mut String, ch: char, len: usize) {
    if len > MIN_RUN {
        repeat_code(out, len, ch);
    } else {
        out.extend(std::iter::repeat(ch).take(len));
    }
}

/// Compress one hexadecimal row.
///
/// # Example
///
/// ```
/// use zplgfa::compress_row;
///
/// assert_eq!(compress_row("0000000000"), ",");
/// assert_eq!(compress_row("FFFFFFF0"), "MF0");
/// assert_eq!(compress_row("A0A0"), "A0A0");
/// ```
pub fn compress_row(row: &str) -> String {
    let mut chars = row.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };

    let mut output = String::new();
    let mut current = first;
    let mut len = 1;

    for c in chars {
        if c == current {
            len += 1;
        } else {
            flush_run(&mut output, current, len);
            current = c;
            len = 1;
        }
    }

    if output.is_empty() {
        match current {
            '0' => return WHITE_ROW.to_string(),
            'F' => return BLACK_ROW.to_string(),
            _ => {}
        }
    }
    flush_run(&mut output, current, len);

    trace!("compressed {} chars into {}", row.len(), output.len());
    output
}

fn letter_count(c: char) -> Option<usize> {
    match c {
        'G'..='Y' => Some(c as usize - 'G' as usize + 1),
        'g'..='z' => Some((c as usize - 'g' as usize + 1) * 20),
        _ => None,
    }
}

/// Expand one compressed row back into `row_chars` hexadecimal characters.
///
/// `,` and `!` fill the rest of the row with `0` and `F`. A row that ends
/// early is padded with `0`, as the printer does.
pub fn expand_row(token: &str, row_chars: usize) -> Result<String, Error> {
    let (row, used) = expand_next(token, 0, row_chars)?;
    match token[used..].chars().next() {
        None => Ok(row),
        found => Err(Error::MalformedData {
            position: used,
            found,
        }),
    }
}

// Expand one row starting at byte `start`; returns the row and the position
// after its last token.
fn expand_next(data: &str, start: usize, row_chars: usize) -> Result<(String, usize), Error> {
    let mut row = String::with_capacity(row_chars);
    let mut count = 0;

    for (i, c) in data[start..].char_indices() {
        let position = start + i;
        if row.len() == row_chars {
            return Ok((row, position));
        }

        if let Some(n) = letter_count(c) {
            count += n;
            continue;
        }

        match c {
            '0'..='9' | 'A'..='F' => {
                let n = count.max(1);
                if row.len() + n > row_chars {
                    return Err(Error::MalformedData {
                        position,
                        found: Some(c),
                    });
                }
                row.extend(std::iter::repeat(c).take(n));
                count = 0;
            }
            WHITE_ROW | BLACK_ROW if count == 0 => {
                let fill = if c == WHITE_ROW { '0' } else { 'F' };
                let n = row_chars - row.len();
                row.extend(std::iter::repeat(fill).take(n));
                return Ok((row, position + 1));
            }
            _ => {
                return Err(Error::MalformedData {
                    position,
                    found: Some(c),
                })
            }
        }
    }

    if count > 0 {
        return Err(Error::MalformedData {
            position: data.len(),
            found: None,
        });
    }
    let n = row_chars - row.len();
    row.extend(std::iter::repeat('0').take(n));
    Ok((row, data.len()))
}

/// Split a compressed Graphic Field payload back into hexadecimal rows.
///
/// `:` repeats the previous row. A row is complete once it holds
/// `2 * bytes_per_row` characters or after a `,` or `!`.
pub fn decompress(data: &str, bytes_per_row: usize) -> Result<Vec<String>, Error> {
    let row_chars = bytes_per_row * 2;
    let mut rows: Vec<String> = Vec::new();
    let mut position = 0;

    while position < data.len() {
        if data[position..].starts_with(REPEAT_ROW) {
            let previous = match rows.last() {
                Some(row) => row.clone(),
                None => {
                    return Err(Error::MalformedData {
                        position,
                        found: Some(REPEAT_ROW),
                    })
                }
            };
            rows.push(previous);
            position += 1;
            continue;
        }

        let (row, next) = expand_row_prefix(data, position, row_chars)?;
        rows.push(row);
        position = next;
    }

    Ok(rows)
}

// Expand the row at `start`, never reading past the next `:`.
fn expand_row_prefix(data: &str, start: usize, row_chars: usize) -> Result<(String, usize), Error> {
    let end = data[start..]
        .find(REPEAT_ROW)
        .map_or(data.len(), |i| start + i);
    let (row, next) = expand_next(&data[..end], start, row_chars)?;
    if next == start {
        return Err(Error::MalformedData {
            position: start,
            found: data[start..].chars().next(),
        });
    }
    Ok((row, next))
}
