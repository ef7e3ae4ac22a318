//! Alphanumeric mode (indicator 0010): the 45-character set, two per 11 bits.

use crate::error::{QrError, QrResult};
use crate::models::{BitBuffer, Version};
use crate::modes::Mode;

/// Alphanumeric character set in codepoint order: 0-9, A-Z, space, $%*+-./:
const CHARSET: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

fn char_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        ' ' => Some(36),
        '$' => Some(37),
        '%' => Some(38),
        '*' => Some(39),
        '+' => Some(40),
        '-' => Some(41),
        '.' => Some(42),
        '/' => Some(43),
        ':' => Some(44),
        _ => None,
    }
}

/// True when every character is in the 45-character set.
pub fn validate(payload: &str) -> bool {
    !payload.is_empty() && payload.chars().all(|c| char_value(c).is_some())
}

pub(crate) fn check(payload: &str) -> QrResult<()> {
    match payload.chars().find(|&c| char_value(c).is_none()) {
        None => Ok(()),
        Some(c) => Err(QrError::IllegalCharacter {
            mode: Mode::Alphanumeric.name(),
            what: c.to_string(),
        }),
    }
}

/// Append the payload bits (header already written): pairs pack into
/// 11 bits as `first * 45 + second`, a trailing singleton into 6.
pub fn encode(payload: &str, bits: &mut BitBuffer) -> QrResult<()> {
    check(payload)?;
    let chars: Vec<char> = payload.chars().collect();
    for pair in chars.chunks(2) {
        match pair {
            [a, b] => {
                let value = char_value(*a).unwrap_or(0) * 45 + char_value(*b).unwrap_or(0);
                bits.put(value, 11);
            }
            [a] => {
                bits.put(char_value(*a).unwrap_or(0), 6);
            }
            _ => unreachable!(),
        }
    }
    Ok(())
}

/// Consume the character count and payload, returning the decoded string.
pub fn decode(bits: &mut BitBuffer, version: Version) -> QrResult<String> {
    let count = bits.read(Mode::Alphanumeric.char_count_bits(version))? as usize;
    let mut out = String::with_capacity(count);
    let mut remaining = count;
    while remaining > 0 {
        if remaining >= 2 {
            let value = bits.read(11)?;
            let first = (value / 45) as usize;
            let second = (value % 45) as usize;
            if first >= 45 {
                return Err(QrError::IllegalCharacter {
                    mode: Mode::Alphanumeric.name(),
                    what: format!("pair value {value}"),
                });
            }
            out.push(CHARSET[first]);
            out.push(CHARSET[second]);
            remaining -= 2;
        } else {
            let value = bits.read(6)? as usize;
            if value >= 45 {
                return Err(QrError::IllegalCharacter {
                    mode: Mode::Alphanumeric.name(),
                    what: format!("codepoint {value}"),
                });
            }
            out.push(CHARSET[value]);
            remaining -= 1;
        }
    }
    Ok(out)
}
