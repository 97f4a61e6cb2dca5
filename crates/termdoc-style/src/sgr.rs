#![forbid(unsafe_code)]

//! SGR (Select Graphic Rendition) encoding for [`Style`].
//!
//! Every style sequence starts with a reset (`0`) so a run never inherits
//! attributes from the run before it:
//!
//! | Style | Sequence |
//! |-------|----------|
//! | `NORMAL` | `ESC [ 0 m` |
//! | `BOLD` | `ESC [ 0 ; 1 m` |
//! | `BOLD \| ITALIC \| UNDERLINED \| STRIKETHROUGH` | `ESC [ 0 ; 1 ; 3 ; 4 ; 9 m` |

use crate::Style;

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &str = "\x1b[0m";

/// Ordered table of (flag, SGR "on" code) for iteration.
pub const FLAG_TABLE: [(Style, u8); 4] = [
    (Style::BOLD, 1),
    (Style::ITALIC, 3),
    (Style::UNDERLINED, 4),
    (Style::STRIKETHROUGH, 9),
];

#[inline]
fn push_code(out: &mut String, code: u8) {
    out.push(';');
    if code >= 10 {
        out.push(char::from(b'0' + code / 10));
    }
    out.push(char::from(b'0' + code % 10));
}

/// Append the escape sequence selecting `style` to `out`.
///
/// Emits `ESC [ 0`, then `;n` for each set flag, then `m`.
pub fn append_style_string(out: &mut String, style: Style) {
    out.push_str("\x1b[0");
    for code in style.sgr_codes() {
        push_code(out, code);
    }
    out.push('m');
}

/// Append the SGR reset sequence to `out`.
#[inline]
pub fn append_reset(out: &mut String) {
    out.push_str(SGR_RESET);
}

/// Decode a single SGR sequence back into a [`Style`].
///
/// Accepts `ESC [ params m` where every parameter is `0` (reset) or one of
/// the codes in [`FLAG_TABLE`]. An empty parameter list means reset.
/// Returns `None` for anything else, including codes this crate never emits.
#[must_use]
pub fn parse_sgr(seq: &str) -> Option<Style> {
    let params = seq.strip_prefix("\x1b[")?.strip_suffix('m')?;
    let mut style = Style::NORMAL;
    if params.is_empty() {
        return Some(style);
    }
    for param in params.split(';') {
        let code: u8 = if param.is_empty() {
            0
        } else {
            param.parse().ok()?
        };
        if code == 0 {
            style = Style::NORMAL;
            continue;
        }
        let (flag, _) = FLAG_TABLE.iter().find(|(_, c)| *c == code)?;
        style |= *flag;
    }
    Some(style)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn encode(style: Style) -> String {
        let mut out = String::new();
        append_style_string(&mut out, style);
        out
    }

    proptest! {
        #[test]
        fn style_round_trips(bits in 0u8..16) {
            let style = Style::from_bits_truncate(bits);
            let mut out = String::new();
            append_style_string(&mut out, style);
            prop_assert_eq!(parse_sgr(&out), Some(style));
        }

        #[test]
        fn sequence_lists_sgr_codes(bits in 0u8..16) {
            let style = Style::from_bits_truncate(bits);
            let params: String = style.sgr_codes().iter().map(|code| format!(";{code}")).collect();
            prop_assert_eq!(encode(style), format!("\x1b[0{params}m"));
        }
    }
}
