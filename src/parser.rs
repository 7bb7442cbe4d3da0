use nom::bytes::complete::take_while_m_n;
use nom::character::complete::char;
use nom::combinator::{all_consuming, map_res, opt};
use nom::sequence::tuple;
use nom::IResult;

use crate::Color;

fn opt_hash_char(s: &str) -> IResult<&str, Option<char>> {
    opt(char('#'))(s)
}

fn hex_channel(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |digits: &str| u8::from_str_radix(digits, 16),
    )(input)
}

fn parse_hex(input: &str) -> IResult<&str, Color> {
    let (input, _) = opt_hash_char(input)?;
    let (input, (r, g, b)) = tuple((hex_channel, hex_channel, hex_channel))(input)?;
    Ok((input, Color::from_rgb(r, g, b)))
}

/// Parse a `#RRGGBB` color. The leading `#` is optional and hex digits are
/// case-insensitive. Anything else, including surrounding whitespace and
/// the three-digit shorthand, is rejected.
pub fn parse_color(input: &str) -> Option<Color> {
    all_consuming(parse_hex)(input)
        .ok()
        .map(|(_, color)| color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_color() {
        assert_eq!(Some(Color::from_rgb(255, 0, 153)), parse_color("#ff0099"));
        assert_eq!(Some(Color::from_rgb(255, 0, 153)), parse_color("#FF0099"));
        assert_eq!(Some(Color::from_rgb(255, 0, 153)), parse_color("ff0099"));
        assert_eq!(Some(Color::from_rgb(255, 0, 153)), parse_color("#Ff0099"));
        assert_eq!(Some(Color::from_rgb(0x77, 0x77, 0x77)), parse_color("#777777"));
        assert_eq!(Some(Color::black()), parse_color("#000000"));
        assert_eq!(Some(Color::white()), parse_color("#FFFFFF"));
    }

    #[test]
    fn parse_invalid() {
        assert_eq!(None, parse_color("notacolor"));
        assert_eq!(None, parse_color("#ZZZZZZ"));
        assert_eq!(None, parse_color(""));
        assert_eq!(None, parse_color("#"));
        assert_eq!(None, parse_color("#fff"));
        assert_eq!(None, parse_color("#ff00999"));
        assert_eq!(None, parse_color("#ff009"));
        assert_eq!(None, parse_color("##ff0099"));
        assert_eq!(None, parse_color("#ff 0099"));
        assert_eq!(None, parse_color("  #ff0099\n"));
        assert_eq!(None, parse_color(" ff0099"));
        assert_eq!(None, parse_color("rgb(255, 0, 153)"));
        assert_eq!(None, parse_color("#ff0099ff"));
    }
}
