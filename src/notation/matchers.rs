pub type Matcher = fn(char: u8, &[u8]) -> bool;

pub const NUMBER_MATCHER: Matcher = |char, _| char.is_ascii_digit();

pub const IDENTIFIER_MATCHER: Matcher = |char, slice| match (char, slice) {
    (b'a'..=b'z' | b'A'..=b'Z' | b'_', _) => true,
    (b'0'..=b'9', [_, ..]) => true,
    _ => false,
};
