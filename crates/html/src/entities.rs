use memchr::memchr;
use std::borrow::Cow;

/// Named references decoded by [`decode_entities`], matched ASCII case-insensitively.
const NAMED_ENTITIES: [(&[u8], char); 4] = [
    (b"&lt;", '<'),
    (b"&gt;", '>'),
    (b"&quot;", '"'),
    (b"&amp;", '&'),
];

/// Decode the four named character references authors type by hand.
///
/// Contract:
/// - Decoded: `&lt;`, `&gt;`, `&quot;`, `&amp;`, with the name in any ASCII case.
/// - Everything else starting with `&` (other names, numeric references, missing
///   semicolons) is copied through verbatim.
/// - Never fails; input without `&` is returned borrowed.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    let mut i = first;

    while i < bytes.len() {
        let matched = NAMED_ENTITIES.iter().find(|(name, _)| {
            bytes
                .get(i..i + name.len())
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
        });

        if let Some((name, ch)) = matched {
            // Flush bytes up to '&' unchanged (preserves UTF-8).
            out.push_str(&s[copy_start..i]);
            out.push(*ch);
            i += name.len();
            copy_start = i;
        } else {
            i += 1;
        }

        match memchr(b'&', &bytes[i.min(bytes.len())..]) {
            Some(rel) => i += rel,
            None => break,
        }
    }

    out.push_str(&s[copy_start..]);
    Cow::Owned(out)
}
