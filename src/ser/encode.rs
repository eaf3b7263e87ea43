use std::borrow::Cow;

use percent_encoding::AsciiSet;

use crate::config::EncodeSet;

/// Standard query escaping.
///
/// Everything except the unreserved characters of
/// [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986#section-2.3) gets
/// percent-encoded, apart from SPACE which is written as `+` afterwards.
const QUERY_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// As defined in https://url.spec.whatwg.org/#query-percent-encode-set
///
/// The set of characters that need to be encoded in a _query_ string
/// are:
/// - CONTROL characters
/// - SPACE (but we'll separately encode it as `+`)
/// - U+0022 ("), U+0023 (#), U+003C (<), and U+003E (>).
///
/// NOTE: the querystring control characters are added on top, since
/// the encoder only ever sees individual keys and values.
const MINIMAL_QS_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    // `+` is used to represent a space in query strings
    .add(b'+')
    .add(b'[')
    .add(b']')
    // key, value separator
    .add(b'=')
    // denote key-value pairs
    .add(b'&');

/// Percent-encodes a key or value for use in a querystring.
///
/// The function returns an iterator to avoid allocations when no encoding
/// is needed.
pub(crate) fn encode(s: &str, set: EncodeSet) -> impl Iterator<Item = Cow<'_, str>> + '_ {
    let set = match set {
        EncodeSet::Query => QUERY_SET,
        EncodeSet::Minimal => MINIMAL_QS_SET,
    };
    percent_encoding::utf8_percent_encode(s, set).map(|chunk| {
        if chunk.contains(' ') {
            Cow::Owned(chunk.replace(' ', "+"))
        } else {
            Cow::Borrowed(chunk)
        }
    })
}
