//! Share-link encoding
//!
//! A palette travels in a single query parameter, `colors`, holding the hex
//! digits of each color joined by commas:
//!
//! ```text
//! https://example.com/?colors=ff0000,00ff00,0000ff,ffffff,000000
//! ```

use std::borrow::Cow;

use crate::color::Color;
use crate::palette::Palette;

/// Name of the query parameter carrying the palette
pub const COLORS_PARAM: &str = "colors";

/// Encode a palette as the `colors` parameter value.
///
/// ```
/// use huebox::color::Color;
/// use huebox::palette::Palette;
/// use huebox::share::encode;
///
/// let palette = Palette::new(["#ff0000", "#00ff00", "#0000ff", "#ffffff", "#000000"].map(Color::from_raw));
/// assert_eq!(encode(&palette), "ff0000,00ff00,0000ff,ffffff,000000");
/// ```
pub fn encode(palette: &Palette) -> String {
    palette.iter().map(Color::hex_digits).collect::<Vec<_>>().join(",")
}

/// Decode a `colors` parameter value.
///
/// Returns `None` for a missing or empty parameter, or when the number of
/// comma-separated segments is not exactly the palette size. Segments are
/// not checked for valid hex; each is prefixed with '#' as-is.
pub fn decode(param: Option<&str>) -> Option<Palette> {
    let param = param.filter(|p| !p.is_empty())?;
    let colors: Vec<Color> = param.split(',').map(|s| Color::from_raw(format!("#{}", s))).collect();
    Palette::try_from(colors).ok()
}

/// Build the full share link for a palette.
pub fn share_url(base: &str, palette: &Palette) -> String {
    format!("{}/?{}={}", base.trim_end_matches('/'), COLORS_PARAM, encode(palette))
}

/// Extract the `colors` parameter value from a URL or query string.
///
/// Accepts a full URL (`https://host/?colors=...`), a query (`?colors=...`)
/// or a bare query (`colors=...&x=1`). The value is percent-decoded.
/// Returns `None` when no `colors` pair is present, or when its escapes do
/// not decode to UTF-8.
pub fn colors_param(input: &str) -> Option<Cow<'_, str>> {
    let without_fragment = match input.find('#') {
        Some(pos) => &input[..pos],
        None => input,
    };
    let query = match without_fragment.find('?') {
        Some(pos) => &without_fragment[pos + 1..],
        None => without_fragment,
    };

    let value = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == COLORS_PARAM).then_some(value)
    })?;

    urlencoding::decode(value).ok()
}
