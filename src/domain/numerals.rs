/// Canonical day/chapter numerals, index 0 is the numeral for 1.
const HEB_NUMERALS: [&str; 30] = [
    "א׳", "ב׳", "ג׳", "ד׳", "ה׳", "ו׳", "ז׳", "ח׳", "ט׳", "י׳", //
    "י״א", "י״ב", "י״ג", "י״ד", "ט״ו", "ט״ז", "י״ז", "י״ח", "י״ט", "כ׳", //
    "כ״א", "כ״ב", "כ״ג", "כ״ד", "כ״ה", "כ״ו", "כ״ז", "כ״ח", "כ״ט", "ל׳",
];

/// Geresh, gershayim and the ASCII/typographic quotes people type instead.
const NUMERAL_MARKS: [char; 8] = ['׳', '״', '\'', '"', '‘', '’', '“', '”'];

pub const GERESH: char = '׳';
pub const GERSHAYIM: char = '״';

/// Encode 1..=30 as a Hebrew numeral. Anything else falls back to decimal.
pub fn encode(n: i64) -> String {
    if (1..=30).contains(&n) {
        HEB_NUMERALS[(n - 1) as usize].to_string()
    } else {
        n.to_string()
    }
}

/// Decode a Hebrew numeral in 1..=30, ignoring marks and whitespace.
///
/// Returns -1 when the text is not a known numeral.
pub fn decode(s: &str) -> i32 {
    let clean = strip_marks(s);
    if clean.is_empty() {
        return -1;
    }
    HEB_NUMERALS
        .iter()
        .position(|numeral| strip_marks(numeral) == clean)
        .map_or(-1, |idx| idx as i32 + 1)
}

fn strip_marks(s: &str) -> String {
    s.chars()
        .filter(|c| !NUMERAL_MARKS.contains(c) && !c.is_whitespace())
        .collect()
}

/// Full gematria rendering for any positive number, e.g. 787 -> "תשפ״ז".
pub fn encode_gematria(n: u32) -> String {
    if n == 0 {
        return n.to_string();
    }

    const HUNDREDS: [(u32, char); 4] = [(400, 'ת'), (300, 'ש'), (200, 'ר'), (100, 'ק')];
    const TENS: [char; 9] = ['י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ'];
    const UNITS: [char; 9] = ['א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט'];

    let mut letters = Vec::new();
    let mut rest = n % 1000;

    for (value, letter) in HUNDREDS {
        while rest >= value {
            letters.push(letter);
            rest -= value;
        }
    }

    // 15 and 16 avoid spelling the divine name
    match rest {
        15 => letters.extend(['ט', 'ו']),
        16 => letters.extend(['ט', 'ז']),
        _ => {
            if rest >= 10 {
                letters.push(TENS[(rest / 10 - 1) as usize]);
            }
            if rest % 10 > 0 {
                letters.push(UNITS[(rest % 10 - 1) as usize]);
            }
        }
    }

    match letters.len() {
        0 => n.to_string(),
        1 => format!("{}{}", letters[0], GERESH),
        len => {
            let mut out: String = letters[..len - 1].iter().collect();
            out.push(GERSHAYIM);
            out.push(letters[len - 1]);
            out
        }
    }
}
