//! Glyph metrics of the PDF base fonts
//!
//! Advance widths of Helvetica and Helvetica-Bold in 1/1000 em, taken from
//! the Adobe core font AFM files. Builtin fonts ship no metrics in `printpdf`,
//! so wrapping and centering measure text with these tables.

/// Points to millimetres
pub const PT_TO_MM: f32 = 0.352_778;

/// Helvetica widths for `' '..='~'`
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold widths for `' '..='~'`
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Width used for characters outside the tables; as wide as the widest capitals
const FALLBACK: u16 = 1000;

/// Advance width of one character in 1/1000 em
pub fn char_units(c: char, bold: bool) -> u32 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    let width = match c {
        ' '..='~' => table[c as usize - 0x20],
        'ß' => 611,
        '€' | '§' => 556,
        '°' => 400,
        '„' | '“' | '”' => {
            if bold {
                500
            } else {
                333
            }
        }
        '–' => 556,
        'Æ' | 'Œ' => 1000,
        'æ' => 889,
        'œ' => 944,
        _ => match base_letter(c) {
            Some(base) => table[base as usize - 0x20],
            None => FALLBACK,
        },
    };
    u32::from(width)
}

/// Accented Latin letters share the advance width of their base letter
fn base_letter(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Š' => 'S',
        'Ž' => 'Z',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' => 's',
        'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

/// Advance width of a string in 1/1000 em
pub fn text_units(text: &str, bold: bool) -> u32 {
    text.chars().map(|c| char_units(c, bold)).sum()
}

/// Width of a string in millimetres at the given point size
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    units_to_mm(text_units(text, bold), size)
}

fn units_to_mm(units: u32, size: f32) -> f32 {
    units as f32 / 1000.0 * size * PT_TO_MM
}

/// Largest advance (in 1/1000 em) that fits into `width` millimetres
fn units_fitting(width: f32, size: f32) -> u32 {
    (width / (size * PT_TO_MM) * 1000.0).floor().max(0.0) as u32
}

/// Greedy word wrap so that no line is wider than `max_width` millimetres.
///
/// Words wider than a whole line are split between characters. Nothing is
/// dropped: joining the lines with single spaces gives back the text with its
/// whitespace collapsed, apart from the split points of overlong words.
pub fn wrap_text(text: &str, max_width: f32, size: f32, bold: bool) -> Vec<String> {
    let limit = units_fitting(max_width, size);
    let space = char_units(' ', bold);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let width = text_units(word, bold);

        if !current.is_empty() && used + space + width <= limit {
            current.push(' ');
            current.push_str(word);
            used += space + width;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if width <= limit {
            current.push_str(word);
            used = width;
            continue;
        }

        for c in word.chars() {
            let advance = char_units(c, bold);
            if !current.is_empty() && used + advance > limit {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(c);
            used += advance;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
