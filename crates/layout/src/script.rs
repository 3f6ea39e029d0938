//! Codepoint classification for the two-font model.
//!
//! The briefing body is drawn with a primary script font; emoji and other
//! pictographs come from a dedicated symbol font. Classification is a pure
//! block-range lookup, total over all valid codepoints.

/// The font group a codepoint is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptClass {
    /// Body script: letters, digits, punctuation, CJK.
    Primary,
    /// Emoji, pictographs, dingbats.
    Symbol,
}

impl ScriptClass {
    pub(crate) const COUNT: usize = 2;

    pub(crate) fn index(self) -> usize {
        match self {
            ScriptClass::Primary => 0,
            ScriptClass::Symbol => 1,
        }
    }
}

/// Classifies one codepoint.
pub fn classify(c: char) -> ScriptClass {
    match c as u32 {
        0x2600..=0x26FF => ScriptClass::Symbol,   // Miscellaneous Symbols
        0x2700..=0x27BF => ScriptClass::Symbol,   // Dingbats
        0x1F300..=0x1FAFF => ScriptClass::Symbol, // emoji blocks incl. Symbols and Pictographs Extended-A
        _ => ScriptClass::Primary,
    }
}
