//! Combined fonts
//!
//! A text file that starts with the line `# combine partial fonts` followed by
//! one font name per line. The named fonts are located through the
//! [`crate::FontResolver`] of the parse options, loaded and concatenated in order.

use bstr::{BStr, ByteSlice};

use super::{load_with, FontFormat, LoadContext};
use crate::{cursor::ByteCursor, Font, PsfError, Result};

pub const COMBINED_MAGIC: &[u8] = b"# combine partial fonts\n";

/// Nesting limit for combined fonts that list other combined fonts.
/// Also stops files that list themselves.
pub const MAX_COMBINE_DEPTH: usize = 8;

pub(super) fn decode(cursor: &mut ByteCursor<'_>, ctx: &LoadContext<'_>) -> Result<Font> {
    cursor.expect_magic(COMBINED_MAGIC)?;
    let names = read_names(cursor)?;

    let Some(resolver) = ctx.options.resolver() else {
        return Err(PsfError::Unsupported("combined fonts without a font resolver"));
    };
    if ctx.depth >= MAX_COMBINE_DEPTH {
        return Err(PsfError::CombineTooDeep);
    }

    let mut result: Option<Font> = None;
    for name in names {
        let Some(path) = resolver.resolve(name) else {
            return Err(PsfError::FontNotFound(name.to_owned()));
        };
        log::debug!("combined font: loading '{}' from {}", name, path.display());
        let loaded = load_with(&path, &ctx.nested());
        resolver.release(path);

        let font = loaded?;
        match result.as_mut() {
            Some(combined) => combined.append(font)?,
            None => result = Some(font),
        }
    }

    let mut font = result.ok_or(PsfError::TrailingGarbage)?;
    font.set_format(FontFormat::Combined);
    Ok(font)
}

/// Splits the rest of the file into font names, one per line. Blank lines are
/// skipped, at least one name is required.
fn read_names<'a>(cursor: &mut ByteCursor<'a>) -> Result<Vec<&'a BStr>> {
    let mut rest = cursor.read_bytes(cursor.remaining())?;
    let mut names = Vec::new();
    while !rest.is_empty() {
        // every line, including the last one, needs a terminating newline
        let Some(end) = rest.find_byte(b'\n') else {
            return Err(PsfError::TrailingGarbage);
        };
        let line = &rest[..end];
        if line.find_byte(0).is_some() {
            return Err(PsfError::TrailingGarbage);
        }
        if !line.is_empty() {
            names.push(line.as_bstr());
        }
        rest = &rest[end + 1..];
    }
    if names.is_empty() {
        return Err(PsfError::TrailingGarbage);
    }
    Ok(names)
}
