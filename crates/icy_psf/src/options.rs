use std::{fmt, num::NonZeroU32, path::PathBuf};

use bstr::BStr;

/// Locates the font files listed in a combined font.
///
/// Any `Fn(&BStr) -> Option<PathBuf>` closure is a resolver.
pub trait FontResolver: Send + Sync {
    /// Maps a name from a combined font to the file to load.
    /// Returns `None` if no such font can be found.
    fn resolve(&self, name: &BStr) -> Option<PathBuf>;

    /// Called with every path returned by [`FontResolver::resolve`] once the font it
    /// names has been loaded, whether loading succeeded or not.
    fn release(&self, _path: PathBuf) {}
}

impl<F> FontResolver for F
where
    F: Fn(&BStr) -> Option<PathBuf> + Send + Sync,
{
    fn resolve(&self, name: &BStr) -> Option<PathBuf> {
        self(name)
    }
}

/// Configuration for [`crate::parse`] and [`crate::load`].
#[derive(Default)]
pub struct ParseOptions {
    /// Desired glyph height for files that contain several point sizes.
    /// `None` rejects such files.
    pub target_height: Option<NonZeroU32>,

    resolver: Option<Box<dyn FontResolver>>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// A height of zero clears the target height.
    pub fn with_target_height(mut self, height: u32) -> Self {
        self.target_height = NonZeroU32::new(height);
        self
    }

    /// Enables combined fonts. Without a resolver they fail to load.
    pub fn with_resolver(mut self, resolver: impl FontResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn resolver(&self) -> Option<&dyn FontResolver> {
        self.resolver.as_deref()
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("target_height", &self.target_height)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstr::ByteSlice;

    #[test]
    fn test_builder() {
        let options = ParseOptions::new().with_target_height(14);
        assert_eq!(options.target_height.map(NonZeroU32::get), Some(14));
        assert!(options.resolver().is_none());

        let options = options.with_target_height(0);
        assert_eq!(options.target_height, None);
    }

    #[test]
    fn test_closure_resolver() {
        let options = ParseOptions::new().with_resolver(|name: &BStr| Some(PathBuf::from(format!("/fonts/{name}.psf"))));
        let resolver = options.resolver().unwrap();
        assert_eq!(resolver.resolve(b"lat1".as_bstr()), Some(PathBuf::from("/fonts/lat1.psf")));
    }
}
