//! Registry of display surfaces available to the loader.
//!
//! The display subsystem owns the surfaces; the registry only holds exclusive
//! borrows of them for as long as the loader needs them. The first registered
//! surface is the primary display and is the one the logo is painted on.

use rle565_pixelbuffer::Surface;

/// Ordered set of borrowed display surfaces.
#[derive(Default)]
pub struct DisplayRegistry<'a> {
    displays: Vec<&'a mut dyn Surface>,
}

impl<'a> DisplayRegistry<'a> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `surface` and returns its index.
    pub fn register(&mut self, surface: &'a mut dyn Surface) -> usize {
        self.displays.push(surface);
        self.displays.len() - 1
    }

    /// Returns the primary (first registered) surface.
    pub fn primary_mut(&mut self) -> Option<&mut (dyn Surface + 'a)> {
        self.displays.first_mut().map(|surface| &mut **surface)
    }

    /// Returns the number of registered surfaces.
    pub fn len(&self) -> usize {
        self.displays.len()
    }

    /// Returns `true` if no surface is registered.
    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }
}

impl std::fmt::Debug for DisplayRegistry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.displays.iter().map(|surface| surface.size()))
            .finish()
    }
}
