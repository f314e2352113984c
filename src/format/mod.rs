//! Restricted printf-style formatting into a bounded buffer.
//!
//! Supported directives are `%d %i %u %x %X %s %c %p %%`. There are no
//! flags, widths or precisions. Unknown directives render nothing and
//! consume no argument.
//!
//! Output is assembled in a [`RenderBuffer`] of fixed capacity and only
//! then pushed to the [`ByteSink`](crate::sink::ByteSink). Overflowing the
//! buffer silently truncates: the call still succeeds and the returned
//! count tells how many characters were kept.
//!
//! ```
//! use embedded_memmap::prelude::*;
//!
//! let mut out: heapless::Vec<u8, 64> = heapless::Vec::new();
//! let n = uprintf!(&mut out, "Value: %d, hex: %X, str: %s!", -42, 255, "ok").unwrap();
//! assert_eq!(out.as_slice(), b"Value: -42, hex: FF, str: ok!");
//! assert_eq!(n, out.len());
//! ```

mod arg;
mod buffer;
mod digits;
mod directive;
mod engine;

pub use arg::{Arg, ArgClass};
pub use buffer::RenderBuffer;
pub use directive::{Directive, FormatSpec, Piece, Pieces};
pub use engine::{DEFAULT_CAPACITY, check_args, format_into, render, render_with};

/// Renders a format string with typed arguments to a byte sink.
///
/// Expands to a call to [`render`] with each argument converted through
/// [`Arg::from`].
#[macro_export]
macro_rules! uprintf {
    ($sink:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::format::render(
            $sink,
            ::core::convert::AsRef::<[u8]>::as_ref(&$fmt),
            &[$($crate::format::Arg::from($arg)),*],
        )
    };
}
