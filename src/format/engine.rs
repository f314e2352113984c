use core::convert::Infallible;

use super::{
    arg::Arg,
    buffer::RenderBuffer,
    digits::{Radix, push_signed, push_unsigned},
    directive::{Directive, Piece, Pieces},
};
use crate::{error::FormatError, sink::ByteSink};

/// Render buffer capacity used by [`render`], terminator included.
pub const DEFAULT_CAPACITY: usize = 128;

/// Renders `format` with `args` and pushes the result to `sink`.
///
/// Returns the number of characters pushed. Output longer than
/// `DEFAULT_CAPACITY - 1` characters is silently truncated.
///
/// Must not be called from interrupt context, and the sink must not call
/// back into the engine.
pub fn render<S: ByteSink>(
    sink: &mut S,
    format: &[u8],
    args: &[Arg<'_>],
) -> Result<usize, FormatError<S::Error>> {
    render_with::<DEFAULT_CAPACITY, S>(sink, format, args)
}

/// Like [`render`], with a render buffer of `N` slots.
pub fn render_with<const N: usize, S: ByteSink>(
    sink: &mut S,
    format: &[u8],
    args: &[Arg<'_>],
) -> Result<usize, FormatError<S::Error>> {
    let buf = format_into::<N>(format, args).map_err(|e| e.widen())?;
    for &b in buf.as_bytes() {
        sink.write_byte(b).map_err(FormatError::Sink)?;
    }
    Ok(buf.len())
}

/// Renders into a fresh [`RenderBuffer`] without touching any sink.
pub fn format_into<const N: usize>(
    format: &[u8],
    args: &[Arg<'_>],
) -> Result<RenderBuffer<N>, FormatError<Infallible>> {
    check_args(format, args)?;

    let mut buf = RenderBuffer::<N>::new();
    let mut next = args.iter();

    for piece in Pieces::new(format) {
        if buf.is_truncated() {
            break;
        }
        let spec = match piece {
            Piece::Literal(b) => {
                buf.push(b);
                continue;
            }
            Piece::Spec(spec) => spec,
        };
        // check_args guarantees an argument for every consuming directive.
        let arg = match spec.consumed {
            Some(_) => next.next().copied(),
            None => None,
        };
        emit(&mut buf, spec.directive, arg);
    }

    Ok(buf)
}

/// Verifies that every directive has an argument it can render.
///
/// Runs over the whole format before any output is produced.
pub fn check_args(format: &[u8], args: &[Arg<'_>]) -> Result<(), FormatError<Infallible>> {
    let mut used = 0;
    for piece in Pieces::new(format) {
        let Piece::Spec(spec) = piece else { continue };
        let Some(class) = spec.consumed else { continue };

        let arg = args.get(used).ok_or_else(|| {
            log::warn!("format directive {:?} has no argument at {}", spec.directive, used);
            FormatError::MissingArgument { index: used }
        })?;
        if !arg.fits(class) {
            log::warn!("argument {} does not fit {:?}", used, spec.directive);
            return Err(FormatError::ArgumentMismatch {
                index: used,
                directive: spec.directive,
            });
        }
        used += 1;
    }

    if used != args.len() {
        log::warn!("format consumed {} of {} arguments", used, args.len());
        return Err(FormatError::UnusedArguments {
            expected: used,
            supplied: args.len(),
        });
    }
    Ok(())
}

fn emit<const N: usize>(buf: &mut RenderBuffer<N>, directive: Directive, arg: Option<Arg<'_>>) {
    match (directive, arg) {
        (Directive::Int, Some(a)) => push_signed(buf, a.as_bits() as i32),
        (Directive::Uint, Some(a)) => push_unsigned(buf, a.as_bits() as u64, Radix::Decimal),
        (Directive::HexLower, Some(a)) => push_unsigned(buf, a.as_bits() as u64, Radix::HexLower),
        (Directive::HexUpper, Some(a)) => push_unsigned(buf, a.as_bits() as u64, Radix::HexUpper),
        (Directive::Str, Some(Arg::Str(s))) => buf.push_str(s),
        (Directive::Char, Some(a)) => {
            buf.push(a.as_bits() as u8);
        }
        (Directive::Pointer, Some(Arg::Ptr(p))) => {
            buf.push_str(b"0x");
            push_unsigned(buf, p as u64, Radix::HexLower);
        }
        (Directive::Percent, _) => {
            buf.push(b'%');
        }
        // Unknown directives render nothing.
        _ => {}
    }
}

impl FormatError<Infallible> {
    /// Re-types an argument error for a caller with a concrete sink error.
    pub(crate) fn widen<E>(self) -> FormatError<E> {
        match self {
            FormatError::MissingArgument { index } => FormatError::MissingArgument { index },
            FormatError::ArgumentMismatch { index, directive } => {
                FormatError::ArgumentMismatch { index, directive }
            }
            FormatError::UnusedArguments { expected, supplied } => {
                FormatError::UnusedArguments { expected, supplied }
            }
            FormatError::Sink(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkFull;
    use crate::test_support::{RecordingSink, assert_renders};

    #[test]
    fn renders_each_directive() {
        assert_renders(b"%d", &[Arg::from(-5)], b"-5");
        assert_renders(b"%i", &[Arg::from(17)], b"17");
        assert_renders(b"%u", &[Arg::from(0u32)], b"0");
        assert_renders(b"%X", &[Arg::from(0xABu32)], b"AB");
        assert_renders(b"%x", &[Arg::from(0xABu32)], b"ab");
        assert_renders(b"%s", &[Arg::from("flash")], b"flash");
        assert_renders(b"%c", &[Arg::from('Z')], b"Z");
        assert_renders(b"%p", &[Arg::ptr(0x500)], b"0x500");
        assert_renders(b"%p", &[Arg::ptr(0)], b"0x0");
        assert_renders(b"100%%", &[], b"100%");
    }

    #[test]
    fn integer_extremes_fit_the_scratch_array() {
        assert_renders(b"%d", &[Arg::Int(i32::MIN)], b"-2147483648");
        assert_renders(b"%d", &[Arg::Int(i32::MAX)], b"2147483647");
        assert_renders(b"%u", &[Arg::Uint(u32::MAX)], b"4294967295");
        assert_renders(b"%X", &[Arg::Uint(u32::MAX)], b"FFFFFFFF");
    }

    #[test]
    fn integers_reinterpret_across_signedness() {
        assert_renders(b"%u", &[Arg::Int(-1)], b"4294967295");
        assert_renders(b"%x", &[Arg::Int(-1)], b"ffffffff");
        assert_renders(b"%d", &[Arg::Uint(0xFFFF_FFFE)], b"-2");
        assert_renders(b"%c", &[Arg::Int(0x141)], b"A");
    }

    #[test]
    fn unknown_directive_is_skipped() {
        assert_renders(b"a%qb", &[], b"ab");
        assert_renders(b"%q%d", &[Arg::Int(3)], b"3");
        assert_renders(b"tail%", &[], b"tail");
    }

    #[test]
    fn string_argument_stops_at_nul() {
        assert_renders(b"[%s]", &[Arg::from(b"ab\0cd")], b"[ab]");
    }

    #[test]
    fn scenario_pushes_every_character_in_order() {
        let mut sink = RecordingSink::new();
        let n = crate::uprintf!(
            &mut sink,
            "Value: %d, hex: %X, str: %s!",
            -42,
            255,
            "ok"
        )
        .unwrap();

        assert_eq!(sink.bytes(), b"Value: -42, hex: FF, str: ok!");
        assert_eq!(n, 29);
        assert_eq!(sink.calls, n);
    }

    #[test]
    fn long_string_truncates_to_capacity_minus_one() {
        let long = [b'x'; 300];
        let buf = format_into::<DEFAULT_CAPACITY>(b"%s", &[Arg::Str(&long)]).unwrap();

        assert_eq!(buf.len(), DEFAULT_CAPACITY - 1);
        assert_eq!(buf.as_bytes_with_nul()[DEFAULT_CAPACITY - 1], 0);
        assert!(buf.as_bytes().iter().all(|&b| b == b'x'));
        assert!(buf.is_truncated());

        let mut sink = RecordingSink::new();
        let n = render(&mut sink, b"%s", &[Arg::Str(&long)]).unwrap();
        assert_eq!(n, DEFAULT_CAPACITY - 1);
        assert_eq!(sink.calls, DEFAULT_CAPACITY - 1);
    }

    #[test]
    fn truncation_applies_to_every_kind_of_output() {
        let buf = format_into::<6>(b"ab%p", &[Arg::ptr(0xBEEF)]).unwrap();
        assert_eq!(buf.as_bytes_with_nul(), b"ab0xb\0");

        let buf = format_into::<4>(
            b"%c%c%c%c",
            &[Arg::Char(1), Arg::Char(2), Arg::Char(3), Arg::Char(4)],
        )
        .unwrap();
        assert_eq!(buf.as_bytes(), &[1, 2, 3]);

        let buf = format_into::<3>(b"%%%%%%", &[]).unwrap();
        assert_eq!(buf.as_bytes(), b"%%");
    }

    #[test]
    fn mismatched_arguments_are_rejected_before_output() {
        let mut sink = RecordingSink::new();

        let err = render(&mut sink, b"ok %s", &[Arg::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::ArgumentMismatch {
                index: 0,
                directive: Directive::Str
            }
        );

        let err = render(&mut sink, b"%d %p", &[Arg::Int(1), Arg::Uint(2)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::ArgumentMismatch {
                index: 1,
                directive: Directive::Pointer
            }
        );

        assert_eq!(sink.calls, 0);
    }

    #[test]
    fn argument_count_must_match() {
        assert_eq!(
            check_args(b"%d %d", &[Arg::Int(1)]),
            Err(FormatError::MissingArgument { index: 1 })
        );
        assert_eq!(
            check_args(b"%d", &[Arg::Int(1), Arg::Int(2)]),
            Err(FormatError::UnusedArguments {
                expected: 1,
                supplied: 2
            })
        );
        // %% and unknown directives take nothing.
        assert_eq!(check_args(b"%% %z", &[]), Ok(()));
    }

    #[test]
    fn sink_failure_propagates() {
        let mut out: heapless::Vec<u8, 4> = heapless::Vec::new();
        let err = render(&mut out, b"overflow", &[]).unwrap_err();
        assert_eq!(err, FormatError::Sink(SinkFull));
        assert_eq!(out.as_slice(), b"over");
    }
}
