use super::arg::ArgClass;

/// Kind of a single `%` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `%d` or `%i`: signed decimal.
    Int,
    /// `%u`: unsigned decimal.
    Uint,
    /// `%x`: lowercase hexadecimal.
    HexLower,
    /// `%X`: uppercase hexadecimal.
    HexUpper,
    /// `%s`: byte string.
    Str,
    /// `%c`: single character.
    Char,
    /// `%p`: `0x` followed by lowercase hexadecimal.
    Pointer,
    /// `%%`: literal percent sign.
    Percent,
    /// Any other byte after `%`. Renders nothing, consumes nothing.
    Unknown(u8),
}

impl Directive {
    pub fn from_byte(b: u8) -> Self {
        match b {
            b'd' | b'i' => Directive::Int,
            b'u' => Directive::Uint,
            b'x' => Directive::HexLower,
            b'X' => Directive::HexUpper,
            b's' => Directive::Str,
            b'c' => Directive::Char,
            b'p' => Directive::Pointer,
            b'%' => Directive::Percent,
            other => Directive::Unknown(other),
        }
    }

    /// Argument class this directive consumes, if any.
    pub fn arg_class(&self) -> Option<ArgClass> {
        match self {
            Directive::Int | Directive::Uint | Directive::HexLower | Directive::HexUpper => {
                Some(ArgClass::Integer)
            }
            Directive::Char => Some(ArgClass::Character),
            Directive::Str => Some(ArgClass::Bytes),
            Directive::Pointer => Some(ArgClass::Address),
            Directive::Percent | Directive::Unknown(_) => None,
        }
    }
}

/// One parsed directive. Lives only for the duration of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub directive: Directive,
    pub consumed: Option<ArgClass>,
}

impl FormatSpec {
    fn new(directive: Directive) -> Self {
        Self {
            directive,
            consumed: directive.arg_class(),
        }
    }
}

/// A unit of a tokenized format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    Literal(u8),
    Spec(FormatSpec),
}

/// Single left-to-right tokenizer over a format string.
///
/// Stops at the first NUL or the end of the input. A `%` that is the last
/// byte yields nothing.
#[derive(Debug, Clone)]
pub struct Pieces<'f> {
    rest: &'f [u8],
}

impl<'f> Pieces<'f> {
    pub fn new(format: &'f [u8]) -> Self {
        Self { rest: format }
    }
}

impl Iterator for Pieces<'_> {
    type Item = Piece;

    fn next(&mut self) -> Option<Piece> {
        let rest = self.rest;
        match rest {
            [] | [0, ..] => None,
            [b'%'] | [b'%', 0, ..] => {
                self.rest = &[];
                None
            }
            [b'%', kind, tail @ ..] => {
                self.rest = tail;
                Some(Piece::Spec(FormatSpec::new(Directive::from_byte(*kind))))
            }
            [b, tail @ ..] => {
                self.rest = tail;
                Some(Piece::Literal(*b))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(d: Directive) -> Piece {
        Piece::Spec(FormatSpec::new(d))
    }

    #[test]
    fn tokenizes_literals_and_directives() {
        let pieces: heapless::Vec<Piece, 8> = Pieces::new(b"a%db%%").collect();
        assert_eq!(
            pieces.as_slice(),
            &[
                Piece::Literal(b'a'),
                spec(Directive::Int),
                Piece::Literal(b'b'),
                spec(Directive::Percent),
            ]
        );
    }

    #[test]
    fn recognizes_every_directive() {
        let pieces: heapless::Vec<Piece, 16> = Pieces::new(b"%d%i%u%x%X%s%c%p%%%q").collect();
        let kinds: heapless::Vec<Directive, 16> = pieces
            .iter()
            .filter_map(|p| match p {
                Piece::Spec(s) => Some(s.directive),
                Piece::Literal(_) => None,
            })
            .collect();
        assert_eq!(
            kinds.as_slice(),
            &[
                Directive::Int,
                Directive::Int,
                Directive::Uint,
                Directive::HexLower,
                Directive::HexUpper,
                Directive::Str,
                Directive::Char,
                Directive::Pointer,
                Directive::Percent,
                Directive::Unknown(b'q'),
            ]
        );
    }

    #[test]
    fn stops_at_nul() {
        assert_eq!(Pieces::new(b"ab\0cd").count(), 2);
        assert_eq!(Pieces::new(b"%\0d").count(), 0);
    }

    #[test]
    fn trailing_percent_yields_nothing() {
        let pieces: heapless::Vec<Piece, 4> = Pieces::new(b"x%").collect();
        assert_eq!(pieces.as_slice(), &[Piece::Literal(b'x')]);
    }

    #[test]
    fn only_unknown_and_percent_consume_nothing() {
        assert_eq!(Directive::Percent.arg_class(), None);
        assert_eq!(Directive::Unknown(b'z').arg_class(), None);
        assert_eq!(Directive::Pointer.arg_class(), Some(ArgClass::Address));
        assert_eq!(Directive::HexUpper.arg_class(), Some(ArgClass::Integer));
    }
}
