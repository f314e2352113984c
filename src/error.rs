use crate::format::Directive;

/// Errors that can occur while declaring or accessing memory regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemError {
    /// Address or length exceeds the bounds of the region or address space.
    OutOfBounds,
    /// Operation attempted with zero length.
    ZeroLength,
    /// The storage class of the target does not permit this access.
    Denied,
    /// No region with the given name exists.
    UnknownRegion,
    /// No symbol with the given name exists.
    UnknownSymbol,
    /// A region or symbol name was declared twice.
    DuplicateName,
    /// Two regions in the same address space overlap.
    Overlap,
    /// A region does not fit inside its address space.
    OutOfSpace,
    /// The members of a region need more bytes than the region declares.
    RegionOverflow,
    /// A symbol's power-on image is larger than the symbol.
    InitTooLarge,
    /// The catalog's fixed region or symbol capacity is exhausted.
    CatalogFull,
    /// A region's recorded bounds disagree with its declared size.
    Inconsistent,
}

impl core::fmt::Display for MemError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemError::OutOfBounds => write!(f, "address or length exceeds bounds"),
            MemError::ZeroLength => write!(f, "operation attempted with zero length"),
            MemError::Denied => write!(f, "access not permitted for this storage class"),
            MemError::UnknownRegion => write!(f, "no such region"),
            MemError::UnknownSymbol => write!(f, "no such symbol"),
            MemError::DuplicateName => write!(f, "name declared more than once"),
            MemError::Overlap => write!(f, "regions overlap"),
            MemError::OutOfSpace => write!(f, "region does not fit its address space"),
            MemError::RegionOverflow => write!(f, "members exceed the region size"),
            MemError::InitTooLarge => write!(f, "initial image larger than symbol"),
            MemError::CatalogFull => write!(f, "catalog capacity exceeded"),
            MemError::Inconsistent => write!(f, "region bounds disagree with its size"),
        }
    }
}

/// Errors reported by the format engine.
///
/// Argument errors are detected before anything reaches the sink, so a
/// rejected call emits no bytes at all. `E` is the sink's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError<E> {
    /// The directive at `index` has no matching argument.
    MissingArgument { index: usize },
    /// The argument at `index` cannot be rendered by `directive`.
    ArgumentMismatch { index: usize, directive: Directive },
    /// More arguments were supplied than the format consumes.
    UnusedArguments { expected: usize, supplied: usize },
    /// The byte sink failed; emission stopped at the failing byte.
    Sink(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for FormatError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatError::MissingArgument { index } => {
                write!(f, "missing argument {index}")
            }
            FormatError::ArgumentMismatch { index, directive } => {
                write!(f, "argument {index} does not match directive {directive:?}")
            }
            FormatError::UnusedArguments { expected, supplied } => {
                write!(f, "format consumes {expected} arguments, {supplied} supplied")
            }
            FormatError::Sink(e) => write!(f, "byte sink failed: {e:?}"),
        }
    }
}

impl core::error::Error for MemError {}

impl<E: core::fmt::Debug> core::error::Error for FormatError<E> {}

/// Error returned by fixed-capacity sinks that ran out of room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFull;

impl core::fmt::Display for SinkFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "sink capacity exceeded")
    }
}

impl core::error::Error for SinkFull {}
