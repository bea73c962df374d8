//! The stack of open values.

use smallvec::SmallVec;
use crate::ident::InnerNumber;


//------------ Stack ---------------------------------------------------------

/// The values the reader is currently inside of.
///
/// Every data value pushes an outer frame for the outer identifier. Values
/// whose type is a container additionally push a container frame for the
/// inner identifier.
#[derive(Clone, Debug, Default)]
pub(super) struct Stack {
    frames: SmallVec<[Frame; 8]>,
}

impl Stack {
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame)
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear()
    }

    /// Returns the number of open containers.
    pub fn depth(&self) -> usize {
        self.frames.iter().filter(|frame| frame.is_container()).count()
    }
}


//------------ Frame ---------------------------------------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Frame {
    /// The wrapper around a data value introduced by the outer identifier.
    Outer {
        /// The position right after the value.
        ///
        /// This is `None` for indefinite length.
        end: Option<usize>,

        /// The position of the length octets.
        length_pos: usize,
    },

    /// A container opened by the inner identifier.
    ///
    /// Reaching its end produces an end-of-container event.
    Container {
        /// The position right after the value if the length is definite.
        end: Option<usize>,

        /// The type of the container.
        number: InnerNumber,

        /// The position of the length octets.
        length_pos: usize,
    },
}

impl Frame {
    pub fn end(&self) -> Option<usize> {
        match *self {
            Frame::Outer { end, .. } | Frame::Container { end, .. } => end
        }
    }

    pub fn length_pos(&self) -> usize {
        match *self {
            Frame::Outer { length_pos, .. } => length_pos,
            Frame::Container { length_pos, .. } => length_pos,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(*self, Frame::Container { .. })
    }
}


//============ Tests =========================================================
