//! Driving the asynchronous core from blocking code.
//!
//! Readers and writers implement their logic once as `async` functions over
//! the [`Source`] and [`Sink`] traits. The blocking methods run those
//! futures through [`complete`]. With sources and sinks that never suspend,
//! such as slices, vectors, and `std::io` types, the futures finish on
//! their first poll.
//!
//! [`Source`]: crate::decode::Source
//! [`Sink`]: crate::encode::Sink

use std::io;
use std::future::Future;
use std::pin::pin;
use std::ptr::null;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use crate::error::Error;


/// Runs a future that is expected to complete without suspending.
///
/// If the future suspends anyway, it is dropped and a `WouldBlock` IO error
/// is returned. The reader or writer that produced the future is in an
/// undefined state afterwards.
pub(crate) fn complete<T>(
    fut: impl Future<Output = Result<T, Error>>
) -> Result<T, Error> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    let fut = pin!(fut);
    match fut.poll(&mut cx) {
        Poll::Ready(res) => res,
        Poll::Pending => {
            Err(Error::Io(io::Error::new(
                io::ErrorKind::WouldBlock,
                "source or sink suspended in a blocking call"
            )))
        }
    }
}


//------------ Noop Waker ----------------------------------------------------

fn noop_waker() -> Waker {
    // Safety: the vtable functions ignore the data pointer entirely.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

const NOOP_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_clone, noop, noop, noop
);

const unsafe fn noop_clone(_data: *const ()) -> RawWaker {
    noop_raw_waker()
}

const unsafe fn noop(_data: *const ()) { }

const fn noop_raw_waker() -> RawWaker {
    RawWaker::new(null(), &NOOP_WAKER_VTABLE)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    struct Suspend(bool);

    impl Future for Suspend {
        type Output = Result<u8, Error>;

        fn poll(
            mut self: std::pin::Pin<&mut Self>, _cx: &mut Context
        ) -> Poll<Self::Output> {
            if self.0 {
                Poll::Ready(Ok(7))
            }
            else {
                self.0 = true;
                Poll::Pending
            }
        }
    }

    #[test]
    fn ready_futures_complete() {
        assert_eq!(complete(async { Ok::<_, Error>(12) }).unwrap(), 12);
        assert_eq!(complete(Suspend(true)).unwrap(), 7);
    }

    #[test]
    fn suspending_futures_fail() {
        let err = complete(Suspend(false)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
