#![no_main]

use libfuzzer_sys::fuzz_target;
use ember_ber::{ReaderConfig, StreamReader};
use ember_ber::decode::SliceSource;

fuzz_target!(|data: &[u8]| {
    // Read everything with a tiny buffer to exercise refilling.
    let mut reader = match StreamReader::with_config(
        SliceSource::new(data),
        ReaderConfig::default().with_buffer_size(3)
    ) {
        Ok(reader) => reader,
        Err(_) => return,
    };
    loop {
        match reader.read() {
            Ok(true) => { }
            Ok(false) => {
                assert_eq!(reader.depth(), 0);
                break
            }
            Err(_) => break,
        }
        if reader.can_read_contents() && reader.read_contents().is_err() {
            break
        }
    }
});
