#![no_main]

use libfuzzer_sys::fuzz_target;
use ember_ber::{InnerNumber, StreamReader, StreamWriter, Value};

/// Returns the events of a stream or `None` if it is malformed.
fn events(data: &[u8]) -> Option<Vec<(InnerNumber, Option<Value>)>> {
    let mut reader = StreamReader::from_slice(data);
    let mut res = Vec::new();
    while reader.read().ok()? {
        let number = reader.inner_number().ok()?;
        let value = if number.is_primitive() {
            Some(reader.read_contents().ok()?)
        }
        else {
            None
        };
        res.push((number, value));
    }
    Some(res)
}

fuzz_target!(|data: &[u8]| {
    // Re-encode everything the reader accepts. Decoding the result must
    // give the same events.
    let mut reader = StreamReader::from_slice(data);
    let mut writer = StreamWriter::new(Vec::new());
    loop {
        match reader.read() {
            Ok(true) => { }
            Ok(false) => break,
            Err(_) => return,
        }
        let number = reader.inner_number().unwrap();
        if number == InnerNumber::END_CONTAINER {
            writer.write_end_container().unwrap();
            continue
        }
        let outer = reader.outer_id().unwrap();
        if number.is_container() {
            writer.write_start_container(outer, number).unwrap();
        }
        else {
            let value = match reader.read_contents() {
                Ok(value) => value,
                Err(_) => return,
            };
            writer.write_value(outer, &value).unwrap();
        }
    }
    let encoded = writer.into_inner().unwrap();
    let left = events(data).unwrap();
    let right = events(&encoded).unwrap();
    assert_eq!(left.len(), right.len());
    for (left, right) in left.iter().zip(right.iter()) {
        assert_eq!(left.0, right.0);
        match (&left.1, &right.1) {
            // NaN doesn’t compare equal to itself.
            (Some(Value::Real(l)), Some(Value::Real(r))) => {
                assert!(
                    l.to_bits() == r.to_bits() || (l.is_nan() && r.is_nan())
                )
            }
            (l, r) => assert_eq!(l, r),
        }
    }
});
