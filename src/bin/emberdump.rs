//! Prints the structure of EmBER-encoded files.
//!
//! Provide one or more file names and you will receive one line per data
//! value with its outer identifier, its type, and, for primitive values,
//! its contents. The content of containers is indented.

use std::{env, fs, io, process};
use ember_ber::{Error, StreamReader};
use ember_ber::decode::IoSource;

fn dump(path: &str) -> Result<(), Error> {
    let file = io::BufReader::new(fs::File::open(path)?);
    let mut reader = StreamReader::new(IoSource::new(file));
    while reader.read()? {
        if !reader.is_data_value()? {
            println!("{:indent$}}}", "", indent = 2 * reader.depth());
            continue
        }
        let outer = reader.outer_id()?;
        let number = reader.inner_number()?;
        if number.is_container() {
            // The depth already includes the container just opened.
            let indent = 2 * reader.depth().saturating_sub(1);
            println!("{:indent$}{} {} {{", "", outer, number);
        }
        else {
            let indent = 2 * reader.depth();
            let value = reader.read_contents()?;
            println!("{:indent$}{} {}: {}", "", outer, number, value);
        }
    }
    Ok(())
}

fn main() {
    let mut args = env::args();
    args.next(); // Skip executable name.
    let mut failed = false;
    for arg in args {
        if let Err(err) = dump(&arg) {
            eprintln!("{}: {}", arg, err);
            failed = true;
        }
    }
    if failed {
        process::exit(1)
    }
}
