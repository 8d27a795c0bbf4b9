//! Tracking open and ready file descriptors with `FdSet`

use fdset::{Error, FdSet};

fn main() -> Result<(), Error> {
    println!("=== FdSet fd tracking ===\n");

    let mut open = FdSet::new()?;
    println!("Initial capacity: {} fds", open.capacity());

    for fd in [0, 1, 2, 5, 9] {
        open.add(fd)?;
    }
    println!("Open fds: {open:?}");

    // A descriptor past the default capacity grows the set
    open.add(4000)?;
    println!("After opening fd 4000, capacity is {}", open.capacity());

    match open.remove(3) {
        Err(Error::NotPresent { element }) => println!("fd {element} was never opened"),
        other => println!("unexpected: {other:?}"),
    }
    match open.remove(1_000_000) {
        Err(e @ Error::OutOfRange { .. }) => println!("rejected: {e}"),
        other => println!("unexpected: {other:?}"),
    }

    let readable = FdSet::from_members(64, [1, 5, 7])?;
    let ready = open.intersection(&readable)?;
    println!("\nReady to read: {ready:?}");

    let idle = open.difference(&readable)?;
    println!("Idle: {idle:?}");

    println!("\nWalking open fds with the embedded cursor:");
    let mut fd = open.iter_begin();
    while open.iter_more() {
        if let Some(fd) = fd {
            println!("  fd {fd}");
        }
        fd = open.iter_next();
    }

    Ok(())
}
