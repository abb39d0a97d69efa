use super::Buffer;
use std::{fmt, io};

#[test]
fn append_and_append_str_are_equivalent() {
    let mut raw = Buffer::new();
    raw.append(b"key=value");

    let mut text = Buffer::new();
    text.append_str("key=value");

    assert_eq!(raw.bytes(), text.bytes());
    assert_eq!(raw.len(), 9);
}

#[test]
fn reset_keeps_capacity() {
    let mut buffer = Buffer::with_capacity(8);
    buffer.append(&[b'x'; 100]);
    let grown = buffer.capacity();
    assert!(grown >= 100);

    buffer.reset();
    assert_eq!(buffer.len(), 0);
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), grown);

    buffer.append_str("again");
    assert_eq!(buffer.bytes(), b"again");
    assert_eq!(buffer.capacity(), grown);
}

#[test]
fn append_repeated_pads() {
    let mut buffer = Buffer::new();
    buffer.append_str("hi");
    buffer.append_repeated(b' ', 3);
    assert_eq!(buffer.bytes(), b"hi   ");

    buffer.append_repeated(b'-', 0);
    assert_eq!(buffer.len(), 5);
}

#[test]
fn append_display_formats_in_place() {
    let mut buffer = Buffer::new();
    buffer.append_display(-42_i64);
    buffer.push(b' ');
    buffer.append_display(u64::MAX);
    assert_eq!(buffer.bytes(), b"-42 18446744073709551615");
}

#[test]
fn write_traits_append() {
    let mut buffer = Buffer::new();
    fmt::Write::write_fmt(&mut buffer, format_args!("{}-{}", 1, 2)).expect("fmt write succeeds");
    io::Write::write_all(&mut buffer, b"|io").expect("io write succeeds");
    io::Write::flush(&mut buffer).expect("flush succeeds");
    assert_eq!(buffer.bytes(), b"1-2|io");
}

#[test]
fn clone_does_not_alias() {
    let mut original = Buffer::new();
    original.append_str("a=1");
    let mut copy = original.clone();
    copy.append_str(" b=2");
    original.reset();

    assert!(original.is_empty());
    assert_eq!(copy.bytes(), b"a=1 b=2");
}

#[test]
fn into_vec_returns_content() {
    let mut buffer = Buffer::from(b"abc".to_vec());
    buffer.push(b'd');
    assert_eq!(buffer.into_vec(), b"abcd".to_vec());
}
