use shapeshift::{Reason, Value, byte_size_of};
use shapeshift_testhelpers::test;

fn size(text: &str) -> shapeshift::Result<i64> {
    byte_size_of(&Value::from(text))
}

#[test]
fn units() {
    assert_eq!(size("1Kb").unwrap(), 1024);
    assert_eq!(size("1b").unwrap(), 1);
    assert_eq!(size("2M").unwrap(), 2 * 1024 * 1024);
    assert_eq!(size("5G").unwrap(), 5 * 1024_i64.pow(3));
    assert_eq!(size("1tb").unwrap(), 1024_i64.pow(4));
    assert_eq!(size("3P").unwrap(), 3 * 1024_i64.pow(5));
    assert_eq!(size("8191P").unwrap(), 8191 * 1024_i64.pow(5));
    assert_eq!(size("10byte").unwrap(), 10);
}

#[test]
fn fractions_round_up() {
    assert_eq!(size("0.1K").unwrap(), 103);
    assert_eq!(size("0.5kb").unwrap(), 512);
    assert_eq!(size("1.0001K").unwrap(), 1025);
}

#[test]
fn plain_numbers_go_through_the_integer_converter() {
    assert_eq!(size("2048").unwrap(), 2048);
    assert_eq!(size("1.5").unwrap(), 1);
    assert_eq!(byte_size_of(&Value::U16(512)).unwrap(), 512);
    assert_eq!(byte_size_of(&Value::F64(3.9)).unwrap(), 3);
    assert_eq!(byte_size_of(&Value::from(&b"4k"[..])).unwrap(), 4096);
}

#[test]
fn garbage_is_rejected() {
    assert_eq!(size("0.1b").unwrap_err().reason(), Some(&Reason::MeaninglessSize));
    assert_eq!(size("0K").unwrap_err().reason(), Some(&Reason::MeaninglessSize));
    assert_eq!(
        size("12parsecs").unwrap_err().reason(),
        Some(&Reason::UnknownUnit("parsecs".into()))
    );
    assert_eq!(size("1.2.3K").unwrap_err().reason(), Some(&Reason::Unparsable));
    assert_eq!(size("100000000P").unwrap_err().reason(), Some(&Reason::Overflow));
    assert_eq!(size("8192P").unwrap_err().reason(), Some(&Reason::Overflow));
    assert!(size("K").is_err());
    assert!(size("-1K").is_err());
    assert!(size("").is_err());
    assert!(byte_size_of(&Value::Null).is_err());
    assert!(byte_size_of(&Value::Char('1')).is_err());
}
