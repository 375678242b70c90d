//! What the errors say.

use insta::assert_snapshot;
use shapeshift::scalar::{to_bool, to_u8};
use shapeshift::{
    Shaped, ShiftError, TargetError, Value, assign, byte_size_of, map_to_record, record_to_map,
    value,
};
use shapeshift_testhelpers::test;

#[derive(Shaped, Debug)]
struct Server {
    ports: Vec<u16>,
}

#[derive(Shaped, Debug)]
struct Config {
    servers: Vec<Server>,
}

#[test]
fn scalar_errors() {
    assert_snapshot!(
        to_u8(&Value::I32(-3)).unwrap_err(),
        @"cannot convert i32 `-3` into u8: negative value for an unsigned target"
    );
    assert_snapshot!(
        to_bool(&value!({"on": true})).unwrap_err(),
        @"cannot convert object `{on: true}` into bool"
    );
}

#[test]
fn paths_point_into_the_target() {
    let mut config = <Config as Shaped>::zeroed();
    let err = assign(
        &value!({"servers": [{"ports": [80, "http"]}]}),
        &mut config,
    )
    .unwrap_err();
    assert_snapshot!(
        err,
        @"at .servers[0].ports[1]: cannot convert string `http` into u16: unparsable literal"
    );
    assert_eq!(config.servers[0].ports, [80, 0]);
}

#[test]
fn structural_errors() {
    let mut fixed = [0u8; 3];
    assert_snapshot!(
        assign(&value!([1, 2]), &mut fixed).unwrap_err(),
        @"cannot convert array `[1, 2]` into [u8; 3]: expected 3 elements, got 2"
    );

    let mut config = <Config as Shaped>::zeroed();
    assert_snapshot!(
        assign(&Value::I32(5), &mut config).unwrap_err(),
        @"cannot convert i32 `5` into Config: source is not a map"
    );

    let mut ip = core::net::Ipv4Addr::UNSPECIFIED;
    assert_snapshot!(
        assign(&Value::U32(1), &mut ip).unwrap_err(),
        @"cannot convert u32 `1` into Ipv4Addr"
    );
}

#[test]
fn record_mapper_errors() {
    let mut n = 0u8;
    assert_snapshot!(
        map_to_record(&value!({}), &mut n, None).unwrap_err(),
        @"target must be a record reference, got u8"
    );
    assert_snapshot!(
        record_to_map(&7u8, None).unwrap_err(),
        @"cannot convert u8 `7` into Object: source is not a record"
    );
}

#[test]
fn byte_size_errors() {
    assert_snapshot!(
        byte_size_of(&Value::from("3xb")).unwrap_err(),
        @"cannot convert string `3xb` into byte size: unknown byte unit `xb`"
    );
    assert_snapshot!(
        byte_size_of(&Value::from("0.1b")).unwrap_err(),
        @"cannot convert string `0.1b` into byte size: meaningless size below one byte"
    );
}

#[test]
fn target_errors_name_the_shape() {
    let err = ShiftError::from(TargetError::NullPointer {
        shape: <Option<u8> as Shaped>::SHAPE,
    });
    assert_snapshot!(err, @"invalid target: Option<u8> is null");
    assert_eq!(err.path_string(), "<root>");
}
