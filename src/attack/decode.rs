//! Payload decoding
//!
//! Turns the server's delimited attack string into descriptors.

use glam::DVec3;

use super::error::DecodeError;
use super::types::{
    AttackDescriptor, AttackKind, AttackParameters, AttackPhase, CircleParams, LaserParams,
    SpinParams, SquareRingParams, WallParams,
};

const RECORD_SEPARATOR: char = '#';
const FIELD_SEPARATOR: char = '|';
const PARAM_SEPARATOR: char = ',';

/// Decode a full payload
///
/// Malformed records are dropped (and logged at debug level); the rest are
/// returned in payload order. Blank input yields an empty list.
pub fn decode(encoded: &str) -> Vec<AttackDescriptor> {
    if encoded.trim().is_empty() {
        return Vec::new();
    }

    encoded
        .split(RECORD_SEPARATOR)
        .filter_map(|record| match decode_record(record) {
            Ok(attack) => Some(attack),
            Err(e) => {
                log::debug!("Dropping attack record {:?}: {}", record, e);
                None
            }
        })
        .collect()
}

/// Split on `sep`, dropping trailing empty tokens (`"1,2,"` reads as `1,2`)
fn split_fields(s: &str, sep: char) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split(sep).collect();
    while tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Decode a single `KIND|params|COLOR|TICKS` record
pub fn decode_record(record: &str) -> Result<AttackDescriptor, DecodeError> {
    let fields = split_fields(record, FIELD_SEPARATOR);
    let &[kind, params, color, ticks] = fields.as_slice() else {
        return Err(DecodeError::FieldCount(fields.len()));
    };

    let kind =
        AttackKind::from_token(kind).ok_or_else(|| DecodeError::UnknownKind(kind.to_string()))?;
    let phase = AttackPhase::from_color_token(color);
    let ticks_remaining = ticks
        .parse::<u32>()
        .map_err(|_| DecodeError::InvalidTicks(ticks.to_string()))?;
    let parameters = parse_parameters(kind, params)?;

    Ok(AttackDescriptor::new(phase, ticks_remaining, parameters))
}

/// Cursor over a record's parameter tokens with typed accessors
struct ParamReader<'a> {
    kind: AttackKind,
    tokens: std::slice::Iter<'a, &'a str>,
}

impl<'a> ParamReader<'a> {
    fn next_token(&mut self) -> &'a str {
        // Length is checked before reading, so this never runs dry
        self.tokens.next().copied().unwrap_or_default()
    }

    fn float(&mut self) -> Result<f64, DecodeError> {
        let token = self.next_token();
        token.trim().parse().map_err(|_| DecodeError::InvalidNumber {
            kind: self.kind,
            value: token.to_string(),
            expected: "float",
        })
    }

    fn int(&mut self) -> Result<i32, DecodeError> {
        let token = self.next_token();
        token.parse().map_err(|_| DecodeError::InvalidNumber {
            kind: self.kind,
            value: token.to_string(),
            expected: "integer",
        })
    }

    fn vec3(&mut self) -> Result<DVec3, DecodeError> {
        Ok(DVec3::new(self.float()?, self.float()?, self.float()?))
    }
}

fn parse_parameters(kind: AttackKind, params: &str) -> Result<AttackParameters, DecodeError> {
    let tokens = split_fields(params, PARAM_SEPARATOR);
    if tokens.len() != kind.param_count() {
        return Err(DecodeError::ParamCount {
            kind,
            expected: kind.param_count(),
            found: tokens.len(),
        });
    }

    let mut r = ParamReader {
        kind,
        tokens: tokens.iter(),
    };

    let parameters = match kind {
        AttackKind::Laser => AttackParameters::Laser(LaserParams {
            start: r.vec3()?,
            end: r.vec3()?,
        }),
        AttackKind::SquareRing => AttackParameters::SquareRing(SquareRingParams {
            center: r.vec3()?,
            inner_radius: r.int()?,
            outer_radius: r.int()?,
        }),
        AttackKind::Spin => AttackParameters::Spin(SpinParams {
            center: r.vec3()?,
            ray_count: r.int()?,
            angle_offset: r.float()?,
            max_distance: r.int()?,
        }),
        AttackKind::Circle => AttackParameters::Circle(CircleParams {
            center: r.vec3()?,
            radius: r.float()?,
        }),
        AttackKind::Wall => AttackParameters::Wall(WallParams {
            axis: r.next_token().to_string(),
            position: r.float()?,
        }),
    };

    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::types::WallAxis;
    use proptest::prelude::*;

    #[test]
    fn test_decode_blank() {
        assert!(decode("").is_empty());
        assert!(decode("   ").is_empty());
        assert!(decode("\n\t").is_empty());
    }

    #[test]
    fn test_decode_example_payload() {
        let attacks = decode("LASER|0,64,0,10,64,0|RED|40#CIRCLE|5,64,5,3.5|GRAY|20");
        assert_eq!(attacks.len(), 2);

        assert_eq!(attacks[0].kind(), AttackKind::Laser);
        assert_eq!(attacks[0].phase, AttackPhase::Attack);
        assert_eq!(attacks[0].ticks_remaining, 40);
        assert_eq!(
            attacks[0].parameters,
            AttackParameters::Laser(LaserParams {
                start: DVec3::new(0.0, 64.0, 0.0),
                end: DVec3::new(10.0, 64.0, 0.0),
            })
        );

        assert_eq!(attacks[1].kind(), AttackKind::Circle);
        assert_eq!(attacks[1].phase, AttackPhase::Alert);
        assert_eq!(attacks[1].ticks_remaining, 20);
        assert_eq!(
            attacks[1].parameters,
            AttackParameters::Circle(CircleParams {
                center: DVec3::new(5.0, 64.0, 5.0),
                radius: 3.5,
            })
        );
    }

    #[test]
    fn test_decode_each_kind() {
        let ring = decode_record("SQUARE_RING|1.5,64,-2,2,4|RED|10").unwrap();
        assert_eq!(
            ring.parameters,
            AttackParameters::SquareRing(SquareRingParams {
                center: DVec3::new(1.5, 64.0, -2.0),
                inner_radius: 2,
                outer_radius: 4,
            })
        );

        let spin = decode_record("SPIN|0,64,0,8,22.5,12|GRAY|60").unwrap();
        assert_eq!(spin.phase, AttackPhase::Alert);
        assert_eq!(
            spin.parameters,
            AttackParameters::Spin(SpinParams {
                center: DVec3::new(0.0, 64.0, 0.0),
                ray_count: 8,
                angle_offset: 22.5,
                max_distance: 12,
            })
        );

        let wall = decode_record("WALL|y,17.5|RED|5").unwrap();
        match &wall.parameters {
            AttackParameters::Wall(p) => {
                assert_eq!(p.axis(), Some(WallAxis::Z));
                assert_eq!(p.position, 17.5);
            }
            other => panic!("expected wall, got {:?}", other),
        }
    }

    #[test]
    fn test_param_count_mismatch_each_kind() {
        let short = [
            "LASER|0,64,0,10,64|RED|40",
            "SQUARE_RING|0,64,0,1|RED|40",
            "SPIN|0,64,0,4,0|RED|40",
            "CIRCLE|5,64,5|RED|40",
            "WALL|x|RED|40",
        ];
        for record in short {
            assert!(decode(record).is_empty(), "{record} should be rejected");
        }

        let long = [
            "LASER|0,64,0,10,64,0,1|RED|40",
            "SQUARE_RING|0,64,0,1,2,3|RED|40",
            "SPIN|0,64,0,4,0,2,9|RED|40",
            "CIRCLE|5,64,5,3,1|RED|40",
            "WALL|x,1,2|RED|40",
        ];
        for record in long {
            assert!(decode(record).is_empty(), "{record} should be rejected");
        }
    }

    #[test]
    fn test_record_errors() {
        assert_eq!(decode_record("LASER|1|RED"), Err(DecodeError::FieldCount(3)));
        assert_eq!(
            decode_record("BEAM|0,0,0,1,1,1|RED|1"),
            Err(DecodeError::UnknownKind("BEAM".to_string()))
        );
        assert_eq!(
            decode_record("CIRCLE|0,0,0,abc|RED|1"),
            Err(DecodeError::InvalidNumber {
                kind: AttackKind::Circle,
                value: "abc".to_string(),
                expected: "float",
            })
        );
        assert_eq!(
            decode_record("CIRCLE|0,0,0,1|RED|-5"),
            Err(DecodeError::InvalidTicks("-5".to_string()))
        );
        assert!(matches!(
            decode_record("LASER|0,64,0|RED|1"),
            Err(DecodeError::ParamCount {
                kind: AttackKind::Laser,
                expected: 6,
                found: 3
            })
        ));
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        assert!(decode_record("SQUARE_RING|0,64,0,1.5,3|RED|10").is_err());
        assert!(decode_record("SPIN|0,64,0,4,0,2.0|RED|10").is_err());
    }

    #[test]
    fn test_no_range_validation() {
        let circle = decode_record("CIRCLE|0,64,0,-3|RED|10").unwrap();
        assert_eq!(
            circle.parameters,
            AttackParameters::Circle(CircleParams {
                center: DVec3::new(0.0, 64.0, 0.0),
                radius: -3.0,
            })
        );
        assert!(decode_record("SQUARE_RING|0,64,0,5,2|RED|10").is_ok());
        assert!(decode_record("WALL|diagonal,3|RED|10").is_ok());
    }

    #[test]
    fn test_partial_failure_isolation() {
        let attacks = decode("CIRCLE|0,64,0,2|RED|10#CIRCLE|0,64,nope,2|RED|10#WALL|x,4|GRAY|3");
        assert_eq!(attacks.len(), 2);
        assert_eq!(attacks[0].kind(), AttackKind::Circle);
        assert_eq!(attacks[1].kind(), AttackKind::Wall);
    }

    #[test]
    fn test_trailing_separators_ignored() {
        let laser = decode("LASER|0,64,0,10,64,0,|RED|40");
        assert_eq!(laser.len(), 1);
        assert_eq!(
            laser[0].parameters,
            AttackParameters::Laser(LaserParams {
                start: DVec3::new(0.0, 64.0, 0.0),
                end: DVec3::new(10.0, 64.0, 0.0),
            })
        );

        let circle = decode("CIRCLE|0,64,0,1|RED|20|");
        assert_eq!(circle.len(), 1);
        assert_eq!(circle[0].ticks_remaining, 20);

        assert_eq!(decode("WALL|x,5,,|RED|1").len(), 1);
        assert_eq!(decode("SPIN|0,64,0,4,0,2|RED|20||").len(), 1);
    }

    #[test]
    fn test_inner_empty_tokens_still_rejected() {
        assert!(decode_record("LASER|0,64,,10,64,0|RED|40").is_err());
        assert!(decode_record("CIRCLE||0,64,0,1|RED|20").is_err());
        assert_eq!(decode_record("|||"), Err(DecodeError::FieldCount(1)));
    }

    #[test]
    fn test_empty_records_dropped() {
        let attacks = decode("#CIRCLE|0,64,0,2|RED|10##");
        assert_eq!(attacks.len(), 1);
    }

    const VALID: [&str; 5] = [
        "LASER|0,64,0,10,64,0|RED|40",
        "SQUARE_RING|3,64,-8,1,3|GRAY|12",
        "SPIN|0,64,0,4,0,2|RED|20",
        "CIRCLE|5,64,5,3.5|GRAY|20",
        "WALL|z,9|RED|0",
    ];

    proptest! {
        #[test]
        fn prop_decode_is_pure(input in ".{0,200}") {
            prop_assert_eq!(format!("{:?}", decode(&input)), format!("{:?}", decode(&input)));
        }

        #[test]
        fn prop_malformed_neighbour_is_isolated(idx in 0usize..5, junk in "[^#]{0,40}") {
            let valid = VALID[idx];
            let expected = decode(valid);
            prop_assert_eq!(expected.len(), 1);

            let junk_decoded = decode_record(&junk).ok();
            let mut combined = expected.clone();
            combined.extend(junk_decoded);
            prop_assert_eq!(
                format!("{:?}", decode(&format!("{valid}#{junk}"))),
                format!("{:?}", combined)
            );
        }
    }
}
